//! Configuration for chat scrolling and pagination.

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Scroll thresholds and page size for a chat message list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChatScrollConfig {
    /// Load older history once the viewport is this close to the top (px).
    pub load_older_threshold_px: f64,

    /// Follow new messages while the reader is this close to the bottom (px).
    pub stick_to_bottom_threshold_px: f64,

    /// Messages requested per history page.
    pub page_size: usize,
}

impl Default for ChatScrollConfig {
    fn default() -> Self {
        Self {
            load_older_threshold_px: 100.0,
            stick_to_bottom_threshold_px: 150.0,
            page_size: 50,
        }
    }
}

impl ChatScrollConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid chat scroll config TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(text).context("invalid chat scroll config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.load_older_threshold_px.is_finite() && self.load_older_threshold_px >= 0.0,
            "load_older_threshold_px must be a non-negative number"
        );
        ensure!(
            self.stick_to_bottom_threshold_px.is_finite()
                && self.stick_to_bottom_threshold_px >= 0.0,
            "stick_to_bottom_threshold_px must be a non-negative number"
        );
        ensure!(self.page_size > 0, "page_size must be at least 1");
        Ok(())
    }
}
