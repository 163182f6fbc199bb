//! Configuration types for the layout packer.

use std::collections::HashSet;

use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;

/// Top-level layout configuration.
///
/// This defines row width, the keynote tag and the fixed split table used for
/// clusters slightly wider than a row. Loaded from TOML/JSON at runtime; every
/// field falls back to its default when absent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum number of sessions displayed side by side.
    pub max_row_width: usize,

    /// Session type rendered full-width. Compared exactly, case-sensitive.
    pub keynote_session_type: String,

    /// Fixed splits for specific cluster sizes.
    pub splits: Vec<SplitConfig>,
}

/// Fixed split for one cluster size.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SplitConfig {
    /// Cluster size this split applies to.
    pub size: usize,

    /// Leading row lengths, in order. The remainder forms the last row.
    pub rows: Vec<usize>,
}

impl SplitConfig {
    pub fn new(size: usize, rows: Vec<usize>) -> Self {
        Self { size, rows }
    }

    /// Check that this split yields non-empty rows no wider than
    /// `max_row_width`, with a remainder row at the end.
    pub fn check(&self, max_row_width: usize) -> Result<()> {
        let size = self.size;
        if size <= max_row_width {
            bail!(
                "split for cluster size {} is unreachable: clusters up to {} fit in one row",
                size,
                max_row_width
            );
        }
        ensure!(!self.rows.is_empty(), "split for cluster size {} is empty", size);

        for &len in &self.rows {
            ensure!(len > 0, "split for cluster size {} has an empty row", size);
            ensure!(
                len <= max_row_width,
                "split for cluster size {} has a row of {} (max {})",
                size,
                len,
                max_row_width
            );
        }

        let taken: usize = self.rows.iter().sum();
        ensure!(
            taken < size,
            "split for cluster size {} leaves no remainder row",
            size
        );
        ensure!(
            size - taken <= max_row_width,
            "split for cluster size {} leaves a remainder row of {} (max {})",
            size,
            size - taken,
            max_row_width
        );
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_row_width: 4,
            keynote_session_type: "keynote".to_string(),
            splits: vec![
                SplitConfig::new(5, vec![3]), // 3 + 2
                SplitConfig::new(6, vec![3]), // 3 + 3
                SplitConfig::new(7, vec![4]), // 4 + 3
            ],
        }
    }
}

impl LayoutConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid layout config TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).context("invalid layout config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every configured split produces non-empty rows no wider
    /// than `max_row_width`.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_row_width > 0, "max_row_width must be at least 1");

        let mut seen = HashSet::new();
        for split in &self.splits {
            ensure!(
                seen.insert(split.size),
                "duplicate split for cluster size {}",
                split.size
            );
            split.check(self.max_row_width)?;
        }

        Ok(())
    }
}
