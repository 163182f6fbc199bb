//! Row balancing: splitting one time-slot cluster into display rows.
//!
//! Clusters that fit in a row stay whole. A few sizes just above the row
//! width have fixed splits so the last row is not left nearly empty; anything
//! larger is chunked by row width in input order. The table is presentational
//! and deliberately not a bin-packing optimizer.

use std::collections::HashMap;

use anyhow::Result;
use tracing::warn;

use crate::config::LayoutConfig;

/// How a cluster of a given size is cut into rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitRule {
    /// The cluster fits in a single row.
    Single,
    /// Fixed leading row lengths, remainder in the last row.
    Fixed(Vec<usize>),
    /// Consecutive rows of the given width, remainder in the last row.
    Chunked(usize),
}

impl SplitRule {
    /// Row lengths this rule produces for a cluster of `size` items.
    pub fn row_lengths(&self, size: usize) -> Vec<usize> {
        if size == 0 {
            return Vec::new();
        }

        match self {
            SplitRule::Single => vec![size],
            SplitRule::Fixed(leading) => {
                // Clamped to the cluster so no row is ever empty.
                let mut remaining = size;
                let mut lengths = Vec::with_capacity(leading.len() + 1);
                for &len in leading {
                    let len = len.min(remaining);
                    if len > 0 {
                        lengths.push(len);
                        remaining -= len;
                    }
                }
                if remaining > 0 {
                    lengths.push(remaining);
                }
                lengths
            }
            SplitRule::Chunked(width) => {
                let width = (*width).max(1);
                let mut lengths = vec![width; size / width];
                if size % width != 0 {
                    lengths.push(size % width);
                }
                lengths
            }
        }
    }
}

/// Size-indexed lookup of split rules.
#[derive(Debug, Clone)]
pub struct SplitTable {
    max_row_width: usize,
    fixed: HashMap<usize, Vec<usize>>,
}

impl Default for SplitTable {
    fn default() -> Self {
        Self::lenient(&LayoutConfig::default())
    }
}

impl SplitTable {
    /// Build a table from a config, validating it first.
    pub fn from_config(config: &LayoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::lenient(config))
    }

    /// Build a table without failing: splits that do not pass
    /// [`SplitConfig::check`](crate::config::SplitConfig::check) are skipped,
    /// so those sizes fall back to chunking. The first entry for a size wins.
    pub fn lenient(config: &LayoutConfig) -> Self {
        let max_row_width = config.max_row_width.max(1);
        let mut fixed = HashMap::new();

        for split in &config.splits {
            if fixed.contains_key(&split.size) {
                warn!(size = split.size, "ignoring duplicate split");
                continue;
            }
            match split.check(max_row_width) {
                Ok(()) => {
                    fixed.insert(split.size, split.rows.clone());
                }
                Err(err) => warn!(size = split.size, error = %err, "ignoring invalid split"),
            }
        }

        Self {
            max_row_width,
            fixed,
        }
    }

    pub fn max_row_width(&self) -> usize {
        self.max_row_width
    }

    /// Look up the rule for a cluster size.
    pub fn rule(&self, size: usize) -> SplitRule {
        if size <= self.max_row_width {
            return SplitRule::Single;
        }

        match self.fixed.get(&size) {
            Some(leading) => SplitRule::Fixed(leading.clone()),
            None => SplitRule::Chunked(self.max_row_width),
        }
    }
}

/// Split a cluster into rows, preserving item order.
///
/// An empty cluster produces no rows.
pub fn balance<X>(cluster: Vec<X>, table: &SplitTable) -> Vec<Vec<X>> {
    let lengths = table.rule(cluster.len()).row_lengths(cluster.len());

    let mut remaining = cluster.into_iter();
    lengths
        .into_iter()
        .map(|len| remaining.by_ref().take(len).collect())
        .collect()
}
