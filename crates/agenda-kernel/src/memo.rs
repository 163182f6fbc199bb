//! Input-identity memoization for agenda layouts.
//!
//! The rendering layer recomputes the layout whenever it receives a new
//! session list and reuses the previous result when handed the same list
//! again. Identity is pointer identity of the shared slice, not structural
//! equality: a fresh `Arc` with identical contents still recomputes.

use std::sync::Arc;

use anyhow::Result;
use tracing::trace;

use crate::balance::SplitTable;
use crate::config::LayoutConfig;
use crate::item::AgendaItem;
use crate::layout::{AgendaLayout, compute_row_indices};

type RowIndices = Vec<(f64, Vec<usize>)>;

/// Caches the rows computed for the most recent input slice.
#[derive(Debug)]
pub struct LayoutMemo<T> {
    config: LayoutConfig,
    table: SplitTable,
    cached: Option<(Arc<[T]>, RowIndices)>,
    recomputes: usize,
}

impl<T> Default for LayoutMemo<T> {
    fn default() -> Self {
        Self::with_table(LayoutConfig::default(), SplitTable::default())
    }
}

impl<T> LayoutMemo<T> {
    /// Create a memo for the given config, validating it first.
    pub fn new(config: LayoutConfig) -> Result<Self> {
        let table = SplitTable::from_config(&config)?;
        Ok(Self::with_table(config, table))
    }

    fn with_table(config: LayoutConfig, table: SplitTable) -> Self {
        Self {
            config,
            table,
            cached: None,
            recomputes: 0,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Number of times rows were actually computed.
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }

    /// Drop the cached rows; the next call recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

impl<T: AgendaItem> LayoutMemo<T> {
    /// Layout for `items`, recomputed only if `items` is not the slice seen
    /// on the previous call.
    pub fn layout<'a>(&mut self, items: &'a Arc<[T]>) -> AgendaLayout<'a, T> {
        let hit = matches!(&self.cached, Some((cached, _)) if Arc::ptr_eq(cached, items));

        if hit {
            trace!(sessions = items.len(), "agenda layout cache hit");
        } else {
            let rows = compute_row_indices(items, &self.table);
            self.cached = Some((Arc::clone(items), rows));
            self.recomputes += 1;
        }

        let rows = self
            .cached
            .as_ref()
            .map(|(_, rows)| rows.as_slice())
            .unwrap_or_default();

        AgendaLayout::from_row_indices(items, rows, &self.config.keynote_session_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Session;

    fn agenda() -> Arc<[Session]> {
        vec![
            Session::new(1, "9:00 AM", "10:00 AM", "keynote"),
            Session::new(2, "10:00 AM", "11:00 AM", "talk"),
            Session::new(3, "10:00 AM", "11:00 AM", "talk"),
        ]
        .into()
    }

    fn shape(layout: &AgendaLayout<'_, Session>) -> Vec<Vec<u64>> {
        layout
            .rows()
            .iter()
            .map(|row| row.iter().map(|s| s.id).collect())
            .collect()
    }

    #[test]
    fn test_same_slice_is_computed_once() {
        let mut memo = LayoutMemo::default();
        let sessions = agenda();

        let first = shape(&memo.layout(&sessions));
        let second = shape(&memo.layout(&sessions));

        assert_eq!(first, second);
        assert_eq!(first, vec![vec![1], vec![2, 3]]);
        assert_eq!(memo.recompute_count(), 1);
    }

    #[test]
    fn test_cloned_arc_is_the_same_identity() {
        let mut memo = LayoutMemo::default();
        let sessions = agenda();
        let alias = Arc::clone(&sessions);

        memo.layout(&sessions);
        memo.layout(&alias);
        assert_eq!(memo.recompute_count(), 1);
    }

    #[test]
    fn test_new_slice_with_equal_contents_recomputes() {
        let mut memo = LayoutMemo::default();

        memo.layout(&agenda());
        memo.layout(&agenda());
        assert_eq!(memo.recompute_count(), 2);
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let mut memo = LayoutMemo::default();
        let sessions = agenda();

        memo.layout(&sessions);
        memo.invalidate();
        memo.layout(&sessions);
        assert_eq!(memo.recompute_count(), 2);
    }

    #[test]
    fn test_memo_uses_configured_keynote_type() {
        let config = LayoutConfig {
            keynote_session_type: "talk".to_string(),
            ..LayoutConfig::default()
        };
        let mut memo = LayoutMemo::new(config).unwrap();
        let sessions = agenda();

        let layout = memo.layout(&sessions);
        assert!(layout.is_keynote(&sessions[1]));
        assert!(!layout.is_keynote(&sessions[0]));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = LayoutConfig {
            max_row_width: 0,
            ..LayoutConfig::default()
        };
        assert!(LayoutMemo::<Session>::new(config).is_err());
    }
}
