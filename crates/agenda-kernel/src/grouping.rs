//! Time-slot grouping: clusters of items sharing an identical start time.

use std::fmt;

use crate::item::AgendaItem;
use crate::time::{compare_start, format_clock, parse_time};

/// A maximal run of items (after sorting) with the same parsed start time.
#[derive(Debug, Clone)]
pub struct Cluster<'a, T> {
    /// Parsed start time shared by every item in the cluster.
    pub start_minutes: f64,
    pub items: Vec<&'a T>,
}

impl<T> Cluster<'_, T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> fmt::Display for Cluster<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.items.len();
        let noun = if count == 1 { "session" } else { "sessions" };
        match format_clock(self.start_minutes) {
            Some(clock) => write!(f, "{} ({} {})", clock, count, noun),
            None => write!(f, "{} ({} {})", self.start_minutes, count, noun),
        }
    }
}

/// Group items into clusters by identical start time.
///
/// Items are stably sorted by parsed start time, then split wherever the
/// parsed value changes from one item to the next.
pub fn group_by_start_time<T: AgendaItem>(items: &[T]) -> Vec<Cluster<'_, T>> {
    cluster_indices(items)
        .into_iter()
        .map(|(start_minutes, indices)| Cluster {
            start_minutes,
            items: indices.into_iter().map(|i| &items[i]).collect(),
        })
        .collect()
}

/// Index form of [`group_by_start_time`]: `(start_minutes, positions)` per
/// cluster, positions referring to the input slice.
pub(crate) fn cluster_indices<T: AgendaItem>(items: &[T]) -> Vec<(f64, Vec<usize>)> {
    let mut keyed: Vec<(f64, usize)> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (parse_time(item.start_time()), i))
        .collect();

    // `sort_by` is stable: equal start times keep their input order.
    keyed.sort_by(|a, b| compare_start(a.0, b.0));

    let mut clusters: Vec<(f64, Vec<usize>)> = Vec::new();
    for (minutes, index) in keyed {
        match clusters.last_mut() {
            // NaN != NaN, so every unparsable time opens its own cluster.
            Some((current, members)) if *current == minutes => members.push(index),
            _ => clusters.push((minutes, vec![index])),
        }
    }

    clusters
}
