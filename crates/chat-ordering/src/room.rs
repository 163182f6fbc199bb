//! Chat room ordering for drag-and-drop reordering.
//!
//! Rooms carry a fractional `display_order`. Moving a room rewrites only the
//! moved room's value, to a number strictly between its new neighbours, so a
//! reorder normally persists a single update. When the float gap between two
//! neighbours is exhausted the whole list is renumbered.

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Unique identifier for a chat room.
pub type RoomId = u64;

/// A chat room as listed in the event sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRoom {
    pub id: RoomId,
    pub name: String,
    #[serde(default)]
    pub display_order: f64,
}

impl ChatRoom {
    pub fn new(id: RoomId, name: impl Into<String>, display_order: f64) -> Self {
        Self {
            id,
            name: name.into(),
            display_order,
        }
    }
}

/// A `display_order` value the caller must persist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayOrderUpdate {
    pub room_id: RoomId,
    pub display_order: f64,
}

/// Result of a reorder: the rooms in their new order plus the changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ReorderOutcome {
    pub rooms: Vec<ChatRoom>,
    pub updates: Vec<DisplayOrderUpdate>,
    /// True if the list had to be renumbered from 1.
    pub renumbered: bool,
}

/// Sort rooms for display: ascending `display_order`, ties keep their order.
pub fn sort_rooms(rooms: &mut [ChatRoom]) {
    rooms.sort_by(|a, b| a.display_order.total_cmp(&b.display_order));
}

/// Move the room at position `from` to position `to`.
///
/// Positions index the rooms sorted by [`sort_rooms`], with remove-then-insert
/// semantics: after the move the room sits at index `to`.
pub fn reorder_rooms(rooms: &[ChatRoom], from: usize, to: usize) -> Result<ReorderOutcome> {
    let mut ordered = rooms.to_vec();
    sort_rooms(&mut ordered);

    let len = ordered.len();
    ensure!(from < len, "source position {} out of range for {} rooms", from, len);
    ensure!(to < len, "destination position {} out of range for {} rooms", to, len);

    if from == to {
        return Ok(ReorderOutcome {
            rooms: ordered,
            updates: Vec::new(),
            renumbered: false,
        });
    }

    let moved = ordered.remove(from);
    ordered.insert(to, moved);

    let prev = to.checked_sub(1).map(|i| ordered[i].display_order);
    let next = ordered.get(to + 1).map(|r| r.display_order);

    if let Some(order) = fractional_order(prev, next) {
        let room = &mut ordered[to];
        room.display_order = order;
        debug!(room_id = room.id, from, to, display_order = order, "reordered chat room");

        let updates = vec![DisplayOrderUpdate {
            room_id: room.id,
            display_order: order,
        }];
        return Ok(ReorderOutcome {
            rooms: ordered,
            updates,
            renumbered: false,
        });
    }

    warn!(
        rooms = len,
        ?prev,
        ?next,
        "no room between neighbouring display orders, renumbering"
    );
    let updates = renumber(&mut ordered);
    Ok(ReorderOutcome {
        rooms: ordered,
        updates,
        renumbered: true,
    })
}

/// Order value for a room placed between `prev` and `next`.
///
/// `None` means no representable value lies strictly between the neighbours.
pub fn fractional_order(prev: Option<f64>, next: Option<f64>) -> Option<f64> {
    let candidate = match (prev, next) {
        (Some(p), Some(n)) => (p + n) / 2.0,
        (None, Some(n)) => n - 1.0,
        (Some(p), None) => p + 1.0,
        (None, None) => return Some(1.0),
    };

    let above_prev = prev.is_none_or(|p| candidate > p);
    let below_next = next.is_none_or(|n| candidate < n);
    (above_prev && below_next).then_some(candidate)
}

/// Reset orders to `1.0, 2.0, ...` and report every room that changed.
fn renumber(rooms: &mut [ChatRoom]) -> Vec<DisplayOrderUpdate> {
    let mut updates = Vec::new();
    for (i, room) in rooms.iter_mut().enumerate() {
        let order = (i + 1) as f64;
        if room.display_order != order {
            room.display_order = order;
            updates.push(DisplayOrderUpdate {
                room_id: room.id,
                display_order: order,
            });
        }
    }
    updates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rooms() -> Vec<ChatRoom> {
        vec![
            ChatRoom::new(1, "General", 1.0),
            ChatRoom::new(2, "Speakers", 2.0),
            ChatRoom::new(3, "Sponsors", 3.0),
            ChatRoom::new(4, "Help desk", 4.0),
        ]
    }

    fn ids(rooms: &[ChatRoom]) -> Vec<RoomId> {
        rooms.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_move_down_takes_midpoint() {
        let outcome = reorder_rooms(&rooms(), 0, 2).unwrap();

        assert_eq!(ids(&outcome.rooms), vec![2, 3, 1, 4]);
        assert_eq!(outcome.rooms[2].display_order, 3.5);
        assert_eq!(
            outcome.updates,
            vec![DisplayOrderUpdate {
                room_id: 1,
                display_order: 3.5
            }]
        );
        assert!(!outcome.renumbered);
    }

    #[test]
    fn test_move_up_takes_midpoint() {
        let outcome = reorder_rooms(&rooms(), 3, 1).unwrap();

        assert_eq!(ids(&outcome.rooms), vec![1, 4, 2, 3]);
        assert_eq!(outcome.rooms[1].display_order, 1.5);
    }

    #[test]
    fn test_move_to_head_and_tail() {
        let outcome = reorder_rooms(&rooms(), 2, 0).unwrap();
        assert_eq!(ids(&outcome.rooms), vec![3, 1, 2, 4]);
        assert_eq!(outcome.rooms[0].display_order, 0.0);

        let outcome = reorder_rooms(&rooms(), 0, 3).unwrap();
        assert_eq!(ids(&outcome.rooms), vec![2, 3, 4, 1]);
        assert_eq!(outcome.rooms[3].display_order, 5.0);
    }

    #[test]
    fn test_same_position_is_a_no_op() {
        let outcome = reorder_rooms(&rooms(), 1, 1).unwrap();
        assert_eq!(ids(&outcome.rooms), vec![1, 2, 3, 4]);
        assert!(outcome.updates.is_empty());
    }

    #[test]
    fn test_positions_refer_to_sorted_order() {
        let shuffled = vec![
            ChatRoom::new(3, "Sponsors", 3.0),
            ChatRoom::new(1, "General", 1.0),
            ChatRoom::new(2, "Speakers", 2.0),
        ];
        let outcome = reorder_rooms(&shuffled, 0, 1).unwrap();
        assert_eq!(ids(&outcome.rooms), vec![2, 1, 3]);
        assert_eq!(outcome.rooms[1].display_order, 2.5);
    }

    #[test]
    fn test_out_of_range_positions_are_errors() {
        let err = reorder_rooms(&rooms(), 4, 0).unwrap_err();
        assert!(err.to_string().contains("source position 4"));

        let err = reorder_rooms(&rooms(), 0, 9).unwrap_err();
        assert!(err.to_string().contains("destination position 9"));

        assert!(reorder_rooms(&[], 0, 0).is_err());
    }

    #[test]
    fn test_duplicate_orders_trigger_renumbering() {
        let tied = vec![
            ChatRoom::new(1, "General", 1.0),
            ChatRoom::new(2, "Speakers", 1.0),
            ChatRoom::new(3, "Sponsors", 1.0),
        ];
        let outcome = reorder_rooms(&tied, 2, 1).unwrap();

        assert!(outcome.renumbered);
        assert_eq!(ids(&outcome.rooms), vec![1, 3, 2]);
        let orders: Vec<f64> = outcome.rooms.iter().map(|r| r.display_order).collect();
        assert_eq!(orders, vec![1.0, 2.0, 3.0]);
        // Room 1 already had 1.0.
        assert_eq!(outcome.updates.len(), 2);
    }

    #[test]
    fn test_exhausted_gap_triggers_renumbering() {
        let tight = vec![
            ChatRoom::new(1, "General", 1.0),
            ChatRoom::new(2, "Speakers", 1.0 + f64::EPSILON),
            ChatRoom::new(3, "Sponsors", 2.0),
        ];
        let outcome = reorder_rooms(&tight, 2, 1).unwrap();

        assert!(outcome.renumbered);
        assert_eq!(ids(&outcome.rooms), vec![1, 3, 2]);
    }

    #[test]
    fn test_fractional_order() {
        assert_eq!(fractional_order(Some(1.0), Some(2.0)), Some(1.5));
        assert_eq!(fractional_order(None, Some(1.0)), Some(0.0));
        assert_eq!(fractional_order(Some(4.0), None), Some(5.0));
        assert_eq!(fractional_order(None, None), Some(1.0));
        assert_eq!(fractional_order(Some(2.0), Some(2.0)), None);
        assert_eq!(fractional_order(Some(f64::NAN), Some(2.0)), None);
    }

    #[test]
    fn test_repeated_moves_keep_shrinking_gap() {
        let mut current = rooms();
        for _ in 0..10 {
            current = reorder_rooms(&current, 3, 1).unwrap().rooms;
        }
        let mut sorted = current.clone();
        sort_rooms(&mut sorted);
        assert_eq!(ids(&sorted), ids(&current));
    }

    #[test]
    fn test_deserialize_defaults_order() {
        let room: ChatRoom = serde_json::from_str(r#"{"id": 5, "name": "Lobby"}"#).unwrap();
        assert_eq!(room.display_order, 0.0);
    }
}
