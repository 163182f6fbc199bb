//! Chat message lists assembled from paginated history and live delivery.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::room::RoomId;

/// Unique identifier for a chat message.
pub type MessageId = u64;

/// A chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub room_id: RoomId,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    fn sort_key(&self) -> (DateTime<Utc>, MessageId) {
        (self.created_at, self.id)
    }
}

/// Pagination cursor: fetch messages strictly older than this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub before_id: MessageId,
    pub before: DateTime<Utc>,
}

/// Messages in ascending `(created_at, id)` order, without duplicates.
#[derive(Debug, Clone, Default)]
pub struct MessageList {
    messages: Vec<ChatMessage>,
    ids: HashSet<MessageId>,
}

impl MessageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn contains(&self, id: MessageId) -> bool {
        self.ids.contains(&id)
    }

    pub fn newest(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Cursor for the next page of older history.
    pub fn oldest(&self) -> Option<Cursor> {
        self.messages.first().map(|m| Cursor {
            before_id: m.id,
            before: m.created_at,
        })
    }

    /// Merge a page of older messages. Pages may arrive in either order.
    ///
    /// Returns the number of messages that were not already present.
    pub fn prepend_older(&mut self, page: Vec<ChatMessage>) -> usize {
        let before = self.messages.len();
        for message in page {
            if self.ids.insert(message.id) {
                self.messages.push(message);
            }
        }

        let added = self.messages.len() - before;
        if added > 0 {
            self.messages.sort_by_key(ChatMessage::sort_key);
        }
        added
    }

    /// Insert a live message. Returns false for a duplicate.
    pub fn push_live(&mut self, message: ChatMessage) -> bool {
        if !self.ids.insert(message.id) {
            return false;
        }

        let key = message.sort_key();
        let in_order = self.messages.last().is_none_or(|last| last.sort_key() <= key);
        if in_order {
            self.messages.push(message);
        } else {
            let at = self.messages.partition_point(|m| m.sort_key() <= key);
            self.messages.insert(at, message);
        }
        true
    }
}
