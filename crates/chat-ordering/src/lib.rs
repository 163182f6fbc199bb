//! Chat Ordering: the client-side ordering rules of event chat.
//!
//! Two independent pieces:
//!
//! - [`room`]: drag-and-drop reordering of chat rooms. A move produces a
//!   fractional `display_order` between the new neighbours, so usually only
//!   one room has to be saved.
//! - [`scroll`]: infinite-scroll message history. Older pages are prepended
//!   without moving the content under the reader, and live messages only pull
//!   the viewport down when the reader was already at the bottom.

pub mod config;
pub mod messages;
pub mod room;
pub mod scroll;

pub use config::ChatScrollConfig;
pub use messages::{ChatMessage, Cursor, MessageId, MessageList};
pub use room::{
    ChatRoom, DisplayOrderUpdate, ReorderOutcome, RoomId, fractional_order, reorder_rooms,
    sort_rooms,
};
pub use scroll::{LoadRequest, MessageFeed, ScrollAnchor, ScrollDecision, ScrollMetrics};
