//! Agenda Kernel: laying out conference sessions on an agenda grid.
//!
//! Sessions arrive with display start times ("3:00 PM"). The kernel groups
//! sessions that start together and balances each group into rows of at most
//! four cards, so the rendering layer only has to ask for the rows, the column
//! width of each row and whether a card is a full-width keynote.
//!
//! Everything here is a pure, synchronous function of its input. Nothing
//! fails: malformed times degrade to a sort position, out-of-range queries
//! degrade to full width.

pub mod balance;
pub mod config;
pub mod grouping;
pub mod item;
pub mod layout;
pub mod memo;
pub mod time;

pub use balance::{SplitRule, SplitTable, balance};
pub use config::{LayoutConfig, SplitConfig};
pub use grouping::{Cluster, group_by_start_time};
pub use item::{AgendaItem, Session, SessionId};
pub use layout::{AgendaLayout, FULL_WIDTH, Row};
pub use memo::LayoutMemo;
pub use time::{compare_start, format_clock, parse_time};
