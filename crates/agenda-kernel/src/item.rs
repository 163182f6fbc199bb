//! Agenda items: the session records the packer lays out.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Unique identifier for a session.
pub type SessionId = u64;

/// Anything that can be placed on the agenda grid.
///
/// The packer only ever reads the start time and the session type; every other
/// field of the implementor is opaque pass-through for the rendering layer.
/// Implement this for your own card types to lay them out without converting
/// them into [`Session`] first.
pub trait AgendaItem {
    /// Start time as a display string, e.g. `"3:00 PM"`.
    fn start_time(&self) -> &str;

    /// Category tag, e.g. `"keynote"` or `"workshop"`.
    fn session_type(&self) -> &str;
}

impl<T: AgendaItem + ?Sized> AgendaItem for &T {
    fn start_time(&self) -> &str {
        (**self).start_time()
    }

    fn session_type(&self) -> &str {
        (**self).session_type()
    }
}

/// A conference session as delivered by the events API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Display start time ("H:MM AM/PM").
    #[serde(default)]
    pub start_time: String,
    /// Display end time ("H:MM AM/PM").
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub session_type: String,
    /// Remaining display fields (title, speakers, stream url, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    pub fn new(
        id: SessionId,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        session_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            start_time: start_time.into(),
            end_time: end_time.into(),
            session_type: session_type.into(),
            extra: Map::new(),
        }
    }

    /// Attach an extra display field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl AgendaItem for Session {
    fn start_time(&self) -> &str {
        &self.start_time
    }

    fn session_type(&self) -> &str {
        &self.session_type
    }
}
