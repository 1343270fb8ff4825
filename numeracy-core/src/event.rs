//! Interaction events delivered to a session

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// UUIDv7 identifier assigned to each event as it reaches a session.
///
/// Used as ledger provenance; the embedded timestamp keeps ids time-ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(Uuid);

impl EventId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Extract the timestamp from the UUIDv7.
    #[must_use]
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.0.get_timestamp().map(|ts| {
            let (secs, nanos) = ts.to_unix();
            DateTime::from_timestamp(secs as i64, nanos).unwrap_or_else(Utc::now)
        })
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A raw signal from the input surface
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// A pointer-down..pointer-up stroke as a flat list of coordinates
    StrokeCompleted { points: Vec<f64> },
    /// The student finished the current drawing action
    ActionComplete,
    /// The student submitted a typed answer
    TextResponse { text: String },
}

impl InteractionEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            InteractionEvent::StrokeCompleted { .. } => "stroke_completed",
            InteractionEvent::ActionComplete => "action_complete",
            InteractionEvent::TextResponse { .. } => "text_response",
        }
    }
}
