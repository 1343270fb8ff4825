//! WebSocket protocol message types
//!
//! Every frame is a JSON object tagged by a `type` field. Inbound frames are
//! parsed in two steps so that the different ways a frame can be malformed map
//! onto distinct [`ProtocolError`]s.

use numeracy_core::{AssessmentResult, InteractionEvent, ProbeDefinition, ProtocolError};
use serde::{Deserialize, Serialize};

/// Inbound `type` values this server understands
const CLIENT_MESSAGE_TYPES: &[&str] = &["draw_stroke", "action_complete", "submit_text_response"];

/// Messages sent from client to server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A finished stroke on the canvas
    DrawStroke {
        task_id: String,
        /// Flat list of `x, y` coordinates
        stroke_data: Vec<f64>,
    },

    /// The student finished the current drawing action
    ActionComplete { task_id: String },

    /// A typed answer
    SubmitTextResponse { task_id: String, text: String },
}

impl ClientMessage {
    pub fn task_id(&self) -> &str {
        match self {
            ClientMessage::DrawStroke { task_id, .. }
            | ClientMessage::ActionComplete { task_id }
            | ClientMessage::SubmitTextResponse { task_id, .. } => task_id,
        }
    }

    /// Convert into the engine's event type
    pub fn into_event(self) -> InteractionEvent {
        match self {
            ClientMessage::DrawStroke { stroke_data, .. } => InteractionEvent::StrokeCompleted {
                points: stroke_data,
            },
            ClientMessage::ActionComplete { .. } => InteractionEvent::ActionComplete,
            ClientMessage::SubmitTextResponse { text, .. } => InteractionEvent::TextResponse { text },
        }
    }
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Opening prompt of the task
    TaskPrompt {
        task_id: String,
        text: String,
        speak: bool,
    },

    /// Follow-up question
    AskProbe { text: String, speak: bool },

    /// Final verdict
    AssessmentComplete {
        task_id: String,
        result_summary: String,
        /// Assigned level, absent when indeterminate
        level: Option<String>,
    },

    /// Error message
    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }

    pub fn ask_probe(probe: &ProbeDefinition) -> Self {
        ServerMessage::AskProbe {
            text: probe.text.clone(),
            speak: probe.speak,
        }
    }

    pub fn assessment_complete(result: &AssessmentResult) -> Self {
        ServerMessage::AssessmentComplete {
            task_id: result.task_id.clone(),
            result_summary: result.summary(),
            level: result.outcome.label().map(str::to_string),
        }
    }
}

/// Parse one inbound text frame
pub fn parse_client_message(text: &str) -> Result<ClientMessage, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ProtocolError::InvalidJson(e.to_string()))?;

    let msg_type = value
        .get("type")
        .and_then(|t| t.as_str())
        .ok_or(ProtocolError::MissingType)?;

    if !CLIENT_MESSAGE_TYPES.contains(&msg_type) {
        return Err(ProtocolError::UnknownType(msg_type.to_string()));
    }
    let msg_type = msg_type.to_string();

    serde_json::from_value(value).map_err(|e| ProtocolError::InvalidMessage {
        msg_type,
        reason: e.to_string(),
    })
}
