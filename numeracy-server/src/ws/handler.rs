//! Per-connection session handling
//!
//! A [`SessionHandler`] owns the assessment session of one WebSocket
//! connection. Frames are handled strictly one at a time; the handler turns
//! each into zero or more outbound messages. Nothing here touches the socket.

use std::sync::Arc;

use numeracy_core::{AssessmentSession, EngineError, ProtocolError, Reaction, SessionStatus};
use tracing::{debug, info, warn};

use super::protocol::{ServerMessage, parse_client_message};
use crate::AppState;

const INVALID_JSON_MESSAGE: &str = "Invalid data format. Please send JSON.";
const INVALID_MESSAGE: &str = "Invalid message.";
const UNKNOWN_TASK_MESSAGE: &str = "Task is not available.";
const EVENT_FAILED_MESSAGE: &str = "Could not process event.";
const COMPLETE_MESSAGE: &str = "Assessment already complete.";

/// Session state bound to a single connection
pub struct SessionHandler {
    state: Arc<AppState>,
    session: Option<AssessmentSession>,
}

impl SessionHandler {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            session: None,
        }
    }

    /// The bound session, if any
    pub fn session(&self) -> Option<&AssessmentSession> {
        self.session.as_ref()
    }

    /// Bind the connection to `task_id` up front and return the opening prompt
    pub fn open(&mut self, task_id: &str) -> Vec<ServerMessage> {
        match self.bind(task_id) {
            Ok(session) => {
                let prompt = session.start();
                vec![ServerMessage::TaskPrompt {
                    task_id: task_id.to_string(),
                    text: prompt.text.clone(),
                    speak: prompt.speak,
                }]
            }
            Err(e) => {
                warn!("Cannot open session: {}", e);
                vec![ServerMessage::error(UNKNOWN_TASK_MESSAGE)]
            }
        }
    }

    /// Handle one inbound text frame
    pub async fn handle_text(&mut self, text: &str) -> Vec<ServerMessage> {
        let msg = match parse_client_message(text) {
            Ok(msg) => msg,
            Err(e) => {
                warn!("Rejected inbound message: {}", e);
                let message = match e {
                    ProtocolError::InvalidJson(_) => INVALID_JSON_MESSAGE,
                    _ => INVALID_MESSAGE,
                };
                return vec![ServerMessage::error(message)];
            }
        };
        debug!("Received {:?}", msg);

        if self.session.is_none()
            && let Err(e) = self.bind(msg.task_id())
        {
            warn!("Cannot create session: {}", e);
            return vec![ServerMessage::error(UNKNOWN_TASK_MESSAGE)];
        }
        let Some(session) = self.session.as_mut() else {
            return vec![ServerMessage::error(INVALID_MESSAGE)];
        };

        if let Err(e) = session.check_task(msg.task_id()) {
            warn!("Session {}: {}", session.id(), e);
            return vec![ServerMessage::error(INVALID_MESSAGE)];
        }

        let failures_before = session.extraction_failures();
        let mut messages = match session.process_event(msg.into_event()) {
            Ok(Reaction::AskProbe(probe)) => vec![ServerMessage::ask_probe(&probe)],
            Ok(Reaction::Complete(result)) => {
                let message = ServerMessage::assessment_complete(&result);
                self.state.record_outcome(result).await;
                vec![message]
            }
            Ok(Reaction::Idle) => Vec::new(),
            Err(EngineError::SessionClosed) => vec![ServerMessage::error(COMPLETE_MESSAGE)],
            Err(e) => {
                warn!("Session {}: event not processed: {}", session.id(), e);
                vec![ServerMessage::error(INVALID_MESSAGE)]
            }
        };

        // Unclassifiable input yields no evidence but is still reported
        if session.extraction_failures() > failures_before {
            messages.insert(0, ServerMessage::error(EVENT_FAILED_MESSAGE));
        }
        messages
    }

    fn bind(&mut self, task_id: &str) -> Result<&AssessmentSession, ProtocolError> {
        let task = self
            .state
            .tasks
            .get(task_id)
            .ok_or_else(|| ProtocolError::UnknownTask(task_id.to_string()))?;

        let session = AssessmentSession::new(task);
        let active = self.state.session_opened();
        info!(
            "Created session {} for task '{}'. Active sessions: {}",
            session.id(),
            task_id,
            active
        );
        let session = self.session.insert(session);
        Ok(&*session)
    }
}

impl Drop for SessionHandler {
    fn drop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        let active = self.state.session_closed();
        if session.status() == SessionStatus::Complete {
            info!(
                "Session {} closed after completion. Active sessions: {}",
                session.id(),
                active
            );
        } else {
            info!(
                "Session {} abandoned before completion ({} evidence code(s) discarded). Active sessions: {}",
                session.id(),
                session.ledger().len(),
                active
            );
        }
    }
}
