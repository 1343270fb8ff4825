//! Shared application state for the numeracy server

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use numeracy_core::{AssessmentResult, TaskRegistry};
use tokio::sync::RwLock;

/// Completed results kept in memory for `/api/outcomes`
const MAX_RECORDED_OUTCOMES: usize = 1_000;

/// Shared application state accessible by all handlers.
///
/// Task definitions are read-only after startup. Live sessions are not stored
/// here: each connection owns its own session.
pub struct AppState {
    /// Loaded task definitions
    pub tasks: Arc<TaskRegistry>,
    /// Results of completed sessions, oldest first
    outcomes: RwLock<VecDeque<AssessmentResult>>,
    /// Connections currently bound to a session
    active_sessions: AtomicUsize,
    /// When the server started
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(tasks: TaskRegistry) -> Self {
        Self {
            tasks: Arc::new(tasks),
            outcomes: RwLock::new(VecDeque::new()),
            active_sessions: AtomicUsize::new(0),
            started_at: Utc::now(),
        }
    }

    /// Returns how long the server has been running
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }

    pub fn active_session_count(&self) -> usize {
        self.active_sessions.load(Ordering::SeqCst)
    }

    pub(crate) fn session_opened(&self) -> usize {
        self.active_sessions.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn session_closed(&self) -> usize {
        self.active_sessions.fetch_sub(1, Ordering::SeqCst) - 1
    }

    /// Keep the result of a session that reached completion
    pub async fn record_outcome(&self, result: AssessmentResult) {
        let mut outcomes = self.outcomes.write().await;
        if outcomes.len() == MAX_RECORDED_OUTCOMES {
            outcomes.pop_front();
        }
        outcomes.push_back(result);
    }

    /// Recorded results, oldest first
    pub async fn outcomes(&self) -> Vec<AssessmentResult> {
        self.outcomes.read().await.iter().cloned().collect()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(TaskRegistry::new())
    }
}
