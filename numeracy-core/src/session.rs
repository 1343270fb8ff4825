//! Assessment session state machine
//!
//! An [`AssessmentSession`] is one student's attempt at one task. It is owned
//! by a single connection and fed events one at a time:
//!
//! ```text
//! ACTIVE ──stop rule──▶ STOPPED ──level rules──▶ COMPLETE
//!    └─────────────────finalize()─────────────────▲
//! ```
//!
//! Each event is classified into evidence, recorded in the ledger, then the
//! stop rules are checked. A stopped session is immediately leveled and
//! completed; an active one may be sent the next eligible probe.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, ProtocolError};
use crate::event::{EventId, InteractionEvent};
use crate::evidence::EvidenceCode;
use crate::extraction::{EvidenceExtractor, HeuristicExtractor};
use crate::ledger::EvidenceLedger;
use crate::probe::next_probe;
use crate::rules::{LevelOutcome, assign_level, should_stop};
use crate::task::{ProbeDefinition, Prompt, TaskDefinition};

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    /// Probing; evidence is still being collected
    Active,
    /// Probing has ended, the level has not been assigned yet
    Stopped,
    /// Terminal: the level outcome is fixed
    Complete,
}

/// Verdict of a completed session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentResult {
    pub session_id: String,
    pub task_id: String,
    pub outcome: LevelOutcome,
    /// Stop rule that ended probing, if one fired
    pub stop_rule: Option<String>,
    pub evidence: Vec<EvidenceCode>,
    pub probes_asked: Vec<String>,
    pub completed_at: DateTime<Utc>,
}

impl AssessmentResult {
    /// One-line human readable summary
    pub fn summary(&self) -> String {
        format!("Task complete. Level: {}", self.outcome)
    }
}

/// What the session wants sent back after an event
#[derive(Debug, Clone, PartialEq)]
pub enum Reaction {
    /// Ask the student a follow-up question
    AskProbe(ProbeDefinition),
    /// The assessment finished
    Complete(AssessmentResult),
    /// Nothing to send; wait for more events
    Idle,
}

/// One assessment attempt for one student on one task
pub struct AssessmentSession {
    id: String,
    task: Arc<TaskDefinition>,
    ledger: EvidenceLedger,
    probes_asked: Vec<String>,
    status: SessionStatus,
    outcome: Option<LevelOutcome>,
    stop_rule: Option<String>,
    completed_at: Option<DateTime<Utc>>,
    extractor: Box<dyn EvidenceExtractor>,
    extraction_failures: usize,
    started_at: DateTime<Utc>,
}

impl AssessmentSession {
    /// Create a session using the default [`HeuristicExtractor`]
    pub fn new(task: Arc<TaskDefinition>) -> Self {
        Self::with_extractor(task, Box::new(HeuristicExtractor::new()))
    }

    /// Create a session with a custom evidence extractor
    pub fn with_extractor(task: Arc<TaskDefinition>, extractor: Box<dyn EvidenceExtractor>) -> Self {
        let id = Uuid::new_v4().to_string();
        info!("Initializing assessment session {} for task {}", id, task.task_id());
        Self {
            id,
            task,
            ledger: EvidenceLedger::new(),
            probes_asked: Vec::new(),
            status: SessionStatus::Active,
            outcome: None,
            stop_rule: None,
            completed_at: None,
            extractor,
            extraction_failures: 0,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn task(&self) -> &Arc<TaskDefinition> {
        &self.task
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Level outcome; only present once the session is complete
    pub fn outcome(&self) -> Option<&LevelOutcome> {
        self.outcome.as_ref()
    }

    pub fn ledger(&self) -> &EvidenceLedger {
        &self.ledger
    }

    /// Probe ids in the order they were asked
    pub fn probes_asked(&self) -> &[String] {
        &self.probes_asked
    }

    pub fn has_asked(&self, probe_id: &str) -> bool {
        self.probes_asked.iter().any(|id| id == probe_id)
    }

    /// Events whose raw data could not be classified
    pub fn extraction_failures(&self) -> usize {
        self.extraction_failures
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Prompt to present when the session opens
    pub fn start(&self) -> &Prompt {
        self.task.initial_prompt()
    }

    /// Reject messages addressed to a different task
    pub fn check_task(&self, task_id: &str) -> Result<(), ProtocolError> {
        if task_id == self.task.task_id() {
            Ok(())
        } else {
            Err(ProtocolError::TaskMismatch {
                expected: self.task.task_id().to_string(),
                actual: task_id.to_string(),
            })
        }
    }

    /// Handle one interaction event.
    ///
    /// An event that cannot be classified yields no evidence: it is logged,
    /// counted in [`extraction_failures`](Self::extraction_failures), and the
    /// stop and probe steps still run.
    pub fn process_event(&mut self, event: InteractionEvent) -> Result<Reaction, EngineError> {
        if self.status == SessionStatus::Complete {
            warn!(
                "Session {}: {} received after assessment complete",
                self.id,
                event.kind()
            );
            return Err(EngineError::SessionClosed);
        }

        let event_id = EventId::new();
        debug!("Session {}: processing {} ({})", self.id, event.kind(), event_id);

        let codes = match self.extractor.extract(&event) {
            Ok(codes) => codes,
            Err(e) => {
                warn!("Session {}: could not classify {}: {}", self.id, event.kind(), e);
                self.extraction_failures += 1;
                Vec::new()
            }
        };

        for code in codes {
            if self.ledger.record(code, event_id) {
                info!("Session {}: evidence {} recorded", self.id, code);
            }
        }

        if self.status == SessionStatus::Active
            && let Some(rule_id) = should_stop(&self.ledger, self.task.stop_conditions())
        {
            info!("Session {}: stop condition {} met", self.id, rule_id);
            self.stop_rule = Some(rule_id.clone());
            self.status = SessionStatus::Stopped;
        }

        if self.status == SessionStatus::Stopped {
            return Ok(Reaction::Complete(self.complete()));
        }

        let task = Arc::clone(&self.task);
        match next_probe(&task, self) {
            Some(probe) => {
                info!("Session {}: asking probe {}", self.id, probe.id);
                self.probes_asked.push(probe.id.clone());
                Ok(Reaction::AskProbe(probe.clone()))
            }
            None => Ok(Reaction::Idle),
        }
    }

    /// Stop probing without assigning a level yet.
    ///
    /// Returns `false` if the session was not active.
    pub fn force_stop(&mut self) -> bool {
        if self.status != SessionStatus::Active {
            return false;
        }
        info!("Session {}: probing stopped externally", self.id);
        self.status = SessionStatus::Stopped;
        true
    }

    /// Assign the level supported by the evidence so far and complete.
    pub fn finalize(&mut self) -> Result<AssessmentResult, EngineError> {
        if self.status == SessionStatus::Complete {
            return Err(EngineError::SessionClosed);
        }
        Ok(self.complete())
    }

    /// Result of a completed session
    pub fn result(&self) -> Option<AssessmentResult> {
        let outcome = self.outcome.clone()?;
        let completed_at = self.completed_at.unwrap_or(self.started_at);
        Some(self.build_result(outcome, completed_at))
    }

    fn complete(&mut self) -> AssessmentResult {
        let outcome = assign_level(&self.ledger, self.task.level_assignments());
        info!(
            "Assessment complete for task {} (session {}). Level assigned: {}",
            self.task.task_id(),
            self.id,
            outcome
        );
        let completed_at = Utc::now();
        self.outcome = Some(outcome.clone());
        self.completed_at = Some(completed_at);
        self.status = SessionStatus::Complete;

        self.build_result(outcome, completed_at)
    }

    fn build_result(&self, outcome: LevelOutcome, completed_at: DateTime<Utc>) -> AssessmentResult {
        AssessmentResult {
            session_id: self.id.clone(),
            task_id: self.task.task_id().to_string(),
            outcome,
            stop_rule: self.stop_rule.clone(),
            evidence: self.ledger.evidence().to_vec(),
            probes_asked: self.probes_asked.clone(),
            completed_at,
        }
    }
}
