//! numeracy-core: rule-driven assessment engine
//!
//! This crate holds all decision logic for a numeracy diagnostic session:
//!
//! - **Evidence vocabulary** - [`EvidenceCode`], the closed set of observable behaviours
//! - **Task definitions** - [`TaskDefinition`] loaded and validated from rule files,
//!   shared read-only through a [`TaskRegistry`]
//! - **Evidence ledger** - [`EvidenceLedger`], append-only evidence with provenance
//! - **Rule evaluation** - [`should_stop`] and [`assign_level`], first-match subset tests
//! - **Probe selection** - [`next_probe`]
//! - **Sessions** - [`AssessmentSession`], the per-connection state machine
//!
//! # Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use numeracy_core::{AssessmentSession, InteractionEvent, Reaction, TaskRegistry};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = TaskRegistry::load_dir(Path::new("rules"))?;
//!     let task = registry.get("6x8").ok_or("task not loaded")?;
//!
//!     let mut session = AssessmentSession::new(task);
//!     println!("{}", session.start().text);
//!
//!     let reaction = session.process_event(InteractionEvent::TextResponse {
//!         text: "I count by sixes".to_string(),
//!     })?;
//!     if let Reaction::Complete(result) = reaction {
//!         println!("{}", result.summary());
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod event;
pub mod evidence;
pub mod extraction;
pub mod ledger;
pub mod probe;
pub mod rules;
pub mod session;
pub mod task;

pub use error::{ConfigurationError, EngineError, ExtractionError, ProtocolError};
pub use event::{EventId, InteractionEvent};
pub use evidence::{EvidenceCode, UnknownEvidenceCode};
pub use extraction::{EvidenceExtractor, HeuristicExtractor, extract_from_text};
pub use ledger::{EvidenceLedger, LedgerEntry};
pub use probe::{next_probe, select_probe};
pub use rules::{LevelOutcome, assign_level, is_satisfied, should_stop};
pub use session::{AssessmentResult, AssessmentSession, Reaction, SessionStatus};
pub use task::{
    LevelRule, ProbeDefinition, Prompt, RawTaskDefinition, Rule, RuleFormat, RuleId,
    TaskDefinition, TaskRegistry, load_task_file, parse_task,
};
