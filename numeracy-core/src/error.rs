//! Error types for numeracy-core

use std::path::PathBuf;

use thiserror::Error;

/// A rule set could not be turned into a usable task definition.
///
/// Always raised at load time, before any session for the task exists.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported rule file extension: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("task {task_id}: missing required field `{field}`")]
    MissingField { task_id: String, field: String },

    #[error("task {task_id}: {location} references unknown evidence code `{code}`")]
    UnknownEvidence {
        task_id: String,
        location: String,
        code: String,
    },

    #[error("task {task_id}: {location} has an empty required_evidence set")]
    EmptyRequirement { task_id: String, location: String },

    #[error("task {task_id}: duplicate {kind} id `{id}`")]
    DuplicateId {
        task_id: String,
        kind: &'static str,
        id: String,
    },

    #[error("task `{0}` is defined more than once")]
    DuplicateTask(String),
}

/// An inbound message was not a well-formed session event.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("message is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("message has no `type` field")]
    MissingType,

    #[error("unknown message type: {0}")]
    UnknownType(String),

    #[error("invalid {msg_type} message: {reason}")]
    InvalidMessage { msg_type: String, reason: String },

    #[error("unknown task: {0}")]
    UnknownTask(String),

    #[error("message for task {actual} sent to session for task {expected}")]
    TaskMismatch { expected: String, actual: String },
}

/// A raw interaction could not be classified into evidence.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractionError {
    #[error("stroke has no coordinates")]
    EmptyStroke,

    #[error("stroke coordinate {index} is not a finite number")]
    NonFiniteCoordinate { index: usize },
}

/// Errors returned by a session while handling an event
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("assessment is already complete")]
    SessionClosed,
}
