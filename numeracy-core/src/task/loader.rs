//! Rule file parsing

use std::path::Path;

use tracing::debug;

use super::definition::{RawTaskDefinition, TaskDefinition};
use crate::error::ConfigurationError;

/// Rule file encodings understood by the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleFormat {
    Yaml,
    Json,
}

impl RuleFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("json") => Some(Self::Json),
            _ => None,
        }
    }
}

/// Parse and validate a rule document held in memory.
///
/// `origin` is only used to label errors.
pub fn parse_task(
    contents: &str,
    format: RuleFormat,
    origin: &Path,
) -> Result<TaskDefinition, ConfigurationError> {
    let raw: RawTaskDefinition = match format {
        RuleFormat::Yaml => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
        RuleFormat::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
    }
    .map_err(|message| ConfigurationError::Parse {
        path: origin.to_path_buf(),
        message,
    })?;

    TaskDefinition::try_from(raw)
}

/// Read, parse and validate a single rule file
pub fn load_task_file(path: &Path) -> Result<TaskDefinition, ConfigurationError> {
    let format = RuleFormat::from_path(path)
        .ok_or_else(|| ConfigurationError::UnsupportedFormat(path.to_path_buf()))?;

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let task = parse_task(&contents, format, path)?;
    debug!("Loaded rules for task {} from {}", task.task_id(), path.display());
    Ok(task)
}
