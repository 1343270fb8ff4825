//! TaskRegistry holds every loaded task definition
//!
//! The registry is built once at startup and never mutated afterwards, so it
//! can be shared across connections without locking.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use super::definition::TaskDefinition;
use super::loader::{RuleFormat, load_task_file};
use crate::error::ConfigurationError;

/// Read-only lookup of task definitions by task id
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    tasks: BTreeMap<String, Arc<TaskDefinition>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every rule file in `dir`.
    ///
    /// Files without a recognised extension are skipped. Any invalid rule
    /// file or duplicated task id fails the whole load.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigurationError> {
        let entries = std::fs::read_dir(dir).map_err(|source| ConfigurationError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ConfigurationError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && RuleFormat::from_path(&path).is_some() {
                paths.push(path);
            }
        }
        paths.sort();

        let mut registry = Self::new();
        for path in paths {
            registry.insert(load_task_file(&path)?)?;
        }

        info!(
            "Loaded {} task definition(s) from {}",
            registry.len(),
            dir.display()
        );
        Ok(registry)
    }

    /// Register a validated definition, rejecting duplicate task ids
    pub fn insert(&mut self, task: TaskDefinition) -> Result<(), ConfigurationError> {
        let id = task.task_id().to_string();
        if self.tasks.contains_key(&id) {
            return Err(ConfigurationError::DuplicateTask(id));
        }
        self.tasks.insert(id, Arc::new(task));
        Ok(())
    }

    pub fn get(&self, task_id: &str) -> Option<Arc<TaskDefinition>> {
        self.tasks.get(task_id).cloned()
    }

    /// Task ids in sorted order
    pub fn task_ids(&self) -> impl Iterator<Item = &str> {
        self.tasks.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<TaskDefinition>> {
        self.tasks.values()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::definition::fixtures::six_by_eight;

    fn write_rule(dir: &Path, name: &str, task_id: &str) {
        let contents = format!(
            "task_id: \"{task_id}\"\n\
             initial_prompt:\n  text: \"Solve {task_id}\"\n\
             stop_conditions:\n  - id: SC1\n    required_evidence: [ANSWER_TYPED]\n"
        );
        std::fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn load_dir_collects_all_rule_files() {
        let dir = tempfile::tempdir().unwrap();
        write_rule(dir.path(), "6x8.yaml", "6x8");
        write_rule(dir.path(), "7x3.yml", "7x3");
        std::fs::write(dir.path().join("README.md"), "not a rule file").unwrap();

        let registry = TaskRegistry::load_dir(dir.path()).unwrap();
        assert_eq!(registry.task_ids().collect::<Vec<_>>(), vec!["6x8", "7x3"]);
    }

    #[test]
    fn load_dir_fails_on_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        write_rule(dir.path(), "6x8.yaml", "6x8");
        std::fs::write(
            dir.path().join("bad.yaml"),
            "task_id: bad\ninitial_prompt:\n  text: x\nstop_conditions:\n  - id: SC1\n    required_evidence: [WAVED]\n",
        )
        .unwrap();

        assert!(matches!(
            TaskRegistry::load_dir(dir.path()),
            Err(ConfigurationError::UnknownEvidence { .. })
        ));
    }

    #[test]
    fn load_dir_rejects_duplicate_task_ids() {
        let dir = tempfile::tempdir().unwrap();
        write_rule(dir.path(), "a.yaml", "6x8");
        write_rule(dir.path(), "b.yaml", "6x8");

        assert!(matches!(
            TaskRegistry::load_dir(dir.path()),
            Err(ConfigurationError::DuplicateTask(ref id)) if id == "6x8"
        ));
    }

    #[test]
    fn get_shares_the_same_definition() {
        let mut registry = TaskRegistry::new();
        registry.insert(six_by_eight()).unwrap();

        let a = registry.get("6x8").unwrap();
        let b = registry.get("6x8").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(registry.get("9x9").is_none());
    }
}
