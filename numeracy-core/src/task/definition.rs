//! Task definitions
//!
//! A [`RawTaskDefinition`] mirrors a rule file field for field. Converting it
//! into a [`TaskDefinition`] validates every evidence reference against the
//! vocabulary; the validated value is immutable and meant to be shared behind
//! an `Arc` by every session of the task.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::evidence::EvidenceCode;

/// Identifier of a stop rule
pub type RuleId = String;

/// Text shown (and optionally spoken) to the student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Prompt {
    pub text: String,
    #[serde(default)]
    pub speak: bool,
}

/// A follow-up question the engine may ask during a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeDefinition {
    pub id: String,
    pub text: String,
    pub speak: bool,
    /// Evidence that must be present before the probe becomes eligible.
    /// Empty means eligible as soon as it is reached.
    pub trigger_required_evidence: BTreeSet<EvidenceCode>,
}

/// A stop condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub id: RuleId,
    pub required_evidence: BTreeSet<EvidenceCode>,
}

/// Maps an evidence combination to a proficiency label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelRule {
    pub level_label: String,
    pub required_evidence: BTreeSet<EvidenceCode>,
}

/// Validated, read-only configuration for one assessable task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    task_id: String,
    description: Option<String>,
    initial_prompt: Prompt,
    probes: Vec<ProbeDefinition>,
    stop_conditions: Vec<Rule>,
    level_assignments: Vec<LevelRule>,
}

impl TaskDefinition {
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn initial_prompt(&self) -> &Prompt {
        &self.initial_prompt
    }

    /// Probes in authoring order
    pub fn probes(&self) -> &[ProbeDefinition] {
        &self.probes
    }

    /// Stop conditions in authoring order
    pub fn stop_conditions(&self) -> &[Rule] {
        &self.stop_conditions
    }

    /// Level rules in authoring order
    pub fn level_assignments(&self) -> &[LevelRule] {
        &self.level_assignments
    }
}

/// Rule file layout, before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawTaskDefinition {
    #[serde(default)]
    pub task_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub initial_prompt: Option<Prompt>,
    #[serde(default)]
    pub probes: Vec<RawProbe>,
    #[serde(default)]
    pub stop_conditions: Vec<RawRule>,
    #[serde(default, alias = "level_assignments")]
    pub level_assignment: Vec<RawLevelRule>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawProbe {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub speak: bool,
    #[serde(default)]
    pub trigger_required_evidence: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawRule {
    pub id: String,
    #[serde(default)]
    pub required_evidence: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLevelRule {
    pub level: String,
    #[serde(default)]
    pub required_evidence: Vec<String>,
}

impl TryFrom<RawTaskDefinition> for TaskDefinition {
    type Error = ConfigurationError;

    fn try_from(raw: RawTaskDefinition) -> Result<Self, Self::Error> {
        let task_id = raw.task_id.trim().to_string();
        if task_id.is_empty() {
            return Err(ConfigurationError::MissingField {
                task_id: "<unnamed>".to_string(),
                field: "task_id".to_string(),
            });
        }

        let initial_prompt = raw
            .initial_prompt
            .filter(|p| !p.text.trim().is_empty())
            .ok_or_else(|| ConfigurationError::MissingField {
                task_id: task_id.clone(),
                field: "initial_prompt".to_string(),
            })?;

        let mut probe_ids = HashSet::new();
        let mut probes = Vec::with_capacity(raw.probes.len());
        for probe in raw.probes {
            if !probe_ids.insert(probe.id.clone()) {
                return Err(ConfigurationError::DuplicateId {
                    task_id,
                    kind: "probe",
                    id: probe.id,
                });
            }
            let location = format!("probe {}", probe.id);
            let trigger =
                parse_evidence(&task_id, &location, &probe.trigger_required_evidence)?;
            probes.push(ProbeDefinition {
                id: probe.id,
                text: probe.text,
                speak: probe.speak,
                trigger_required_evidence: trigger,
            });
        }

        let mut rule_ids = HashSet::new();
        let mut stop_conditions = Vec::with_capacity(raw.stop_conditions.len());
        for rule in raw.stop_conditions {
            if !rule_ids.insert(rule.id.clone()) {
                return Err(ConfigurationError::DuplicateId {
                    task_id,
                    kind: "stop condition",
                    id: rule.id,
                });
            }
            let location = format!("stop condition {}", rule.id);
            let required = parse_requirement(&task_id, &location, &rule.required_evidence)?;
            stop_conditions.push(Rule {
                id: rule.id,
                required_evidence: required,
            });
        }

        let mut level_assignments = Vec::with_capacity(raw.level_assignment.len());
        for rule in raw.level_assignment {
            let location = format!("level rule {}", rule.level);
            let required = parse_requirement(&task_id, &location, &rule.required_evidence)?;
            level_assignments.push(LevelRule {
                level_label: rule.level,
                required_evidence: required,
            });
        }

        Ok(Self {
            task_id,
            description: raw.description,
            initial_prompt,
            probes,
            stop_conditions,
            level_assignments,
        })
    }
}

fn parse_evidence(
    task_id: &str,
    location: &str,
    names: &[String],
) -> Result<BTreeSet<EvidenceCode>, ConfigurationError> {
    names
        .iter()
        .map(|name| {
            name.parse::<EvidenceCode>()
                .map_err(|_| ConfigurationError::UnknownEvidence {
                    task_id: task_id.to_string(),
                    location: location.to_string(),
                    code: name.clone(),
                })
        })
        .collect()
}

fn parse_requirement(
    task_id: &str,
    location: &str,
    names: &[String],
) -> Result<BTreeSet<EvidenceCode>, ConfigurationError> {
    let required = parse_evidence(task_id, location, names)?;
    if required.is_empty() {
        return Err(ConfigurationError::EmptyRequirement {
            task_id: task_id.to_string(),
            location: location.to_string(),
        });
    }
    Ok(required)
}
