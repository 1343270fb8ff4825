//! Rule evaluation
//!
//! Every rule is a required subset of evidence codes. Evaluation is pure and
//! first-match: when several rules are satisfied the one authored first wins.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceCode;
use crate::ledger::EvidenceLedger;
use crate::task::{LevelRule, Rule, RuleId};

/// Final proficiency verdict of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum LevelOutcome {
    /// A level rule matched
    Assigned(String),
    /// No level rule matched the collected evidence
    Indeterminate,
}

impl LevelOutcome {
    pub fn label(&self) -> Option<&str> {
        match self {
            LevelOutcome::Assigned(label) => Some(label),
            LevelOutcome::Indeterminate => None,
        }
    }

    pub fn is_indeterminate(&self) -> bool {
        matches!(self, LevelOutcome::Indeterminate)
    }
}

impl fmt::Display for LevelOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelOutcome::Assigned(label) => f.write_str(label),
            LevelOutcome::Indeterminate => f.write_str("Indeterminate"),
        }
    }
}

/// Whether the ledger holds every code in `required`
pub fn is_satisfied(ledger: &EvidenceLedger, required: &BTreeSet<EvidenceCode>) -> bool {
    ledger.contains_all(required)
}

/// Id of the first stop rule satisfied by the ledger
pub fn should_stop<'a>(
    ledger: &EvidenceLedger,
    stop_conditions: &'a [Rule],
) -> Option<&'a RuleId> {
    stop_conditions
        .iter()
        .find(|rule| is_satisfied(ledger, &rule.required_evidence))
        .map(|rule| &rule.id)
}

/// Level of the first level rule satisfied by the ledger
pub fn assign_level(ledger: &EvidenceLedger, level_assignments: &[LevelRule]) -> LevelOutcome {
    level_assignments
        .iter()
        .find(|rule| is_satisfied(ledger, &rule.required_evidence))
        .map(|rule| LevelOutcome::Assigned(rule.level_label.clone()))
        .unwrap_or(LevelOutcome::Indeterminate)
}
