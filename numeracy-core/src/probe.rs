//! Probe selection

use crate::ledger::EvidenceLedger;
use crate::rules::is_satisfied;
use crate::session::AssessmentSession;
use crate::task::{ProbeDefinition, TaskDefinition};

/// Next probe to ask in `session`, if any is eligible.
pub fn next_probe<'a>(
    task: &'a TaskDefinition,
    session: &AssessmentSession,
) -> Option<&'a ProbeDefinition> {
    select_probe(task, session.ledger(), session.probes_asked())
}

/// First probe in authoring order that has not been asked and whose trigger
/// evidence is present in the ledger.
pub fn select_probe<'a>(
    task: &'a TaskDefinition,
    ledger: &EvidenceLedger,
    asked: &[String],
) -> Option<&'a ProbeDefinition> {
    task.probes().iter().find(|probe| {
        !asked.contains(&probe.id) && is_satisfied(ledger, &probe.trigger_required_evidence)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventId;
    use crate::evidence::EvidenceCode;
    use crate::task::{Prompt, RawProbe, RawRule, RawTaskDefinition};

    fn task_with_probes(probes: Vec<(&str, Vec<&str>)>) -> TaskDefinition {
        let raw = RawTaskDefinition {
            task_id: "probe-test".to_string(),
            initial_prompt: Some(Prompt {
                text: "Go".to_string(),
                speak: false,
            }),
            probes: probes
                .into_iter()
                .map(|(id, trigger)| RawProbe {
                    id: id.to_string(),
                    text: format!("{id}?"),
                    speak: false,
                    trigger_required_evidence: trigger.into_iter().map(String::from).collect(),
                })
                .collect(),
            stop_conditions: vec![RawRule {
                id: "SC1".to_string(),
                required_evidence: vec!["EVIDENCE_SAID_COUNT".to_string()],
            }],
            ..Default::default()
        };
        TaskDefinition::try_from(raw).unwrap()
    }

    #[test]
    fn untriggered_probe_is_eligible_immediately() {
        let task = task_with_probes(vec![("P1", vec![])]);
        let ledger = EvidenceLedger::new();
        assert_eq!(select_probe(&task, &ledger, &[]).map(|p| p.id.as_str()), Some("P1"));
    }

    #[test]
    fn triggered_probe_waits_for_evidence() {
        let task = task_with_probes(vec![("P1", vec!["DRAW_ANY"])]);
        let mut ledger = EvidenceLedger::new();
        assert!(select_probe(&task, &ledger, &[]).is_none());

        ledger.record(EvidenceCode::DrawAny, EventId::new());
        assert_eq!(select_probe(&task, &ledger, &[]).map(|p| p.id.as_str()), Some("P1"));
    }

    #[test]
    fn asked_probes_are_skipped() {
        let task = task_with_probes(vec![("P1", vec![]), ("P2", vec![])]);
        let ledger = EvidenceLedger::new();
        let asked = vec!["P1".to_string()];
        assert_eq!(
            select_probe(&task, &ledger, &asked).map(|p| p.id.as_str()),
            Some("P2")
        );

        let asked = vec!["P1".to_string(), "P2".to_string()];
        assert!(select_probe(&task, &ledger, &asked).is_none());
    }

    #[test]
    fn authoring_order_breaks_ties() {
        let task = task_with_probes(vec![("P_TYPED", vec!["ANSWER_TYPED"]), ("P_ANY", vec![])]);
        let mut ledger = EvidenceLedger::new();
        ledger.record(EvidenceCode::AnswerTyped, EventId::new());
        assert_eq!(
            select_probe(&task, &ledger, &[]).map(|p| p.id.as_str()),
            Some("P_TYPED")
        );
    }

    #[test]
    fn ineligible_earlier_probe_does_not_block_later_ones() {
        let task = task_with_probes(vec![("P_DRAW", vec!["DRAW_ANY"]), ("P_ANY", vec![])]);
        let ledger = EvidenceLedger::new();
        assert_eq!(
            select_probe(&task, &ledger, &[]).map(|p| p.id.as_str()),
            Some("P_ANY")
        );
    }

    #[test]
    fn next_probe_reads_session_state() {
        let task = std::sync::Arc::new(task_with_probes(vec![("P1", vec![])]));
        let session = AssessmentSession::new(std::sync::Arc::clone(&task));
        assert_eq!(next_probe(&task, &session).map(|p| p.id.as_str()), Some("P1"));
    }
}
