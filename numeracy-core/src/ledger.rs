//! Evidence ledger
//!
//! Append-only record of the evidence observed in one session. Membership is
//! deduplicated, but every `record` call is kept in the provenance trail so a
//! verdict can be traced back to the events that produced it.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::event::EventId;
use crate::evidence::EvidenceCode;

/// One `record` call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub code: EvidenceCode,
    pub source: EventId,
    pub recorded_at: DateTime<Utc>,
    /// The code was already present when this entry was written
    pub repeat: bool,
}

#[derive(Debug, Clone, Default)]
pub struct EvidenceLedger {
    present: HashSet<EvidenceCode>,
    first_seen: Vec<EvidenceCode>,
    entries: Vec<LedgerEntry>,
}

impl EvidenceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `code` as produced by event `source`.
    ///
    /// Returns `true` if the code is new to the ledger. Re-recording a present
    /// code leaves the evidence set untouched but still appends provenance.
    pub fn record(&mut self, code: EvidenceCode, source: EventId) -> bool {
        let is_new = self.present.insert(code);
        if is_new {
            self.first_seen.push(code);
        }
        self.entries.push(LedgerEntry {
            code,
            source,
            recorded_at: Utc::now(),
            repeat: !is_new,
        });
        is_new
    }

    pub fn contains(&self, code: EvidenceCode) -> bool {
        self.present.contains(&code)
    }

    /// Whether every code in `required` has been observed
    pub fn contains_all<'a, I>(&self, required: I) -> bool
    where
        I: IntoIterator<Item = &'a EvidenceCode>,
    {
        required.into_iter().all(|code| self.present.contains(code))
    }

    /// Distinct codes in the order they were first observed
    pub fn evidence(&self) -> &[EvidenceCode] {
        &self.first_seen
    }

    /// Full provenance trail, including repeats
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    /// Events that produced `code`
    pub fn sources_of(&self, code: EvidenceCode) -> impl Iterator<Item = EventId> + '_ {
        self.entries
            .iter()
            .filter(move |e| e.code == code)
            .map(|e| e.source)
    }

    /// Number of distinct codes
    pub fn len(&self) -> usize {
        self.first_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_seen.is_empty()
    }
}
