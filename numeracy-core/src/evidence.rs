//! Evidence vocabulary
//!
//! The closed set of symbolic codes an extractor may emit for a student
//! action. Rule files reference these codes by name; any name outside the
//! vocabulary is rejected when the task is loaded.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A recognised student behaviour relevant to assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvidenceCode {
    /// Any drawing action finished with at least one stroke
    DrawAny,
    /// Any non-empty text answer was submitted
    AnswerTyped,
    /// Exactly one stroke was drawn in an action phase
    #[serde(alias = "DREW_ONE_STROKE")]
    DrawOneStroke,
    /// More than one stroke was drawn in an action phase
    #[serde(alias = "DREW_MULTIPLE_STROKES")]
    DrawMultipleStrokes,
    /// The text answer mentioned counting
    #[serde(alias = "SAID_COUNT")]
    EvidenceSaidCount,
}

impl EvidenceCode {
    /// Every code in the vocabulary, in declaration order.
    pub const ALL: [EvidenceCode; 5] = [
        EvidenceCode::DrawAny,
        EvidenceCode::AnswerTyped,
        EvidenceCode::DrawOneStroke,
        EvidenceCode::DrawMultipleStrokes,
        EvidenceCode::EvidenceSaidCount,
    ];

    /// Canonical identifier as written in rule files.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceCode::DrawAny => "DRAW_ANY",
            EvidenceCode::AnswerTyped => "ANSWER_TYPED",
            EvidenceCode::DrawOneStroke => "DRAW_ONE_STROKE",
            EvidenceCode::DrawMultipleStrokes => "DRAW_MULTIPLE_STROKES",
            EvidenceCode::EvidenceSaidCount => "EVIDENCE_SAID_COUNT",
        }
    }
}

impl fmt::Display for EvidenceCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name is not part of the vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown evidence code: {0}")]
pub struct UnknownEvidenceCode(pub String);

impl FromStr for EvidenceCode {
    type Err = UnknownEvidenceCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAW_ANY" => Ok(EvidenceCode::DrawAny),
            "ANSWER_TYPED" => Ok(EvidenceCode::AnswerTyped),
            "DRAW_ONE_STROKE" | "DREW_ONE_STROKE" => Ok(EvidenceCode::DrawOneStroke),
            "DRAW_MULTIPLE_STROKES" | "DREW_MULTIPLE_STROKES" => {
                Ok(EvidenceCode::DrawMultipleStrokes)
            }
            "EVIDENCE_SAID_COUNT" | "SAID_COUNT" => Ok(EvidenceCode::EvidenceSaidCount),
            other => Err(UnknownEvidenceCode(other.to_string())),
        }
    }
}
