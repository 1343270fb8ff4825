//! Evidence extraction
//!
//! Turns raw interaction events into evidence codes. The session only depends
//! on the [`EvidenceExtractor`] trait; [`HeuristicExtractor`] is the default
//! classifier and is intentionally shallow.

use tracing::debug;

use crate::error::ExtractionError;
use crate::event::InteractionEvent;
use crate::evidence::EvidenceCode;

/// Classifies raw interaction events into evidence.
///
/// Extractors may keep state across events (e.g. strokes within one drawing
/// action), so each session owns its own instance.
pub trait EvidenceExtractor: Send {
    fn extract(&mut self, event: &InteractionEvent) -> Result<Vec<EvidenceCode>, ExtractionError>;
}

/// Keywords that map text responses to evidence, matched case-insensitively
const TEXT_KEYWORDS: &[(&str, EvidenceCode)] = &[("count", EvidenceCode::EvidenceSaidCount)];

/// Default extractor: stroke counting plus keyword spotting.
///
/// Any non-empty list of finite numbers counts as one stroke; the layout of
/// the coordinates (pairs, triples with timestamps, a single tap) is up to
/// the front-end.
#[derive(Debug, Default)]
pub struct HeuristicExtractor {
    strokes_in_action: usize,
}

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Strokes seen since the last completed action
    pub fn pending_strokes(&self) -> usize {
        self.strokes_in_action
    }

    fn validate_stroke(points: &[f64]) -> Result<(), ExtractionError> {
        if points.is_empty() {
            return Err(ExtractionError::EmptyStroke);
        }
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ExtractionError::NonFiniteCoordinate { index });
        }
        Ok(())
    }
}

impl EvidenceExtractor for HeuristicExtractor {
    fn extract(&mut self, event: &InteractionEvent) -> Result<Vec<EvidenceCode>, ExtractionError> {
        match event {
            InteractionEvent::StrokeCompleted { points } => {
                Self::validate_stroke(points)?;
                self.strokes_in_action += 1;
                debug!("Stroke {} received", self.strokes_in_action);
                Ok(Vec::new())
            }
            InteractionEvent::ActionComplete => {
                let strokes = std::mem::take(&mut self.strokes_in_action);
                Ok(match strokes {
                    0 => Vec::new(),
                    1 => vec![EvidenceCode::DrawAny, EvidenceCode::DrawOneStroke],
                    _ => vec![EvidenceCode::DrawAny, EvidenceCode::DrawMultipleStrokes],
                })
            }
            InteractionEvent::TextResponse { text } => Ok(extract_from_text(text)),
        }
    }
}

/// Evidence carried by a typed answer
pub fn extract_from_text(text: &str) -> Vec<EvidenceCode> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let lower = text.to_lowercase();
    let mut codes = vec![EvidenceCode::AnswerTyped];
    for (keyword, code) in TEXT_KEYWORDS {
        if lower.contains(keyword) {
            codes.push(*code);
        }
    }
    debug!("Evidence extracted from text: {:?}", codes);
    codes
}
