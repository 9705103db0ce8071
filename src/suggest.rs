//! Fuzzy suggestions for unknown keys and enumerated values.

use similar::TextDiff;
use tracing::debug;

use crate::{
    error::{Error, Result},
    schema::FieldSet,
};

/// Minimum similarity a candidate needs before it is offered as a fix.
pub const DEFAULT_THRESHOLD: f32 = 0.70;

/// Character-sequence similarity of two tokens in `[0.0, 1.0]`.
///
/// This is twice the number of matching characters divided by the combined
/// length, so identical tokens score `1.0` and disjoint tokens `0.0`.
pub fn similarity(a: &str, b: &str) -> f32 {
    TextDiff::from_chars(a, b).ratio()
}

/// Proposes the closest legal token for an unknown one.
#[derive(Debug, Clone, Copy)]
pub struct Suggester {
    /// Minimum accepted similarity.
    threshold: f32,
}

impl Suggester {
    /// Create a suggester, rejecting thresholds outside `(0.0, 1.0]`.
    pub fn new(threshold: f32) -> Result<Self> {
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(Error::InvalidThreshold { value: threshold });
        }
        Ok(Self { threshold })
    }

    /// Return the best candidate scoring at least the threshold.
    ///
    /// Ties go to the candidate declared first. A token that is itself a
    /// candidate is returned unchanged; callers check membership first.
    pub fn suggest(&self, token: &str, candidates: FieldSet) -> Option<&'static str> {
        let mut best: Option<(&'static str, f32)> = None;
        for candidate in candidates.iter() {
            let score = similarity(token, candidate);
            if score < self.threshold {
                continue;
            }
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        debug!(token, ?best, threshold = self.threshold, "fuzzy lookup");
        best.map(|(candidate, _)| candidate)
    }
}

impl Default for Suggester {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
