//! Confidence level for tail-risk measures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// Default confidence level (95%).
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// A confidence level strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Creates a confidence level.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] unless `0 < level < 1`.
    pub fn new(level: f64) -> RiskResult<Self> {
        if level > 0.0 && level < 1.0 {
            Ok(Self(level))
        } else {
            Err(RiskError::invalid_input(format!(
                "confidence level must be in (0, 1), got {level}"
            )))
        }
    }

    /// The level as a fraction, e.g. `0.95`.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Probability mass of the loss tail, `1 - level`.
    ///
    /// Kept strictly below one: levels under `f64::EPSILON / 2` would
    /// otherwise round the tail to exactly `1.0`.
    pub fn tail_probability(self) -> f64 {
        (1.0 - self.0).min(1.0 - f64::EPSILON / 2.0)
    }
}

impl Default for ConfidenceLevel {
    fn default() -> Self {
        Self(DEFAULT_CONFIDENCE)
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = RiskError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConfidenceLevel> for f64 {
    fn from(level: ConfidenceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}
