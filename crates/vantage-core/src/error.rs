//! Error types for the Vantage library.
//!
//! Every failure of the risk pipeline is one of a small taxonomy:
//! too little data, weights that do not match the asset set, a degenerate
//! CVaR tail, or otherwise invalid input. Errors are surfaced immediately;
//! nothing is retried.

use thiserror::Error;

/// A specialized Result type for risk pipeline operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// The error type for risk pipeline operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Too few observations (or an absent ticker) for the computation.
    #[error("Insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        /// What was being computed or looked up.
        context: String,
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations available.
        actual: usize,
    },

    /// Weight set does not match the asset set, or weights do not sum to one.
    #[error("Weight mismatch: {reason}")]
    WeightMismatch {
        /// Description of the mismatch.
        reason: String,
    },

    /// No return fell at or below the VaR threshold.
    ///
    /// The estimator recovers from this by using the worst observation.
    #[error("Empty CVaR tail at {confidence} confidence")]
    EmptyTail {
        /// Confidence level at which the tail was empty.
        confidence: f64,
    },

    /// Malformed input that fits no other category.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl RiskError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(context: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            actual,
        }
    }

    /// Creates a weight mismatch error.
    #[must_use]
    pub fn weight_mismatch(reason: impl Into<String>) -> Self {
        Self::WeightMismatch {
            reason: reason.into(),
        }
    }

    /// Creates an empty tail error.
    #[must_use]
    pub fn empty_tail(confidence: f64) -> Self {
        Self::EmptyTail { confidence }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns true for [`RiskError::InsufficientData`].
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }

    /// Returns true for [`RiskError::WeightMismatch`].
    pub fn is_weight_mismatch(&self) -> bool {
        matches!(self, Self::WeightMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RiskError::insufficient_data("log returns of AAA", 2, 1);
        assert_eq!(
            err.to_string(),
            "Insufficient data for log returns of AAA: need at least 2, got 1"
        );

        let err = RiskError::weight_mismatch("weights sum to 0.8");
        assert!(err.to_string().contains("0.8"));

        let err = RiskError::empty_tail(0.99);
        assert!(err.to_string().contains("0.99"));
    }

    #[test]
    fn test_predicates() {
        assert!(RiskError::insufficient_data("x", 2, 0).is_insufficient_data());
        assert!(RiskError::weight_mismatch("x").is_weight_mismatch());
        assert!(!RiskError::invalid_input("x").is_weight_mismatch());
    }
}
