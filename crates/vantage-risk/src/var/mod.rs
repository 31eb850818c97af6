//! Value at Risk (VaR) and Expected Shortfall.
//!
//! VaR estimates the loss that portfolio returns exceed only with
//! probability `1 - c` over the horizon. All figures are positive loss
//! magnitudes expressed as a fraction of portfolio value; a negative
//! figure means the quantile is a gain.

mod historical;
mod parametric;

pub use historical::*;
pub use parametric::*;

use serde::{Deserialize, Serialize};

/// Value at Risk result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// The VaR as a fraction of portfolio value
    pub var: f64,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// Time horizon in days
    pub horizon_days: u32,
    /// Method used for calculation
    pub method: VaRMethod,
}

impl VaRResult {
    /// Loss in currency units for a portfolio worth `portfolio_value`.
    pub fn amount(&self, portfolio_value: f64) -> f64 {
        self.var * portfolio_value
    }
}

/// VaR calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaRMethod {
    /// Historical simulation
    Historical,
    /// Parametric (variance-covariance)
    Parametric,
}

impl std::fmt::Display for VaRMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Historical => write!(f, "Historical"),
            Self::Parametric => write!(f, "Parametric"),
        }
    }
}

impl std::fmt::Display for VaRResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} VaR({:.0}%, {}d): {:.4}%",
            self.method,
            self.confidence_level * 100.0,
            self.horizon_days,
            self.var * 100.0
        )
    }
}

/// Square-root-of-time factor for an `h`-day horizon.
pub(crate) fn horizon_scale(horizon_days: u32) -> f64 {
    f64::from(horizon_days.max(1)).sqrt()
}

/// Turns a return quantile into a positive loss figure.
///
/// Adding zero folds `-0.0` into `0.0`.
pub(crate) fn to_loss(ret: f64, horizon_days: u32) -> f64 {
    -ret * horizon_scale(horizon_days) + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_loss_has_no_negative_zero() {
        let loss = to_loss(0.0, 1);
        assert!(loss.is_sign_positive());
    }

    #[test]
    fn test_horizon_scale() {
        assert!((horizon_scale(1) - 1.0).abs() < f64::EPSILON);
        assert!((horizon_scale(4) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_display() {
        let r = VaRResult {
            var: 0.0123,
            confidence_level: 0.95,
            horizon_days: 1,
            method: VaRMethod::Historical,
        };
        assert_eq!(r.to_string(), "Historical VaR(95%, 1d): 1.2300%");
        assert!((r.amount(1_000_000.0) - 12_300.0).abs() < 1e-6);
    }
}
