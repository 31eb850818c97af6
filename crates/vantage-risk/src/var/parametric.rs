//! Parametric (variance-covariance) VaR.
//!
//! Assumes normally distributed portfolio returns:
//!
//! ```text
//! VaR = -(μ + z·σ) · √h,   z = Φ⁻¹(1 - c)
//! ```

use tracing::debug;

use vantage_core::{ConfidenceLevel, RiskResult};
use vantage_math::{distributions, statistics};

use super::{to_loss, VaRMethod, VaRResult};
use crate::error::from_math;

/// Parametric VaR of a return series.
///
/// # Arguments
///
/// * `returns` - Portfolio returns per period
/// * `confidence` - Confidence level
/// * `horizon_days` - Time horizon in periods
///
/// # Errors
///
/// Returns [`vantage_core::RiskError::InsufficientData`] with fewer than
/// two observations.
///
/// # Example
///
/// ```rust
/// use vantage_core::ConfidenceLevel;
/// use vantage_risk::var::parametric_var;
///
/// let returns = [0.01, -0.02, 0.015, -0.005, 0.0];
/// let var = parametric_var(&returns, ConfidenceLevel::new(0.95).unwrap(), 1).unwrap();
/// assert!(var.var > 0.0);
/// ```
pub fn parametric_var(
    returns: &[f64],
    confidence: ConfidenceLevel,
    horizon_days: u32,
) -> RiskResult<VaRResult> {
    let mu = statistics::mean(returns).map_err(from_math("parametric VaR"))?;
    let sigma = statistics::sample_std(returns).map_err(from_math("parametric VaR"))?;
    debug!(mu, sigma, observations = returns.len(), "portfolio return moments");
    parametric_var_from_moments(mu, sigma, confidence, horizon_days)
}

/// Parametric VaR from a known mean and standard deviation.
///
/// # Errors
///
/// Returns [`vantage_core::RiskError::InvalidInput`] for a negative or
/// non-finite `sigma`.
pub fn parametric_var_from_moments(
    mu: f64,
    sigma: f64,
    confidence: ConfidenceLevel,
    horizon_days: u32,
) -> RiskResult<VaRResult> {
    if !(sigma.is_finite() && sigma >= 0.0) {
        return Err(vantage_core::RiskError::invalid_input(format!(
            "volatility must be finite and non-negative, got {sigma}"
        )));
    }
    let z = distributions::normal_quantile(confidence.tail_probability())
        .map_err(from_math("normal quantile"))?;

    Ok(VaRResult {
        var: to_loss(mu + z * sigma, horizon_days),
        confidence_level: confidence.value(),
        horizon_days,
        method: VaRMethod::Parametric,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(level: f64) -> ConfidenceLevel {
        ConfidenceLevel::new(level).unwrap()
    }

    #[test]
    fn test_parametric_var_95() {
        // σ = 1%, μ = 0 → VaR ≈ 1.645%
        let var = parametric_var_from_moments(0.0, 0.01, c(0.95), 1).unwrap();
        assert_relative_eq!(var.var, 0.016_448_536, epsilon = 1e-8);
        assert_eq!(var.method, VaRMethod::Parametric);
    }

    #[test]
    fn test_parametric_var_99() {
        let var = parametric_var_from_moments(0.0, 0.01, c(0.99), 1).unwrap();
        assert_relative_eq!(var.var, 0.023_263_479, epsilon = 1e-8);
    }

    #[test]
    fn test_horizon_scaling() {
        let one = parametric_var_from_moments(0.001, 0.01, c(0.95), 1).unwrap();
        let ten = parametric_var_from_moments(0.001, 0.01, c(0.95), 10).unwrap();
        assert_relative_eq!(ten.var, one.var * 10.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_positive_mean_reduces_var() {
        let flat = parametric_var_from_moments(0.0, 0.01, c(0.95), 1).unwrap();
        let drift = parametric_var_from_moments(0.002, 0.01, c(0.95), 1).unwrap();
        assert_relative_eq!(flat.var - drift.var, 0.002, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_returns() {
        let var = parametric_var(&[0.0; 5], c(0.95), 1).unwrap();
        assert_eq!(var.var, 0.0);
        assert!(var.var.is_sign_positive());
    }

    #[test]
    fn test_tiny_confidence_level() {
        // 1 - 1e-18 rounds to 1.0 in f64; the quantile must still be finite
        let var = parametric_var_from_moments(0.0, 0.01, c(1e-18), 1).unwrap();
        assert!(var.var.is_finite());
        assert!(var.var < 0.0);
    }

    #[test]
    fn test_insufficient_data() {
        let err = parametric_var(&[0.01], c(0.95), 1).unwrap_err();
        assert!(err.is_insufficient_data());
        assert!(parametric_var(&[], c(0.95), 1).is_err());
    }
}
