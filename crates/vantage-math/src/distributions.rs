//! Standard normal distribution helpers.
//!
//! Thin wrappers over `statrs` that validate the probability argument and
//! report failures as [`MathError`].

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{MathError, MathResult};

fn standard_normal() -> MathResult<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| MathError::invalid_input(e.to_string()))
}

/// Inverse cumulative distribution function of the standard normal.
///
/// `normal_quantile(0.05)` is approximately `-1.645`.
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] unless `0 < p < 1`.
pub fn normal_quantile(p: f64) -> MathResult<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(MathError::invalid_input(format!(
            "probability must be in (0, 1), got {p}"
        )));
    }
    Ok(standard_normal()?.inverse_cdf(p))
}

/// Cumulative distribution function of the standard normal.
///
/// # Errors
///
/// Returns [`MathError::InvalidInput`] for a NaN argument.
pub fn normal_cdf(x: f64) -> MathResult<f64> {
    if x.is_nan() {
        return Err(MathError::invalid_input("cdf argument is NaN"));
    }
    Ok(standard_normal()?.cdf(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_common_quantiles() {
        assert_relative_eq!(normal_quantile(0.05).unwrap(), -1.644_853_6, epsilon = 1e-6);
        assert_relative_eq!(normal_quantile(0.01).unwrap(), -2.326_347_9, epsilon = 1e-6);
        assert_relative_eq!(normal_quantile(0.5).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_quantile_symmetry() {
        for p in [0.001, 0.025, 0.1, 0.3] {
            assert_relative_eq!(
                normal_quantile(p).unwrap(),
                -normal_quantile(1.0 - p).unwrap(),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_cdf_inverts_quantile() {
        let z = normal_quantile(0.975).unwrap();
        assert_relative_eq!(normal_cdf(z).unwrap(), 0.975, epsilon = 1e-9);
    }

    #[test]
    fn test_quantile_rejects_bounds() {
        assert!(normal_quantile(0.0).is_err());
        assert!(normal_quantile(1.0).is_err());
        assert!(normal_quantile(f64::NAN).is_err());
    }
}
