//! Historical-simulation VaR and Expected Shortfall (CVaR).

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use vantage_core::{ConfidenceLevel, RiskError, RiskResult};
use vantage_math::statistics;

use super::{to_loss, VaRMethod, VaRResult};
use crate::error::from_math;

/// Return at the `(1 - c)` percentile of the sample.
///
/// Linear interpolation between adjacent order statistics.
///
/// # Errors
///
/// Returns [`RiskError::InsufficientData`] for an empty sample.
pub fn historical_threshold(returns: &[f64], confidence: ConfidenceLevel) -> RiskResult<f64> {
    statistics::percentile(returns, confidence.tail_probability())
        .map_err(from_math("historical VaR"))
}

/// Calculate historical VaR from a series of returns.
///
/// # Arguments
///
/// * `returns` - Historical returns (as decimals, e.g., -0.01 for -1%)
/// * `confidence` - Confidence level
/// * `horizon_days` - Time horizon in periods
///
/// # Errors
///
/// Returns [`RiskError::InsufficientData`] for an empty sample.
pub fn historical_var(
    returns: &[f64],
    confidence: ConfidenceLevel,
    horizon_days: u32,
) -> RiskResult<VaRResult> {
    let threshold = historical_threshold(returns, confidence)?;
    Ok(VaRResult {
        var: to_loss(threshold, horizon_days),
        confidence_level: confidence.value(),
        horizon_days,
        method: VaRMethod::Historical,
    })
}

/// Expected Shortfall result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedShortfall {
    /// Mean tail loss as a fraction of portfolio value
    pub cvar: f64,
    /// Return at the VaR percentile that bounds the tail
    pub threshold: f64,
    /// Number of observations at or below the threshold
    pub tail_size: usize,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// Time horizon in days
    pub horizon_days: u32,
    /// True if the tail was empty and the worst observation was used
    pub fallback: bool,
}

/// Conditional VaR: the mean loss over returns at or below the historical
/// VaR threshold.
///
/// An empty tail is recovered from by taking the single worst observation;
/// a warning is logged and [`ExpectedShortfall::fallback`] is set.
///
/// # Errors
///
/// Returns [`RiskError::InsufficientData`] for an empty sample.
pub fn conditional_var(
    returns: &[f64],
    confidence: ConfidenceLevel,
    horizon_days: u32,
) -> RiskResult<ExpectedShortfall> {
    let threshold = historical_threshold(returns, confidence)?;
    Ok(shortfall_below(returns, threshold, confidence, horizon_days))
}

/// Expected Shortfall for a given tail threshold. `returns` must be
/// non-empty.
fn shortfall_below(
    returns: &[f64],
    threshold: f64,
    confidence: ConfidenceLevel,
    horizon_days: u32,
) -> ExpectedShortfall {
    let tail: Vec<f64> = returns.iter().copied().filter(|r| *r <= threshold).collect();

    let (tail_mean, tail_size, fallback) = match tail_mean(&tail, confidence) {
        Ok(mean) => (mean, tail.len(), false),
        Err(err) => {
            let worst = returns.iter().copied().fold(f64::INFINITY, f64::min);
            warn!(%err, worst, "CVaR tail empty, using worst observation");
            (worst, 1, true)
        }
    };

    debug!(threshold, tail_size, "expected shortfall tail");

    ExpectedShortfall {
        cvar: to_loss(tail_mean, horizon_days),
        threshold,
        tail_size,
        confidence_level: confidence.value(),
        horizon_days,
        fallback,
    }
}

fn tail_mean(tail: &[f64], confidence: ConfidenceLevel) -> RiskResult<f64> {
    statistics::mean(tail).map_err(|_| RiskError::empty_tail(confidence.value()))
}
