//! Return distribution data for plotting.
//!
//! Returned as a value so callers decide how to render it.

use serde::{Deserialize, Serialize};

use vantage_core::{ConfidenceLevel, RiskResult};
use vantage_math::{statistics, Histogram};

use crate::error::from_math;
use crate::var::conditional_var;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 50;

/// Histogram of portfolio returns with VaR and CVaR marker positions.
///
/// The thresholds are returns, not losses, so they sit on the same axis as
/// the histogram bins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnDistribution {
    /// Binned returns.
    pub histogram: Histogram,
    /// Confidence level of the markers.
    pub confidence_level: f64,
    /// Historical VaR threshold return.
    pub var_threshold: f64,
    /// Mean return of the tail at or below `var_threshold`.
    pub cvar_threshold: f64,
    /// Mean return of the whole sample.
    pub mean: f64,
}

impl ReturnDistribution {
    /// Index of the bin containing the VaR marker.
    pub fn var_bin(&self) -> Option<usize> {
        self.histogram.bin_index(self.var_threshold)
    }

    /// Index of the bin containing the CVaR marker.
    pub fn cvar_bin(&self) -> Option<usize> {
        self.histogram.bin_index(self.cvar_threshold)
    }
}

/// Builds the distribution data for a return series.
///
/// # Errors
///
/// - [`vantage_core::RiskError::InsufficientData`] for an empty series.
/// - [`vantage_core::RiskError::InvalidInput`] for zero bins.
pub fn return_distribution(
    returns: &[f64],
    confidence: ConfidenceLevel,
    bins: usize,
) -> RiskResult<ReturnDistribution> {
    let histogram = Histogram::new(returns, bins).map_err(from_math("return histogram"))?;
    let shortfall = conditional_var(returns, confidence, 1)?;
    let mean = statistics::mean(returns).map_err(from_math("mean return"))?;

    Ok(ReturnDistribution {
        histogram,
        confidence_level: confidence.value(),
        var_threshold: shortfall.threshold,
        cvar_threshold: -shortfall.cvar + 0.0,
        mean,
    })
}
