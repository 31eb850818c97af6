//! Stress testing against hypothetical return shocks.
//!
//! No repricing is performed: a shock is a one-period simple return per
//! asset and the portfolio's shocked return is the weighted sum.

use serde::{Deserialize, Serialize};
use tracing::debug;

use vantage_core::{RiskError, RiskResult, StressShock, Ticker, Weights};

/// One asset's share of a stress result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressContribution {
    /// Asset ticker.
    pub ticker: Ticker,
    /// Portfolio weight.
    pub weight: f64,
    /// Shock applied to the asset.
    pub shock: f64,
    /// Weighted return contribution (`weight * shock`).
    pub contribution: f64,
}

/// Result of a stress test on a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    /// Scenario name.
    pub scenario_name: String,

    /// Portfolio return under the shock.
    pub shocked_return: f64,

    /// Loss as a fraction of portfolio value (`-shocked_return`).
    pub loss: f64,

    /// Per-asset breakdown.
    pub contributions: Vec<StressContribution>,
}

impl StressResult {
    /// Returns true if this is a gain.
    #[must_use]
    pub fn is_gain(&self) -> bool {
        self.loss < 0.0
    }

    /// Returns true if this is a loss.
    #[must_use]
    pub fn is_loss(&self) -> bool {
        self.loss > 0.0
    }

    /// Loss in currency units for a portfolio worth `portfolio_value`.
    #[must_use]
    pub fn amount(&self, portfolio_value: f64) -> f64 {
        self.loss * portfolio_value
    }
}

/// Applies a shock to a weighted portfolio.
///
/// ## Formula
///
/// ```text
/// Uniform(s):  Loss = -s
/// PerAsset:    Loss = -Σ wᵢ·sᵢ
/// ```
///
/// A uniform shock assumes weights summing to one, so its loss is the
/// negated shock itself.
///
/// # Errors
///
/// Returns [`RiskError::WeightMismatch`] if a per-asset shock does not
/// cover exactly the weighted tickers.
///
/// # Example
///
/// ```rust
/// use vantage_core::{StressShock, Ticker, Weights};
/// use vantage_risk::stress::stress_test;
///
/// let tickers = Ticker::parse_list("AAA,BBB").unwrap();
/// let weights = Weights::from_ordered(&tickers, &[0.6, 0.4]).unwrap();
/// let result = stress_test(&weights, &StressShock::uniform(-0.10).unwrap()).unwrap();
/// assert_eq!(result.loss, 0.10);
/// ```
pub fn stress_test(weights: &Weights, shock: &StressShock) -> RiskResult<StressResult> {
    shock.validate_against(weights.tickers())?;

    let mut contributions = Vec::with_capacity(weights.len());
    for (ticker, weight) in weights.iter() {
        let s = shock.shock_for(ticker.as_str()).ok_or_else(|| {
            RiskError::weight_mismatch(format!("no stress shock for ticker {ticker}"))
        })?;
        contributions.push(StressContribution {
            ticker: ticker.clone(),
            weight,
            shock: s,
            contribution: weight * s,
        });
    }

    let shocked_return = match shock {
        StressShock::Uniform(s) => *s,
        StressShock::PerAsset(_) => contributions.iter().map(|c| c.contribution).sum(),
    };
    let loss = -shocked_return + 0.0;

    debug!(scenario = %shock.name(), loss, "stress test");

    Ok(StressResult {
        scenario_name: shock.name(),
        shocked_return,
        loss,
        contributions,
    })
}

/// Runs several scenarios against the same weights.
///
/// # Errors
///
/// Fails on the first scenario that does not match the weights.
pub fn run_stress_scenarios(
    weights: &Weights,
    scenarios: &[StressShock],
) -> RiskResult<Vec<StressResult>> {
    scenarios.iter().map(|s| stress_test(weights, s)).collect()
}
