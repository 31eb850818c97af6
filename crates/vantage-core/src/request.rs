//! Validated analysis request.
//!
//! A [`RiskRequest`] carries everything one analysis run needs. It is built
//! once through [`RiskRequestBuilder`], which reports problems using the
//! error taxonomy, and is immutable afterwards.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};
use crate::types::{ConfidenceLevel, StressShock, Ticker, WeightPolicy, Weights};

/// Immutable description of one risk analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRequest {
    tickers: Vec<Ticker>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    weights: Weights,
    confidence: ConfidenceLevel,
    shock: Option<StressShock>,
    horizon_days: u32,
    weight_policy: WeightPolicy,
}

impl RiskRequest {
    /// Starts building a request.
    #[must_use]
    pub fn builder() -> RiskRequestBuilder {
        RiskRequestBuilder::new()
    }

    /// Requested tickers, in the order given.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Inclusive start of the price window.
    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    /// Inclusive end of the price window.
    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// Validated weights (normalized if the policy asked for it).
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Confidence level for VaR and CVaR.
    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    /// Optional stress scenario.
    pub fn shock(&self) -> Option<&StressShock> {
        self.shock.as_ref()
    }

    /// VaR horizon in trading days.
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Policy the weights were validated under.
    pub fn weight_policy(&self) -> &WeightPolicy {
        &self.weight_policy
    }
}

/// Builder for [`RiskRequest`].
///
/// # Example
///
/// ```rust
/// use vantage_core::RiskRequest;
///
/// let request = RiskRequest::builder()
///     .tickers(["AAA", "BBB"])
///     .ordered_weights(vec![0.6, 0.4])
///     .confidence(0.99)
///     .uniform_shock(-0.10)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.tickers().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RiskRequestBuilder {
    tickers: Vec<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    weights: Option<Weights>,
    ordered_weights: Option<Vec<f64>>,
    confidence: Option<f64>,
    shock: Option<StressShock>,
    ordered_shock: Option<Vec<f64>>,
    uniform_shock: Option<f64>,
    horizon_days: Option<u32>,
    policy: WeightPolicy,
}

impl RiskRequestBuilder {
    /// Creates an empty builder with a strict weight policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tickers (replacing any existing).
    #[must_use]
    pub fn tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tickers = tickers.into_iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Adds one ticker.
    #[must_use]
    pub fn ticker(mut self, ticker: impl AsRef<str>) -> Self {
        self.tickers.push(ticker.as_ref().to_string());
        self
    }

    /// Sets the inclusive start date.
    #[must_use]
    pub fn start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    /// Sets the inclusive end date.
    #[must_use]
    pub fn end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Sets weights keyed by ticker.
    #[must_use]
    pub fn weights(mut self, weights: Weights) -> Self {
        self.weights = Some(weights);
        self.ordered_weights = None;
        self
    }

    /// Sets weights positionally, in ticker order.
    #[must_use]
    pub fn ordered_weights(mut self, weights: Vec<f64>) -> Self {
        self.ordered_weights = Some(weights);
        self.weights = None;
        self
    }

    /// Sets the confidence level (default 0.95).
    #[must_use]
    pub fn confidence(mut self, level: f64) -> Self {
        self.confidence = Some(level);
        self
    }

    /// Sets a stress scenario.
    #[must_use]
    pub fn shock(mut self, shock: StressShock) -> Self {
        self.shock = Some(shock);
        self.uniform_shock = None;
        self.ordered_shock = None;
        self
    }

    /// Sets a uniform stress shock.
    #[must_use]
    pub fn uniform_shock(mut self, shock: f64) -> Self {
        self.uniform_shock = Some(shock);
        self.shock = None;
        self.ordered_shock = None;
        self
    }

    /// Sets per-asset stress shocks positionally, in ticker order.
    #[must_use]
    pub fn ordered_shock(mut self, shocks: Vec<f64>) -> Self {
        self.ordered_shock = Some(shocks);
        self.shock = None;
        self.uniform_shock = None;
        self
    }

    /// Sets the VaR horizon in trading days (default 1).
    #[must_use]
    pub fn horizon_days(mut self, days: u32) -> Self {
        self.horizon_days = Some(days);
        self
    }

    /// Sets how weights are validated.
    #[must_use]
    pub fn weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates everything and builds the request.
    ///
    /// # Errors
    ///
    /// - [`RiskError::InvalidInput`] for no/duplicate/blank tickers, an
    ///   inverted date range, a confidence level outside (0, 1) or a zero
    ///   horizon.
    /// - [`RiskError::WeightMismatch`] for missing weights, weights that do
    ///   not match the tickers or do not sum to one, and per-asset shocks
    ///   that do not cover the tickers.
    pub fn build(self) -> RiskResult<RiskRequest> {
        let tickers = self
            .tickers
            .iter()
            .map(Ticker::new)
            .collect::<RiskResult<Vec<_>>>()?;
        if tickers.is_empty() {
            return Err(RiskError::invalid_input("at least one ticker is required"));
        }
        let unique: BTreeSet<&Ticker> = tickers.iter().collect();
        if unique.len() != tickers.len() {
            return Err(RiskError::invalid_input("tickers must be unique"));
        }

        if let (Some(start), Some(end)) = (self.start, self.end) {
            if start > end {
                return Err(RiskError::invalid_input(format!(
                    "start date {start} is after end date {end}"
                )));
            }
        }

        let confidence = match self.confidence {
            Some(level) => ConfidenceLevel::new(level)?,
            None => ConfidenceLevel::default(),
        };

        let horizon_days = self.horizon_days.unwrap_or(1);
        if horizon_days == 0 {
            return Err(RiskError::invalid_input("horizon must be at least one day"));
        }

        let weights = match (self.weights, self.ordered_weights) {
            (Some(w), _) => w,
            (None, Some(values)) => Weights::from_ordered(&tickers, &values)?,
            (None, None) => return Err(RiskError::weight_mismatch("no weights supplied")),
        };
        let weights = weights.validate(&tickers, &self.policy)?;

        let shock = match (self.shock, self.uniform_shock, self.ordered_shock) {
            (Some(s), _, _) => Some(s),
            (None, Some(s), _) => Some(StressShock::uniform(s)?),
            (None, None, Some(values)) => Some(StressShock::from_ordered(&tickers, &values)?),
            (None, None, None) => None,
        };
        if let Some(shock) = &shock {
            shock.validate_against(&tickers)?;
        }

        Ok(RiskRequest {
            tickers,
            start: self.start,
            end: self.end,
            weights,
            confidence,
            shock,
            horizon_days,
            weight_policy: self.policy,
        })
    }
}
