//! Risk report assembly.
//!
//! [`RiskEstimator`] turns a portfolio return series into a [`RiskReport`];
//! [`analyze`] runs the whole pipeline for a [`RiskRequest`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use vantage_core::{ConfidenceLevel, PriceSeries, RiskRequest, RiskResult, StressShock, Weights};
use vantage_math::statistics;

use crate::distribution::{return_distribution, ReturnDistribution};
use crate::error::from_math;
use crate::returns::{PortfolioReturns, ReturnMatrix};
use crate::stress::{stress_test, StressResult};
use crate::var::{conditional_var, historical_var, parametric_var_from_moments, ExpectedShortfall, VaRResult};

/// Every risk figure for one portfolio return series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// Time horizon in days
    pub horizon_days: u32,
    /// Number of return observations
    pub observations: usize,
    /// Mean portfolio return per period
    pub mean_return: f64,
    /// Sample standard deviation of portfolio returns
    pub volatility: f64,
    /// Parametric (normal) VaR
    pub parametric_var: VaRResult,
    /// Historical-simulation VaR
    pub historical_var: VaRResult,
    /// Expected Shortfall beyond the historical VaR
    pub cvar: ExpectedShortfall,
    /// Stress test, if a scenario was given
    pub stress: Option<StressResult>,
}

/// Report figures converted to currency units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LossAmounts {
    /// Portfolio value the amounts refer to
    pub portfolio_value: f64,
    /// Parametric VaR amount
    pub parametric_var: f64,
    /// Historical VaR amount
    pub historical_var: f64,
    /// CVaR amount
    pub cvar: f64,
    /// Stress loss amount
    pub stress: Option<f64>,
}

impl RiskReport {
    /// Converts the fractional figures into amounts for a portfolio worth
    /// `portfolio_value`.
    pub fn loss_amounts(&self, portfolio_value: f64) -> LossAmounts {
        LossAmounts {
            portfolio_value,
            parametric_var: self.parametric_var.amount(portfolio_value),
            historical_var: self.historical_var.amount(portfolio_value),
            cvar: self.cvar.cvar * portfolio_value,
            stress: self.stress.as_ref().map(|s| s.amount(portfolio_value)),
        }
    }
}

/// Computes a [`RiskReport`] from portfolio returns.
///
/// # Example
///
/// ```rust
/// use vantage_core::{ConfidenceLevel, StressShock, Ticker, Weights};
/// use vantage_risk::report::RiskEstimator;
/// use vantage_risk::returns::PortfolioReturns;
/// use chrono::NaiveDate;
///
/// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
/// let returns = PortfolioReturns::new(
///     vec![d(2), d(3), d(4), d(5)],
///     vec![0.01, -0.02, 0.005, -0.01],
/// ).unwrap();
/// let weights = Weights::equal(&Ticker::parse_list("AAA").unwrap()).unwrap();
///
/// let report = RiskEstimator::new(ConfidenceLevel::new(0.95).unwrap())
///     .with_shock(StressShock::uniform(-0.1).unwrap())
///     .estimate(&returns, &weights)
///     .unwrap();
///
/// assert!(report.cvar.cvar >= report.historical_var.var);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RiskEstimator {
    confidence: ConfidenceLevel,
    horizon_days: u32,
    shock: Option<StressShock>,
}

impl RiskEstimator {
    /// Estimator for a one-day horizon with no stress scenario.
    pub fn new(confidence: ConfidenceLevel) -> Self {
        Self {
            confidence,
            horizon_days: 1,
            shock: None,
        }
    }

    /// Estimator configured from a validated request.
    pub fn from_request(request: &RiskRequest) -> Self {
        Self {
            confidence: request.confidence(),
            horizon_days: request.horizon_days(),
            shock: request.shock().cloned(),
        }
    }

    /// Sets the VaR horizon in days.
    pub fn with_horizon(mut self, horizon_days: u32) -> Self {
        self.horizon_days = horizon_days;
        self
    }

    /// Sets the stress scenario.
    pub fn with_shock(mut self, shock: StressShock) -> Self {
        self.shock = Some(shock);
        self
    }

    /// Confidence level used for VaR and CVaR.
    pub fn confidence(&self) -> ConfidenceLevel {
        self.confidence
    }

    /// Computes every figure.
    ///
    /// # Errors
    ///
    /// - [`vantage_core::RiskError::InsufficientData`] with fewer than two
    ///   return observations.
    /// - [`vantage_core::RiskError::InvalidInput`] for a zero horizon.
    /// - [`vantage_core::RiskError::WeightMismatch`] if the stress scenario
    ///   does not match the weights.
    pub fn estimate(&self, returns: &PortfolioReturns, weights: &Weights) -> RiskResult<RiskReport> {
        if self.horizon_days == 0 {
            return Err(vantage_core::RiskError::invalid_input(
                "horizon must be at least one day",
            ));
        }

        let values = returns.values();
        let mean_return = statistics::mean(values).map_err(from_math("portfolio returns"))?;
        let volatility = statistics::sample_std(values).map_err(from_math("portfolio returns"))?;

        let parametric_var =
            parametric_var_from_moments(mean_return, volatility, self.confidence, self.horizon_days)?;
        let historical_var = historical_var(values, self.confidence, self.horizon_days)?;
        let cvar = conditional_var(values, self.confidence, self.horizon_days)?;
        let stress = self
            .shock
            .as_ref()
            .map(|shock| stress_test(weights, shock))
            .transpose()?;

        debug!(
            parametric = parametric_var.var,
            historical = historical_var.var,
            cvar = cvar.cvar,
            "risk figures"
        );

        Ok(RiskReport {
            confidence_level: self.confidence.value(),
            horizon_days: self.horizon_days,
            observations: values.len(),
            mean_return,
            volatility,
            parametric_var,
            historical_var,
            cvar,
            stress,
        })
    }
}

/// Output of a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Portfolio return series the figures were computed from.
    pub returns: PortfolioReturns,
    /// Risk figures.
    pub report: RiskReport,
    /// Return histogram with VaR/CVaR markers.
    pub distribution: ReturnDistribution,
}

/// Runs the whole pipeline for a request.
///
/// Prices are restricted to the request's tickers and date window,
/// aligned on common dates, turned into weighted log returns and then
/// summarised.
///
/// # Errors
///
/// - [`vantage_core::RiskError::InsufficientData`] if a ticker has no price
///   history or fewer than two aligned dates remain.
/// - [`vantage_core::RiskError::WeightMismatch`] if the weights do not fit.
/// - [`vantage_core::RiskError::InvalidInput`] for zero histogram bins.
pub fn analyze(request: &RiskRequest, prices: &PriceSeries, bins: usize) -> RiskResult<Analysis> {
    let window = prices
        .select(request.tickers())?
        .between(request.start(), request.end());
    let aligned = window.align()?;
    let matrix = ReturnMatrix::from_aligned(&aligned)?;
    let returns = matrix.portfolio_returns(request.weights(), request.weight_policy())?;

    let report = RiskEstimator::from_request(request).estimate(&returns, request.weights())?;
    let distribution = return_distribution(returns.values(), request.confidence(), bins)?;

    info!(
        tickers = request.tickers().len(),
        observations = returns.len(),
        "analysis complete"
    );

    Ok(Analysis {
        returns,
        report,
        distribution,
    })
}
