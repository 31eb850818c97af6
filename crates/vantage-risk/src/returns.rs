//! Return calculation.
//!
//! Turns aligned closing prices into per-asset log returns and combines
//! them into a single portfolio return series:
//!
//! ```text
//! r_i[t] = ln(p_i[t] / p_i[t-1])
//! R[t]   = Σ w_i · r_i[t]
//! ```
//!
//! The per-asset returns are held as a periods × tickers matrix so the
//! portfolio series is a single matrix-vector product.

use chrono::NaiveDate;
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use vantage_core::types::AlignedPrices;
use vantage_core::{PriceSeries, RiskError, RiskResult, Ticker, WeightPolicy, Weights};
use vantage_math::statistics;

use crate::error::from_math;

/// Log returns of a chronological price sequence.
///
/// # Errors
///
/// Returns [`RiskError::InsufficientData`] for fewer than two prices and
/// [`RiskError::InvalidInput`] for a non-positive or non-finite price.
///
/// # Example
///
/// ```rust
/// use vantage_risk::returns::log_returns;
///
/// let r = log_returns(&[100.0, 110.0, 121.0]).unwrap();
/// assert!((r[0] - 1.1_f64.ln()).abs() < 1e-12);
/// assert!((r[1] - 1.1_f64.ln()).abs() < 1e-12);
/// ```
pub fn log_returns(prices: &[f64]) -> RiskResult<Vec<f64>> {
    if prices.len() < 2 {
        return Err(RiskError::insufficient_data("log returns", 2, prices.len()));
    }
    if let Some(bad) = prices.iter().find(|p| !(p.is_finite() && **p > 0.0)) {
        return Err(RiskError::invalid_input(format!(
            "prices must be positive, got {bad}"
        )));
    }
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Summary of one asset's log returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetStatistics {
    /// Asset ticker.
    pub ticker: Ticker,
    /// Mean log return per period.
    pub mean: f64,
    /// Sample standard deviation of log returns.
    pub volatility: f64,
    /// Number of return observations.
    pub observations: usize,
}

/// Per-asset log returns on a shared date axis.
///
/// Row `t` holds the returns from `dates[t-1]` to `dates[t]` of the
/// underlying aligned prices; column `i` belongs to `tickers()[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnMatrix {
    dates: Vec<NaiveDate>,
    tickers: Vec<Ticker>,
    returns: DMatrix<f64>,
}

impl ReturnMatrix {
    /// Computes log returns for every ticker of the aligned prices.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InsufficientData`] if fewer than two dates are
    /// shared by all tickers.
    pub fn from_aligned(aligned: &AlignedPrices) -> RiskResult<Self> {
        if aligned.len() < 2 {
            return Err(RiskError::insufficient_data(
                "aligned price dates",
                2,
                aligned.len(),
            ));
        }

        let mut columns = Vec::with_capacity(aligned.tickers().len());
        for (idx, ticker) in aligned.tickers().iter().enumerate() {
            let closes = aligned.closes(idx).unwrap_or_default();
            let returns = log_returns(closes).map_err(|err| match err {
                RiskError::InsufficientData {
                    required, actual, ..
                } => RiskError::insufficient_data(
                    format!("log returns of {ticker}"),
                    required,
                    actual,
                ),
                other => other,
            })?;
            columns.push(returns);
        }

        let periods = aligned.len() - 1;
        let returns = DMatrix::from_fn(periods, columns.len(), |r, c| columns[c][r]);

        debug!(
            periods,
            assets = columns.len(),
            "computed per-asset log returns"
        );

        Ok(Self {
            dates: aligned.dates()[1..].to_vec(),
            tickers: aligned.tickers().to_vec(),
            returns,
        })
    }

    /// Dates at the end of each return period.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Tickers in column order.
    pub fn tickers(&self) -> &[Ticker] {
        &self.tickers
    }

    /// Number of return periods.
    pub fn periods(&self) -> usize {
        self.returns.nrows()
    }

    /// The periods × tickers return matrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.returns
    }

    /// Log returns of one ticker.
    pub fn asset_returns(&self, ticker: &str) -> Option<Vec<f64>> {
        let idx = self.tickers.iter().position(|t| t.as_str() == ticker)?;
        Some(self.returns.column(idx).iter().copied().collect())
    }

    /// Weighted portfolio return series.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::WeightMismatch`] if the weights fail validation
    /// against this matrix's tickers.
    pub fn portfolio_returns(
        &self,
        weights: &Weights,
        policy: &WeightPolicy,
    ) -> RiskResult<PortfolioReturns> {
        let weights = weights.validate(&self.tickers, policy)?;
        let w = DVector::from_vec(weights.to_vector(&self.tickers)?);
        let combined = &self.returns * w;

        Ok(PortfolioReturns {
            dates: self.dates.clone(),
            values: combined.iter().copied().collect(),
        })
    }

    /// Mean and volatility of each asset's returns.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InsufficientData`] with fewer than two periods.
    pub fn asset_statistics(&self) -> RiskResult<Vec<AssetStatistics>> {
        self.tickers
            .iter()
            .enumerate()
            .map(|(idx, ticker)| {
                let column: Vec<f64> = self.returns.column(idx).iter().copied().collect();
                Ok(AssetStatistics {
                    ticker: ticker.clone(),
                    mean: statistics::mean(&column).map_err(from_math("asset mean return"))?,
                    volatility: statistics::sample_std(&column)
                        .map_err(from_math("asset volatility"))?,
                    observations: column.len(),
                })
            })
            .collect()
    }

    /// Sample covariance matrix of the asset returns (`N - 1` denominator).
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InsufficientData`] with fewer than two periods.
    pub fn covariance(&self) -> RiskResult<DMatrix<f64>> {
        let n = self.periods();
        if n < 2 {
            return Err(RiskError::insufficient_data("return covariance", 2, n));
        }

        let mut centered = self.returns.clone();
        for mut col in centered.column_iter_mut() {
            let mean = col.mean();
            col.add_scalar_mut(-mean);
        }

        Ok((centered.transpose() * &centered) / (n as f64 - 1.0))
    }

    /// Portfolio return variance `wᵀ Σ w` from the covariance matrix.
    ///
    /// # Errors
    ///
    /// Returns an error if the weights fail validation or there are fewer
    /// than two periods.
    pub fn portfolio_variance(&self, weights: &Weights, policy: &WeightPolicy) -> RiskResult<f64> {
        let weights = weights.validate(&self.tickers, policy)?;
        let w = DVector::from_vec(weights.to_vector(&self.tickers)?);
        let cov = self.covariance()?;
        Ok(w.dot(&(cov * &w)))
    }
}

/// Dated portfolio return series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReturns {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl PortfolioReturns {
    /// Creates a series from parallel date and return vectors.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] if the lengths differ.
    pub fn new(dates: Vec<NaiveDate>, values: Vec<f64>) -> RiskResult<Self> {
        if dates.len() != values.len() {
            return Err(RiskError::invalid_input(format!(
                "{} dates but {} returns",
                dates.len(),
                values.len()
            )));
        }
        Ok(Self { dates, values })
    }

    /// Period end dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Portfolio returns in date order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterates over `(date, return)`.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Full return pipeline: align prices, compute log returns, weight them.
///
/// # Errors
///
/// - [`RiskError::InsufficientData`] if the series is empty or fewer than
///   two dates are shared by every ticker.
/// - [`RiskError::WeightMismatch`] if the weights do not match the tickers
///   or do not sum to one under `policy`.
pub fn portfolio_returns(
    prices: &PriceSeries,
    weights: &Weights,
    policy: &WeightPolicy,
) -> RiskResult<PortfolioReturns> {
    let aligned = prices.align()?;
    ReturnMatrix::from_aligned(&aligned)?.portfolio_returns(weights, policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dates(n: usize) -> Vec<NaiveDate> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| start + chrono::Duration::days(i as i64))
            .collect()
    }

    fn t(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    fn two_asset_prices() -> PriceSeries {
        let mut ps = PriceSeries::new();
        ps.insert_closes(t("A"), &dates(4), &[100.0, 101.0, 102.0, 101.0])
            .unwrap();
        ps.insert_closes(t("B"), &dates(4), &[50.0, 49.0, 50.0, 51.0])
            .unwrap();
        ps
    }

    fn weights(a: f64, b: f64) -> Weights {
        Weights::from_ordered(&[t("A"), t("B")], &[a, b]).unwrap()
    }

    #[test]
    fn test_log_returns() {
        let r = log_returns(&[100.0, 105.0, 99.75]).unwrap();
        assert_relative_eq!(r[0], 1.05_f64.ln(), epsilon = 1e-15);
        assert_relative_eq!(r[1], 0.95_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_log_returns_needs_two_prices() {
        let err = log_returns(&[100.0]).unwrap_err();
        assert_eq!(err, RiskError::insufficient_data("log returns", 2, 1));
        assert!(log_returns(&[100.0, -1.0]).is_err());
    }

    #[test]
    fn test_portfolio_returns_weighted_sum() {
        let pr = portfolio_returns(&two_asset_prices(), &weights(0.6, 0.4), &WeightPolicy::strict())
            .unwrap();

        assert_eq!(pr.len(), 3);
        assert_eq!(pr.dates(), &dates(4)[1..]);
        let expected = 0.6 * (101.0_f64 / 100.0).ln() + 0.4 * (49.0_f64 / 50.0).ln();
        assert_relative_eq!(pr.values()[0], expected, epsilon = 1e-15);
    }

    #[test]
    fn test_single_aligned_date() {
        let mut ps = PriceSeries::new();
        ps.insert_closes(t("A"), &dates(1), &[100.0]).unwrap();
        let err = portfolio_returns(&ps, &Weights::equal(&[t("A")]).unwrap(), &WeightPolicy::strict())
            .unwrap_err();
        assert!(err.is_insufficient_data());
    }

    #[test]
    fn test_weight_ticker_mismatch() {
        let w = Weights::from_ordered(&[t("A"), t("C")], &[0.5, 0.5]).unwrap();
        let err = portfolio_returns(&two_asset_prices(), &w, &WeightPolicy::strict()).unwrap_err();
        assert!(err.is_weight_mismatch());
    }

    #[test]
    fn test_covariance_consistent_with_portfolio_variance() {
        let aligned = two_asset_prices().align().unwrap();
        let matrix = ReturnMatrix::from_aligned(&aligned).unwrap();
        let w = weights(0.6, 0.4);

        let series = matrix.portfolio_returns(&w, &WeightPolicy::strict()).unwrap();
        let direct = statistics::sample_variance(series.values()).unwrap();
        let via_cov = matrix.portfolio_variance(&w, &WeightPolicy::strict()).unwrap();

        assert_relative_eq!(direct, via_cov, epsilon = 1e-15);
    }

    #[test]
    fn test_asset_statistics() {
        let aligned = two_asset_prices().align().unwrap();
        let matrix = ReturnMatrix::from_aligned(&aligned).unwrap();
        let stats = matrix.asset_statistics().unwrap();

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].ticker.as_str(), "A");
        assert_eq!(stats[0].observations, 3);
        let a = matrix.asset_returns("A").unwrap();
        assert_relative_eq!(stats[0].mean, statistics::mean(&a).unwrap());
    }
}
