//! Portfolio weights and their validation policy.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::Ticker;
use crate::error::{RiskError, RiskResult};

/// Default tolerance on `|sum(weights) - 1|`.
pub const DEFAULT_WEIGHT_TOLERANCE: f64 = 1e-6;

/// How weights are checked before use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPolicy {
    /// Maximum allowed deviation of the weight sum from one.
    pub tolerance: f64,
    /// Rescale weights to sum to one before the sum check.
    pub normalize: bool,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_WEIGHT_TOLERANCE,
            normalize: false,
        }
    }
}

impl WeightPolicy {
    /// Strict policy: weights must already sum to one.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// Normalizing policy: weights are rescaled by their sum.
    #[must_use]
    pub fn normalizing() -> Self {
        Self {
            normalize: true,
            ..Self::default()
        }
    }

    /// Sets the sum tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// Non-negative portfolio weights keyed by ticker.
///
/// # Example
///
/// ```rust
/// use vantage_core::types::{Ticker, WeightPolicy, Weights};
///
/// let tickers = Ticker::parse_list("AAA,BBB").unwrap();
/// let weights = Weights::from_ordered(&tickers, &[0.6, 0.4]).unwrap();
/// let checked = weights.validate(&tickers, &WeightPolicy::strict()).unwrap();
/// assert_eq!(checked.get("AAA"), Some(0.6));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights(BTreeMap<Ticker, f64>);

impl Weights {
    /// Creates an empty weight set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds weights from `(ticker, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::WeightMismatch`] if a ticker appears twice.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (Ticker, f64)>) -> RiskResult<Self> {
        let mut map = BTreeMap::new();
        for (ticker, weight) in pairs {
            if map.insert(ticker.clone(), weight).is_some() {
                return Err(RiskError::weight_mismatch(format!(
                    "ticker {ticker} has more than one weight"
                )));
            }
        }
        Ok(Self(map))
    }

    /// Builds weights positionally: `values[i]` is the weight of `tickers[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::WeightMismatch`] if the counts differ or a
    /// ticker repeats.
    pub fn from_ordered(tickers: &[Ticker], values: &[f64]) -> RiskResult<Self> {
        if tickers.len() != values.len() {
            return Err(RiskError::weight_mismatch(format!(
                "{} tickers but {} weights",
                tickers.len(),
                values.len()
            )));
        }
        Self::from_pairs(tickers.iter().cloned().zip(values.iter().copied()))
    }

    /// Equal weights over the tickers.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty ticker list.
    pub fn equal(tickers: &[Ticker]) -> RiskResult<Self> {
        if tickers.is_empty() {
            return Err(RiskError::weight_mismatch("no tickers to weight"));
        }
        let w = 1.0 / tickers.len() as f64;
        Self::from_pairs(tickers.iter().cloned().map(|t| (t, w)))
    }

    /// Weight of a ticker.
    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.0.get(ticker).copied()
    }

    /// Iterates over `(ticker, weight)` in ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&Ticker, f64)> {
        self.0.iter().map(|(t, w)| (t, *w))
    }

    /// Tickers in ascending order.
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.0.keys()
    }

    /// Number of weighted tickers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no ticker is weighted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.0.values().sum()
    }

    /// Weight vector in the given ticker order.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::WeightMismatch`] if a ticker has no weight.
    pub fn to_vector(&self, order: &[Ticker]) -> RiskResult<Vec<f64>> {
        order
            .iter()
            .map(|t| {
                self.get(t.as_str())
                    .ok_or_else(|| RiskError::weight_mismatch(format!("no weight for {t}")))
            })
            .collect()
    }

    /// Checks the weights against the asset set and returns the weights to use.
    ///
    /// The ticker sets must be identical and every weight finite and
    /// non-negative. Under a normalizing policy the weights are divided by
    /// their sum; the (possibly rescaled) sum must then be within the
    /// policy tolerance of one.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::WeightMismatch`] on any violation.
    pub fn validate(&self, tickers: &[Ticker], policy: &WeightPolicy) -> RiskResult<Self> {
        let expected: BTreeSet<&Ticker> = tickers.iter().collect();
        let given: BTreeSet<&Ticker> = self.0.keys().collect();

        if expected != given {
            let missing: Vec<&str> = expected.difference(&given).map(|t| t.as_str()).collect();
            let extra: Vec<&str> = given.difference(&expected).map(|t| t.as_str()).collect();
            return Err(RiskError::weight_mismatch(format!(
                "ticker sets differ (no weight for [{}], unknown weights for [{}])",
                missing.join(", "),
                extra.join(", ")
            )));
        }

        if let Some((t, w)) = self.iter().find(|(_, w)| !(w.is_finite() && *w >= 0.0)) {
            return Err(RiskError::weight_mismatch(format!(
                "weight of {t} must be non-negative, got {w}"
            )));
        }

        let sum = self.sum();
        let weights = if policy.normalize {
            if sum <= 0.0 {
                return Err(RiskError::weight_mismatch(
                    "cannot normalize weights summing to zero",
                ));
            }
            Self(self.0.iter().map(|(t, w)| (t.clone(), w / sum)).collect())
        } else {
            self.clone()
        };

        let total = weights.sum();
        if (total - 1.0).abs() > policy.tolerance {
            return Err(RiskError::weight_mismatch(format!(
                "weights sum to {total}, expected 1 within {}",
                policy.tolerance
            )));
        }

        Ok(weights)
    }
}

impl FromIterator<(Ticker, f64)> for Weights {
    /// Later duplicates overwrite earlier ones; use [`Weights::from_pairs`]
    /// to reject them.
    fn from_iter<I: IntoIterator<Item = (Ticker, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tickers(s: &str) -> Vec<Ticker> {
        Ticker::parse_list(s).unwrap()
    }

    #[test]
    fn test_valid_weights() {
        let ts = tickers("AAA,BBB");
        let w = Weights::from_ordered(&ts, &[0.6, 0.4]).unwrap();
        let checked = w.validate(&ts, &WeightPolicy::strict()).unwrap();
        assert_eq!(checked, w);
        assert_eq!(checked.to_vector(&ts).unwrap(), vec![0.6, 0.4]);
    }

    #[test]
    fn test_sum_not_one_is_mismatch() {
        let ts = tickers("AAA,BBB");
        let w = Weights::from_ordered(&ts, &[0.5, 0.3]).unwrap();
        let err = w.validate(&ts, &WeightPolicy::strict()).unwrap_err();
        assert!(err.is_weight_mismatch());
    }

    #[test]
    fn test_normalization() {
        let ts = tickers("AAA,BBB");
        let w = Weights::from_ordered(&ts, &[0.5, 0.3]).unwrap();
        let checked = w.validate(&ts, &WeightPolicy::normalizing()).unwrap();
        assert_relative_eq!(checked.get("AAA").unwrap(), 0.625, epsilon = 1e-12);
        assert_relative_eq!(checked.get("BBB").unwrap(), 0.375, epsilon = 1e-12);
    }

    #[test]
    fn test_normalization_of_zero_weights() {
        let ts = tickers("AAA,BBB");
        let w = Weights::from_ordered(&ts, &[0.0, 0.0]).unwrap();
        assert!(w.validate(&ts, &WeightPolicy::normalizing()).is_err());
    }

    #[test]
    fn test_ticker_set_mismatch() {
        let w = Weights::from_ordered(&tickers("AAA,BBB"), &[0.5, 0.5]).unwrap();
        let err = w
            .validate(&tickers("AAA,CCC"), &WeightPolicy::strict())
            .unwrap_err();
        assert!(err.is_weight_mismatch());
        assert!(err.to_string().contains("CCC"));
        assert!(err.to_string().contains("BBB"));
    }

    #[test]
    fn test_negative_weight() {
        let ts = tickers("AAA,BBB");
        let w = Weights::from_ordered(&ts, &[1.2, -0.2]).unwrap();
        assert!(w.validate(&ts, &WeightPolicy::strict()).is_err());
    }

    #[test]
    fn test_count_mismatch_and_duplicates() {
        assert!(Weights::from_ordered(&tickers("AAA,BBB"), &[1.0]).is_err());
        assert!(Weights::from_ordered(&tickers("AAA,AAA"), &[0.5, 0.5]).is_err());
    }

    #[test]
    fn test_tolerance() {
        let ts = tickers("AAA,BBB");
        let w = Weights::from_ordered(&ts, &[0.6, 0.400_000_1]).unwrap();
        assert!(w.validate(&ts, &WeightPolicy::strict()).is_ok());
        assert!(w
            .validate(&ts, &WeightPolicy::strict().with_tolerance(1e-9))
            .is_err());
    }

    #[test]
    fn test_equal_weights() {
        let ts = tickers("AAA,BBB,CCC,DDD");
        let w = Weights::equal(&ts).unwrap();
        assert_relative_eq!(w.sum(), 1.0, epsilon = 1e-12);
        assert!(Weights::equal(&[]).is_err());
    }
}
