//! Hypothetical return shocks for stress testing.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::Ticker;
use crate::error::{RiskError, RiskResult};

/// An assumed adverse move applied to the portfolio.
///
/// Shocks are simple returns: `-0.10` is a 10% fall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "shock", rename_all = "snake_case")]
pub enum StressShock {
    /// Every asset moves by the same return.
    Uniform(f64),
    /// Each asset moves by its own return.
    PerAsset(BTreeMap<Ticker, f64>),
}

impl StressShock {
    /// Uniform shock.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidInput`] for a non-finite shock.
    pub fn uniform(shock: f64) -> RiskResult<Self> {
        check_finite("uniform", shock)?;
        Ok(Self::Uniform(shock))
    }

    /// Per-asset shock from `(ticker, shock)` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error for a repeated ticker or a non-finite shock.
    pub fn per_asset(pairs: impl IntoIterator<Item = (Ticker, f64)>) -> RiskResult<Self> {
        let mut map = BTreeMap::new();
        for (ticker, shock) in pairs {
            check_finite(ticker.as_str(), shock)?;
            if map.insert(ticker.clone(), shock).is_some() {
                return Err(RiskError::weight_mismatch(format!(
                    "ticker {ticker} has more than one shock"
                )));
            }
        }
        Ok(Self::PerAsset(map))
    }

    /// Per-asset shock given positionally in ticker order.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::WeightMismatch`] if the counts differ.
    pub fn from_ordered(tickers: &[Ticker], shocks: &[f64]) -> RiskResult<Self> {
        if tickers.len() != shocks.len() {
            return Err(RiskError::weight_mismatch(format!(
                "{} tickers but {} shocks",
                tickers.len(),
                shocks.len()
            )));
        }
        Self::per_asset(tickers.iter().cloned().zip(shocks.iter().copied()))
    }

    /// Checks that a per-asset shock covers exactly the given tickers.
    ///
    /// Uniform shocks always pass.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::WeightMismatch`] if the ticker sets differ.
    pub fn validate_against<'a>(&self, tickers: impl IntoIterator<Item = &'a Ticker>) -> RiskResult<()> {
        let Self::PerAsset(map) = self else {
            return Ok(());
        };
        let expected: BTreeSet<&Ticker> = tickers.into_iter().collect();
        let given: BTreeSet<&Ticker> = map.keys().collect();
        if expected != given {
            let missing: Vec<&str> = expected.difference(&given).map(|t| t.as_str()).collect();
            let extra: Vec<&str> = given.difference(&expected).map(|t| t.as_str()).collect();
            return Err(RiskError::weight_mismatch(format!(
                "stress scenario tickers differ from weights (no shock for [{}], unknown shocks for [{}])",
                missing.join(", "),
                extra.join(", ")
            )));
        }
        Ok(())
    }

    /// Shock applied to one ticker.
    pub fn shock_for(&self, ticker: &str) -> Option<f64> {
        match self {
            Self::Uniform(s) => Some(*s),
            Self::PerAsset(map) => map.get(ticker).copied(),
        }
    }

    /// Human-readable scenario label.
    pub fn name(&self) -> String {
        match self {
            Self::Uniform(s) => format!("Uniform {:+.2}%", s * 100.0),
            Self::PerAsset(map) => format!("Per-asset ({} tickers)", map.len()),
        }
    }
}

fn check_finite(label: &str, shock: f64) -> RiskResult<()> {
    if shock.is_finite() {
        Ok(())
    } else {
        Err(RiskError::invalid_input(format!(
            "{label} shock must be finite, got {shock}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tickers(s: &str) -> Vec<Ticker> {
        Ticker::parse_list(s).unwrap()
    }

    #[test]
    fn test_uniform() {
        let s = StressShock::uniform(-0.1).unwrap();
        assert_eq!(s.shock_for("ANY"), Some(-0.1));
        assert_eq!(s.name(), "Uniform -10.00%");
        assert!(StressShock::uniform(f64::INFINITY).is_err());
    }

    #[test]
    fn test_ordered_per_asset() {
        let ts = tickers("AAA,BBB,CCC");
        let s = StressShock::from_ordered(&ts, &[-0.05, -0.02, -0.03]).unwrap();
        assert_eq!(s.shock_for("BBB"), Some(-0.02));
        assert!(s.validate_against(&ts).is_ok());
        assert!(StressShock::from_ordered(&ts, &[-0.05]).is_err());
    }

    #[test]
    fn test_per_asset_must_cover_tickers() {
        let s = StressShock::from_ordered(&tickers("AAA,BBB"), &[-0.05, -0.02]).unwrap();
        let err = s.validate_against(&tickers("AAA,CCC")).unwrap_err();
        assert!(err.is_weight_mismatch());
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&StressShock::Uniform(-0.1)).unwrap();
        assert_eq!(json, r#"{"kind":"uniform","shock":-0.1}"#);
    }
}
