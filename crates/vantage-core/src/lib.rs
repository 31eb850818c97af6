//! # Vantage Core
//!
//! Core types and the error taxonomy for the Vantage portfolio risk library.
//!
//! This crate provides the foundational building blocks used throughout Vantage:
//!
//! - **Types**: `Ticker`, `PriceSeries`, `Weights`, `ConfidenceLevel`, `StressShock`
//! - **Request**: An immutable, validated [`RiskRequest`] for one analysis run
//! - **Errors**: [`RiskError`], shared by every stage of the pipeline
//!
//! ## Example
//!
//! ```rust
//! use vantage_core::prelude::*;
//!
//! let tickers = Ticker::parse_list("AAA, BBB").unwrap();
//! let weights = Weights::from_ordered(&tickers, &[0.5, 0.3]).unwrap();
//!
//! // Weights must sum to one unless normalization is requested
//! assert!(weights.validate(&tickers, &WeightPolicy::strict()).is_err());
//! assert!(weights.validate(&tickers, &WeightPolicy::normalizing()).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::unnecessary_map_or)]
#![allow(clippy::return_self_not_must_use)]

pub mod error;
pub mod request;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{RiskError, RiskResult};
    pub use crate::request::{RiskRequest, RiskRequestBuilder};
    pub use crate::types::{
        AlignedPrices, ConfidenceLevel, PricePoint, PriceSeries, StressShock, Ticker,
        WeightPolicy, Weights,
    };
}

// Re-export commonly used types at crate root
pub use error::{RiskError, RiskResult};
pub use request::{RiskRequest, RiskRequestBuilder};
pub use types::{
    AlignedPrices, ConfidenceLevel, PricePoint, PriceSeries, StressShock, Ticker, WeightPolicy,
    Weights,
};

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    #[test]
    fn test_price_types_at_crate_root() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let mut prices = crate::PriceSeries::new();
        prices
            .insert(
                crate::Ticker::new("AAA").unwrap(),
                vec![crate::PricePoint::new(date, 100.0)],
            )
            .unwrap();
        let aligned: crate::AlignedPrices = prices.align().unwrap();
        assert_eq!(aligned.dates(), &[date]);
    }
}
