//! # vantage-risk
//!
//! Tail-risk analytics for equity portfolios.
//!
//! This crate provides the calculation pipeline:
//!
//! - **Returns**: Log returns per asset and the weighted portfolio series
//! - **VaR**: Value at Risk (Historical and Parametric)
//! - **CVaR**: Expected Shortfall beyond the historical VaR
//! - **Stress**: Uniform and per-asset return shocks
//! - **Distribution**: Return histogram with VaR/CVaR markers
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use vantage_core::prelude::*;
//! use vantage_risk::prelude::*;
//!
//! let dates: Vec<NaiveDate> = (1..=4)
//!     .map(|d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap())
//!     .collect();
//! let mut prices = PriceSeries::new();
//! prices.insert_closes(Ticker::new("AAA").unwrap(), &dates, &[100.0, 101.0, 102.0, 101.0]).unwrap();
//! prices.insert_closes(Ticker::new("BBB").unwrap(), &dates, &[50.0, 49.0, 50.0, 51.0]).unwrap();
//!
//! let request = RiskRequest::builder()
//!     .tickers(["AAA", "BBB"])
//!     .ordered_weights(vec![0.6, 0.4])
//!     .uniform_shock(-0.10)
//!     .build()
//!     .unwrap();
//!
//! let analysis = analyze(&request, &prices, 10).unwrap();
//! assert_eq!(analysis.returns.len(), 3);
//! assert_eq!(analysis.report.stress.unwrap().loss, 0.10);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]

pub mod distribution;
mod error;
pub mod report;
pub mod returns;
pub mod stress;
pub mod var;

pub use report::{analyze, Analysis, RiskEstimator, RiskReport};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::distribution::{return_distribution, ReturnDistribution, DEFAULT_BINS};
    pub use crate::report::{analyze, Analysis, LossAmounts, RiskEstimator, RiskReport};
    pub use crate::returns::{log_returns, portfolio_returns, PortfolioReturns, ReturnMatrix};
    pub use crate::stress::{stress_test, StressResult};
    pub use crate::var::{
        conditional_var, historical_var, parametric_var, ExpectedShortfall, VaRMethod, VaRResult,
    };
}
