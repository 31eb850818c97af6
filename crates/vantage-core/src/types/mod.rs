//! Domain types for portfolio risk analytics.
//!
//! - [`Ticker`]: Asset identifier
//! - [`PricePoint`], [`PriceSeries`], [`AlignedPrices`]: Closing price histories
//! - [`Weights`], [`WeightPolicy`]: Portfolio weights and how they are checked
//! - [`ConfidenceLevel`]: Quantile level for VaR/CVaR
//! - [`StressShock`]: Hypothetical adverse move

mod confidence;
mod price;
mod shock;
mod ticker;
mod weights;

pub use confidence::{ConfidenceLevel, DEFAULT_CONFIDENCE};
pub use price::{AlignedPrices, PricePoint, PriceSeries};
pub use shock::StressShock;
pub use ticker::Ticker;
pub use weights::{WeightPolicy, Weights, DEFAULT_WEIGHT_TOLERANCE};
