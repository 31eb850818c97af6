//! # Vantage Math
//!
//! Statistical utilities for the Vantage portfolio risk library.
//!
//! This crate provides:
//!
//! - **Statistics**: Mean, sample variance/std, covariance, linear percentiles
//! - **Distributions**: Standard normal quantile and CDF
//! - **Histogram**: Equal-width binning for return distributions
//!
//! ## Design Philosophy
//!
//! - **Pure Functions**: Plain `f64` slices in, values out
//! - **Explicit Failure**: Degenerate inputs return [`MathError`], never NaN

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::float_cmp)]

pub mod distributions;
pub mod error;
pub mod histogram;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_quantile};
    pub use crate::error::{MathError, MathResult};
    pub use crate::histogram::{Bin, Histogram};
    pub use crate::statistics::{
        mean, percentile, percentile_sorted, sample_covariance, sample_std, sample_variance,
        sorted,
    };
}

pub use error::{MathError, MathResult};
pub use histogram::{Bin, Histogram};
