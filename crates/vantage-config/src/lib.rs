//! Vantage Configuration Layer
//!
//! Run settings for the Vantage portfolio risk library, loaded from TOML.
//!
//! # Features
//!
//! - **Analysis Configuration**: Confidence level, horizon, stress shock,
//!   weight handling and histogram resolution
//! - **Validation**: Every field is checked and all problems are reported
//!   together
//!
//! # Example
//!
//! ```rust
//! use vantage_config::{AnalysisConfig, Validate};
//!
//! let config = AnalysisConfig::from_toml_str(
//!     r#"
//!     confidence_level = 0.99
//!     stress_shock = -0.10
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(config.horizon_days, 1);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]

pub mod analysis;
pub mod error;

pub use analysis::{AnalysisConfig, DEFAULT_HISTOGRAM_BINS, MAX_HISTOGRAM_BINS};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
