//! Analysis run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use vantage_core::types::{DEFAULT_CONFIDENCE, DEFAULT_WEIGHT_TOLERANCE};
use vantage_core::{ConfidenceLevel, RiskRequestBuilder, WeightPolicy};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Default number of histogram bins.
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Largest accepted histogram bin count.
pub const MAX_HISTOGRAM_BINS: usize = 10_000;

/// Settings for one risk analysis run.
///
/// Every field has a default, so an empty TOML document is a valid
/// configuration.
///
/// ```toml
/// confidence_level = 0.99
/// horizon_days = 10
/// stress_shock = -0.15
/// normalize_weights = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Confidence level for VaR and CVaR, in (0, 1).
    pub confidence_level: f64,

    /// VaR horizon in trading days.
    pub horizon_days: u32,

    /// Uniform stress shock as a simple return (e.g. -0.10).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_shock: Option<f64>,

    /// Allowed distance of the weight sum from one.
    pub weight_tolerance: f64,

    /// Rescale weights to sum to one instead of rejecting them.
    pub normalize_weights: bool,

    /// Number of bins in the return histogram.
    pub histogram_bins: usize,

    /// Portfolio value used to express losses as amounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_value: Option<f64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE,
            horizon_days: 1,
            stress_shock: None,
            weight_tolerance: DEFAULT_WEIGHT_TOLERANCE,
            normalize_weights: false,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            portfolio_value: None,
        }
    }
}

impl AnalysisConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading configuration");
        Self::from_toml_str(&content)
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration to a TOML file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builder method to set the confidence level.
    pub fn with_confidence(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Builder method to set the horizon.
    pub fn with_horizon(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// Builder method to set a uniform stress shock.
    pub fn with_stress_shock(mut self, shock: f64) -> Self {
        self.stress_shock = Some(shock);
        self
    }

    /// Builder method to enable weight normalization.
    pub fn with_normalized_weights(mut self, normalize: bool) -> Self {
        self.normalize_weights = normalize;
        self
    }

    /// Confidence level, validated.
    pub fn confidence(&self) -> ConfigResult<ConfidenceLevel> {
        ConfidenceLevel::new(self.confidence_level).map_err(|e| {
            ConfigError::Validation(vec![ValidationError::new(
                "confidence_level",
                e.to_string(),
            )])
        })
    }

    /// Weight policy described by this configuration.
    pub fn weight_policy(&self) -> WeightPolicy {
        WeightPolicy {
            tolerance: self.weight_tolerance,
            normalize: self.normalize_weights,
        }
    }

    /// Applies the run settings to a request builder.
    ///
    /// Values already set on the builder afterwards take precedence, so
    /// callers apply the configuration first and explicit overrides second.
    pub fn apply(&self, builder: RiskRequestBuilder) -> RiskRequestBuilder {
        let builder = builder
            .confidence(self.confidence_level)
            .horizon_days(self.horizon_days)
            .weight_policy(self.weight_policy());
        match self.stress_shock {
            Some(shock) => builder.uniform_shock(shock),
            None => builder,
        }
    }
}

impl Validate for AnalysisConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            errors.push(ValidationError::with_rule(
                "confidence_level",
                "Confidence level must be strictly between 0 and 1",
                "open_unit_interval",
            ));
        }

        if self.horizon_days == 0 {
            errors.push(ValidationError::with_rule(
                "horizon_days",
                "Horizon must be at least one day",
                "positive_horizon",
            ));
        }

        if let Some(shock) = self.stress_shock {
            if !shock.is_finite() || shock < -1.0 {
                errors.push(ValidationError::with_rule(
                    "stress_shock",
                    "Stress shock must be a finite return of at least -100%",
                    "valid_shock",
                ));
            }
        }

        if !(self.weight_tolerance.is_finite() && self.weight_tolerance >= 0.0) {
            errors.push(ValidationError::with_rule(
                "weight_tolerance",
                "Weight tolerance must be finite and non-negative",
                "valid_tolerance",
            ));
        }

        if self.histogram_bins == 0 || self.histogram_bins > MAX_HISTOGRAM_BINS {
            errors.push(ValidationError::with_rule(
                "histogram_bins",
                format!("Histogram bins must be between 1 and {MAX_HISTOGRAM_BINS}"),
                "valid_bins",
            ));
        }

        if let Some(value) = self.portfolio_value {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ValidationError::with_rule(
                    "portfolio_value",
                    "Portfolio value must be positive",
                    "positive_value",
                ));
            }
        }

        errors
    }
}
