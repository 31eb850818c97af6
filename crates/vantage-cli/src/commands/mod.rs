//! CLI command implementations.

pub mod analyze;
pub mod config;
pub mod cvar;
pub mod distribution;
pub mod returns;
pub mod stress;
pub mod var;

// Re-export submodules for convenience
pub use analyze::AnalyzeArgs;
pub use config::ConfigArgs;
pub use cvar::CvarArgs;
pub use distribution::DistributionArgs;
pub use returns::ReturnsArgs;
pub use stress::StressArgs;
pub use var::VarArgs;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use tracing::debug;

use vantage_config::AnalysisConfig;
use vantage_core::{PriceSeries, RiskRequest, RiskRequestBuilder, StressShock, Ticker, Weights};
use vantage_risk::returns::{PortfolioReturns, ReturnMatrix};

use crate::data::{load_prices, PriceFile};
use crate::error::{CliError, CliResult};

/// Portfolio and price history arguments shared by the analysis commands.
#[derive(Args, Debug, Clone)]
pub struct PortfolioArgs {
    /// Wide CSV of closing prices (date,<TICKER>,...)
    #[arg(short, long)]
    pub prices: PathBuf,

    /// Comma-separated tickers. Defaults to the weight keys or every price column.
    #[arg(short, long)]
    pub tickers: Option<String>,

    /// Weights in ticker order (0.6,0.4) or keyed (AAA=0.6,BBB=0.4)
    #[arg(short, long, allow_hyphen_values = true)]
    pub weights: String,

    /// First date of the price window (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Last date of the price window (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,

    /// Rescale weights to sum to one
    #[arg(long)]
    pub normalize: bool,
}

/// Confidence and horizon overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct RiskArgs {
    /// Confidence level in (0, 1), e.g. 0.95
    #[arg(long)]
    pub confidence: Option<f64>,

    /// VaR horizon in trading days
    #[arg(long)]
    pub horizon: Option<u32>,
}

/// Stress scenario arguments.
#[derive(Args, Debug, Clone, Default)]
pub struct ShockArgs {
    /// Uniform shock applied to every asset, e.g. -0.10
    #[arg(long, allow_hyphen_values = true, conflicts_with = "scenario")]
    pub shock: Option<f64>,

    /// Per-asset shocks in ticker order, e.g. -0.20,-0.05
    #[arg(long, allow_hyphen_values = true)]
    pub scenario: Option<String>,
}

/// Weights as given on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum WeightSpec {
    /// Values in ticker order.
    Ordered(Vec<f64>),
    /// Values keyed by ticker.
    Keyed(Vec<(Ticker, f64)>),
}

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses `0.6,0.4` or `AAA=0.6,BBB=0.4`.
pub fn parse_weights(s: &str) -> CliResult<WeightSpec> {
    let invalid = || CliError::InvalidWeights(s.to_string());
    let parts: Vec<&str> = s.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return Err(invalid());
    }

    if parts.iter().any(|p| p.contains('=')) {
        parts
            .iter()
            .map(|part| {
                let (ticker, value) = part.split_once('=').ok_or_else(invalid)?;
                let ticker = Ticker::new(ticker).map_err(|_| invalid())?;
                let value = value.trim().parse::<f64>().map_err(|_| invalid())?;
                Ok((ticker, value))
            })
            .collect::<CliResult<Vec<_>>>()
            .map(WeightSpec::Keyed)
    } else {
        parts
            .iter()
            .map(|p| p.parse::<f64>().map_err(|_| invalid()))
            .collect::<CliResult<Vec<_>>>()
            .map(WeightSpec::Ordered)
    }
}

/// Parses comma-separated per-asset shocks.
pub fn parse_scenario(s: &str) -> CliResult<Vec<f64>> {
    let values = s
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().map_err(|_| CliError::InvalidScenario(s.to_string())))
        .collect::<CliResult<Vec<_>>>()?;
    if values.is_empty() {
        return Err(CliError::InvalidScenario(s.to_string()));
    }
    Ok(values)
}

/// Resolves the ticker list: explicit, else weight keys, else `fallback`.
pub fn resolve_tickers<'a>(
    explicit: Option<&str>,
    weights: &WeightSpec,
    fallback: impl FnOnce() -> Vec<&'a Ticker>,
) -> CliResult<Vec<Ticker>> {
    if let Some(list) = explicit {
        return Ok(Ticker::parse_list(list)?);
    }
    Ok(match weights {
        WeightSpec::Keyed(pairs) => pairs.iter().map(|(t, _)| t.clone()).collect(),
        WeightSpec::Ordered(_) => fallback().into_iter().cloned().collect(),
    })
}

/// Starts a request from configuration, tickers and weights.
pub fn base_request(
    config: &AnalysisConfig,
    tickers: &[Ticker],
    weights: WeightSpec,
    normalize: bool,
) -> CliResult<RiskRequestBuilder> {
    let mut policy = config.weight_policy();
    if normalize {
        policy.normalize = true;
    }

    let builder = config
        .apply(RiskRequest::builder().tickers(tickers.iter().map(Ticker::as_str)))
        .weight_policy(policy);

    Ok(match weights {
        WeightSpec::Ordered(values) => builder.ordered_weights(values),
        WeightSpec::Keyed(pairs) => builder.weights(Weights::from_pairs(pairs)?),
    })
}

/// Applies confidence/horizon overrides.
pub fn apply_risk_args(builder: RiskRequestBuilder, args: &RiskArgs) -> RiskRequestBuilder {
    let builder = match args.confidence {
        Some(c) => builder.confidence(c),
        None => builder,
    };
    match args.horizon {
        Some(h) => builder.horizon_days(h),
        None => builder,
    }
}

/// Applies a shock override.
pub fn apply_shock_args(builder: RiskRequestBuilder, args: &ShockArgs) -> CliResult<RiskRequestBuilder> {
    Ok(match (args.shock, &args.scenario) {
        (Some(s), _) => builder.shock(StressShock::uniform(s)?),
        (None, Some(list)) => builder.ordered_shock(parse_scenario(list)?),
        (None, None) => builder,
    })
}

/// Loads prices and starts a request for the portfolio arguments.
pub fn load_portfolio(
    args: &PortfolioArgs,
    config: &AnalysisConfig,
) -> Result<(PriceSeries, RiskRequestBuilder)> {
    let PriceFile { prices, columns } = load_prices(&args.prices)?;
    let weights = parse_weights(&args.weights)?;
    let tickers = resolve_tickers(args.tickers.as_deref(), &weights, || columns.iter().collect())?;

    let mut builder = base_request(config, &tickers, weights, args.normalize)?;
    if let Some(start) = &args.start {
        builder = builder.start(parse_date(start)?);
    }
    if let Some(end) = &args.end {
        builder = builder.end(parse_date(end)?);
    }
    Ok((prices, builder))
}

/// Runs alignment and weighting for a validated request.
pub fn portfolio_series(
    request: &RiskRequest,
    prices: &PriceSeries,
) -> Result<(ReturnMatrix, PortfolioReturns)> {
    let aligned = prices
        .select(request.tickers())?
        .between(request.start(), request.end())
        .align()?;
    let matrix = ReturnMatrix::from_aligned(&aligned)?;
    let returns = matrix.portfolio_returns(request.weights(), request.weight_policy())?;
    debug!(observations = returns.len(), "portfolio return series");
    Ok((matrix, returns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ordered_weights() {
        assert_eq!(
            parse_weights("0.6, 0.4").unwrap(),
            WeightSpec::Ordered(vec![0.6, 0.4])
        );
    }

    #[test]
    fn test_parse_keyed_weights() {
        let WeightSpec::Keyed(pairs) = parse_weights("AAA=0.6,'BBB'=0.4").unwrap() else {
            panic!("expected keyed weights");
        };
        assert_eq!(pairs[1].0.as_str(), "BBB");
        assert!((pairs[1].1 - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_weights_errors() {
        assert!(parse_weights("").is_err());
        assert!(parse_weights("0.6,abc").is_err());
        assert!(parse_weights("AAA=0.6,0.4").is_err());
    }

    #[test]
    fn test_parse_scenario() {
        assert_eq!(parse_scenario("-0.2,-0.05").unwrap(), vec![-0.2, -0.05]);
        assert!(parse_scenario("-0.2,x").is_err());
        assert!(parse_scenario(",").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );
        assert!(matches!(parse_date("03/01/2024"), Err(CliError::InvalidDate(_))));
    }

    #[test]
    fn test_resolve_tickers() {
        let a = Ticker::new("AAA").unwrap();
        let ordered = WeightSpec::Ordered(vec![1.0]);
        assert_eq!(resolve_tickers(None, &ordered, || vec![&a]).unwrap(), vec![a.clone()]);
        assert_eq!(
            resolve_tickers(Some("BBB"), &ordered, || vec![&a]).unwrap()[0].as_str(),
            "BBB"
        );
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = AnalysisConfig::default().with_confidence(0.9).with_stress_shock(-0.3);
        let tickers = Ticker::parse_list("AAA,BBB").unwrap();
        let builder = base_request(&config, &tickers, WeightSpec::Ordered(vec![0.5, 0.5]), false)
            .unwrap();
        let builder = apply_risk_args(
            builder,
            &RiskArgs {
                confidence: Some(0.99),
                horizon: None,
            },
        );
        let request = apply_shock_args(
            builder,
            &ShockArgs {
                shock: None,
                scenario: Some("-0.1,-0.2".into()),
            },
        )
        .unwrap()
        .build()
        .unwrap();

        assert!((request.confidence().value() - 0.99).abs() < f64::EPSILON);
        assert_eq!(request.shock().unwrap().shock_for("BBB"), Some(-0.2));
    }
}
