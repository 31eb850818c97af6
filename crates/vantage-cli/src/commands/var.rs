//! VaR command implementation.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use vantage_config::AnalysisConfig;
use vantage_risk::var::{historical_var, parametric_var, VaRResult};

use crate::cli::OutputFormat;
use crate::commands::{apply_risk_args, load_portfolio, portfolio_series, PortfolioArgs, RiskArgs};
use crate::output::{format_amount, format_percent, print_header, print_json_value, print_output};

/// Which VaR estimate to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VarMethodArg {
    /// Empirical percentile of past returns
    Historical,
    /// Normal approximation from mean and volatility
    Parametric,
    /// Both estimates
    #[default]
    Both,
}

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    #[command(flatten)]
    pub risk: RiskArgs,

    /// Estimation method
    #[arg(long, value_enum, default_value = "both")]
    pub method: VarMethodArg,

    /// Portfolio value, to report losses as amounts
    #[arg(long)]
    pub value: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct VarRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "Horizon")]
    horizon_days: u32,
    #[tabled(rename = "VaR")]
    var: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Execute the var command.
pub fn execute(args: VarArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let (prices, builder) = load_portfolio(&args.portfolio, config)?;
    let request = apply_risk_args(builder, &args.risk).build()?;
    let (_, returns) = portfolio_series(&request, &prices)?;

    let confidence = request.confidence();
    let horizon = request.horizon_days();
    let mut results: Vec<VaRResult> = Vec::with_capacity(2);
    if matches!(args.method, VarMethodArg::Parametric | VarMethodArg::Both) {
        results.push(parametric_var(returns.values(), confidence, horizon)?);
    }
    if matches!(args.method, VarMethodArg::Historical | VarMethodArg::Both) {
        results.push(historical_var(returns.values(), confidence, horizon)?);
    }

    let value = args.value.or(config.portfolio_value);

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<VarRow> = results
                .iter()
                .map(|r| VarRow {
                    method: r.method.to_string(),
                    confidence: format!("{:.2}%", r.confidence_level * 100.0),
                    horizon_days: r.horizon_days,
                    var: format_percent(r.var),
                    amount: value.map(|v| format_amount(r.amount(v))).unwrap_or_default(),
                })
                .collect();
            if format == OutputFormat::Table {
                print_header("Value at Risk");
            }
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json_value(&results)?,
        OutputFormat::Minimal => {
            for r in &results {
                println!("{:.6}", r.var);
            }
        }
    }

    Ok(())
}
