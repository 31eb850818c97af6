//! Stress command implementation.
//!
//! Needs only tickers and weights; no price history is read.

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use vantage_config::AnalysisConfig;
use vantage_risk::stress::stress_test;

use crate::cli::OutputFormat;
use crate::commands::{apply_shock_args, base_request, parse_weights, resolve_tickers, ShockArgs};
use crate::output::{format_amount, format_percent, print_header, print_json_value, print_output, KeyValue};

/// Arguments for the stress command.
#[derive(Args, Debug)]
pub struct StressArgs {
    /// Comma-separated tickers. Defaults to the weight keys.
    #[arg(short, long)]
    pub tickers: Option<String>,

    /// Weights in ticker order (0.6,0.4) or keyed (AAA=0.6,BBB=0.4)
    #[arg(short, long, allow_hyphen_values = true)]
    pub weights: String,

    /// Rescale weights to sum to one
    #[arg(long)]
    pub normalize: bool,

    #[command(flatten)]
    pub shock: ShockArgs,

    /// Portfolio value, to report the loss as an amount
    #[arg(long)]
    pub value: Option<f64>,
}

#[derive(Debug, Serialize, Tabled)]
struct ContributionRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "Shock")]
    shock: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
}

/// Execute the stress command.
pub fn execute(args: StressArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let weights = parse_weights(&args.weights)?;
    let tickers = resolve_tickers(args.tickers.as_deref(), &weights, Vec::new)?;
    if tickers.is_empty() {
        bail!("--tickers is required when weights are given in ticker order");
    }

    let builder = base_request(config, &tickers, weights, args.normalize)?;
    let request = apply_shock_args(builder, &args.shock)?.build()?;
    let Some(shock) = request.shock() else {
        bail!("no stress scenario: pass --shock, --scenario or set stress_shock in the config");
    };

    let result = stress_test(request.weights(), shock)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("Stress Test: {}", result.scenario_name));
            let rows: Vec<ContributionRow> = result
                .contributions
                .iter()
                .map(|c| ContributionRow {
                    ticker: c.ticker.to_string(),
                    weight: format_percent(c.weight),
                    shock: format_percent(c.shock),
                    contribution: format_percent(c.contribution),
                })
                .collect();
            print_output(&rows, format)?;

            let mut summary = vec![
                KeyValue::from_percent("Shocked Return", result.shocked_return),
                KeyValue::from_percent("Loss", result.loss),
            ];
            if let Some(v) = args.value.or(config.portfolio_value) {
                summary.push(KeyValue::new("Loss Amount", format_amount(result.amount(v))));
            }
            print_output(&summary, format)?;
        }
        OutputFormat::Csv => {
            let rows = vec![
                KeyValue::new("Scenario", result.scenario_name.clone()),
                KeyValue::from_percent("Shocked Return", result.shocked_return),
                KeyValue::from_percent("Loss", result.loss),
            ];
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json_value(&result)?,
        OutputFormat::Minimal => println!("{:.6}", result.loss),
    }

    Ok(())
}
