//! Analyze command implementation.
//!
//! Produces the full risk report for a portfolio.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use vantage_config::AnalysisConfig;
use vantage_core::{RiskRequest, Weights};
use vantage_risk::report::{analyze, LossAmounts, RiskReport};

use crate::cli::OutputFormat;
use crate::commands::{apply_risk_args, apply_shock_args, load_portfolio, PortfolioArgs, RiskArgs, ShockArgs};
use crate::output::{print_header, print_json_value, print_output, without_separators, KeyValue};

/// Arguments for the analyze command.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    #[command(flatten)]
    pub risk: RiskArgs,

    #[command(flatten)]
    pub shock: ShockArgs,

    /// Portfolio value, to report losses as amounts
    #[arg(long)]
    pub value: Option<f64>,
}

/// JSON shape of the analyze output.
#[derive(Debug, Serialize)]
struct AnalyzeOutput<'a> {
    weights: &'a Weights,
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
    report: &'a RiskReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    amounts: Option<LossAmounts>,
}

/// Execute the analyze command.
pub fn execute(args: AnalyzeArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let (prices, builder) = load_portfolio(&args.portfolio, config)?;
    let builder = apply_risk_args(builder, &args.risk);
    let request = apply_shock_args(builder, &args.shock)?.build()?;

    let analysis = analyze(&request, &prices, config.histogram_bins)?;
    let report = &analysis.report;
    let amounts = args
        .value
        .or(config.portfolio_value)
        .map(|v| report.loss_amounts(v));

    match format {
        OutputFormat::Table => {
            print_header("Portfolio Risk Report");
            print_output(&report_rows(&request, &analysis.returns, report, amounts), format)?;
        }
        OutputFormat::Json => {
            print_json_value(&AnalyzeOutput {
                weights: request.weights(),
                start: analysis.returns.dates().first().copied(),
                end: analysis.returns.dates().last().copied(),
                report,
                amounts,
            })?;
        }
        OutputFormat::Csv => {
            let rows = report_rows(&request, &analysis.returns, report, amounts);
            print_output(&without_separators(rows), format)?;
        }
        OutputFormat::Minimal => {
            println!(
                "Parametric VaR: {:.6}, Historical VaR: {:.6}, CVaR: {:.6}",
                report.parametric_var.var, report.historical_var.var, report.cvar.cvar
            );
        }
    }

    Ok(())
}

fn report_rows(
    request: &RiskRequest,
    returns: &vantage_risk::returns::PortfolioReturns,
    report: &RiskReport,
    amounts: Option<LossAmounts>,
) -> Vec<KeyValue> {
    let weights = request
        .weights()
        .iter()
        .map(|(t, w)| format!("{t} {:.2}%", w * 100.0))
        .collect::<Vec<_>>()
        .join(", ");

    let mut rows = vec![
        KeyValue::new("Weights", weights),
        KeyValue::new(
            "Period",
            match (returns.dates().first(), returns.dates().last()) {
                (Some(first), Some(last)) => format!("{first} to {last}"),
                _ => String::new(),
            },
        ),
        KeyValue::new("Observations", report.observations.to_string()),
        KeyValue::new("Confidence", format!("{:.2}%", report.confidence_level * 100.0)),
        KeyValue::new("Horizon", format!("{}d", report.horizon_days)),
        KeyValue::separator(),
        KeyValue::from_percent("Mean Return", report.mean_return),
        KeyValue::from_percent("Volatility", report.volatility),
        KeyValue::separator(),
        KeyValue::from_percent("Parametric VaR", report.parametric_var.var),
        KeyValue::from_percent("Historical VaR", report.historical_var.var),
        KeyValue::from_percent("CVaR (Expected Shortfall)", report.cvar.cvar),
    ];

    if let Some(stress) = &report.stress {
        rows.push(KeyValue::from_percent(
            format!("Stress Loss ({})", stress.scenario_name),
            stress.loss,
        ));
    }

    if let Some(amounts) = amounts {
        rows.push(KeyValue::separator());
        rows.push(KeyValue::from_amount("Portfolio Value", amounts.portfolio_value));
        rows.push(KeyValue::from_amount("Parametric VaR Amount", amounts.parametric_var));
        rows.push(KeyValue::from_amount("Historical VaR Amount", amounts.historical_var));
        rows.push(KeyValue::from_amount("CVaR Amount", amounts.cvar));
        if let Some(stress) = amounts.stress {
            rows.push(KeyValue::from_amount("Stress Loss Amount", stress));
        }
    }

    rows
}
