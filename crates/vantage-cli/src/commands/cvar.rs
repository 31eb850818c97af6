//! CVaR command implementation.

use anyhow::Result;
use clap::Args;

use vantage_config::AnalysisConfig;
use vantage_risk::var::conditional_var;

use crate::cli::OutputFormat;
use crate::commands::{apply_risk_args, load_portfolio, portfolio_series, PortfolioArgs, RiskArgs};
use crate::output::{
    print_header, print_json_value, print_output, print_warning, KeyValue,
};

/// Arguments for the cvar command.
#[derive(Args, Debug)]
pub struct CvarArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    #[command(flatten)]
    pub risk: RiskArgs,

    /// Portfolio value, to report the loss as an amount
    #[arg(long)]
    pub value: Option<f64>,
}

/// Execute the cvar command.
pub fn execute(args: CvarArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let (prices, builder) = load_portfolio(&args.portfolio, config)?;
    let request = apply_risk_args(builder, &args.risk).build()?;
    let (_, returns) = portfolio_series(&request, &prices)?;

    let es = conditional_var(returns.values(), request.confidence(), request.horizon_days())?;
    if es.fallback {
        print_warning("No returns beyond the VaR threshold; using the worst observation");
    }

    match format {
        OutputFormat::Table | OutputFormat::Csv => {
            let mut rows = vec![
                KeyValue::new("Confidence", format!("{:.2}%", es.confidence_level * 100.0)),
                KeyValue::new("Horizon", format!("{}d", es.horizon_days)),
                KeyValue::from_percent("VaR Threshold Return", es.threshold),
                KeyValue::new("Tail Observations", es.tail_size.to_string()),
                KeyValue::from_percent("CVaR", es.cvar),
            ];
            if let Some(v) = args.value.or(config.portfolio_value) {
                rows.push(KeyValue::from_amount("CVaR Amount", es.cvar * v));
            }
            if format == OutputFormat::Table {
                print_header("Conditional VaR (Expected Shortfall)");
            }
            print_output(&rows, format)?;
        }
        OutputFormat::Json => print_json_value(&es)?,
        OutputFormat::Minimal => println!("{:.6}", es.cvar),
    }

    Ok(())
}
