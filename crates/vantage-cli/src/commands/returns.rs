//! Returns command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use vantage_config::AnalysisConfig;

use crate::cli::OutputFormat;
use crate::commands::{load_portfolio, portfolio_series, PortfolioArgs};
use crate::output::{format_percent, print_header, print_json_value, print_output};

/// Arguments for the returns command.
#[derive(Args, Debug)]
pub struct ReturnsArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Show per-asset return statistics instead of the portfolio series
    #[arg(long)]
    pub assets: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ReturnRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Log Return")]
    log_return: f64,
}

#[derive(Debug, Serialize, Tabled)]
struct AssetRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Mean")]
    mean: String,
    #[tabled(rename = "Volatility")]
    volatility: String,
    #[tabled(rename = "Observations")]
    observations: usize,
}

/// Execute the returns command.
pub fn execute(args: ReturnsArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let (prices, builder) = load_portfolio(&args.portfolio, config)?;
    let request = builder.build()?;
    let (matrix, returns) = portfolio_series(&request, &prices)?;

    if args.assets {
        let stats = matrix.asset_statistics()?;
        match format {
            OutputFormat::Json => print_json_value(&stats)?,
            _ => {
                let rows: Vec<AssetRow> = stats
                    .iter()
                    .map(|s| AssetRow {
                        ticker: s.ticker.to_string(),
                        mean: format_percent(s.mean),
                        volatility: format_percent(s.volatility),
                        observations: s.observations,
                    })
                    .collect();
                if format == OutputFormat::Table {
                    print_header("Asset Log Returns");
                }
                print_output(&rows, format)?;
            }
        }
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_json_value(&returns)?,
        OutputFormat::Minimal => {
            for r in returns.values() {
                println!("{r}");
            }
        }
        OutputFormat::Table | OutputFormat::Csv => {
            let rows: Vec<ReturnRow> = returns
                .iter()
                .map(|(date, r)| ReturnRow {
                    date: date.to_string(),
                    log_return: r,
                })
                .collect();
            if format == OutputFormat::Table {
                print_header("Portfolio Log Returns");
            }
            print_output(&rows, format)?;
        }
    }

    Ok(())
}
