//! Distribution command implementation.
//!
//! Renders the return histogram as text with VaR/CVaR markers.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use vantage_config::AnalysisConfig;
use vantage_risk::distribution::{return_distribution, ReturnDistribution};

use crate::cli::OutputFormat;
use crate::commands::{apply_risk_args, load_portfolio, portfolio_series, PortfolioArgs, RiskArgs};
use crate::output::{format_percent, print_header, print_json_value};

const BAR_WIDTH: usize = 40;

/// Arguments for the distribution command.
#[derive(Args, Debug)]
pub struct DistributionArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    #[command(flatten)]
    pub risk: RiskArgs,

    /// Number of histogram bins (defaults to the config value)
    #[arg(long)]
    pub bins: Option<usize>,
}

/// Execute the distribution command.
pub fn execute(args: DistributionArgs, config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let (prices, builder) = load_portfolio(&args.portfolio, config)?;
    let request = apply_risk_args(builder, &args.risk).build()?;
    let (_, returns) = portfolio_series(&request, &prices)?;

    let bins = args.bins.unwrap_or(config.histogram_bins);
    let dist = return_distribution(returns.values(), request.confidence(), bins)?;

    match format {
        OutputFormat::Json => print_json_value(&dist)?,
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for bin in dist.histogram.bins() {
                wtr.serialize(bin)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Minimal => {
            println!("{:.6} {:.6}", dist.var_threshold, dist.cvar_threshold);
        }
        OutputFormat::Table => {
            print_header(&format!(
                "Return Distribution ({} observations)",
                dist.histogram.total()
            ));
            for line in render(&dist) {
                println!("{line}");
            }
        }
    }

    Ok(())
}

/// One text line per bin, bars scaled to the fullest bin.
fn render(dist: &ReturnDistribution) -> Vec<String> {
    let max = dist.histogram.max_count().max(1);
    let var_bin = dist.var_bin();
    let cvar_bin = dist.cvar_bin();
    let confidence = format!("{:.0}%", dist.confidence_level * 100.0);

    dist.histogram
        .bins()
        .iter()
        .enumerate()
        .map(|(i, bin)| {
            let len = bin.count * BAR_WIDTH / max;
            let bar = "█".repeat(len);
            let mut line = format!(
                "{:>10} {:<width$} {:>5}",
                format_percent(bin.lower),
                bar,
                bin.count,
                width = BAR_WIDTH
            );
            if Some(i) == cvar_bin {
                line.push_str(&format!("  ◀ CVaR {confidence}").red().to_string());
            }
            if Some(i) == var_bin {
                line.push_str(&format!("  ◀ VaR {confidence}").yellow().to_string());
            }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::ConfidenceLevel;

    #[test]
    fn test_render_marks_thresholds() {
        colored::control::set_override(false);
        let returns: Vec<f64> = (0..200).map(|i| (f64::from(i) * 0.9).sin() * 0.02).collect();
        let dist = return_distribution(&returns, ConfidenceLevel::default(), 20).unwrap();
        let lines = render(&dist);

        assert_eq!(lines.len(), 20);
        assert_eq!(lines.iter().filter(|l| l.contains("◀ VaR 95%")).count(), 1);
        assert_eq!(lines.iter().filter(|l| l.contains("◀ CVaR 95%")).count(), 1);
    }
}
