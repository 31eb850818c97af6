//! Vantage CLI - Command-line interface for portfolio tail-risk analytics.
//!
//! # Usage
//!
//! ```bash
//! # Full risk report
//! vantage analyze --prices prices.csv --tickers AAPL,MSFT --weights 0.6,0.4 --shock -0.10
//!
//! # VaR only, both methods, 99%
//! vantage var --prices prices.csv --weights AAPL=0.6,MSFT=0.4 --confidence 0.99 --method both
//!
//! # Per-asset stress scenario
//! vantage stress --tickers AAPL,MSFT --weights 0.6,0.4 --scenario -0.20,-0.05
//!
//! # Return histogram with VaR/CVaR markers
//! vantage distribution --prices prices.csv --weights 0.5,0.5 --bins 30
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vantage_config::AnalysisConfig;

mod cli;
mod commands;
mod data;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            debug!(path = %path.display(), "using configuration file");
            AnalysisConfig::from_file(path)?
        }
        None => AnalysisConfig::default(),
    };

    let format = cli.format;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, &config, format)?,
        Commands::Var(args) => commands::var::execute(args, &config, format)?,
        Commands::Cvar(args) => commands::cvar::execute(args, &config, format)?,
        Commands::Stress(args) => commands::stress::execute(args, &config, format)?,
        Commands::Returns(args) => commands::returns::execute(args, &config, format)?,
        Commands::Distribution(args) => commands::distribution::execute(args, &config, format)?,
        Commands::Config(args) => commands::config::execute(args, &config, cli.quiet, format)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: u8, quiet: bool) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}
