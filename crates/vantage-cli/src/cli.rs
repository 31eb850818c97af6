//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{
    AnalyzeArgs, ConfigArgs, CvarArgs, DistributionArgs, ReturnsArgs, StressArgs, VarArgs,
};

/// Vantage - Portfolio tail-risk analytics CLI
#[derive(Parser)]
#[command(name = "vantage")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Analysis configuration file (TOML)
    #[arg(short, long, global = true, env = "VANTAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Full risk report (VaR, CVaR, stress) for a portfolio
    Analyze(AnalyzeArgs),

    /// Value at Risk (historical and/or parametric)
    Var(VarArgs),

    /// Conditional VaR (Expected Shortfall)
    Cvar(CvarArgs),

    /// Loss under a hypothetical shock scenario
    Stress(StressArgs),

    /// Portfolio (or per-asset) log return series
    Returns(ReturnsArgs),

    /// Histogram of portfolio returns with VaR/CVaR markers
    Distribution(DistributionArgs),

    /// Show or create the analysis configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
