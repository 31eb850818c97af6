//! Config command implementation.
//!
//! Shows the effective analysis configuration or writes a default file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use vantage_config::AnalysisConfig;

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_json_value, print_output, print_success, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (defaults merged with --config)
    Show,

    /// Write a configuration file with default values
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the file
    #[arg(default_value = "vantage.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(
    args: ConfigArgs,
    config: &AnalysisConfig,
    quiet: bool,
    format: OutputFormat,
) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(config, format),
        ConfigCommand::Init(init_args) => execute_init(&init_args, quiet),
    }
}

/// Show current configuration.
fn execute_show(config: &AnalysisConfig, format: OutputFormat) -> Result<()> {
    let optional = |v: Option<f64>| v.map_or_else(|| "none".to_string(), |v| v.to_string());
    let results = vec![
        KeyValue::new("confidence_level", config.confidence_level.to_string()),
        KeyValue::new("horizon_days", config.horizon_days.to_string()),
        KeyValue::new("stress_shock", optional(config.stress_shock)),
        KeyValue::new("weight_tolerance", config.weight_tolerance.to_string()),
        KeyValue::new("normalize_weights", config.normalize_weights.to_string()),
        KeyValue::new("histogram_bins", config.histogram_bins.to_string()),
        KeyValue::new("portfolio_value", optional(config.portfolio_value)),
    ];

    match format {
        OutputFormat::Table => {
            print_header("Current Configuration");
            print_output(&results, format)?;
        }
        OutputFormat::Json => print_json_value(config)?,
        OutputFormat::Csv => print_output(&results, format)?,
        OutputFormat::Minimal => print!("{}", config.to_toml_string()?),
    }

    Ok(())
}

/// Write a default configuration file.
fn execute_init(args: &InitArgs, quiet: bool) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(CliError::FileExists(args.path.clone()).into());
    }

    AnalysisConfig::default().write_to(&args.path)?;

    if !quiet {
        print_success(&format!("Wrote {}", args.path.display()));
    }
    Ok(())
}
