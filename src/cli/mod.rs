//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "basel")]
#[command(author, version, about = "Basel III capital adequacy and liquidity risk dashboard")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    /// Also write logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute baseline capital and liquidity ratios
    Ratios(RatiosArgs),
    /// Run a single stress scenario
    Stress(StressArgs),
    /// Full dashboard: baseline plus every stress scenario
    Report(ReportArgs),
    /// Write a synthetic portfolio to CSV
    Generate(GenerateArgs),
    /// List available stress scenarios
    Scenarios,
    /// Validate configuration
    ValidateConfig,
    /// Print the effective configuration as TOML
    ShowConfig,
}

/// Where the portfolio comes from.
#[derive(clap::Args)]
pub struct PortfolioArgs {
    /// Portfolio CSV file; a synthetic portfolio is generated when omitted
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Number of synthetic exposures
    #[arg(long, conflicts_with = "data")]
    pub size: Option<usize>,

    /// Seed for the synthetic generator
    #[arg(long, conflicts_with = "data")]
    pub seed: Option<u64>,
}

#[derive(clap::Args)]
pub struct RatiosArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,
}

#[derive(clap::Args)]
pub struct StressArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Scenario name (see `scenarios`)
    #[arg(short, long)]
    pub scenario: String,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the stressed portfolio to CSV
    #[arg(long)]
    pub save_portfolio: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub portfolio: PortfolioArgs,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the JSON report to file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Destination CSV file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Number of exposures
    #[arg(long)]
    pub size: Option<usize>,

    /// Generator seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Include derived RWA columns
    #[arg(long)]
    pub with_rwa: bool,
}
