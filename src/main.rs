//! Basel III risk dashboard CLI application.

mod cli;

use anyhow::Result;
use basel_config::AppConfig;
use basel_report::setup_logging;
use clap::Parser;
use cli::commands::load_app_config;
use cli::{Cli, Commands};
use std::path::PathBuf;
use tracing::warn;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // validate-config reports load errors itself.
    let validating = matches!(cli.command, Commands::ValidateConfig);
    let loaded = if validating {
        None
    } else {
        load_app_config(&cli.config)?
    };

    // Setup logging; the config file may add a log file or JSON format.
    let log_level = match cli.log_level {
        cli::LogLevel::Trace => "trace",
        cli::LogLevel::Debug => "debug",
        cli::LogLevel::Info => "info",
        cli::LogLevel::Warn => "warn",
        cli::LogLevel::Error => "error",
    };
    let logging = loaded.as_ref().map(|c| c.logging.clone()).unwrap_or_default();
    let json = cli.json_logs || logging.format == "json";
    let log_file = cli
        .log_file
        .clone()
        .or_else(|| logging.file.map(PathBuf::from));
    let _log_guard = setup_logging(log_level, json, log_file.as_deref());

    let config = match loaded {
        Some(config) => config,
        None => {
            if !validating {
                warn!("Config file {:?} not found, using defaults", cli.config);
            }
            AppConfig::default()
        }
    };

    // Execute command
    match cli.command {
        Commands::Ratios(args) => cli::commands::ratios::run(args, &config),
        Commands::Stress(args) => cli::commands::stress::run(args, &config),
        Commands::Report(args) => cli::commands::report::run(args, &config),
        Commands::Generate(args) => cli::commands::generate::run(args, &config),
        Commands::Scenarios => cli::commands::scenarios::run(&config),
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
        Commands::ShowConfig => cli::commands::validate::show(&config),
    }
}
