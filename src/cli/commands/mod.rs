//! CLI command implementations.

pub mod generate;
pub mod ratios;
pub mod report;
pub mod scenarios;
pub mod stress;
pub mod validate;

use anyhow::{Context, Result};
use basel_config::{load_config, AppConfig};
use basel_core::Portfolio;
use basel_data::{CsvPortfolioSource, SyntheticPortfolioGenerator};
use std::path::Path;
use tracing::info;

use crate::cli::PortfolioArgs;

/// Load and validate the config file; `None` when it does not exist.
pub(crate) fn load_app_config(path: &Path) -> Result<Option<AppConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let config = load_config(path).with_context(|| format!("Failed to load config {:?}", path))?;
    config.validate().context("Invalid configuration")?;
    Ok(Some(config))
}

/// Load the portfolio from CSV, or generate one from the config's generator settings.
pub(crate) fn load_portfolio(args: &PortfolioArgs, config: &AppConfig) -> Result<Portfolio> {
    if let Some(path) = &args.data {
        let source = CsvPortfolioSource::new(path)?;
        return source
            .load()
            .with_context(|| format!("Failed to load portfolio from {:?}", path));
    }

    let mut generator_config = config.generator.clone();
    if let Some(size) = args.size {
        generator_config.size = size;
    }
    if args.seed.is_some() {
        generator_config.seed = args.seed;
    }

    info!(
        "Generating synthetic portfolio of {} exposures",
        generator_config.size
    );
    SyntheticPortfolioGenerator::new(generator_config)
        .generate()
        .context("Failed to generate synthetic portfolio")
}
