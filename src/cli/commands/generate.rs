//! Generate synthetic portfolio command.

use anyhow::{Context, Result};
use basel_config::AppConfig;
use basel_data::{CsvPortfolioSource, SyntheticPortfolioGenerator};
use basel_risk::compute_rwa;

use crate::cli::GenerateArgs;

pub fn run(args: GenerateArgs, config: &AppConfig) -> Result<()> {
    let mut generator_config = config.generator.clone();
    if let Some(size) = args.size {
        generator_config.size = size;
    }
    if args.seed.is_some() {
        generator_config.seed = args.seed;
    }

    let mut portfolio = SyntheticPortfolioGenerator::new(generator_config)
        .generate()
        .context("Failed to generate synthetic portfolio")?;
    if args.with_rwa {
        portfolio = compute_rwa(&portfolio)?;
    }

    CsvPortfolioSource::save(&portfolio, &args.output)
        .with_context(|| format!("Failed to write {:?}", args.output))?;
    println!(
        "Wrote {} exposures to {}",
        portfolio.len(),
        args.output.display()
    );

    Ok(())
}
