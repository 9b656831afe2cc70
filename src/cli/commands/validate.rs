//! Validate and show configuration commands.

use anyhow::Result;
use basel_config::{load_config, AppConfig};
use std::path::Path;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    match load_config(config_path) {
        Ok(config) => {
            if let Err(e) = config.validate() {
                println!("Configuration error: {}", e);
                return Err(e.into());
            }
            println!("Configuration is valid!");
            println!();
            println!("App: {}", config.app.name);
            println!("Environment: {}", config.app.environment);
            println!("Log level: {}", config.logging.level);
            println!("Tier 1 capital: {}", config.capital.tier1_capital);
            println!("Total capital: {}", config.capital.total_capital);
            println!("Min Tier 1 ratio: {}%", config.minimums.min_tier1_ratio);
            println!("Min LCR: {}%", config.minimums.min_lcr);
            println!("Custom scenarios: {}", config.scenarios.len());
        }
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
