//! Baseline ratios command.

use anyhow::{Context, Result};
use basel_config::AppConfig;
use basel_risk::{compute_ratios, compute_rwa};
use tracing::info;

use super::load_portfolio;
use crate::cli::RatiosArgs;

pub fn run(args: RatiosArgs, config: &AppConfig) -> Result<()> {
    let portfolio = load_portfolio(&args.portfolio, config)?;

    let portfolio = compute_rwa(&portfolio).context("RWA calculation failed")?;
    let ratios = compute_ratios(&portfolio, &config.capital).context("Ratio calculation failed")?;
    let compliance = config.minimums.assess(&ratios);

    info!("Computed Basel III ratios over {} exposures", portfolio.len());

    match args.output.as_str() {
        "json" => {
            let json = serde_json::json!({
                "ratios": ratios,
                "compliance": compliance,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("Basel III Ratios:");
            for (label, value) in ratios.labeled() {
                println!("{}: {}", label, value.round_dp(4));
            }
            println!();
            for check in &compliance.checks {
                println!(
                    "  {:<20} {} (min {}%, buffer {:.2})",
                    check.name,
                    if check.passed { "PASS" } else { "FAIL" },
                    check.minimum,
                    check.buffer
                );
            }
        }
    }

    Ok(())
}
