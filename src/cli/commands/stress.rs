//! Stress test command.

use anyhow::{Context, Result};
use basel_config::AppConfig;
use basel_data::CsvPortfolioSource;
use basel_risk::StressEngine;
use tracing::info;

use super::load_portfolio;
use crate::cli::StressArgs;

pub fn run(args: StressArgs, config: &AppConfig) -> Result<()> {
    let engine = StressEngine::new(config.scenario_registry()?);

    if !engine.registry().exists(&args.scenario) {
        let names: Vec<String> = engine.registry().list().into_iter().map(|s| s.name).collect();
        anyhow::bail!(
            "Unknown stress scenario: {} (available: {})",
            args.scenario,
            names.join(", ")
        );
    }

    info!("Running stress scenario: {}", args.scenario);
    let portfolio = load_portfolio(&args.portfolio, config)?;
    let result = engine
        .run(&portfolio, &config.capital, &args.scenario)
        .with_context(|| format!("Stress test '{}' failed", args.scenario))?;
    let compliance = config.minimums.assess(&result.ratios);

    match args.output.as_str() {
        "json" => {
            let json = serde_json::json!({
                "scenario": result.scenario,
                "multipliers": result.multipliers,
                "inputs": result.inputs,
                "ratios": result.ratios,
                "compliance": compliance,
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        _ => {
            println!("Stress Test Results ({}):", result.scenario);
            for (label, value) in result.ratios.labeled() {
                println!("{}: {}", label, value.round_dp(4));
            }
            if !compliance.is_compliant() {
                println!();
                for check in compliance.breaches() {
                    println!(
                        "  BREACH {}: {:.2}% < {}%",
                        check.name, check.value, check.minimum
                    );
                }
            }
        }
    }

    if let Some(path) = &args.save_portfolio {
        CsvPortfolioSource::save(&result.portfolio, path)
            .with_context(|| format!("Failed to save stressed portfolio to {:?}", path))?;
    }

    Ok(())
}
