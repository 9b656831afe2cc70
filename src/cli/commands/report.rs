//! Dashboard report command.

use anyhow::{Context, Result};
use basel_config::AppConfig;
use basel_report::RiskReport;
use basel_risk::{compute_ratios, compute_rwa, StressEngine};
use tracing::info;

use super::load_portfolio;
use crate::cli::ReportArgs;

pub fn run(args: ReportArgs, config: &AppConfig) -> Result<()> {
    let engine = StressEngine::new(config.scenario_registry()?);

    let portfolio = load_portfolio(&args.portfolio, config)?;
    let portfolio = compute_rwa(&portfolio).context("RWA calculation failed")?;
    let baseline = compute_ratios(&portfolio, &config.capital).context("Ratio calculation failed")?;
    let stress = engine
        .run_all(&portfolio, &config.capital)
        .context("Stress testing failed")?;

    let report = RiskReport::new(&portfolio, baseline, &stress, &config.minimums)?;

    match args.output.as_str() {
        "json" => println!("{}", report.to_json()?),
        _ => println!("{}", report.summary()),
    }

    if let Some(save_path) = &args.save {
        let json = report.to_json()?;
        std::fs::write(save_path, json)
            .with_context(|| format!("Failed to write report to {:?}", save_path))?;
        info!("Report saved to {:?}", save_path);
    }

    Ok(())
}
