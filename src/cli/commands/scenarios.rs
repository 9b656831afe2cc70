//! List stress scenarios command.

use anyhow::Result;
use basel_config::AppConfig;

pub fn run(config: &AppConfig) -> Result<()> {
    let registry = config.scenario_registry()?;

    println!("Stress Scenarios");
    println!("═══════════════════════════════════════════════════════════════════════════");
    println!(
        "  {:<20} {:>6} {:>6} {:>6} {:>6} {:>7} {:>6} {:>6}",
        "Name", "Credit", "Market", "Op", "HQLA", "Outflow", "ASF", "RSF"
    );
    println!("  ─────────────────────────────────────────────────────────────────────────");

    for info in registry.list() {
        let m = info.multipliers;
        println!(
            "  {:<20} {:>6} {:>6} {:>6} {:>6} {:>7} {:>6} {:>6}{}",
            info.name,
            m.credit,
            m.market,
            m.operational,
            m.hqla,
            m.outflows,
            m.available_stable_funding,
            m.required_stable_funding,
            if info.builtin { "" } else { "  (custom)" }
        );
    }

    println!();
    println!("Use --scenario <name> with the stress command.");

    Ok(())
}
