//! Risk dashboard report generation.

use basel_core::{BaselResult, Portfolio, RatioResult};
use basel_risk::{ComplianceReport, RegulatoryMinimums, StressTestResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Ratios under one stress scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub scenario: String,
    pub ratios: RatioResult,
    pub compliance: ComplianceReport,
}

/// Baseline and stressed capital/liquidity position of a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    pub generated_at: DateTime<Utc>,
    /// Number of exposures
    pub exposures: usize,
    pub total_exposure: Decimal,
    /// Exposure rated BBB or better
    pub investment_grade_exposure: Decimal,
    /// Baseline RWA by asset class
    pub rwa_by_asset_class: BTreeMap<String, Decimal>,
    pub baseline: RatioResult,
    pub baseline_compliance: ComplianceReport,
    pub scenarios: Vec<ScenarioSummary>,
}

impl RiskReport {
    /// Build a report from a portfolio with derived RWA, its baseline ratios and stress results.
    pub fn new(
        portfolio: &Portfolio,
        baseline: RatioResult,
        stress_results: &[StressTestResult],
        minimums: &RegulatoryMinimums,
    ) -> BaselResult<Self> {
        let rwa_by_asset_class = portfolio
            .rwa_by_asset_class()?
            .into_iter()
            .map(|(class, rwa)| (class.to_string(), rwa))
            .collect();

        let scenarios = stress_results
            .iter()
            .map(|r| ScenarioSummary {
                scenario: r.scenario.clone(),
                ratios: r.ratios,
                compliance: minimums.assess(&r.ratios),
            })
            .collect();

        let report = Self {
            generated_at: Utc::now(),
            exposures: portfolio.len(),
            total_exposure: portfolio.total_exposure()?,
            investment_grade_exposure: portfolio.investment_grade_exposure()?,
            rwa_by_asset_class,
            baseline,
            baseline_compliance: minimums.assess(&baseline),
            scenarios,
        };

        debug!(
            exposures = report.exposures,
            scenarios = report.scenarios.len(),
            compliant = report.is_compliant(),
            "Built risk report"
        );
        Ok(report)
    }

    /// True when the baseline and every scenario meet the minimums.
    pub fn is_compliant(&self) -> bool {
        self.baseline_compliance.is_compliant()
            && self.scenarios.iter().all(|s| s.compliance.is_compliant())
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                 BASEL III RISK DASHBOARD                   \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("PORTFOLIO\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Generated:           {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        s.push_str(&format!("  Exposures:           {}\n", self.exposures));
        s.push_str(&format!("  Total Exposure:      ${:.2}\n", self.total_exposure));
        s.push_str(&format!(
            "  Investment Grade:    ${:.2}\n",
            self.investment_grade_exposure
        ));
        s.push_str(&format!("  Total RWA:           ${:.2}\n", self.baseline.total_rwa));
        for (class, rwa) in &self.rwa_by_asset_class {
            s.push_str(&format!("    {:<24} ${:.2}\n", class, rwa));
        }
        s.push('\n');

        s.push_str("BASELINE RATIOS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        push_ratios(&mut s, &self.baseline, &self.baseline_compliance);
        s.push('\n');

        for scenario in &self.scenarios {
            s.push_str(&format!("STRESS: {}\n", scenario.scenario.to_uppercase()));
            s.push_str("───────────────────────────────────────────────────────────\n");
            push_ratios(&mut s, &scenario.ratios, &scenario.compliance);
            s.push('\n');
        }

        s.push_str(&format!(
            "  Overall:             {}\n",
            if self.is_compliant() { "COMPLIANT" } else { "BREACH" }
        ));
        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn push_ratios(s: &mut String, ratios: &RatioResult, compliance: &ComplianceReport) {
    let labels = [
        ("Tier 1 Ratio", ratios.tier1_ratio),
        ("Total Capital Ratio", ratios.total_capital_ratio),
        ("LCR", ratios.lcr),
        ("NSFR", ratios.nsfr),
    ];

    for ((label, value), check) in labels.iter().zip(&compliance.checks) {
        let status = if check.passed { "ok" } else { "BELOW MIN" };
        s.push_str(&format!(
            "  {:<20} {:>12.2}%   (min {:.2}%, {})\n",
            format!("{}:", label),
            value,
            check.minimum,
            status
        ));
    }
    s.push_str(&format!("  {:<20} ${:.2}\n", "Total RWA:", ratios.total_rwa));
}
