//! Regulatory minimum checks on computed ratios.

use basel_core::RatioResult;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Minimum ratios, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegulatoryMinimums {
    pub min_tier1_ratio: Decimal,
    pub min_total_capital_ratio: Decimal,
    pub min_lcr: Decimal,
    pub min_nsfr: Decimal,
}

impl Default for RegulatoryMinimums {
    fn default() -> Self {
        Self {
            min_tier1_ratio: dec!(6),
            min_total_capital_ratio: dec!(8),
            min_lcr: dec!(100),
            min_nsfr: dec!(100),
        }
    }
}

/// Outcome of checking one ratio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioCheck {
    pub name: String,
    pub value: Decimal,
    pub minimum: Decimal,
    /// value - minimum; negative when breached
    pub buffer: Decimal,
    pub passed: bool,
}

/// Per-ratio compliance results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub checks: Vec<RatioCheck>,
}

impl ComplianceReport {
    /// True when every ratio meets its minimum.
    pub fn is_compliant(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Checks that failed.
    pub fn breaches(&self) -> impl Iterator<Item = &RatioCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }
}

impl RegulatoryMinimums {
    /// Compare each ratio with its minimum.
    pub fn assess(&self, ratios: &RatioResult) -> ComplianceReport {
        let pairs = [
            ("tier1_ratio", ratios.tier1_ratio, self.min_tier1_ratio),
            (
                "total_capital_ratio",
                ratios.total_capital_ratio,
                self.min_total_capital_ratio,
            ),
            ("lcr", ratios.lcr, self.min_lcr),
            ("nsfr", ratios.nsfr, self.min_nsfr),
        ];

        let checks: Vec<RatioCheck> = pairs
            .into_iter()
            .map(|(name, value, minimum)| RatioCheck {
                name: name.to_string(),
                value,
                minimum,
                buffer: value - minimum,
                passed: value >= minimum,
            })
            .collect();

        for check in checks.iter().filter(|c| !c.passed) {
            warn!(
                ratio = %check.name,
                value = %check.value.round_dp(2),
                minimum = %check.minimum,
                "Ratio below regulatory minimum"
            );
        }

        ComplianceReport { checks }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ratios(tier1: Decimal, total: Decimal, lcr: Decimal, nsfr: Decimal) -> RatioResult {
        RatioResult {
            tier1_ratio: tier1,
            total_capital_ratio: total,
            lcr,
            nsfr,
            total_rwa: dec!(1000),
        }
    }

    #[test]
    fn test_compliant() {
        let report = RegulatoryMinimums::default()
            .assess(&ratios(dec!(12), dec!(15), dec!(133.3), dec!(125)));
        assert!(report.is_compliant());
        assert_eq!(report.checks.len(), 4);
        assert_eq!(report.checks[0].buffer, dec!(6));
    }

    #[test]
    fn test_minimum_is_inclusive() {
        let report =
            RegulatoryMinimums::default().assess(&ratios(dec!(6), dec!(8), dec!(100), dec!(100)));
        assert!(report.is_compliant());
    }

    #[test]
    fn test_breach() {
        let report = RegulatoryMinimums::default()
            .assess(&ratios(dec!(12), dec!(15), dec!(40), dec!(62.5)));
        assert!(!report.is_compliant());

        let breached: Vec<&str> = report.breaches().map(|c| c.name.as_str()).collect();
        assert_eq!(breached, vec!["lcr", "nsfr"]);
        assert_eq!(report.checks[2].buffer, dec!(-60));
    }
}
