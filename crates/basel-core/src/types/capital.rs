//! Capital and liquidity inputs, stress multipliers and ratio results.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{BaselError, BaselResult};

/// Externally supplied capital and liquidity amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapitalInputs {
    /// Core (Tier 1) regulatory capital
    pub tier1_capital: Decimal,
    /// Total regulatory capital (Tier 1 + Tier 2)
    pub total_capital: Decimal,
    /// High-quality liquid assets
    pub hqla: Decimal,
    /// Projected net cash outflows over the stress horizon
    pub expected_outflows: Decimal,
    /// Available stable funding
    pub available_stable_funding: Decimal,
    /// Required stable funding
    pub required_stable_funding: Decimal,
}

impl Default for CapitalInputs {
    fn default() -> Self {
        Self {
            tier1_capital: dec!(1000000000),
            total_capital: dec!(1200000000),
            hqla: dec!(800000000),
            expected_outflows: dec!(600000000),
            available_stable_funding: dec!(1500000000),
            required_stable_funding: dec!(1200000000),
        }
    }
}

impl CapitalInputs {
    fn fields(&self) -> [(&'static str, Decimal); 6] {
        [
            ("tier1_capital", self.tier1_capital),
            ("total_capital", self.total_capital),
            ("hqla", self.hqla),
            ("expected_outflows", self.expected_outflows),
            ("available_stable_funding", self.available_stable_funding),
            ("required_stable_funding", self.required_stable_funding),
        ]
    }

    /// Reject negative amounts.
    pub fn validate(&self) -> BaselResult<()> {
        for (field, value) in self.fields() {
            if value < Decimal::ZERO {
                return Err(BaselError::InvalidInput {
                    field,
                    reason: format!("must be non-negative, got {}", value),
                });
            }
        }
        Ok(())
    }

    /// Return a stressed copy. Tier 1 and total capital are not stressed.
    pub fn apply(&self, multipliers: &ScenarioMultipliers) -> BaselResult<Self> {
        Ok(Self {
            tier1_capital: self.tier1_capital,
            total_capital: self.total_capital,
            hqla: stressed("hqla", self.hqla, multipliers.hqla)?,
            expected_outflows: stressed(
                "expected_outflows",
                self.expected_outflows,
                multipliers.outflows,
            )?,
            available_stable_funding: stressed(
                "available_stable_funding",
                self.available_stable_funding,
                multipliers.available_stable_funding,
            )?,
            required_stable_funding: stressed(
                "required_stable_funding",
                self.required_stable_funding,
                multipliers.required_stable_funding,
            )?,
        })
    }
}

fn stressed(field: &'static str, value: Decimal, multiplier: Decimal) -> BaselResult<Decimal> {
    value
        .checked_mul(multiplier)
        .ok_or_else(|| BaselError::InvalidInput {
            field,
            reason: format!(
                "stressed value overflows the numeric range ({} x {})",
                value, multiplier
            ),
        })
}

/// Multiplicative shocks applied by a stress scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioMultipliers {
    /// Applied to every exposure's risk_weight
    pub credit: Decimal,
    /// Applied to every exposure's market_risk_factor
    pub market: Decimal,
    /// Applied to every exposure's op_risk_factor
    pub operational: Decimal,
    pub hqla: Decimal,
    pub outflows: Decimal,
    pub available_stable_funding: Decimal,
    pub required_stable_funding: Decimal,
}

impl ScenarioMultipliers {
    /// No stress.
    pub const IDENTITY: ScenarioMultipliers = ScenarioMultipliers {
        credit: Decimal::ONE,
        market: Decimal::ONE,
        operational: Decimal::ONE,
        hqla: Decimal::ONE,
        outflows: Decimal::ONE,
        available_stable_funding: Decimal::ONE,
        required_stable_funding: Decimal::ONE,
    };

    /// Build from the seven factors in table order
    /// (credit, market, operational, HQLA, outflows, ASF, RSF).
    pub fn from_factors(factors: [Decimal; 7]) -> Self {
        let [credit, market, operational, hqla, outflows, asf, rsf] = factors;
        Self {
            credit,
            market,
            operational,
            hqla,
            outflows,
            available_stable_funding: asf,
            required_stable_funding: rsf,
        }
    }

    /// The seven factors in table order.
    pub fn factors(&self) -> [Decimal; 7] {
        [
            self.credit,
            self.market,
            self.operational,
            self.hqla,
            self.outflows,
            self.available_stable_funding,
            self.required_stable_funding,
        ]
    }

    /// Reject negative multipliers.
    pub fn validate(&self, name: &str) -> BaselResult<()> {
        if let Some(value) = self.factors().iter().find(|v| **v < Decimal::ZERO) {
            return Err(BaselError::InvalidScenario {
                name: name.to_string(),
                reason: format!("multipliers must be non-negative, got {}", value),
            });
        }
        Ok(())
    }
}

/// Capital and liquidity ratios. All ratios are percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioResult {
    pub tier1_ratio: Decimal,
    pub total_capital_ratio: Decimal,
    /// Liquidity coverage ratio
    pub lcr: Decimal,
    /// Net stable funding ratio
    pub nsfr: Decimal,
    /// Portfolio total RWA (monetary)
    pub total_rwa: Decimal,
}

impl RatioResult {
    /// Labeled values in display order.
    pub fn labeled(&self) -> [(&'static str, Decimal); 5] {
        [
            ("tier1_ratio", self.tier1_ratio),
            ("total_capital_ratio", self.total_capital_ratio),
            ("lcr", self.lcr),
            ("nsfr", self.nsfr),
            ("total_rwa", self.total_rwa),
        ]
    }
}
