//! Scenario-based stress testing.

use basel_core::{
    BaselError, BaselResult, CapitalInputs, Exposure, Portfolio, RatioResult, ScenarioMultipliers,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info};

use crate::{compute_ratios, compute_rwa_owned};

/// Built-in stress scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressScenario {
    #[serde(rename = "Mild Recession")]
    MildRecession,
    #[serde(rename = "Severe Recession")]
    SevereRecession,
    #[serde(rename = "Financial Crisis")]
    FinancialCrisis,
}

impl StressScenario {
    /// Get all built-in scenarios, least to most severe.
    pub fn all() -> &'static [StressScenario] {
        &[
            StressScenario::MildRecession,
            StressScenario::SevereRecession,
            StressScenario::FinancialCrisis,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            StressScenario::MildRecession => "Mild Recession",
            StressScenario::SevereRecession => "Severe Recession",
            StressScenario::FinancialCrisis => "Financial Crisis",
        }
    }

    /// Multipliers in table order: credit, market, operational, HQLA, outflows, ASF, RSF.
    pub fn multipliers(&self) -> ScenarioMultipliers {
        let factors = match self {
            StressScenario::MildRecession => [
                dec!(1.2),
                dec!(1.5),
                dec!(1.1),
                dec!(0.9),
                dec!(1.2),
                dec!(0.95),
                dec!(1.05),
            ],
            StressScenario::SevereRecession => [
                dec!(1.5),
                dec!(2.0),
                dec!(1.3),
                dec!(0.75),
                dec!(1.5),
                dec!(0.85),
                dec!(1.2),
            ],
            StressScenario::FinancialCrisis => [
                dec!(2.0),
                dec!(3.0),
                dec!(1.5),
                dec!(0.6),
                dec!(2.0),
                dec!(0.7),
                dec!(1.4),
            ],
        };
        ScenarioMultipliers::from_factors(factors)
    }
}

impl fmt::Display for StressScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StressScenario {
    type Err = BaselError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = scenario_key(s);
        StressScenario::all()
            .iter()
            .copied()
            .find(|scenario| scenario_key(scenario.name()) == key)
            .ok_or_else(|| BaselError::UnknownScenario(s.to_string()))
    }
}

/// Description of a registered scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioInfo {
    pub name: String,
    pub multipliers: ScenarioMultipliers,
    pub builtin: bool,
}

/// Registry of stress scenarios: the built-in table plus any custom scenarios.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRegistry {
    custom: BTreeMap<String, ScenarioMultipliers>,
}

impl ScenarioRegistry {
    /// Create a registry with only the built-in scenarios.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with built-ins plus the given custom scenarios.
    pub fn with_custom<I, S>(scenarios: I) -> BaselResult<Self>
    where
        I: IntoIterator<Item = (S, ScenarioMultipliers)>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for (name, multipliers) in scenarios {
            registry.register(name, multipliers)?;
        }
        Ok(registry)
    }

    /// Register a custom scenario.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        multipliers: ScenarioMultipliers,
    ) -> BaselResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(BaselError::InvalidScenario {
                name,
                reason: "name must not be empty".to_string(),
            });
        }
        if StressScenario::from_str(&name).is_ok() || self.find_custom(&name).is_some() {
            return Err(BaselError::InvalidScenario {
                name,
                reason: "a scenario with this name already exists".to_string(),
            });
        }
        multipliers.validate(&name)?;

        debug!(scenario = %name, "Registered custom scenario");
        self.custom.insert(name, multipliers);
        Ok(())
    }

    /// Resolve a scenario name to its canonical name and multipliers.
    pub fn resolve(&self, name: &str) -> BaselResult<(String, ScenarioMultipliers)> {
        if let Ok(scenario) = StressScenario::from_str(name) {
            return Ok((scenario.name().to_string(), scenario.multipliers()));
        }
        self.find_custom(name)
            .map(|(canonical, multipliers)| (canonical.clone(), *multipliers))
            .ok_or_else(|| BaselError::UnknownScenario(name.to_string()))
    }

    /// Check if a scenario exists.
    pub fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// All scenarios: built-ins in table order, then custom ones by name.
    pub fn list(&self) -> Vec<ScenarioInfo> {
        let builtin = StressScenario::all().iter().map(|s| ScenarioInfo {
            name: s.name().to_string(),
            multipliers: s.multipliers(),
            builtin: true,
        });
        let custom = self.custom.iter().map(|(name, multipliers)| ScenarioInfo {
            name: name.clone(),
            multipliers: *multipliers,
            builtin: false,
        });
        builtin.chain(custom).collect()
    }

    fn find_custom(&self, name: &str) -> Option<(&String, &ScenarioMultipliers)> {
        let key = scenario_key(name);
        self.custom
            .iter()
            .find(|(candidate, _)| scenario_key(candidate) == key)
    }
}

/// Outcome of one stress run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressTestResult {
    /// Canonical scenario name
    pub scenario: String,
    /// Multipliers that were applied
    pub multipliers: ScenarioMultipliers,
    /// Stressed portfolio with derived RWA
    pub portfolio: Portfolio,
    /// Stressed capital/liquidity inputs
    pub inputs: CapitalInputs,
    /// Stressed ratios
    pub ratios: RatioResult,
}

/// Applies scenarios to a portfolio and recomputes RWA and ratios.
#[derive(Debug, Clone, Default)]
pub struct StressEngine {
    registry: ScenarioRegistry,
}

impl StressEngine {
    /// Create a stress engine over the given registry.
    pub fn new(registry: ScenarioRegistry) -> Self {
        Self { registry }
    }

    /// Get the scenario registry.
    pub fn registry(&self) -> &ScenarioRegistry {
        &self.registry
    }

    /// Run one named scenario. The caller's portfolio and inputs are never modified.
    pub fn run(
        &self,
        portfolio: &Portfolio,
        inputs: &CapitalInputs,
        scenario_name: &str,
    ) -> BaselResult<StressTestResult> {
        let (scenario, multipliers) = self.registry.resolve(scenario_name)?;
        self.run_with(portfolio, inputs, scenario, multipliers)
    }

    /// Run every registered scenario, in [`ScenarioRegistry::list`] order.
    pub fn run_all(
        &self,
        portfolio: &Portfolio,
        inputs: &CapitalInputs,
    ) -> BaselResult<Vec<StressTestResult>> {
        self.registry
            .list()
            .into_iter()
            .map(|info| self.run_with(portfolio, inputs, info.name, info.multipliers))
            .collect()
    }

    fn run_with(
        &self,
        portfolio: &Portfolio,
        inputs: &CapitalInputs,
        scenario: String,
        multipliers: ScenarioMultipliers,
    ) -> BaselResult<StressTestResult> {
        let stressed = compute_rwa_owned(stress_portfolio(portfolio, &multipliers)?)?;
        let stressed_inputs = inputs.apply(&multipliers)?;
        let ratios = compute_ratios(&stressed, &stressed_inputs)?;

        info!(
            scenario = %scenario,
            tier1_ratio = %ratios.tier1_ratio.round_dp(2),
            lcr = %ratios.lcr.round_dp(2),
            nsfr = %ratios.nsfr.round_dp(2),
            "Stress test complete"
        );

        Ok(StressTestResult {
            scenario,
            multipliers,
            portfolio: stressed,
            inputs: stressed_inputs,
            ratios,
        })
    }
}

/// Stress a named scenario against the built-in table.
pub fn run_stress_test(
    portfolio: &Portfolio,
    inputs: &CapitalInputs,
    scenario_name: &str,
) -> BaselResult<StressTestResult> {
    StressEngine::default().run(portfolio, inputs, scenario_name)
}

/// Scale every exposure's risk factors into a new portfolio; derived RWA is cleared.
fn stress_portfolio(
    portfolio: &Portfolio,
    multipliers: &ScenarioMultipliers,
) -> BaselResult<Portfolio> {
    portfolio
        .iter()
        .map(|exposure| {
            let mut stressed = exposure.clone();
            stressed.risk_weight =
                shocked(exposure, "risk_weight", exposure.risk_weight, multipliers.credit)?;
            stressed.market_risk_factor = shocked(
                exposure,
                "market_risk_factor",
                exposure.market_risk_factor,
                multipliers.market,
            )?;
            stressed.op_risk_factor = shocked(
                exposure,
                "op_risk_factor",
                exposure.op_risk_factor,
                multipliers.operational,
            )?;
            stressed.rwa = None;
            Ok(stressed)
        })
        .collect()
}

fn shocked(
    exposure: &Exposure,
    field: &str,
    value: Decimal,
    multiplier: Decimal,
) -> BaselResult<Decimal> {
    value.checked_mul(multiplier).ok_or_else(|| {
        BaselError::invalid_exposure(
            &exposure.asset_id,
            format!("stressed {} overflows the numeric range", field),
        )
    })
}

/// Case-insensitive key; `_` and `-` count as spaces and runs of whitespace collapse.
fn scenario_key(s: &str) -> String {
    s.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute_rwa;
    use basel_core::{AssetClass, CreditRating, Exposure};
    use rust_decimal::Decimal;

    fn base_portfolio() -> Portfolio {
        let portfolio = Portfolio::new(vec![
            Exposure::new(
                "ASSET1",
                AssetClass::CorporateLoans,
                CreditRating::A,
                dec!(1000000),
                dec!(0.1),
                dec!(0.05),
            ),
            Exposure::new(
                "ASSET2",
                AssetClass::RetailMortgages,
                CreditRating::BB,
                dec!(750000),
                dec!(0.03),
                dec!(0.1),
            ),
        ]);
        compute_rwa(&portfolio).unwrap()
    }

    #[test]
    fn test_scenario_parse() {
        assert_eq!(
            StressScenario::from_str("Severe Recession").unwrap(),
            StressScenario::SevereRecession
        );
        assert_eq!(
            StressScenario::from_str("financial_crisis").unwrap(),
            StressScenario::FinancialCrisis
        );
        assert_eq!(
            StressScenario::from_str("mild-recession").unwrap(),
            StressScenario::MildRecession
        );
        assert_eq!(
            StressScenario::from_str("  MILD   recession ").unwrap(),
            StressScenario::MildRecession
        );
        for name in ["Zombie Apocalypse", "MildRecession", "Mi ld-Recession"] {
            assert!(matches!(
                StressScenario::from_str(name),
                Err(BaselError::UnknownScenario(_))
            ));
        }
    }

    #[test]
    fn test_severe_recession_scales_factors() {
        let result = run_stress_test(
            &base_portfolio(),
            &CapitalInputs::default(),
            "Severe Recession",
        )
        .unwrap();

        let stressed = &result.portfolio.exposures[0];
        assert_eq!(stressed.risk_weight, dec!(0.3));
        assert_eq!(stressed.market_risk_factor, dec!(0.2));
        assert_eq!(stressed.op_risk_factor, dec!(0.065));
        // 1,000,000 * (0.3 + 0.2 + 0.065)
        assert_eq!(stressed.total_rwa(), Some(dec!(565000)));
    }

    #[test]
    fn test_every_scenario_applies_its_multipliers() {
        let base = base_portfolio();
        let inputs = CapitalInputs::default();

        for scenario in StressScenario::all() {
            let m = scenario.multipliers();
            let result = run_stress_test(&base, &inputs, scenario.name()).unwrap();

            for (original, stressed) in base.iter().zip(result.portfolio.iter()) {
                assert_eq!(stressed.risk_weight, original.risk_weight * m.credit);
                assert_eq!(
                    stressed.market_risk_factor,
                    original.market_risk_factor * m.market
                );
                assert_eq!(stressed.op_risk_factor, original.op_risk_factor * m.operational);
                assert_eq!(stressed.probability_of_default, original.probability_of_default);
            }

            assert_eq!(result.inputs.tier1_capital, inputs.tier1_capital);
            assert_eq!(result.inputs.total_capital, inputs.total_capital);
            assert_eq!(result.inputs.hqla, inputs.hqla * m.hqla);
            assert_eq!(
                result.inputs.expected_outflows,
                inputs.expected_outflows * m.outflows
            );
        }
    }

    #[test]
    fn test_stressed_ratios() {
        let result = run_stress_test(
            &base_portfolio(),
            &CapitalInputs::default(),
            "Financial Crisis",
        )
        .unwrap();

        // HQLA 800M * 0.6 / (600M * 2.0)
        assert_eq!(result.ratios.lcr, dec!(40));
        // ASF 1.5B * 0.7 / (1.2B * 1.4)
        assert_eq!(result.ratios.nsfr, dec!(62.5));
        assert_eq!(result.scenario, "Financial Crisis");
    }

    #[test]
    fn test_inputs_not_mutated() {
        let portfolio = base_portfolio();
        let inputs = CapitalInputs::default();
        let portfolio_before = portfolio.clone();
        let inputs_before = inputs;

        let _ = run_stress_test(&portfolio, &inputs, "Financial Crisis").unwrap();

        assert_eq!(portfolio, portfolio_before);
        assert_eq!(inputs, inputs_before);
    }

    #[test]
    fn test_unknown_scenario() {
        let result = run_stress_test(&base_portfolio(), &CapitalInputs::default(), "Boom");
        match result {
            Err(BaselError::UnknownScenario(name)) => assert_eq!(name, "Boom"),
            other => panic!("Expected UnknownScenario, got {:?}", other),
        }
    }

    #[test]
    fn test_stressed_factor_overflow() {
        // Zero amount keeps the baseline RWA at zero; the credit shock overflows the weight.
        let portfolio = Portfolio::new(vec![Exposure::new(
            "EDGE",
            AssetClass::CorporateLoans,
            CreditRating::A,
            Decimal::ZERO,
            dec!(0.1),
            dec!(0.05),
        )
        .with_risk_weight(Decimal::MAX)]);
        assert!(compute_rwa(&portfolio).is_ok());

        match run_stress_test(&portfolio, &CapitalInputs::default(), "Mild Recession") {
            Err(BaselError::InvalidExposure { asset_id, reason }) => {
                assert_eq!(asset_id, "EDGE");
                assert!(reason.contains("risk_weight"));
            }
            other => panic!("Expected InvalidExposure, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_scenario_wins_over_bad_inputs() {
        // Resolution happens before any computation.
        let result = run_stress_test(&Portfolio::default(), &CapitalInputs::default(), "Boom");
        assert!(matches!(result, Err(BaselError::UnknownScenario(_))));
    }

    #[test]
    fn test_custom_scenario() {
        let registry = ScenarioRegistry::with_custom([(
            "Rate Shock",
            ScenarioMultipliers::from_factors([
                dec!(1.1),
                dec!(2.5),
                Decimal::ONE,
                dec!(0.8),
                dec!(1.1),
                Decimal::ONE,
                Decimal::ONE,
            ]),
        )])
        .unwrap();
        let engine = StressEngine::new(registry);

        let result = engine
            .run(&base_portfolio(), &CapitalInputs::default(), "rate shock")
            .unwrap();
        assert_eq!(result.scenario, "Rate Shock");
        assert_eq!(result.portfolio.exposures[0].market_risk_factor, dec!(0.25));

        let names: Vec<String> = engine.registry().list().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "Mild Recession",
                "Severe Recession",
                "Financial Crisis",
                "Rate Shock"
            ]
        );
    }

    #[test]
    fn test_custom_scenario_rejects_collisions_and_negatives() {
        let mut registry = ScenarioRegistry::new();
        assert!(matches!(
            registry.register("severe_recession", ScenarioMultipliers::IDENTITY),
            Err(BaselError::InvalidScenario { .. })
        ));

        let mut factors = ScenarioMultipliers::IDENTITY.factors();
        factors[0] = dec!(-1);
        assert!(registry
            .register("Negative", ScenarioMultipliers::from_factors(factors))
            .is_err());

        registry.register("Flat", ScenarioMultipliers::IDENTITY).unwrap();
        assert!(registry.register("FLAT", ScenarioMultipliers::IDENTITY).is_err());
        assert!(registry.exists("flat"));
    }

    #[test]
    fn test_run_all() {
        let engine = StressEngine::default();
        let results = engine
            .run_all(&base_portfolio(), &CapitalInputs::default())
            .unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].scenario, "Mild Recession");
        assert!(results[2].ratios.tier1_ratio < results[0].ratios.tier1_ratio);
    }
}
