//! Configuration structures.

use basel_core::{BaselResult, CapitalInputs, ScenarioMultipliers};
use basel_data::GeneratorConfig;
use basel_risk::{RegulatoryMinimums, ScenarioRegistry};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub capital: CapitalInputs,
    #[serde(default)]
    pub generator: GeneratorConfig,
    #[serde(default)]
    pub minimums: RegulatoryMinimums,
    #[serde(default)]
    pub scenarios: Vec<CustomScenario>,
}

impl AppConfig {
    /// Build the scenario registry: built-ins plus configured scenarios.
    pub fn scenario_registry(&self) -> BaselResult<ScenarioRegistry> {
        ScenarioRegistry::with_custom(
            self.scenarios
                .iter()
                .map(|s| (s.name.clone(), s.multipliers())),
        )
    }

    /// Check capital inputs and custom scenarios.
    pub fn validate(&self) -> BaselResult<()> {
        self.capital.validate()?;
        self.scenario_registry()?;
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "basel-dashboard".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// A user-defined stress scenario. Omitted multipliers default to 1 (no shock).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomScenario {
    pub name: String,
    pub credit: Decimal,
    pub market: Decimal,
    pub operational: Decimal,
    pub hqla: Decimal,
    pub outflows: Decimal,
    pub available_stable_funding: Decimal,
    pub required_stable_funding: Decimal,
}

impl Default for CustomScenario {
    fn default() -> Self {
        let m = ScenarioMultipliers::IDENTITY;
        Self {
            name: String::new(),
            credit: m.credit,
            market: m.market,
            operational: m.operational,
            hqla: m.hqla,
            outflows: m.outflows,
            available_stable_funding: m.available_stable_funding,
            required_stable_funding: m.required_stable_funding,
        }
    }
}

impl CustomScenario {
    pub fn multipliers(&self) -> ScenarioMultipliers {
        ScenarioMultipliers::from_factors([
            self.credit,
            self.market,
            self.operational,
            self.hqla,
            self.outflows,
            self.available_stable_funding,
            self.required_stable_funding,
        ])
    }
}
