//! Capital adequacy and liquidity risk computations.
//!
//! Provides the RWA calculator, the ratio engine, scenario-based stress
//! testing and regulatory-minimum checks.

mod compliance;
mod ratios;
mod rwa;
mod stress;

pub use compliance::{ComplianceReport, RatioCheck, RegulatoryMinimums};
pub use ratios::compute_ratios;
pub use rwa::{compute_rwa, compute_rwa_owned};
pub use stress::{
    run_stress_test, ScenarioInfo, ScenarioRegistry, StressEngine, StressScenario,
    StressTestResult,
};
