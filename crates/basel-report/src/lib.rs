//! Risk dashboard reporting and logging setup.

mod logging;
mod report;

pub use logging::setup_logging;
pub use report::{RiskReport, ScenarioSummary};
