//! Core data types for capital and liquidity analysis.

mod asset;
mod capital;
mod exposure;
mod portfolio;

pub use asset::{AssetClass, CreditRating};
pub use capital::{CapitalInputs, RatioResult, ScenarioMultipliers};
pub use exposure::{Exposure, RwaBreakdown};
pub use portfolio::Portfolio;
