//! Synthetic portfolio generator.

use basel_core::{AssetClass, BaselResult, CreditRating, DataError, Exposure, Portfolio};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statrs::distribution::LogNormal;
use tracing::debug;

/// Sampling weights for [`CreditRating::all`], best rating first.
pub const RATING_WEIGHTS: [f64; 7] = [0.05, 0.10, 0.20, 0.30, 0.20, 0.10, 0.05];

/// Generator settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of exposures
    pub size: usize,
    /// RNG seed; random when absent
    pub seed: Option<u64>,
    /// Median exposure amount (log-normal location is ln of this)
    pub mean_exposure: f64,
    /// Log-normal scale
    pub exposure_sigma: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            size: 150,
            seed: None,
            mean_exposure: 1_000_000.0,
            exposure_sigma: 1.0,
        }
    }
}

/// Draws random exposures with table-derived PD and risk weights.
pub struct SyntheticPortfolioGenerator {
    config: GeneratorConfig,
}

impl SyntheticPortfolioGenerator {
    /// Create a new generator.
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate a portfolio.
    pub fn generate(&self) -> BaselResult<Portfolio> {
        if self.config.size == 0 {
            return Err(DataError::Generation("size must be positive".to_string()).into());
        }
        if !self.config.mean_exposure.is_finite() || self.config.mean_exposure <= 0.0 {
            return Err(DataError::Generation(format!(
                "mean_exposure must be positive, got {}",
                self.config.mean_exposure
            ))
            .into());
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let amounts = LogNormal::new(self.config.mean_exposure.ln(), self.config.exposure_sigma)
            .map_err(|e| DataError::Generation(e.to_string()))?;
        let ratings =
            WeightedIndex::new(RATING_WEIGHTS).map_err(|e| DataError::Generation(e.to_string()))?;

        let classes = AssetClass::all();
        let mut exposures = Vec::with_capacity(self.config.size);

        for i in 1..=self.config.size {
            let asset_class = classes[rng.gen_range(0..classes.len())];
            let rating = CreditRating::all()[ratings.sample(&mut rng)];
            let amount = to_decimal(amounts.sample(&mut rng), 2)?;

            let market_range = match asset_class {
                AssetClass::SovereignDebt | AssetClass::CorporateLoans => 0.05..0.15,
                _ => 0.01..0.05,
            };
            let op_range = match asset_class {
                AssetClass::RetailMortgages | AssetClass::ConsumerLoans => 0.08..0.12,
                _ => 0.05..0.10,
            };
            let market = to_decimal(rng.gen_range(market_range), 4)?;
            let op = to_decimal(rng.gen_range(op_range), 4)?;

            exposures.push(Exposure::new(
                format!("ASSET{}", i),
                asset_class,
                rating,
                amount,
                market,
                op,
            ));
        }

        debug!(
            size = exposures.len(),
            seed = ?self.config.seed,
            "Generated synthetic portfolio"
        );

        Ok(Portfolio::new(exposures))
    }
}

fn to_decimal(value: f64, dp: u32) -> BaselResult<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(dp))
        .ok_or_else(|| DataError::Generation(format!("value out of range: {}", value)).into())
}
