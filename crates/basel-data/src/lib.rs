//! Portfolio sources for the capital engine.

mod csv_source;
mod synthetic;

pub use csv_source::{read_portfolio, write_portfolio, CsvPortfolioSource};
pub use synthetic::{GeneratorConfig, SyntheticPortfolioGenerator, RATING_WEIGHTS};

use basel_core::{BaselResult, Portfolio};

/// Generate a synthetic portfolio of `size` exposures.
pub fn generate_portfolio(size: usize, seed: Option<u64>) -> BaselResult<Portfolio> {
    let config = GeneratorConfig {
        size,
        seed,
        ..Default::default()
    };
    SyntheticPortfolioGenerator::new(config).generate()
}
