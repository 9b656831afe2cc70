//! Risk-weighted asset calculator.

use basel_core::{BaselResult, Portfolio};
use tracing::debug;

/// Populate the derived RWA fields on a copy of the portfolio.
///
/// Every exposure is validated first; a single bad exposure rejects the whole
/// portfolio, as does an amount whose RWA leaves the `Decimal` range.
/// Recomputing an already-populated portfolio overwrites the derived fields
/// with identical values.
pub fn compute_rwa(portfolio: &Portfolio) -> BaselResult<Portfolio> {
    compute_rwa_owned(portfolio.clone())
}

/// Same as [`compute_rwa`] but reuses the given portfolio's storage.
pub fn compute_rwa_owned(mut portfolio: Portfolio) -> BaselResult<Portfolio> {
    let breakdowns = portfolio
        .iter()
        .map(|exposure| {
            exposure.validate()?;
            exposure.rwa_breakdown()
        })
        .collect::<BaselResult<Vec<_>>>()?;

    for (exposure, breakdown) in portfolio.exposures.iter_mut().zip(breakdowns) {
        exposure.rwa = Some(breakdown);
    }

    debug!(exposures = portfolio.len(), "Computed RWA");
    Ok(portfolio)
}
