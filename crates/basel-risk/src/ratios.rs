//! Capital and liquidity ratio engine.

use basel_core::{BaselError, BaselResult, CapitalInputs, Portfolio, RatioResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Compute Tier 1, total capital, LCR and NSFR ratios.
///
/// The portfolio must already carry derived RWA (see [`crate::compute_rwa`])
/// that still matches each exposure's fields. A zero total RWA, expected
/// outflows or required stable funding is reported as
/// [`BaselError::DivisionByZero`].
pub fn compute_ratios(portfolio: &Portfolio, inputs: &CapitalInputs) -> BaselResult<RatioResult> {
    inputs.validate()?;

    let mut total_rwa = Decimal::ZERO;
    for exposure in portfolio.iter() {
        exposure.validate()?;
        let rwa = exposure.verify_rwa()?;
        total_rwa = total_rwa.checked_add(rwa).ok_or_else(|| {
            BaselError::invalid_exposure(
                &exposure.asset_id,
                "portfolio RWA overflows the numeric range",
            )
        })?;
    }

    let tier1_ratio = percent(inputs.tier1_capital, total_rwa, "tier1_ratio", "total_rwa")?;
    let total_capital_ratio = percent(
        inputs.total_capital,
        total_rwa,
        "total_capital_ratio",
        "total_rwa",
    )?;
    let lcr = percent(inputs.hqla, inputs.expected_outflows, "lcr", "expected_outflows")?;
    let nsfr = percent(
        inputs.available_stable_funding,
        inputs.required_stable_funding,
        "nsfr",
        "required_stable_funding",
    )?;

    debug!(
        %total_rwa,
        %tier1_ratio,
        %total_capital_ratio,
        %lcr,
        %nsfr,
        "Computed ratios"
    );

    Ok(RatioResult {
        tier1_ratio,
        total_capital_ratio,
        lcr,
        nsfr,
        total_rwa,
    })
}

/// numerator / denominator * 100
fn percent(
    numerator: Decimal,
    denominator: Decimal,
    ratio: &'static str,
    denominator_name: &'static str,
) -> BaselResult<Decimal> {
    if denominator.is_zero() {
        return Err(BaselError::DivisionByZero {
            ratio,
            denominator: denominator_name,
        });
    }

    numerator
        .checked_div(denominator)
        .and_then(|q| q.checked_mul(dec!(100)))
        .ok_or_else(|| BaselError::InvalidInput {
            field: denominator_name,
            reason: format!("{} overflows the numeric range", ratio),
        })
}
