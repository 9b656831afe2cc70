//! Portfolio of exposures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{AssetClass, Exposure};
use crate::error::{BaselError, BaselResult};

/// Ordered collection of exposures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub exposures: Vec<Exposure>,
}

impl Portfolio {
    /// Create a portfolio from exposures.
    pub fn new(exposures: Vec<Exposure>) -> Self {
        Self { exposures }
    }

    /// Number of exposures.
    pub fn len(&self) -> usize {
        self.exposures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exposures.is_empty()
    }

    /// Iterate exposures in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Exposure> {
        self.exposures.iter()
    }

    /// Append an exposure.
    pub fn push(&mut self, exposure: Exposure) {
        self.exposures.push(exposure);
    }

    /// Sum of exposure amounts.
    pub fn total_exposure(&self) -> BaselResult<Decimal> {
        checked_sum(self.exposures.iter().map(|e| e.exposure_amount), "total exposure")
    }

    /// Sum of exposure amounts rated BBB or better.
    pub fn investment_grade_exposure(&self) -> BaselResult<Decimal> {
        checked_sum(
            self.exposures
                .iter()
                .filter(|e| e.internal_rating.is_investment_grade())
                .map(|e| e.exposure_amount),
            "investment grade exposure",
        )
    }

    /// Total RWA per asset class. Exposures without derived RWA are skipped.
    pub fn rwa_by_asset_class(&self) -> BaselResult<BTreeMap<AssetClass, Decimal>> {
        let mut totals = BTreeMap::new();
        for exposure in &self.exposures {
            if let Some(rwa) = exposure.total_rwa() {
                let total = totals.entry(exposure.asset_class).or_insert(Decimal::ZERO);
                *total = checked_sum([*total, rwa], "asset class RWA")?;
            }
        }
        Ok(totals)
    }
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>, what: &str) -> BaselResult<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
        .ok_or_else(|| BaselError::InvalidInput {
            field: "exposure_amount",
            reason: format!("{} overflows the numeric range", what),
        })
}

impl FromIterator<Exposure> for Portfolio {
    fn from_iter<I: IntoIterator<Item = Exposure>>(iter: I) -> Self {
        Self {
            exposures: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Portfolio {
    type Item = Exposure;
    type IntoIter = std::vec::IntoIter<Exposure>;

    fn into_iter(self) -> Self::IntoIter {
        self.exposures.into_iter()
    }
}

impl<'a> IntoIterator for &'a Portfolio {
    type Item = &'a Exposure;
    type IntoIter = std::slice::Iter<'a, Exposure>;

    fn into_iter(self) -> Self::IntoIter {
        self.exposures.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CreditRating;
    use rust_decimal_macros::dec;

    fn exposure(id: &str, class: AssetClass, amount: Decimal) -> Exposure {
        Exposure::new(id, class, CreditRating::BBB, amount, dec!(0.02), dec!(0.08))
    }

    #[test]
    fn test_total_exposure() {
        let portfolio: Portfolio = vec![
            exposure("A1", AssetClass::ConsumerLoans, dec!(100)),
            exposure("A2", AssetClass::SovereignDebt, dec!(250.50)),
        ]
        .into_iter()
        .collect();

        assert_eq!(portfolio.len(), 2);
        assert_eq!(portfolio.total_exposure().unwrap(), dec!(350.50));
    }

    #[test]
    fn test_investment_grade_exposure() {
        let portfolio = Portfolio::new(vec![
            exposure("A1", AssetClass::ConsumerLoans, dec!(100)),
            Exposure::new(
                "A2",
                AssetClass::CorporateLoans,
                CreditRating::BB,
                dec!(400),
                dec!(0.1),
                dec!(0.05),
            ),
        ]);
        assert_eq!(portfolio.investment_grade_exposure().unwrap(), dec!(100));
    }

    #[test]
    fn test_total_exposure_overflow() {
        let portfolio = Portfolio::new(vec![
            exposure("A1", AssetClass::ConsumerLoans, Decimal::MAX),
            exposure("A2", AssetClass::ConsumerLoans, Decimal::MAX),
        ]);
        assert!(matches!(
            portfolio.total_exposure(),
            Err(BaselError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rwa_by_asset_class() {
        let mut portfolio = Portfolio::new(vec![
            exposure("A1", AssetClass::ConsumerLoans, dec!(100)),
            exposure("A2", AssetClass::ConsumerLoans, dec!(200)),
            exposure("A3", AssetClass::SovereignDebt, dec!(1000)),
        ]);
        assert!(portfolio.rwa_by_asset_class().unwrap().is_empty());

        for e in portfolio.exposures.iter_mut() {
            e.rwa = Some(e.rwa_breakdown().unwrap());
        }

        let totals = portfolio.rwa_by_asset_class().unwrap();
        // Consumer: 300 * (0.75 + 0.02 + 0.08)
        assert_eq!(totals[&AssetClass::ConsumerLoans], dec!(255));
        // Sovereign BBB: 1000 * (0.2 + 0.02 + 0.08)
        assert_eq!(totals[&AssetClass::SovereignDebt], dec!(300));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_empty_portfolio() {
        let portfolio = Portfolio::default();
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total_exposure().unwrap(), Decimal::ZERO);
    }
}
