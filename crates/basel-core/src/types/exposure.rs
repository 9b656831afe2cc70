//! Exposure records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AssetClass, CreditRating};
use crate::error::{BaselError, BaselResult};

/// Risk-weighted amounts derived from an exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RwaBreakdown {
    /// exposure_amount * risk_weight
    pub credit_rwa: Decimal,
    /// exposure_amount * market_risk_factor
    pub market_rwa: Decimal,
    /// exposure_amount * op_risk_factor
    pub op_rwa: Decimal,
    /// credit + market + operational
    pub total_rwa: Decimal,
}

/// A single asset exposure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exposure {
    /// Unique asset identifier
    pub asset_id: String,
    /// Asset class
    pub asset_class: AssetClass,
    /// Internal credit rating
    pub internal_rating: CreditRating,
    /// Exposure amount (monetary)
    pub exposure_amount: Decimal,
    /// Probability of default, mapped from the rating
    pub probability_of_default: Decimal,
    /// Credit risk weight (fraction)
    pub risk_weight: Decimal,
    /// Market risk factor (fraction)
    pub market_risk_factor: Decimal,
    /// Operational risk factor (fraction)
    pub op_risk_factor: Decimal,
    /// Derived RWA, populated by the RWA calculator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rwa: Option<RwaBreakdown>,
}

impl Exposure {
    /// Create an exposure, deriving PD and risk weight from the rating tables.
    pub fn new(
        asset_id: impl Into<String>,
        asset_class: AssetClass,
        internal_rating: CreditRating,
        exposure_amount: Decimal,
        market_risk_factor: Decimal,
        op_risk_factor: Decimal,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            asset_class,
            internal_rating,
            exposure_amount,
            probability_of_default: internal_rating.probability_of_default(),
            risk_weight: asset_class.risk_weight(internal_rating),
            market_risk_factor,
            op_risk_factor,
            rwa: None,
        }
    }

    /// Override the table risk weight.
    pub fn with_risk_weight(mut self, risk_weight: Decimal) -> Self {
        self.risk_weight = risk_weight;
        self.rwa = None;
        self
    }

    /// Check that every numeric field is in domain.
    pub fn validate(&self) -> BaselResult<()> {
        if self.asset_id.trim().is_empty() {
            return Err(BaselError::invalid_exposure(
                "<unnamed>",
                "asset_id must not be empty",
            ));
        }

        let fields = [
            ("exposure_amount", self.exposure_amount),
            ("risk_weight", self.risk_weight),
            ("market_risk_factor", self.market_risk_factor),
            ("op_risk_factor", self.op_risk_factor),
        ];

        for (name, value) in fields {
            if value < Decimal::ZERO {
                return Err(BaselError::invalid_exposure(
                    &self.asset_id,
                    format!("{} is negative ({})", name, value),
                ));
            }
        }

        Ok(())
    }

    /// Compute the derived RWA amounts from the current fields.
    ///
    /// Fails with [`BaselError::InvalidExposure`] when a product or the total
    /// leaves the `Decimal` range.
    pub fn rwa_breakdown(&self) -> BaselResult<RwaBreakdown> {
        let credit_rwa = self.scaled("credit RWA", self.risk_weight)?;
        let market_rwa = self.scaled("market RWA", self.market_risk_factor)?;
        let op_rwa = self.scaled("operational RWA", self.op_risk_factor)?;
        let total_rwa = credit_rwa
            .checked_add(market_rwa)
            .and_then(|sum| sum.checked_add(op_rwa))
            .ok_or_else(|| self.overflow("total RWA"))?;

        Ok(RwaBreakdown {
            credit_rwa,
            market_rwa,
            op_rwa,
            total_rwa,
        })
    }

    /// Check that the cached RWA matches the current fields.
    pub fn verify_rwa(&self) -> BaselResult<Decimal> {
        let cached = self.rwa.ok_or_else(|| {
            BaselError::invalid_exposure(&self.asset_id, "RWA has not been computed")
        })?;
        if cached != self.rwa_breakdown()? {
            return Err(BaselError::invalid_exposure(
                &self.asset_id,
                "RWA is stale; fields changed since it was computed",
            ));
        }
        Ok(cached.total_rwa)
    }

    fn scaled(&self, what: &str, factor: Decimal) -> BaselResult<Decimal> {
        self.exposure_amount
            .checked_mul(factor)
            .ok_or_else(|| self.overflow(what))
    }

    fn overflow(&self, what: &str) -> BaselError {
        BaselError::invalid_exposure(
            &self.asset_id,
            format!("{} overflows the numeric range", what),
        )
    }

    /// Total RWA if it has been computed.
    pub fn total_rwa(&self) -> Option<Decimal> {
        self.rwa.map(|r| r.total_rwa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn corporate(amount: Decimal) -> Exposure {
        Exposure::new(
            "ASSET1",
            AssetClass::CorporateLoans,
            CreditRating::A,
            amount,
            dec!(0.1),
            dec!(0.05),
        )
    }

    #[test]
    fn test_new_derives_tables() {
        let exposure = Exposure::new(
            "ASSET2",
            AssetClass::SovereignDebt,
            CreditRating::BB,
            dec!(500000),
            dec!(0.1),
            dec!(0.06),
        );
        assert_eq!(exposure.risk_weight, dec!(0.5));
        assert_eq!(exposure.probability_of_default, dec!(0.01));
        assert!(exposure.rwa.is_none());
    }

    #[test]
    fn test_rwa_breakdown() {
        let breakdown = corporate(dec!(1000000)).rwa_breakdown().unwrap();
        assert_eq!(breakdown.credit_rwa, dec!(200000));
        assert_eq!(breakdown.market_rwa, dec!(100000));
        assert_eq!(breakdown.op_rwa, dec!(50000));
        assert_eq!(breakdown.total_rwa, dec!(350000));
    }

    #[test]
    fn test_validate_rejects_negative_fields() {
        assert!(corporate(dec!(100)).validate().is_ok());
        assert!(corporate(dec!(0)).validate().is_ok());

        let err = corporate(dec!(-1)).validate().unwrap_err();
        assert!(err.to_string().contains("ASSET1"));
        assert!(err.to_string().contains("exposure_amount"));

        let err = corporate(dec!(100))
            .with_risk_weight(dec!(-0.2))
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("risk_weight"));
    }

    #[test]
    fn test_validate_rejects_empty_id() {
        let mut exposure = corporate(dec!(100));
        exposure.asset_id = "  ".to_string();
        assert!(matches!(
            exposure.validate(),
            Err(BaselError::InvalidExposure { .. })
        ));
    }

    #[test]
    fn test_with_risk_weight_clears_rwa() {
        let mut exposure = corporate(dec!(100));
        exposure.rwa = Some(exposure.rwa_breakdown().unwrap());
        let exposure = exposure.with_risk_weight(dec!(1.0));
        assert!(exposure.rwa.is_none());
        assert_eq!(exposure.risk_weight, dec!(1.0));
    }

    #[test]
    fn test_rwa_breakdown_overflow() {
        let exposure = Exposure::new(
            "BIG",
            AssetClass::CorporateLoans,
            CreditRating::CCC,
            Decimal::MAX,
            dec!(0.1),
            dec!(0.05),
        );
        match exposure.rwa_breakdown() {
            Err(BaselError::InvalidExposure { asset_id, reason }) => {
                assert_eq!(asset_id, "BIG");
                assert!(reason.contains("credit RWA"));
            }
            other => panic!("Expected InvalidExposure, got {:?}", other),
        }

        // Each product fits; their sum does not.
        let exposure = corporate(Decimal::MAX).with_risk_weight(dec!(0.9));
        let err = exposure.rwa_breakdown().unwrap_err();
        assert!(err.to_string().contains("total RWA"));
    }

    #[test]
    fn test_verify_rwa() {
        let mut exposure = corporate(dec!(1000000));
        assert!(exposure.verify_rwa().is_err());

        exposure.rwa = Some(exposure.rwa_breakdown().unwrap());
        assert_eq!(exposure.verify_rwa().unwrap(), dec!(350000));

        exposure.market_risk_factor = dec!(0.2);
        let err = exposure.verify_rwa().unwrap_err();
        assert!(err.to_string().contains("stale"));
    }
}
