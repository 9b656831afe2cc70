//! Asset classes, internal ratings and the fixed lookup tables keyed on them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Asset class of an exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetClass {
    #[serde(rename = "Corporate Loans")]
    CorporateLoans,
    #[serde(rename = "Retail Mortgages")]
    RetailMortgages,
    #[serde(rename = "Sovereign Debt")]
    SovereignDebt,
    #[serde(rename = "Commercial Real Estate")]
    CommercialRealEstate,
    #[serde(rename = "Consumer Loans")]
    ConsumerLoans,
}

impl AssetClass {
    /// Get all asset classes.
    pub fn all() -> &'static [AssetClass] {
        &[
            AssetClass::CorporateLoans,
            AssetClass::RetailMortgages,
            AssetClass::SovereignDebt,
            AssetClass::CommercialRealEstate,
            AssetClass::ConsumerLoans,
        ]
    }

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            AssetClass::CorporateLoans => "Corporate Loans",
            AssetClass::RetailMortgages => "Retail Mortgages",
            AssetClass::SovereignDebt => "Sovereign Debt",
            AssetClass::CommercialRealEstate => "Commercial Real Estate",
            AssetClass::ConsumerLoans => "Consumer Loans",
        }
    }

    /// Credit risk weight for an exposure of this class with the given rating.
    pub fn risk_weight(&self, rating: CreditRating) -> Decimal {
        use CreditRating::*;

        match (self, rating) {
            (AssetClass::SovereignDebt, AAA | AA | A) => dec!(0.0),
            (AssetClass::SovereignDebt, BBB) => dec!(0.2),
            (AssetClass::SovereignDebt, BB | B | CCC) => dec!(0.5),
            (AssetClass::RetailMortgages, _) => dec!(0.35),
            (AssetClass::ConsumerLoans, _) => dec!(0.75),
            (AssetClass::CorporateLoans, AAA | AA | A) => dec!(0.2),
            (AssetClass::CorporateLoans, BBB) => dec!(0.5),
            (AssetClass::CorporateLoans, BB) => dec!(1.0),
            (AssetClass::CorporateLoans, B | CCC) => dec!(1.5),
            (AssetClass::CommercialRealEstate, _) => dec!(1.0),
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        AssetClass::all()
            .iter()
            .copied()
            .find(|class| normalize(class.name()) == normalized)
            .ok_or_else(|| format!("Unknown asset class: {}", s))
    }
}

/// Internal credit rating, best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CreditRating {
    AAA,
    AA,
    A,
    BBB,
    BB,
    B,
    CCC,
}

impl CreditRating {
    /// Get all ratings, best first.
    pub fn all() -> &'static [CreditRating] {
        &[
            CreditRating::AAA,
            CreditRating::AA,
            CreditRating::A,
            CreditRating::BBB,
            CreditRating::BB,
            CreditRating::B,
            CreditRating::CCC,
        ]
    }

    /// Rating symbol.
    pub fn symbol(&self) -> &'static str {
        match self {
            CreditRating::AAA => "AAA",
            CreditRating::AA => "AA",
            CreditRating::A => "A",
            CreditRating::BBB => "BBB",
            CreditRating::BB => "BB",
            CreditRating::B => "B",
            CreditRating::CCC => "CCC",
        }
    }

    /// Probability of default mapped from the rating.
    pub fn probability_of_default(&self) -> Decimal {
        match self {
            CreditRating::AAA => dec!(0.0001),
            CreditRating::AA => dec!(0.0005),
            CreditRating::A => dec!(0.001),
            CreditRating::BBB => dec!(0.003),
            CreditRating::BB => dec!(0.01),
            CreditRating::B => dec!(0.05),
            CreditRating::CCC => dec!(0.15),
        }
    }

    /// Check if the rating is investment grade (BBB or better).
    pub fn is_investment_grade(&self) -> bool {
        *self <= CreditRating::BBB
    }
}

impl fmt::Display for CreditRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CreditRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        CreditRating::all()
            .iter()
            .copied()
            .find(|rating| rating.symbol() == upper)
            .ok_or_else(|| format!("Unknown credit rating: {}", s))
    }
}

/// Lowercase and fold `_`/`-` into spaces so "corporate_loans" matches "Corporate Loans".
fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect::<String>()
        .to_lowercase()
}
