//! CSV portfolio source.

use basel_core::{
    AssetClass, BaselError, BaselResult, CreditRating, DataError, Exposure, Portfolio,
};
use csv::{ReaderBuilder, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// CSV record format. Numbers stay as text so parse failures can name the field.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "AssetID", alias = "asset", alias = "id")]
    asset_id: String,
    #[serde(alias = "AssetClass", alias = "class")]
    asset_class: String,
    #[serde(alias = "rating", alias = "Rating")]
    internal_rating: String,
    #[serde(alias = "amount", alias = "exposure")]
    exposure_amount: String,
    #[serde(default)]
    risk_weight: Option<String>,
    market_risk_factor: String,
    op_risk_factor: String,
}

/// Row written by [`write_portfolio`].
#[derive(Debug, Serialize)]
struct OutputRecord<'a> {
    asset_id: &'a str,
    asset_class: &'static str,
    internal_rating: &'static str,
    exposure_amount: Decimal,
    probability_of_default: Decimal,
    risk_weight: Decimal,
    market_risk_factor: Decimal,
    op_risk_factor: Decimal,
    credit_rwa: Option<Decimal>,
    market_rwa: Option<Decimal>,
    op_rwa: Option<Decimal>,
    total_rwa: Option<Decimal>,
}

/// CSV file containing one exposure per row.
pub struct CsvPortfolioSource {
    path: PathBuf,
}

impl CsvPortfolioSource {
    /// Create a new CSV source.
    pub fn new(path: impl AsRef<Path>) -> BaselResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::FileNotFound(path.display().to_string()).into());
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Load the portfolio.
    pub fn load(&self) -> BaselResult<Portfolio> {
        let file = File::open(&self.path).map_err(|e| DataError::Csv(e.to_string()))?;
        let portfolio = read_portfolio(file)?;
        info!(path = %self.path.display(), exposures = portfolio.len(), "Loaded portfolio");
        Ok(portfolio)
    }

    /// Write a portfolio to a CSV file.
    pub fn save(portfolio: &Portfolio, path: impl AsRef<Path>) -> BaselResult<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|e| DataError::Csv(e.to_string()))?;
        write_portfolio(portfolio, file)?;
        info!(path = %path.display(), exposures = portfolio.len(), "Saved portfolio");
        Ok(())
    }
}

/// Read a portfolio from any CSV reader with a header row.
pub fn read_portfolio<R: Read>(reader: R) -> BaselResult<Portfolio> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut seen = HashSet::new();
    let mut portfolio = Portfolio::default();

    for (index, result) in reader.deserialize().enumerate() {
        // Header is line 1.
        let row = index + 2;
        let record: CsvRecord = result.map_err(|e| DataError::Parse {
            row,
            reason: e.to_string(),
        })?;

        let exposure = parse_record(record, row)?;
        if !seen.insert(exposure.asset_id.clone()) {
            return Err(BaselError::invalid_exposure(
                &exposure.asset_id,
                format!("duplicate asset_id at row {}", row),
            ));
        }
        portfolio.push(exposure);
    }

    debug!(exposures = portfolio.len(), "Parsed CSV portfolio");
    Ok(portfolio)
}

/// Write a portfolio, including derived RWA columns when present.
pub fn write_portfolio<W: Write>(portfolio: &Portfolio, writer: W) -> BaselResult<()> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    for e in portfolio.iter() {
        writer
            .serialize(OutputRecord {
                asset_id: &e.asset_id,
                asset_class: e.asset_class.name(),
                internal_rating: e.internal_rating.symbol(),
                exposure_amount: e.exposure_amount,
                probability_of_default: e.probability_of_default,
                risk_weight: e.risk_weight,
                market_risk_factor: e.market_risk_factor,
                op_risk_factor: e.op_risk_factor,
                credit_rwa: e.rwa.map(|r| r.credit_rwa),
                market_rwa: e.rwa.map(|r| r.market_rwa),
                op_rwa: e.rwa.map(|r| r.op_rwa),
                total_rwa: e.rwa.map(|r| r.total_rwa),
            })
            .map_err(|err| DataError::Csv(err.to_string()))?;
    }

    writer.flush().map_err(|e| DataError::Csv(e.to_string()))?;
    Ok(())
}

fn parse_record(record: CsvRecord, row: usize) -> BaselResult<Exposure> {
    let asset_id = if record.asset_id.is_empty() {
        format!("<row {}>", row)
    } else {
        record.asset_id
    };

    let asset_class = AssetClass::from_str(&record.asset_class)
        .map_err(|reason| BaselError::invalid_exposure(&asset_id, reason))?;
    let rating = CreditRating::from_str(&record.internal_rating)
        .map_err(|reason| BaselError::invalid_exposure(&asset_id, reason))?;

    let amount = parse_decimal(&asset_id, "exposure_amount", &record.exposure_amount)?;
    let market = parse_decimal(&asset_id, "market_risk_factor", &record.market_risk_factor)?;
    let op = parse_decimal(&asset_id, "op_risk_factor", &record.op_risk_factor)?;

    let mut exposure = Exposure::new(asset_id, asset_class, rating, amount, market, op);

    if let Some(weight) = record.risk_weight.filter(|w| !w.is_empty()) {
        let weight = parse_decimal(&exposure.asset_id, "risk_weight", &weight)?;
        exposure = exposure.with_risk_weight(weight);
    }

    exposure.validate()?;
    Ok(exposure)
}

fn parse_decimal(asset_id: &str, field: &str, value: &str) -> BaselResult<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .map_err(|_| {
            BaselError::invalid_exposure(
                asset_id,
                format!("{} is not a number: '{}'", field, value),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const HEADER: &str =
        "asset_id,asset_class,internal_rating,exposure_amount,market_risk_factor,op_risk_factor";

    const SAMPLE: &str = "\
asset_id,asset_class,internal_rating,exposure_amount,risk_weight,market_risk_factor,op_risk_factor
ASSET1,Sovereign Debt,BB,1000000.00,,0.1,0.05
ASSET2,Corporate Loans,A,250000.50,0.8,0.12,0.07
ASSET3,retail_mortgages,bbb,1.5e5,,0.02,0.09
";

    #[test]
    fn test_read_portfolio() {
        let portfolio = read_portfolio(SAMPLE.as_bytes()).unwrap();
        assert_eq!(portfolio.len(), 3);

        let sovereign = &portfolio.exposures[0];
        assert_eq!(sovereign.asset_class, AssetClass::SovereignDebt);
        assert_eq!(sovereign.risk_weight, dec!(0.5));
        assert_eq!(sovereign.probability_of_default, dec!(0.01));

        let corporate = &portfolio.exposures[1];
        assert_eq!(corporate.risk_weight, dec!(0.8));
        assert_eq!(corporate.exposure_amount, dec!(250000.50));

        let mortgage = &portfolio.exposures[2];
        assert_eq!(mortgage.exposure_amount, dec!(150000));
        assert_eq!(mortgage.risk_weight, dec!(0.35));
    }

    #[test]
    fn test_unknown_asset_class_names_asset() {
        let csv = format!("{}\nX9,Crypto,AA,100,0.1,0.1\n", HEADER);
        match read_portfolio(csv.as_bytes()) {
            Err(BaselError::InvalidExposure { asset_id, reason }) => {
                assert_eq!(asset_id, "X9");
                assert!(reason.contains("Crypto"));
            }
            other => panic!("Expected InvalidExposure, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_amount_rejected() {
        let csv = format!("{}\nN1,Consumer Loans,B,-5,0.1,0.1\n", HEADER);
        assert!(matches!(
            read_portfolio(csv.as_bytes()),
            Err(BaselError::InvalidExposure { .. })
        ));
    }

    #[test]
    fn test_bad_number_rejected() {
        let csv = format!("{}\nN1,Consumer Loans,B,lots,0.1,0.1\n", HEADER);
        match read_portfolio(csv.as_bytes()) {
            Err(BaselError::InvalidExposure { reason, .. }) => {
                assert!(reason.contains("exposure_amount"))
            }
            other => panic!("Expected InvalidExposure, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let csv = format!(
            "{}\nD1,Consumer Loans,B,5,0.1,0.1\nD1,Consumer Loans,A,6,0.1,0.1\n",
            HEADER
        );
        assert!(matches!(
            read_portfolio(csv.as_bytes()),
            Err(BaselError::InvalidExposure { ref asset_id, .. }) if asset_id == "D1"
        ));
    }

    #[test]
    fn test_write_then_read_preserves_inputs() {
        let mut portfolio = read_portfolio(SAMPLE.as_bytes()).unwrap();
        for e in portfolio.exposures.iter_mut() {
            e.rwa = Some(e.rwa_breakdown().unwrap());
        }

        let mut buffer = Vec::new();
        write_portfolio(&portfolio, &mut buffer).unwrap();
        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("asset_id,asset_class,internal_rating,exposure_amount"));
        assert!(text.contains("total_rwa"));

        let reloaded = read_portfolio(buffer.as_slice()).unwrap();
        assert_eq!(reloaded.len(), portfolio.len());
        for (a, b) in portfolio.iter().zip(reloaded.iter()) {
            assert_eq!(a.asset_id, b.asset_id);
            assert_eq!(a.risk_weight, b.risk_weight);
            assert_eq!(a.exposure_amount, b.exposure_amount);
            assert!(b.rwa.is_none());
        }
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CsvPortfolioSource::new("/definitely/not/here.csv"),
            Err(BaselError::Data(DataError::FileNotFound(_)))
        ));
    }
}
