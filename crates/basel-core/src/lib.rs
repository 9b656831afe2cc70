//! Core types for Basel III capital and liquidity analysis.
//!
//! This crate provides the foundational building blocks including:
//! - Asset classes and internal credit ratings, with the fixed PD and
//!   risk-weight tables
//! - Exposure records and portfolios
//! - Capital/liquidity inputs and ratio results
//! - The error taxonomy shared by every other crate

pub mod error;
pub mod types;

pub use error::{BaselError, BaselResult, DataError};
pub use types::*;
