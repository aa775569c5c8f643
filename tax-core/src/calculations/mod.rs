//! Tax calculation logic.
//!
//! Marginal-rate arithmetic over a bracket schedule fetched from a
//! [`TaxBracketProvider`](crate::TaxBracketProvider).

pub mod calculator;
pub mod common;

pub use calculator::{TaxCalculator, TaxCalculatorError};
