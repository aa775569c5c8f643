//! Progressive income tax over a bracket schedule.
//!
//! Each bracket taxes only the part of the income that falls inside its band.
//! Brackets are walked in ascending order and the walk stops at the first
//! bracket whose lower bound is at or above the income, so brackets the
//! income never reaches do not appear in the breakdown.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use async_trait::async_trait;
//! use rust_decimal_macros::dec;
//! use tax_core::{BracketSourceError, TaxBracket, TaxBracketProvider, TaxCalculator};
//!
//! struct Flat;
//!
//! #[async_trait]
//! impl TaxBracketProvider for Flat {
//!     async fn get_tax_brackets(&self, _year: &str) -> Result<Vec<TaxBracket>, BracketSourceError> {
//!         Ok(vec![
//!             TaxBracket { min: dec!(0), max: Some(dec!(50197)), rate: dec!(0.15) },
//!             TaxBracket { min: dec!(50197), max: None, rate: dec!(0.205) },
//!         ])
//!     }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let calculator = TaxCalculator::new(Arc::new(Flat));
//! let result = calculator.calculate_tax(dec!(50000), "2022").await.unwrap();
//!
//! assert_eq!(result.total_tax, dec!(7500.00));
//! assert_eq!(result.effective_rate, dec!(0.15));
//! assert_eq!(result.tax_by_bracket.len(), 1);
//! # }
//! ```

use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_to_cents;
use crate::models::{TaxBracket, TaxBracketDetail, TaxCalculationResponse};
use crate::provider::{BracketSourceError, TaxBracketProvider};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxCalculatorError {
    /// Income below zero; rejected before any bracket fetch.
    #[error("income cannot be negative: {0}")]
    InvalidIncome(Decimal),

    #[error(transparent)]
    Upstream(#[from] BracketSourceError),
}

/// Calculates marginal income tax using brackets from an injected provider.
#[derive(Clone)]
pub struct TaxCalculator {
    provider: Arc<dyn TaxBracketProvider>,
}

impl TaxCalculator {
    pub fn new(provider: Arc<dyn TaxBracketProvider>) -> Self {
        Self { provider }
    }

    /// Calculates the tax owed on `income` for the given tax `year`.
    ///
    /// Brackets are fetched fresh on every call. The total is rounded to the
    /// cent; the effective rate is derived from the unrounded total and is
    /// returned at full precision.
    ///
    /// # Errors
    ///
    /// * [`TaxCalculatorError::InvalidIncome`] if `income` is negative.
    /// * [`TaxCalculatorError::Upstream`] if the provider fails.
    pub async fn calculate_tax(
        &self,
        income: Decimal,
        year: &str,
    ) -> Result<TaxCalculationResponse, TaxCalculatorError> {
        if income < Decimal::ZERO {
            return Err(TaxCalculatorError::InvalidIncome(income));
        }

        let brackets = self.provider.get_tax_brackets(year).await?;

        let (total_tax, tax_by_bracket) = apply_brackets(income, &brackets);

        let effective_rate = if income > Decimal::ZERO {
            total_tax / income
        } else {
            Decimal::ZERO
        };

        debug!(
            year,
            %income,
            brackets = brackets.len(),
            %total_tax,
            "calculated tax"
        );

        Ok(TaxCalculationResponse {
            total_tax: round_to_cents(total_tax),
            effective_rate,
            tax_by_bracket,
        })
    }
}

/// Walks the brackets in order and returns the unrounded total together with
/// the per-bracket breakdown.
fn apply_brackets(
    income: Decimal,
    brackets: &[TaxBracket],
) -> (Decimal, Vec<TaxBracketDetail>) {
    let mut total_tax = Decimal::ZERO;
    let mut tax_by_bracket = Vec::new();

    for bracket in brackets {
        if income <= bracket.min {
            break;
        }

        let detail = TaxBracketDetail::new(bracket, taxable_amount(income, bracket));
        total_tax += detail.tax_payable;
        tax_by_bracket.push(detail);
    }

    (total_tax, tax_by_bracket)
}

/// Portion of `income` that falls inside `bracket`.
fn taxable_amount(
    income: Decimal,
    bracket: &TaxBracket,
) -> Decimal {
    match bracket.max {
        Some(max) if income > max => max - bracket.min,
        _ => income - bracket.min,
    }
}
