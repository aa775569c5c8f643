use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TaxBracket;

/// Tax owed within a single bracket for one calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracketDetail {
    #[serde(with = "rust_decimal::serde::float")]
    pub min: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount_taxable: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_payable: Decimal,
}

impl TaxBracketDetail {
    pub fn new(
        bracket: &TaxBracket,
        amount_taxable: Decimal,
    ) -> Self {
        Self {
            min: bracket.min,
            max: bracket.max,
            rate: bracket.rate,
            amount_taxable,
            tax_payable: amount_taxable * bracket.rate,
        }
    }
}

/// Result of a tax calculation.
///
/// `total_tax` is rounded to the cent; `effective_rate` keeps full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculationResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub effective_rate: Decimal,
    pub tax_by_bracket: Vec<TaxBracketDetail>,
}
