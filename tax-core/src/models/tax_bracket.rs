use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One marginal-rate band for a tax year.
///
/// Brackets for a year are contiguous and ascending by `min`; the last one
/// has no upper bound (`max` is `None`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
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
}

/// Envelope returned by the tax bracket API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracketResponse {
    pub tax_brackets: Vec<TaxBracket>,
}
