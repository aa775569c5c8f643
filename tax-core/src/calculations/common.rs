//! Rounding helpers shared by the calculations.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to the nearest cent, with midpoints rounded away
/// from zero.
///
/// # Arguments
///
/// * `value` - The monetary amount to round
///
/// # Returns
///
/// The amount rounded to two decimal places, so `x.xx5` becomes `x.x(x+1)`
/// rather than the nearest even cent.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::common::round_to_cents;
///
/// assert_eq!(round_to_cents(dec!(17739.165)), dec!(17739.17));
/// assert_eq!(round_to_cents(dec!(385587.645)), dec!(385587.65));
/// assert_eq!(round_to_cents(dec!(7500.004)), dec!(7500.00));
/// ```
pub fn round_to_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
