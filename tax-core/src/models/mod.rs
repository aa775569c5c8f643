mod tax_bracket;
mod tax_calculation;

pub use tax_bracket::{TaxBracket, TaxBracketResponse};
pub use tax_calculation::{TaxBracketDetail, TaxCalculationResponse};
