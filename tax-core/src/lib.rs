pub mod calculations;
pub mod models;
pub mod provider;

pub use calculations::{TaxCalculator, TaxCalculatorError};
pub use models::*;
pub use provider::{BracketSourceError, TaxBracketProvider};
