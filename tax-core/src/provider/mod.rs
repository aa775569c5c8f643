pub mod bracket_provider;

pub use bracket_provider::{BracketSourceError, TaxBracketProvider};
