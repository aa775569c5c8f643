use async_trait::async_trait;
use thiserror::Error;

use crate::models::TaxBracket;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketSourceError {
    #[error("failed to fetch tax brackets after {attempts} attempts: {cause}")]
    Fetch { cause: String, attempts: u32 },

    #[error("tax bracket API returned status {status} after {attempts} attempts")]
    UpstreamStatus { status: u16, attempts: u32 },

    #[error("failed to decode tax bracket response: {0}")]
    Decode(String),
}

/// Source of the ordered bracket schedule for a tax year.
///
/// Implementations are stateless from the caller's point of view and must be
/// safe to share across concurrent calculations.
#[async_trait]
pub trait TaxBracketProvider: Send + Sync {
    async fn get_tax_brackets(&self, year: &str) -> Result<Vec<TaxBracket>, BracketSourceError>;
}
