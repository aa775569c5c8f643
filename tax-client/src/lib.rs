//! HTTP-backed [`TaxBracketProvider`](tax_core::TaxBracketProvider).

mod client;
mod retry;

pub use client::{DEFAULT_REQUEST_TIMEOUT, TaxApiClient};
pub use retry::{RetryPolicy, is_retryable_status};
