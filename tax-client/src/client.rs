use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tax_core::{BracketSourceError, TaxBracket, TaxBracketProvider, TaxBracketResponse};
use tracing::debug;

use crate::retry::{Attempt, RetryPolicy};

/// Upper bound for a single request, independent of the retry loop.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the remote tax bracket API.
///
/// Brackets for `year` are read from `{base_url}/tax-calculator/tax-year/{year}`.
/// The underlying connection pool is shared between clones.
#[derive(Debug, Clone)]
pub struct TaxApiClient {
    base_url: String,
    http: Client,
    retry: RetryPolicy,
}

impl TaxApiClient {
    /// Create a client with the default 30s request timeout and retry policy.
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;
        Ok(Self::with_http_client(base_url, http))
    }

    /// Create a client around an already configured [`reqwest::Client`].
    pub fn with_http_client(
        base_url: impl Into<String>,
        http: Client,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            retry: RetryPolicy::default(),
        }
    }

    /// Replace the retry policy.
    pub fn with_retry_policy(
        mut self,
        retry: RetryPolicy,
    ) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn brackets_url(
        &self,
        year: &str,
    ) -> String {
        format!("{}/tax-calculator/tax-year/{}", self.base_url, year)
    }
}

#[async_trait]
impl TaxBracketProvider for TaxApiClient {
    async fn get_tax_brackets(&self, year: &str) -> Result<Vec<TaxBracket>, BracketSourceError> {
        let url = self.brackets_url(year);
        let http = &self.http;
        let target = url.as_str();

        debug!(url = target, "fetching tax brackets");

        let response = self
            .retry
            .run("fetch tax brackets", || async move {
                match http.get(target).send().await {
                    Ok(response) if response.status().is_success() => Attempt::Success(response),
                    Ok(response) => Attempt::Status(response.status().as_u16()),
                    Err(err) => Attempt::Transport(err.to_string()),
                }
            })
            .await?;

        let body: TaxBracketResponse = response
            .json()
            .await
            .map_err(|e| BracketSourceError::Decode(e.to_string()))?;

        debug!(year, brackets = body.tax_brackets.len(), "fetched tax brackets");

        Ok(body.tax_brackets)
    }
}
