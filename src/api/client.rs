//! The reqwest-backed implementation of [`FinanceApi`].

use crate::api::FinanceApi;
use crate::model::{AssetsResponse, PlaidAccountsResponse, TransactionQuery, TransactionsResponse};
use crate::{Config, Result};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// An authenticated HTTP client for the Lunch Money API. One instance is
/// created per program run; each request is attempted exactly once.
pub struct LunchClient {
    http: reqwest::Client,
    base_url: Url,
    authorization: String,
}

impl LunchClient {
    pub fn new(config: &Config, credential: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url().clone(),
            authorization: authorization_value(credential),
        }
    }

    async fn get_json<T>(&self, path: &str, params: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("Unable to build URL for path '{path}'"))?;
        debug!("GET {url}");

        let response = self
            .http
            .get(url.clone())
            .headers(self.headers()?)
            .query(params)
            .send()
            .await
            .with_context(|| format!("Request to {url} failed"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            anyhow::bail!("Request to {url} failed with status {status}: {body}");
        }

        response
            .json()
            .await
            .with_context(|| format!("Unable to decode the response from {url}"))
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&self.authorization)
                .context("The API credential is not a valid header value")?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl FinanceApi for LunchClient {
    async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionsResponse> {
        self.get_json("/v1/transactions", &query.params()).await
    }

    async fn plaid_accounts(&self) -> Result<PlaidAccountsResponse> {
        self.get_json("/v1/plaid_accounts", &[]).await
    }

    async fn assets(&self) -> Result<AssetsResponse> {
        self.get_json("/v1/assets", &[]).await
    }
}

/// Builds the `Authorization` header value. A credential that already carries
/// the word "Bearer" is used verbatim.
fn authorization_value(credential: &str) -> String {
    if credential.contains("Bearer") {
        credential.to_string()
    } else {
        format!("Bearer {credential}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_value_wraps_bare_token() {
        assert_eq!("Bearer abc123", authorization_value("abc123"));
    }

    #[test]
    fn test_authorization_value_keeps_bearer_verbatim() {
        assert_eq!("Bearer abc123", authorization_value("Bearer abc123"));
    }
}
