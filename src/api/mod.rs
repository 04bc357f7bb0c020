//! The Lunch Money API surface the widget consumes.

mod client;
#[cfg(test)]
mod test_client;

pub use client::LunchClient;
#[cfg(test)]
pub(crate) use test_client::TestApi;

use crate::model::{AssetsResponse, PlaidAccountsResponse, TransactionQuery, TransactionsResponse};
use crate::Result;

/// Read operations against the budgeting service. The trait exists so the
/// fetch orchestration can run against a canned implementation in tests.
#[async_trait::async_trait]
pub trait FinanceApi: Send + Sync {
    /// `GET /v1/transactions`
    async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionsResponse>;

    /// `GET /v1/plaid_accounts`
    async fn plaid_accounts(&self) -> Result<PlaidAccountsResponse>;

    /// `GET /v1/assets`
    async fn assets(&self) -> Result<AssetsResponse>;
}
