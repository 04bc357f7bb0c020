//! A canned [`FinanceApi`] implementation for tests. A `None` response
//! simulates a failed call.

use crate::api::FinanceApi;
use crate::model::{AssetsResponse, PlaidAccountsResponse, TransactionQuery, TransactionsResponse};
use crate::Result;
use anyhow::Context;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub(crate) struct TestApi {
    /// Served for transaction queries with `status=uncleared`.
    pub(crate) pending: Option<TransactionsResponse>,
    /// Served for all other transaction queries.
    pub(crate) totals: Option<TransactionsResponse>,
    pub(crate) plaid: Option<PlaidAccountsResponse>,
    pub(crate) assets: Option<AssetsResponse>,
    /// Every transaction query received, in call order.
    pub(crate) transaction_queries: Mutex<Vec<TransactionQuery>>,
}

impl TestApi {
    pub(crate) fn transaction_queries(&self) -> Vec<TransactionQuery> {
        self.transaction_queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FinanceApi for TestApi {
    async fn transactions(&self, query: &TransactionQuery) -> Result<TransactionsResponse> {
        self.transaction_queries.lock().unwrap().push(query.clone());
        let canned = if query.status.as_deref() == Some("uncleared") {
            &self.pending
        } else {
            &self.totals
        };
        canned.clone().context("simulated transactions failure")
    }

    async fn plaid_accounts(&self) -> Result<PlaidAccountsResponse> {
        self.plaid.clone().context("simulated plaid_accounts failure")
    }

    async fn assets(&self) -> Result<AssetsResponse> {
        self.assets.clone().context("simulated assets failure")
    }
}
