//! The once-per-render fetch cycle: freshness-gated cache read, four-way
//! concurrent API fan-out, merge, cache write-back, and the stale-snapshot
//! fallback.

use crate::aggregate;
use crate::api::FinanceApi;
use crate::cache::SnapshotCache;
use crate::config::SNAPSHOT_KEY;
use crate::model::{self, ManualPart, PendingPart, Snapshot, SyncPart, TotalsPart, TransactionQuery};
use crate::{Config, Result};
use chrono::Utc;
use tracing::{debug, error, warn};

/// Transactions fetched when counting pending reviews.
const PENDING_LIMIT: u32 = 50;
const PENDING_STATUS: &str = "uncleared";

/// What the presenter receives: either a coherent snapshot or an explicit
/// empty state (first run ever with a failed fetch).
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetData {
    Ready(Snapshot),
    Empty,
}

/// Runs the fetch cycle against an API implementation and a cache.
pub struct Fetcher<'a> {
    api: &'a dyn FinanceApi,
    cache: &'a SnapshotCache,
    config: &'a Config,
}

impl<'a> Fetcher<'a> {
    pub fn new(api: &'a dyn FinanceApi, cache: &'a SnapshotCache, config: &'a Config) -> Self {
        Self { api, cache, config }
    }

    /// Produces the snapshot for this render cycle.
    ///
    /// A fresh cached snapshot short-circuits the network entirely. On a
    /// miss, the four read operations run concurrently and all settle. A
    /// failed income/expense fetch fails the whole cycle over to the last
    /// cached snapshot: stale-but-coherent beats fresh-but-partial. Failures
    /// of the other three degrade only their own fields.
    pub async fn snapshot(&self, force_refresh: bool) -> Result<WidgetData> {
        if !force_refresh {
            if let Some(raw) = self.cache.get(SNAPSHOT_KEY, self.config.cache_ttl()).await {
                match serde_json::from_str::<Snapshot>(&raw) {
                    Ok(snapshot) => {
                        debug!("Using fresh cached snapshot");
                        return Ok(WidgetData::Ready(snapshot));
                    }
                    Err(e) => warn!("Cached snapshot is corrupt, refetching: {e}"),
                }
            }
        }

        debug!("Fetching data from the API");
        let (pending, sync, totals, manual) = tokio::join!(
            self.fetch_pending(),
            self.fetch_plaid_health(),
            self.fetch_totals(),
            self.fetch_manual_health(),
        );

        let totals = match totals {
            Some(totals) => totals,
            None => {
                warn!("Income/expense fetch failed, falling back to the last cached snapshot");
                return Ok(self.last_known_good().await);
            }
        };

        let snapshot = model::merge(
            &pending.unwrap_or_default(),
            &sync.unwrap_or_default(),
            &totals,
            &manual.unwrap_or_default(),
        )?;

        match serde_json::to_string(&snapshot) {
            Ok(raw) => self.cache.set(SNAPSHOT_KEY, &raw).await,
            Err(e) => warn!("Unable to serialize snapshot for caching: {e}"),
        }
        Ok(WidgetData::Ready(snapshot))
    }

    /// The forced cache read behind the fallback path. With no prior cache
    /// there is nothing left to fall back to and the cycle ends in the
    /// explicit empty state.
    async fn last_known_good(&self) -> WidgetData {
        match self.cache.force_get(SNAPSHOT_KEY).await {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(snapshot) => WidgetData::Ready(snapshot),
                Err(e) => {
                    error!("Stale cached snapshot is corrupt: {e}");
                    WidgetData::Empty
                }
            },
            None => WidgetData::Empty,
        }
    }

    async fn fetch_pending(&self) -> Option<PendingPart> {
        let query = TransactionQuery {
            limit: Some(PENDING_LIMIT),
            status: Some(PENDING_STATUS.to_string()),
            ..TransactionQuery::default()
        };
        match self.api.transactions(&query).await {
            Ok(response) => Some(PendingPart {
                pending_transactions: response.transactions.len() as u32,
            }),
            Err(e) => {
                error!("Pending-transactions fetch failed: {e:#}");
                None
            }
        }
    }

    async fn fetch_plaid_health(&self) -> Option<SyncPart> {
        match self.api.plaid_accounts().await {
            Ok(response) => Some(aggregate::plaid_health(&response.plaid_accounts, Utc::now())),
            Err(e) => {
                error!("Plaid-accounts fetch failed: {e:#}");
                None
            }
        }
    }

    async fn fetch_totals(&self) -> Option<TotalsPart> {
        let mut query = TransactionQuery::default();
        if self.config.pay_cycle_mode() {
            let (start_date, end_date) = aggregate::pay_cycle_window(Utc::now().date_naive());
            query.start_date = Some(start_date);
            query.end_date = Some(end_date);
        }
        match self.api.transactions(&query).await {
            Ok(response) => Some(aggregate::scan_transactions(
                &response.transactions,
                self.config.pay_cycle_marker(),
            )),
            Err(e) => {
                error!("Income/expense fetch failed: {e:#}");
                None
            }
        }
    }

    async fn fetch_manual_health(&self) -> Option<ManualPart> {
        match self.api.assets().await {
            Ok(response) => Some(aggregate::manual_health(&response.assets, Utc::now())),
            Err(e) => {
                error!("Assets fetch failed: {e:#}");
                None
            }
        }
    }
}
