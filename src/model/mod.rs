//! Data models for the Lunch Money API and the cached snapshot.

mod account;
mod snapshot;
mod transaction;

pub use account::{Asset, AssetsResponse, PlaidAccount, PlaidAccountsResponse};
pub use snapshot::{merge, ManualPart, PendingPart, Snapshot, SyncPart, TotalsPart};
pub use transaction::{Transaction, TransactionQuery, TransactionsResponse};
