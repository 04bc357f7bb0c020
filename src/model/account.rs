use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Plaid-linked account as returned by `GET /v1/plaid_accounts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaidAccount {
    /// Sync status. Anything outside "active", "inactive" and "syncing"
    /// counts as an error.
    #[serde(default)]
    pub status: String,

    /// When the balance was last refreshed automatically.
    pub balance_last_update: DateTime<Utc>,
}

/// The response envelope of `GET /v1/plaid_accounts`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaidAccountsResponse {
    #[serde(default)]
    pub plaid_accounts: Vec<PlaidAccount>,
}

/// A manually tracked account (asset) as returned by `GET /v1/assets`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// When the balance was last entered by hand.
    pub balance_as_of: DateTime<Utc>,

    /// User-facing name; falls back to `name` when absent.
    #[serde(default)]
    pub display_name: Option<String>,

    #[serde(default)]
    pub name: String,
}

impl Asset {
    /// The name to show for this asset.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// The response envelope of `GET /v1/assets`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetsResponse {
    #[serde(default)]
    pub assets: Vec<Asset>,
}
