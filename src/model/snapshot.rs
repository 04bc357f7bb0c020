//! The cached snapshot record and its typed assembly from fetch partials.
//!
//! Field names serialize in camelCase so the cache file matches the shape the
//! widget has always stored. Numeric-looking fields are fixed-2-decimal
//! strings; the rendering layer consumes strings, never raw numbers.

use crate::model::Transaction;
use crate::Result;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The derived-metrics record summarizing all widget-visible data for one
/// render cycle.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub pending_transactions: u32,
    pub accounts_in_error: u32,
    pub plaid_oldest_update: String,
    pub manual_oldest_update: String,
    pub income: String,
    pub spent: String,
    pub savings: String,
    pub total: String,
    pub last_transactions: Vec<Transaction>,
}

/// Result of the pending-transactions fetch.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingPart {
    pub pending_transactions: u32,
}

/// Result of the Plaid sync-health fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncPart {
    pub accounts_in_error: u32,
    pub plaid_oldest_update: String,
}

impl Default for SyncPart {
    fn default() -> Self {
        Self {
            accounts_in_error: 0,
            plaid_oldest_update: "unknown".to_string(),
        }
    }
}

/// Result of the income/expense aggregation fetch.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsPart {
    pub income: String,
    pub spent: String,
    pub savings: String,
    pub total: String,
    pub last_transactions: Vec<Transaction>,
}

/// Result of the manual-accounts fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualPart {
    pub manual_oldest_update: String,
}

impl Default for ManualPart {
    fn default() -> Self {
        Self {
            manual_oldest_update: "unknown".to_string(),
        }
    }
}

/// Assembles a [`Snapshot`] from the four fetch partials.
///
/// Each partial is flattened to a JSON object and the objects are required to
/// use disjoint keys; a collision means two fetches claim the same snapshot
/// field and is an error rather than a silent overwrite.
pub fn merge(
    pending: &PendingPart,
    sync: &SyncPart,
    totals: &TotalsPart,
    manual: &ManualPart,
) -> Result<Snapshot> {
    let merged = merge_objects([
        to_object(pending)?,
        to_object(sync)?,
        to_object(totals)?,
        to_object(manual)?,
    ])?;
    serde_json::from_value(Value::Object(merged)).context("Unable to assemble snapshot")
}

fn merge_objects(parts: impl IntoIterator<Item = Map<String, Value>>) -> Result<Map<String, Value>> {
    let mut merged = Map::new();
    for part in parts {
        for (key, value) in part {
            if merged.insert(key.clone(), value).is_some() {
                bail!("Snapshot field '{key}' was produced by more than one fetch");
            }
        }
    }
    Ok(merged)
}

fn to_object<T: Serialize>(part: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(part).context("Unable to serialize snapshot part")? {
        Value::Object(map) => Ok(map),
        other => bail!("Snapshot part did not serialize to an object: {other}"),
    }
}
