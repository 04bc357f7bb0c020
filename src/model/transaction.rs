use serde::{Deserialize, Serialize};

/// A single transaction as returned by `GET /v1/transactions`.
///
/// Only the fields the widget consumes are modeled; unknown upstream fields
/// are ignored on decode and absent ones take their defaults, since the
/// remote schema is not validated beyond this optimistic access.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub date: String,

    #[serde(default)]
    pub payee: String,

    /// The amount in the budget's base currency. For income transactions the
    /// upstream API inverts the sign: a $100 paycheck arrives as `-100`.
    #[serde(default)]
    pub to_base: f64,

    #[serde(default)]
    pub is_income: bool,

    /// True when this transaction is the aggregate of a group.
    #[serde(default)]
    pub is_group: bool,

    /// True when this transaction has been split into children.
    #[serde(default, alias = "hasChildren")]
    pub has_children: bool,

    #[serde(default)]
    pub exclude_from_totals: bool,

    /// Set when the transaction belongs to a group.
    #[serde(default)]
    pub group_id: Option<i64>,

    #[serde(default)]
    pub notes: Option<String>,
}

/// The response envelope of `GET /v1/transactions`.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// Query parameters accepted by `GET /v1/transactions`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionQuery {
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl TransactionQuery {
    /// The query as `(key, value)` pairs, omitting unset parameters.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(status) = &self.status {
            params.push(("status", status.clone()));
        }
        if let Some(start_date) = &self.start_date {
            params.push(("start_date", start_date.clone()));
        }
        if let Some(end_date) = &self.end_date {
            params.push(("end_date", end_date.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let json = r#"{
            "date": "2026-08-12",
            "payee": "Grocer",
            "to_base": 42.5,
            "is_income": false,
            "currency": "usd",
            "plaid_account_id": 99
        }"#;
        let tx: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!("Grocer", tx.payee);
        assert_eq!(42.5, tx.to_base);
        assert!(!tx.has_children);
        assert_eq!(None, tx.group_id);
    }

    #[test]
    fn test_decode_accepts_has_children_alias() {
        let tx: Transaction = serde_json::from_str(r#"{"hasChildren": true}"#).unwrap();
        assert!(tx.has_children);
        let tx: Transaction = serde_json::from_str(r#"{"has_children": true}"#).unwrap();
        assert!(tx.has_children);
    }

    #[test]
    fn test_query_params_omits_unset() {
        let query = TransactionQuery {
            limit: Some(50),
            status: Some("uncleared".to_string()),
            ..TransactionQuery::default()
        };
        assert_eq!(
            vec![
                ("limit", "50".to_string()),
                ("status", "uncleared".to_string())
            ],
            query.params()
        );
        assert!(TransactionQuery::default().params().is_empty());
    }
}
