//! Derived-metric aggregation: the income/expense scan, sync-health rollups,
//! and the small pieces of date arithmetic they share.

use crate::model::{Asset, ManualPart, PlaidAccount, SyncPart, TotalsPart, Transaction};
use chrono::{DateTime, NaiveDate, Utc};

/// Plaid statuses that do not count as sync errors.
const HEALTHY_STATUSES: &[&str] = &["active", "inactive", "syncing"];

/// The recent-transaction list is capped at this many rows.
const MAX_RECENT: usize = 8;

/// A single pass over the transaction list, newest first.
///
/// Two independent things happen per transaction:
/// - the first [`MAX_RECENT`] rows that are neither group aggregates nor
///   split parents are collected for display, regardless of the totals
///   filter below;
/// - transactions that are excluded from totals, split into children, or
///   members of a group are skipped for accumulation; everything else adds
///   to `income` or `spent`.
///
/// Income amounts arrive sign-inverted from the API, so they are negated on
/// the way into the accumulator. In pay-cycle mode the scan stops after
/// accumulating the income transaction whose note equals `pay_cycle_marker`
/// (the paycheck that opens the current cycle).
pub fn scan_transactions(
    transactions: &[Transaction],
    pay_cycle_marker: Option<&str>,
) -> TotalsPart {
    let mut income: f64 = 0.0;
    let mut spent: f64 = 0.0;
    let mut recent: Vec<Transaction> = Vec::new();

    for transaction in transactions {
        if !transaction.is_group && !transaction.has_children && recent.len() < MAX_RECENT {
            recent.push(transaction.clone());
        }

        if transaction.exclude_from_totals
            || transaction.has_children
            || transaction.group_id.is_some()
        {
            continue;
        }

        if transaction.is_income {
            income += -transaction.to_base;
        } else {
            spent += transaction.to_base;
        }

        if let Some(marker) = pay_cycle_marker {
            if transaction.is_income && transaction.notes.as_deref() == Some(marker) {
                break;
            }
        }
    }

    TotalsPart {
        income: format!("{income:.2}"),
        spent: format!("{spent:.2}"),
        savings: if income > 0.0 {
            format!("{:.2}%", (income - spent) / income * 100.0)
        } else {
            "0".to_string()
        },
        total: format!("{:.2}", income - spent),
        last_transactions: recent,
    }
}

/// Rolls the linked accounts up into an error count and the age of the
/// stalest automatic balance refresh.
pub fn plaid_health(accounts: &[PlaidAccount], now: DateTime<Utc>) -> SyncPart {
    let accounts_in_error = accounts
        .iter()
        .filter(|account| !HEALTHY_STATUSES.contains(&account.status.as_str()))
        .count() as u32;

    // The oldest update is clamped at `now`; an empty account list reads as
    // freshly synced.
    let oldest = accounts
        .iter()
        .map(|account| account.balance_last_update)
        .fold(now, |oldest, update| oldest.min(update));

    SyncPart {
        accounts_in_error,
        plaid_oldest_update: readable_age(oldest, now),
    }
}

/// The stalest manual balance entry across all assets, labeled with the name
/// of the account that holds it.
pub fn manual_health(assets: &[Asset], now: DateTime<Utc>) -> ManualPart {
    let mut oldest = now;
    let mut label = String::new();
    for asset in assets {
        if asset.balance_as_of < oldest {
            oldest = asset.balance_as_of;
            label = asset.label().to_string();
        }
    }

    ManualPart {
        manual_oldest_update: format!("{} - {}", readable_age(oldest, now), label),
    }
}

/// Renders the distance between two instants as "N hours" up to a day's
/// worth of hours, and as "N days" beyond that, both rounded.
pub fn readable_age(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed_ms = (now - then).num_milliseconds().max(0) as f64;
    let hours = (elapsed_ms / 3_600_000.0).round();
    if hours > 24.0 {
        format!("{} days", (hours / 24.0).round())
    } else {
        format!("{hours} hours")
    }
}

/// The server-side date filter for pay-cycle mode: the 1st of the current
/// month through today, as `YYYY-MM-DD` strings.
pub fn pay_cycle_window(today: NaiveDate) -> (String, String) {
    (
        today.format("%Y-%m-01").to_string(),
        today.format("%Y-%m-%d").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tx(payee: &str, to_base: f64) -> Transaction {
        Transaction {
            date: "2026-08-29".to_string(),
            payee: payee.to_string(),
            to_base,
            ..Transaction::default()
        }
    }

    fn income_tx(payee: &str, to_base: f64) -> Transaction {
        Transaction {
            is_income: true,
            ..tx(payee, to_base)
        }
    }

    #[test]
    fn test_income_sign_is_negated() {
        let totals = scan_transactions(&[income_tx("Employer", -100.0)], None);
        assert_eq!("100.00", totals.income);
        assert_eq!("0.00", totals.spent);
    }

    #[test]
    fn test_expense_sign_is_kept() {
        let totals = scan_transactions(&[tx("Grocer", 75.0)], None);
        assert_eq!("75.00", totals.spent);
        assert_eq!("0.00", totals.income);
    }

    #[test]
    fn test_exclusion_filter() {
        let excluded = Transaction {
            exclude_from_totals: true,
            ..income_tx("Employer", -500.0)
        };
        let split_parent = Transaction {
            has_children: true,
            ..tx("Amazon", 90.0)
        };
        let grouped = Transaction {
            group_id: Some(7),
            ..tx("Trip", 40.0)
        };
        let totals = scan_transactions(&[excluded, split_parent, grouped], None);
        assert_eq!("0.00", totals.income);
        assert_eq!("0.00", totals.spent);
    }

    #[test]
    fn test_recent_list_is_bounded_and_ordered() {
        let transactions: Vec<Transaction> = (0..20).map(|i| tx(&format!("payee-{i}"), 1.0)).collect();
        let totals = scan_transactions(&transactions, None);
        assert_eq!(8, totals.last_transactions.len());
        let payees: Vec<&str> = totals
            .last_transactions
            .iter()
            .map(|t| t.payee.as_str())
            .collect();
        assert_eq!(
            vec![
                "payee-0", "payee-1", "payee-2", "payee-3", "payee-4", "payee-5", "payee-6",
                "payee-7"
            ],
            payees
        );
    }

    #[test]
    fn test_recent_list_skips_groups_and_split_parents() {
        let group = Transaction {
            is_group: true,
            ..tx("group", 10.0)
        };
        let parent = Transaction {
            has_children: true,
            ..tx("parent", 10.0)
        };
        let totals = scan_transactions(&[group, parent, tx("plain", 10.0)], None);
        let payees: Vec<&str> = totals
            .last_transactions
            .iter()
            .map(|t| t.payee.as_str())
            .collect();
        assert_eq!(vec!["plain"], payees);
    }

    #[test]
    fn test_recent_list_ignores_totals_filter() {
        // Excluded from totals, but neither a group nor a split parent, so it
        // still shows up in the recent list.
        let excluded = Transaction {
            exclude_from_totals: true,
            ..tx("Reimbursed", 55.0)
        };
        let totals = scan_transactions(&[excluded], None);
        assert_eq!(1, totals.last_transactions.len());
        assert_eq!("0.00", totals.spent);
    }

    #[test]
    fn test_savings_formula() {
        let totals = scan_transactions(
            &[income_tx("Employer", -1000.0), tx("Rent", 600.0)],
            None,
        );
        assert_eq!("400.00", totals.total);
        assert_eq!("40.00%", totals.savings);
    }

    #[test]
    fn test_savings_is_literal_zero_without_income() {
        let totals = scan_transactions(&[tx("Rent", 50.0)], None);
        assert_eq!("0", totals.savings);
        assert_eq!("-50.00", totals.total);
    }

    #[test]
    fn test_pay_cycle_early_stop() {
        let mut paycheck = income_tx("Employer", -2000.0);
        paycheck.notes = Some("SALARY".to_string());
        let transactions = vec![
            tx("Grocer", 30.0),
            paycheck,
            // Everything below the paycheck belongs to the previous cycle.
            tx("Rent", 999.0),
            income_tx("Employer", -2000.0),
        ];
        let totals = scan_transactions(&transactions, Some("SALARY"));
        assert_eq!("2000.00", totals.income);
        assert_eq!("30.00", totals.spent);
    }

    #[test]
    fn test_pay_cycle_marker_must_be_income() {
        let mut note_only = tx("Grocer", 30.0);
        note_only.notes = Some("SALARY".to_string());
        let transactions = vec![note_only, tx("Rent", 100.0)];
        let totals = scan_transactions(&transactions, Some("SALARY"));
        assert_eq!("130.00", totals.spent);
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn test_plaid_health_counts_errors() {
        let now = at("2026-08-30T12:00:00Z");
        let accounts = vec![
            PlaidAccount {
                status: "active".to_string(),
                balance_last_update: at("2026-08-30T07:00:00Z"),
            },
            PlaidAccount {
                status: "relink".to_string(),
                balance_last_update: at("2026-08-25T12:00:00Z"),
            },
        ];
        let sync = plaid_health(&accounts, now);
        assert_eq!(1, sync.accounts_in_error);
        assert_eq!("5 days", sync.plaid_oldest_update);
    }

    #[test]
    fn test_plaid_health_empty_list() {
        let now = at("2026-08-30T12:00:00Z");
        let sync = plaid_health(&[], now);
        assert_eq!(0, sync.accounts_in_error);
        assert_eq!("0 hours", sync.plaid_oldest_update);
    }

    #[test]
    fn test_manual_health_names_oldest_account() {
        let now = at("2026-08-30T12:00:00Z");
        let assets = vec![
            Asset {
                balance_as_of: at("2026-08-30T02:00:00Z"),
                display_name: None,
                name: "checking".to_string(),
            },
            Asset {
                balance_as_of: at("2026-08-30T09:00:00Z"),
                display_name: Some("Vacation Fund".to_string()),
                name: "savings-2".to_string(),
            },
        ];
        let manual = manual_health(&assets, now);
        assert_eq!("10 hours - checking", manual.manual_oldest_update);
    }

    #[test]
    fn test_readable_age_hours_and_days() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        assert_eq!("0 hours", readable_age(now, now));
        assert_eq!(
            "5 hours",
            readable_age(now - chrono::Duration::hours(5), now)
        );
        // Exactly 24 hours stays in hours.
        assert_eq!(
            "24 hours",
            readable_age(now - chrono::Duration::hours(24), now)
        );
        assert_eq!(
            "3 days",
            readable_age(now - chrono::Duration::days(3), now)
        );
        // A timestamp in the future reads as zero age.
        assert_eq!(
            "0 hours",
            readable_age(now + chrono::Duration::hours(2), now)
        );
    }

    #[test]
    fn test_pay_cycle_window() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        let (start, end) = pay_cycle_window(today);
        assert_eq!("2026-08-01", start);
        assert_eq!("2026-08-30", end);
    }
}
