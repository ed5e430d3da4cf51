//! Derived spending metrics.
//!
//! Everything here is a pure function of the current record list. Snapshots
//! are recomputed from scratch on every read, so there is no cached state to
//! invalidate.

use std::collections::{BTreeMap, HashSet};

use shared::{BudgetSnapshot, ExpenseRecord};

/// Fixed weekly spending limit in dollars.
pub const WEEKLY_LIMIT: f64 = 100.0;

/// Divisor for the daily average. A fixed seven-day window, not the span of
/// the record dates.
pub const AVERAGE_WINDOW_DAYS: f64 = 7.0;

/// Compute the budget snapshot for the given records. An empty slice yields
/// an all-zero snapshot, never an error.
pub fn budget_snapshot(records: &[ExpenseRecord]) -> BudgetSnapshot {
    let total_spent: f64 = records.iter().map(|r| r.amount).sum();

    let mut per_category_totals: BTreeMap<String, f64> = BTreeMap::new();
    for record in records {
        *per_category_totals
            .entry(record.category.clone())
            .or_insert(0.0) += record.amount;
    }

    BudgetSnapshot {
        total_spent,
        remaining_budget: WEEKLY_LIMIT - total_spent,
        weekly_limit: WEEKLY_LIMIT,
        per_category_totals,
        transaction_count: records.len(),
        average_per_day: total_spent / AVERAGE_WINDOW_DAYS,
    }
}

/// Number of distinct category ids among the records.
pub fn distinct_category_count(records: &[ExpenseRecord]) -> usize {
    records
        .iter()
        .map(|r| r.category.as_str())
        .collect::<HashSet<_>>()
        .len()
}
