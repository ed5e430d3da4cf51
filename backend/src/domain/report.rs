//! Weekly report formatting.
//!
//! Pure text templates over a budget snapshot and the record list. The report
//! date is a parameter so that a fixed snapshot always formats to identical
//! bytes; callers sample the clock once. The same text feeds all three
//! delivery sinks.

use chrono::NaiveDate;
use shared::{BudgetSnapshot, ExpenseRecord};

/// How many of the most-recent transactions a report lists.
pub const RECENT_TRANSACTION_LIMIT: usize = 5;

/// Plain-text weekly report, used for the file download and as the email
/// report body.
pub fn weekly_report(
    snapshot: &BudgetSnapshot,
    records: &[ExpenseRecord],
    report_date: NaiveDate,
) -> String {
    let mut out = String::new();
    out.push_str("WEEKLY SPENDING REPORT\n");
    out.push_str(&format!("Report Date: {}\n", report_date.format("%B %d, %Y")));
    out.push('\n');

    out.push_str("SUMMARY\n");
    out.push_str(&format!("Total Spent: ${:.2}\n", snapshot.total_spent));
    out.push_str(&format!("Weekly Limit: ${:.2}\n", snapshot.weekly_limit));
    out.push_str(&format!(
        "Remaining Budget: ${:.2}\n",
        snapshot.remaining_budget
    ));
    out.push('\n');

    out.push_str("RECENT EXPENSES\n");
    for record in records.iter().take(RECENT_TRANSACTION_LIMIT) {
        out.push_str(&format!(
            "{} - {} ({}): ${:.2}\n",
            record.date.format("%Y-%m-%d"),
            record.description,
            record.category,
            record.amount
        ));
    }
    out.push('\n');

    out.push_str("CATEGORY BREAKDOWN\n");
    for (category, amount) in &snapshot.per_category_totals {
        out.push_str(&format!("{}: ${:.2}\n", category, amount));
    }

    out
}

/// WhatsApp-flavored variant of the same report.
pub fn whatsapp_message(
    snapshot: &BudgetSnapshot,
    records: &[ExpenseRecord],
    report_date: NaiveDate,
) -> String {
    let mut out = String::new();
    out.push_str("📊 *WEEKLY SPENDING REPORT*\n\n");

    out.push_str("💰 *Summary:*\n");
    out.push_str(&format!("• Total Spent: ${:.2}\n", snapshot.total_spent));
    out.push_str(&format!("• Weekly Limit: ${:.2}\n", snapshot.weekly_limit));
    out.push_str(&format!("• Remaining: ${:.2}\n\n", snapshot.remaining_budget));

    out.push_str("📝 *Recent Expenses:*\n");
    for record in records.iter().take(RECENT_TRANSACTION_LIMIT) {
        out.push_str(&format!("• {}: ${:.2}\n", record.description, record.amount));
    }
    out.push('\n');

    out.push_str("📈 *Category Breakdown:*\n");
    for (category, amount) in &snapshot.per_category_totals {
        out.push_str(&format!("• {}: ${:.2}\n", category, amount));
    }
    out.push('\n');

    out.push_str(&format!(
        "Report generated on {}",
        report_date.format("%B %d, %Y")
    ));

    out
}

/// Filename for the downloaded report, dated by the report date.
pub fn report_filename(report_date: NaiveDate) -> String {
    format!("weekly-report-{}.txt", report_date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregation::budget_snapshot;

    fn record(id: u64, category: &str, amount: f64, description: &str) -> ExpenseRecord {
        ExpenseRecord {
            id,
            category: category.to_string(),
            amount,
            description: description.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 19).unwrap(),
            notes: None,
        }
    }

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
    }

    #[test]
    fn test_report_is_deterministic() {
        let records = vec![
            record(2, "games", 25.0, "New video game"),
            record(1, "food", 12.5, "Pizza lunch"),
        ];
        let snapshot = budget_snapshot(&records);

        let first = weekly_report(&snapshot, &records, report_date());
        let second = weekly_report(&snapshot, &records, report_date());
        assert_eq!(first, second);

        let first_wa = whatsapp_message(&snapshot, &records, report_date());
        let second_wa = whatsapp_message(&snapshot, &records, report_date());
        assert_eq!(first_wa, second_wa);
    }

    #[test]
    fn test_report_contents() {
        let records = vec![
            record(2, "games", 25.0, "New video game"),
            record(1, "food", 12.5, "Pizza lunch"),
        ];
        let snapshot = budget_snapshot(&records);

        let report = weekly_report(&snapshot, &records, report_date());

        assert!(report.starts_with("WEEKLY SPENDING REPORT\n"));
        assert!(report.contains("Report Date: June 20, 2025"));
        assert!(report.contains("Total Spent: $37.50"));
        assert!(report.contains("Weekly Limit: $100.00"));
        assert!(report.contains("Remaining Budget: $62.50"));
        assert!(report.contains("2025-06-19 - Pizza lunch (food): $12.50"));
        assert!(report.contains("food: $12.50"));
        assert!(report.contains("games: $25.00"));
    }

    #[test]
    fn test_report_lists_at_most_five_recent_transactions() {
        let records: Vec<ExpenseRecord> = (1..=7)
            .map(|i| record(i, "food", 1.0, &format!("Purchase {}", i)))
            .collect();
        let snapshot = budget_snapshot(&records);

        let report = weekly_report(&snapshot, &records, report_date());

        // The head of the list is the most recent; only the first five appear.
        assert!(report.contains("Purchase 1"));
        assert!(report.contains("Purchase 5"));
        assert!(!report.contains("Purchase 6"));
        assert!(!report.contains("Purchase 7"));
    }

    #[test]
    fn test_negative_remaining_budget_is_not_clamped() {
        let records = vec![record(1, "games", 112.5, "Console")];
        let snapshot = budget_snapshot(&records);

        let report = weekly_report(&snapshot, &records, report_date());
        assert!(report.contains("Remaining Budget: $-12.50"));
    }

    #[test]
    fn test_whatsapp_message_layout() {
        let records = vec![record(1, "food", 12.5, "Pizza lunch")];
        let snapshot = budget_snapshot(&records);

        let message = whatsapp_message(&snapshot, &records, report_date());

        assert!(message.starts_with("📊 *WEEKLY SPENDING REPORT*"));
        assert!(message.contains("• Pizza lunch: $12.50"));
        assert!(message.contains("• food: $12.50"));
        assert!(message.ends_with("Report generated on June 20, 2025"));
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(report_filename(report_date()), "weekly-report-2025-06-20.txt");
    }

    #[test]
    fn test_empty_store_still_formats() {
        let snapshot = budget_snapshot(&[]);
        let report = weekly_report(&snapshot, &[], report_date());

        assert!(report.contains("Total Spent: $0.00"));
        assert!(report.contains("RECENT EXPENSES\n\nCATEGORY BREAKDOWN\n"));
    }
}
