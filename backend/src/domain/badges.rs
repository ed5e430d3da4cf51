//! Badge rules for the kid view.
//!
//! Each badge is a declarative rule over the derived metrics; adding a badge
//! means adding a row here, nothing else. All predicates are re-evaluated
//! from scratch on every read and are order-independent.

use shared::{Badge, BadgeListResponse, ExpenseRecord};

use super::aggregation;

/// The metrics the badge predicates look at.
#[derive(Debug, Clone, Copy)]
pub struct BadgeInput {
    pub transaction_count: usize,
    pub total_spent: f64,
    pub distinct_categories: usize,
}

struct BadgeRule {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    emoji: &'static str,
    color_class: &'static str,
    earned: fn(&BadgeInput) -> bool,
}

const BADGE_RULES: [BadgeRule; 4] = [
    BadgeRule {
        id: "first-expense",
        name: "First Step!",
        description: "Added your first expense",
        emoji: "🎯",
        color_class: "bg-blue-100 text-blue-700",
        earned: |input| input.transaction_count >= 1,
    },
    BadgeRule {
        id: "tracker",
        name: "Expense Tracker",
        description: "Logged 5 expenses",
        emoji: "📊",
        color_class: "bg-green-100 text-green-700",
        earned: |input| input.transaction_count >= 5,
    },
    BadgeRule {
        id: "budget-conscious",
        name: "Budget Conscious",
        description: "Spent under $50",
        emoji: "💰",
        color_class: "bg-yellow-100 text-yellow-700",
        earned: |input| input.total_spent > 0.0 && input.total_spent < 50.0,
    },
    BadgeRule {
        id: "organized",
        name: "Super Organized",
        description: "Used 3+ categories",
        emoji: "🌟",
        color_class: "bg-purple-100 text-purple-700",
        earned: |input| input.distinct_categories >= 3,
    },
];

/// Evaluate every badge rule against the current records.
pub fn evaluate_badges(records: &[ExpenseRecord]) -> BadgeListResponse {
    let total_spent: f64 = records.iter().map(|r| r.amount).sum();
    let input = BadgeInput {
        transaction_count: records.len(),
        total_spent,
        distinct_categories: aggregation::distinct_category_count(records),
    };

    let badges: Vec<Badge> = BADGE_RULES
        .iter()
        .map(|rule| Badge {
            id: rule.id.to_string(),
            name: rule.name.to_string(),
            description: rule.description.to_string(),
            emoji: rule.emoji.to_string(),
            color_class: rule.color_class.to_string(),
            earned: (rule.earned)(&input),
        })
        .collect();

    let earned_count = badges.iter().filter(|b| b.earned).count();
    let total_count = badges.len();

    BadgeListResponse {
        badges,
        earned_count,
        total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: u64, category: &str, amount: f64) -> ExpenseRecord {
        ExpenseRecord {
            id,
            category: category.to_string(),
            amount,
            description: format!("Expense {}", id),
            date: NaiveDate::from_ymd_opt(2025, 6, 19).unwrap(),
            notes: None,
        }
    }

    fn earned_ids(records: &[ExpenseRecord]) -> Vec<String> {
        evaluate_badges(records)
            .badges
            .into_iter()
            .filter(|b| b.earned)
            .map(|b| b.id)
            .collect()
    }

    #[test]
    fn test_empty_store_earns_nothing() {
        let response = evaluate_badges(&[]);

        assert!(response.badges.iter().all(|b| !b.earned));
        assert_eq!(response.earned_count, 0);
        assert_eq!(response.total_count, 4);
    }

    #[test]
    fn test_first_expense_after_one_record() {
        let records = vec![record(1, "food", 5.0)];
        assert!(earned_ids(&records).contains(&"first-expense".to_string()));
    }

    #[test]
    fn test_tracker_requires_five_records() {
        let four: Vec<ExpenseRecord> = (1..=4).map(|i| record(i, "food", 1.0)).collect();
        assert!(!earned_ids(&four).contains(&"tracker".to_string()));

        let five: Vec<ExpenseRecord> = (1..=5).map(|i| record(i, "food", 1.0)).collect();
        assert!(earned_ids(&five).contains(&"tracker".to_string()));
    }

    #[test]
    fn test_budget_conscious_boundaries() {
        // Nothing spent: not earned.
        assert!(!earned_ids(&[]).contains(&"budget-conscious".to_string()));

        // Exactly 50: not earned.
        let at_limit = vec![record(1, "games", 50.0)];
        assert!(!earned_ids(&at_limit).contains(&"budget-conscious".to_string()));

        // Just under: earned.
        let under = vec![record(1, "games", 49.99)];
        assert!(earned_ids(&under).contains(&"budget-conscious".to_string()));
    }

    #[test]
    fn test_organized_requires_three_distinct_categories() {
        let two_same = vec![record(1, "food", 1.0), record(2, "food", 2.0)];
        assert!(!earned_ids(&two_same).contains(&"organized".to_string()));

        let three = vec![
            record(1, "food", 1.0),
            record(2, "games", 2.0),
            record(3, "books", 3.0),
        ];
        assert!(earned_ids(&three).contains(&"organized".to_string()));
    }

    #[test]
    fn test_two_record_scenario_earns_expected_badges() {
        let records = vec![record(1, "food", 12.5), record(2, "games", 25.0)];
        let mut earned = earned_ids(&records);
        earned.sort();

        assert_eq!(earned, vec!["budget-conscious", "first-expense"]);
    }
}
