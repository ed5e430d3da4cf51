use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

/// One logged purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Unique within the store; assigned by the store's monotonic counter
    pub id: u64,
    /// Category id from the catalog; stored as-is, unknown values render as "other"
    pub category: String,
    /// Amount spent in dollars
    pub amount: f64,
    /// What was bought (required, non-empty)
    pub description: String,
    /// Calendar date of the purchase (no time component)
    pub date: NaiveDate,
    /// Optional free-text notes
    pub notes: Option<String>,
}

/// Static display metadata for a spending category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDescriptor {
    pub id: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub color_class: &'static str,
}

/// The fixed category catalog. Six entries, never mutated at runtime.
pub const CATEGORIES: [CategoryDescriptor; 6] = [
    CategoryDescriptor {
        id: "food",
        label: "Food",
        emoji: "🍕",
        color_class: "bg-red-100 text-red-700 border-red-200",
    },
    CategoryDescriptor {
        id: "games",
        label: "Games",
        emoji: "🎮",
        color_class: "bg-blue-100 text-blue-700 border-blue-200",
    },
    CategoryDescriptor {
        id: "books",
        label: "Books",
        emoji: "📚",
        color_class: "bg-green-100 text-green-700 border-green-200",
    },
    CategoryDescriptor {
        id: "toys",
        label: "Toys",
        emoji: "🧸",
        color_class: "bg-yellow-100 text-yellow-700 border-yellow-200",
    },
    CategoryDescriptor {
        id: "clothes",
        label: "Clothes",
        emoji: "👕",
        color_class: "bg-purple-100 text-purple-700 border-purple-200",
    },
    CategoryDescriptor {
        id: "other",
        label: "Other",
        emoji: "💝",
        color_class: "bg-gray-100 text-gray-700 border-gray-200",
    },
];

/// Look up a category descriptor by id, falling back to "other" for
/// unrecognized ids. Unknown categories degrade gracefully, never error.
pub fn resolve_category(category_id: &str) -> &'static CategoryDescriptor {
    CATEGORIES
        .iter()
        .find(|c| c.id == category_id)
        .unwrap_or(&CATEGORIES[5])
}

/// Derived spending totals, recomputed fresh from the store on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSnapshot {
    /// Sum of all expense amounts, full precision (rounding is display-only)
    pub total_spent: f64,
    /// Weekly limit minus total spent; may go negative, no clamping
    pub remaining_budget: f64,
    /// The fixed weekly spending limit
    pub weekly_limit: f64,
    /// Summed amounts per category id; zero-spend categories are absent
    pub per_category_totals: BTreeMap<String, f64>,
    /// Number of records in the store
    pub transaction_count: usize,
    /// Total spent divided by the fixed 7-day window
    pub average_per_day: f64,
}

/// A gamification badge with its earned state for the current store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub color_class: String,
    pub earned: bool,
}

/// Response containing all badges plus earned progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeListResponse {
    pub badges: Vec<Badge>,
    pub earned_count: usize,
    pub total_count: usize,
}

/// Draft fields from the entry form. `amount` arrives as text and is
/// validated/parsed by the backend before a record is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub category: String,
    pub amount: String,
    pub description: String,
    /// ISO 8601 date (YYYY-MM-DD); defaults to today when absent
    pub date: Option<String>,
    pub notes: Option<String>,
}

/// Response containing the ordered expense list (most recent first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    pub expenses: Vec<ExpenseRecord>,
}

/// Response containing the static category catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryDescriptor>,
}

/// Request to send the weekly report as a WhatsApp message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatsAppReportRequest {
    pub phone_number: String,
}

/// Request to send the weekly report by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailReportRequest {
    pub parent_email: String,
}

/// Outcome of a report delivery attempt. Delivery is best-effort: failures
/// surface here as `success: false` with a reason, never as an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDeliveryResponse {
    pub success: bool,
    pub message: String,
    /// RFC 3339 timestamp of the attempt
    pub timestamp: String,
    /// Recipient (phone number or email) when the sink has one
    pub recipient: Option<String>,
    /// Fully-encoded deep link for the client to open (WhatsApp sink only)
    pub share_link: Option<String>,
}

/// JSON body posted to the (mocked) email delivery endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailReportPayload {
    #[serde(rename = "parentEmail")]
    pub parent_email: String,
    #[serde(rename = "reportData")]
    pub report_data: String,
    pub timestamp: String,
}

/// Validation errors for the expense entry form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    EmptyDescription,
    EmptyAmount,
    InvalidAmountFormat(String),
    InvalidDateFormat(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyDescription => {
                write!(f, "Please fill in the description")
            }
            ValidationError::EmptyAmount => write!(f, "Please fill in the amount"),
            ValidationError::InvalidAmountFormat(input) => {
                write!(f, "'{}' is not a valid amount", input)
            }
            ValidationError::InvalidDateFormat(input) => {
                write!(f, "'{}' is not a valid date (expected YYYY-MM-DD)", input)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_category() {
        let descriptor = resolve_category("games");
        assert_eq!(descriptor.id, "games");
        assert_eq!(descriptor.label, "Games");
        assert_eq!(descriptor.emoji, "🎮");
    }

    #[test]
    fn test_resolve_unknown_category_falls_back_to_other() {
        let descriptor = resolve_category("snacks");
        assert_eq!(descriptor.id, "other");

        let descriptor = resolve_category("");
        assert_eq!(descriptor.id, "other");
    }

    #[test]
    fn test_catalog_has_six_fixed_categories() {
        let ids: Vec<&str> = CATEGORIES.iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            vec!["food", "games", "books", "toys", "clothes", "other"]
        );
    }

    #[test]
    fn test_email_payload_field_names() {
        let payload = EmailReportPayload {
            parent_email: "parent@example.com".to_string(),
            report_data: "WEEKLY SPENDING REPORT".to_string(),
            timestamp: "2025-06-19T10:00:00Z".to_string(),
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["parentEmail"], "parent@example.com");
        assert_eq!(json["reportData"], "WEEKLY SPENDING REPORT");
        assert_eq!(json["timestamp"], "2025-06-19T10:00:00Z");
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(
            ValidationError::EmptyAmount.to_string(),
            "Please fill in the amount"
        );
        assert_eq!(
            ValidationError::InvalidAmountFormat("abc".to_string()).to_string(),
            "'abc' is not a valid amount"
        );
    }

    #[test]
    fn test_expense_record_roundtrip() {
        let record = ExpenseRecord {
            id: 1,
            category: "food".to_string(),
            amount: 12.5,
            description: "Pizza lunch".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 19).unwrap(),
            notes: Some("Shared with friends".to_string()),
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: ExpenseRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
