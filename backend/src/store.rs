//! In-memory expense store.
//!
//! The store is the single owned mutable state of the application: an ordered
//! list of expense records, most recent first, alive for the process lifetime.
//! Records are only ever appended (at the head); ids come from a counter owned
//! by the store so uniqueness survives any future delete support.

use std::sync::{Arc, RwLock};

use chrono::{Local, NaiveDate};
use shared::ExpenseRecord;

/// Handle shared between the services; reads for aggregation, a single
/// mutation path through `ExpenseService`.
pub type SharedStore = Arc<RwLock<ExpenseStore>>;

/// A validated expense ready to be stored. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub category: String,
    pub amount: f64,
    pub description: String,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

pub struct ExpenseStore {
    records: Vec<ExpenseRecord>,
    next_id: u64,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Store seeded with the two demo purchases the kid view starts with.
    pub fn with_demo_data() -> Self {
        let today = Local::now().date_naive();
        let yesterday = today.pred_opt().unwrap_or(today);

        let mut store = Self::new();
        store.add(NewExpense {
            category: "games".to_string(),
            amount: 25.0,
            description: "New video game".to_string(),
            date: yesterday,
            notes: Some("Birthday gift to myself".to_string()),
        });
        store.add(NewExpense {
            category: "food".to_string(),
            amount: 12.5,
            description: "Pizza lunch".to_string(),
            date: today,
            notes: Some("Shared with friends".to_string()),
        });
        store
    }

    /// Append a new record at the head of the list. Insertion order governs
    /// position; the record's date plays no part in ordering.
    pub fn add(&mut self, new_expense: NewExpense) -> ExpenseRecord {
        let record = ExpenseRecord {
            id: self.next_id,
            category: new_expense.category,
            amount: new_expense.amount,
            description: new_expense.description,
            date: new_expense.date,
            notes: new_expense.notes,
        };
        self.next_id += 1;
        self.records.insert(0, record.clone());
        record
    }

    /// Current records, most recent first.
    pub fn records(&self) -> &[ExpenseRecord] {
        &self.records
    }

    /// Owned copy of the current records, for the report sinks. A report
    /// reads the store once at invocation time and is unaffected by later
    /// mutations.
    pub fn snapshot(&self) -> Vec<ExpenseRecord> {
        self.records.clone()
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(RwLock::new(self))
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}
