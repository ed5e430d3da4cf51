//! Expense entry and listing.
//!
//! `ExpenseService` is the only mutation path into the store. Draft input
//! from the entry form is validated here before a record is created: the
//! amount text must parse to a finite number (a non-empty but non-numeric
//! amount is rejected, not propagated as NaN).

use chrono::{Local, NaiveDate};
use shared::{
    resolve_category, BadgeListResponse, BudgetSnapshot, CreateExpenseRequest,
    ExpenseListResponse, ExpenseRecord, ValidationError,
};
use thiserror::Error;
use tracing::info;

use crate::store::{NewExpense, SharedStore};

use super::{aggregation, badges};

#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("expense store is unavailable")]
    StoreUnavailable,
}

#[derive(Clone)]
pub struct ExpenseService {
    store: SharedStore,
}

impl ExpenseService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Validate the draft and append a new record at the head of the store.
    pub fn add_expense(&self, request: CreateExpenseRequest) -> Result<ExpenseRecord, ExpenseError> {
        info!(
            "Adding expense: category={}, description={}",
            request.category, request.description
        );

        let new_expense = validate_draft(&request)?;

        let mut store = self
            .store
            .write()
            .map_err(|_| ExpenseError::StoreUnavailable)?;
        let record = store.add(new_expense);

        // Unknown categories fall back to the "other" descriptor for display.
        let descriptor = resolve_category(&record.category);
        info!(
            "Created expense {} for ${:.2} ({} {})",
            record.id, record.amount, descriptor.emoji, descriptor.label
        );
        Ok(record)
    }

    /// Current records, most recent first.
    pub fn list_expenses(&self) -> Result<ExpenseListResponse, ExpenseError> {
        let store = self
            .store
            .read()
            .map_err(|_| ExpenseError::StoreUnavailable)?;
        Ok(ExpenseListResponse {
            expenses: store.snapshot(),
        })
    }

    /// Budget snapshot recomputed from the current store.
    pub fn budget_snapshot(&self) -> Result<BudgetSnapshot, ExpenseError> {
        let store = self
            .store
            .read()
            .map_err(|_| ExpenseError::StoreUnavailable)?;
        Ok(aggregation::budget_snapshot(store.records()))
    }

    /// Badge states recomputed from the current store.
    pub fn badges(&self) -> Result<BadgeListResponse, ExpenseError> {
        let store = self
            .store
            .read()
            .map_err(|_| ExpenseError::StoreUnavailable)?;
        Ok(badges::evaluate_badges(store.records()))
    }
}

/// Check the draft fields and convert them into a storable expense.
fn validate_draft(request: &CreateExpenseRequest) -> Result<NewExpense, ValidationError> {
    let description = request.description.trim();
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }

    let amount_input = request.amount.trim();
    if amount_input.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    // str::parse accepts "NaN" and "inf", so finiteness is checked explicitly.
    let amount: f64 = amount_input
        .parse()
        .map_err(|_| ValidationError::InvalidAmountFormat(amount_input.to_string()))?;
    if !amount.is_finite() {
        return Err(ValidationError::InvalidAmountFormat(amount_input.to_string()));
    }

    let date = match request.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDateFormat(raw.to_string()))?,
        None => Local::now().date_naive(),
    };

    let notes = request
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(String::from);

    Ok(NewExpense {
        category: request.category.clone(),
        amount,
        description: description.to_string(),
        date,
        notes,
    })
}
