use std::path::PathBuf;

use chrono::{Local, NaiveDate};

use crate::domain::{
    compute_totals, filter_transactions, parse_cents, profit_by_period, KindFilter,
    PeriodProfit, Totals, Transaction, TransactionId, TransactionKind, DATE_FORMAT,
    DEFAULT_CATEGORY,
};
use crate::storage::{CsvStore, RowError};

use super::AppError;

/// Raw user input for a new ledger entry. Amount and date arrive as text,
/// exactly as typed; validation happens in [`LedgerService::add`].
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: String,
    /// dd/mm/yyyy, or blank for today
    pub date: String,
    pub kind: TransactionKind,
    pub category: Option<String>,
}

/// The ledger: exclusive owner of the in-memory transaction collection.
/// Every successful mutation writes the whole collection back to disk.
/// This is the primary interface for any client (CLI, TUI, etc.).
pub struct LedgerService {
    store: CsvStore,
    transactions: Vec<Transaction>,
    load_errors: Vec<RowError>,
}

impl LedgerService {
    /// Open the ledger file, creating an empty ledger if it doesn't exist.
    /// Malformed rows are skipped and kept available via [`load_errors`];
    /// they never abort the load.
    ///
    /// [`load_errors`]: LedgerService::load_errors
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let store = CsvStore::new(path);
        let report = store.load()?;
        for error in &report.errors {
            tracing::warn!(line = error.line, "skipped malformed ledger row: {}", error.message);
        }
        Ok(Self {
            store,
            transactions: report.transactions,
            load_errors: report.errors,
        })
    }

    /// Validate and append a new transaction, then write through to disk.
    /// On validation failure nothing changes. If only the save fails, the
    /// record stays in memory and the storage error is returned for the
    /// caller to surface.
    pub fn add(&mut self, input: NewTransaction) -> Result<Transaction, AppError> {
        let tx = validate(input)?;
        self.transactions.push(tx.clone());
        self.persist()?;
        Ok(tx)
    }

    /// Remove the transaction with the given id, if present. Returns
    /// whether anything was removed; deleting an unknown id is a no-op.
    pub fn delete(&mut self, id: TransactionId) -> Result<bool, AppError> {
        let before = self.transactions.len();
        self.transactions.retain(|tx| tx.id != id);
        let removed = self.transactions.len() != before;
        self.persist()?;
        Ok(removed)
    }

    /// Per-kind sums and the resulting balance over the full collection.
    pub fn totals(&self) -> Totals {
        compute_totals(&self.transactions)
    }

    /// Signed profit grouped by month and by year.
    pub fn profit_by_period(&self) -> PeriodProfit {
        profit_by_period(&self.transactions)
    }

    /// Filtered view, most recent date first.
    pub fn filter(&self, filter: KindFilter, search: &str) -> Vec<Transaction> {
        filter_transactions(&self.transactions, filter, search)
    }

    /// Read-only snapshot of all transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// Rows that were skipped while loading the ledger file.
    pub fn load_errors(&self) -> &[RowError] {
        &self.load_errors
    }

    fn persist(&self) -> Result<(), AppError> {
        if let Err(err) = self.store.save(&self.transactions) {
            // In-memory state stays the source of truth for the session.
            tracing::warn!("ledger not saved, keeping in-memory state: {err}");
            return Err(err.into());
        }
        Ok(())
    }
}

fn validate(input: NewTransaction) -> Result<Transaction, AppError> {
    let description = input.description.trim();
    if description.is_empty() {
        return Err(AppError::MissingField("description"));
    }

    let amount_text = input.amount.trim();
    if amount_text.is_empty() {
        return Err(AppError::MissingField("amount"));
    }
    let amount_cents = parse_cents(amount_text)
        .map_err(|_| AppError::InvalidAmount(amount_text.to_string()))?;
    if amount_cents <= 0 {
        return Err(AppError::InvalidAmount(amount_text.to_string()));
    }

    let date_text = input.date.trim();
    let date = if date_text.is_empty() {
        Local::now().date_naive().format(DATE_FORMAT).to_string()
    } else {
        NaiveDate::parse_from_str(date_text, DATE_FORMAT)
            .map_err(|_| AppError::InvalidDate(date_text.to_string()))?;
        date_text.to_string()
    };

    let category = input
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

    Ok(Transaction::new(
        description,
        amount_cents,
        date,
        input.kind,
        category,
    ))
}
