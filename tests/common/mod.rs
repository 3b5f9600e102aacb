// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use fintrack::application::{LedgerService, NewTransaction};
use fintrack::domain::{Transaction, TransactionKind};
use tempfile::TempDir;

/// Helper to create a service backed by a ledger file in a temp directory
pub fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("transactions.csv");
    let service = LedgerService::open(&path)?;
    Ok((service, temp_dir))
}

/// Helper to build the raw input for an add call
pub fn new_tx(
    description: &str,
    amount: &str,
    date: &str,
    kind: TransactionKind,
) -> NewTransaction {
    NewTransaction {
        description: description.to_string(),
        amount: amount.to_string(),
        date: date.to_string(),
        kind,
        category: None,
    }
}

/// Add a transaction that is expected to validate
pub fn add_ok(
    service: &mut LedgerService,
    description: &str,
    amount: &str,
    date: &str,
    kind: TransactionKind,
) -> Result<Transaction> {
    Ok(service.add(new_tx(description, amount, date, kind))?)
}
