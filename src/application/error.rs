use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced to callers of the ledger service. None of these are
/// fatal: validation errors leave the ledger untouched, and a storage
/// error means the in-memory state is ahead of the file on disk.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount '{0}': use a positive number like '50' or '50,00'")]
    InvalidAmount(String),

    #[error("Invalid date '{0}': use dd/mm/yyyy")]
    InvalidDate(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
