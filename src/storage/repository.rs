use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    format_cents, parse_cents, Transaction, TransactionKind, DEFAULT_CATEGORY,
};

/// Column order of the ledger file.
pub const CSV_HEADER: [&str; 6] = ["id", "description", "amount", "date", "kind", "category"];

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// A row that could not be turned into a transaction during load.
#[derive(Debug, Clone)]
pub struct RowError {
    /// 1-based line number in the file, counting the header
    pub line: usize,
    pub field: Option<String>,
    pub message: String,
}

/// Outcome of loading the ledger file. Malformed rows are reported, not
/// fatal: whatever parsed is usable.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    pub errors: Vec<RowError>,
}

/// Flat-file store for the whole transaction collection. Every save is a
/// full rewrite; O(n) per mutation is fine at personal-ledger scale.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records. A missing file is an empty ledger.
    ///
    /// Tolerated irregularities: a missing or unparseable `id` is replaced
    /// with a fresh one, a missing `category` column or value becomes
    /// "Other", and dates are kept verbatim (reports skip the unparseable
    /// ones). Rows with a broken amount, kind, or description are skipped
    /// and reported in the returned [`LoadReport`].
    pub fn load(&self) -> Result<LoadReport, StorageError> {
        if !self.path.exists() {
            return Ok(LoadReport::default());
        }

        let mut reader = csv::Reader::from_path(&self.path).map_err(|e| self.csv_err(e))?;
        let headers = reader.headers().map_err(|e| self.csv_err(e))?.clone();
        let column = |name: &str| headers.iter().position(|h| h == name);
        let id_col = column("id");
        let description_col = column("description");
        let amount_col = column("amount");
        let date_col = column("date");
        let kind_col = column("kind");
        let category_col = column("category");

        let mut report = LoadReport::default();

        for (index, result) in reader.records().enumerate() {
            let line = index + 2; // +2 for header and 0-indexing

            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    report.errors.push(RowError {
                        line,
                        field: None,
                        message: format!("CSV parse error: {}", e),
                    });
                    continue;
                }
            };
            let field = |col: Option<usize>| col.and_then(|i| record.get(i)).unwrap_or("");

            let description = field(description_col).trim();
            if description.is_empty() {
                report.errors.push(RowError {
                    line,
                    field: Some("description".to_string()),
                    message: "missing description".to_string(),
                });
                continue;
            }

            let amount_text = field(amount_col);
            let amount_cents = match parse_cents(amount_text) {
                Ok(cents) if cents > 0 => cents,
                _ => {
                    report.errors.push(RowError {
                        line,
                        field: Some("amount".to_string()),
                        message: format!("invalid amount '{}'", amount_text),
                    });
                    continue;
                }
            };

            let kind: TransactionKind = match field(kind_col).parse() {
                Ok(kind) => kind,
                Err(message) => {
                    report.errors.push(RowError {
                        line,
                        field: Some("kind".to_string()),
                        message,
                    });
                    continue;
                }
            };

            let category = match field(category_col).trim() {
                "" => DEFAULT_CATEGORY,
                value => value,
            };

            let mut tx = Transaction::new(
                description,
                amount_cents,
                field(date_col).trim(),
                kind,
                category,
            );
            // Older files have no id column; keep the synthesized one then.
            if let Ok(id) = field(id_col).trim().parse::<Uuid>() {
                tx = tx.with_id(id);
            }
            report.transactions.push(tx);
        }

        Ok(report)
    }

    /// Rewrite the whole file from the given collection. The new contents
    /// go to a sibling temp file first and replace the ledger via rename,
    /// so a crash mid-save never leaves a half-written ledger behind.
    pub fn save(&self, transactions: &[Transaction]) -> Result<(), StorageError> {
        let tmp_path = self.path.with_extension("tmp");

        let mut writer = csv::Writer::from_path(&tmp_path).map_err(|e| self.csv_err(e))?;
        writer
            .write_record(CSV_HEADER)
            .map_err(|e| self.csv_err(e))?;
        for tx in transactions {
            writer
                .write_record([
                    tx.id.to_string().as_str(),
                    tx.description.as_str(),
                    format_cents(tx.amount_cents).as_str(),
                    tx.date.as_str(),
                    tx.kind.as_str(),
                    tx.category.as_str(),
                ])
                .map_err(|e| self.csv_err(e))?;
        }
        writer.flush().map_err(|e| self.io_err(e))?;
        drop(writer);

        fs::rename(&tmp_path, &self.path).map_err(|e| self.io_err(e))
    }

    fn csv_err(&self, source: csv::Error) -> StorageError {
        StorageError::Csv {
            path: self.path.clone(),
            source,
        }
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
