use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Cents;

pub type TransactionId = Uuid;

/// Date format used wherever a date is shown to or typed by the user.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Category assigned to records that don't carry one.
pub const DEFAULT_CATEGORY: &str = "Other";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, freelance work, dividends)
    Income,
    /// Money going out (rent, groceries, bills)
    Expense,
    /// Money set aside; reduces the available balance like an expense
    Investment,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
            TransactionKind::Investment => "investment",
        }
    }

    /// Sign applied to the amount when this kind contributes to profit.
    /// Income adds; expenses and investments subtract.
    pub fn profit_sign(&self) -> Cents {
        match self {
            TransactionKind::Income => 1,
            TransactionKind::Expense | TransactionKind::Investment => -1,
        }
    }

    /// Category suggestions per kind, for presentation layers to offer.
    /// The core never validates against these.
    pub fn suggested_categories(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => &["Salary", "Freelance", "Investments", "Other"],
            TransactionKind::Expense => &[
                "Food",
                "Housing",
                "Transport",
                "Leisure",
                "Health",
                "Education",
                "Other",
            ],
            TransactionKind::Investment => {
                &["Stocks", "Funds", "Fixed Income", "Crypto", "Other"]
            }
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            "investment" => Ok(TransactionKind::Investment),
            other => Err(format!("unknown transaction kind '{}'", other)),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single ledger entry. Entries are immutable once created: the only
/// mutations the ledger allows are append and delete, never edit-in-place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    /// Amount in cents (always positive; the kind carries the direction)
    pub amount_cents: Cents,
    /// dd/mm/yyyy. Kept textual so historical rows with corrupt dates
    /// survive a load/save cycle; period reports skip them.
    pub date: String,
    pub kind: TransactionKind,
    pub category: String,
}

impl Transaction {
    /// Create a new transaction with a fresh unique id.
    pub fn new(
        description: impl Into<String>,
        amount_cents: Cents,
        date: impl Into<String>,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        assert!(amount_cents > 0, "Transaction amount must be positive");
        Self {
            id: Uuid::new_v4(),
            description: description.into(),
            amount_cents,
            date: date.into(),
            kind,
            category: category.into(),
        }
    }

    /// Replace the generated id, used when reconstructing persisted records.
    pub fn with_id(mut self, id: TransactionId) -> Self {
        self.id = id;
        self
    }

    /// The date as a calendar value, or None for a malformed stored date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), DATE_FORMAT).ok()
    }

    /// Signed contribution of this entry to period profit.
    pub fn signed_cents(&self) -> Cents {
        self.amount_cents * self.kind.profit_sign()
    }
}
