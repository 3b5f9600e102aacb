use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use super::{Cents, Transaction, TransactionKind};

/// Aggregate sums per kind over a whole collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Cents,
    pub expenses: Cents,
    pub investments: Cents,
    /// income - expenses - investments. Investments reduce the balance
    /// on purpose: money locked away is not available to spend.
    pub balance: Cents,
}

/// Signed profit grouped by calendar period.
/// Monthly keys are "mm/yyyy", yearly keys are "yyyy".
#[derive(Debug, Clone, Default)]
pub struct PeriodProfit {
    pub monthly: HashMap<String, Cents>,
    pub yearly: HashMap<String, Cents>,
}

/// Kind axis of the transaction list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    All,
    Only(TransactionKind),
}

impl KindFilter {
    pub fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(wanted) => *wanted == kind,
        }
    }
}

/// Sum amounts per kind over the full collection.
pub fn compute_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();
    for tx in transactions {
        match tx.kind {
            TransactionKind::Income => totals.income += tx.amount_cents,
            TransactionKind::Expense => totals.expenses += tx.amount_cents,
            TransactionKind::Investment => totals.investments += tx.amount_cents,
        }
    }
    totals.balance = totals.income - totals.expenses - totals.investments;
    totals
}

/// Accumulate signed profit into monthly and yearly buckets.
/// Entries whose stored date no longer parses are skipped so that a few
/// corrupt historical rows cannot take down reporting.
pub fn profit_by_period(transactions: &[Transaction]) -> PeriodProfit {
    let mut profit = PeriodProfit::default();
    for tx in transactions {
        let Some(date) = tx.parsed_date() else {
            continue;
        };
        let month_key = date.format("%m/%Y").to_string();
        let year_key = date.format("%Y").to_string();
        *profit.monthly.entry(month_key).or_insert(0) += tx.signed_cents();
        *profit.yearly.entry(year_key).or_insert(0) += tx.signed_cents();
    }
    profit
}

/// Select transactions by kind and case-insensitive description substring,
/// most recent date first. The sort is stable, so entries sharing a date
/// keep their insertion order; entries with an unparseable date sort last.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: KindFilter,
    search: &str,
) -> Vec<Transaction> {
    let needle = search.trim().to_lowercase();
    let mut matches: Vec<Transaction> = transactions
        .iter()
        .filter(|tx| filter.matches(tx.kind))
        .filter(|tx| needle.is_empty() || tx.description.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    matches.sort_by(|a, b| cmp_dates_desc(a.parsed_date(), b.parsed_date()));
    matches
}

fn cmp_dates_desc(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
