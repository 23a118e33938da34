//! Bank-statement CSV ingestion for onboarding. Parsing is delegated to the
//! `csv` crate; this module only maps rows onto ledger transactions.

use std::io::Read;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::currency::{Money, MINOR_PER_RUPEE};
use crate::errors::GigFinError;
use crate::ledger::{Transaction, TransactionKind};

/// Expected statement columns.
#[derive(Debug, Deserialize)]
struct StatementRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Description", default)]
    description: String,
    #[serde(rename = "Category", default)]
    category: String,
    #[serde(rename = "Amount")]
    amount: String,
}

/// Parsed statement totals plus the transactions to seed the ledger with.
#[derive(Debug, Clone, Default)]
pub struct StatementSummary {
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub transactions: Vec<Transaction>,
}

/// Reads a headered CSV statement. Rows categorized `revenue` or `income`
/// (case-insensitive) count as income, everything else as expense. Rows with
/// unparseable amounts or dates are skipped rather than failing the import.
pub fn parse_statement<R: Read>(reader: R) -> Result<StatementSummary, GigFinError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut summary = StatementSummary::default();

    for row in csv_reader.deserialize::<StatementRow>() {
        let row = row?;
        let Some(amount) = parse_amount(&row.amount) else {
            tracing::warn!(amount = %row.amount, "skipping statement row with bad amount");
            continue;
        };
        let Ok(date) = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d") else {
            tracing::warn!(date = %row.date, "skipping statement row with bad date");
            continue;
        };

        let lowered = row.category.trim().to_lowercase();
        let kind = if lowered == "revenue" || lowered == "income" {
            TransactionKind::Income
        } else {
            TransactionKind::Expense
        };
        match kind {
            TransactionKind::Income => summary.total_revenue += amount,
            _ => summary.total_expenses += amount,
        }

        let mut txn = Transaction::new(kind, amount, row.category.trim(), date);
        if !row.description.trim().is_empty() {
            txn = txn.with_description(row.description.trim());
        }
        summary.transactions.push(txn);
    }

    Ok(summary)
}

/// Parses a decimal rupee amount like `1200.50` into minor units, truncating
/// past two fractional digits. Negative or malformed values yield `None`.
fn parse_amount(raw: &str) -> Option<Money> {
    let trimmed = raw.trim();
    let (rupees, paise) = match trimmed.split_once('.') {
        Some((whole, frac)) => {
            let mut digits = frac.chars().take(2).collect::<String>();
            while digits.len() < 2 {
                digits.push('0');
            }
            (whole, digits)
        }
        None => (trimmed, "00".to_string()),
    };
    let rupees: i64 = rupees.parse().ok()?;
    let paise: i64 = paise.parse().ok()?;
    if rupees < 0 {
        return None;
    }
    let minor = rupees
        .checked_mul(MINOR_PER_RUPEE)
        .and_then(|m| m.checked_add(paise))?;
    Some(Money::from_minor(minor))
}
