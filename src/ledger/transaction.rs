use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Money;

/// Immutable dated money movement. The ledger only appends these or replaces
/// the whole collection; nothing mutates a transaction after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    /// Non-negative by construction; direction comes from `kind`.
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount: amount.max(Money::ZERO),
            category: category.into(),
            date,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Positive for income, negative for expenses and withdrawals.
    pub fn signed_amount(&self) -> Money {
        if self.kind.is_outflow() {
            -self.amount
        } else {
            self.amount
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
    Withdrawal,
}

impl TransactionKind {
    pub fn is_outflow(self) -> bool {
        matches!(self, TransactionKind::Expense | TransactionKind::Withdrawal)
    }
}
