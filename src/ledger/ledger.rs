use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::{Transaction, TransactionKind};
use crate::currency::Money;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Append-only transaction store. The cash balance is always derived from the
/// transaction sum on read; there is no separately mutated running balance to
/// fall out of sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        tracing::debug!(kind = ?transaction.kind, amount = %transaction.amount, "transaction appended");
        self.transactions.push(transaction);
        self.touch();
        id
    }

    /// Wholesale replacement, used when synthetic onboarding history is
    /// regenerated.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) {
        self.transactions = transactions;
        self.touch();
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Net cash position: income credits, expense and withdrawal debit.
    pub fn balance(&self) -> Money {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }

    pub fn total_income(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum()
    }

    pub fn total_outflow(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.kind.is_outflow())
            .map(|t| t.amount)
            .sum()
    }

    pub fn transactions_since(&self, cutoff: NaiveDate) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(move |t| t.date >= cutoff)
    }

    /// Distinct dates carrying at least one income transaction, ascending.
    pub fn income_dates(&self) -> Vec<NaiveDate> {
        let dates: BTreeSet<NaiveDate> = self
            .transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.date)
            .collect();
        dates.into_iter().collect()
    }

    /// Zero-filled per-day revenue and expense buckets for the trailing
    /// `days`-day window ending at `today`, oldest day first.
    pub fn daily_flows(&self, today: NaiveDate, days: usize) -> DailyFlows {
        let mut revenue = vec![Money::ZERO; days];
        let mut expenses = vec![Money::ZERO; days];
        let window_start = today - Duration::days(days as i64 - 1);
        for txn in &self.transactions {
            if txn.date < window_start || txn.date > today {
                continue;
            }
            let index = (txn.date - window_start).num_days() as usize;
            match txn.kind {
                TransactionKind::Income => revenue[index] += txn.amount,
                TransactionKind::Expense | TransactionKind::Withdrawal => {
                    expenses[index] += txn.amount
                }
            }
        }
        DailyFlows { revenue, expenses }
    }

    /// Trailing 7-day activity digest for the snapshot and narration layers.
    pub fn recent_activity(&self, today: NaiveDate) -> ActivitySummary {
        let cutoff = today - Duration::days(6);
        let mut summary = ActivitySummary::default();
        let mut by_category: HashMap<&str, Money> = HashMap::new();
        for txn in self.transactions_since(cutoff) {
            if txn.date > today {
                continue;
            }
            summary.transaction_count += 1;
            match txn.kind {
                TransactionKind::Income => summary.total_income += txn.amount,
                TransactionKind::Expense => {
                    summary.total_expenses += txn.amount;
                    *by_category.entry(txn.category.as_str()).or_default() += txn.amount;
                }
                TransactionKind::Withdrawal => summary.total_expenses += txn.amount,
            }
        }
        summary.net_flow = summary.total_income - summary.total_expenses;
        if let Some((category, amount)) = by_category
            .into_iter()
            .max_by_key(|(_, amount)| amount.minor())
        {
            summary.top_expense_category = category.to_string();
            summary.top_expense_amount = amount;
        }
        summary
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-day revenue and expense vectors feeding the forecast engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyFlows {
    pub revenue: Vec<Money>,
    pub expenses: Vec<Money>,
}

impl DailyFlows {
    pub fn total_revenue(&self) -> Money {
        self.revenue.iter().copied().sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.expenses.iter().copied().sum()
    }

    pub fn days(&self) -> usize {
        self.revenue.len()
    }
}

/// Trailing 7-day transaction digest.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivitySummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub net_flow: Money,
    pub top_expense_category: String,
    pub top_expense_amount: Money,
    pub transaction_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    #[test]
    fn balance_is_derived_from_transactions() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::new(
            TransactionKind::Income,
            Money::from_rupees(1200),
            "Uber",
            day(1),
        ));
        ledger.add_transaction(Transaction::new(
            TransactionKind::Expense,
            Money::from_rupees(300),
            "Fuel",
            day(1),
        ));
        ledger.add_transaction(Transaction::new(
            TransactionKind::Withdrawal,
            Money::from_rupees(200),
            "Salary Transfer",
            day(2),
        ));
        assert_eq!(ledger.balance(), Money::from_rupees(700));
    }

    #[test]
    fn daily_flows_zero_fill_inactive_days() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::new(
            TransactionKind::Income,
            Money::from_rupees(1000),
            "Uber",
            day(10),
        ));
        let flows = ledger.daily_flows(day(10), 5);
        assert_eq!(flows.days(), 5);
        assert_eq!(flows.revenue[4], Money::from_rupees(1000));
        assert!(flows.revenue[..4].iter().all(|m| m.is_zero()));
        assert!(flows.expenses.iter().all(|m| m.is_zero()));
    }

    #[test]
    fn recent_activity_tracks_top_category() {
        let mut ledger = Ledger::new();
        ledger.add_transaction(Transaction::new(
            TransactionKind::Expense,
            Money::from_rupees(150),
            "Food",
            day(9),
        ));
        ledger.add_transaction(Transaction::new(
            TransactionKind::Expense,
            Money::from_rupees(300),
            "Fuel",
            day(10),
        ));
        // Outside the 7-day window, must be ignored.
        ledger.add_transaction(Transaction::new(
            TransactionKind::Expense,
            Money::from_rupees(9000),
            "Repairs",
            day(1),
        ));
        let activity = ledger.recent_activity(day(10));
        assert_eq!(activity.top_expense_category, "Fuel");
        assert_eq!(activity.total_expenses, Money::from_rupees(450));
        assert_eq!(activity.transaction_count, 2);
    }

    #[test]
    fn recent_activity_window_is_seven_days_inclusive() {
        let mut ledger = Ledger::new();
        for d in 3..=10 {
            ledger.add_transaction(Transaction::new(
                TransactionKind::Income,
                Money::from_rupees(100),
                "Uber",
                day(d),
            ));
        }
        // Day 3 is 7 days back and falls outside the window; days 4..=10 stay.
        let activity = ledger.recent_activity(day(10));
        assert_eq!(activity.transaction_count, 7);
        assert_eq!(activity.total_income, Money::from_rupees(700));
    }
}
