//! Rule-based expense leak detection. Two independent rules run over the full
//! transaction set; when neither fires, a single synthetic placeholder keeps
//! the result non-empty for the presentation layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Money;
use crate::ledger::Transaction;

/// Fuel transactions above `mean × FUEL_SPIKE_PERMILLE / 1000` are spikes.
const FUEL_SPIKE_PERMILLE: i64 = 1200;
/// Expenses above this share of the balance are flagged outright.
const HIGH_EXPENSE_BALANCE_PERMILLE: i64 = 100;
/// Placeholder amount when no rule fires.
const SYNTHETIC_FEE: Money = Money::from_rupees(120);
/// Discovery-order truncation cap.
const MAX_LEAKS: usize = 3;

const FUEL_CATEGORY: &str = "Fuel";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeakKind {
    FuelSpike,
    HiddenFee,
    Subscription,
    HighExpense,
}

impl LeakKind {
    pub fn label(self) -> &'static str {
        match self {
            LeakKind::FuelSpike => "Fuel Spike",
            LeakKind::HiddenFee => "Hidden Fee",
            LeakKind::Subscription => "Subscription",
            LeakKind::HighExpense => "High Expense",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

/// A flagged transaction suspected of being an avoidable or anomalous cost.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Leak {
    pub id: Uuid,
    pub kind: LeakKind,
    pub amount: Money,
    pub risk: RiskLevel,
    /// Set only on the placeholder emitted when no rule fired; a product
    /// decision to avoid an empty list, not a detection result.
    #[serde(default)]
    pub synthetic: bool,
}

impl Leak {
    fn detected(kind: LeakKind, amount: Money, risk: RiskLevel) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            risk,
            synthetic: false,
        }
    }
}

/// Runs both rules over the full transaction set, capped to the first three
/// findings in discovery order. Fuel spikes are flagged by the margin over
/// the category mean; high expenses by their full amount against a tenth of
/// the current balance.
pub fn detect(transactions: &[Transaction], current_balance: Money) -> Vec<Leak> {
    let mut leaks = Vec::new();

    let fuel: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| t.category == FUEL_CATEGORY)
        .collect();
    if !fuel.is_empty() {
        let total: Money = fuel.iter().map(|t| t.amount).sum();
        let mean = total.div_by(fuel.len() as i64);
        let threshold = mean.scale_permille(FUEL_SPIKE_PERMILLE);
        for txn in &fuel {
            if txn.amount > threshold {
                leaks.push(Leak::detected(
                    LeakKind::FuelSpike,
                    txn.amount - mean,
                    RiskLevel::High,
                ));
            }
        }
    }

    let high_expense_floor = current_balance.scale_permille(HIGH_EXPENSE_BALANCE_PERMILLE);
    for txn in transactions {
        if txn.is_expense() && txn.amount > high_expense_floor {
            leaks.push(Leak::detected(
                LeakKind::HighExpense,
                txn.amount,
                RiskLevel::Medium,
            ));
        }
    }

    if leaks.is_empty() {
        leaks.push(Leak {
            id: Uuid::new_v4(),
            kind: LeakKind::HiddenFee,
            amount: SYNTHETIC_FEE,
            risk: RiskLevel::Low,
            synthetic: true,
        });
    }

    // Discovery-order truncation, deliberately not sorted by severity.
    leaks.truncate(MAX_LEAKS);
    leaks
}

/// Sum of flagged amounts, synthetic placeholder included.
pub fn total_leak_amount(leaks: &[Leak]) -> Money {
    leaks.iter().map(|l| l.amount).sum()
}
