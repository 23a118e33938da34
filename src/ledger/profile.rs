use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::Money;

/// Profile fields the derived-metrics engines read. The cash balance lives on
/// the ledger, not here; see `Ledger::balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    pub annual_income: Money,
    pub monthly_expenses: Money,
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// Consecutive days the app itself was opened, maintained by the UI shell.
    #[serde(default)]
    pub app_streak: u32,
    #[serde(default)]
    pub credit: CreditPrediction,
}

impl UserProfile {
    pub fn monthly_income(&self) -> Money {
        self.annual_income.div_by(12)
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".into(),
            occupation: None,
            annual_income: Money::ZERO,
            monthly_expenses: Money::ZERO,
            goals: Vec::new(),
            app_streak: 0,
            credit: CreditPrediction::default(),
        }
    }
}

/// Savings goal created by user action and funded outside the core; the core
/// only derives progress from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub title: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub deadline: NaiveDate,
    pub priority: Priority,
    pub category: GoalCategory,
}

impl Goal {
    /// Percent funded, rounded, 0 when the target is unset.
    pub fn progress_percent(&self) -> u8 {
        if self.target_amount.minor() <= 0 {
            return 0;
        }
        let ratio = self.current_amount.to_f64() / self.target_amount.to_f64();
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GoalCategory {
    Personal,
    Emergency,
    Travel,
    Gadget,
    Work,
}

/// Scores sourced from the external prediction service, or from the local
/// fallback rule when that service is unreachable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreditPrediction {
    /// 300–900 scale.
    pub gig_credit_score: u16,
    /// 0–1 scale.
    pub approval_probability: f64,
    pub max_loan_amount: Money,
}

impl Default for CreditPrediction {
    fn default() -> Self {
        Self {
            gig_credit_score: 650,
            approval_probability: 0.5,
            max_loan_amount: Money::from_rupees(10_000),
        }
    }
}
