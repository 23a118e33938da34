use std::collections::BTreeSet;

use crate::currency::Money;
use crate::ledger::{CreditPrediction, Transaction};

/// Bounds of the credit scale.
pub const CREDIT_SCORE_MIN: u16 = 300;
pub const CREDIT_SCORE_MAX: u16 = 900;

const BASE_SCORE: u16 = 300;
const POINTS_PER_TRACKED_DAY: u16 = 10;
const POSITIVE_NET_BONUS: u16 = 50;
const HISTORY_CAP: u16 = 850;

/// History-derived credit score: a base of 300, 10 points per distinct
/// tracked day, and a 50-point bonus when lifetime income beats lifetime
/// outflow, capped at 850.
pub fn history_credit_score(transactions: &[Transaction]) -> u16 {
    let tracked_days: BTreeSet<_> = transactions.iter().map(|t| t.date).collect();
    let mut score = BASE_SCORE
        .saturating_add((tracked_days.len() as u16).saturating_mul(POINTS_PER_TRACKED_DAY));

    let income: Money = transactions
        .iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum();
    let outflow: Money = transactions
        .iter()
        .filter(|t| t.kind.is_outflow())
        .map(|t| t.amount)
        .sum();
    if income > outflow {
        score = score.saturating_add(POSITIVE_NET_BONUS);
    }
    score.clamp(CREDIT_SCORE_MIN, HISTORY_CAP)
}

/// Local recovery rule applied when the external prediction service is
/// unreachable: debt above half of monthly income maps to 600, otherwise 750.
/// Total over its inputs, so the failure is never surfaced to the user.
pub fn fallback_prediction(debt: Money, annual_income: Money) -> CreditPrediction {
    let monthly_income = annual_income.div_by(12);
    let over_leveraged = if monthly_income > Money::ZERO {
        debt.to_f64() / monthly_income.to_f64() > 0.5
    } else {
        !debt.is_zero()
    };
    let score: u16 = if over_leveraged { 600 } else { 750 };
    CreditPrediction {
        gig_credit_score: score,
        approval_probability: if score > 700 { 0.8 } else { 0.6 },
        max_loan_amount: monthly_income.scale_permille(2000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionKind;
    use chrono::NaiveDate;

    fn txn(kind: TransactionKind, rupees: i64, day: u32) -> Transaction {
        Transaction::new(
            kind,
            Money::from_rupees(rupees),
            "Uber",
            NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
        )
    }

    #[test]
    fn empty_history_scores_the_base() {
        assert_eq!(history_credit_score(&[]), 300);
    }

    #[test]
    fn tracked_days_and_positive_net_add_points() {
        let transactions = vec![
            txn(TransactionKind::Income, 1000, 1),
            txn(TransactionKind::Income, 800, 2),
            txn(TransactionKind::Expense, 300, 2),
        ];
        // 300 + 2 days × 10 + 50 net bonus.
        assert_eq!(history_credit_score(&transactions), 370);
    }

    #[test]
    fn long_history_caps_at_850() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let transactions: Vec<_> = (0..90)
            .map(|offset| {
                Transaction::new(
                    TransactionKind::Income,
                    Money::from_rupees(1000),
                    "Uber",
                    start + chrono::Duration::days(offset),
                )
            })
            .collect();
        assert_eq!(history_credit_score(&transactions), 850);
    }

    #[test]
    fn fallback_rule_splits_on_debt_ratio() {
        let annual = Money::from_rupees(300_000); // ₹25,000/month
        let light = fallback_prediction(Money::from_rupees(10_000), annual);
        assert_eq!(light.gig_credit_score, 750);
        assert_eq!(light.approval_probability, 0.8);
        assert_eq!(light.max_loan_amount, Money::from_rupees(50_000));

        let heavy = fallback_prediction(Money::from_rupees(20_000), annual);
        assert_eq!(heavy.gig_credit_score, 600);
        assert_eq!(heavy.approval_probability, 0.6);
    }

    #[test]
    fn fallback_handles_zero_income() {
        let poor = fallback_prediction(Money::from_rupees(5_000), Money::ZERO);
        assert_eq!(poor.gig_credit_score, 600);
        let clean = fallback_prediction(Money::ZERO, Money::ZERO);
        assert_eq!(clean.gig_credit_score, 750);
    }
}
