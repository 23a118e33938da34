use crate::currency::Money;
use crate::ledger::UserProfile;

/// Target ceilings each ratio is normalized against.
const MARGIN_TARGET: f64 = 0.30;
const LIQUIDITY_TARGET: f64 = 2.0;
const EXPENSE_RATIO_TARGET: f64 = 0.5;

/// Sub-score weights: margin, liquidity, efficiency, leverage.
const WEIGHTS: [f64; 4] = [0.4, 0.3, 0.2, 0.1];

/// Leverage stand-in when no per-task rate data is available.
const DEFAULT_OPERATIONAL_LEVERAGE: f64 = 0.3;

/// Normalized ratios feeding the composite health score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinancialMetrics {
    /// `(income - expenses) / income`, floored at 0; 0 when income is 0.
    pub margin: f64,
    /// `balance / monthly expenses`; 0 when expenses are 0.
    pub liquidity_ratio: f64,
    /// `expenses / income`; 1 when income is 0.
    pub expense_revenue_ratio: f64,
    pub operational_leverage: f64,
}

impl FinancialMetrics {
    /// Derives the ratios from profile figures and the ledger balance. Every
    /// division is zero-guarded so the result is total over its inputs.
    pub fn from_profile(profile: &UserProfile, balance: Money) -> Self {
        let income = profile.monthly_income().to_f64();
        let expenses = profile.monthly_expenses.to_f64();
        let margin = if income > 0.0 {
            ((income - expenses) / income).max(0.0)
        } else {
            0.0
        };
        let liquidity_ratio = if expenses > 0.0 {
            balance.to_f64() / expenses
        } else {
            0.0
        };
        let expense_revenue_ratio = if income > 0.0 { expenses / income } else { 1.0 };
        Self {
            margin,
            liquidity_ratio,
            expense_revenue_ratio,
            operational_leverage: DEFAULT_OPERATIONAL_LEVERAGE,
        }
    }
}

/// Composite 0-100 financial health score: each ratio normalized against its
/// target ceiling, then weighted 0.4/0.3/0.2/0.1.
pub fn health_score(metrics: &FinancialMetrics) -> u8 {
    let margin_score = (metrics.margin / MARGIN_TARGET).min(1.0) * 100.0;
    let liquidity_score = (metrics.liquidity_ratio / LIQUIDITY_TARGET).min(1.0) * 100.0;
    // An expense ratio of 0.5 scores 100; 1.0 scores 0.
    let efficiency_score =
        ((1.0 - metrics.expense_revenue_ratio) / EXPENSE_RATIO_TARGET).max(0.0) * 100.0;
    let efficiency_score = efficiency_score.min(100.0);
    let leverage_score = (1.0 - metrics.operational_leverage).max(0.0) * 100.0;

    let weighted = margin_score * WEIGHTS[0]
        + liquidity_score * WEIGHTS[1]
        + efficiency_score * WEIGHTS[2]
        + leverage_score * WEIGHTS[3];
    weighted.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Money;
    use crate::ledger::UserProfile;

    fn profile(annual: i64, monthly_expenses: i64) -> UserProfile {
        UserProfile {
            annual_income: Money::from_rupees(annual),
            monthly_expenses: Money::from_rupees(monthly_expenses),
            ..UserProfile::default()
        }
    }

    #[test]
    fn strong_profile_scores_high() {
        let metrics = FinancialMetrics {
            margin: 0.35,
            liquidity_ratio: 2.5,
            expense_revenue_ratio: 0.4,
            operational_leverage: 0.3,
        };
        // All sub-scores saturate except leverage: 40 + 30 + 20 + 7 = 97.
        assert_eq!(health_score(&metrics), 97);
    }

    #[test]
    fn zero_income_yields_floor_not_nan() {
        let metrics = FinancialMetrics::from_profile(&profile(0, 5000), Money::ZERO);
        assert_eq!(metrics.margin, 0.0);
        assert_eq!(metrics.expense_revenue_ratio, 1.0);
        let score = health_score(&metrics);
        assert!(score <= 100);
    }

    #[test]
    fn zero_expenses_guard_liquidity_division() {
        let metrics = FinancialMetrics::from_profile(&profile(300_000, 0), Money::from_rupees(5000));
        assert_eq!(metrics.liquidity_ratio, 0.0);
    }

    #[test]
    fn score_stays_within_bounds() {
        let extremes = [
            FinancialMetrics {
                margin: 10.0,
                liquidity_ratio: 50.0,
                expense_revenue_ratio: -3.0,
                operational_leverage: -1.0,
            },
            FinancialMetrics {
                margin: -1.0,
                liquidity_ratio: -5.0,
                expense_revenue_ratio: 4.0,
                operational_leverage: 2.0,
            },
        ];
        for metrics in extremes {
            assert!(health_score(&metrics) <= 100);
        }
    }
}
