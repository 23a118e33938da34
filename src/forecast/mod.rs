//! Cashflow projection under base, optimistic, and stressed assumptions,
//! plus the derived runway and savings target.

use serde::{Deserialize, Serialize};

use crate::currency::Money;
use crate::ledger::DailyFlows;

/// Projection horizon in days.
pub const FORECAST_DAYS: usize = 30;

/// Buffer target: three months of average expenses, saved over six months.
const BUFFER_DAYS: i64 = 90;
const SAVINGS_HORIZON_DAYS: i64 = 180;

/// Per-mille revenue/expense multipliers for each scenario.
const OPTIMISTIC_REVENUE: i64 = 1100;
const OPTIMISTIC_EXPENSE: i64 = 950;
const STRESSED_REVENUE: i64 = 800;
const STRESSED_EXPENSE: i64 = 1100;

/// Daily net flow above which the trend counts as positive, below the
/// negation of which it counts as negative.
const TREND_BAND: Money = Money::from_minor(100 * 100);

/// Runway before the stressed projection dips below zero. `Unbounded` marks a
/// non-negative stressed net flow, where the balance never runs out.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SafeDays {
    Days(u32),
    Unbounded,
}

impl SafeDays {
    pub fn is_at_least(self, days: u32) -> bool {
        match self {
            SafeDays::Days(d) => d >= days,
            SafeDays::Unbounded => true,
        }
    }

    pub fn is_below(self, days: u32) -> bool {
        !self.is_at_least(days)
    }
}

impl std::fmt::Display for SafeDays {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafeDays::Days(d) => write!(f, "{d}"),
            SafeDays::Unbounded => f.write_str("unbounded"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Positive,
    Negative,
    Stable,
}

/// Full projection output: one 30-element running-balance sequence per
/// scenario plus the derived runway and savings target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Forecast {
    pub base: Vec<Money>,
    pub optimistic: Vec<Money>,
    pub stressed: Vec<Money>,
    pub safe_days: SafeDays,
    pub daily_save_target: Money,
}

impl Forecast {
    pub fn base_end_balance(&self) -> Money {
        self.base.last().copied().unwrap_or(Money::ZERO)
    }

    pub fn stressed_end_balance(&self) -> Money {
        self.stressed.last().copied().unwrap_or(Money::ZERO)
    }
}

/// Condensed view the snapshot carries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastSummary {
    pub safe_days: SafeDays,
    pub daily_save_target: Money,
    pub trend: Trend,
    pub base_end_balance: Money,
    pub stressed_end_balance: Money,
}

/// Projects the running balance for each scenario by repeated addition of the
/// scenario's average daily net flow. All arithmetic stays in minor units, so
/// re-running the projection with the same inputs is bit-identical.
pub fn generate_forecast(flows: &DailyFlows, current_balance: Money) -> Forecast {
    let days = flows.days().max(1) as i64;
    let avg_revenue = flows.total_revenue().div_by(days);
    let avg_expense = flows.total_expenses().div_by(days);

    let base_net = avg_revenue - avg_expense;
    let optimistic_net = avg_revenue.scale_permille(OPTIMISTIC_REVENUE)
        - avg_expense.scale_permille(OPTIMISTIC_EXPENSE);
    let stressed_net = avg_revenue.scale_permille(STRESSED_REVENUE)
        - avg_expense.scale_permille(STRESSED_EXPENSE);

    let base = project(current_balance, base_net);
    let optimistic = project(current_balance, optimistic_net);
    let stressed = project(current_balance, stressed_net);

    let safe_days = runway(&stressed, stressed_net, current_balance);

    let target_buffer = avg_expense.scale_permille(BUFFER_DAYS * 1000);
    let gap = (target_buffer - current_balance).max(Money::ZERO);
    let daily_save_target = gap.div_by(SAVINGS_HORIZON_DAYS);

    Forecast {
        base,
        optimistic,
        stressed,
        safe_days,
        daily_save_target,
    }
}

/// Summarizes a forecast along with the raw-window trend classification.
pub fn summarize_forecast(flows: &DailyFlows, current_balance: Money) -> ForecastSummary {
    let forecast = generate_forecast(flows, current_balance);
    let days = flows.days().max(1) as i64;
    let net = (flows.total_revenue() - flows.total_expenses()).div_by(days);
    let trend = if net > TREND_BAND {
        Trend::Positive
    } else if net < -TREND_BAND {
        Trend::Negative
    } else {
        Trend::Stable
    };
    ForecastSummary {
        safe_days: forecast.safe_days,
        daily_save_target: forecast.daily_save_target,
        trend,
        base_end_balance: forecast.base_end_balance(),
        stressed_end_balance: forecast.stressed_end_balance(),
    }
}

fn project(start: Money, net_flow: Money) -> Vec<Money> {
    let mut balances = Vec::with_capacity(FORECAST_DAYS);
    let mut cash = start;
    for _ in 0..FORECAST_DAYS {
        cash += net_flow;
        balances.push(cash);
    }
    balances
}

/// First 0-based day the stressed sequence goes negative; if it stays
/// non-negative through the window, extrapolate from the net flow.
fn runway(stressed: &[Money], stressed_net: Money, balance: Money) -> SafeDays {
    if let Some(day) = stressed.iter().position(|cash| cash.is_negative()) {
        return SafeDays::Days(day as u32);
    }
    if stressed_net.is_negative() {
        let days = balance
            .max(Money::ZERO)
            .div_floor(stressed_net.abs())
            .unwrap_or(0);
        SafeDays::Days(u32::try_from(days).unwrap_or(u32::MAX))
    } else {
        SafeDays::Unbounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flows(revenue_per_day: i64, expense_per_day: i64) -> DailyFlows {
        DailyFlows {
            revenue: vec![Money::from_rupees(revenue_per_day); FORECAST_DAYS],
            expenses: vec![Money::from_rupees(expense_per_day); FORECAST_DAYS],
        }
    }

    #[test]
    fn stressed_runway_matches_worked_example() {
        // avg revenue 1000, avg expense 1100: stressed net = 800 - 1210 = -410.
        // From 5000 the sequence first goes negative on index 12 (-330),
        // agreeing with the extrapolation floor(5000 / 410) = 12.
        let forecast = generate_forecast(&flows(1000, 1100), Money::from_rupees(5000));
        assert_eq!(forecast.safe_days, SafeDays::Days(12));
    }

    #[test]
    fn runway_beyond_window_extrapolates_from_net_flow() {
        // Stressed net = 800 - 946 = -146/day; the window low point is
        // 5000 - 146×30 = 620, still positive, so the crossing is
        // extrapolated: floor(5000 / 146) = 34.
        let forecast = generate_forecast(&flows(1000, 860), Money::from_rupees(5000));
        assert_eq!(forecast.safe_days, SafeDays::Days(34));
    }

    #[test]
    fn extreme_balance_to_flow_ratio_saturates_the_runway() {
        // Net stressed drain of one paisa a day against a near-max balance:
        // the extrapolated day count overflows u32 and must pin at its max.
        let trickle = DailyFlows {
            revenue: vec![Money::ZERO; FORECAST_DAYS],
            expenses: vec![Money::from_minor(1); FORECAST_DAYS],
        };
        let forecast = generate_forecast(&trickle, Money::from_minor(i64::MAX));
        assert_eq!(forecast.safe_days, SafeDays::Days(u32::MAX));
    }

    #[test]
    fn non_negative_stressed_flow_is_unbounded() {
        let forecast = generate_forecast(&flows(2000, 500), Money::from_rupees(100));
        assert_eq!(forecast.safe_days, SafeDays::Unbounded);
        assert!(forecast.safe_days.is_at_least(14));
    }

    #[test]
    fn in_window_zero_crossing_wins_over_extrapolation() {
        // Stressed net = 800 - 2200 = -1400/day against a 5000 balance:
        // crosses on index 3 (5000 - 1400×4 = -600).
        let forecast = generate_forecast(&flows(1000, 2000), Money::from_rupees(5000));
        assert_eq!(forecast.safe_days, SafeDays::Days(3));
    }

    #[test]
    fn projection_is_repeated_addition() {
        let forecast = generate_forecast(&flows(1000, 400), Money::from_rupees(100));
        assert_eq!(forecast.base.len(), FORECAST_DAYS);
        assert_eq!(forecast.base[0], Money::from_rupees(700));
        assert_eq!(forecast.base[29], Money::from_rupees(100 + 600 * 30));
    }

    #[test]
    fn save_target_amortizes_buffer_gap() {
        // Buffer = 90 × 1100 = 99,000; gap = 94,000; target = gap / 180.
        let forecast = generate_forecast(&flows(1000, 1100), Money::from_rupees(5000));
        assert_eq!(
            forecast.daily_save_target,
            Money::from_minor((Money::from_rupees(94_000).minor()) / 180)
        );
    }

    #[test]
    fn funded_buffer_needs_no_saving() {
        let forecast = generate_forecast(&flows(1000, 100), Money::from_rupees(50_000));
        assert_eq!(forecast.daily_save_target, Money::ZERO);
    }

    #[test]
    fn empty_window_yields_unbounded_runway() {
        let empty = DailyFlows {
            revenue: Vec::new(),
            expenses: Vec::new(),
        };
        let forecast = generate_forecast(&empty, Money::ZERO);
        assert_eq!(forecast.safe_days, SafeDays::Unbounded);
        assert_eq!(forecast.daily_save_target, Money::ZERO);
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let a = generate_forecast(&flows(950, 400), Money::from_rupees(4500));
        let b = generate_forecast(&flows(950, 400), Money::from_rupees(4500));
        assert_eq!(a, b);
    }

    #[test]
    fn trend_classification_uses_hundred_rupee_band() {
        assert_eq!(
            summarize_forecast(&flows(1000, 400), Money::ZERO).trend,
            Trend::Positive
        );
        assert_eq!(
            summarize_forecast(&flows(400, 1000), Money::ZERO).trend,
            Trend::Negative
        );
        assert_eq!(
            summarize_forecast(&flows(500, 450), Money::ZERO).trend,
            Trend::Stable
        );
    }
}
