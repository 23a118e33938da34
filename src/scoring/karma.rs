use std::collections::BTreeSet;

use chrono::{Duration, NaiveDate};

use crate::config::AppConfig;
use crate::currency::Money;
use crate::ledger::Ledger;

const WINDOW_DAYS: i64 = 7;
const CONSISTENCY_CEILING: f64 = 40.0;
const PERFORMANCE_FULL: u8 = 30;
const PERFORMANCE_PARTIAL: u8 = 15;
const LOYALTY_CEILING: u32 = 30;

/// Component-wise view of the karma score. The total is what the aggregator
/// publishes; the parts feed the score-breakdown UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KarmaBreakdown {
    /// `(unique income days / 7) × 40`.
    pub consistency: f64,
    /// 30 at target, 15 below target, 0 with no earnings.
    pub performance: u8,
    /// `min(app streak × 2, 30)`.
    pub loyalty: u8,
}

impl KarmaBreakdown {
    pub fn total(&self) -> u8 {
        let sum = self.consistency + self.performance as f64 + self.loyalty as f64;
        sum.round().clamp(0.0, 100.0) as u8
    }
}

/// Karma score over the trailing 7 calendar days: work-day density, earnings
/// performance against the configured daily target, and app-open loyalty.
/// Zero worked days in the window zeroes both the consistency and performance
/// components.
pub fn karma_breakdown(
    ledger: &Ledger,
    config: &AppConfig,
    app_streak: u32,
    today: NaiveDate,
) -> KarmaBreakdown {
    // `today` counts as a window day, so the cutoff reaches back 6 days.
    let cutoff = today - Duration::days(WINDOW_DAYS - 1);
    let mut worked_days: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut total_earnings = Money::ZERO;
    for txn in ledger.transactions_since(cutoff) {
        if txn.date > today || !txn.is_income() {
            continue;
        }
        total_earnings += txn.amount;
        if !txn.amount.is_zero() {
            worked_days.insert(txn.date);
        }
    }

    let consistency = worked_days.len() as f64 / WINDOW_DAYS as f64 * CONSISTENCY_CEILING;
    let performance = if worked_days.is_empty() {
        0
    } else {
        let avg_earnings = total_earnings.div_by(worked_days.len() as i64);
        if avg_earnings >= config.daily_target {
            PERFORMANCE_FULL
        } else if avg_earnings > Money::ZERO {
            PERFORMANCE_PARTIAL
        } else {
            0
        }
    };
    let loyalty = app_streak.saturating_mul(2).min(LOYALTY_CEILING) as u8;

    KarmaBreakdown {
        consistency,
        performance,
        loyalty,
    }
}

/// Convenience wrapper returning only the clamped 0-100 total.
pub fn karma_score(ledger: &Ledger, config: &AppConfig, app_streak: u32, today: NaiveDate) -> u8 {
    karma_breakdown(ledger, config, app_streak, today).total()
}
