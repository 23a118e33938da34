//! The aggregator: one immutable projection combining every derived metric,
//! recomputed on demand and handed read-only to the narration layer and UI.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::currency::Money;
use crate::forecast::{summarize_forecast, ForecastSummary, SafeDays, FORECAST_DAYS};
use crate::gamification::{level_for, streak, Level};
use crate::leaks::{detect, total_leak_amount, Leak};
use crate::ledger::{ActivitySummary, Goal, Ledger, UserProfile};
use crate::scoring::{health_score, karma_score, FinancialMetrics};

/// Signal thresholds for the overall-status heuristic. Deliberately a simple
/// count of booleans, not a statistical model; the exact values are part of
/// the behavioral contract.
const HEALTH_GOOD: u8 = 60;
const KARMA_GOOD: u8 = 60;
const CREDIT_GOOD: u16 = 650;
const RUNWAY_GOOD_DAYS: u32 = 14;
const LEAKS_OK: usize = 1;
const HEALTHY_SIGNALS: usize = 4;
const MODERATE_SIGNALS: usize = 2;
const RUNWAY_CRITICAL_DAYS: u32 = 7;
const CREDIT_POOR: u16 = 500;
const LEAKS_HIGH: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Moderate,
    Risky,
    Unknown,
}

/// Per-goal progress view derived for the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalProgress {
    pub id: Uuid,
    pub title: String,
    pub target_amount: Money,
    pub current_amount: Money,
    pub progress_percent: u8,
    pub deadline: NaiveDate,
}

impl GoalProgress {
    fn from_goal(goal: &Goal) -> Self {
        Self {
            id: goal.id,
            title: goal.title.clone(),
            target_amount: goal.target_amount,
            current_amount: goal.current_amount,
            progress_percent: goal.progress_percent(),
            deadline: goal.deadline,
        }
    }
}

/// Point-in-time combination of every derived score, the forecast, the leak
/// list, and goal progress. Always a projection over the ledger and profile,
/// never a source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub user_name: String,
    pub current_balance: Money,
    pub annual_income: Money,
    pub monthly_income: Money,
    pub monthly_expenses: Money,

    pub gig_credit_score: u16,
    pub approval_probability: f64,
    pub max_loan_amount: Money,

    pub karma_score: u8,
    pub health_score: u8,

    pub streak: u32,
    pub level: Level,
    pub level_progress: u8,

    pub overall_status: OverallStatus,
    pub status_reason: String,

    pub detected_leaks: Vec<Leak>,
    pub total_leak_amount: Money,

    pub goals: Vec<GoalProgress>,
    pub total_goal_progress: u8,
    /// Aggregate attainment probability, `min(95, progress + 10)`.
    pub goal_probability: u8,

    pub forecast: ForecastSummary,
    pub recent_activity: ActivitySummary,

    pub generated_at: DateTime<Utc>,
    pub has_complete_data: bool,
}

impl FinancialSnapshot {
    /// Assembles a snapshot from pre-computed karma and leaks, invoking the
    /// health scorer, streak calculator, and forecaster itself. Pure over its
    /// inputs apart from the supplied timestamps.
    pub fn assemble(
        ledger: &Ledger,
        profile: &UserProfile,
        karma: u8,
        leaks: Vec<Leak>,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        let balance = ledger.balance();
        let metrics = FinancialMetrics::from_profile(profile, balance);
        let health = health_score(&metrics);

        let streak_days = streak(&ledger.transactions, today);
        let level_info = level_for(streak_days);

        let forecast = summarize_forecast(&ledger.daily_flows(today, FORECAST_DAYS), balance);

        let goals: Vec<GoalProgress> = profile.goals.iter().map(GoalProgress::from_goal).collect();
        let total_goal_progress = aggregate_goal_progress(&profile.goals);
        let goal_probability = total_goal_progress.saturating_add(10).min(95);

        let (overall_status, status_reason) = determine_status(
            health,
            karma,
            profile.credit.gig_credit_score,
            forecast.safe_days,
            leaks.len(),
        );

        let has_complete_data =
            profile.credit.gig_credit_score > 0 && ledger.transaction_count() > 0;

        tracing::debug!(
            health,
            karma,
            streak = streak_days,
            status = ?overall_status,
            "snapshot assembled"
        );

        Self {
            user_name: profile.name.clone(),
            current_balance: balance,
            annual_income: profile.annual_income,
            monthly_income: profile.monthly_income(),
            monthly_expenses: profile.monthly_expenses,
            gig_credit_score: profile.credit.gig_credit_score,
            approval_probability: profile.credit.approval_probability,
            max_loan_amount: profile.credit.max_loan_amount,
            karma_score: karma,
            health_score: health,
            streak: streak_days,
            level: level_info.level,
            level_progress: level_info.progress.round().clamp(0.0, 100.0) as u8,
            overall_status,
            status_reason,
            total_leak_amount: total_leak_amount(&leaks),
            detected_leaks: leaks,
            goals,
            total_goal_progress,
            goal_probability,
            forecast,
            recent_activity: ledger.recent_activity(today),
            generated_at: now,
            has_complete_data,
        }
    }

    /// Convenience that derives karma and the leak list first, then delegates
    /// to [`FinancialSnapshot::assemble`].
    pub fn compute(
        ledger: &Ledger,
        profile: &UserProfile,
        config: &AppConfig,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        let karma = karma_score(ledger, config, profile.app_streak, today);
        let leaks = detect(&ledger.transactions, ledger.balance());
        Self::assemble(ledger, profile, karma, leaks, today, now)
    }

    /// Placeholder snapshot shown before onboarding completes.
    pub fn minimal(now: DateTime<Utc>) -> Self {
        Self {
            user_name: "User".into(),
            current_balance: Money::ZERO,
            annual_income: Money::ZERO,
            monthly_income: Money::ZERO,
            monthly_expenses: Money::ZERO,
            gig_credit_score: 0,
            approval_probability: 0.0,
            max_loan_amount: Money::ZERO,
            karma_score: 0,
            health_score: 0,
            streak: 0,
            level: Level::Rookie,
            level_progress: 0,
            overall_status: OverallStatus::Unknown,
            status_reason: "Complete onboarding to see your financial status.".into(),
            detected_leaks: Vec::new(),
            total_leak_amount: Money::ZERO,
            goals: Vec::new(),
            total_goal_progress: 0,
            goal_probability: 0,
            forecast: ForecastSummary {
                safe_days: SafeDays::Days(0),
                daily_save_target: Money::ZERO,
                trend: crate::forecast::Trend::Stable,
                base_end_balance: Money::ZERO,
                stressed_end_balance: Money::ZERO,
            },
            recent_activity: ActivitySummary::default(),
            generated_at: now,
            has_complete_data: false,
        }
    }
}

/// Aggregate funded percentage across all goals, from the summed amounts
/// rather than an average of percentages.
fn aggregate_goal_progress(goals: &[Goal]) -> u8 {
    let total_target: Money = goals.iter().map(|g| g.target_amount).sum();
    if total_target.minor() <= 0 {
        return 0;
    }
    let total_current: Money = goals.iter().map(|g| g.current_amount).sum();
    let ratio = total_current.to_f64() / total_target.to_f64();
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Signal-count status heuristic. Four or five good signals are healthy, two
/// or three moderate, fewer risky; the reason strings follow a fixed priority
/// order per band.
fn determine_status(
    health: u8,
    karma: u8,
    credit: u16,
    safe_days: SafeDays,
    leak_count: usize,
) -> (OverallStatus, String) {
    let health_good = health >= HEALTH_GOOD;
    let karma_good = karma >= KARMA_GOOD;
    let credit_good = credit >= CREDIT_GOOD;
    let runway_good = safe_days.is_at_least(RUNWAY_GOOD_DAYS);
    let no_major_leaks = leak_count <= LEAKS_OK;
    let positive = [health_good, karma_good, credit_good, runway_good, no_major_leaks]
        .iter()
        .filter(|signal| **signal)
        .count();

    if positive >= HEALTHY_SIGNALS {
        (
            OverallStatus::Healthy,
            "Your scores are strong and cash flow looks stable.".into(),
        )
    } else if positive >= MODERATE_SIGNALS {
        let reason = if !runway_good {
            "Your cash runway is shorter than recommended."
        } else if !karma_good {
            "Your work consistency could be improved."
        } else if !no_major_leaks {
            "Detected some expense leaks to review."
        } else {
            "Some areas need attention."
        };
        (OverallStatus::Moderate, reason.into())
    } else {
        let reason = if safe_days.is_below(RUNWAY_CRITICAL_DAYS) {
            "Your cash runway is critically low."
        } else if credit < CREDIT_POOR {
            "Your credit score needs improvement."
        } else if leak_count > LEAKS_HIGH {
            "High expense leaks detected."
        } else {
            "Multiple areas need immediate attention."
        };
        (OverallStatus::Risky, reason.into())
    }
}
