//! Composite health, karma, and credit scoring. All functions here are pure
//! and total; zero denominators yield floor values instead of errors.

pub mod credit;
pub mod health;
pub mod karma;

pub use credit::{fallback_prediction, history_credit_score, CREDIT_SCORE_MAX, CREDIT_SCORE_MIN};
pub use health::{health_score, FinancialMetrics};
pub use karma::{karma_breakdown, karma_score, KarmaBreakdown};
