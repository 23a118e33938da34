//! Transaction store, user profile, and synthetic onboarding history.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod profile;
pub mod seed;
pub mod transaction;

pub use ledger::{ActivitySummary, DailyFlows, Ledger};
pub use profile::{CreditPrediction, Goal, GoalCategory, Priority, UserProfile};
pub use seed::seed_history;
pub use transaction::{Transaction, TransactionKind};
