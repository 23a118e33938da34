//! Deterministic narration fallbacks. The external LLM call lives outside
//! this crate; when it is unavailable these templates answer instead, and
//! they only ever restate numbers already present in the snapshot.

use crate::currency::format_inr;
use crate::snapshot::{FinancialSnapshot, OverallStatus};

/// Coarse query intent matched by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Balance,
    Status,
    Leaks,
    Greeting,
    Other,
}

pub const WELCOME_MESSAGE: &str = "Hello! I'm your GigLens assistant. I can see your \
financial data and help explain your status. What would you like to know?";

pub const NO_DATA_MESSAGE: &str = "I don't have enough data yet to answer that accurately. \
Please complete your financial profile first.";

/// Keyword intent classification over the raw user message.
pub fn classify(message: &str) -> Intent {
    let lower = message.to_lowercase();
    if lower.contains("balance") {
        Intent::Balance
    } else if lower.contains("status") || lower.contains("score") {
        Intent::Status
    } else if lower.contains("leak") || lower.contains("expense") {
        Intent::Leaks
    } else if lower.contains("hello") || lower.contains("hi") {
        Intent::Greeting
    } else {
        Intent::Other
    }
}

/// Renders the template answer for a message against a snapshot. Falls back
/// to the fixed no-data message when the snapshot is incomplete.
pub fn fallback_response(message: &str, snapshot: &FinancialSnapshot) -> String {
    if !snapshot.has_complete_data {
        return match classify(message) {
            Intent::Greeting => WELCOME_MESSAGE.to_string(),
            _ => NO_DATA_MESSAGE.to_string(),
        };
    }

    match classify(message) {
        Intent::Balance => format!(
            "Your current balance is {}. In the last 7 days, you earned {}.",
            format_inr(snapshot.current_balance),
            format_inr(snapshot.recent_activity.total_income),
        ),
        Intent::Status => format!(
            "Your financial status is {}. {} Your GigLens score is {}/100.",
            status_label(snapshot.overall_status),
            snapshot.status_reason,
            snapshot.health_score,
        ),
        Intent::Leaks => match snapshot.detected_leaks.iter().find(|l| !l.synthetic) {
            Some(leak) => format!(
                "I detected a {} of {}. Your top expense category is {}.",
                leak.kind.label(),
                format_inr(leak.amount),
                top_category(snapshot),
            ),
            None => format!(
                "No major expense leaks detected. Your top expense category is {}.",
                top_category(snapshot),
            ),
        },
        Intent::Greeting => WELCOME_MESSAGE.to_string(),
        Intent::Other => format!(
            "I can see your financial data. Your balance is {} and your status is {}. \
             What would you like to know more about?",
            format_inr(snapshot.current_balance),
            status_label(snapshot.overall_status),
        ),
    }
}

fn status_label(status: OverallStatus) -> &'static str {
    match status {
        OverallStatus::Healthy => "healthy",
        OverallStatus::Moderate => "moderate",
        OverallStatus::Risky => "risky",
        OverallStatus::Unknown => "unknown",
    }
}

fn top_category(snapshot: &FinancialSnapshot) -> &str {
    let category = snapshot.recent_activity.top_expense_category.as_str();
    if category.is_empty() {
        "None"
    } else {
        category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn classifies_common_intents() {
        assert_eq!(classify("What's my balance?"), Intent::Balance);
        assert_eq!(classify("how is my SCORE doing"), Intent::Status);
        assert_eq!(classify("any leaks this week"), Intent::Leaks);
        assert_eq!(classify("hello there"), Intent::Greeting);
        assert_eq!(classify("tell me a joke"), Intent::Other);
    }

    #[test]
    fn incomplete_data_always_gets_the_no_data_message() {
        let snapshot = FinancialSnapshot::minimal(Utc::now());
        assert_eq!(
            fallback_response("what is my balance", &snapshot),
            NO_DATA_MESSAGE
        );
        assert_eq!(fallback_response("hello", &snapshot), WELCOME_MESSAGE);
    }
}
