use chrono::{Duration, NaiveDate};

use super::transaction::{Transaction, TransactionKind};
use crate::currency::Money;

const WINDOW_DAYS: i64 = 30;
const WORKING_DAYS: i64 = 25;
/// Offsets back from today treated as rest days, leaving 25 worked days.
const REST_DAY_OFFSETS: [i64; 5] = [6, 13, 20, 27, 28];

/// Deterministically generates 30 days of synthetic history from the two
/// onboarding figures. Income transactions sum exactly to one month of the
/// annual income across 25 working days; expenses sum exactly to the monthly
/// expense figure, alternating Fuel and Food.
pub fn seed_history(
    annual_income: Money,
    monthly_expenses: Money,
    today: NaiveDate,
) -> Vec<Transaction> {
    let monthly_income = annual_income.div_by(12);
    let base_income = monthly_income.div_by(WORKING_DAYS);
    let mut income_remainder =
        monthly_income.minor() - base_income.minor() * WORKING_DAYS;

    let base_expense = monthly_expenses.div_by(WINDOW_DAYS);
    let mut expense_remainder =
        monthly_expenses.minor() - base_expense.minor() * WINDOW_DAYS;

    let mut transactions = Vec::new();
    for offset in 0..WINDOW_DAYS {
        let date = today - Duration::days(offset);

        if !REST_DAY_OFFSETS.contains(&offset) {
            let mut amount = base_income;
            if income_remainder > 0 {
                amount += Money::from_minor(1);
                income_remainder -= 1;
            }
            if !amount.is_zero() {
                transactions.push(
                    Transaction::new(TransactionKind::Income, amount, "Uber", date)
                        .with_description("Daily Payout"),
                );
            }
        }

        let mut expense = base_expense;
        if expense_remainder > 0 {
            expense += Money::from_minor(1);
            expense_remainder -= 1;
        }
        if !expense.is_zero() {
            let (category, description) = if offset % 2 == 0 {
                ("Fuel", "Petrol")
            } else {
                ("Food", "Lunch")
            };
            transactions.push(
                Transaction::new(TransactionKind::Expense, expense, category, date)
                    .with_description(description),
            );
        }
    }
    transactions
}
