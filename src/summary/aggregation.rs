//! Derives summary statistics from a list of transactions.

use serde::{Deserialize, Serialize};

use crate::transaction::{Transaction, TransactionType};

/// The savings rate, as a percentage, at or above which savings are considered good.
pub const GOOD_SAVINGS_RATE: f64 = 20.0;

/// A short verdict on the savings rate for display next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsLabel {
    /// Money was spent but none was earned.
    #[serde(rename = "No income yet")]
    NoIncomeYet,
    /// More money was spent than earned.
    #[serde(rename = "Overspending")]
    Overspending,
    /// The savings rate is at least [GOOD_SAVINGS_RATE].
    #[serde(rename = "Great job!")]
    GreatJob,
    /// Some money was saved, but less than [GOOD_SAVINGS_RATE] percent.
    #[serde(rename = "Can improve")]
    CanImprove,
}

/// Totals and ratios over all transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Income minus expenses.
    pub balance: f64,
    /// Sum of all income amounts.
    pub income: f64,
    /// Sum of all expense amounts.
    pub expense: f64,
    /// Number of transactions of either type.
    pub count: usize,
    /// Mean expense amount, zero when there are no expenses.
    pub average_expense: f64,
    /// Percentage of income left after expenses, zero when there is no income.
    pub savings_rate: f64,
    /// `None` when there is nothing meaningful to say, e.g. no transactions.
    pub savings_label: Option<SavingsLabel>,
}

impl Summary {
    /// Compute the summary in a single pass over `transactions`.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut income = 0.0;
        let mut expense = 0.0;
        let mut expense_count = 0usize;

        for transaction in transactions {
            match transaction.kind {
                TransactionType::Income => income += transaction.amount,
                TransactionType::Expense => {
                    expense += transaction.amount;
                    expense_count += 1;
                }
            }
        }

        let average_expense = if expense_count == 0 {
            0.0
        } else {
            expense / expense_count as f64
        };

        let (savings_rate, savings_label) = savings_rate(income, expense);

        Self {
            balance: income - expense,
            income,
            expense,
            count: transactions.len(),
            average_expense,
            savings_rate,
            savings_label,
        }
    }
}

/// Calculate the savings rate and its label from total `income` and `expense`.
///
/// The rate is only defined for positive income, otherwise it is zero.
fn savings_rate(income: f64, expense: f64) -> (f64, Option<SavingsLabel>) {
    if income > 0.0 {
        let savings = income - expense;
        let rate = savings / income * 100.0;
        let rate = if rate.is_finite() { rate } else { 0.0 };

        // Compared on the amounts rather than the rate so that exactly 20% is not
        // lost to rounding.
        let label = if expense > income {
            SavingsLabel::Overspending
        } else if savings >= income / 100.0 * GOOD_SAVINGS_RATE {
            SavingsLabel::GreatJob
        } else {
            SavingsLabel::CanImprove
        };

        (rate, Some(label))
    } else if income == 0.0 && expense > 0.0 {
        (0.0, Some(SavingsLabel::NoIncomeYet))
    } else {
        (0.0, None)
    }
}
