//! Summary statistics over all transactions: totals, balance, average expense and savings rate.

mod aggregation;
mod handlers;

pub use aggregation::{GOOD_SAVINGS_RATE, SavingsLabel, Summary};
pub use handlers::get_summary;
