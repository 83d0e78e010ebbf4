//! Transactions for the finance tracker.
//!
//! This module contains:
//! - The `Transaction` model and `TransactionBuilder` for creating transactions
//! - Route handlers for listing, creating and clearing transactions

mod clear_endpoint;
mod core;
mod create_endpoint;
mod list_endpoint;

pub use clear_endpoint::{ClearResponse, clear_transactions_endpoint};
pub use core::{DEFAULT_CATEGORY, Transaction, TransactionBuilder, TransactionType};
pub use create_endpoint::{AmountInput, TransactionForm, create_transaction_endpoint};
pub use list_endpoint::get_transactions_endpoint;
