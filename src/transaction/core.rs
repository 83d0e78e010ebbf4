//! Defines the core data model for transactions.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::Error;

/// The category assigned to transactions created without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Whether money was earned or spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money that was earned.
    Income,
    /// Money that was spent.
    Expense,
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(Error::InvalidTransactionType(other.to_owned())),
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never modified after they are created.
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: Uuid,
    /// Whether this transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// The sign is not checked, the [kind](Transaction::kind) decides whether
    /// the amount counts towards income or expenses.
    pub amount: f64,
    /// A free-text category, e.g. "Food".
    pub category: String,
    /// When the transaction was recorded by the server.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// Shortcut for [TransactionBuilder] for discoverability.
    pub fn build(kind: TransactionType, description: &str, amount: f64) -> TransactionBuilder {
        TransactionBuilder {
            kind,
            description: description.to_owned(),
            amount,
            category: None,
        }
    }
}

/// A builder for creating [Transaction] instances.
///
/// The ID and date are assigned when the builder is finalized.
#[derive(Debug, PartialEq, Clone)]
pub struct TransactionBuilder {
    /// Whether the transaction is income or an expense.
    pub kind: TransactionType,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money spent or earned.
    pub amount: f64,
    /// The category, [DEFAULT_CATEGORY] if `None` or empty.
    pub category: Option<String>,
}

impl TransactionBuilder {
    /// Set the category for the transaction.
    pub fn category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }

    /// Create the [Transaction] with a fresh ID and the current time as its date.
    pub fn finalize(self) -> Transaction {
        self.finalize_at(OffsetDateTime::now_utc())
    }

    /// Create the [Transaction] with a fresh ID and the given `date`.
    pub fn finalize_at(self, date: OffsetDateTime) -> Transaction {
        let category = match self.category {
            Some(category) if !category.is_empty() => category,
            _ => DEFAULT_CATEGORY.to_owned(),
        };

        Transaction {
            id: Uuid::new_v4(),
            kind: self.kind,
            description: self.description,
            amount: self.amount,
            category,
            date,
        }
    }
}
