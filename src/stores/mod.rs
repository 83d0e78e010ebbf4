//! Contains the storage trait and implementations for persisting [transactions](crate::transaction::Transaction).

mod json_file;
mod memory;
mod transaction;

pub use json_file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use transaction::{TransactionStorage, TransactionStore};
