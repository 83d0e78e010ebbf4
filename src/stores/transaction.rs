//! Defines the storage trait and the write-through transaction store.

use crate::{Error, transaction::Transaction};

/// Durable storage for the full list of transactions.
pub trait TransactionStorage: Send + Sync {
    /// Read all stored transactions.
    ///
    /// Implementers must not fail: missing or unreadable storage is logged
    /// and treated as an empty list.
    fn load(&self) -> Vec<Transaction>;

    /// Replace the stored transactions with `transactions`.
    ///
    /// # Errors
    /// Returns [Error::StorageError] if the transactions could not be written.
    fn save(&self, transactions: &[Transaction]) -> Result<(), Error>;
}

/// The in-memory list of transactions, newest first, backed by a [TransactionStorage].
///
/// Every mutation is immediately flushed to storage. If a flush fails, the
/// error is logged and the in-memory list stays authoritative.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    storage: Box<dyn TransactionStorage>,
}

impl TransactionStore {
    /// Create a store populated with the transactions in `storage`.
    pub fn load(storage: impl TransactionStorage + 'static) -> Self {
        let transactions = storage.load();
        tracing::info!("Loaded {} transactions", transactions.len());

        Self {
            transactions,
            storage: Box::new(storage),
        }
    }

    /// All transactions, newest first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Add `transaction` to the front of the list and flush to storage.
    pub fn append(&mut self, transaction: Transaction) {
        self.transactions.insert(0, transaction);
        self.flush();
    }

    /// Remove all transactions and flush to storage.
    pub fn clear(&mut self) {
        self.transactions.clear();
        self.flush();
    }

    fn flush(&self) {
        if let Err(error) = self.storage.save(&self.transactions) {
            tracing::error!("Failed to save transactions: {error}");
        }
    }
}

impl std::fmt::Debug for TransactionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStore")
            .field("transactions", &self.transactions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        stores::{MemoryStorage, TransactionStore},
        transaction::{Transaction, TransactionType},
    };

    fn income(description: &str, amount: f64) -> Transaction {
        Transaction::build(TransactionType::Income, description, amount).finalize()
    }

    #[test]
    fn load_uses_stored_transactions() {
        let stored = vec![income("Salary", 1000.0), income("Bonus", 200.0)];
        let storage = MemoryStorage::with_transactions(stored.clone());

        let store = TransactionStore::load(storage);

        assert_eq!(store.transactions(), stored.as_slice());
    }

    #[test]
    fn append_inserts_newest_first() {
        let mut store = TransactionStore::load(MemoryStorage::new());
        let first = income("First", 1.0);
        let second = income("Second", 2.0);

        store.append(first.clone());
        store.append(second.clone());

        assert_eq!(store.transactions(), &[second, first]);
    }

    #[test]
    fn append_writes_through_to_storage() {
        let storage = MemoryStorage::new();
        let mut store = TransactionStore::load(storage.clone());

        store.append(income("Salary", 1000.0));
        store.append(income("Bonus", 50.0));

        assert_eq!(storage.save_count(), 2);
        assert_eq!(storage.saved(), store.transactions());
    }

    #[test]
    fn clear_writes_through_to_storage() {
        let storage = MemoryStorage::with_transactions(vec![income("Salary", 1000.0)]);
        let mut store = TransactionStore::load(storage.clone());

        store.clear();

        assert!(store.transactions().is_empty());
        assert!(storage.saved().is_empty());
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn failed_save_keeps_in_memory_state() {
        let storage = MemoryStorage::failing();
        let mut store = TransactionStore::load(storage.clone());
        let transaction = income("Salary", 1000.0);

        store.append(transaction.clone());

        assert_eq!(store.transactions(), &[transaction]);
        assert!(storage.saved().is_empty());
    }
}
