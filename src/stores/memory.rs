//! An in-memory [TransactionStorage] for tests and ephemeral servers.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use crate::{Error, stores::TransactionStorage, transaction::Transaction};

/// Keeps the last saved snapshot of transactions in memory.
///
/// Clones share the same snapshot, so a test can keep a clone to inspect what
/// a [TransactionStore](crate::stores::TransactionStore) wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    saved: Arc<Mutex<Vec<Transaction>>>,
    save_count: Arc<AtomicUsize>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryStorage {
    /// Create an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that already holds `transactions`.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            saved: Arc::new(Mutex::new(transactions)),
            ..Default::default()
        }
    }

    /// Create a storage where every save fails.
    pub fn failing() -> Self {
        Self {
            fail_saves: Arc::new(AtomicBool::new(true)),
            ..Default::default()
        }
    }

    /// The last saved transactions.
    pub fn saved(&self) -> Vec<Transaction> {
        match self.saved.lock() {
            Ok(saved) => saved.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// How many times a save succeeded.
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl TransactionStorage for MemoryStorage {
    fn load(&self) -> Vec<Transaction> {
        self.saved()
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(Error::StorageError("memory storage is set to fail".to_owned()));
        }

        let mut saved = self
            .saved
            .lock()
            .map_err(|error| Error::StorageError(error.to_string()))?;
        *saved = transactions.to_vec();
        self.save_count.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
