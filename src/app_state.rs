//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    Error,
    stores::{TransactionStorage, TransactionStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The transactions, shared by all request handlers.
    ///
    /// All reads and writes go through this one lock so that the in-memory
    /// list and its storage are updated together.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl AppState {
    /// Create a new [AppState], loading existing transactions from `storage`.
    pub fn new(storage: impl TransactionStorage + 'static) -> Self {
        Self {
            store: Arc::new(Mutex::new(TransactionStore::load(storage))),
        }
    }
}

/// Acquire the lock on the transaction store.
///
/// # Errors
/// Returns [Error::StoreLockError] if another thread panicked while holding the lock.
pub(crate) fn lock_store(
    store: &Mutex<TransactionStore>,
) -> Result<MutexGuard<'_, TransactionStore>, Error> {
    store.lock().map_err(|_| Error::StoreLockError)
}

#[cfg(test)]
mod tests {
    use std::{
        panic::{AssertUnwindSafe, catch_unwind},
        sync::Mutex,
    };

    use crate::{
        Error,
        app_state::lock_store,
        stores::{MemoryStorage, TransactionStore},
    };

    #[test]
    fn lock_store_succeeds_on_healthy_lock() {
        let store = Mutex::new(TransactionStore::load(MemoryStorage::new()));

        assert!(lock_store(&store).is_ok());
    }

    #[test]
    fn poisoned_lock_is_store_lock_error() {
        let store = Mutex::new(TransactionStore::load(MemoryStorage::new()));
        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = store.lock().unwrap();
            panic!("poison the lock");
        }));

        assert_eq!(lock_store(&store).err(), Some(Error::StoreLockError));
    }
}
