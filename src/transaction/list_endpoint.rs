use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};

use crate::{
    AppState, Error, app_state::lock_store, stores::TransactionStore, transaction::Transaction,
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct TransactionsState {
    /// The store for managing transactions.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for TransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler that responds with all transactions, newest first.
pub async fn get_transactions_endpoint(
    State(state): State<TransactionsState>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let store = lock_store(&state.store)?;

    Ok(Json(store.transactions().to_vec()))
}
