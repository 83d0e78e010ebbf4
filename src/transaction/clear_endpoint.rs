use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error, app_state::lock_store, stores::TransactionStore};

/// The state needed to delete all transactions.
#[derive(Debug, Clone)]
pub struct ClearTransactionsState {
    /// The store for managing transactions.
    store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for ClearTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// The response body for a successful clear.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ClearResponse {
    /// Always `true`.
    pub ok: bool,
}

/// A route handler for deleting every transaction.
pub async fn clear_transactions_endpoint(
    State(state): State<ClearTransactionsState>,
) -> Result<Json<ClearResponse>, Error> {
    let mut store = lock_store(&state.store)?;
    let count = store.transactions().len();
    store.clear();
    tracing::info!("Deleted {count} transactions");

    Ok(Json(ClearResponse { ok: true }))
}
