//! The route handler for the summary statistics.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};

use crate::{AppState, Error, app_state::lock_store, stores::TransactionStore, summary::Summary};

/// The state needed to summarise the transactions.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The store holding all transactions.
    pub store: Arc<Mutex<TransactionStore>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }
}

/// A route handler that responds with the [Summary] of all transactions.
pub async fn get_summary(State(state): State<SummaryState>) -> Result<Json<Summary>, Error> {
    let store = lock_store(&state.store)?;

    Ok(Json(Summary::from_transactions(store.transactions())))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;

    use crate::{
        stores::{MemoryStorage, TransactionStore},
        summary::{SavingsLabel, get_summary, handlers::SummaryState},
        transaction::{Transaction, TransactionType},
    };

    #[tokio::test]
    async fn summarises_stored_transactions() {
        let storage = MemoryStorage::with_transactions(vec![
            Transaction::build(TransactionType::Expense, "Rent", 400.0).finalize(),
            Transaction::build(TransactionType::Income, "Salary", 1000.0).finalize(),
        ]);
        let state = SummaryState {
            store: Arc::new(Mutex::new(TransactionStore::load(storage))),
        };

        let summary = get_summary(State(state)).await.unwrap().0;

        assert_eq!(summary.income, 1000.0);
        assert_eq!(summary.expense, 400.0);
        assert_eq!(summary.balance, 600.0);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.savings_rate, 60.0);
        assert_eq!(summary.savings_label, Some(SavingsLabel::GreatJob));
    }
}
