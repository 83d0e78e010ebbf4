//! Application router configuration.

use axum::{Router, middleware, routing::get};

use crate::{
    AppState, endpoints,
    logging::logging_middleware,
    not_found::get_404_not_found,
    summary::get_summary,
    transaction::{
        clear_transactions_endpoint, create_transaction_endpoint, get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_endpoint)
                .post(create_transaction_endpoint)
                .delete(clear_transactions_endpoint),
        )
        .route(endpoints::SUMMARY_API, get(get_summary))
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// The root path '/' lets clients check that the server is up.
async fn get_index() -> &'static str {
    "FinanceFlow backend is running"
}
