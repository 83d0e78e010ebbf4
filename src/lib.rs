//! FinanceFlow is a personal finance tracker.
//!
//! This library provides a JSON REST API for recording income and expense
//! transactions and summarising them. Transactions are kept in memory and
//! written through to a JSON file on every change.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
pub mod endpoints;
mod logging;
mod not_found;
mod routing;
pub mod stores;
pub mod summary;
pub mod transaction;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The type, description or amount of a new transaction was not given.
    #[error("Missing required fields")]
    MissingFields,

    /// The transaction type was something other than "income" or "expense".
    #[error("invalid transaction type \"{0}\", expected \"income\" or \"expense\"")]
    InvalidTransactionType(String),

    /// The amount could not be read as a finite number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The request body could not be parsed as the expected JSON.
    #[error("invalid request body: {0}")]
    InvalidRequestBody(String),

    /// Could not acquire the transaction store lock.
    #[error("could not acquire the transaction store lock")]
    StoreLockError,

    /// Transactions could not be written to durable storage.
    ///
    /// The [TransactionStore](stores::TransactionStore) logs and swallows
    /// this error, it is not intended to be shown to the client.
    #[error("could not save transactions: {0}")]
    StorageError(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

/// The JSON body sent to clients when a request fails.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A human readable description of what went wrong.
    pub error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Error::MissingFields
            | Error::InvalidTransactionType(_)
            | Error::InvalidAmount(_)
            | Error::InvalidRequestBody(_) => {
                tracing::debug!("Rejected request: {self}");
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details."
                        .to_owned(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
