//! Expense tracker is a small REST API for recording personal expenses.
//!
//! Expenses are stored in a single SQLite collection and exposed as JSON
//! under `/api/expenses`, with listing by category and by month or year.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::Serialize;
use tokio::signal;

mod app_state;
mod cors;
mod db;
mod endpoints;
mod expense;
mod extract;
mod logging;
mod not_found;
mod routing;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use cors::{CorsConfig, cors_layer};
pub use db::{StoreConfig, initialize as initialize_db, open_connection};
pub use expense::{ExpenseForm, insert_expense};
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
    /// The requested resource was not found.
    ///
    /// Internally, this error occurs when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The expense targeted by an update or delete does not exist.
    #[error("Expense not found")]
    ExpenseNotFound,

    /// Listing all expenses (optionally by category) matched nothing.
    #[error("No expenses found")]
    NoExpensesFound,

    /// Listing expenses for a month or year matched nothing.
    #[error("No expenses found for the given period/category")]
    NoExpensesInRange,

    /// The path parameter could not be parsed as an expense ID.
    #[error("\"{0}\" is not a valid expense ID")]
    InvalidExpenseId(String),

    /// The month was outside of 0 to 12 (0 selects the whole year).
    #[error("month must be between 0 and 12, got {0}")]
    InvalidMonth(u8),

    /// The year cannot be represented as a calendar date.
    #[error("{0} is not a supported year")]
    InvalidYear(i32),

    /// The query string or JSON body did not match the expected shape.
    ///
    /// Holds the text of the rejection from the extractor.
    #[error("{0}")]
    InvalidRequest(String),

    /// The expense existed but the store reported that no row was changed.
    #[error("Failed to update expense")]
    UpdateFailed,

    /// The expense existed but the store reported that no row was removed.
    #[error("Failed to delete expense")]
    DeleteFailed,

    /// The store configuration is incomplete.
    #[error("invalid store configuration: {0}")]
    Config(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent with every error response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound
            | Error::ExpenseNotFound
            | Error::NoExpensesFound
            | Error::NoExpensesInRange => StatusCode::NOT_FOUND,
            Error::InvalidExpenseId(_)
            | Error::InvalidMonth(_)
            | Error::InvalidYear(_)
            | Error::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::UpdateFailed
            | Error::DeleteFailed
            | Error::Config(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let detail = match self {
            Error::NotFound => Error::ExpenseNotFound.to_string(),
            // Store internals are not intended to be shown to the client.
            error @ (Error::SqlError(_) | Error::DatabaseLockError | Error::Config(_)) => {
                tracing::error!("An unexpected error occurred: {}", error);
                "Internal server error".to_owned()
            }
            error => error.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}
