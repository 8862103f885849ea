//! Spendy is a small web app for tracking personal expenses.
//!
//! Users record what they bought, how much it cost, a category, and a date.
//! The app lists, filters, sorts, and totals those expenses, and can suggest
//! a category for a new item by asking a zero-shot text classifier hosted on
//! an external inference server.
//!
//! This library provides HTTP routes that directly serve HTML pages.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod category;
mod classify;
mod db;
mod endpoints;
mod expense;
mod html;
mod not_found;
mod routing;
mod timezone;

pub use app_state::AppState;
pub use category::{CategoryName, DEFAULT_CATEGORIES};
pub use classify::{
    ClassifyError, HttpClassifier, LabelScore, SharedClassifier, ZeroShotClassifier,
};
pub use db::initialize as initialize_db;
pub use expense::{Expense, ExpenseId, NewExpense, create_expense, get_expense};
pub use routing::build_router;

use crate::{html::error_view, not_found::get_404_not_found_response};

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
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

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

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => render_internal_server_error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to a valid, canonical timezone string."
                ),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                render_internal_server_error(
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs.",
                )
            }
        }
    }
}

fn render_internal_server_error(description: &str, fix: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        error_view("Server Error", "500", description, fix),
    )
        .into_response()
}
