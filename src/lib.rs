//! A web app for tracking expenses and income.
//!
//! Expenses are recorded as transactions tagged with a fixed category, income
//! is recorded separately, and the app derives totals and simple budget
//! projections from both.
//!
//! This library provides the HTTP server that directly serves HTML pages,
//! alongside a small JSON API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod alert;
mod app_state;
mod category;
mod database_id;
mod db;
mod endpoints;
mod html;
mod income;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod summary;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use category::{Category, category_names};
pub use database_id::{DatabaseId, IncomeId, TransactionId};
pub use db::initialize as initialize_db;
pub use income::{Income, NewIncome, create_income, get_all_income};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use summary::{
    Summary, daily_budget, days_left, filter_by_category, remaining_budget, remove_by_id,
    round_to_cents, summarize, totals_by_category, totals_by_date,
};
pub use timezone::get_local_offset;
pub use transaction::{
    NewTransaction, Transaction, count_transactions, create_transaction, delete_transaction,
    delete_transactions_in_category, get_all_transactions, get_transaction,
    get_transactions_by_category, get_transactions_by_date,
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, not_found::get_404_not_found_response,
};

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
    /// The category string is not one of the fixed categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// A transaction was submitted with the legacy income category.
    ///
    /// Income is recorded as its own entity, so new transactions may not use
    /// [Category::Income].
    #[error("income must be recorded as income, not as a transaction")]
    IncomeCategory,

    /// A negative amount was submitted for a transaction, income or budget.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(f64),

    /// An amount that is not a finite number (NaN or infinity) was submitted.
    #[error("amount must be a finite number, got {0}")]
    InvalidAmount(f64),

    /// A required field was missing or empty.
    #[error("the field \"{0}\" is required")]
    MissingField(&'static str),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error {
                    code: _,
                    extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_CHECK,
                },
                Some(ref desc),
            ) if desc.contains("category") => Error::InvalidCategory(desc.to_owned()),
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code that best describes the error.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCategory(_)
            | Error::IncomeCategory
            | Error::NegativeAmount(_)
            | Error::InvalidAmount(_)
            | Error::MissingField(_) => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::DeleteMissingTransaction => StatusCode::NOT_FOUND,
            Error::SqlError(_) | Error::DatabaseLockError | Error::InvalidTimezoneError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// A message that is safe to show to the client.
    ///
    /// Server errors are replaced with a generic message, the details should
    /// only be logged.
    fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => {
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
            _ => capitalize(&self.to_string()),
        }
    }

    /// Render the error as an alert fragment for HTMX requests.
    fn into_alert_response(self) -> Response {
        let status_code = self.status_code();
        let details = self.client_message();

        let alert = match self {
            Error::InvalidTimezoneError(timezone) => Alert {
                message: "Invalid Timezone Settings".to_owned(),
                details: format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            },
            Error::DeleteMissingTransaction => Alert {
                message: "Could not delete transaction".to_owned(),
                details: "The transaction could not be found. \
                    Try refreshing the page to see if the transaction has already been deleted."
                    .to_owned(),
            },
            Error::InvalidCategory(_)
            | Error::IncomeCategory
            | Error::NegativeAmount(_)
            | Error::InvalidAmount(_)
            | Error::MissingField(_) => Alert {
                message: "Invalid input".to_owned(),
                details,
            },
            _ => Alert {
                message: "Something went wrong".to_owned(),
                details,
            },
        };

        (status_code, alert.into_html()).into_response()
    }

    /// Render the error as a JSON object with a `detail` field.
    fn into_json_response(self) -> Response {
        if self.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (
            self.status_code(),
            Json(json!({ "detail": self.client_message() })),
        )
            .into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            error if error.status_code() != StatusCode::INTERNAL_SERVER_ERROR => {
                error.into_alert_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
