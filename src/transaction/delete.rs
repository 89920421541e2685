//! Defines the page and endpoint for deleting a transaction by its ID.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::TransactionId,
    endpoints,
    html::{FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, submit_button},
    navigation::NavBar,
    transaction::core::delete_transaction,
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for deleting a transaction.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    /// The ID of the transaction to delete.
    #[serde(default)]
    pub id: Option<TransactionId>,
}

/// Render the form for deleting a transaction by its ID.
pub async fn get_delete_transaction_page() -> Response {
    delete_transaction_view().into_response()
}

fn delete_transaction_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::DELETE_TRANSACTION).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::DELETE_TRANSACTION)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Delete Transaction" }

                div
                {
                    label
                        for="id"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Transaction ID"
                    }

                    input
                        name="id"
                        id="id"
                        type="number"
                        min="1"
                        step="1"
                        required
                        autofocus
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (submit_button("Delete Transaction"))
            }
        }
    };

    base("Delete Transaction", &[], &content)
}

/// A route handler for deleting a transaction, redirects to the transactions list on success.
///
/// Responds with an alert and a 400 status if no ID was given, or a 404
/// status if there is no transaction with the ID.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Form(form): Form<DeleteForm>,
) -> Response {
    let Some(transaction_id) = form.id else {
        return Error::MissingField("id").into_alert_response();
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transaction(transaction_id, &connection) {
        Ok(true) => {
            tracing::info!("deleted transaction {transaction_id}");
            (HxRedirect(endpoints::ROOT.to_owned()), StatusCode::SEE_OTHER).into_response()
        }
        Ok(false) => Error::DeleteMissingTransaction.into_alert_response(),
        Err(error) => {
            tracing::error!("Could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}
