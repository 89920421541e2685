//! The page listing every transaction.

use std::{
    borrow::Borrow,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, core::get_all_transactions},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render every transaction in the order they were created.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
) -> Result<Response, Error> {
    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    Ok(transactions_view(&transactions).into_response())
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let nav_bar = NavBar::new(endpoints::ROOT).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-lg"
            {
                div class="flex justify-between items-center mb-4"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::ADD_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                (transaction_table(transactions, true))
            }
        }
    };

    base("Transactions", &[], &content)
}

/// A table of `transactions`, optionally with a delete button on each row.
///
/// Accepts owned or borrowed transactions, e.g. the output of
/// [crate::summary::filter_by_category].
pub(crate) fn transaction_table<T: Borrow<Transaction>>(
    transactions: &[T],
    show_delete: bool,
) -> Markup {
    html! {
        div class="relative overflow-x-auto shadow-md sm:rounded-lg"
        {
            table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class="px-6 py-4 text-right" { "Amount" }
                        @if show_delete {
                            th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Delete" } }
                        }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        @let transaction = Borrow::<Transaction>::borrow(transaction);
                        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.date) }
                            td class=(TABLE_CELL_STYLE) { (transaction.name) }
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (transaction.category.label()) }
                            }
                            td class="px-6 py-4 text-right" { (format_currency(transaction.amount)) }
                            @if show_delete {
                                td class=(TABLE_CELL_STYLE)
                                {
                                    button
                                        type="button"
                                        class=(BUTTON_DELETE_STYLE)
                                        hx-post=(endpoints::DELETE_TRANSACTION)
                                        hx-vals=(format!(r#"{{"id": {}}}"#, transaction.id))
                                        hx-confirm=(format!("Delete \"{}\"?", transaction.name))
                                        hx-target-error="#alert-container"
                                    {
                                        "Delete"
                                    }
                                }
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan=(if show_delete { 5 } else { 4 }) class="px-6 py-4 text-center"
                            {
                                "No transactions yet."
                            }
                        }
                    }
                }
            }
        }
    }
}
