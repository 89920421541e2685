//! The page for viewing the transactions in a single category.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    category::Category,
    endpoints,
    html::{FORM_CONTAINER_STYLE, PAGE_CONTAINER_STYLE, base, format_currency, submit_button},
    navigation::NavBar,
    summary::filter_by_category,
    transaction::{
        Transaction, core::get_all_transactions, form::category_select,
        transactions_page::transaction_table,
    },
};

/// The state needed for the category page.
#[derive(Debug, Clone)]
pub struct CategoryPageState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for picking a category.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    /// The category name or label.
    #[serde(default)]
    pub category: Option<String>,
}

/// Render the category picker.
pub async fn get_category_page() -> Response {
    category_view().into_response()
}

fn category_view() -> Markup {
    let nav_bar = NavBar::new(endpoints::CATEGORY_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::CATEGORY_VIEW)
                hx-target="#category-results"
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Transactions by Category" }

                (category_select(&Category::ALL, None))

                (submit_button("Show Transactions"))
            }
        }

        div class=(PAGE_CONTAINER_STYLE)
        {
            div id="category-results" class="w-full max-w-screen-lg" {}
        }
    };

    base("Categories", &[], &content)
}

/// Respond with the table of transactions in the submitted category.
///
/// The table fragment is swapped into the category page by HTMX.
pub async fn post_category_page(
    State(state): State<CategoryPageState>,
    Form(form): Form<CategoryForm>,
) -> Result<Response, Error> {
    let category = form
        .category
        .filter(|category| !category.trim().is_empty())
        .ok_or(Error::MissingField("category"))?
        .parse::<Category>()?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    let in_category = filter_by_category(&transactions, category);

    Ok(category_results_view(category, &in_category).into_response())
}

fn category_results_view(category: Category, transactions: &[&Transaction]) -> Markup {
    let total: f64 = transactions.iter().map(|transaction| transaction.amount).sum();

    html! {
        div class="flex justify-between items-center mb-4"
        {
            h3 class="text-lg font-semibold" { (category.label()) }
            span class="font-semibold" { "Total: " (format_currency(total)) }
        }

        (transaction_table(transactions, false))
    }
}
