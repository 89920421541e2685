//! The page for projecting spending against a budget.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{
        FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, dollar_input_styles,
        format_currency, submit_button,
    },
    navigation::NavBar,
    summary::aggregation::{
        daily_budget, days_left, remaining_budget, round_to_cents, total_spent,
    },
    timezone::get_local_date,
    transaction::{Transaction, get_all_transactions, validate_amount},
};

/// The state needed for the budget page.
#[derive(Debug, Clone)]
pub struct BudgetState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for a budget projection.
#[derive(Debug, Default, Deserialize)]
pub struct BudgetForm {
    /// The total amount that may be spent.
    #[serde(default)]
    pub budget: Option<f64>,
    /// The last day of the budget period.
    #[serde(default)]
    pub end_date: Option<Date>,
}

/// How spending so far compares to a budget.
#[derive(Debug, Clone, PartialEq)]
struct BudgetProjection {
    budget: f64,
    total_spent: f64,
    remaining_budget: f64,
    days_left: i64,
    daily_budget: f64,
}

fn project_budget(
    transactions: &[Transaction],
    budget: f64,
    today: Date,
    end_date: Date,
) -> BudgetProjection {
    BudgetProjection {
        budget,
        total_spent: round_to_cents(total_spent(transactions)),
        remaining_budget: remaining_budget(transactions, budget),
        days_left: days_left(today, end_date).max(0),
        daily_budget: daily_budget(budget, today, end_date),
    }
}

/// Render the budget form.
pub async fn get_budget_page(State(state): State<BudgetState>) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;

    Ok(budget_view(today).into_response())
}

fn budget_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGET_SUMMARY_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::BUDGET_SUMMARY_VIEW)
                hx-target="#budget-results"
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Budget Summary" }

                div
                {
                    label for="budget" class=(FORM_LABEL_STYLE) { "Budget" }

                    div class="input-wrapper w-full"
                    {
                        input
                            name="budget"
                            id="budget"
                            type="number"
                            step="0.01"
                            min="0"
                            placeholder="0.00"
                            required
                            autofocus
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "End Date" }

                    input
                        name="end_date"
                        id="end_date"
                        type="date"
                        min=(today)
                        value=(today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (submit_button("Calculate"))

                div id="budget-results" {}
            }
        }
    };

    base("Budget Summary", &[dollar_input_styles()], &content)
}

/// Respond with the budget projection for the submitted budget and end date.
///
/// The result is an HTML fragment swapped into the budget page by HTMX.
pub async fn post_budget_page(
    State(state): State<BudgetState>,
    Form(form): Form<BudgetForm>,
) -> Result<Response, Error> {
    let budget = validate_amount(form.budget, "budget")?;
    let end_date = form.end_date.ok_or(Error::MissingField("end_date"))?;
    let today = get_local_date(&state.local_timezone)?;

    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    let projection = project_budget(&transactions, budget, today, end_date);

    Ok(projection_view(&projection).into_response())
}

fn projection_view(projection: &BudgetProjection) -> Markup {
    html! {
        dl id="budget-projection" class="grid grid-cols-2 gap-2 mt-4"
        {
            dt { "Budget" }
            dd class="text-right" { (format_currency(projection.budget)) }
            dt { "Total spent" }
            dd class="text-right" { (format_currency(projection.total_spent)) }
            dt { "Remaining budget" }
            dd class="text-right" { (format_currency(projection.remaining_budget)) }
            dt { "Days left" }
            dd class="text-right" { (projection.days_left) }
            dt { "Daily budget" }
            dd class="text-right" { (format_currency(projection.daily_budget)) }
        }
    }
}
