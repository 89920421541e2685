//! Defines the page and endpoint for recording income.

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
use time::Date;

use crate::{
    AppState, Error, endpoints,
    html::{
        FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, dollar_input_styles,
        submit_button,
    },
    income::core::{NewIncome, create_income},
    navigation::NavBar,
    timezone::get_local_date,
    transaction::validate_amount,
};

/// The state needed to record income.
#[derive(Debug, Clone)]
pub struct CreateIncomeState {
    /// The database connection for managing income.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateIncomeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The form data for recording income.
#[derive(Debug, Default, Deserialize)]
pub struct IncomeForm {
    /// The amount received in dollars.
    #[serde(default)]
    pub amount: Option<f64>,
    /// When the income was received.
    #[serde(default)]
    pub date: Option<Date>,
}

impl IncomeForm {
    /// Check the submitted fields and convert them into a [NewIncome].
    ///
    /// # Errors
    /// Returns [Error::MissingField], [Error::InvalidAmount] or
    /// [Error::NegativeAmount] for invalid input.
    pub fn validate(self) -> Result<NewIncome, Error> {
        let amount = validate_amount(self.amount, "amount")?;
        let date = self.date.ok_or(Error::MissingField("date"))?;

        Ok(NewIncome { amount, date })
    }
}

/// Render the form for recording income.
pub async fn get_create_income_page(
    State(state): State<CreateIncomeState>,
) -> Result<Response, Error> {
    let today = get_local_date(&state.local_timezone)?;

    Ok(create_income_view(today).into_response())
}

fn create_income_view(today: Date) -> Markup {
    let nav_bar = NavBar::new(endpoints::ADD_INCOME_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(endpoints::ADD_INCOME_VIEW)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Income" }

                div
                {
                    label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
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
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        value=(today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (submit_button("Add Income"))
            }
        }
    };

    base("Add Income", &[dollar_input_styles()], &content)
}

/// A route handler for recording income, redirects to the summary page on success.
pub async fn create_income_endpoint(
    State(state): State<CreateIncomeState>,
    Form(form): Form<IncomeForm>,
) -> Response {
    let income = match form.validate() {
        Ok(income) => income,
        Err(error) => {
            tracing::debug!("rejected income form: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = create_income(income, &connection) {
        tracing::error!("could not create income: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::SUMMARY_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
