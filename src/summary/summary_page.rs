//! The summary page and its JSON counterpart.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AppState, Error, endpoints,
    html::{
        HeadElement, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base, format_currency,
    },
    income::{Income, get_all_income},
    navigation::NavBar,
    summary::{
        aggregation::{Summary, remaining_budget, summarize, totals_by_category, totals_by_date},
        charts::{SummaryChart, charts_script, charts_view, summary_charts},
    },
    transaction::{Transaction, get_transactions_by_date, validate_amount},
};

/// How many income records to list on the summary page.
const RECENT_INCOME_COUNT: usize = 5;

/// The state needed for the summary page and API.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading transactions and income.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn load_records(state: &SummaryState) -> Result<(Vec<Transaction>, Vec<Income>), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_transactions_by_date(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    let incomes = get_all_income(&connection)
        .inspect_err(|error| tracing::error!("could not get income: {error}"))?;

    Ok((transactions, incomes))
}

/// Render the totals, the most recent income and the spending charts.
pub async fn get_summary_page(State(state): State<SummaryState>) -> Result<Response, Error> {
    let (transactions, incomes) = load_records(&state)?;

    let summary = summarize(&transactions, &incomes);
    let charts = summary_charts(
        &totals_by_category(&transactions),
        &totals_by_date(&transactions),
    );
    let recent_income = &incomes[..incomes.len().min(RECENT_INCOME_COUNT)];

    Ok(summary_view(&summary, recent_income, &charts).into_response())
}

fn summary_card(title: &str, amount: f64) -> Markup {
    html! {
        div class="p-4 bg-white rounded-lg shadow dark:bg-gray-800"
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400" { (title) }
            p class="text-2xl font-bold" { (format_currency(amount)) }
        }
    }
}

fn summary_view(summary: &Summary, recent_income: &[Income], charts: &[SummaryChart]) -> Markup {
    let nav_bar = NavBar::new(endpoints::SUMMARY_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-lg space-y-6"
            {
                h1 class="text-xl font-bold" { "Summary" }

                div id="totals" class="grid grid-cols-1 sm:grid-cols-3 gap-4"
                {
                    (summary_card("Total Income", summary.total_income))
                    (summary_card("Total Expenses", summary.total_expenses))
                    (summary_card("Net Balance", summary.net_balance))
                }

                section
                {
                    h2 class="text-lg font-semibold mb-2" { "Recent Income" }

                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class="px-6 py-4 text-right" { "Amount" }
                            }
                        }

                        tbody
                        {
                            @for income in recent_income {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td class=(TABLE_CELL_STYLE) { (income.date) }
                                    td class="px-6 py-4 text-right" { (format_currency(income.amount)) }
                                }
                            }

                            @if recent_income.is_empty() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td colspan="2" class="px-6 py-4 text-center" { "No income yet." }
                                }
                            }
                        }
                    }
                }

                @if !charts.is_empty() {
                    (charts_view(charts))
                }
            }
        }
    };

    let head_elements = if charts.is_empty() {
        vec![]
    } else {
        vec![
            HeadElement::ScriptLink(
                "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js".to_owned(),
            ),
            charts_script(charts),
        ]
    };

    base("Summary", &head_elements, &content)
}

/// The query parameters for the summary API.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// If set, the response includes how much of this budget is left.
    #[serde(default)]
    pub budget: Option<f64>,
}

/// The JSON body of the summary API.
#[derive(Debug, PartialEq, Serialize)]
struct SummaryResponse {
    #[serde(flatten)]
    summary: Summary,
    #[serde(skip_serializing_if = "Option::is_none")]
    remaining_budget: Option<f64>,
}

/// Respond with the totals as JSON, plus the remaining budget if a budget was given.
pub async fn get_summary_api(
    State(state): State<SummaryState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let budget = match query.budget {
        Some(budget) => match validate_amount(Some(budget), "budget") {
            Ok(budget) => Some(budget),
            Err(error) => return error.into_json_response(),
        },
        None => None,
    };

    let (transactions, incomes) = match load_records(&state) {
        Ok(records) => records,
        Err(error) => return error.into_json_response(),
    };

    Json(SummaryResponse {
        summary: summarize(&transactions, &incomes),
        remaining_budget: budget.map(|budget| remaining_budget(&transactions, budget)),
    })
    .into_response()
}
