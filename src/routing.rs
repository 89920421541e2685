//! Application router configuration.

use std::path::Path;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    income::{create_income_endpoint, get_create_income_page},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    summary::{get_budget_page, get_summary_api, get_summary_page, post_budget_page},
    transaction::{
        create_transaction_api, create_transaction_endpoint, delete_transaction_endpoint,
        get_categories_api, get_category_page, get_create_transaction_page,
        get_delete_transaction_page, get_transactions_api, get_transactions_page,
        post_category_page,
    },
};

/// Return a router with all the app's routes.
///
/// Files in `static_dir` are served under [endpoints::STATIC].
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_transactions_page))
        .route(
            endpoints::ADD_TRANSACTION_VIEW,
            get(get_create_transaction_page).post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            get(get_delete_transaction_page).post(delete_transaction_endpoint),
        )
        .route(
            endpoints::CATEGORY_VIEW,
            get(get_category_page).post(post_category_page),
        )
        .route(endpoints::SUMMARY_VIEW, get(get_summary_page))
        .route(
            endpoints::BUDGET_SUMMARY_VIEW,
            get(get_budget_page).post(post_budget_page),
        )
        .route(
            endpoints::ADD_INCOME_VIEW,
            get(get_create_income_page).post(create_income_endpoint),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(
            endpoints::TRANSACTIONS_API,
            get(get_transactions_api).post(create_transaction_api),
        )
        .route(endpoints::CATEGORIES_API, get(get_categories_api))
        .route(endpoints::SUMMARY_API, get(get_summary_api))
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}
