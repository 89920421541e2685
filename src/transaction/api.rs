//! The JSON API for listing and creating transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    category::category_names,
    transaction::{
        core::{create_transaction, get_all_transactions},
        form::TransactionForm,
    },
};

/// The state needed by the transaction API.
#[derive(Debug, Clone)]
pub struct TransactionApiState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Create a transaction from a JSON body and respond with the stored record.
///
/// Responds with `400 {"detail": ...}` if the body is not valid JSON or fails
/// validation.
pub async fn create_transaction_api(
    State(state): State<TransactionApiState>,
    body: Result<Json<TransactionForm>, JsonRejection>,
) -> Response {
    let Json(form) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::debug!("rejected transaction JSON: {rejection}");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": rejection.body_text() })),
            )
                .into_response();
        }
    };

    let transaction = match form.validate() {
        Ok(transaction) => transaction,
        Err(error) => return error.into_json_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match create_transaction(transaction, &connection) {
        Ok(transaction) => Json(transaction).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// List every transaction in the order they were created.
pub async fn get_transactions_api(State(state): State<TransactionApiState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_json_response();
        }
    };

    match get_all_transactions(&connection) {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => error.into_json_response(),
    }
}

/// List the names of every category.
pub async fn get_categories_api() -> Json<Vec<&'static str>> {
    Json(category_names())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        Transaction,
        category::Category,
        test_utils::get_test_connection,
        transaction::{
            api::{
                TransactionApiState, create_transaction_api, get_categories_api,
                get_transactions_api,
            },
            get_all_transactions,
        },
    };

    fn get_test_server() -> (TestServer, TransactionApiState) {
        let state = TransactionApiState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        };
        let app = Router::new()
            .route(
                "/transactions",
                get(get_transactions_api).post(create_transaction_api),
            )
            .route("/categories", get(get_categories_api))
            .with_state(state.clone());

        (
            TestServer::try_new(app).expect("Could not create test server."),
            state,
        )
    }

    #[tokio::test]
    async fn create_returns_record_with_id() {
        let (server, _) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({
                "name": "Coffee",
                "amount": 4.5,
                "category": "FOOD",
                "date": "2025-07-08"
            }))
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "id": 1,
            "name": "Coffee",
            "amount": 4.5,
            "category": "FOOD",
            "date": "2025-07-08"
        }));
    }

    #[tokio::test]
    async fn create_accepts_category_label() {
        let (server, _) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({
                "name": "Train",
                "amount": 3.0,
                "category": "Transport",
                "date": "2025-07-08"
            }))
            .await;

        response.assert_status_ok();
        let transaction: Transaction = response.json();
        assert_eq!(transaction.category, Category::Transport);
    }

    #[tokio::test]
    async fn invalid_category_is_bad_request_and_not_stored() {
        let (server, state) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({
                "name": "Rent",
                "amount": 500.0,
                "category": "HOUSING",
                "date": "2025-07-08"
            }))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(
            body["detail"].as_str().unwrap().contains("HOUSING"),
            "got {body}"
        );
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_all_transactions(&connection), Ok(vec![]));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (server, _) = get_test_server();

        let response = server
            .post("/transactions")
            .json(&json!({
                "name": "Coffee",
                "category": "FOOD",
                "date": "2025-07-08"
            }))
            .await;

        response.assert_status_bad_request();
        response.assert_json(&json!({ "detail": "The field \"amount\" is required" }));
    }

    #[tokio::test]
    async fn malformed_json_is_bad_request() {
        let (server, _) = get_test_server();

        let response = server
            .post("/transactions")
            .content_type("application/json")
            .text("{\"name\": ")
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert!(body["detail"].is_string(), "got {body}");
    }

    #[tokio::test]
    async fn list_returns_created_transactions_in_order() {
        let (server, _) = get_test_server();
        for name in ["First", "Second"] {
            server
                .post("/transactions")
                .json(&json!({
                    "name": name,
                    "amount": 1.0,
                    "category": "MISC",
                    "date": "2025-07-08"
                }))
                .await
                .assert_status_ok();
        }

        let transactions: Vec<Transaction> = server.get("/transactions").await.json();

        let names = transactions
            .iter()
            .map(|transaction| transaction.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[tokio::test]
    async fn categories_are_listed_in_order() {
        let (server, _) = get_test_server();

        let response = server.get("/categories").await;

        response.assert_status_ok();
        response.assert_json(&json!(["FOOD", "TRANSPORT", "FUN", "UTILITIES", "MISC", "INCOME"]));
    }
}
