#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;
use serde_json::{Value, json};

use crate::{AppState, build_router, endpoints};

#[track_caller]
pub(crate) fn must_create_test_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");

    AppState::new(connection).expect("could not initialize test DB")
}

#[track_caller]
pub(crate) fn must_create_test_server() -> TestServer {
    TestServer::try_new(build_router(must_create_test_state())).expect("Could not create test server.")
}

/// Create an expense through the API and return its ID.
pub(crate) async fn must_create_expense(
    server: &TestServer,
    amount: f64,
    category: Option<&str>,
    date: &str,
) -> String {
    let response = server
        .post(endpoints::CREATE_EXPENSE)
        .json(&json!({
            "amount": amount,
            "description": "test expense",
            "category": category,
            "date": date,
        }))
        .await;

    response.assert_status_ok();

    let body = response.json::<Value>();
    body["expense_id"]
        .as_str()
        .expect("expense_id missing from response")
        .to_owned()
}
