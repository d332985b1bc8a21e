//! Defines the endpoint for creating an expense.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseState, core::ExpenseForm, db::insert_expense},
    extract::ValidatedJson,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedExpense {
    pub message: String,
    pub expense_id: String,
}

/// A route handler for creating a new expense.
///
/// The payload is stored as given, neither the amount nor the category is
/// normalized.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    ValidatedJson(form): ValidatedJson<ExpenseForm>,
) -> Result<Json<CreatedExpense>, Error> {
    let connection = state.connection()?;
    let expense = insert_expense(&form, &connection)?;

    tracing::info!("Created expense {}", expense.id);

    Ok(Json(CreatedExpense {
        message: "Expense created successfully".to_owned(),
        expense_id: expense.id.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use axum::http::StatusCode;
    use serde_json::{Value, json};
    use time::macros::datetime;

    use crate::{
        build_router, endpoints,
        expense::{core::ExpenseId, db::get_expense, list_endpoint::ExpenseList},
        test_utils::{must_create_test_server, must_create_test_state},
    };

    use super::CreatedExpense;

    #[tokio::test]
    async fn creates_expense() {
        let state = must_create_test_state();
        let server = axum_test::TestServer::try_new(build_router(state.clone())).unwrap();

        let response = server
            .post(endpoints::CREATE_EXPENSE)
            .json(&json!({
                "amount": 12.5,
                "description": "groceries",
                "category": "food",
                "date": "2026-01-15T18:30:00",
            }))
            .await;

        response.assert_status_ok();
        let created = response.json::<CreatedExpense>();
        assert_eq!(created.message, "Expense created successfully");

        let id = ExpenseId::from_str(&created.expense_id).expect("ID was not valid");
        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(id, &connection).expect("expense was not stored");
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.description.as_deref(), Some("groceries"));
        assert_eq!(expense.category.as_deref(), Some("food"));
        assert_eq!(expense.date, datetime!(2026-01-15 18:30));
    }

    #[tokio::test]
    async fn listed_expense_has_calendar_date_and_amount() {
        let server = must_create_test_server();

        server
            .post(endpoints::CREATE_EXPENSE)
            .json(&json!({"amount": 12.5, "category": "food", "date": "2026-01-15T21:45:00Z"}))
            .await
            .assert_status_ok();

        let list = server
            .get(endpoints::LIST_EXPENSES)
            .await
            .json::<Value>();

        let expense = &list["expenses"][0];
        assert_eq!(expense["date"], "2026-01-15");
        assert_eq!(expense["amount"], 12.5);
        assert_eq!(expense["category"], "food");
        assert_eq!(expense["description"], Value::Null);
    }

    #[tokio::test]
    async fn category_is_stored_verbatim() {
        let server = must_create_test_server();

        server
            .post(endpoints::CREATE_EXPENSE)
            .json(&json!({"amount": -4.0, "category": "Transport", "date": "2026-01-15"}))
            .await
            .assert_status_ok();

        let list = server
            .get(endpoints::LIST_EXPENSES)
            .await
            .json::<ExpenseList>();

        assert_eq!(list.expenses[0].category.as_deref(), Some("Transport"));
        assert_eq!(list.expenses[0].amount, -4.0);
    }

    #[tokio::test]
    async fn malformed_bodies_are_rejected() {
        let server = must_create_test_server();

        for body in [
            json!({"category": "food", "date": "2026-01-15"}),
            json!({"amount": 1.0}),
            json!({"amount": "lots", "date": "2026-01-15"}),
            json!({"amount": 1.0, "date": "last tuesday"}),
        ] {
            let response = server.post(endpoints::CREATE_EXPENSE).json(&body).await;

            response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
            assert!(response.json::<Value>()["detail"].is_string());
        }
    }

    #[tokio::test]
    async fn invalid_json_is_rejected() {
        let server = must_create_test_server();

        server
            .post(endpoints::CREATE_EXPENSE)
            .bytes("{\"amount\": ".into())
            .content_type("application/json")
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
