//! Defines the endpoint for deleting an expense.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{
        ExpenseState,
        core::ExpenseId,
        db::{delete_expense, get_expense},
    },
};

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletedExpense {
    pub message: String,
}

/// A route handler for deleting an expense.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<String>,
) -> Result<Json<DeletedExpense>, Error> {
    let expense_id = ExpenseId::from_str(&expense_id)?;

    let connection = state.connection()?;
    remove_expense(expense_id, &connection)?;

    tracing::info!("Deleted expense {expense_id}");

    Ok(Json(DeletedExpense {
        message: "Expense deleted successfully".to_owned(),
    }))
}

fn remove_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    match get_expense(id, connection) {
        Err(Error::NotFound) => return Err(Error::ExpenseNotFound),
        Err(error) => return Err(error),
        Ok(_) => {}
    }

    match delete_expense(id, connection)? {
        0 => {
            tracing::error!("Expense {id} existed but the delete removed no rows");
            Err(Error::DeleteFailed)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use rusqlite::Connection;
    use serde_json::Value;
    use time::macros::datetime;

    use crate::{
        Error, endpoints,
        expense::{core::ExpenseForm, db::insert_expense},
        initialize_db,
        test_utils::{must_create_expense, must_create_test_server},
    };

    use super::{DeletedExpense, remove_expense};

    fn delete_path(id: &str) -> String {
        endpoints::DELETE_EXPENSE.replace("{expense_id}", id)
    }

    #[tokio::test]
    async fn deletes_expense() {
        let server = must_create_test_server();
        let id = must_create_expense(&server, 12.5, Some("food"), "2026-01-15").await;

        let response = server.delete(&delete_path(&id)).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<DeletedExpense>().message,
            "Expense deleted successfully"
        );
        server
            .get(endpoints::LIST_EXPENSES)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn second_delete_responds_not_found() {
        let server = must_create_test_server();
        let id = must_create_expense(&server, 12.5, None, "2026-01-15").await;

        server.delete(&delete_path(&id)).await.assert_status_ok();
        let response = server.delete(&delete_path(&id)).await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<Value>()["detail"], "Expense not found");
    }

    #[tokio::test]
    async fn malformed_id_is_rejected() {
        let server = must_create_test_server();

        server
            .delete(&delete_path("65a1f0c2e4b0a1b2c3d4e5f6"))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn delete_removing_no_rows_is_an_internal_error() {
        let connection = Connection::open_in_memory().unwrap();
        initialize_db(&connection).unwrap();
        let expense = insert_expense(
            &ExpenseForm {
                amount: 1.0,
                description: None,
                category: None,
                date: datetime!(2026-01-15 0:00),
            },
            &connection,
        )
        .unwrap();
        // Simulates the row vanishing between the existence check and the delete.
        connection
            .execute_batch(
                "CREATE TRIGGER skip_delete BEFORE DELETE ON expense
                BEGIN SELECT RAISE(IGNORE); END;",
            )
            .unwrap();

        assert_eq!(
            remove_expense(expense.id, &connection),
            Err(Error::DeleteFailed)
        );
    }
}
