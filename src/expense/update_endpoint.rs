//! Defines the endpoint for replacing an expense.

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
        core::{Expense, ExpenseForm, ExpenseId, ExpenseResponse},
        db::{get_expense, update_expense},
    },
    extract::ValidatedJson,
};

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatedExpense {
    pub message: String,
    pub expense: ExpenseResponse,
}

/// A route handler for replacing every field of an existing expense.
///
/// Optional fields missing from the payload are cleared.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseState>,
    Path(expense_id): Path<String>,
    ValidatedJson(form): ValidatedJson<ExpenseForm>,
) -> Result<Json<UpdatedExpense>, Error> {
    let expense_id = ExpenseId::from_str(&expense_id)?;

    let connection = state.connection()?;
    let expense = replace_expense(expense_id, &form, &connection)?;

    tracing::info!("Updated expense {expense_id}");

    Ok(Json(UpdatedExpense {
        message: "Expense updated successfully".to_owned(),
        expense: expense.into(),
    }))
}

/// Check that the expense exists, overwrite it and read it back.
///
/// The check and the write are separate statements, so a delete from another
/// request in between is reported as [Error::UpdateFailed].
fn replace_expense(
    id: ExpenseId,
    form: &ExpenseForm,
    connection: &Connection,
) -> Result<Expense, Error> {
    match get_expense(id, connection) {
        Err(Error::NotFound) => return Err(Error::ExpenseNotFound),
        Err(error) => return Err(error),
        Ok(_) => {}
    }

    match update_expense(id, form, connection)? {
        0 => {
            tracing::error!("Expense {id} existed but the update changed no rows");
            Err(Error::UpdateFailed)
        }
        _ => get_expense(id, connection),
    }
}
