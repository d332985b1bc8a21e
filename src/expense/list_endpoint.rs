//! Defines the endpoint for listing the most recent expenses.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    expense::{ExpenseState, core::ExpenseResponse, db::get_expenses},
    extract::ValidatedQuery,
};

/// The most expenses returned by [list_expenses_endpoint].
pub const MAX_LISTED_EXPENSES: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Only include expenses in this category, compared in lower case.
    pub category: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseList {
    pub expenses: Vec<ExpenseResponse>,
}

/// A route handler for listing the newest expenses, optionally by category.
///
/// Responds with 404 if no expense matches.
pub async fn list_expenses_endpoint(
    State(state): State<ExpenseState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<ExpenseList>, Error> {
    let category = query
        .category
        .filter(|category| !category.is_empty())
        .map(|category| category.to_lowercase());

    let connection = state.connection()?;
    let expenses = get_expenses(category.as_deref(), MAX_LISTED_EXPENSES, &connection)?;

    if expenses.is_empty() {
        return Err(Error::NoExpensesFound);
    }

    Ok(Json(ExpenseList {
        expenses: expenses.into_iter().map(ExpenseResponse::from).collect(),
    }))
}
