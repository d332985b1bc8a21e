//! Defines the endpoint for listing the expenses of a month or a whole year.

use axum::{Json, extract::State};

use crate::{
    Error,
    expense::{
        ExpenseState,
        core::ExpenseResponse,
        db::get_expenses_in_range,
        range::{Period, RangeQuery},
    },
    extract::ValidatedQuery,
};

/// A route handler for listing the expenses dated within a month or year.
///
/// Unlike [super::list_expenses_endpoint], the category is matched exactly
/// as given and the number of results is not capped.
pub async fn list_expenses_in_range_endpoint(
    State(state): State<ExpenseState>,
    ValidatedQuery(query): ValidatedQuery<RangeQuery>,
) -> Result<Json<Vec<ExpenseResponse>>, Error> {
    let range = Period::try_from(&query)?.date_range()?;
    let category = query.category.as_deref().filter(|category| !category.is_empty());

    let connection = state.connection()?;
    let expenses = get_expenses_in_range(range, category, &connection)?;

    if expenses.is_empty() {
        return Err(Error::NoExpensesInRange);
    }

    tracing::debug!(
        "found {} expenses between {} and {}",
        expenses.len(),
        range.start,
        range.end
    );

    Ok(Json(
        expenses.into_iter().map(ExpenseResponse::from).collect(),
    ))
}
