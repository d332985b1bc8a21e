//! Application router configuration.

use axum::{
    Json, Router,
    routing::{delete, get, post, put},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
        list_expenses_in_range_endpoint, update_expense_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::HEALTH, get(get_health))
        .route(endpoints::LIST_EXPENSES, get(list_expenses_endpoint))
        .route(
            endpoints::LIST_EXPENSES_IN_RANGE,
            get(list_expenses_in_range_endpoint),
        )
        .route(endpoints::CREATE_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::UPDATE_EXPENSE, put(update_expense_endpoint))
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

#[derive(Debug, Serialize, Deserialize)]
struct Health {
    message: String,
}

/// Report that the server is able to take requests.
async fn get_health() -> Json<Health> {
    Json(Health {
        message: "API is running".to_owned(),
    })
}
