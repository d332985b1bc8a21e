//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/update-by-id/{expense_id}',
//! replace the parameter with the ID.

/// The route for checking that the server is up.
pub const HEALTH: &str = "/api/health";
/// The route for listing the newest expenses.
pub const LIST_EXPENSES: &str = "/api/expenses/get-all";
/// The route for listing the expenses of a month or year.
pub const LIST_EXPENSES_IN_RANGE: &str = "/api/expenses/get-by-date-range";
/// The route to create an expense.
pub const CREATE_EXPENSE: &str = "/api/expenses/create";
/// The route to replace an expense.
pub const UPDATE_EXPENSE: &str = "/api/expenses/update-by-id/{expense_id}";
/// The route to delete an expense.
pub const DELETE_EXPENSE: &str = "/api/expenses/delete-by-id/{expense_id}";
