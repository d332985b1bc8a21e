//! Database operations for expenses.

use rusqlite::{Connection, named_params, params};

use crate::{
    Error,
    expense::{
        core::{Expense, ExpenseForm, ExpenseId, map_row_to_expense},
        range::DateRange,
    },
};

/// The number of rows changed by an update or delete.
pub type RowsAffected = usize;

/// Create an expense and return it with its generated ID.
pub fn insert_expense(form: &ExpenseForm, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (amount, description, category, date) VALUES (?1, ?2, ?3, ?4);",
        params![form.amount, form.description, form.category, form.date],
    )?;

    let id = ExpenseId::new(connection.last_insert_rowid());

    Ok(Expense {
        id,
        amount: form.amount,
        description: form.description.clone(),
        category: form.category.clone(),
        date: form.date,
    })
}

/// Retrieve a single expense by ID.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare("SELECT id, amount, description, category, date FROM expense WHERE id = :id;")?
        .query_row(named_params! {":id": id}, map_row_to_expense)
        .map_err(|error| error.into())
}

/// Retrieve the newest expenses first, at most `limit` of them.
///
/// When `category` is given only expenses with exactly that category are
/// returned.
pub fn get_expenses(
    category: Option<&str>,
    limit: u32,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, description, category, date FROM expense \
            WHERE (:category IS NULL OR category = :category) \
            ORDER BY date DESC, id DESC \
            LIMIT :limit;",
        )?
        .query_map(
            named_params! {":category": category, ":limit": limit},
            map_row_to_expense,
        )?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the expenses dated within `range`, newest first.
///
/// When `category` is given only expenses with exactly that category are
/// returned.
pub fn get_expenses_in_range(
    range: DateRange,
    category: Option<&str>,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, amount, description, category, date FROM expense \
            WHERE date >= :start AND date < :end \
            AND (:category IS NULL OR category = :category) \
            ORDER BY date DESC, id DESC;",
        )?
        .query_map(
            named_params! {
                ":start": range.start.midnight(),
                ":end": range.end.midnight(),
                ":category": category,
            },
            map_row_to_expense,
        )?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Overwrite every field of an expense except its ID.
pub fn update_expense(
    id: ExpenseId,
    form: &ExpenseForm,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "UPDATE expense \
            SET \
                amount = ?1, \
                description = ?2, \
                category = ?3, \
                date = ?4 \
            WHERE id = ?5;",
            params![form.amount, form.description, form.category, form.date, id],
        )
        .map_err(Error::from)
}

/// Delete an expense by ID.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<RowsAffected, Error> {
    connection
        .execute("DELETE FROM expense WHERE id = :id", named_params! {":id": id})
        .map_err(Error::from)
}
