use std::{fmt::Display, str::FromStr};

use rusqlite::{Connection, Row, ToSql, types::ToSqlOutput};
use serde::{Deserialize, Deserializer, Serialize};
use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::Error;

/// The store-assigned identifier of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExpenseId(i64);

impl ExpenseId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ExpenseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpenseId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(Error::InvalidExpenseId(s.to_owned())),
        }
    }
}

impl ToSql for ExpenseId {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        self.0.to_sql()
    }
}

/// A single recorded expense.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: f64,
    pub description: Option<String>,
    pub category: Option<String>,
    /// When the expense happened, kept to the full timestamp.
    pub date: PrimitiveDateTime,
}

/// The payload for creating an expense or replacing one in full.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseForm {
    /// How much was spent.
    pub amount: f64,
    /// Free text describing the expense.
    #[serde(default)]
    pub description: Option<String>,
    /// The category, stored exactly as given.
    #[serde(default)]
    pub category: Option<String>,
    /// When the expense happened.
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub date: PrimitiveDateTime,
}

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// An expense as it is sent to clients.
///
/// The time of day is dropped from `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseResponse {
    pub id: String,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    #[serde(with = "calendar_date")]
    pub date: Date,
}

impl From<Expense> for ExpenseResponse {
    fn from(expense: Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            amount: expense.amount,
            category: expense.category,
            description: expense.description,
            date: expense.date.date(),
        }
    }
}

const NAIVE_TIMESTAMP_FORMATS: &[&[BorrowedFormatItem<'static>]] = &[
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day] [hour]:[minute]"),
];

/// Parse a timestamp sent by a client.
///
/// Accepts RFC 3339 (converted to UTC), a timestamp without an offset, or a
/// bare calendar date which is taken as midnight.
pub fn parse_timestamp(text: &str) -> Option<PrimitiveDateTime> {
    let text = text.trim();

    if let Ok(date_time) =
        OffsetDateTime::parse(text, &time::format_description::well_known::Rfc3339)
    {
        let utc = date_time.to_offset(UtcOffset::UTC);
        return Some(PrimitiveDateTime::new(utc.date(), utc.time()));
    }

    if let Some(date_time) = NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| PrimitiveDateTime::parse(text, *format).ok())
    {
        return Some(date_time);
    }

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .map(Date::midnight)
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;

    parse_timestamp(&text)
        .ok_or_else(|| serde::de::Error::custom(format!("\"{text}\" is not a valid date-time")))
}

/// Create the expense collection and the descending date index.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            amount REAL NOT NULL,
            description TEXT,
            category TEXT,
            date TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date DESC);",
    )?;

    Ok(())
}

pub fn map_row_to_expense(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let description = row.get(2)?;
    let category = row.get(3)?;
    let date = row.get(4)?;

    Ok(Expense {
        id: ExpenseId::new(id),
        amount,
        description,
        category,
        date,
    })
}


#[cfg(test)]
mod parse_timestamp_tests {
    use time::macros::datetime;

    use super::parse_timestamp;

    #[test]
    fn parses_bare_date_as_midnight() {
        assert_eq!(
            parse_timestamp("2026-01-15"),
            Some(datetime!(2026-01-15 00:00))
        );
    }

    #[test]
    fn parses_naive_timestamps() {
        assert_eq!(
            parse_timestamp("2026-01-15T13:45:10"),
            Some(datetime!(2026-01-15 13:45:10))
        );
        assert_eq!(
            parse_timestamp("2026-01-15T13:45"),
            Some(datetime!(2026-01-15 13:45))
        );
        assert_eq!(
            parse_timestamp("2026-01-15 13:45:10.5"),
            Some(datetime!(2026-01-15 13:45:10.5))
        );
    }

    #[test]
    fn converts_offsets_to_utc() {
        assert_eq!(
            parse_timestamp("2026-01-15T01:00:00+13:00"),
            Some(datetime!(2026-01-14 12:00))
        );
        assert_eq!(
            parse_timestamp("2026-01-15T08:30:00Z"),
            Some(datetime!(2026-01-15 08:30))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2026-13-01"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
