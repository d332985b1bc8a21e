//! Month and year periods for listing expenses.

use serde::Deserialize;
use time::{Date, Month};

use crate::Error;

/// The query string for listing expenses in a month or year.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    /// The month from 1 to 12, or 0 for the whole year.
    pub month: u8,
    /// The calendar year.
    pub year: i32,
    /// Only include expenses with exactly this category.
    pub category: Option<String>,
}

/// A calendar period to list expenses for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// Every day of the year.
    Year(i32),
    /// Every day of one month.
    Month(i32, Month),
}

impl TryFrom<&RangeQuery> for Period {
    type Error = Error;

    fn try_from(query: &RangeQuery) -> Result<Self, Self::Error> {
        match query.month {
            0 => Ok(Period::Year(query.year)),
            month => Month::try_from(month)
                .map(|month| Period::Month(query.year, month))
                .map_err(|_| Error::InvalidMonth(month)),
        }
    }
}

/// A half-open range of days: `start` is included, `end` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl Period {
    /// The days covered by the period.
    ///
    /// # Errors
    /// Returns [Error::InvalidYear] if the period starts or ends outside of
    /// the years that can be represented.
    pub fn date_range(self) -> Result<DateRange, Error> {
        let (year, start_month) = match self {
            Period::Year(year) => (year, Month::January),
            Period::Month(year, month) => (year, month),
        };

        let (end_year, end_month) = match self {
            Period::Year(year) | Period::Month(year, Month::December) => (
                year.checked_add(1).ok_or(Error::InvalidYear(year))?,
                Month::January,
            ),
            Period::Month(year, month) => (year, month.next()),
        };

        let start = first_of_month(year, start_month)?;
        let end = first_of_month(end_year, end_month)?;

        Ok(DateRange { start, end })
    }
}

fn first_of_month(year: i32, month: Month) -> Result<Date, Error> {
    Date::from_calendar_date(year, month, 1).map_err(|_| Error::InvalidYear(year))
}
