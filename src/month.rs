//! A calendar month without a day component, e.g. `2024-03`.
//!
//! [YearMonth] is the unit of the expense timeline. Its ordering agrees with the
//! lexicographic ordering of its zero-padded `YYYY-MM` text form, so comparing two
//! values is equivalent to comparing the strings the client sends.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// A year and month, stored as the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth(Date);

impl YearMonth {
    /// The calendar year.
    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// The month of the year.
    pub fn month(self) -> Month {
        self.0.month()
    }

    /// The month `months` calendar months after this one (before, if negative).
    ///
    /// Returns `None` if the result falls outside the range supported by [Date].
    pub fn add_months(self, months: i32) -> Option<Self> {
        self.month_index()
            .checked_add(months)
            .and_then(Self::from_month_index)
    }

    /// Like [YearMonth::add_months], but clamps to the earliest or latest representable month.
    pub fn saturating_add_months(self, months: i32) -> Self {
        self.add_months(months).unwrap_or_else(|| {
            let bound = if months < 0 { Date::MIN } else { Date::MAX };
            Self(Date::from_calendar_date(bound.year(), bound.month(), 1).unwrap_or(bound))
        })
    }

    /// The month after this one, or `None` at the end of the supported range.
    pub fn next(self) -> Option<Self> {
        self.add_months(1)
    }

    /// The number of months from `self` to `other`, negative if `other` is earlier.
    pub fn months_until(self, other: YearMonth) -> i32 {
        other.month_index() - self.month_index()
    }

    /// The label used on chart axes: a three letter month and two digit year, e.g. "Jan 24".
    pub fn label(self) -> String {
        format!(
            "{} {:02}",
            short_month_name(self.month()),
            self.year().rem_euclid(100)
        )
    }

    fn month_index(self) -> i32 {
        self.year() * 12 + (self.month() as i32 - 1)
    }

    fn from_month_index(index: i32) -> Option<Self> {
        let year = index.div_euclid(12);
        let month = Month::try_from((index.rem_euclid(12) + 1) as u8).ok()?;

        Date::from_calendar_date(year, month, 1).ok().map(Self)
    }
}

fn short_month_name(month: Month) -> &'static str {
    match month {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month() as u8)
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parse a month in the `YYYY-MM` format used by HTML month inputs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();

        Date::parse(&format!("{text}-01"), DATE_FORMAT)
            .map(Self)
            .map_err(|_| Error::InvalidMonth(text.to_owned()))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

impl ToSql for YearMonth {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for YearMonth {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(error.to_string().into()))
    }
}
