//! Core expense domain types and boundary parsing.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, month::YearMonth};

/// A validated, non-empty expense title.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ExpenseTitle(String);

impl ExpenseTitle {
    /// Create an expense title.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyTitle] if `title` is empty or only whitespace.
    pub fn new(title: &str) -> Result<Self, Error> {
        let title = title.trim();

        if title.is_empty() {
            Err(Error::EmptyTitle)
        } else {
            Ok(Self(title.to_string()))
        }
    }

    /// Create an expense title without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(title: &str) -> Self {
        Self(title.to_string())
    }
}

impl AsRef<str> for ExpenseTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ExpenseTitle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ExpenseTitle::new(s)
    }
}

impl Display for ExpenseTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A recurring monthly expense that is active from `start_date` through `end_date`, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub title: ExpenseTitle,
    /// The amount charged every month, may be negative.
    pub amount: f64,
    pub start_date: YearMonth,
    pub end_date: YearMonth,
}

impl Expense {
    /// Whether the expense is charged in `month`.
    ///
    /// An expense whose start is after its end is never active.
    pub fn is_active_in(&self, month: YearMonth) -> bool {
        self.start_date <= month && month <= self.end_date
    }
}

/// The validated fields of an expense that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub title: ExpenseTitle,
    pub amount: f64,
    pub start_date: YearMonth,
    pub end_date: YearMonth,
}

impl NewExpense {
    /// Create a new expense.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidDateRange] if `start_date` is after `end_date`, or
    /// [Error::InvalidAmount] if `amount` is not finite.
    pub fn new(
        title: ExpenseTitle,
        amount: f64,
        start_date: YearMonth,
        end_date: YearMonth,
    ) -> Result<Self, Error> {
        if !amount.is_finite() {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        if start_date > end_date {
            return Err(Error::InvalidDateRange {
                start: start_date,
                end: end_date,
            });
        }

        Ok(Self {
            title,
            amount,
            start_date,
            end_date,
        })
    }

    /// Parse the raw text fields submitted by a form or a CSV row.
    ///
    /// # Errors
    ///
    /// Returns the first validation error from the title, amount, months or date range.
    pub fn parse(
        title: &str,
        amount: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Self, Error> {
        Self::new(
            ExpenseTitle::new(title)?,
            parse_amount(amount)?,
            start_date.parse()?,
            end_date.parse()?,
        )
    }
}

/// Parse a finite number from user input, e.g. "1200" or " 99.95 ".
///
/// # Errors
///
/// Returns an [Error::InvalidAmount] if `text` is not a number or is infinite or NaN.
pub fn parse_amount(text: &str) -> Result<f64, Error> {
    let trimmed = text.trim();

    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(Error::InvalidAmount(trimmed.to_owned())),
    }
}

/// A number sent as either a JSON number or a string, since HTML inputs submit text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Parse the input as a finite number.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidAmount] if the input is not a finite number.
    pub fn parse(&self) -> Result<f64, Error> {
        match self {
            NumericInput::Number(number) if number.is_finite() => Ok(*number),
            NumericInput::Number(number) => Err(Error::InvalidAmount(number.to_string())),
            NumericInput::Text(text) => parse_amount(text),
        }
    }
}

/// The JSON body for creating or updating an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRequest {
    pub title: String,
    pub amount: NumericInput,
    pub start_date: String,
    pub end_date: String,
}

impl ExpenseRequest {
    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns the first validation error from the title, amount, months or date range.
    pub fn parse(&self) -> Result<NewExpense, Error> {
        NewExpense::new(
            ExpenseTitle::new(&self.title)?,
            self.amount.parse()?,
            self.start_date.parse()?,
            self.end_date.parse()?,
        )
    }
}

/// Form data for expense creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseFormData {
    pub title: String,
    pub amount: String,
    pub start_date: String,
    pub end_date: String,
}

impl ExpenseFormData {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the first validation error from the title, amount, months or date range.
    pub fn parse(&self) -> Result<NewExpense, Error> {
        NewExpense::parse(&self.title, &self.amount, &self.start_date, &self.end_date)
    }
}


#[cfg(test)]
mod parse_tests {
    use crate::{
        Error,
        expense::{ExpenseRequest, NewExpense, NumericInput, parse_amount},
    };

    #[test]
    fn parses_amounts_with_whitespace() {
        assert_eq!(parse_amount(" 1200 "), Ok(1200.0));
        assert_eq!(parse_amount("-15.5"), Ok(-15.5));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite_amounts() {
        for text in ["", "abc", "12abc", "NaN", "inf", "-infinity"] {
            assert_eq!(
                parse_amount(text),
                Err(Error::InvalidAmount(text.to_owned())),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn numeric_input_accepts_numbers_and_strings() {
        let number: NumericInput = serde_json::from_str("5000").unwrap();
        let text: NumericInput = serde_json::from_str("\"4500.5\"").unwrap();
        let garbage: NumericInput = serde_json::from_str("\"lots\"").unwrap();

        assert_eq!(number.parse(), Ok(5000.0));
        assert_eq!(text.parse(), Ok(4500.5));
        assert_eq!(garbage.parse(), Err(Error::InvalidAmount("lots".to_owned())));
    }

    #[test]
    fn rejects_inverted_date_range() {
        let got = NewExpense::parse("Rent", "1200", "2024-12", "2024-01");

        assert_eq!(
            got,
            Err(Error::InvalidDateRange {
                start: "2024-12".parse().unwrap(),
                end: "2024-01".parse().unwrap(),
            })
        );
    }

    #[test]
    fn single_month_range_is_valid() {
        assert!(NewExpense::parse("Car service", "450", "2024-05", "2024-05").is_ok());
    }

    #[test]
    fn request_uses_camel_case_fields() {
        let request: ExpenseRequest = serde_json::from_str(
            r#"{"title": "Rent", "amount": "1200", "startDate": "2024-01", "endDate": "2024-12"}"#,
        )
        .unwrap();

        let got = request.parse().unwrap();

        assert_eq!(got.title.as_ref(), "Rent");
        assert_eq!(got.amount, 1200.0);
        assert_eq!(got.start_date.to_string(), "2024-01");
        assert_eq!(got.end_date.to_string(), "2024-12");
    }

    #[test]
    fn request_with_malformed_month_is_rejected() {
        let request: ExpenseRequest = serde_json::from_str(
            r#"{"title": "Rent", "amount": 1200, "startDate": "Jan 2024", "endDate": "2024-12"}"#,
        )
        .unwrap();

        assert_eq!(
            request.parse(),
            Err(Error::InvalidMonth("Jan 2024".to_owned()))
        );
    }
}
