//! Downloading every expense as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header,
    response::{IntoResponse, Response},
};
use csv::{QuoteStyle, WriterBuilder};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    expense::{Expense, get_all_expenses},
};

/// The header row of exported and imported CSV files.
pub const CSV_HEADER: [&str; 4] = ["Title", "Amount", "Start Date", "End Date"];

const EXPORT_FILE_NAME: &str = "expenses.csv";

/// The state needed for exporting expenses.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Route handler for downloading all expenses as `expenses.csv`.
pub async fn export_expenses(State(state): State<ExportState>) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(&connection)?
    };

    let csv = expenses_to_csv(&expenses)
        .inspect_err(|error| tracing::error!("Could not export expenses: {error}"))?;
    tracing::debug!("Exported {} expenses", expenses.len());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Write `expenses` as CSV with a header row and one record per expense.
///
/// Titles that contain commas, quotes or line breaks are quoted.
///
/// # Errors
/// Returns an [Error::CsvExportError] if a record could not be written.
pub fn expenses_to_csv(expenses: &[Expense]) -> Result<String, Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADER)
        .map_err(|error| Error::CsvExportError(error.to_string()))?;

    for expense in expenses {
        let amount = csv_amount(expense.amount);
        let start_date = expense.start_date.to_string();
        let end_date = expense.end_date.to_string();

        writer
            .write_record([
                expense.title.as_ref(),
                amount.as_str(),
                start_date.as_str(),
                end_date.as_str(),
            ])
            .map_err(|error| Error::CsvExportError(error.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvExportError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvExportError(error.to_string()))
}

/// The shortest text that parses back to exactly `amount`, e.g. "1200" or "33.333".
fn csv_amount(amount: f64) -> String {
    if amount == 0.0 {
        "0".to_owned()
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod expenses_to_csv_tests {
    use crate::{
        csv_import::parse_expenses_csv,
        expense::{Expense, ExpenseTitle},
    };

    use super::expenses_to_csv;

    fn expense(id: i64, title: &str, amount: f64, start: &str, end: &str) -> Expense {
        Expense {
            id,
            title: ExpenseTitle::new_unchecked(title),
            amount,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
        }
    }

    #[test]
    fn writes_header_and_one_row_per_expense() {
        let expenses = [
            expense(1, "Rent", 1200.0, "2024-01", "2024-12"),
            expense(2, "Gym", 49.5, "2024-03", "2024-03"),
        ];

        let csv = expenses_to_csv(&expenses).unwrap();

        assert_eq!(
            csv,
            "Title,Amount,Start Date,End Date\n\
             Rent,1200,2024-01,2024-12\n\
             Gym,49.5,2024-03,2024-03\n"
        );
    }

    #[test]
    fn quotes_titles_with_commas_and_quotes() {
        let expenses = [expense(1, "Food, \"fancy\"", 300.0, "2024-01", "2024-02")];

        let csv = expenses_to_csv(&expenses).unwrap();

        assert_eq!(
            csv,
            "Title,Amount,Start Date,End Date\n\
             \"Food, \"\"fancy\"\"\",300,2024-01,2024-02\n"
        );
    }

    #[test]
    fn writes_amounts_at_full_precision() {
        let expenses = [
            expense(1, "Split bill", 33.333, "2024-01", "2024-12"),
            expense(2, "Refund", -0.0, "2024-01", "2024-01"),
        ];

        let csv = expenses_to_csv(&expenses).unwrap();

        assert_eq!(
            csv,
            "Title,Amount,Start Date,End Date\n\
             Split bill,33.333,2024-01,2024-12\n\
             Refund,0,2024-01,2024-01\n"
        );
    }

    #[test]
    fn parsing_exported_csv_gives_back_every_expense() {
        let expenses = [
            expense(1, "Rent", 1200.0, "2024-01", "2024-12"),
            expense(2, "Food, drinks", 300.125, "2024-02", "2024-03"),
            expense(3, "Say \"cheese\"", -20.25, "2023-11", "2024-02"),
            expense(4, "Split bill", 33.333, "2024-06", "2024-06"),
            expense(5, "Rounding", 0.1 + 0.2, "2025-01", "2025-12"),
        ];

        let csv = expenses_to_csv(&expenses).unwrap();
        let parsed = parse_expenses_csv(&csv).unwrap();

        assert_eq!(parsed.skipped, 0);
        assert_eq!(parsed.expenses.len(), expenses.len());
        for (want, got) in expenses.iter().zip(parsed.expenses.iter()) {
            assert_eq!(got.title, want.title);
            assert_eq!(got.amount, want.amount);
            assert_eq!(got.start_date, want.start_date);
            assert_eq!(got.end_date, want.end_date);
        }
    }

    #[test]
    fn empty_store_writes_header_only() {
        assert_eq!(
            expenses_to_csv(&[]).unwrap(),
            "Title,Amount,Start Date,End Date\n"
        );
    }
}
