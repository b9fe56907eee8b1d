//! Parsing expenses from CSV text.

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::{Error, expense::NewExpense};

/// The expenses read from a CSV file and how many rows were left out.
#[derive(Debug, PartialEq)]
pub struct ParsedExpenses {
    pub expenses: Vec<NewExpense>,
    /// Rows that were missing a field or had an invalid title, amount or month range.
    pub skipped: usize,
}

/// Parse the rows of `text` as `Title,Amount,Start Date,End Date`.
///
/// The first non-blank line is treated as the header and ignored. Blank lines are skipped
/// silently, while rows with missing or invalid fields are skipped and counted.
///
/// # Errors
/// Returns an [Error::InvalidCSV] if `text` is not well formed CSV.
pub fn parse_expenses_csv(text: &str) -> Result<ParsedExpenses, Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut expenses = Vec::new();
    let mut skipped = 0;

    for result in reader.records() {
        let record = result.map_err(|error| Error::InvalidCSV(error.to_string()))?;

        if is_blank(&record) {
            continue;
        }

        match parse_record(&record) {
            Some(expense) => expenses.push(expense),
            None => skipped += 1,
        }
    }

    Ok(ParsedExpenses { expenses, skipped })
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

fn parse_record(record: &StringRecord) -> Option<NewExpense> {
    let line = record.position().map_or(0, |position| position.line());

    let fields = (record.get(0), record.get(1), record.get(2), record.get(3));
    let (Some(title), Some(amount), Some(start_date), Some(end_date)) = fields else {
        tracing::debug!("Skipping CSV line {line}: expected 4 fields, got {}", record.len());
        return None;
    };

    if [title, amount, start_date, end_date]
        .iter()
        .any(|field| field.is_empty())
    {
        tracing::debug!("Skipping CSV line {line}: a field is empty");
        return None;
    }

    NewExpense::parse(title, amount, start_date, end_date)
        .inspect_err(|error| tracing::debug!("Skipping CSV line {line}: {error}"))
        .ok()
}
