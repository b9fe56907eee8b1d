//! Database operations for the monthly income setting.

use rusqlite::Connection;

use crate::Error;

/// The monthly income used for a new database.
pub const DEFAULT_MONTHLY_INCOME: f64 = 5000.0;

/// Get the current monthly income.
pub fn get_income(connection: &Connection) -> Result<f64, Error> {
    connection
        .query_row("SELECT monthly_income FROM income WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Replace the monthly income.
pub fn set_income(monthly_income: f64, connection: &Connection) -> Result<f64, Error> {
    connection.execute(
        "INSERT INTO income (id, monthly_income) VALUES (1, ?1)
         ON CONFLICT(id) DO UPDATE SET monthly_income = excluded.monthly_income;",
        [monthly_income],
    )?;

    Ok(monthly_income)
}

/// Initialize the single row income table.
///
/// `default_income` is only stored if the table does not already have a value.
pub fn create_income_table(
    default_income: f64,
    connection: &Connection,
) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS income (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            monthly_income REAL NOT NULL
        );",
    )?;

    connection.execute(
        "INSERT OR IGNORE INTO income (id, monthly_income) VALUES (1, ?1);",
        [default_income],
    )?;

    Ok(())
}
