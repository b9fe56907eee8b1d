//! Database schema setup.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{expense::create_expense_table, income::create_income_table};

/// Create the tables for the app's domain models if they do not already exist.
///
/// `default_income` is stored as the monthly income only when the database has none yet.
///
/// # Errors
/// Returns an error if a table could not be created.
pub fn initialize(connection: &Connection, default_income: f64) -> Result<(), rusqlite::Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_expense_table(&transaction)?;
    create_income_table(default_income, &transaction)?;

    transaction.commit()?;

    Ok(())
}
