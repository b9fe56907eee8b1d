//! Database operations for expenses.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    expense::{Expense, ExpenseId, ExpenseTitle, NewExpense},
};

/// Create an expense and return it with its generated ID.
pub fn create_expense(expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (title, amount, start_date, end_date) VALUES (?1, ?2, ?3, ?4);",
        (
            expense.title.as_ref(),
            expense.amount,
            expense.start_date,
            expense.end_date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Expense {
        id,
        title: expense.title,
        amount: expense.amount,
        start_date: expense.start_date,
        end_date: expense.end_date,
    })
}

/// Retrieve a single expense by ID.
///
/// # Errors
/// Returns [Error::NotFound] if `expense_id` does not refer to a stored expense.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare("SELECT id, title, amount, start_date, end_date FROM expense WHERE id = :id;")?
        .query_row(&[(":id", &expense_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all expenses in the order they were created.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare("SELECT id, title, amount, start_date, end_date FROM expense ORDER BY id ASC;")?
        .query_map([], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Replace every field of an expense except its ID.
///
/// # Errors
/// Returns [Error::UpdateMissingExpense] if the expense doesn't exist.
pub fn update_expense(
    expense_id: ExpenseId,
    expense: NewExpense,
    connection: &Connection,
) -> Result<Expense, Error> {
    let rows_affected = connection.execute(
        "UPDATE expense SET title = ?1, amount = ?2, start_date = ?3, end_date = ?4 WHERE id = ?5",
        (
            expense.title.as_ref(),
            expense.amount,
            expense.start_date,
            expense.end_date,
            expense_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(Expense {
        id: expense_id,
        title: expense.title,
        amount: expense.amount,
        start_date: expense.start_date,
        end_date: expense.end_date,
    })
}

/// Delete an expense by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingExpense] if the expense doesn't exist.
pub fn delete_expense(expense_id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [expense_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Delete every expense and insert `expenses` in their place.
///
/// Either all of the changes are applied or, on error, none of them are.
/// New IDs continue from the previous highest ID.
pub fn replace_all_expenses(
    expenses: Vec<NewExpense>,
    connection: &Connection,
) -> Result<Vec<Expense>, Error> {
    let tx = connection.unchecked_transaction()?;
    tx.execute("DELETE FROM expense;", [])?;

    let mut stmt = tx.prepare(
        "INSERT INTO expense (title, amount, start_date, end_date)
         VALUES (?1, ?2, ?3, ?4)
         RETURNING id, title, amount, start_date, end_date",
    )?;

    let mut created = Vec::with_capacity(expenses.len());
    for expense in expenses {
        let row = stmt.query_row(
            (
                expense.title.as_ref(),
                expense.amount,
                expense.start_date,
                expense.end_date,
            ),
            map_row,
        )?;
        created.push(row);
    }

    drop(stmt);

    tx.commit()?;
    Ok(created)
}

/// Delete every expense, returning how many were deleted.
pub fn delete_all_expenses(connection: &Connection) -> Result<usize, Error> {
    connection
        .execute("DELETE FROM expense;", [])
        .map_err(|error| error.into())
}

/// Initialize the expense table.
///
/// `AUTOINCREMENT` stops IDs from being reused after the last expense is deleted.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            amount REAL NOT NULL,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_title: String = row.get(1)?;
    let title = ExpenseTitle::new_unchecked(&raw_title);

    Ok(Expense {
        id,
        title,
        amount: row.get(2)?,
        start_date: row.get(3)?,
        end_date: row.get(4)?,
    })
}

#[cfg(test)]
mod expense_query_tests {
    use rusqlite::Connection;

    use crate::{
        Error,
        expense::{
            Expense, NewExpense, create_expense, delete_all_expenses, delete_expense,
            get_all_expenses, get_expense, replace_all_expenses, update_expense,
        },
    };

    use super::create_expense_table;

    fn get_test_db_connection() -> Connection {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_expense_table(&connection).expect("Could not create expense table");
        connection
    }

    fn new_expense(title: &str, amount: f64, start: &str, end: &str) -> NewExpense {
        NewExpense::parse(title, &amount.to_string(), start, end)
            .expect("Could not create test expense")
    }

    #[test]
    fn create_assigns_increasing_ids() {
        let connection = get_test_db_connection();

        let first = create_expense(new_expense("Rent", 1200.0, "2024-01", "2024-12"), &connection)
            .unwrap();
        let second = create_expense(
            new_expense("Gym", 45.0, "2024-03", "2024-06"),
            &connection,
        )
        .unwrap();

        assert!(second.id > first.id);
        assert_eq!(get_expense(first.id, &connection), Ok(first));
    }

    #[test]
    fn get_missing_expense_returns_not_found() {
        let connection = get_test_db_connection();

        assert_eq!(get_expense(42, &connection), Err(Error::NotFound));
    }

    #[test]
    fn get_all_preserves_creation_order_after_update() {
        let connection = get_test_db_connection();
        let rent = create_expense(new_expense("Rent", 1200.0, "2024-01", "2024-12"), &connection)
            .unwrap();
        let gym = create_expense(new_expense("Gym", 45.0, "2024-03", "2024-06"), &connection)
            .unwrap();

        let updated = update_expense(
            rent.id,
            new_expense("Rent (new flat)", 1350.0, "2024-02", "2025-01"),
            &connection,
        )
        .unwrap();

        assert_eq!(get_all_expenses(&connection), Ok(vec![updated, gym]));
    }

    #[test]
    fn update_missing_expense_leaves_store_unchanged() {
        let connection = get_test_db_connection();
        let rent = create_expense(new_expense("Rent", 1200.0, "2024-01", "2024-12"), &connection)
            .unwrap();

        let result = update_expense(
            rent.id + 1,
            new_expense("Ghost", 1.0, "2024-01", "2024-01"),
            &connection,
        );

        assert_eq!(result, Err(Error::UpdateMissingExpense));
        assert_eq!(get_all_expenses(&connection), Ok(vec![rent]));
    }

    #[test]
    fn delete_removes_expense() {
        let connection = get_test_db_connection();
        let rent = create_expense(new_expense("Rent", 1200.0, "2024-01", "2024-12"), &connection)
            .unwrap();

        assert_eq!(delete_expense(rent.id, &connection), Ok(()));
        assert_eq!(get_all_expenses(&connection), Ok(vec![]));
        assert_eq!(
            delete_expense(rent.id, &connection),
            Err(Error::DeleteMissingExpense)
        );
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let connection = get_test_db_connection();
        let first = create_expense(new_expense("Rent", 1200.0, "2024-01", "2024-12"), &connection)
            .unwrap();
        delete_expense(first.id, &connection).unwrap();

        let second = create_expense(new_expense("Rent", 1200.0, "2024-01", "2024-12"), &connection)
            .unwrap();

        assert!(second.id > first.id);
    }

    #[test]
    fn replace_all_swaps_the_whole_list() {
        let connection = get_test_db_connection();
        let old = create_expense(new_expense("Old", 10.0, "2024-01", "2024-02"), &connection)
            .unwrap();

        let created = replace_all_expenses(
            vec![
                new_expense("Rent", 1200.0, "2024-01", "2024-12"),
                new_expense("Gym", 45.0, "2024-03", "2024-06"),
            ],
            &connection,
        )
        .unwrap();

        let got = get_all_expenses(&connection).unwrap();
        assert_eq!(got, created);
        assert_eq!(
            got.iter().map(|expense| expense.title.as_ref()).collect::<Vec<_>>(),
            vec!["Rent", "Gym"]
        );
        assert!(got.iter().all(|expense: &Expense| expense.id > old.id));
    }

    #[test]
    fn replace_all_rolls_back_on_failure() {
        let connection = get_test_db_connection();
        let rent = create_expense(new_expense("Rent", 1200.0, "2024-01", "2024-12"), &connection)
            .unwrap();
        connection
            .execute_batch(
                "CREATE TRIGGER reject_gym BEFORE INSERT ON expense
                 WHEN NEW.title = 'Gym'
                 BEGIN SELECT RAISE(ABORT, 'no gyms allowed'); END;",
            )
            .unwrap();

        let result = replace_all_expenses(
            vec![
                new_expense("Phone", 30.0, "2024-01", "2024-12"),
                new_expense("Gym", 45.0, "2024-03", "2024-06"),
            ],
            &connection,
        );

        assert!(matches!(result, Err(Error::SqlError(_))));
        assert_eq!(get_all_expenses(&connection), Ok(vec![rent]));
    }

    #[test]
    fn delete_all_returns_count() {
        let connection = get_test_db_connection();
        create_expense(new_expense("Rent", 1200.0, "2024-01", "2024-12"), &connection).unwrap();
        create_expense(new_expense("Gym", 45.0, "2024-03", "2024-06"), &connection).unwrap();

        assert_eq!(delete_all_expenses(&connection), Ok(2));
        assert_eq!(get_all_expenses(&connection), Ok(vec![]));
    }
}
