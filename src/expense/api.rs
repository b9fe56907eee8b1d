//! JSON endpoints for listing and changing expenses.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    error::{ApiError, ApiJson},
    expense::{
        Expense, ExpenseId, ExpenseRequest, NewExpense, create_expense, delete_all_expenses,
        delete_expense, get_all_expenses, replace_all_expenses, update_expense,
    },
    income::get_income,
};

/// The state needed by the expense JSON endpoints.
#[derive(Debug, Clone)]
pub struct ExpenseApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Every expense, in creation order, and the monthly income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseList {
    pub expenses: Vec<Expense>,
    pub monthly_income: f64,
}

/// List all expenses together with the monthly income.
pub async fn list_expenses_endpoint(
    State(state): State<ExpenseApiState>,
) -> Result<Json<ExpenseList>, ApiError> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = get_all_expenses(&connection)?;
    let monthly_income = get_income(&connection)?;

    Ok(Json(ExpenseList {
        expenses,
        monthly_income,
    }))
}

/// Create an expense and return it with its new ID.
pub async fn create_expense_api_endpoint(
    State(state): State<ExpenseApiState>,
    ApiJson(request): ApiJson<ExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let new_expense = request.parse()?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = create_expense(new_expense, &connection)?;
    tracing::info!("Created expense {} \"{}\"", expense.id, expense.title);

    Ok(Json(expense))
}

/// Replace the fields of an existing expense.
pub async fn update_expense_api_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<ExpenseApiState>,
    ApiJson(request): ApiJson<ExpenseRequest>,
) -> Result<Json<Expense>, ApiError> {
    let new_expense = request.parse()?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    update_expense(expense_id, new_expense, &connection)
        .map(Json)
        .map_err(ApiError::from)
}

/// Delete a single expense.
pub async fn delete_expense_api_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<ExpenseApiState>,
) -> Result<Json<Value>, ApiError> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    delete_expense(expense_id, &connection)?;
    tracing::info!("Deleted expense {expense_id}");

    Ok(Json(json!({ "message": "Expense deleted successfully" })))
}

/// Replace every expense with the expenses in the request body.
///
/// Nothing is changed unless every expense in the body is valid.
pub async fn replace_expenses_api_endpoint(
    State(state): State<ExpenseApiState>,
    ApiJson(requests): ApiJson<Vec<ExpenseRequest>>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let new_expenses = requests
        .iter()
        .map(ExpenseRequest::parse)
        .collect::<Result<Vec<NewExpense>, Error>>()?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expenses = replace_all_expenses(new_expenses, &connection)?;
    tracing::info!("Replaced all expenses with {} new expenses", expenses.len());

    Ok(Json(expenses))
}

/// Delete every expense.
pub async fn delete_all_expenses_api_endpoint(
    State(state): State<ExpenseApiState>,
) -> Result<Json<Value>, ApiError> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let deleted = delete_all_expenses(&connection)?;
    tracing::info!("Deleted all {deleted} expenses");

    Ok(Json(
        json!({ "message": "All expenses deleted successfully", "deleted": deleted }),
    ))
}
