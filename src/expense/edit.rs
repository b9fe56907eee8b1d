//! Expense editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{
        Expense, ExpenseFormData, ExpenseId,
        create::{ExpenseFormValues, expense_form_fields},
        get_expense, update_expense,
    },
    html::{
        BUTTON_DELETE_STYLE, BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, LINK_STYLE, base,
        dollar_input_styles, format_amount,
    },
};

/// The state needed for the edit expense page.
#[derive(Debug, Clone)]
pub struct EditExpensePageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The state needed for updating an expense.
#[derive(Debug, Clone)]
pub struct UpdateExpenseEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the expense editing page.
pub async fn get_edit_expense_page(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<EditExpensePageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection).inspect_err(|error| {
        if *error != Error::NotFound {
            tracing::error!("Failed to retrieve expense {expense_id}: {error}");
        }
    })?;

    Ok(edit_expense_view(&expense).into_response())
}

/// Handle expense update form submission.
pub async fn update_expense_endpoint(
    Path(expense_id): Path<ExpenseId>,
    State(state): State<UpdateExpenseEndpointState>,
    Form(form_data): Form<ExpenseFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let new_expense = match form_data.parse() {
        Ok(new_expense) => new_expense,
        Err(error) => {
            let update_endpoint = endpoints::format_endpoint(endpoints::PUT_EXPENSE, expense_id);
            let values = ExpenseFormValues {
                title: &form_data.title,
                amount: &form_data.amount,
                start_date: &form_data.start_date,
                end_date: &form_data.end_date,
            };

            return edit_expense_form_view(&update_endpoint, &values, &format!("Error: {error}"))
                .into_response();
        }
    };

    match update_expense(expense_id, new_expense, &connection) {
        Ok(_) => {
            tracing::info!("Updated expense {expense_id}");
            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(Error::UpdateMissingExpense) => Error::UpdateMissingExpense.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating expense {expense_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_expense_view(expense: &Expense) -> Markup {
    let update_endpoint = endpoints::format_endpoint(endpoints::PUT_EXPENSE, expense.id);
    let delete_endpoint = endpoints::format_endpoint(endpoints::DELETE_EXPENSE, expense.id);
    let amount = format_amount(expense.amount);
    let start_date = expense.start_date.to_string();
    let end_date = expense.end_date.to_string();
    let values = ExpenseFormValues {
        title: expense.title.as_ref(),
        amount: &amount,
        start_date: &start_date,
        end_date: &end_date,
    };

    let content = html! {
        div class=(FORM_CONTAINER_STYLE)
        {
            div class="w-full max-w-md space-y-6"
            {
                h1 class="text-xl font-bold" { "Edit Expense" }

                (edit_expense_form_view(&update_endpoint, &values, ""))

                div class="flex justify-between items-center"
                {
                    a href=(endpoints::DASHBOARD_VIEW) class=(LINK_STYLE) { "Back to Dashboard" }

                    button
                        hx-delete=(delete_endpoint)
                        hx-confirm={ "Are you sure you want to delete '" (expense.title) "'?" }
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    };

    base("Edit Expense", &[dollar_input_styles()], &content)
}

fn edit_expense_form_view(
    update_endpoint: &str,
    values: &ExpenseFormValues,
    error_message: &str,
) -> Markup {
    html! {
        form
            hx-put=(update_endpoint)
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            (expense_form_fields(values))

            @if !error_message.is_empty() {
                p class="text-red-500 text-base" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Expense" }
        }
    }
}
