//! The add expense form and its endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    expense::{ExpenseFormData, create_expense},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The state needed for creating an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle the add expense form submission.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseEndpointState>,
    Form(form): Form<ExpenseFormData>,
) -> Response {
    let new_expense = match form.parse() {
        Ok(new_expense) => new_expense,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_expense(new_expense, &connection) {
        Ok(expense) => {
            tracing::info!("Created expense {} \"{}\"", expense.id, expense.title);
            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");
            error.into_alert_response()
        }
    }
}

/// The values to prefill an expense form with.
#[derive(Debug, Default)]
pub(crate) struct ExpenseFormValues<'a> {
    pub title: &'a str,
    pub amount: &'a str,
    pub start_date: &'a str,
    pub end_date: &'a str,
}

/// The title, amount and month inputs shared by the add and edit forms.
pub(crate) fn expense_form_fields(values: &ExpenseFormValues) -> Markup {
    html! {
        div
        {
            label for="title" class=(FORM_LABEL_STYLE) { "Title" }

            input
                id="title"
                type="text"
                name="title"
                placeholder="Rent"
                value=(values.title)
                required
                class=(FORM_TEXT_INPUT_STYLE);
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "Monthly Amount" }

            div class="input-wrapper"
            {
                input
                    id="amount"
                    type="number"
                    name="amount"
                    step="0.01"
                    placeholder="0.00"
                    value=(values.amount)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div class="grid grid-cols-2 gap-4"
        {
            div
            {
                label for="start_date" class=(FORM_LABEL_STYLE) { "Start Month" }

                input
                    id="start_date"
                    type="month"
                    name="start_date"
                    value=(values.start_date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="end_date" class=(FORM_LABEL_STYLE) { "End Month" }

                input
                    id="end_date"
                    type="month"
                    name="end_date"
                    value=(values.end_date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

/// The form for adding an expense from the dashboard.
pub(crate) fn new_expense_form_view() -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_EXPENSE)
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            (expense_form_fields(&ExpenseFormValues::default()))

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
        }
    }
}


#[cfg(test)]
mod create_expense_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;

    use crate::{
        db::initialize,
        endpoints,
        expense::{ExpenseFormData, get_all_expenses},
        test_utils::{assert_hx_redirect, assert_valid_html, parse_html_fragment},
    };

    use super::{CreateExpenseEndpointState, create_expense_endpoint};

    fn get_test_state() -> CreateExpenseEndpointState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        initialize(&connection, 5000.0).expect("Could not initialize database");

        CreateExpenseEndpointState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    fn form(title: &str, amount: &str, start_date: &str, end_date: &str) -> ExpenseFormData {
        ExpenseFormData {
            title: title.to_owned(),
            amount: amount.to_owned(),
            start_date: start_date.to_owned(),
            end_date: end_date.to_owned(),
        }
    }

    #[tokio::test]
    async fn can_create_expense() {
        let state = get_test_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form("Rent", "1200", "2024-01", "2024-12")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let expenses = get_all_expenses(&state.db_connection.lock().unwrap()).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].title.as_ref(), "Rent");
        assert_eq!(expenses[0].amount, 1200.0);
    }

    #[tokio::test]
    async fn invalid_form_renders_alert() {
        let state = get_test_state();

        let response = create_expense_endpoint(
            State(state.clone()),
            Form(form("Rent", "1200", "2024-12", "2024-01")),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
        assert_eq!(
            get_all_expenses(&state.db_connection.lock().unwrap()),
            Ok(vec![])
        );
    }
}
