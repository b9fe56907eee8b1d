//! The dashboard page: forms, the expense list and the timeline panels.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    alert::Alert,
    csv_import::import_form_view,
    dashboard::timeline::timeline_panels,
    endpoints,
    expense::{Expense, get_all_expenses, new_expense_form_view},
    html::{
        BUTTON_DELETE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, dollar_input_styles, format_currency,
    },
    income::{get_income, income_form_view},
    timeline::TimelineSummary,
};

const CARD_STYLE: &str = "w-full p-6 space-y-4 rounded-lg shadow bg-white dark:bg-gray-800";

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The outcome of a CSV import, passed along when redirecting back to the dashboard.
#[derive(Debug, Default, Deserialize)]
pub struct ImportResultQuery {
    pub imported: Option<usize>,
    pub skipped: Option<usize>,
}

/// Display the dashboard with every expense, the income and the timeline.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(import_result): Query<ImportResultQuery>,
) -> Result<Response, Error> {
    let (expenses, monthly_income) = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let expenses = get_all_expenses(&connection)
            .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?;
        let monthly_income = get_income(&connection)
            .inspect_err(|error| tracing::error!("could not get monthly income: {error}"))?;

        (expenses, monthly_income)
    };

    let summary = TimelineSummary::new(&expenses, monthly_income);

    Ok(dashboard_view(&summary, &expenses, &import_result).into_response())
}

fn dashboard_view(
    summary: &TimelineSummary,
    expenses: &[Expense],
    import_result: &ImportResultQuery,
) -> Markup {
    let mut head_elements = vec![dollar_input_styles()];

    let timeline = if summary.is_empty() {
        no_expenses_view()
    } else {
        let panels = timeline_panels(summary, expenses);
        head_elements.extend(panels.scripts);
        panels.content
    };

    let content = html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl space-y-6"
            {
                h1 class="text-2xl font-bold" { "Finance Tracker" }

                @if let Some(alert) = import_alert(import_result) {
                    (alert.into_html())
                }

                div class="grid grid-cols-1 lg:grid-cols-3 gap-6"
                {
                    div class=(CARD_STYLE)
                    {
                        h2 class="text-lg font-semibold" { "Add Expense" }
                        (new_expense_form_view())
                    }

                    div class=(CARD_STYLE)
                    {
                        h2 class="text-lg font-semibold" { "Income" }
                        (income_form_view(summary.monthly_income))
                    }

                    div class=(CARD_STYLE)
                    {
                        h2 class="text-lg font-semibold" { "Data" }
                        (import_form_view())

                        div class="flex items-center justify-between"
                        {
                            a href=(endpoints::EXPORT) download class=(LINK_STYLE) { "Download CSV" }

                            @if !expenses.is_empty() {
                                button
                                    hx-delete=(endpoints::DELETE_ALL_EXPENSES)
                                    hx-confirm="This will delete all expenses permanently. Continue?"
                                    hx-target-error="#alert-container"
                                    class=(BUTTON_DELETE_STYLE)
                                {
                                    "Clear All"
                                }
                            }
                        }
                    }
                }

                (expense_table(expenses))

                (timeline)
            }
        }
    };

    base("Dashboard", &head_elements, &content)
}

fn import_alert(import_result: &ImportResultQuery) -> Option<Alert> {
    let imported = import_result.imported?;
    let skipped = import_result.skipped.unwrap_or_default();

    let message = format!("Imported {imported} expenses");

    Some(if skipped == 0 {
        Alert::SuccessSimple { message }
    } else {
        Alert::Success {
            message,
            details: format!("Skipped {skipped} rows with missing or invalid fields."),
        }
    })
}

fn expense_table(expenses: &[Expense]) -> Markup {
    html! {
        section id="expenses" class="w-full"
        {
            h2 class="text-xl font-semibold mb-4" { "Expenses" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Monthly Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Start" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "End" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "" }
                        }
                    }

                    tbody
                    {
                        @for expense in expenses {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (expense.title) }
                                td class=(TABLE_CELL_STYLE) { (format_currency(expense.amount)) }
                                td class=(TABLE_CELL_STYLE) { (expense.start_date.label()) }
                                td class=(TABLE_CELL_STYLE) { (expense.end_date.label()) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    a
                                        href=(endpoints::format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id))
                                        class=(LINK_STYLE)
                                    {
                                        "Edit"
                                    }
                                }
                            }
                        }

                        @if expenses.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="5" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No expenses yet"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn no_expenses_view() -> Markup {
    html! {
        section id="timeline" class="w-full text-center space-y-2"
        {
            h2 class="text-xl font-bold" { "Nothing here yet..." }

            p
            {
                "The timeline and net income chart will show up here once you add an expense \
                or import a CSV file."
            }
        }
    }
}
