//! The dashboard's monthly income form and its endpoint.

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
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, endpoints,
    expense::parse_amount,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, format_amount},
    income::set_income,
};

/// The state needed for updating the monthly income.
#[derive(Debug, Clone)]
pub struct UpdateIncomeEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateIncomeEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct IncomeFormData {
    pub income: String,
}

/// Handle the income form submission.
pub async fn update_income_endpoint(
    State(state): State<UpdateIncomeEndpointState>,
    Form(form): Form<IncomeFormData>,
) -> Response {
    let monthly_income = match parse_amount(&form.income) {
        Ok(monthly_income) => monthly_income,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match set_income(monthly_income, &connection) {
        Ok(monthly_income) => {
            tracing::info!("Set monthly income to {monthly_income}");
            (
                HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while setting the income: {error}");
            error.into_alert_response()
        }
    }
}

pub(crate) fn income_form_view(monthly_income: f64) -> Markup {
    html! {
        form
            hx-put=(endpoints::PUT_INCOME)
            hx-target-error="#alert-container"
            class="w-full space-y-4"
        {
            div
            {
                label for="income" class=(FORM_LABEL_STYLE) { "Monthly Income" }

                div class="input-wrapper"
                {
                    input
                        id="income"
                        type="number"
                        name="income"
                        step="0.01"
                        value=(format_amount(monthly_income))
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Income" }
        }
    }
}
