use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    error::{ApiError, ApiJson},
    expense::NumericInput,
    income::set_income,
};

/// The state needed for setting the monthly income.
#[derive(Debug, Clone)]
pub struct IncomeApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for IncomeApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body for setting the monthly income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRequest {
    pub income: NumericInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeResponse {
    pub monthly_income: f64,
}

/// Replace the monthly income.
pub async fn set_income_api_endpoint(
    State(state): State<IncomeApiState>,
    ApiJson(request): ApiJson<IncomeRequest>,
) -> Result<Json<IncomeResponse>, ApiError> {
    let monthly_income = request.income.parse()?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let monthly_income = set_income(monthly_income, &connection)?;
    tracing::info!("Set monthly income to {monthly_income}");

    Ok(Json(IncomeResponse { monthly_income }))
}
