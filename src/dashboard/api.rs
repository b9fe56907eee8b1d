//! JSON endpoints for the derived timeline data.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    error::ApiError,
    expense::{Expense, get_all_expenses},
    income::get_income,
    timeline::{TimelineSummary, Viewport, ViewportReport},
};

/// The state needed by the timeline JSON endpoints.
#[derive(Debug, Clone)]
pub struct TimelineApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TimelineApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The scroll geometry reported by the page.
///
/// The peer widths describe the other scroll panel so its offset can be kept in sync.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ViewportQuery {
    pub scroll_left: f64,
    pub client_width: f64,
    pub scroll_width: f64,
    pub peer_client_width: Option<f64>,
    pub peer_scroll_width: Option<f64>,
}

impl ViewportQuery {
    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_left: self.scroll_left,
            client_width: self.client_width,
            scroll_width: self.scroll_width,
        }
    }

    fn peer(&self) -> Option<(f64, f64)> {
        self.peer_client_width.zip(self.peer_scroll_width)
    }
}

fn load_snapshot(state: &TimelineApiState) -> Result<(Vec<Expense>, f64), Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok((get_all_expenses(&connection)?, get_income(&connection)?))
}

/// The month axis, per-month totals, net income and chart settings.
pub async fn get_summary_endpoint(
    State(state): State<TimelineApiState>,
) -> Result<Json<TimelineSummary>, ApiError> {
    let (expenses, monthly_income) = load_snapshot(&state)?;

    Ok(Json(TimelineSummary::new(&expenses, monthly_income)))
}

/// What the timeline panels should show at the reported scroll position.
pub async fn get_viewport_endpoint(
    State(state): State<TimelineApiState>,
    Query(query): Query<ViewportQuery>,
) -> Result<Json<ViewportReport>, ApiError> {
    let (expenses, monthly_income) = load_snapshot(&state)?;
    let summary = TimelineSummary::new(&expenses, monthly_income);

    Ok(Json(ViewportReport::new(
        &summary,
        &expenses,
        &query.viewport(),
        query.peer(),
    )))
}
