//! The 500 page shown when a page handler cannot load the expenses.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::html::error_view;

/// What went wrong, as far as the visitor needs to know.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InternalServerError {
    /// Another request is holding, or has poisoned, the expense store.
    StoreUnavailable,
    /// Anything else. The details are in the server logs.
    #[default]
    Unexpected,
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        let (description, fix) = match self {
            InternalServerError::StoreUnavailable => (
                "The expense store is unavailable.",
                "Reload the page in a moment. If it keeps happening, restart the server.",
            ),
            InternalServerError::Unexpected => (
                "Sorry, something went wrong.",
                "Try again later or check the server logs.",
            ),
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_view("Internal Server Error", "500", description, fix),
        )
            .into_response()
    }
}
