//! Defines the app level error type and conversions to JSON errors, rendered HTML pages and alerts.
use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    alert::Alert, internal_server_error::InternalServerError, month::YearMonth,
    not_found::NotFoundError,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used as an expense title.
    #[error("Expense title cannot be empty")]
    EmptyTitle,

    /// An amount or income could not be parsed as a finite number.
    ///
    /// Holds the text that was submitted.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// A month was not in the `YYYY-MM` format.
    ///
    /// Holds the text that was submitted.
    #[error("\"{0}\" is not a valid month, expected the format YYYY-MM")]
    InvalidMonth(String),

    /// The start month of an expense is after its end month.
    #[error("the start month {start} is after the end month {end}")]
    InvalidDateRange {
        /// The submitted start month.
        start: YearMonth,
        /// The submitted end month.
        end: YearMonth,
    },

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update an expense that does not exist
    #[error("tried to update an expense that is not in the database")]
    UpdateMissingExpense,

    /// Tried to delete an expense that does not exist
    #[error("tried to delete an expense that is not in the database")]
    DeleteMissingExpense,

    /// The multipart form could not be parsed as a list of CSV files.
    #[error("Could not parse multipart form: {0}")]
    MultipartError(String),

    /// The multipart form did not contain a CSV file.
    #[error("File is not a CSV")]
    NotCSV,

    /// The CSV had issues that prevented it from being parsed.
    #[error("Could not parse the CSV file: {0}")]
    InvalidCSV(String),

    /// The expenses could not be written as CSV.
    #[error("Could not write the CSV file: {0}")]
    CsvExportError(String),

    /// A JSON request body was malformed or missing a field.
    #[error("Invalid request body: {0}")]
    InvalidJson(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A request or response body could not be read.
    #[error("could not read the message body")]
    BodyReadError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code that best describes the error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::EmptyTitle
            | Error::InvalidAmount(_)
            | Error::InvalidMonth(_)
            | Error::InvalidDateRange { .. }
            | Error::MultipartError(_)
            | Error::NotCSV
            | Error::InvalidCSV(_)
            | Error::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                StatusCode::NOT_FOUND
            }
            Error::CsvExportError(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::BodyReadError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let status_code = self.status_code();
        let alert = match self {
            Error::UpdateMissingExpense => Alert::Error {
                message: "Could not update expense".to_owned(),
                details: "The expense could not be found.".to_owned(),
            },
            Error::DeleteMissingExpense => Alert::Error {
                message: "Could not delete expense".to_owned(),
                details: "The expense could not be found. \
                    Try refreshing the page to see if the expense has already been deleted."
                    .to_owned(),
            },
            Error::NotCSV => Alert::ErrorSimple {
                message: "File type must be CSV.".to_owned(),
            },
            error if status_code == StatusCode::BAD_REQUEST => Alert::Error {
                message: "Invalid input".to_owned(),
                details: error.to_string(),
            },
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                }
            }
        };

        (status_code, alert.into_html()).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                NotFoundError.into_response()
            }
            Error::DatabaseLockError => InternalServerError::StoreUnavailable.into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::Unexpected.into_response()
            }
        }
    }
}

/// An [Error] returned from the JSON API.
///
/// Renders as `{ "error": "<message>" }` with the status code from [Error::status_code].
#[derive(Debug, PartialEq)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

/// A JSON request body whose rejections are rendered as [ApiError]s.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::InvalidJson(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.0.status_code();
        let message = match self.0 {
            Error::NotFound | Error::UpdateMissingExpense | Error::DeleteMissingExpense => {
                "Expense not found".to_owned()
            }
            error if status_code == StatusCode::BAD_REQUEST => error.to_string(),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                "An unexpected error occurred, check the server logs for more details.".to_owned()
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::test_utils::parse_json;

    use super::{ApiError, Error};

    #[tokio::test]
    async fn missing_expense_renders_original_error_payload() {
        let response = ApiError(Error::UpdateMissingExpense).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = parse_json(response).await;
        assert_eq!(body["error"], "Expense not found");
    }

    #[tokio::test]
    async fn validation_errors_are_bad_requests_with_message() {
        let response = ApiError(Error::InvalidAmount("abc".to_owned())).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = parse_json(response).await;
        assert_eq!(body["error"], "\"abc\" is not a valid amount");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = ApiError(Error::DatabaseLockError).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = parse_json(response).await;
        assert!(!body["error"].as_str().unwrap().contains("lock"));
    }

    #[test]
    fn no_rows_maps_to_not_found() {
        assert_eq!(
            Error::from(rusqlite::Error::QueryReturnedNoRows),
            Error::NotFound
        );
    }
}
