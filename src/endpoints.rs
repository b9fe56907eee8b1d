//! The endpoint URIs for pages, htmx form handlers and the JSON API.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}', use [format_endpoint].

/// The dashboard with the expense timeline and net income chart.
pub const DASHBOARD_VIEW: &str = "/";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";

/// The route to create an expense from the dashboard form.
pub const POST_EXPENSE: &str = "/expenses";
/// The route to update an expense from the edit form.
pub const PUT_EXPENSE: &str = "/expenses/{expense_id}";
/// The route to delete an expense from the edit form.
pub const DELETE_EXPENSE: &str = "/expenses/{expense_id}";
/// The route to delete every expense.
pub const DELETE_ALL_EXPENSES: &str = "/expenses";
/// The route to update the monthly income from the dashboard form.
pub const PUT_INCOME: &str = "/income";
/// The route to upload a CSV file that replaces all expenses.
pub const IMPORT: &str = "/import";
/// The route that counts the expenses in an uploaded CSV file without storing them.
pub const IMPORT_PREVIEW: &str = "/import/preview";
/// The route to download all expenses as a CSV file.
pub const EXPORT: &str = "/export";

/// The JSON route to list, create, replace or clear expenses.
pub const EXPENSES_API: &str = "/api/expenses";
/// The JSON route to update or delete a single expense.
pub const EXPENSE_API: &str = "/api/expenses/{expense_id}";
/// The JSON route to set the monthly income.
pub const INCOME_API: &str = "/api/income";
/// The JSON route for the month axis, totals and chart settings.
pub const SUMMARY_API: &str = "/api/summary";
/// The JSON route that evaluates the timeline view for a scroll position.
pub const VIEWPORT_API: &str = "/api/viewport";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace, e.g. '{expense_id}'.
/// Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |offset| param_start + offset + 1);

    format!(
        "{}{id}{}",
        &endpoint_path[..param_start],
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::EDIT_EXPENSE_VIEW);
        assert_endpoint_is_valid_uri(endpoints::POST_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::PUT_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::DELETE_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::DELETE_ALL_EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::PUT_INCOME);
        assert_endpoint_is_valid_uri(endpoints::IMPORT);
        assert_endpoint_is_valid_uri(endpoints::IMPORT_PREVIEW);
        assert_endpoint_is_valid_uri(endpoints::EXPORT);

        assert_endpoint_is_valid_uri(endpoints::EXPENSES_API);
        assert_endpoint_is_valid_uri(endpoints::EXPENSE_API);
        assert_endpoint_is_valid_uri(endpoints::INCOME_API);
        assert_endpoint_is_valid_uri(endpoints::SUMMARY_API);
        assert_endpoint_is_valid_uri(endpoints::VIEWPORT_API);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::EXPENSE_API, 7);

        assert_eq!(formatted_path, "/api/expenses/7");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(endpoints::EXPENSES_API, 1);

        assert_eq!(formatted_path, "/api/expenses");
    }

    #[test]
    fn parameter_in_middle() {
        let formatted_path = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, 12);

        assert_eq!(formatted_path, "/expenses/12/edit");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }
}
