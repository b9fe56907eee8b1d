//! Application router configuration for the pages, htmx form handlers and JSON API.

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::{
    AppState,
    csv_export::export_expenses,
    csv_import::{import_expenses, preview_import},
    dashboard::{get_dashboard_page, get_summary_endpoint, get_viewport_endpoint},
    endpoints,
    expense::{
        create_expense_api_endpoint, create_expense_endpoint, delete_all_expenses_api_endpoint,
        delete_all_expenses_endpoint, delete_expense_api_endpoint, delete_expense_endpoint,
        get_edit_expense_page, list_expenses_endpoint, replace_expenses_api_endpoint,
        update_expense_api_endpoint, update_expense_endpoint,
    },
    income::{set_income_api_endpoint, update_income_endpoint},
    logging::logging_middleware,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(endpoints::EXPORT, get(export_expenses));

    let form_routes = Router::new()
        .route(
            endpoints::POST_EXPENSE,
            post(create_expense_endpoint).delete(delete_all_expenses_endpoint),
        )
        .route(
            endpoints::PUT_EXPENSE,
            put(update_expense_endpoint).delete(delete_expense_endpoint),
        )
        .route(endpoints::PUT_INCOME, put(update_income_endpoint))
        .route(endpoints::IMPORT, post(import_expenses))
        .route(endpoints::IMPORT_PREVIEW, post(preview_import));

    let api_routes = Router::new()
        .route(
            endpoints::EXPENSES_API,
            get(list_expenses_endpoint)
                .post(create_expense_api_endpoint)
                .put(replace_expenses_api_endpoint)
                .delete(delete_all_expenses_api_endpoint),
        )
        .route(
            endpoints::EXPENSE_API,
            put(update_expense_api_endpoint).delete(delete_expense_api_endpoint),
        )
        .route(endpoints::INCOME_API, put(set_income_api_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary_endpoint))
        .route(endpoints::VIEWPORT_API, get(get_viewport_endpoint));

    page_routes
        .merge(form_routes)
        .merge(api_routes)
        .fallback(get_404_not_found)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}
