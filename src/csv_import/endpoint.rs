use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State, multipart::Field},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    csv_import::parse::{ParsedExpenses, parse_expenses_csv},
    endpoints,
    expense::replace_all_expenses,
    html::{BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
};

/// The state needed for importing expenses.
#[derive(Debug, Clone)]
pub struct ImportState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ImportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Route handler for replacing every expense with the rows of uploaded CSV files.
///
/// On success the client is redirected to the dashboard with the number of imported and
/// skipped rows in the query string.
pub async fn import_expenses(
    State(state): State<ImportState>,
    multipart: Multipart,
) -> Response {
    let upload = match read_upload(multipart).await {
        Ok(upload) => upload,
        Err(error) => return error.into_alert_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let skipped = upload.parsed.skipped;
    match replace_all_expenses(upload.parsed.expenses, &connection) {
        Ok(imported) => {
            tracing::info!(
                "Imported {} expenses from {} file(s), skipped {skipped} rows",
                imported.len(),
                upload.file_count
            );
            let redirect = format!(
                "{}?imported={}&skipped={skipped}",
                endpoints::DASHBOARD_VIEW,
                imported.len()
            );

            (HxRedirect(redirect), StatusCode::SEE_OTHER).into_response()
        }
        Err(error) => {
            tracing::error!("Failed to import expenses: {error}");
            error.into_alert_response()
        }
    }
}

/// Route handler that reports how many expenses the chosen files would load.
///
/// Nothing is stored. The form still asks for confirmation before [import_expenses] runs.
pub async fn preview_import(multipart: Multipart) -> Response {
    match read_upload(multipart).await {
        Ok(upload) => import_preview_view(&upload.parsed).into_response(),
        Err(error) => error.into_alert_response(),
    }
}

struct Upload {
    parsed: ParsedExpenses,
    file_count: usize,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, Error> {
    let mut parsed = ParsedExpenses {
        expenses: Vec::new(),
        skipped: 0,
    };
    let mut file_count = 0;

    while let Some(field) = multipart.next_field().await.map_err(|error| {
        tracing::error!("Could not read multipart form: {error}");
        Error::MultipartError(error.body_text())
    })? {
        let csv_data = read_csv_field(field).await?;
        let file = parse_expenses_csv(&csv_data)
            .inspect_err(|error| tracing::debug!("Failed to parse CSV: {error}"))?;

        parsed.expenses.extend(file.expenses);
        parsed.skipped += file.skipped;
        file_count += 1;
    }

    if file_count == 0 {
        return Err(Error::MultipartError("no CSV file was uploaded".to_owned()));
    }

    Ok(Upload { parsed, file_count })
}

async fn read_csv_field(field: Field<'_>) -> Result<String, Error> {
    let is_csv = field.content_type() == Some("text/csv")
        || field
            .file_name()
            .is_some_and(|file_name| file_name.to_lowercase().ends_with(".csv"));

    if !is_csv {
        return Err(Error::NotCSV);
    }

    let file_name = field.file_name().unwrap_or("<unnamed>").to_owned();
    let data = field.text().await.map_err(|error| {
        tracing::error!("Could not read data from multipart form field: {error}");
        Error::MultipartError("could not read the uploaded file".to_owned())
    })?;

    tracing::debug!("Received file '{}' that is {} bytes", file_name, data.len());

    Ok(data)
}

fn import_preview_view(parsed: &ParsedExpenses) -> Markup {
    let count = parsed.expenses.len();

    html! {
        (count) " " (if count == 1 { "expense" } else { "expenses" }) " loaded"
        @if parsed.skipped > 0 {
            ", " (parsed.skipped) " rows skipped"
        }
        ". Press Import CSV to replace the current expenses."
    }
}

/// The upload form on the dashboard.
pub(crate) fn import_form_view() -> Markup {
    html! {
        form
            hx-post=(endpoints::IMPORT)
            enctype="multipart/form-data"
            hx-confirm="This will replace all current expenses with uploaded data. Continue?"
            hx-disabled-elt="#csv-file, #import-button"
            hx-target-error="#alert-container"
            class="space-y-4"
        {
            div
            {
                label for="csv-file" class=(FORM_LABEL_STYLE) { "Upload CSV" }

                input
                    id="csv-file"
                    type="file"
                    name="file"
                    accept=".csv,text/csv"
                    required
                    hx-post=(endpoints::IMPORT_PREVIEW)
                    hx-encoding="multipart/form-data"
                    hx-trigger="change"
                    hx-target="#import-preview"
                    hx-confirm="unset"
                    class=(FORM_TEXT_INPUT_STYLE);

                p id="import-preview" class="mt-1 text-sm font-medium" {}

                p class="mt-1 text-sm text-gray-500 dark:text-gray-400"
                {
                    "Columns: Title, Amount, Start Date, End Date. "
                    "Uploading replaces every current expense."
                }
            }

            button type="submit" id="import-button" class=(BUTTON_SECONDARY_STYLE)
            {
                "Import CSV"
            }
        }
    }
}
