//! Replacing every expense with the rows of an uploaded CSV file.

mod endpoint;
mod parse;

pub use endpoint::{ImportState, import_expenses, preview_import};
pub(crate) use endpoint::import_form_view;
pub use parse::{ParsedExpenses, parse_expenses_csv};
