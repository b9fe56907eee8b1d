//! The monthly income that expenses are subtracted from.

mod api;
mod db;
mod form;

pub use api::{IncomeApiState, IncomeRequest, IncomeResponse, set_income_api_endpoint};
pub use db::{DEFAULT_MONTHLY_INCOME, create_income_table, get_income, set_income};
pub(crate) use form::income_form_view;
pub use form::{IncomeFormData, UpdateIncomeEndpointState, update_income_endpoint};
