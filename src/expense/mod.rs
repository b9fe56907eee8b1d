//! Recurring monthly expenses: storage, validation and the pages and endpoints that change them.

mod api;
mod create;
mod db;
mod delete;
mod domain;
mod edit;

pub use api::{
    ExpenseApiState, ExpenseList, create_expense_api_endpoint, delete_all_expenses_api_endpoint,
    delete_expense_api_endpoint, list_expenses_endpoint, replace_expenses_api_endpoint,
    update_expense_api_endpoint,
};
pub use create::create_expense_endpoint;
pub(crate) use create::new_expense_form_view;
pub use db::{
    create_expense, create_expense_table, delete_all_expenses, delete_expense, get_all_expenses,
    get_expense, replace_all_expenses, update_expense,
};
pub use delete::{delete_all_expenses_endpoint, delete_expense_endpoint};
pub use domain::{
    Expense, ExpenseFormData, ExpenseId, ExpenseRequest, ExpenseTitle, NewExpense, NumericInput,
    parse_amount,
};
pub use edit::{get_edit_expense_page, update_expense_endpoint};
