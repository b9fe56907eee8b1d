//! Per-month totals of the active expenses and the resulting net income.

use std::collections::BTreeMap;

use crate::{expense::Expense, month::YearMonth};

/// Sums the amounts of the expenses active in each of `months`.
///
/// # Returns
/// A map with an entry for every month in `months`, zero for months without an active expense.
pub fn monthly_totals(expenses: &[Expense], months: &[YearMonth]) -> BTreeMap<YearMonth, f64> {
    months
        .iter()
        .map(|&month| {
            let total = expenses
                .iter()
                .filter(|expense| expense.is_active_in(month))
                .map(|expense| expense.amount)
                .sum();

            (month, total)
        })
        .collect()
}

/// Subtracts each month's total from the monthly income.
pub fn net_income(
    monthly_income: f64,
    totals: &BTreeMap<YearMonth, f64>,
) -> BTreeMap<YearMonth, f64> {
    totals
        .iter()
        .map(|(&month, &total)| (month, monthly_income - total))
        .collect()
}
