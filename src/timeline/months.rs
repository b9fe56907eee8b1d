//! Derives the month axis that every timeline view is drawn against.

use crate::{expense::Expense, month::YearMonth};

/// The number of empty months shown before the earliest start and after the latest end.
pub const PADDING_MONTHS: i32 = 6;

/// Builds the ordered, gap-free sequence of months spanning all `expenses`.
///
/// # Returns
/// Every month from the earliest start date minus [PADDING_MONTHS] through the latest
/// end date plus [PADDING_MONTHS], inclusive. Empty when there are no expenses.
pub fn build_timeline(expenses: &[Expense]) -> Vec<YearMonth> {
    let earliest_start = expenses.iter().map(|expense| expense.start_date).min();
    let latest_end = expenses.iter().map(|expense| expense.end_date).max();

    let (Some(earliest_start), Some(latest_end)) = (earliest_start, latest_end) else {
        return Vec::new();
    };

    let first = earliest_start.saturating_add_months(-PADDING_MONTHS);
    let last = latest_end.saturating_add_months(PADDING_MONTHS);

    let capacity = usize::try_from(first.months_until(last) + 1).unwrap_or_default();
    let mut months = Vec::with_capacity(capacity);
    let mut current = Some(first);

    while let Some(month) = current.filter(|month| *month <= last) {
        months.push(month);
        current = month.next();
    }

    months
}

#[cfg(test)]
mod tests {
    use crate::{
        expense::{Expense, ExpenseTitle},
        month::YearMonth,
    };

    use super::build_timeline;

    fn month(text: &str) -> YearMonth {
        text.parse().unwrap()
    }

    fn expense(id: i64, start: &str, end: &str) -> Expense {
        Expense {
            id,
            title: ExpenseTitle::new_unchecked("Test"),
            amount: 100.0,
            start_date: month(start),
            end_date: month(end),
        }
    }

    fn as_text(months: &[YearMonth]) -> Vec<String> {
        months.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn no_expenses_gives_empty_timeline() {
        assert!(build_timeline(&[]).is_empty());
    }

    #[test]
    fn pads_six_months_either_side() {
        let months = build_timeline(&[expense(1, "2024-01", "2024-12")]);

        assert_eq!(months.len(), 24);
        assert_eq!(months.first(), Some(&month("2023-07")));
        assert_eq!(months.last(), Some(&month("2025-06")));
    }

    #[test]
    fn single_month_expense_spans_thirteen_months() {
        let months = build_timeline(&[expense(1, "2024-03", "2024-03")]);

        assert_eq!(
            as_text(&months),
            vec![
                "2023-09", "2023-10", "2023-11", "2023-12", "2024-01", "2024-02", "2024-03",
                "2024-04", "2024-05", "2024-06", "2024-07", "2024-08", "2024-09",
            ]
        );
    }

    #[test]
    fn uses_earliest_start_and_latest_end_across_expenses() {
        let months = build_timeline(&[
            expense(1, "2024-05", "2024-06"),
            expense(2, "2023-11", "2024-01"),
            expense(3, "2024-02", "2025-03"),
        ]);

        assert_eq!(months.first(), Some(&month("2023-05")));
        assert_eq!(months.last(), Some(&month("2025-09")));
    }

    #[test]
    fn months_are_strictly_increasing_by_one() {
        let months = build_timeline(&[
            expense(1, "2022-10", "2023-02"),
            expense(2, "2023-12", "2024-01"),
        ]);

        for pair in months.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
        }
    }
}
