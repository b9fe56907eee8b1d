//! Geometry of the horizontal expense bars drawn over the month axis.
//!
//! Horizontal positions are percentages of the full timeline width so the bars line up
//! with the month header cells regardless of how wide the scroll container is.

use crate::{expense::Expense, html::format_amount, month::YearMonth};

/// The height of the month header row, plus a 10px gap, in pixels.
pub const FIRST_ROW_TOP_PX: usize = 70;
/// The vertical distance between two bars in pixels.
pub const ROW_SPACING_PX: usize = 30;
/// The height of a bar in pixels.
pub const BAR_HEIGHT_PX: usize = 20;

/// Where and how to draw one expense on the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseBar {
    pub expense_id: i64,
    /// The text shown on the bar, e.g. "Rent ($1200/mo)".
    pub label: String,
    /// A CSS colour.
    pub color: String,
    /// The position of the expense in the expense list, which is also its row.
    pub row: usize,
    pub left_percent: f64,
    pub width_percent: f64,
}

impl ExpenseBar {
    pub fn right_percent(&self) -> f64 {
        self.left_percent + self.width_percent
    }

    pub fn top_px(&self) -> usize {
        FIRST_ROW_TOP_PX + self.row * ROW_SPACING_PX
    }
}

/// The size of the element that holds the month headers and the bars.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineLayout {
    pub content_height_px: usize,
    /// The width relative to the scroll container, never less than 100%.
    pub content_width_percent: f64,
}

/// Sizes the timeline so that twelve months fill the visible width.
pub fn timeline_layout(expense_count: usize, month_count: usize) -> TimelineLayout {
    TimelineLayout {
        content_height_px: expense_count * 35 + 100,
        content_width_percent: (month_count as f64 / 12.0 * 100.0).max(100.0),
    }
}

/// The colour of the bar in `row`.
///
/// Successive rows step the hue by 137.5 degrees so neighbouring bars are easy to tell apart.
pub fn bar_color(row: usize) -> String {
    let hue = (row as f64 * 137.5) % 360.0;

    format!("hsl({hue}, 65%, 55%)")
}

pub fn bar_label(expense: &Expense) -> String {
    format!("{} (${}/mo)", expense.title, format_amount(expense.amount))
}

/// Lays out a bar for each expense in `expenses` against `months`.
///
/// Expenses whose start is after their end, or whose months are not on the timeline, get no bar.
/// The remaining bars keep the row and colour of their position in `expenses`.
pub fn expense_bars(expenses: &[Expense], months: &[YearMonth]) -> Vec<ExpenseBar> {
    let month_count = months.len() as f64;

    expenses
        .iter()
        .enumerate()
        .filter_map(|(row, expense)| {
            let start_index = months.binary_search(&expense.start_date).ok()?;
            let end_index = months.binary_search(&expense.end_date).ok()?;

            if start_index > end_index {
                return None;
            }

            let duration = (end_index - start_index + 1) as f64;

            Some(ExpenseBar {
                expense_id: expense.id,
                label: bar_label(expense),
                color: bar_color(row),
                row,
                left_percent: start_index as f64 / month_count * 100.0,
                width_percent: duration / month_count * 100.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::{
        expense::{Expense, ExpenseTitle},
        timeline::build_timeline,
    };

    use super::{bar_color, expense_bars, timeline_layout};

    fn expense(id: i64, title: &str, amount: f64, start: &str, end: &str) -> Expense {
        Expense {
            id,
            title: ExpenseTitle::new_unchecked(title),
            amount,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
        }
    }

    #[test]
    fn bar_spans_its_months() {
        let expenses = [expense(1, "Rent", 1200.0, "2024-01", "2024-12")];
        let months = build_timeline(&expenses);

        let bars = expense_bars(&expenses, &months);

        assert_eq!(bars.len(), 1);
        // 24 months on the axis, starting 6 months before the expense.
        assert_eq!(bars[0].left_percent, 25.0);
        assert_eq!(bars[0].width_percent, 50.0);
        assert_eq!(bars[0].right_percent(), 75.0);
        assert_eq!(bars[0].label, "Rent ($1200/mo)");
        assert_eq!(bars[0].top_px(), 70);
    }

    #[test]
    fn rows_and_colours_follow_list_position() {
        let expenses = [
            expense(1, "Rent", 1200.0, "2024-01", "2024-12"),
            expense(2, "Gym", 45.5, "2024-03", "2024-06"),
            expense(3, "Phone", 30.0, "2024-02", "2024-02"),
        ];
        let months = build_timeline(&expenses);

        let bars = expense_bars(&expenses, &months);

        assert_eq!(
            bars.iter().map(|bar| bar.top_px()).collect::<Vec<_>>(),
            vec![70, 100, 130]
        );
        assert_eq!(bars[0].color, "hsl(0, 65%, 55%)");
        assert_eq!(bars[1].color, "hsl(137.5, 65%, 55%)");
        assert_eq!(bars[2].color, "hsl(275, 65%, 55%)");
        assert_eq!(bars[1].label, "Gym ($45.5/mo)");
    }

    #[test]
    fn hue_wraps_around() {
        assert_eq!(bar_color(3), "hsl(52.5, 65%, 55%)");
    }

    #[test]
    fn inverted_range_has_no_bar_but_keeps_later_rows() {
        let expenses = [
            expense(1, "Backwards", 10.0, "2024-06", "2024-02"),
            expense(2, "Rent", 1200.0, "2024-01", "2024-12"),
        ];
        let months = build_timeline(&expenses);

        let bars = expense_bars(&expenses, &months);

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].expense_id, 2);
        assert_eq!(bars[0].row, 1);
    }

    #[test]
    fn layout_fits_twelve_months_per_screen() {
        let layout = timeline_layout(2, 24);
        assert_eq!(layout.content_height_px, 170);
        assert_eq!(layout.content_width_percent, 200.0);

        assert_eq!(timeline_layout(1, 6).content_width_percent, 100.0);
    }
}
