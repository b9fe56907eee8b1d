//! Everything derived from one snapshot of the expenses and income.
//!
//! Summaries are rebuilt for every request and never updated in place.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    expense::{Expense, ExpenseId},
    month::YearMonth,
    timeline::{
        aggregation::{monthly_totals, net_income},
        bars::{ExpenseBar, expense_bars},
        charts::{YAxisBounds, net_income_line_color, y_axis_bounds},
        months::build_timeline,
        viewport::Viewport,
    },
};

/// The badge colour for a negative net income.
pub const BADGE_NEGATIVE_COLOR: &str = "#ef4444";
/// The badge colour for a net income of zero or more.
pub const BADGE_POSITIVE_COLOR: &str = "#16a34a";

/// The totals for one month on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: YearMonth,
    /// The chart label, e.g. "Jan 24".
    pub label: String,
    pub total: f64,
    pub net_income: f64,
}

/// The month axis, per-month totals and net income chart settings for a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineSummary {
    pub monthly_income: f64,
    pub months: Vec<MonthSummary>,
    pub line_color: &'static str,
    pub y_axis_bounds: Option<YAxisBounds>,
}

impl TimelineSummary {
    pub fn new(expenses: &[Expense], monthly_income: f64) -> Self {
        let timeline = build_timeline(expenses);
        let totals = monthly_totals(expenses, &timeline);
        let net_income = net_income(monthly_income, &totals);

        let months = timeline
            .iter()
            .map(|month| MonthSummary {
                month: *month,
                label: month.label(),
                total: totals.get(month).copied().unwrap_or_default(),
                net_income: net_income.get(month).copied().unwrap_or(monthly_income),
            })
            .collect();

        Self {
            monthly_income,
            months,
            line_color: net_income_line_color(&net_income),
            y_axis_bounds: y_axis_bounds(&net_income),
        }
    }

    pub fn timeline(&self) -> Vec<YearMonth> {
        self.months.iter().map(|summary| summary.month).collect()
    }

    pub fn net_income_by_month(&self) -> BTreeMap<YearMonth, f64> {
        self.months
            .iter()
            .map(|summary| (summary.month, summary.net_income))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }
}

/// A bar label that is in view and where to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleLabel {
    pub expense_id: ExpenseId,
    pub label: String,
    /// The label's offset from the start of its bar, as a percentage of the bar's width.
    pub offset_percent: f64,
}

/// The net income of the month under the left edge of the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetIncomeBadge {
    pub month: YearMonth,
    pub label: String,
    pub net_income: f64,
    pub color: &'static str,
}

/// What the timeline panels should show for a scroll position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportReport {
    /// Index of the first month in view.
    pub window_start: usize,
    /// Index one past the last month in view.
    pub window_end: usize,
    pub visible_months: Vec<YearMonth>,
    pub visible_labels: Vec<VisibleLabel>,
    pub badge: Option<NetIncomeBadge>,
    /// The scroll offset for the other panel, when its size was given.
    pub peer_scroll_left: Option<f64>,
}

impl ViewportReport {
    /// Evaluates the view of `summary` and the bars of `expenses` at `viewport`.
    ///
    /// `peer` is the client and scroll width of the panel to keep in sync.
    pub fn new(
        summary: &TimelineSummary,
        expenses: &[Expense],
        viewport: &Viewport,
        peer: Option<(f64, f64)>,
    ) -> Self {
        let timeline = summary.timeline();
        let window = viewport.visible_window(timeline.len());
        let bars = expense_bars(expenses, &timeline);

        let visible_labels = bars
            .iter()
            .filter(|bar| viewport.is_bar_visible(bar))
            .map(|bar: &ExpenseBar| VisibleLabel {
                expense_id: bar.expense_id,
                label: bar.label.clone(),
                offset_percent: viewport.sticky_label_offset(bar),
            })
            .collect();

        let badge = viewport
            .month_at_left_edge(timeline.len())
            .and_then(|index| summary.months.get(index))
            .map(net_income_badge);

        Self {
            window_start: window.start,
            window_end: window.end,
            visible_months: timeline[window].to_vec(),
            visible_labels,
            badge,
            peer_scroll_left: peer.map(|(client_width, scroll_width)| {
                viewport.synced_scroll_left(client_width, scroll_width)
            }),
        }
    }
}

pub fn net_income_badge(month: &MonthSummary) -> NetIncomeBadge {
    NetIncomeBadge {
        month: month.month,
        label: month.label.clone(),
        net_income: month.net_income,
        color: if month.net_income < 0.0 {
            BADGE_NEGATIVE_COLOR
        } else {
            BADGE_POSITIVE_COLOR
        },
    }
}
