//! The monthly timeline: the month axis, per-month totals and the views drawn from them.
//!
//! - [months] builds the padded month axis from the expenses.
//! - [aggregation] sums the active expenses and computes the net income per month.
//! - [bars], [viewport] and [charts] turn those numbers into timeline geometry and chart options.
//! - [summary] bundles all of the above for one snapshot of the store.

pub mod aggregation;
pub mod bars;
pub mod charts;
pub mod months;
pub mod summary;
pub mod viewport;

pub use aggregation::{monthly_totals, net_income};
pub use months::{PADDING_MONTHS, build_timeline};
pub use summary::{TimelineSummary, ViewportReport};
pub use viewport::Viewport;
