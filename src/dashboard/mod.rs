//! The dashboard page and the JSON endpoints behind its timeline.

mod api;
mod page;
mod timeline;

pub use api::{TimelineApiState, ViewportQuery, get_summary_endpoint, get_viewport_endpoint};
pub use page::{DashboardState, ImportResultQuery, get_dashboard_page};
pub use timeline::NET_INCOME_CHART_ID;
