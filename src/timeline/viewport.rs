//! Scroll position driven views of the timeline.
//!
//! The page reports the geometry of its scroll containers and these functions decide
//! which months are in view, which bar labels to show and where to scroll the other panel.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::timeline::bars::ExpenseBar;

/// The number of months that fit in the visible width of a panel.
pub const VISIBLE_MONTHS: usize = 12;

/// The width used when the client could not measure its container.
const FALLBACK_WIDTH: f64 = 1000.0;

/// The scroll geometry of a horizontally scrolling panel, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// How far the panel is scrolled from its left edge.
    pub scroll_left: f64,
    /// The visible width of the panel.
    pub client_width: f64,
    /// The width of the panel's content.
    pub scroll_width: f64,
}

impl Viewport {
    fn client_width(&self) -> f64 {
        if self.client_width > 0.0 {
            self.client_width
        } else {
            FALLBACK_WIDTH
        }
    }

    fn total_width(&self) -> f64 {
        if self.scroll_width > 0.0 {
            self.scroll_width
        } else {
            self.client_width()
        }
    }

    /// The scroll offset as a percentage of the content width.
    pub fn scroll_percent(&self) -> f64 {
        self.scroll_left.max(0.0) / self.total_width() * 100.0
    }

    /// The visible width as a percentage of the content width.
    pub fn viewport_percent(&self) -> f64 {
        self.client_width() / self.total_width() * 100.0
    }

    /// How far through its scrollable range the panel is, from 0 to 1.
    ///
    /// A panel with nothing to scroll is always at 0.
    pub fn scroll_ratio(&self) -> f64 {
        let scrollable = self.scroll_width - self.client_width;

        if scrollable <= 0.0 {
            0.0
        } else {
            (self.scroll_left / scrollable).clamp(0.0, 1.0)
        }
    }

    /// The indices of the [VISIBLE_MONTHS] months in view on a timeline of `month_count` months.
    pub fn visible_window(&self, month_count: usize) -> Range<usize> {
        let max_start = month_count.saturating_sub(VISIBLE_MONTHS);
        let start = (self.scroll_ratio() * max_start as f64).round() as usize;
        let start = start.min(max_start);

        start..(start + VISIBLE_MONTHS).min(month_count)
    }

    /// Whether any part of `bar` is in view, in which case its label is shown.
    pub fn is_bar_visible(&self, bar: &ExpenseBar) -> bool {
        let scroll_percent = self.scroll_percent();

        bar.right_percent() > scroll_percent
            && bar.left_percent < scroll_percent + self.viewport_percent()
    }

    /// Where to place the label inside `bar`, as a percentage of the bar's width, so that
    /// it stays at the left edge of the view while the bar's start is scrolled out of view.
    pub fn sticky_label_offset(&self, bar: &ExpenseBar) -> f64 {
        if bar.width_percent <= 0.0 {
            return 0.0;
        }

        ((self.scroll_percent() - bar.left_percent) / bar.width_percent * 100.0).max(0.0)
    }

    /// The index of the month under the left edge of the view, or `None` for an empty timeline.
    pub fn month_at_left_edge(&self, month_count: usize) -> Option<usize> {
        if month_count == 0 {
            return None;
        }

        let index = (self.scroll_percent() / 100.0 * month_count as f64).floor() as usize;

        Some(index.min(month_count - 1))
    }

    /// The scroll offset that puts a panel with the given widths at the same
    /// relative position as this one.
    pub fn synced_scroll_left(&self, peer_client_width: f64, peer_scroll_width: f64) -> f64 {
        let peer_scrollable = (peer_scroll_width - peer_client_width).max(0.0);

        self.scroll_ratio() * peer_scrollable
    }
}
