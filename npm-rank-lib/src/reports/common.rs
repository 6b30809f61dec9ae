//! Common utilities shared across report generators.

use crate::ranking::{Window, WindowStat};

/// Format a download count with thousands separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Format a change in downloads with an explicit sign.
pub fn format_delta(delta: i64) -> String {
    match delta {
        0 => "0".to_string(),
        d if d > 0 => format!("+{}", format_count(d.unsigned_abs())),
        d => format!("-{}", format_count(d.unsigned_abs())),
    }
}

/// Format a percentage change with an explicit sign and two decimals.
pub fn format_percent(percent: f64) -> String {
    if percent > 0.0 {
        format!("+{percent:.2}%")
    } else {
        format!("{percent:.2}%")
    }
}

/// Whether a window carries a comparison against a preceding window.
///
/// Only the last month of downloads is fetched, so the month window has nothing to compare with.
pub const fn has_baseline(window: Window) -> bool {
    !matches!(window, Window::Month)
}

/// Column heading for a window.
pub const fn window_heading(window: Window) -> &'static str {
    match window {
        Window::Day => "Last Day",
        Window::Week => "Last Week",
        Window::Month => "Last Month",
    }
}

/// Direction of a change, for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl From<&WindowStat> for Trend {
    fn from(stat: &WindowStat) -> Self {
        if stat.increased {
            Self::Up
        } else if stat.decreased {
            Self::Down
        } else {
            Self::Flat
        }
    }
}
