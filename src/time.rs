//! Minute offsets to pixel coordinates and to human-readable labels.
//!
//! The day starts at 9 AM; every offset handled here is in minutes from that point.

use crate::model::Event;

/// Hour labels drawn on the grid, 9 AM through 9 PM.
pub const HOURS: [&str; 13] = [
    "9 AM", "10 AM", "11 AM", "12 PM", "1 PM", "2 PM", "3 PM", "4 PM", "5 PM", "6 PM", "7 PM",
    "8 PM", "9 PM",
];

const FIRST_HOUR: u64 = 9;

/// Vertical coordinate model for a canvas of a given height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeModel {
    pub canvas_height: f64,
    pub hour_height: f64,
}

impl TimeModel {
    pub fn new(canvas_height: f64) -> Self {
        Self {
            canvas_height,
            hour_height: canvas_height / (HOURS.len() - 1) as f64,
        }
    }

    /// Top edge of a block starting `starts_at` minutes into the day.
    pub fn offset(&self, starts_at: u32) -> f64 {
        self.hour_height / 60.0 * starts_at as f64
    }

    /// Height of a block lasting `duration` minutes.
    pub fn height(&self, duration: u32) -> f64 {
        self.hour_height / 60.0 * duration as f64
    }

    /// Position of the `index`-th grid line.
    pub fn hour_offset(&self, index: usize) -> f64 {
        index as f64 * self.hour_height
    }
}

/// Format a minute offset as a clock label, e.g. `0` -> "9 AM".
///
/// Minutes are not zero-padded: `65` renders as "10:5 AM".
pub fn format_interval(minutes: u64) -> String {
    let minute = minutes % 60;
    let hour = minutes / 60 + FIRST_HOUR;
    let period = if hour < 12 { "AM" } else { "PM" };
    let display_hour = if hour > 12 { hour - 12 } else { hour };

    if minute != 0 {
        format!("{}:{} {}", display_hour, minute, period)
    } else {
        format!("{} {}", display_hour, period)
    }
}

/// Label for an event's span, e.g. "9 AM – 10 AM".
pub fn time_range(event: &Event) -> String {
    format!(
        "{} – {}",
        format_interval(event.starts_at.into()),
        format_interval(event.ends_at())
    )
}
