//! SVG drawing for the schedule surface.
//!
//! `surface` owns the persistent nodes, `grid` draws the static hour grid once,
//! `clip` hands out clip regions and `event` draws one event block per call.

pub mod clip;
pub mod element;
pub mod event;
pub mod grid;
pub mod surface;

pub use surface::ScheduleSurface;

/// Fill and stroke for event blocks.
pub const ACCENT_COLOR: &str = "#45a51c";
/// Stroke for grid lines.
pub const GRID_COLOR: &str = "#f8f8f8";
/// Fill for hour labels.
pub const LABEL_COLOR: &str = "#c9c9c9";

/// Inline style applied to the outer `<svg>`.
pub const SVG_STYLE: &str = "overflow: visible; font-family: Helvetica, Arial; font-size: 0.8em;";
