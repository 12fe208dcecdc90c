//! daygrid
//!
//! Renders a single day's schedule as SVG: a fixed 9 AM to 9 PM hour grid with
//! event blocks positioned by start time and duration. Overlapping events are
//! placed side by side in columns computed by an [`OverlapResolver`].
//!
//! # Features
//!
//! - **Persistent surface**: the grid is drawn once per [`Schedule`]; every
//!   render only rebuilds the event layer
//! - **Clipped labels**: each event gets its own clip region so long titles
//!   never spill out of their block
//! - **Two backends**: build into a host [`Document`] directly, or delegate to a
//!   [`MarkupEngine`] that returns finished markup ([`RenderEntry`])
//!
//! # Example
//!
//! ```
//! use daygrid::{ColumnResolver, Document, Event, Schedule, ScheduleConfig};
//!
//! # fn main() -> daygrid::Result<()> {
//! let mut doc = Document::new();
//! let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default())?;
//!
//! let events = vec![
//!     Event::new(0, 60).with_title("A"),
//!     Event::new(30, 60).with_title("B"),
//! ];
//! let body = doc.body();
//! schedule.render(&mut doc, &events, &ColumnResolver, body)?;
//!
//! let svg = doc.inner_markup(body)?;
//! assert!(svg.contains("translate(290,30)"));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod dom;
pub mod model;
pub mod rendering;
pub mod resolver;
pub mod schedule;
pub mod time;

// Delegated backend: engine contract plus the async worker-backed renderer
pub mod delegated;
pub mod engine;

pub mod entry;

pub use dom::{Document, NodeId, SharedDocument};
pub use engine::{EngineLoader, MarkupEngine, StandaloneEngine};
pub use entry::{DirectRenderer, RenderEntry};
pub use delegated::DelegatedRenderer;
pub use model::{Event, LayoutSlot};
pub use resolver::{ColumnResolver, OverlapResolver};
pub use schedule::Schedule;

/// Geometry of a schedule surface
///
/// The defaults are the fixed 600x720 canvas with 10 units of horizontal
/// padding that the render entry point uses.
///
/// # Examples
///
/// ```
/// let cfg = daygrid::ScheduleConfig::default();
/// assert_eq!((cfg.width, cfg.height, cfg.padding), (600, 720, 10));
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleConfig {
    /// Canvas width in user units
    pub width: u32,
    /// Canvas height in user units; split into 12 hour rows
    pub height: u32,
    /// Horizontal padding on each side of the event area
    pub padding: u32,
    /// Remove the previous render's clip regions when the event layer is cleared
    pub prune_clip_regions: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            width: 600,
            height: 720,
            padding: 10,
            prune_clip_regions: false,
        }
    }
}
