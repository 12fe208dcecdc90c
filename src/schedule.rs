//! Schedule controller: owns a surface and re-renders its event layer on demand.

use crate::dom::{Document, NodeId};
use crate::model::{Event, LayoutSlot};
use crate::rendering::event::render_event;
use crate::rendering::ScheduleSurface;
use crate::resolver::OverlapResolver;
use crate::{Error, Result, ScheduleConfig};
use log::debug;

/// Handle to one embedded schedule.
///
/// The grid is drawn once when the handle is created. Every call to
/// [`Schedule::render`] throws away the previous event blocks and draws the
/// new ones on the same surface.
///
/// ```
/// use daygrid::{ColumnResolver, Document, Event, Schedule, ScheduleConfig};
///
/// let mut doc = Document::new();
/// let mut schedule = Schedule::new(&mut doc, &ScheduleConfig::default()).unwrap();
/// let events = vec![Event::new(0, 60).with_title("Standup")];
/// let body = doc.body();
/// schedule.render(&mut doc, &events, &ColumnResolver, body).unwrap();
/// assert_eq!(doc.find_all(body, "clipPath").len(), 1);
/// ```
#[derive(Debug)]
pub struct Schedule {
    surface: ScheduleSurface,
}

impl Schedule {
    pub fn new(doc: &mut Document, config: &ScheduleConfig) -> Result<Self> {
        Ok(Self {
            surface: ScheduleSurface::build(doc, config)?,
        })
    }

    pub fn surface(&self) -> &ScheduleSurface {
        &self.surface
    }

    /// The `<svg>` root node of this schedule.
    pub fn root(&self) -> NodeId {
        self.surface.root()
    }

    /// Remove all event blocks; the grid is left untouched.
    pub fn clear_events(&mut self, doc: &mut Document) -> Result<()> {
        self.surface.clear_events(doc)
    }

    /// Clear, lay out `events` with `resolver`, draw them and attach the
    /// surface under `container`.
    pub fn render(
        &mut self,
        doc: &mut Document,
        events: &[Event],
        resolver: &dyn OverlapResolver,
        container: NodeId,
    ) -> Result<()> {
        self.clear_events(doc)?;
        let slots = resolver.calculate_positions(events);
        self.draw(doc, events, &slots, container)
    }

    /// Like [`Schedule::render`] with precomputed slots.
    pub fn render_slots(
        &mut self,
        doc: &mut Document,
        events: &[Event],
        slots: &[LayoutSlot],
        container: NodeId,
    ) -> Result<()> {
        self.clear_events(doc)?;
        self.draw(doc, events, slots, container)
    }

    fn draw(
        &mut self,
        doc: &mut Document,
        events: &[Event],
        slots: &[LayoutSlot],
        container: NodeId,
    ) -> Result<()> {
        check_correlation(events, slots)?;
        debug!("rendering {} events", events.len());

        let mut drawn = 0usize;
        for slot in slots {
            if render_event(doc, &mut self.surface, &events[slot.id], slot)?.is_some() {
                drawn += 1;
            }
        }

        doc.append_child(container, self.surface.root())?;
        debug!(
            "drew {} of {} events ({} clip regions allocated so far)",
            drawn,
            events.len(),
            self.surface.clip_regions_allocated()
        );
        Ok(())
    }
}

fn check_correlation(events: &[Event], slots: &[LayoutSlot]) -> Result<()> {
    if slots.len() != events.len() {
        return Err(Error::CorrelationError(format!(
            "resolver returned {} slots for {} events",
            slots.len(),
            events.len()
        )));
    }
    if let Some(slot) = slots.iter().find(|s| s.id >= events.len()) {
        return Err(Error::CorrelationError(format!(
            "slot references event {} but only {} events were supplied",
            slot.id,
            events.len()
        )));
    }
    Ok(())
}
