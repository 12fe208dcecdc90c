//! The render entry point handed to the host page.
//!
//! Two realizations share one interface: [`DirectRenderer`] builds the schedule
//! in the host document synchronously, [`DelegatedRenderer`] ships the events to
//! a compiled engine and injects the markup it returns.

use crate::delegated::DelegatedRenderer;
use crate::dom::{Document, NodeId, SharedDocument};
use crate::engine::EngineLoader;
use crate::model::Event;
use crate::resolver::{ColumnResolver, OverlapResolver};
use crate::schedule::Schedule;
use crate::{Error, Result, ScheduleConfig};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock_document(document: &SharedDocument) -> Result<MutexGuard<'_, Document>> {
    document
        .lock()
        .map_err(|_| Error::DocumentError("document lock poisoned".to_string()))
}

/// Builds the schedule straight into the shared document.
///
/// The schedule is created on the first call and reused by every later call,
/// so the grid is drawn exactly once.
pub struct DirectRenderer {
    document: SharedDocument,
    config: ScheduleConfig,
    resolver: Arc<dyn OverlapResolver>,
    schedule: Mutex<Option<Schedule>>,
}

impl DirectRenderer {
    pub fn new(
        document: SharedDocument,
        config: ScheduleConfig,
        resolver: Arc<dyn OverlapResolver>,
    ) -> Self {
        Self {
            document,
            config,
            resolver,
            schedule: Mutex::new(None),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// Whether the first render has already built the surface.
    pub fn is_ready(&self) -> bool {
        self.schedule.lock().map(|s| s.is_some()).unwrap_or(false)
    }

    /// Root `<svg>` node, once the surface exists.
    pub fn root(&self) -> Option<NodeId> {
        self.schedule
            .lock()
            .ok()
            .and_then(|s| s.as_ref().map(Schedule::root))
    }

    pub fn render_events(&self, events: &[Event], container: Option<NodeId>) -> Result<()> {
        let mut doc = lock_document(&self.document)?;
        let mut slot = self
            .schedule
            .lock()
            .map_err(|_| Error::Other("schedule lock poisoned".to_string()))?;

        let schedule = match slot.take() {
            Some(schedule) => schedule,
            None => {
                debug!("first render: building schedule surface");
                Schedule::new(&mut doc, &self.config)?
            }
        };
        let schedule = slot.insert(schedule);

        let container = container.unwrap_or_else(|| doc.body());
        schedule.render(&mut doc, events, self.resolver.as_ref(), container)
    }
}

/// `renderEvents(events, container?)` in either realization.
///
/// ```
/// use daygrid::{Document, Event, RenderEntry};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> daygrid::Result<()> {
/// let doc = Document::shared();
/// let entry = RenderEntry::direct(doc.clone());
/// entry.render_events(&[Event::new(0, 60).with_title("A")], None).await?;
/// # Ok(())
/// # }
/// ```
pub enum RenderEntry {
    Direct(DirectRenderer),
    Delegated(DelegatedRenderer),
}

impl RenderEntry {
    /// Direct construction with the fixed 600x720 canvas and the built-in resolver.
    pub fn direct(document: SharedDocument) -> Self {
        Self::direct_with(document, ScheduleConfig::default(), Arc::new(ColumnResolver))
    }

    pub fn direct_with(
        document: SharedDocument,
        config: ScheduleConfig,
        resolver: Arc<dyn OverlapResolver>,
    ) -> Self {
        RenderEntry::Direct(DirectRenderer::new(document, config, resolver))
    }

    /// Delegated construction; `loader` is invoked on the first render only.
    pub fn delegated(document: SharedDocument, loader: impl EngineLoader + 'static) -> Self {
        RenderEntry::Delegated(DelegatedRenderer::new(document, loader))
    }

    pub fn document(&self) -> &SharedDocument {
        match self {
            RenderEntry::Direct(r) => r.document(),
            RenderEntry::Delegated(r) => r.document(),
        }
    }

    /// Render `events` into `container`, or into the body when none is given.
    ///
    /// The direct variant finishes without suspending; the delegated one may
    /// wait for the engine to load on its first call.
    pub async fn render_events(&self, events: &[Event], container: Option<NodeId>) -> Result<()> {
        match self {
            RenderEntry::Direct(r) => r.render_events(events, container),
            RenderEntry::Delegated(r) => r.render_events(events, container).await,
        }
    }
}
