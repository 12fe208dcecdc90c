//! Contract for the compiled layout+rendering engine used by the delegated
//! entry point, plus a built-in engine implementing it.

use crate::dom::Document;
use crate::model::Event;
use crate::resolver::{ColumnResolver, OverlapResolver};
use crate::schedule::Schedule;
use crate::{Result, ScheduleConfig};

/// Turns a JSON-encoded event list into the complete schedule markup
/// (grid and events), ready to be injected into a container.
pub trait MarkupEngine {
    fn render_events(&self, events_json: &str) -> Result<String>;
}

/// Produces a [`MarkupEngine`]. Runs on the engine's worker thread, so the
/// engine itself does not need to be `Send`.
pub trait EngineLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn MarkupEngine>>;
}

impl<F> EngineLoader for F
where
    F: Fn() -> Result<Box<dyn MarkupEngine>> + Send + Sync,
{
    fn load(&self) -> Result<Box<dyn MarkupEngine>> {
        self()
    }
}

/// Engine that resolves overlaps and renders in-process.
///
/// Every call builds a fresh detached document, so the output is standalone
/// and clip region ids restart at 1.
pub struct StandaloneEngine {
    config: ScheduleConfig,
    resolver: Box<dyn OverlapResolver>,
}

impl Default for StandaloneEngine {
    fn default() -> Self {
        Self::new(ScheduleConfig::default())
    }
}

impl StandaloneEngine {
    pub fn new(config: ScheduleConfig) -> Self {
        Self {
            config,
            resolver: Box::new(ColumnResolver),
        }
    }

    pub fn with_resolver(mut self, resolver: impl OverlapResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Loader yielding a default-configured engine.
    pub fn loader() -> impl EngineLoader {
        || -> Result<Box<dyn MarkupEngine>> { Ok(Box::new(StandaloneEngine::default())) }
    }

    /// Render already-decoded events to markup.
    pub fn render(&self, events: &[Event]) -> Result<String> {
        let mut doc = Document::new();
        let mut schedule = Schedule::new(&mut doc, &self.config)?;
        let body = doc.body();
        schedule.render(&mut doc, events, self.resolver.as_ref(), body)?;
        doc.outer_markup(schedule.root())
    }
}

impl MarkupEngine for StandaloneEngine {
    fn render_events(&self, events_json: &str) -> Result<String> {
        let events: Vec<Event> = serde_json::from_str(events_json)?;
        self.render(&events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn renders_complete_svg_from_json() {
        let engine = StandaloneEngine::default();
        let svg = engine
            .render_events(r#"[{"starts_at":0,"duration":60,"title":"A"},{"starts_at":30,"duration":60,"title":"B"}]"#)
            .unwrap();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"600\" height=\"720\""));
        assert!(svg.contains(">9 PM</text>"));
        assert!(svg.contains("clip-path-2"));
        assert!(svg.contains("translate(290,30)"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn output_is_deterministic_per_call() {
        let engine = StandaloneEngine::default();
        let json = r#"[{"starts_at":10,"duration":20}]"#;
        assert_eq!(engine.render_events(json).unwrap(), engine.render_events(json).unwrap());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = StandaloneEngine::default().render_events("[{").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn loader_yields_engine() {
        let engine = StandaloneEngine::loader().load().unwrap();
        assert!(engine.render_events("[]").unwrap().contains("<g transform=\"translate(10,0)\"></g>"));
    }
}
