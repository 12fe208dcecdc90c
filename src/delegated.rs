//! Delegated rendering: hand the event list to a compiled engine and inject
//! the markup it returns.
//!
//! The engine is loaded lazily on the first render and lives on a dedicated
//! worker thread for the rest of the renderer's lifetime. Async callers talk to
//! it over a channel, so the engine never has to be `Send`.

use crate::dom::{NodeId, SharedDocument};
use crate::engine::{EngineLoader, MarkupEngine};
use crate::model::Event;
use crate::{Error, Result};
use log::{debug, info, warn};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use tokio::sync::{oneshot, OnceCell};

enum Command {
    Render(String, oneshot::Sender<Result<String>>),
}

/// Handle to a loaded engine running on its worker thread.
///
/// Dropping every clone of the handle shuts the worker down.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: Sender<Command>,
}

impl EngineHandle {
    /// Spawn the worker thread and load the engine on it.
    pub async fn load(loader: Arc<dyn EngineLoader>) -> Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
        let (init_tx, init_rx) = oneshot::channel::<Result<()>>();

        thread::spawn(move || {
            let engine: Box<dyn MarkupEngine> = match loader.load() {
                Ok(e) => e,
                Err(err) => {
                    let _ = init_tx.send(Err(err));
                    return;
                }
            };
            let _ = init_tx.send(Ok(()));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    Command::Render(json, resp) => {
                        let _ = resp.send(engine.render_events(&json));
                    }
                }
            }
        });

        let init_res = init_rx
            .await
            .map_err(|e| Error::EngineLoadError(format!("Engine worker exited during load: {}", e)))?;
        init_res.map_err(|e| match e {
            Error::EngineLoadError(msg) => Error::EngineLoadError(msg),
            other => Error::EngineLoadError(other.to_string()),
        })?;

        Ok(Self { cmd_tx })
    }

    /// Ask the engine to render a JSON-encoded event list.
    pub async fn render(&self, events_json: String) -> Result<String> {
        let (tx, rx) = oneshot::channel();
        self.cmd_tx
            .send(Command::Render(events_json, tx))
            .map_err(|_| Error::EngineError("Engine worker is gone".to_string()))?;
        rx.await
            .map_err(|e| Error::EngineError(format!("Render canceled: {}", e)))?
    }
}

/// Entry point realization that delegates layout and rendering to an engine.
///
/// Only the most recently started call may write to the container: every call
/// takes a new generation number and its markup is dropped if a later call
/// has started by the time it resolves.
pub struct DelegatedRenderer {
    document: SharedDocument,
    loader: Arc<dyn EngineLoader>,
    engine: OnceCell<EngineHandle>,
    generation: AtomicU64,
    wrapper: Mutex<Option<NodeId>>,
}

impl DelegatedRenderer {
    pub fn new(document: SharedDocument, loader: impl EngineLoader + 'static) -> Self {
        Self {
            document,
            loader: Arc::new(loader),
            engine: OnceCell::new(),
            generation: AtomicU64::new(0),
            wrapper: Mutex::new(None),
        }
    }

    pub fn document(&self) -> &SharedDocument {
        &self.document
    }

    /// Whether the engine has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.engine.initialized()
    }

    /// Generation of the most recently started call.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// The `<div>` that receives injected markup, once created.
    pub fn wrapper(&self) -> Option<NodeId> {
        self.wrapper.lock().ok().and_then(|w| *w)
    }

    async fn engine(&self) -> Result<&EngineHandle> {
        self.engine
            .get_or_try_init(|| async {
                let handle = EngineHandle::load(self.loader.clone()).await;
                match &handle {
                    Ok(_) => info!("markup engine loaded"),
                    Err(e) => warn!("markup engine failed to load: {}", e),
                }
                handle
            })
            .await
    }

    // The wrapper is created in the first call's container and reused afterwards.
    fn ensure_wrapper(&self, container: Option<NodeId>) -> Result<NodeId> {
        let mut wrapper = self
            .wrapper
            .lock()
            .map_err(|_| Error::Other("wrapper lock poisoned".to_string()))?;
        if let Some(w) = *wrapper {
            return Ok(w);
        }
        let mut doc = self
            .document
            .lock()
            .map_err(|_| Error::DocumentError("document lock poisoned".to_string()))?;
        let container = container.unwrap_or_else(|| doc.body());
        let div = doc.create_element("div");
        doc.append_child(container, div)?;
        *wrapper = Some(div);
        Ok(div)
    }

    pub async fn render_events(&self, events: &[Event], container: Option<NodeId>) -> Result<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let wrapper = self.ensure_wrapper(container)?;
        let events_json = serde_json::to_string(events)?;
        debug!("delegated render #{} with {} events", generation, events.len());

        let markup = self.engine().await?.render(events_json).await?;

        let mut doc = self
            .document
            .lock()
            .map_err(|_| Error::DocumentError("document lock poisoned".to_string()))?;
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            warn!(
                "discarding delegated render #{}; render #{} started after it",
                generation, latest
            );
            return Ok(());
        }
        doc.set_inner_markup(wrapper, &markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use crate::engine::StandaloneEngine;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    struct Echo;

    impl MarkupEngine for Echo {
        fn render_events(&self, events_json: &str) -> Result<String> {
            Ok(format!("<svg>{}</svg>", events_json))
        }
    }

    #[tokio::test]
    async fn handle_renders_on_worker() {
        let loader: Arc<dyn EngineLoader> = Arc::new(|| -> Result<Box<dyn MarkupEngine>> { Ok(Box::new(Echo)) });
        let handle = EngineHandle::load(loader).await.unwrap();
        assert_eq!(handle.render("[]".to_string()).await.unwrap(), "<svg>[]</svg>");
    }

    #[tokio::test]
    async fn load_failure_surfaces_as_engine_load_error() {
        let loader: Arc<dyn EngineLoader> = Arc::new(|| -> Result<Box<dyn MarkupEngine>> {
            Err(Error::Other("missing module".to_string()))
        });
        let err = EngineHandle::load(loader).await.err().unwrap();
        assert!(matches!(err, Error::EngineLoadError(ref m) if m.contains("missing module")));
    }

    #[tokio::test]
    async fn engine_is_loaded_once() {
        let loads = Arc::new(AtomicUsize::new(0));
        let counter = loads.clone();
        let renderer = DelegatedRenderer::new(Document::shared(), move || -> Result<Box<dyn MarkupEngine>> {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(Echo))
        });

        assert!(!renderer.is_loaded());
        renderer.render_events(&[Event::new(0, 10)], None).await.unwrap();
        renderer.render_events(&[Event::new(0, 20)], None).await.unwrap();
        assert!(renderer.is_loaded());
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(renderer.generation(), 2);
    }

    #[tokio::test]
    async fn markup_is_injected_into_wrapper() {
        let doc = Document::shared();
        let renderer = DelegatedRenderer::new(doc.clone(), StandaloneEngine::loader());
        renderer
            .render_events(&[Event::new(0, 60).with_title("A")], None)
            .await
            .unwrap();

        let doc = doc.lock().unwrap();
        let wrapper = renderer.wrapper().unwrap();
        assert_eq!(doc.parent(wrapper), Some(doc.body()));
        let html = doc.inner_markup(wrapper).unwrap();
        assert!(html.starts_with("<svg"));
        assert!(html.contains(">A</tspan>"));
    }

    #[tokio::test]
    async fn concurrent_calls_keep_the_latest() {
        let doc = Document::shared();
        let renderer = DelegatedRenderer::new(doc.clone(), || -> Result<Box<dyn MarkupEngine>> {
            std::thread::sleep(Duration::from_millis(50));
            Ok(Box::new(Echo))
        });

        let first = [Event::new(0, 10).with_title("first")];
        let second = [Event::new(0, 10).with_title("second")];
        let (a, b) = tokio::join!(
            renderer.render_events(&first, None),
            renderer.render_events(&second, None)
        );
        a.unwrap();
        b.unwrap();

        let doc = doc.lock().unwrap();
        let html = doc.inner_markup(renderer.wrapper().unwrap()).unwrap();
        assert!(html.contains("second"));
        assert!(!html.contains("first"));
    }
}
