use anyhow::Context;
use clap::{Parser, ValueEnum};
use daygrid::{Document, Event, RenderEntry, StandaloneEngine};
use flexi_logger::Logger;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Build the schedule directly in the document
    Direct,
    /// Hand the events to the markup engine and inject its output
    Delegated,
}

/// Render a day's events (JSON array) as an SVG schedule.
#[derive(Debug, Parser)]
#[command(name = "daygrid", version)]
struct Cli {
    /// Events JSON file; reads stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Where to write the markup; stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Backend::Direct)]
    backend: Backend,

    /// Log specification, e.g. `debug` or `daygrid=trace`
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn read_events(input: Option<&PathBuf>) -> anyhow::Result<Vec<Event>> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(&raw).context("events must be a JSON array of event objects")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _logger = Logger::try_with_env_or_str(&cli.log_level)?.start()?;

    let events = read_events(cli.input.as_ref())?;
    let doc = Document::shared();
    let entry = match cli.backend {
        Backend::Direct => RenderEntry::direct(doc.clone()),
        Backend::Delegated => RenderEntry::delegated(doc.clone(), StandaloneEngine::loader()),
    };
    entry.render_events(&events, None).await?;

    let markup = {
        let doc = doc
            .lock()
            .map_err(|_| anyhow::anyhow!("document lock poisoned"))?;
        doc.inner_markup(doc.body())?
    };

    match cli.output {
        Some(path) => std::fs::write(&path, markup)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut out = io::stdout().lock();
            writeln!(out, "{}", markup)?;
        }
    }
    Ok(())
}
