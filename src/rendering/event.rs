//! Drawing a single event block.

use super::element::{self, Group, Length, Line, Paint, Rect, SvgElement, TSpan, Text, Transform};
use super::surface::ScheduleSurface;
use super::ACCENT_COLOR;
use crate::dom::{Document, NodeId};
use crate::model::{Event, LayoutSlot};
use crate::time;
use crate::{Error, Result};
use log::trace;

/// Pixel rectangle of an event block inside the event layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BlockGeometry {
    /// Position `event` in the column described by `slot`.
    pub fn compute(surface: &ScheduleSurface, event: &Event, slot: &LayoutSlot) -> Result<Self> {
        let width = surface.event_width / f64::from(slot.width_multiplier);
        let geometry = Self {
            x: f64::from(slot.offset) * width,
            y: surface.time.offset(event.starts_at),
            width,
            height: surface.time.height(event.duration),
        };
        if [geometry.x, geometry.y, geometry.width, geometry.height]
            .iter()
            .all(|v| v.is_finite())
        {
            Ok(geometry)
        } else {
            Err(Error::RenderError(format!(
                "event {} has non-finite geometry {:?} (width_multiplier {})",
                slot.id, geometry, slot.width_multiplier
            )))
        }
    }
}

/// Draw `event` into the surface's event layer.
///
/// Placeholders draw nothing and allocate no clip region; `Ok(None)` is returned.
/// Otherwise the new event group is returned.
pub fn render_event(
    doc: &mut Document,
    surface: &mut ScheduleSurface,
    event: &Event,
    slot: &LayoutSlot,
) -> Result<Option<NodeId>> {
    if event.placeholder {
        trace!("skipping placeholder event {}", slot.id);
        return Ok(None);
    }

    let BlockGeometry { x, y, width, height } = BlockGeometry::compute(surface, event, slot)?;
    let (clip_id, clip) = surface.clips.allocate(doc, surface.root, width, height)?;
    surface.live_clips.push(clip);

    let group = element::create(
        doc,
        &SvgElement::Group(Group {
            transform: Some(Transform::Translate(x, y)),
            clip_path: Some(clip_id),
            stroke: None,
        }),
    );

    let block = element::create(
        doc,
        &SvgElement::Rect(Rect {
            width,
            height,
            fill: Some(Paint::Color(ACCENT_COLOR)),
            opacity: Some(0.3),
        }),
    );
    doc.append_child(group, block)?;

    let accent = element::create(
        doc,
        &SvgElement::Line(Line {
            stroke_width: Some(4.0),
            stroke: Some(Paint::Color(ACCENT_COLOR)),
            y2: Some(height),
            ..Default::default()
        }),
    );
    doc.append_child(group, accent)?;

    let label = draw_label(doc, event, height)?;
    doc.append_child(group, label)?;

    doc.append_child(surface.events_layer, group)?;
    trace!("drew event {} at ({}, {}) {}x{}", slot.id, x, y, width, height);
    Ok(Some(group))
}

fn draw_label(doc: &mut Document, event: &Event, height: f64) -> Result<NodeId> {
    let text = element::create(
        doc,
        &SvgElement::Text(Text {
            transform: Some(Transform::Translate(10.0, height / 2.0)),
            fill: Some(Paint::Color(ACCENT_COLOR)),
            ..Default::default()
        }),
    );

    let heading = event.heading();
    if let Some(heading) = &heading {
        let span = element::create(
            doc,
            &SvgElement::TSpan(TSpan {
                style: Some("font-weight: bold;"),
                dy: Some(Length::Em(-0.1)),
                x: None,
            }),
        );
        append_text(doc, span, heading)?;
        doc.append_child(text, span)?;
    }

    // A lone time line is centred; under a heading it drops to the next line.
    let dy = if heading.is_some() { 0.9 } else { 0.35 };
    let span = element::create(
        doc,
        &SvgElement::TSpan(TSpan {
            style: None,
            dy: Some(Length::Em(dy)),
            x: Some(0.0),
        }),
    );
    append_text(doc, span, &time::time_range(event))?;
    doc.append_child(text, span)?;

    Ok(text)
}

fn append_text(doc: &mut Document, parent: NodeId, content: &str) -> Result<()> {
    let node = doc.create_text_node(content);
    doc.append_child(parent, node)
}
