//! Static hour grid: one line and label per hour plus the two outer edges.

use super::element::{self, Group, Length, Line, Paint, SvgElement, Text, TextAnchor, Transform};
use super::{GRID_COLOR, LABEL_COLOR};
use crate::dom::{Document, NodeId};
use crate::time::{TimeModel, HOURS};
use crate::Result;

/// Draw the grid under `parent` and return the grid group.
///
/// Calling this twice on the same parent draws the grid twice; the schedule
/// controller only calls it while building a new surface.
pub fn draw_grid(
    doc: &mut Document,
    parent: NodeId,
    time: &TimeModel,
    width: f64,
    height: f64,
) -> Result<NodeId> {
    let grid = element::create(
        doc,
        &SvgElement::Group(Group {
            stroke: Some(Paint::Color(GRID_COLOR)),
            ..Default::default()
        }),
    );

    for (i, label) in HOURS.iter().enumerate() {
        let hour = draw_hour(doc, label, time.hour_offset(i), width)?;
        doc.append_child(grid, hour)?;
    }

    for x in [width, 0.0] {
        let edge = element::create(
            doc,
            &SvgElement::Line(Line {
                transform: Some(Transform::Translate(x, 0.0)),
                y2: Some(height),
                ..Default::default()
            }),
        );
        doc.append_child(grid, edge)?;
    }

    doc.append_child(parent, grid)?;
    Ok(grid)
}

fn draw_hour(doc: &mut Document, label: &str, offset: f64, width: f64) -> Result<NodeId> {
    let g = element::create(
        doc,
        &SvgElement::Group(Group {
            transform: Some(Transform::Translate(0.0, offset)),
            ..Default::default()
        }),
    );
    let line = element::create(
        doc,
        &SvgElement::Line(Line {
            x2: Some(width),
            ..Default::default()
        }),
    );
    let text = element::create(
        doc,
        &SvgElement::Text(Text {
            text_anchor: Some(TextAnchor::End),
            dy: Some(Length::Em(0.35)),
            x: Some(-10.0),
            fill: Some(Paint::Color(LABEL_COLOR)),
            stroke: Some(Paint::None),
            ..Default::default()
        }),
    );
    let content = doc.create_text_node(label);
    doc.append_child(text, content)?;
    doc.append_child(g, line)?;
    doc.append_child(g, text)?;
    Ok(g)
}
