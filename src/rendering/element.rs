//! Typed SVG node descriptions and the factory that turns them into document nodes.
//!
//! Each node kind only exposes the attributes the schedule actually uses, so a
//! misspelt attribute is a compile error rather than a silently ignored string.

use crate::dom::{Document, NodeId, SVG_NS};
use std::fmt;

/// Format a coordinate the way SVG attributes expect it (`30`, `48.5`, `-10`).
pub fn num(v: f64) -> String {
    format!("{}", v)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transform {
    Translate(f64, f64),
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Translate(x, y) => write!(f, "translate({},{})", x, y),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    Number(f64),
    Em(f64),
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Length::Number(v) => write!(f, "{}", v),
            Length::Em(v) => write!(f, "{}em", v),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    None,
    Color(&'static str),
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::None => f.write_str("none"),
            Paint::Color(c) => f.write_str(c),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    End,
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextAnchor::End => "end",
        })
    }
}

/// Outer `<svg>` element.
#[derive(Debug, Clone, PartialEq)]
pub struct Svg {
    pub width: f64,
    pub height: f64,
    pub style: &'static str,
}

/// `<g>` grouping element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Group {
    pub transform: Option<Transform>,
    /// Id of the clip region applied to the group
    pub clip_path: Option<String>,
    pub stroke: Option<Paint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub transform: Option<Transform>,
    pub x2: Option<f64>,
    pub y2: Option<f64>,
    pub stroke: Option<Paint>,
    pub stroke_width: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
    pub fill: Option<Paint>,
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub transform: Option<Transform>,
    pub text_anchor: Option<TextAnchor>,
    pub dy: Option<Length>,
    pub x: Option<f64>,
    pub fill: Option<Paint>,
    pub stroke: Option<Paint>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TSpan {
    pub style: Option<&'static str>,
    pub dy: Option<Length>,
    pub x: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipPath {
    pub id: String,
}

/// Every node kind the schedule draws.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgElement {
    Svg(Svg),
    Group(Group),
    Line(Line),
    Rect(Rect),
    Text(Text),
    TSpan(TSpan),
    ClipPath(ClipPath),
}

fn push<T: ToString>(attrs: &mut Vec<(String, String)>, name: &str, value: Option<T>) {
    if let Some(v) = value {
        attrs.push((name.to_string(), v.to_string()));
    }
}

impl SvgElement {
    pub fn tag(&self) -> &'static str {
        match self {
            SvgElement::Svg(_) => "svg",
            SvgElement::Group(_) => "g",
            SvgElement::Line(_) => "line",
            SvgElement::Rect(_) => "rect",
            SvgElement::Text(_) => "text",
            SvgElement::TSpan(_) => "tspan",
            SvgElement::ClipPath(_) => "clipPath",
        }
    }

    /// Attribute list in emission order; unset optional attributes are skipped.
    pub fn attributes(&self) -> Vec<(String, String)> {
        let mut attrs = Vec::new();
        match self {
            SvgElement::Svg(s) => {
                push(&mut attrs, "width", Some(num(s.width)));
                push(&mut attrs, "height", Some(num(s.height)));
                push(&mut attrs, "viewBox", Some(format!("0 0 {} {}", s.width, s.height)));
                push(&mut attrs, "style", Some(s.style));
            }
            SvgElement::Group(g) => {
                push(&mut attrs, "transform", g.transform);
                push(&mut attrs, "clip-path", g.clip_path.as_ref().map(|id| format!("url(#{})", id)));
                push(&mut attrs, "stroke", g.stroke);
            }
            SvgElement::Line(l) => {
                push(&mut attrs, "transform", l.transform);
                push(&mut attrs, "x2", l.x2.map(num));
                push(&mut attrs, "y2", l.y2.map(num));
                push(&mut attrs, "stroke-width", l.stroke_width.map(num));
                push(&mut attrs, "stroke", l.stroke);
            }
            SvgElement::Rect(r) => {
                push(&mut attrs, "width", Some(num(r.width)));
                push(&mut attrs, "height", Some(num(r.height)));
                push(&mut attrs, "fill", r.fill);
                push(&mut attrs, "opacity", r.opacity.map(num));
            }
            SvgElement::Text(t) => {
                push(&mut attrs, "transform", t.transform);
                push(&mut attrs, "text-anchor", t.text_anchor);
                push(&mut attrs, "dy", t.dy);
                push(&mut attrs, "x", t.x.map(num));
                push(&mut attrs, "fill", t.fill);
                push(&mut attrs, "stroke", t.stroke);
            }
            SvgElement::TSpan(t) => {
                push(&mut attrs, "style", t.style);
                push(&mut attrs, "dy", t.dy);
                push(&mut attrs, "x", t.x.map(num));
            }
            SvgElement::ClipPath(c) => {
                push(&mut attrs, "id", Some(c.id.as_str()));
            }
        }
        attrs
    }
}

/// Create a detached SVG-namespaced node for `element`.
pub fn create(doc: &mut Document, element: &SvgElement) -> NodeId {
    doc.create_element_ns(Some(SVG_NS), element.tag(), element.attributes())
}
