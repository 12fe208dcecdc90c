//! Clip regions that keep event text inside its block.

use super::element::{self, ClipPath, Rect, SvgElement};
use crate::dom::{Document, NodeId};
use crate::Result;

/// Hands out `clip-path-N` regions. The counter only ever grows.
#[derive(Debug, Default)]
pub struct ClipAllocator {
    last_id: u64,
}

impl ClipAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of regions allocated so far.
    pub fn allocated(&self) -> u64 {
        self.last_id
    }

    /// Create a `width` x `height` clip region under `catalog`.
    /// Returns the region id and its node.
    pub fn allocate(
        &mut self,
        doc: &mut Document,
        catalog: NodeId,
        width: f64,
        height: f64,
    ) -> Result<(String, NodeId)> {
        self.last_id += 1;
        let id = format!("clip-path-{}", self.last_id);

        let clip = element::create(doc, &SvgElement::ClipPath(ClipPath { id: id.clone() }));
        let rect = element::create(
            doc,
            &SvgElement::Rect(Rect {
                width,
                height,
                ..Default::default()
            }),
        );
        doc.append_child(clip, rect)?;
        doc.append_child(catalog, clip)?;
        Ok((id, clip))
    }
}
