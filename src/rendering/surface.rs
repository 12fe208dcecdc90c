//! Persistent drawing state for one embedded schedule.

use super::clip::ClipAllocator;
use super::element::{self, Group, Svg, SvgElement, Transform};
use super::grid;
use super::SVG_STYLE;
use crate::dom::{Document, NodeId};
use crate::time::TimeModel;
use crate::{Result, ScheduleConfig};
use log::debug;

/// The `<svg>` root, its static grid and the event layer that gets rebuilt on
/// every render. Clip regions are appended straight to the root.
#[derive(Debug)]
pub struct ScheduleSurface {
    pub(crate) root: NodeId,
    pub(crate) grid: NodeId,
    pub(crate) events_layer: NodeId,
    pub(crate) time: TimeModel,
    /// Usable width for event blocks, i.e. canvas width minus both paddings
    pub(crate) event_width: f64,
    pub(crate) clips: ClipAllocator,
    /// Clip regions drawn since the last clear
    pub(crate) live_clips: Vec<NodeId>,
    prune_clip_regions: bool,
}

impl ScheduleSurface {
    /// Build the root, draw the grid and add an empty event layer.
    pub fn build(doc: &mut Document, config: &ScheduleConfig) -> Result<Self> {
        let width = f64::from(config.width);
        let height = f64::from(config.height);
        let padding = f64::from(config.padding);
        let time = TimeModel::new(height);

        let root = element::create(
            doc,
            &SvgElement::Svg(Svg {
                width,
                height,
                style: SVG_STYLE,
            }),
        );
        let grid = grid::draw_grid(doc, root, &time, width, height)?;
        let events_layer = element::create(
            doc,
            &SvgElement::Group(Group {
                transform: Some(Transform::Translate(padding, 0.0)),
                ..Default::default()
            }),
        );
        doc.append_child(root, events_layer)?;

        debug!("built {}x{} schedule surface", config.width, config.height);
        Ok(Self {
            root,
            grid,
            events_layer,
            time,
            event_width: width - padding * 2.0,
            clips: ClipAllocator::new(),
            live_clips: Vec::new(),
            prune_clip_regions: config.prune_clip_regions,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn grid(&self) -> NodeId {
        self.grid
    }

    pub fn events_layer(&self) -> NodeId {
        self.events_layer
    }

    pub fn time(&self) -> &TimeModel {
        &self.time
    }

    pub fn event_width(&self) -> f64 {
        self.event_width
    }

    /// Clip regions allocated over the lifetime of this surface.
    pub fn clip_regions_allocated(&self) -> u64 {
        self.clips.allocated()
    }

    /// Drop every event block, leaving the grid alone. Clip regions from the
    /// previous render are only removed when pruning is enabled.
    pub fn clear_events(&mut self, doc: &mut Document) -> Result<()> {
        let removed = doc.clear_children(self.events_layer)?;
        let live = std::mem::take(&mut self.live_clips);
        if self.prune_clip_regions {
            for clip in &live {
                doc.discard_child(self.root, *clip)?;
            }
        }
        debug!(
            "cleared {} event blocks ({} clip regions {})",
            removed,
            live.len(),
            if self.prune_clip_regions { "pruned" } else { "kept" }
        );
        Ok(())
    }
}
