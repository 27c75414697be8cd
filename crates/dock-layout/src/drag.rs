// ABOUTME: Interactive resizer drag session with live clamping.
// ABOUTME: Converts resizer positions to pane sizes and reports when a size limit is reached.

use dock_core::Edge;

use crate::geometry::ContainerDims;
use crate::pane::ResizerBounds;
use crate::surface::ElementId;

/// Which size limit a clamped drag is pressed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragLimit {
    #[default]
    None,
    Minimum,
    Maximum,
}

#[derive(Debug, Clone)]
pub struct DragSession {
    pub edge: Edge,
    pub bounds: ResizerBounds,
    /// Last clamped resizer position
    pub position: i32,
    pub limit: DragLimit,
    /// Resize panes on every move instead of only on release
    pub live: bool,
    pub masks: Vec<ElementId>,
}

impl DragSession {
    pub fn new(edge: Edge, bounds: ResizerBounds, start: i32, live: bool, masks: Vec<ElementId>) -> Self {
        Self {
            edge,
            bounds,
            position: start,
            limit: DragLimit::None,
            live,
            masks,
        }
    }

    /// Clamp a pointer position to the resizer bounds and remember it
    pub fn clamp(&mut self, position: i32) -> i32 {
        // resizer bounds for south/east run opposite to pane size
        let (below, above) = if self.edge.is_far_side() {
            (DragLimit::Maximum, DragLimit::Minimum)
        } else {
            (DragLimit::Minimum, DragLimit::Maximum)
        };
        let (clamped, limit) = if position < self.bounds.min {
            (self.bounds.min, below)
        } else if position > self.bounds.max {
            (self.bounds.max, above)
        } else {
            (position, DragLimit::None)
        };
        self.position = clamped;
        self.limit = limit;
        clamped
    }

    /// Pane size implied by the current resizer position
    pub fn pane_size(&self, container: &ContainerDims, spacing_open: i32) -> i32 {
        let inset = container.inset;
        match self.edge {
            Edge::North => self.position - inset.top,
            Edge::West => self.position - inset.left,
            Edge::South => inset.top + container.inner_height - self.position - spacing_open,
            Edge::East => inset.left + container.inner_width - self.position - spacing_open,
            Edge::Center => 0,
        }
    }
}
