// ABOUTME: Per-pane runtime state and the status derived from its flags.
// ABOUTME: Owned by the layout; everything else reads it.

use dock_core::{Edge, PaneConfig};

use crate::geometry::Rect;
use crate::surface::ElementId;

/// Absolute pixel range a pane's resizer bar may be dragged within
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResizerBounds {
    pub min: i32,
    pub max: i32,
}

/// State-machine view of a pane's flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneStatus {
    Open,
    Closed,
    Hidden,
    Sliding,
    /// Center pane with room to display
    Visible,
    /// Center pane hidden for lack of room
    NoRoom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaneState {
    /// Edge the pane sits at (or is about to move to during a swap)
    pub edge: Edge,
    pub element: ElementId,
    /// Outer size along the pane axis; kept while closed so reopening restores it
    pub size: i32,
    pub min_size: i32,
    pub max_size: i32,
    pub is_closed: bool,
    pub is_hidden: bool,
    pub is_sliding: bool,
    pub is_resizing: bool,
    /// Pane element is displayed
    pub is_visible: bool,
    /// Auto-collapsed because the container cannot fit it
    pub no_room: bool,
    /// East/west pane with no height left in the middle band
    pub no_vertical_room: bool,
    /// Was open when auto-collapsed
    pub was_open: bool,
    pub resizer_position: ResizerBounds,
    /// Last rectangle handed to the renderer
    pub outer: Rect,
    pub resizer: Option<Rect>,
    pub toggler: Option<Rect>,
}

impl PaneState {
    pub fn border(edge: Edge, element: ElementId, size: i32) -> Self {
        Self {
            edge,
            element,
            size,
            min_size: 0,
            max_size: 0,
            is_closed: false,
            is_hidden: false,
            is_sliding: false,
            is_resizing: false,
            is_visible: true,
            no_room: false,
            no_vertical_room: false,
            was_open: false,
            resizer_position: ResizerBounds::default(),
            outer: Rect::default(),
            resizer: None,
            toggler: None,
        }
    }

    pub fn center(element: ElementId) -> Self {
        Self::border(Edge::Center, element, 0)
    }

    pub fn is_open(&self) -> bool {
        !self.is_closed
    }

    pub fn status(&self) -> PaneStatus {
        if self.edge == Edge::Center {
            return if self.no_room {
                PaneStatus::NoRoom
            } else {
                PaneStatus::Visible
            };
        }
        if self.is_hidden {
            PaneStatus::Hidden
        } else if self.is_closed {
            PaneStatus::Closed
        } else if self.is_sliding {
            PaneStatus::Sliding
        } else {
            PaneStatus::Open
        }
    }

    /// Open and displacing its neighbors
    pub fn is_pinned(&self) -> bool {
        !self.is_closed && !self.is_sliding
    }

    /// Outer size plus gutter as seen by the center pane
    pub fn occupied(&self, options: &PaneConfig) -> i32 {
        if self.is_hidden {
            0
        } else if self.is_closed || self.is_sliding {
            options.spacing_closed
        } else {
            self.size + options.spacing_open
        }
    }

    /// Checks the flag invariants that must hold between transitions
    pub fn flags_consistent(&self) -> bool {
        (!self.is_hidden || self.is_closed)
            && (!self.is_sliding || !self.is_closed)
            && (!self.is_resizing || !self.is_closed)
    }
}
