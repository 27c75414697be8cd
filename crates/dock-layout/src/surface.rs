// ABOUTME: Collaborator traits between the layout engine and a rendering layer.
// ABOUTME: Measure reports element geometry, Render receives computed geometry as commands.

use std::time::Duration;

use dock_core::{Direction, Edge, Effect};

use crate::drag::DragLimit;
use crate::geometry::{BoxModel, ContainerDims, Rect};

/// Opaque handle for an element owned by the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// Geometry queries the engine needs answered.
///
/// The engine never touches elements directly; every number it works with
/// comes from here.
pub trait Measure {
    /// Container geometry, or `None` when there is no container element
    fn container(&self) -> Option<ContainerDims>;

    /// Element currently provided for an edge
    fn pane_element(&self, edge: Edge) -> Option<ElementId>;

    fn box_model(&self, _element: ElementId) -> BoxModel {
        BoxModel::default()
    }

    /// Natural outer size along a pane axis, measured with the element's size
    /// constraint temporarily removed (and shown invisibly if it is hidden)
    fn natural_size(&self, element: ElementId, direction: Direction) -> i32;

    /// Visible embeds inside an element that swallow pointer events
    fn mask_targets(&self, _element: ElementId) -> Vec<ElementId> {
        Vec::new()
    }
}

/// Output of the layout engine, applied by the rendering layer in order
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Element now managed at this edge
    Bind { edge: Edge, element: ElementId },
    /// Element released; original styling should be restored
    Unbind { edge: Edge, element: ElementId },
    /// Position a pane. Invisible panes keep their last rectangle.
    Place {
        edge: Edge,
        element: ElementId,
        rect: Rect,
        visible: bool,
        /// Sliding panes are raised above their neighbors
        overlay: bool,
    },
    /// Resizer bar and toggler of a border pane; `None` means not shown
    Handles {
        edge: Edge,
        resizer: Option<Rect>,
        toggler: Option<Rect>,
        closed: bool,
        sliding: bool,
    },
    /// Run an open/close animation; the engine completes it after `duration`
    Animate {
        edge: Edge,
        element: ElementId,
        effect: Effect,
        easing: Option<String>,
        duration: Duration,
        opening: bool,
    },
    /// User-facing message, e.g. not enough room to open a pane
    Notice { edge: Edge, message: String },
    Mask { edge: Edge, targets: Vec<ElementId> },
    Unmask { edge: Edge },
    /// Live resizer position during a drag
    DragFeedback {
        edge: Edge,
        position: i32,
        limit: DragLimit,
    },
    /// Pane content should be re-measured for the pane's new size
    RefreshContent { edge: Edge },
    /// Layout destroyed; container styling should be restored
    RestoreContainer,
}

/// Receives render commands
pub trait Render {
    fn apply(&mut self, command: RenderCommand);
}

/// A complete rendering layer
pub trait Surface: Measure + Render {}

impl<T: Measure + Render> Surface for T {}
