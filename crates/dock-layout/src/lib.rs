// ABOUTME: Border pane layout engine with a pane state machine, size solver, and transition queue.
// ABOUTME: Talks to the rendering layer only through the Measure and Render traits.

pub mod callbacks;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod headless;
pub mod input;
pub mod layout;
pub mod pane;
pub mod serializer;
pub mod solver;
pub mod state;
pub mod surface;
pub mod timers;

pub use callbacks::{CallbackContext, Flow, LifecycleEvent};
pub use drag::{DragLimit, DragSession};
pub use error::LayoutError;
pub use geometry::{BoxModel, ContainerDims, Insets, Rect};
pub use headless::{HandleState, HeadlessSurface, Placement};
pub use input::{Key, KeyInput, PointerKind, PointerTarget};
pub use layout::{CloseOptions, Layout, LayoutBuilder, OpenOptions};
pub use pane::{PaneState, PaneStatus, ResizerBounds};
pub use solver::SizeLimits;
pub use state::LayoutState;
pub use surface::{ElementId, Measure, Render, RenderCommand, Surface};
pub use timers::TimerKey;
