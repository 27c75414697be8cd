// ABOUTME: Layout orchestrator: owns pane state and drives the solver, serializer, and timers.
// ABOUTME: Public operations never fail; they do nothing when their preconditions do not hold.

mod events;
mod panes;
mod persistence;
mod resize;
mod sizing;
mod transitions;

use std::time::Instant;

use dock_core::{Edge, LayoutConfig, StateStore};

use crate::callbacks::{CallbackContext, CallbackRegistry, Flow, LifecycleEvent};
use crate::drag::DragSession;
use crate::error::LayoutError;
use crate::geometry::{ContainerDims, Rect};
use crate::pane::{PaneState, PaneStatus};
use crate::state::LayoutState;
use crate::surface::{RenderCommand, Surface};
use crate::timers::Scheduler;

/// Options for [`Layout::open`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenOptions {
    /// Overlay the pane without displacing its neighbors
    pub slide: bool,
    pub no_animation: bool,
    /// Suppress the "not enough room" notice
    pub no_alert: bool,
}

impl OpenOptions {
    pub fn slide() -> Self {
        Self {
            slide: true,
            ..Self::default()
        }
    }

    pub fn instant() -> Self {
        Self {
            no_animation: true,
            ..Self::default()
        }
    }
}

/// Options for [`Layout::close`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseOptions {
    /// Run even if the pane is already closed
    pub force: bool,
    pub no_animation: bool,
    /// Do not fire the end callbacks
    pub skip_callback: bool,
}

impl CloseOptions {
    pub fn instant() -> Self {
        Self {
            no_animation: true,
            ..Self::default()
        }
    }
}

/// Configures callbacks and persistence before a layout is created
pub struct LayoutBuilder {
    config: LayoutConfig,
    callbacks: CallbackRegistry,
    store: Option<Box<dyn StateStore>>,
    start: Option<Instant>,
}

impl LayoutBuilder {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            callbacks: CallbackRegistry::new(),
            store: None,
            start: None,
        }
    }

    pub fn on(
        mut self,
        event: LifecycleEvent,
        handler: impl FnMut(&CallbackContext<'_>) -> Flow + 'static,
    ) -> Self {
        self.callbacks.on(event, Box::new(handler));
        self
    }

    pub fn on_pane(
        mut self,
        edge: Edge,
        event: LifecycleEvent,
        handler: impl FnMut(&CallbackContext<'_>) -> Flow + 'static,
    ) -> Self {
        self.callbacks.on_pane(edge, event, Box::new(handler));
        self
    }

    pub fn state_store(mut self, store: impl StateStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Clock reading the timer scheduler starts from
    pub fn start_time(mut self, now: Instant) -> Self {
        self.start = Some(now);
        self
    }

    /// Create the layout over a surface.
    ///
    /// Saved state is merged into the configuration first. If the container is
    /// not displayed yet, initialization is deferred until `resize_all`.
    pub fn build<S: Surface>(self, surface: S) -> Result<Layout<S>, LayoutError> {
        let container = surface.container().ok_or(LayoutError::ContainerMissing)?;
        if surface.pane_element(Edge::Center).is_none() {
            return Err(LayoutError::CenterPaneMissing);
        }

        let mut layout = Layout {
            surface,
            config: self.config,
            state: LayoutState {
                container,
                ..LayoutState::default()
            },
            callbacks: self.callbacks,
            timers: Scheduler::new(self.start.unwrap_or_else(Instant::now)),
            store: self.store,
            drag: None,
            measured: container,
        };

        if layout.config.state.auto_load {
            if let Err(e) = layout.load_saved_state() {
                tracing::warn!("Failed to load saved layout state: {}", e);
            }
        }

        if layout.fire(LifecycleEvent::LoadStart, None) == Flow::Cancel {
            return Err(LayoutError::Cancelled);
        }
        layout.init_layout();
        Ok(layout)
    }
}

/// A border layout of up to four closable panes around a center pane
pub struct Layout<S: Surface> {
    surface: S,
    /// Working copy; swaps, capability toggles and loaded state change it
    config: LayoutConfig,
    state: LayoutState,
    callbacks: CallbackRegistry,
    timers: Scheduler,
    store: Option<Box<dyn StateStore>>,
    drag: Option<DragSession>,
    /// Container geometry at the last full layout pass
    measured: ContainerDims,
}

impl<S: Surface> Layout<S> {
    pub fn new(config: LayoutConfig, surface: S) -> Result<Self, LayoutError> {
        LayoutBuilder::new(config).build(surface)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn pane(&self, edge: Edge) -> Option<&PaneState> {
        self.state.pane(edge)
    }

    pub fn pane_state(&self, edge: Edge) -> Option<PaneStatus> {
        self.state.pane(edge).map(PaneState::status)
    }

    /// Where the center pane currently sits
    pub fn center_rect(&self) -> Rect {
        self.state.center_rect(&self.config).floored()
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.initialized
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn now(&self) -> Instant {
        self.timers.now()
    }

    /// When `tick` next has work to do
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub(crate) fn emit(&mut self, command: RenderCommand) {
        self.surface.apply(command);
    }

    pub(crate) fn fire(&mut self, event: LifecycleEvent, edge: Option<Edge>) -> Flow {
        if self.callbacks.is_empty() {
            return Flow::Continue;
        }
        let ctx = CallbackContext {
            event,
            edge,
            pane: edge.and_then(|e| self.state.panes.get(&e)),
            layout: &self.state,
            name: &self.config.name,
        };
        let flow = self.callbacks.fire(&ctx);
        if flow == Flow::Cancel {
            tracing::debug!("{:?} cancelled for {:?}", event, edge);
        }
        flow
    }
}
