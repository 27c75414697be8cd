// ABOUTME: Pane lifecycle: initial layout, adding, removing and swapping panes, and teardown.
// ABOUTME: Also holds the closable/resizable/slidable capability switches.

use dock_core::{Edge, PaneConfig, UNLIMITED_SIZE};

use super::sizing::MidPanes;
use super::{CloseOptions, Layout, OpenOptions};
use crate::callbacks::{Flow, LifecycleEvent};
use crate::pane::PaneState;
use crate::surface::{RenderCommand, Surface};
use crate::timers::TimerKey;

impl<S: Surface> Layout<S> {
    /// First layout pass; deferred while the container is not displayed
    pub(crate) fn init_layout(&mut self) {
        let Some(container) = self.surface.container() else {
            tracing::warn!("Layout container is missing; cannot initialize");
            return;
        };
        if !container.visible {
            tracing::warn!("Layout container is not displayed; deferring initialization");
            return;
        }
        self.state.container = container;
        self.measured = container;
        self.state.creating = true;

        for edge in Edge::ALL {
            self.init_pane(edge);
        }
        for edge in self.config.fitting_order() {
            if self.state.pane(edge).is_some_and(|p| p.is_visible) {
                self.make_pane_fit(edge, true, true);
            }
        }
        self.size_mid_panes(MidPanes::All, true, true);
        self.size_handles();

        self.state.creating = false;
        self.state.initialized = true;
        tracing::info!(
            "Initialized layout {:?} at {}x{}",
            self.config.name,
            container.inner_width,
            container.inner_height
        );

        self.fire(LifecycleEvent::LoadEnd, None);
        for edge in Edge::BORDERS {
            let on_load = self.config.pane(edge).is_some_and(|o| o.trigger_events_on_load);
            if on_load && self.state.pane(edge).is_some_and(|p| p.is_visible) {
                self.fire(LifecycleEvent::ResizeEnd, Some(edge));
            }
        }
        if self.config.center.trigger_events_on_load {
            self.fire(LifecycleEvent::ResizeEnd, Some(Edge::Center));
        }
        if container.inner_height <= 0 {
            tracing::warn!("Layout container has no height; panes will not be visible");
        }
    }

    /// Bind the element provided for an edge and set up its initial state
    fn init_pane(&mut self, edge: Edge) -> bool {
        let Some(element) = self.surface.pane_element(edge) else {
            return false;
        };
        if edge == Edge::Center {
            self.state.panes.insert(edge, PaneState::center(element));
            self.emit(RenderCommand::Bind { edge, element });
            return true;
        }
        let Some(options) = self.config.pane(edge) else {
            return false;
        };
        let (size_spec, min_spec, max_spec) =
            (options.size_for(edge), options.min_size, options.max_size);
        let (closable, init_closed, init_hidden) =
            (options.closable, options.init_closed, options.init_hidden);

        // registered first so sizes can be measured
        self.state
            .panes
            .insert(edge, PaneState::border(edge, element, 0));
        let mut size = self.parse_size(edge, size_spec);
        let min = match self.parse_limit(edge, min_spec) {
            0 => 1,
            px => px,
        };
        let max = match self.parse_limit(edge, max_spec) {
            0 => UNLIMITED_SIZE,
            px => px,
        };
        if size > 0 {
            size = size.min(max).max(min);
        }

        if let Some(pane) = self.state.pane_mut(edge) {
            pane.size = size;
            pane.min_size = min;
            pane.max_size = max;
            if init_closed && closable && !init_hidden {
                pane.is_closed = true;
                pane.is_visible = false;
            } else if init_hidden || init_closed {
                pane.is_closed = true;
                pane.is_hidden = true;
                pane.is_visible = false;
            }
        }
        self.emit(RenderCommand::Bind { edge, element });
        self.place_pane(edge);
        tracing::debug!("Added {} pane with size {}", edge, size);
        true
    }

    /// Start managing a pane the surface now provides; false if it is absent or already managed
    pub fn add_pane(&mut self, edge: Edge) -> bool {
        if !self.state.initialized || !edge.is_border() || self.state.has_pane(edge) {
            return false;
        }
        if !self.init_pane(edge) {
            return false;
        }
        if self.state.pane(edge).is_some_and(|p| p.is_visible) {
            self.make_pane_fit(edge, false, false);
        }
        self.size_mid_panes(MidPanes::All, false, false);
        self.size_handles();
        true
    }

    /// Stop managing a border pane; the center cannot be removed
    pub fn remove_pane(&mut self, edge: Edge) {
        if !edge.is_border() {
            return;
        }
        let Some(pane) = self.state.panes.remove(&edge) else {
            return;
        };
        self.state.transitions.forget(edge);
        self.timers.clear(TimerKey::Transition(edge));
        self.timers.clear(TimerKey::SlideOpen(edge));
        self.timers.clear(TimerKey::SlideClose(edge));
        if self.drag.as_ref().is_some_and(|d| d.edge == edge) {
            self.drag = None;
            self.emit(RenderCommand::Unmask { edge });
        }
        self.emit(RenderCommand::Handles {
            edge,
            resizer: None,
            toggler: None,
            closed: true,
            sliding: false,
        });
        self.emit(RenderCommand::Unbind {
            edge,
            element: pane.element,
        });
        tracing::debug!("Removed {} pane", edge);
        if self.state.initialized {
            self.resize_all();
        }
    }

    /// Exchange the elements, state and options of two border panes.
    ///
    /// Animation settings stay with the edge. A pane moving to the other axis
    /// takes the size the target edge had.
    pub fn swap_panes(&mut self, a: Edge, b: Edge) {
        if !self.state.initialized
            || self.state.is_busy()
            || a == b
            || !a.is_border()
            || !b.is_border()
        {
            return;
        }
        if !self.state.has_pane(a) && !self.state.has_pane(b) {
            return;
        }

        for (from, to) in [(a, b), (b, a)] {
            if let Some(pane) = self.state.pane_mut(from) {
                pane.edge = to;
            }
        }
        let vetoed = [a, b].into_iter().any(|edge| {
            self.state.has_pane(edge)
                && self.fire(LifecycleEvent::SwapStart, Some(edge)) == Flow::Cancel
        });
        if vetoed {
            for edge in [a, b] {
                if let Some(pane) = self.state.pane_mut(edge) {
                    pane.edge = edge;
                }
            }
            return;
        }

        let axis_change = a.direction() != b.direction();
        // size each target edge had, for panes changing axis
        let target_size = |layout: &Self, edge: Edge| -> i32 {
            match layout.state.pane(edge) {
                Some(pane) => pane.size,
                None => layout
                    .config
                    .pane(edge)
                    .map(|o| layout.parse_size(edge, o.size_for(edge)))
                    .unwrap_or(0),
            }
        };
        let size_at_a = target_size(self, a);
        let size_at_b = target_size(self, b);

        for edge in [a, b] {
            self.timers.clear(TimerKey::SlideOpen(edge));
            self.timers.clear(TimerKey::SlideClose(edge));
        }
        let pane_a = self.state.panes.remove(&a);
        let pane_b = self.state.panes.remove(&b);
        self.swap_options(a, b);

        let mut moved = Vec::new();
        for (pane, to) in [(pane_a, b), (pane_b, a)] {
            let Some(mut pane) = pane else {
                continue;
            };
            pane.edge = to;
            pane.no_vertical_room = false;
            if pane.is_sliding {
                // a sliding pane lands closed
                pane.is_sliding = false;
                pane.is_closed = true;
            }
            pane.is_visible = !pane.is_closed;
            let element = pane.element;
            self.state.panes.insert(to, pane);
            self.emit(RenderCommand::Bind { edge: to, element });
            moved.push(to);
        }

        if axis_change {
            for &edge in &moved {
                let target = if edge == a { size_at_a } else { size_at_b };
                // a configured size for the other axis means nothing here
                if let Some(options) = self.config.pane_mut(edge) {
                    options.auto_resize = false;
                }
                if let Some(limits) = self.set_size_limits(edge) {
                    self.resize_pane(edge, target.max(limits.min), true, true);
                }
            }
        }

        tracing::debug!("Swapped {} and {}", a, b);
        self.resize_all();
        for edge in moved {
            self.fire(LifecycleEvent::SwapEnd, Some(edge));
        }
    }

    /// Swap the option tables of two edges, leaving each edge's animation settings in place
    fn swap_options(&mut self, a: Edge, b: Edge) {
        let (Some(options_a), Some(options_b)) =
            (self.config.pane(a).cloned(), self.config.pane(b).cloned())
        else {
            return;
        };
        let fx_a = options_a.fx.clone();
        let fx_b = options_b.fx.clone();
        if let Some(slot) = self.config.pane_mut(a) {
            *slot = PaneConfig { fx: fx_a, ..options_b };
        }
        if let Some(slot) = self.config.pane_mut(b) {
            *slot = PaneConfig { fx: fx_b, ..options_a };
        }
    }

    pub fn enable_closable(&mut self, edge: Edge) {
        self.set_capability(edge, |o| o.closable = true);
    }

    /// A closed pane is opened first, since it could never be reopened otherwise
    pub fn disable_closable(&mut self, edge: Edge) {
        if self.state.pane(edge).is_some_and(|p| p.is_closed && !p.is_hidden) {
            self.open(edge, OpenOptions::instant());
        }
        self.set_capability(edge, |o| o.closable = false);
    }

    pub fn enable_resizable(&mut self, edge: Edge) {
        self.set_capability(edge, |o| o.resizable = true);
    }

    pub fn disable_resizable(&mut self, edge: Edge) {
        if self.drag.as_ref().is_some_and(|d| d.edge == edge) {
            self.end_drag();
        }
        self.set_capability(edge, |o| o.resizable = false);
    }

    pub fn enable_slidable(&mut self, edge: Edge) {
        self.set_capability(edge, |o| o.slidable = true);
    }

    /// A sliding pane is closed first
    pub fn disable_slidable(&mut self, edge: Edge) {
        if self.state.pane(edge).is_some_and(|p| p.is_sliding) {
            self.close(edge, CloseOptions::instant());
        }
        self.set_capability(edge, |o| o.slidable = false);
    }

    fn set_capability(&mut self, edge: Edge, change: impl FnOnce(&mut PaneConfig)) {
        if !self.state.initialized || !self.state.has_pane(edge) {
            return;
        }
        if let Some(options) = self.config.pane_mut(edge) {
            change(options);
        }
        self.size_handles();
    }

    /// Tear the layout down and hand back the surface.
    ///
    /// State is saved first when auto-save is on; a failed save is logged and ignored.
    pub fn destroy(mut self) -> S {
        self.timers.clear_all();
        self.drag = None;
        self.fire(LifecycleEvent::UnloadStart, None);

        if self.config.state.auto_save && self.state.initialized {
            if let Err(e) = self.save_state() {
                tracing::warn!("Failed to save layout state: {}", e);
            }
        }

        let bound: Vec<_> = self
            .state
            .panes
            .iter()
            .map(|(&edge, pane)| (edge, pane.element))
            .collect();
        for (edge, element) in bound {
            self.emit(RenderCommand::Unbind { edge, element });
        }
        self.emit(RenderCommand::RestoreContainer);
        self.state.transitions.clear();
        self.fire(LifecycleEvent::UnloadEnd, None);
        tracing::info!("Destroyed layout {:?}", self.config.name);
        self.surface
    }
}
