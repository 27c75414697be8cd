// ABOUTME: Whole-layout resizing, debounced container resizes, and interactive resizer drags.
// ABOUTME: resize_all fits border panes in collapse order, then lays out the middle band.

use std::time::Duration;

use dock_core::{Edge, MaskTargets};

use super::sizing::MidPanes;
use super::Layout;
use crate::callbacks::{Flow, LifecycleEvent};
use crate::drag::DragSession;
use crate::serializer::Motion;
use crate::surface::{ElementId, RenderCommand, Surface};
use crate::timers::TimerKey;

impl<S: Surface> Layout<S> {
    /// Re-measure the container and refit every pane
    pub fn resize_all(&mut self) {
        if !self.state.initialized {
            self.init_layout();
            return;
        }
        let Some(container) = self.surface.container() else {
            tracing::warn!("Layout container disappeared; skipping resize");
            return;
        };
        if !container.visible {
            tracing::debug!("Container not displayed; skipping resize");
            return;
        }
        self.state.container = container;
        self.measured = container;

        if self.fire(LifecycleEvent::ResizeAllStart, None) == Flow::Cancel {
            return;
        }

        for edge in self.config.fitting_order() {
            let Some(options) = self.config.pane(edge) else {
                continue;
            };
            if !self.state.has_pane(edge) {
                continue;
            }
            let auto_resize = options.auto_resize;
            let configured = self.parse_size(edge, options.size_for(edge));
            let current = self.state.pane(edge).map(|p| p.size).unwrap_or(configured);

            if auto_resize && configured != current {
                self.resize_pane(edge, configured, true, true);
                if self.state.pane(edge).is_some_and(|p| p.no_room) {
                    self.make_pane_fit(edge, true, true);
                }
            } else {
                self.make_pane_fit(edge, true, true);
            }
        }

        self.size_mid_panes(MidPanes::All, true, true);
        self.size_handles();

        for edge in Edge::ALL {
            if self.state.pane(edge).is_some_and(|p| p.is_visible) {
                self.emit(RenderCommand::RefreshContent { edge });
                self.fire(LifecycleEvent::ResizeEnd, Some(edge));
            }
        }
        tracing::debug!(
            "Resized layout to {}x{}",
            container.inner_width,
            container.inner_height
        );
        self.fire(LifecycleEvent::ResizeAllEnd, None);
    }

    /// The container changed size; coalesce bursts into one `resize_all`
    pub fn container_resized(&mut self) {
        if !self.config.resize_with_window {
            return;
        }
        let delay = Duration::from_millis(self.config.resize_delay_ms());
        self.timers.set(TimerKey::WindowResize, delay);

        let max_delay = self.config.resize_with_window_max_delay_ms;
        if max_delay > 0 && !self.timers.is_set(TimerKey::ResizeRepeater) {
            self.timers
                .set(TimerKey::ResizeRepeater, Duration::from_millis(max_delay));
        }
    }

    pub(crate) fn window_resize_settled(&mut self) {
        self.timers.clear(TimerKey::ResizeRepeater);
        let Some(container) = self.surface.container() else {
            return;
        };
        if self.state.initialized
            && container.visible
            && container.same_inner_size(&self.measured)
        {
            tracing::trace!("Container size unchanged; skipping resize");
            return;
        }
        self.resize_all();
    }

    pub(crate) fn window_resize_repeat(&mut self) {
        let max_delay = self.config.resize_with_window_max_delay_ms;
        if max_delay > 0 {
            self.timers
                .set(TimerKey::ResizeRepeater, Duration::from_millis(max_delay));
        }
        self.resize_all();
    }

    /// Start dragging a pane's resizer; false when the pane cannot be resized now
    pub fn begin_drag(&mut self, edge: Edge) -> bool {
        if !self.state.initialized || self.drag.is_some() || self.state.is_busy() {
            return false;
        }
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return false;
        };
        if !options.resizable || pane.is_closed {
            return false;
        }
        if self.fire(LifecycleEvent::DragStart, Some(edge)) == Flow::Cancel {
            return false;
        }

        self.state.transitions.begin(edge, Motion::Dragging);
        self.timers.clear(TimerKey::SlideClose(edge));
        if let Some(pane) = self.state.pane_mut(edge) {
            pane.is_resizing = true;
        }
        self.set_size_limits(edge);

        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return false;
        };
        let masks = match &options.mask_on_resize {
            MaskTargets::None => Vec::new(),
            MaskTargets::AllEmbeds => self.surface.mask_targets(pane.element),
            MaskTargets::Elements(ids) => ids.iter().copied().map(ElementId).collect(),
        };
        let start = self.resizer_offset(edge, pane.size, options.spacing_open);
        let session = DragSession::new(
            edge,
            pane.resizer_position,
            start,
            options.resize_while_dragging,
            masks.clone(),
        );
        if !masks.is_empty() {
            self.emit(RenderCommand::Mask {
                edge,
                targets: masks,
            });
        }
        tracing::debug!("Dragging {} resizer from {}", edge, start);
        self.drag = Some(session);
        true
    }

    /// Move the dragged resizer; returns the pane size the position implies
    pub fn drag_to(&mut self, position: i32) -> Option<i32> {
        let container = self.state.container;
        let edge = self.drag.as_ref()?.edge;
        let spacing_open = self.config.pane(edge).map(|o| o.spacing_open).unwrap_or(0);
        let drag = self.drag.as_mut()?;
        let clamped = drag.clamp(position);
        let limit = drag.limit;
        let live = drag.live;
        let size = drag.pane_size(&container, spacing_open);

        self.emit(RenderCommand::DragFeedback {
            edge,
            position: clamped,
            limit,
        });
        if live {
            self.resize_pane(edge, size, false, true);
        }
        Some(size)
    }

    /// Release the resizer and apply the final size
    pub fn end_drag(&mut self) -> Option<i32> {
        let drag = self.drag.take()?;
        let edge = drag.edge;
        let spacing_open = self.config.pane(edge).map(|o| o.spacing_open).unwrap_or(0);
        let size = drag.pane_size(&self.state.container, spacing_open);

        if !drag.masks.is_empty() {
            self.emit(RenderCommand::Unmask { edge });
        }
        if let Some(pane) = self.state.pane_mut(edge) {
            pane.is_resizing = false;
        }
        let queued = self.state.transitions.finish(edge);

        if self.fire(LifecycleEvent::DragEnd, Some(edge)) == Flow::Cancel {
            // put the resizer back where the pane is
            self.size_handles();
        } else {
            // always applied, even after live resizing
            self.manual_resize(edge, size, true);
        }

        if let Some(queued) = queued {
            self.replay(queued);
        }
        Some(size)
    }

    /// Absolute resizer position for a pane of the given size
    fn resizer_offset(&self, edge: Edge, size: i32, spacing_open: i32) -> i32 {
        let container = &self.state.container;
        let inset = container.inset;
        match edge {
            Edge::North => inset.top + size,
            Edge::West => inset.left + size,
            Edge::South => inset.top + container.inner_height - size - spacing_open,
            Edge::East => inset.left + container.inner_width - size - spacing_open,
            Edge::Center => 0,
        }
    }
}
