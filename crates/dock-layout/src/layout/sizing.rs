// ABOUTME: Pane sizing: limits, fitting panes into the container, and laying out the middle band.
// ABOUTME: Geometry comes from the solver; this module applies it and emits render commands.

use dock_core::{Direction, Edge, SizeSpec};

use super::{Layout, OpenOptions};
use crate::callbacks::LifecycleEvent;
use crate::serializer::CloseMode;
use crate::solver::{self, LimitInput, SizeLimits};
use crate::surface::{RenderCommand, Surface};

/// Which middle-band panes a layout pass covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MidPanes {
    All,
    Center,
    One(Edge),
}

impl MidPanes {
    /// Panes displaced when a border pane changes size
    pub(crate) fn after(edge: Edge) -> Self {
        match edge.direction() {
            Some(Direction::Horizontal) => MidPanes::All,
            _ => MidPanes::Center,
        }
    }

    fn edges(self) -> Vec<Edge> {
        match self {
            MidPanes::All => vec![Edge::East, Edge::West, Edge::Center],
            MidPanes::Center => vec![Edge::Center],
            MidPanes::One(edge) => vec![edge],
        }
    }
}

impl<S: Surface> Layout<S> {
    /// Space percentages are resolved against: the container along the pane
    /// axis minus the open gutters of the panes present on that axis
    pub(crate) fn available_for(&self, edge: Edge) -> i32 {
        let Some(direction) = edge.direction() else {
            return 0;
        };
        let mut available = self.state.container.inner(direction);
        for e in [Some(edge), edge.opposite()].into_iter().flatten() {
            if let (true, Some(options)) = (self.state.has_pane(e), self.config.pane(e)) {
                available -= options.spacing_open;
            }
        }
        available
    }

    /// Resolve a size option to pixels, measuring the element for `auto`
    pub(crate) fn parse_size(&self, edge: Edge, spec: SizeSpec) -> i32 {
        let available = self.available_for(edge);
        solver::resolve_size(spec, available, || {
            match (self.state.pane(edge), edge.direction()) {
                (Some(pane), Some(direction)) => self.surface.natural_size(pane.element, direction),
                _ => 0,
            }
        })
    }

    pub(crate) fn parse_limit(&self, edge: Edge, spec: SizeSpec) -> i32 {
        solver::resolve_limit(spec, self.available_for(edge))
    }

    /// Recompute a border pane's size limits and resizer drag bounds
    pub fn set_size_limits(&mut self, edge: Edge) -> Option<SizeLimits> {
        let sliding = self.state.pane(edge)?.is_sliding;
        self.compute_limits(edge, sliding)
    }

    pub(crate) fn compute_limits(&mut self, edge: Edge, sliding: bool) -> Option<SizeLimits> {
        let direction = edge.direction()?;
        let options = self.config.pane(edge)?;
        let pane = self.state.pane(edge)?;
        let container = self.state.container;

        let alt = edge
            .opposite()
            .and_then(|alt| Some((self.state.pane(alt)?, self.config.pane(alt)?)));
        let (alt_size, alt_spacing) = match alt {
            None => (0, 0),
            Some((alt_pane, alt_options)) => {
                let size = if alt_pane.is_visible && !alt_pane.is_sliding {
                    alt_pane.size
                } else {
                    0
                };
                let spacing = if alt_pane.is_hidden {
                    0
                } else if alt_pane.is_closed || alt_pane.is_sliding {
                    alt_options.spacing_closed
                } else {
                    alt_options.spacing_open
                };
                (size, spacing)
            }
        };

        let center_spec = match direction {
            Direction::Horizontal => self.config.center.min_height,
            Direction::Vertical => self.config.center.min_width,
        };
        let center_floor = self
            .state
            .pane(Edge::Center)
            .map(|c| self.surface.box_model(c.element).min_outer(direction))
            .unwrap_or(0);
        let center_min =
            solver::resolve_limit(center_spec, container.inner(direction)).max(center_floor);

        let input = LimitInput {
            container_size: container.inner(direction),
            spacing_open: options.spacing_open,
            sliding,
            center_min,
            alt_size,
            alt_spacing,
            min_option: self.parse_limit(edge, options.min_size),
            max_option: self.parse_limit(edge, options.max_size),
            css_floor: self.surface.box_model(pane.element).min_outer(direction),
        };
        let spacing_open = options.spacing_open;
        let limits = solver::size_limits(&input);
        let bounds = solver::resizer_bounds(edge, limits, &container, spacing_open);

        let pane = self.state.pane_mut(edge)?;
        pane.min_size = limits.min;
        pane.max_size = limits.max;
        pane.resizer_position = bounds;
        Some(limits)
    }

    /// Emit the current rectangle of a pane
    pub(crate) fn place_pane(&mut self, edge: Edge) {
        let occ = self.state.occupancy(&self.config);
        let container = self.state.container;
        let Some(pane) = self.state.pane_mut(edge) else {
            return;
        };
        let rect = solver::pane_rect(edge, &container, pane.size, &occ).floored();
        pane.outer = rect;
        let command = RenderCommand::Place {
            edge,
            element: pane.element,
            rect,
            visible: pane.is_visible,
            overlay: pane.is_sliding,
        };
        self.emit(command);
    }

    /// Resize a pane and push its neighbors accordingly
    pub fn size_pane(&mut self, edge: Edge, size: SizeSpec) {
        if !self.state.initialized || !self.state.has_pane(edge) {
            return;
        }
        let px = self.parse_size(edge, size);
        self.manual_resize(edge, px, false);
    }

    /// User-initiated resize; the pane stops snapping back to its configured size
    pub(crate) fn manual_resize(&mut self, edge: Edge, px: i32, force: bool) {
        if let Some(options) = self.config.pane_mut(edge) {
            options.auto_resize = false;
        }
        self.resize_pane(edge, px, false, force);
    }

    pub(crate) fn resize_pane(&mut self, edge: Edge, requested: i32, skip_callback: bool, force: bool) {
        let Some(limits) = self.set_size_limits(edge) else {
            return;
        };
        let size = requested.max(limits.min).min(limits.max);
        if size < limits.min {
            // cannot fit at all
            self.make_pane_fit(edge, skip_callback, force);
            return;
        }

        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return;
        };
        let old_size = pane.size;
        if !force && size == old_size {
            return;
        }
        if !pane.is_visible {
            // remembered for when the pane reopens
            if let Some(pane) = self.state.pane_mut(edge) {
                pane.size = size;
            }
            return;
        }

        let quiet = skip_callback || (pane.is_resizing && !options.trigger_events_while_dragging);
        let refresh = !pane.is_resizing || options.resize_content_while_dragging;
        let sliding = pane.is_sliding;

        if !quiet {
            self.fire(LifecycleEvent::ResizeStart, Some(edge));
        }
        if let Some(pane) = self.state.pane_mut(edge) {
            pane.size = size;
        }
        tracing::debug!("Sized {} from {} to {}", edge, old_size, size);
        self.place_pane(edge);
        if refresh {
            self.emit(RenderCommand::RefreshContent { edge });
        }
        if !quiet {
            self.fire(LifecycleEvent::ResizeEnd, Some(edge));
        }

        if !skip_callback {
            if !sliding {
                self.size_mid_panes(MidPanes::after(edge), quiet, false);
            }
            self.size_handles();
        }

        if size < old_size {
            if let Some(alt) = edge.opposite() {
                if self.state.pane(alt).is_some_and(|p| p.no_room) {
                    self.make_pane_fit(alt, skip_callback, false);
                }
            }
        }
    }

    /// Bring a pane within its limits, collapsing it when it cannot fit and
    /// restoring it once it can
    pub(crate) fn make_pane_fit(&mut self, edge: Edge, skip_callback: bool, force: bool) {
        if edge == Edge::Center {
            self.size_mid_panes(MidPanes::Center, skip_callback, force);
            return;
        }
        let Some(limits) = self.set_size_limits(edge) else {
            return;
        };
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return;
        };
        let closable = options.closable;
        let auto_reopen = options.auto_reopen;

        if limits.fits() {
            if pane.size > limits.max {
                self.resize_pane(edge, limits.max, skip_callback, force);
            } else if pane.size < limits.min {
                self.resize_pane(edge, limits.min, skip_callback, force);
            }

            let Some(pane) = self.state.pane(edge) else {
                return;
            };
            if !pane.no_room {
                return;
            }
            let was_open = pane.was_open;
            let hidden = pane.is_hidden;
            if was_open && closable && auto_reopen && !hidden {
                tracing::debug!("Room returned for {}, reopening", edge);
                self.open(
                    edge,
                    OpenOptions {
                        slide: false,
                        no_animation: true,
                        no_alert: true,
                    },
                );
            } else {
                if let Some(pane) = self.state.pane_mut(edge) {
                    pane.no_room = false;
                }
                if hidden && !closable {
                    self.show(edge, was_open, true);
                }
            }
        } else if !pane.no_room {
            tracing::debug!(
                "No room for {}: min {} exceeds max {}",
                edge,
                limits.min,
                limits.max
            );
            let was_open = pane.is_pinned();
            let closed = pane.is_closed;
            if let Some(pane) = self.state.pane_mut(edge) {
                pane.no_room = true;
                pane.was_open = was_open;
            }
            if closed {
                // already out of the way
            } else if closable {
                self.close_pane(edge, true, true, false, CloseMode::Close);
            } else {
                self.hide(edge, true);
            }
        }
    }

    /// Lay out east, west and center after a border pane changed
    pub(crate) fn size_mid_panes(&mut self, which: MidPanes, skip_callback: bool, force: bool) {
        for edge in which.edges() {
            if !self.state.has_pane(edge) {
                continue;
            }
            if edge == Edge::Center {
                self.size_center(skip_callback, force);
            } else {
                self.size_side(edge, skip_callback, force);
            }
        }
    }

    fn size_center(&mut self, skip_callback: bool, force: bool) {
        if self.state.creating {
            self.recover_center_width();
        }
        let rect = self.state.center_rect(&self.config);
        let Some(center) = self.state.pane(Edge::Center) else {
            return;
        };
        let model = self.surface.box_model(center.element);
        let has_room = rect.width >= model.min_outer(Direction::Vertical)
            && rect.height >= model.min_outer(Direction::Horizontal);
        let status_changed = has_room == center.no_room;
        if !force && !status_changed && rect.floored() == center.outer {
            return;
        }

        if status_changed {
            if has_room {
                tracing::debug!("Center pane has room again");
            } else {
                tracing::warn!(
                    "No room for the center pane ({}x{})",
                    rect.width,
                    rect.height
                );
            }
        }
        if let Some(center) = self.state.pane_mut(Edge::Center) {
            center.no_room = !has_room;
            center.is_visible = has_room;
        }
        self.place_pane(Edge::Center);

        if has_room && self.state.initialized && !skip_callback {
            self.fire(LifecycleEvent::ResizeStart, Some(Edge::Center));
            self.emit(RenderCommand::RefreshContent { edge: Edge::Center });
            self.fire(LifecycleEvent::ResizeEnd, Some(Edge::Center));
        }
    }

    /// Shrink east then west toward their minimums so the center's minimum width fits
    fn recover_center_width(&mut self) {
        let min_width = solver::resolve_limit(
            self.config.center.min_width,
            self.state.container.inner_width,
        );
        if min_width <= 0 {
            return;
        }
        let mut missing = min_width - self.state.center_rect(&self.config).width;
        for edge in [Edge::East, Edge::West] {
            if missing <= 0 {
                break;
            }
            let Some(pane) = self.state.pane_mut(edge) else {
                continue;
            };
            if !pane.is_visible || pane.is_sliding {
                continue;
            }
            let shrunk = (pane.size - missing).max(pane.min_size);
            if shrunk >= pane.size {
                continue;
            }
            missing -= pane.size - shrunk;
            tracing::debug!("Shrinking {} to {} to fit the center", edge, shrunk);
            pane.size = shrunk;
            self.place_pane(edge);
        }
    }

    fn size_side(&mut self, edge: Edge, skip_callback: bool, force: bool) {
        let occ = self.state.occupancy(&self.config);
        let container = self.state.container;
        let Some(pane) = self.state.pane(edge) else {
            return;
        };
        if pane.is_closed {
            return;
        }
        let band = occ.middle_height(&container);
        let has_room = band >= self.surface.box_model(pane.element).min_outer(Direction::Horizontal);
        let rect = solver::pane_rect(edge, &container, pane.size, &occ).floored();
        let status_changed = has_room == pane.no_vertical_room;
        if !force && !status_changed && rect == pane.outer {
            return;
        }

        if status_changed {
            tracing::debug!("{} vertical room: {}", edge, has_room);
        }
        let sliding = pane.is_sliding;
        if let Some(pane) = self.state.pane_mut(edge) {
            pane.no_vertical_room = !has_room;
            pane.is_visible = has_room;
        }
        self.place_pane(edge);

        if has_room && !sliding && self.state.initialized && !skip_callback {
            self.fire(LifecycleEvent::ResizeStart, Some(edge));
            self.emit(RenderCommand::RefreshContent { edge });
            self.fire(LifecycleEvent::ResizeEnd, Some(edge));
        }
    }

    /// Position every resizer bar and toggler
    pub(crate) fn size_handles(&mut self) {
        let occ = self.state.occupancy(&self.config);
        let container = self.state.container;
        let mut commands = Vec::new();

        for edge in Edge::BORDERS {
            let (Some(pane), Some(options), Some(direction)) =
                (self.state.pane(edge), self.config.pane(edge), edge.direction())
            else {
                continue;
            };
            let closed = pane.is_closed;
            let thickness = options.spacing(closed);
            let shown = thickness > 0 && !pane.is_hidden && !pane.no_room && !pane.no_vertical_room;

            let resizer = shown.then(|| {
                let offset = if closed { 0 } else { pane.size };
                solver::resizer_rect(edge, &container, &occ, offset, thickness).floored()
            });
            let (length, align) = if closed {
                (options.toggler_length_closed, options.toggler_align_closed)
            } else {
                (options.toggler_length_open, options.toggler_align_open)
            };
            let toggler_hidden = length == 0
                || !options.closable
                || (pane.is_sliding && options.hide_toggler_on_slide);
            let toggler = resizer
                .filter(|_| !toggler_hidden)
                .map(|bar| solver::toggler_rect(bar, direction, length, align));

            commands.push((edge, resizer, toggler, closed, pane.is_sliding));
        }

        for (edge, resizer, toggler, closed, sliding) in commands {
            if let Some(pane) = self.state.pane_mut(edge) {
                pane.resizer = resizer;
                pane.toggler = toggler;
            }
            self.emit(RenderCommand::Handles {
                edge,
                resizer,
                toggler,
                closed,
                sliding,
            });
        }
    }
}
