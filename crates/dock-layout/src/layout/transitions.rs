// ABOUTME: Pane state transitions: open, close, hide, show, toggle and sliding.
// ABOUTME: Requests made while another pane is moving go through the transition queue.

use dock_core::{Direction, Edge};

use super::sizing::MidPanes;
use super::{CloseOptions, Layout, OpenOptions};
use crate::callbacks::{Flow, LifecycleEvent};
use crate::serializer::{CloseMode, Enqueued, InFlight, Motion, OpenMode, QueuedRequest, Request};
use crate::surface::{RenderCommand, Surface};
use crate::timers::TimerKey;

impl<S: Surface> Layout<S> {
    /// Open a closed or hidden pane, or pin a sliding one
    pub fn open(&mut self, edge: Edge, options: OpenOptions) {
        self.open_pane(
            edge,
            options.slide,
            options.no_animation,
            options.no_alert,
            OpenMode::Open,
        );
    }

    pub fn close(&mut self, edge: Edge, options: CloseOptions) {
        self.close_pane(
            edge,
            options.force,
            options.no_animation,
            options.skip_callback,
            CloseMode::Close,
        );
    }

    pub fn toggle(&mut self, edge: Edge, slide: bool) {
        let Some(pane) = self.state.pane(edge).filter(|_| edge.is_border()) else {
            return;
        };
        if pane.is_hidden {
            self.show(edge, true, false);
        } else if pane.is_closed {
            self.open(
                edge,
                OpenOptions {
                    slide,
                    ..OpenOptions::default()
                },
            );
        } else {
            self.close(edge, CloseOptions::default());
        }
    }

    /// Remove a pane and its resizer from the layout entirely
    pub fn hide(&mut self, edge: Edge, no_animation: bool) {
        let Some(pane) = self.state.pane(edge).filter(|_| edge.is_border()) else {
            return;
        };
        if pane.is_hidden {
            return;
        }
        let initialized = self.state.initialized;
        if initialized {
            if self.state.is_busy() {
                self.queue(
                    edge,
                    Request::Close {
                        force: false,
                        no_animation,
                        skip_callback: false,
                        mode: CloseMode::Hide,
                    },
                );
                return;
            }
            if self.fire(LifecycleEvent::HideStart, Some(edge)) == Flow::Cancel {
                return;
            }
        }

        let closed = self.state.pane(edge).is_some_and(|p| p.is_closed);
        if initialized && !closed {
            self.close_pane(edge, false, no_animation, false, CloseMode::Hide);
            return;
        }

        self.timers.clear(TimerKey::SlideClose(edge));
        if let Some(pane) = self.state.pane_mut(edge) {
            pane.is_closed = true;
            pane.is_hidden = true;
            pane.is_visible = false;
            pane.is_sliding = false;
        }
        self.place_pane(edge);
        if initialized {
            self.size_mid_panes(MidPanes::after(edge), false, false);
            self.size_handles();
            self.fire(LifecycleEvent::HideEnd, Some(edge));
        }
    }

    /// Bring a hidden pane back, open or closed
    pub fn show(&mut self, edge: Edge, open: bool, no_animation: bool) {
        let Some(pane) = self.state.pane(edge).filter(|_| edge.is_border()) else {
            return;
        };
        if !pane.is_hidden {
            return;
        }
        if !self.state.initialized {
            if let Some(pane) = self.state.pane_mut(edge) {
                pane.is_hidden = false;
                pane.is_closed = !open;
                pane.is_visible = open;
            }
            self.place_pane(edge);
            return;
        }
        if self.state.is_busy() {
            let request = if open {
                Request::Open {
                    slide: false,
                    no_animation,
                    no_alert: false,
                    mode: OpenMode::Show,
                }
            } else {
                Request::Close {
                    force: true,
                    no_animation,
                    skip_callback: false,
                    mode: CloseMode::ShowClosed,
                }
            };
            self.queue(edge, request);
            return;
        }
        if self.fire(LifecycleEvent::ShowStart, Some(edge)) == Flow::Cancel {
            return;
        }
        if open {
            self.open_pane(edge, false, no_animation, false, OpenMode::Show);
        } else {
            self.close_pane(edge, true, no_animation, false, CloseMode::ShowClosed);
        }
    }

    /// Open a closed pane as an overlay
    pub fn slide_open(&mut self, edge: Edge) {
        self.timers.clear(TimerKey::SlideOpen(edge));
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return;
        };
        if !self.state.initialized
            || !options.slidable
            || !pane.is_closed
            || pane.is_hidden
            || self.state.transitions.is_moving(edge)
        {
            return;
        }
        self.open(edge, OpenOptions::slide());
    }

    pub fn slide_close(&mut self, edge: Edge) {
        self.timers.clear(TimerKey::SlideClose(edge));
        let Some(pane) = self.state.pane(edge) else {
            return;
        };
        if pane.is_closed || pane.is_resizing {
            return;
        }
        self.close(edge, CloseOptions::default());
    }

    pub fn slide_toggle(&mut self, edge: Edge) {
        match self.state.pane(edge) {
            Some(pane) if pane.is_closed => self.slide_open(edge),
            Some(_) => self.slide_close(edge),
            None => {}
        }
    }

    pub(crate) fn open_pane(
        &mut self,
        edge: Edge,
        slide: bool,
        no_animation: bool,
        no_alert: bool,
        mode: OpenMode,
    ) {
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            tracing::debug!("Ignoring open for missing pane {}", edge);
            return;
        };
        let showing = mode == OpenMode::Show;

        if !self.state.initialized {
            if let Some(pane) = self.state.pane_mut(edge) {
                pane.is_closed = false;
                pane.is_visible = true;
                if showing {
                    pane.is_hidden = false;
                }
            }
            self.place_pane(edge);
            return;
        }
        if !options.resizable && !options.closable && !showing {
            tracing::debug!("{} can neither resize nor close; not opening", edge);
            return;
        }
        if !pane.is_closed && (!pane.is_sliding || slide) {
            return;
        }
        if pane.is_hidden && !showing {
            self.show(edge, true, no_animation);
            return;
        }
        if self.state.is_busy() {
            self.queue(
                edge,
                Request::Open {
                    slide,
                    no_animation,
                    no_alert,
                    mode,
                },
            );
            return;
        }

        let was_sliding = pane.is_sliding;
        // OpenStart handlers see current limits; recomputed below after they run
        self.compute_limits(edge, slide);
        if self.fire(LifecycleEvent::OpenStart, Some(edge)) == Flow::Cancel {
            return;
        }
        let Some(limits) = self.compute_limits(edge, slide) else {
            return;
        };
        if !limits.fits() {
            let tip = self
                .config
                .pane(edge)
                .map(|o| o.no_room_to_open_tip.clone())
                .unwrap_or_default();
            if !no_alert && self.config.show_notices && !tip.is_empty() {
                self.emit(RenderCommand::Notice { edge, message: tip });
            }
            tracing::warn!(
                "Not enough room to open {}: min {} exceeds max {}",
                edge,
                limits.min,
                limits.max
            );
            return;
        }

        self.state
            .transitions
            .begin(edge, Motion::Opening { mode });
        if let Some(pane) = self.state.pane_mut(edge) {
            pane.is_sliding = slide;
            pane.no_room = false;
        }
        if !slide {
            self.timers.clear(TimerKey::SlideClose(edge));
        }
        self.make_pane_fit(edge, false, false);

        if let Some(pane) = self.state.pane_mut(edge) {
            pane.is_closed = false;
            pane.is_visible = true;
            if showing {
                pane.is_hidden = false;
            }
        }
        tracing::debug!("Opening {} (slide: {})", edge, slide);
        self.place_pane(edge);

        if no_animation || was_sliding || !self.start_animation(edge, true) {
            self.finish_open(edge);
        }
    }

    pub(crate) fn close_pane(
        &mut self,
        edge: Edge,
        force: bool,
        no_animation: bool,
        skip_callback: bool,
        mode: CloseMode,
    ) {
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            tracing::debug!("Ignoring close for missing pane {}", edge);
            return;
        };
        let hiding = mode == CloseMode::Hide;
        let showing = mode == CloseMode::ShowClosed;

        if !self.state.initialized {
            if let Some(pane) = self.state.pane_mut(edge) {
                pane.is_closed = true;
                pane.is_visible = false;
                pane.is_sliding = false;
                if hiding {
                    pane.is_hidden = true;
                } else if showing {
                    pane.is_hidden = false;
                }
            }
            self.place_pane(edge);
            return;
        }
        if !options.closable && !showing && !hiding {
            tracing::debug!("{} is not closable", edge);
            return;
        }
        if !force && pane.is_closed && !showing {
            return;
        }
        if self.state.is_busy() {
            self.queue(
                edge,
                Request::Close {
                    force,
                    no_animation,
                    skip_callback,
                    mode,
                },
            );
            return;
        }
        let was_sliding = pane.is_sliding;
        if !showing && self.fire(LifecycleEvent::CloseStart, Some(edge)) == Flow::Cancel {
            return;
        }

        self.state.transitions.begin(
            edge,
            Motion::Closing {
                mode,
                skip_callback,
            },
        );
        if let Some(pane) = self.state.pane_mut(edge) {
            pane.is_closed = true;
            pane.is_visible = false;
            pane.is_sliding = false;
            pane.no_vertical_room = false;
            if hiding {
                pane.is_hidden = true;
            } else if showing {
                pane.is_hidden = false;
            }
        }
        tracing::debug!("Closing {} ({:?})", edge, mode);

        if was_sliding {
            self.timers.clear(TimerKey::SlideClose(edge));
        }
        if !was_sliding || hiding {
            self.size_mid_panes(MidPanes::after(edge), false, false);
        }
        self.size_handles();

        if no_animation || showing || !self.start_animation(edge, false) {
            self.finish_close(edge);
        }
    }

    /// Emit an animation and schedule its completion; false when the pane does not animate
    fn start_animation(&mut self, edge: Edge, opening: bool) -> bool {
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return false;
        };
        let fx = &options.fx;
        if !fx.animates(opening) {
            return false;
        }
        let duration = fx.duration_for(opening);
        let command = RenderCommand::Animate {
            edge,
            element: pane.element,
            effect: fx.effect_for(opening),
            easing: fx.easing.clone(),
            duration,
            opening,
        };
        self.emit(command);
        self.timers.set(TimerKey::Transition(edge), duration);
        true
    }

    /// Animation timer fired for `edge`
    pub(crate) fn finish_transition(&mut self, edge: Edge) {
        match self.state.transitions.in_flight() {
            Some(InFlight {
                edge: moving,
                motion: Motion::Opening { .. },
            }) if moving == edge => self.finish_open(edge),
            Some(InFlight {
                edge: moving,
                motion: Motion::Closing { .. },
            }) if moving == edge => self.finish_close(edge),
            _ => tracing::debug!("Stale transition timer for {}", edge),
        }
    }

    fn finish_open(&mut self, edge: Edge) {
        let Some(InFlight {
            edge: moving,
            motion: Motion::Opening { mode },
        }) = self.state.transitions.in_flight()
        else {
            return;
        };
        if moving != edge {
            return;
        }
        let queued = self.state.transitions.finish(edge);

        if let Some(pane) = self.state.pane(edge).filter(|p| !p.is_closed) {
            if !pane.is_sliding {
                if edge.direction() == Some(Direction::Vertical) {
                    self.size_mid_panes(MidPanes::One(edge), false, false);
                }
                self.size_mid_panes(MidPanes::after(edge), false, false);
            }
            self.size_handles();
            self.emit(RenderCommand::RefreshContent { edge });
            self.fire(LifecycleEvent::OpenEnd, Some(edge));
            if mode == OpenMode::Show {
                self.fire(LifecycleEvent::ShowEnd, Some(edge));
            }
            self.fire(LifecycleEvent::ResizeEnd, Some(edge));
        }

        if let Some(queued) = queued {
            self.replay(queued);
        }
    }

    fn finish_close(&mut self, edge: Edge) {
        let Some(InFlight {
            edge: moving,
            motion: Motion::Closing {
                mode,
                skip_callback,
            },
        }) = self.state.transitions.in_flight()
        else {
            return;
        };
        if moving != edge {
            return;
        }
        let queued = self.state.transitions.finish(edge);
        self.place_pane(edge);

        if self.state.pane(edge).is_some_and(|p| p.is_closed) {
            // the space this pane gave up may fit an auto-collapsed opposite pane
            if let Some(alt) = edge.opposite() {
                if self.state.pane(alt).is_some_and(|p| p.no_room) {
                    self.make_pane_fit(alt, false, false);
                }
            }
            if !skip_callback {
                match mode {
                    CloseMode::Close => {
                        self.fire(LifecycleEvent::CloseEnd, Some(edge));
                    }
                    CloseMode::Hide => {
                        self.fire(LifecycleEvent::CloseEnd, Some(edge));
                        self.fire(LifecycleEvent::HideEnd, Some(edge));
                    }
                    CloseMode::ShowClosed => {
                        self.fire(LifecycleEvent::ShowEnd, Some(edge));
                    }
                }
            }
        }

        if let Some(queued) = queued {
            self.replay(queued);
        }
    }

    pub(crate) fn queue(&mut self, edge: Edge, request: Request) {
        match self.state.transitions.enqueue(edge, request) {
            Enqueued::Attached { waiting_on } | Enqueued::Replaced { waiting_on } => {
                tracing::debug!("Queued {:?} for {} behind {}", request, edge, waiting_on);
            }
            Enqueued::Dropped => {
                tracing::debug!("Dropped {:?} for {}", request, edge);
            }
        }
    }

    /// Run a request that was waiting, then anything chained behind it that
    /// would otherwise be stranded because the replay did not start a motion
    pub(crate) fn replay(&mut self, queued: QueuedRequest) {
        let mut next = Some(queued);
        while let Some(queued) = next {
            self.replay_one(queued);
            next = if self.state.is_busy() {
                None
            } else {
                self.state.transitions.take_waiting(queued.edge)
            };
        }
    }

    fn replay_one(&mut self, queued: QueuedRequest) {
        let edge = queued.edge;
        tracing::debug!("Replaying {:?} for {}", queued.request, edge);
        match queued.request {
            Request::Open {
                slide,
                no_animation,
                no_alert,
                mode: OpenMode::Open,
            } => self.open_pane(edge, slide, no_animation, no_alert, OpenMode::Open),
            Request::Open {
                no_animation,
                mode: OpenMode::Show,
                ..
            } => self.show(edge, true, no_animation),
            Request::Close {
                force,
                no_animation,
                skip_callback,
                mode: CloseMode::Close,
            } => self.close_pane(edge, force, no_animation, skip_callback, CloseMode::Close),
            Request::Close {
                no_animation,
                mode: CloseMode::Hide,
                ..
            } => self.hide(edge, no_animation),
            Request::Close {
                no_animation,
                mode: CloseMode::ShowClosed,
                ..
            } => self.show(edge, false, no_animation),
        }
    }
}
