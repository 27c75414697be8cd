// ABOUTME: Clock, pointer and keyboard input for a layout.
// ABOUTME: Timers complete animations, debounce container resizes, and delay sliding.

use std::time::{Duration, Instant};

use dock_core::{Edge, SlideCloseTrigger, SlideOpenTrigger};

use super::Layout;
use crate::input::{self, KeyInput, PointerKind, PointerTarget};
use crate::surface::Surface;
use crate::timers::TimerKey;

impl<S: Surface> Layout<S> {
    /// Run every timer due at or before `now`
    pub fn tick(&mut self, now: Instant) {
        while let Some(key) = self.timers.pop_due(now) {
            self.on_timer(key);
        }
        self.timers.settle(now);
    }

    pub fn advance(&mut self, elapsed: Duration) {
        let now = self.timers.now() + elapsed;
        self.tick(now);
    }

    fn on_timer(&mut self, key: TimerKey) {
        tracing::trace!("Timer fired: {:?}", key);
        match key {
            TimerKey::Transition(edge) => self.finish_transition(edge),
            TimerKey::SlideOpen(edge) => self.slide_open(edge),
            TimerKey::SlideClose(edge) => self.slide_close(edge),
            TimerKey::WindowResize => self.window_resize_settled(),
            TimerKey::ResizeRepeater => self.window_resize_repeat(),
        }
    }

    /// Route a pointer event on part of a pane
    pub fn pointer(&mut self, edge: Edge, target: PointerTarget, kind: PointerKind) {
        if !self.state.initialized {
            return;
        }
        if edge == Edge::Center {
            if kind == PointerKind::Click {
                self.close_sliders_on_click(None);
            }
            return;
        }
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return;
        };
        let closed = pane.is_closed;
        let hidden = pane.is_hidden;
        let sliding = pane.is_sliding;
        let slidable = options.slidable;
        let open_trigger = options.slide_trigger_open;
        let close_trigger = options.slide_trigger_close;
        let open_delay = options.slide_delay_open_ms;
        let dbl_click_toggle = options.resizer_dbl_click_toggle;

        if kind == PointerKind::Click {
            self.close_sliders_on_click(Some(edge));
        }

        match (target, kind) {
            (PointerTarget::Toggler, PointerKind::Click) => self.toggle(edge, false),
            (PointerTarget::Resizer, _) if closed && !hidden && slidable => {
                match (open_trigger, kind) {
                    (SlideOpenTrigger::Click, PointerKind::Click)
                    | (SlideOpenTrigger::DblClick, PointerKind::DoubleClick) => self.slide_open(edge),
                    (SlideOpenTrigger::MouseEnter, PointerKind::Enter) => {
                        if open_delay > 0 {
                            self.timers
                                .set(TimerKey::SlideOpen(edge), Duration::from_millis(open_delay));
                        } else {
                            self.slide_open(edge);
                        }
                    }
                    (_, PointerKind::Leave) => {
                        self.timers.clear(TimerKey::SlideOpen(edge));
                    }
                    _ => {}
                }
            }
            (PointerTarget::Resizer, PointerKind::DoubleClick)
                if !closed && !sliding && dbl_click_toggle =>
            {
                self.toggle(edge, false)
            }
            (_, PointerKind::Leave) if sliding && close_trigger == SlideCloseTrigger::MouseLeave => {
                self.schedule_slide_close(edge)
            }
            (_, PointerKind::Enter) if sliding && close_trigger == SlideCloseTrigger::MouseLeave => {
                self.timers.clear(TimerKey::SlideClose(edge));
            }
            _ => {}
        }
    }

    /// Clicking anywhere but a sliding pane closes it when it slides closed on click
    fn close_sliders_on_click(&mut self, clicked: Option<Edge>) {
        let targets: Vec<Edge> = Edge::BORDERS
            .into_iter()
            .filter(|&edge| Some(edge) != clicked)
            .filter(|&edge| {
                let sliding = self.state.pane(edge).is_some_and(|p| p.is_sliding);
                let on_click = self
                    .config
                    .pane(edge)
                    .is_some_and(|o| o.slide_trigger_close == SlideCloseTrigger::Click);
                sliding && on_click
            })
            .collect();
        for edge in targets {
            self.slide_close(edge);
        }
    }

    fn schedule_slide_close(&mut self, edge: Edge) {
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return;
        };
        if pane.is_closed || pane.is_resizing {
            return;
        }
        if options.prevent_quick_slide_close && self.state.is_busy() {
            return;
        }
        // still sliding open: give the animation time to finish
        let floor = if self.state.transitions.is_moving(edge) {
            1000
        } else {
            300
        };
        let delay = options.slide_delay_close_ms.max(floor);
        self.timers
            .set(TimerKey::SlideClose(edge), Duration::from_millis(delay));
    }

    /// Toggle the pane bound to a hotkey; false when the key is not a layout hotkey
    pub fn key(&mut self, input: KeyInput) -> bool {
        if !self.state.initialized {
            return false;
        }
        let Some(edge) = input::hotkey_target(&input, &self.config) else {
            return false;
        };
        let (Some(pane), Some(options)) = (self.state.pane(edge), self.config.pane(edge)) else {
            return false;
        };
        if !options.closable || pane.is_hidden {
            return false;
        }
        self.toggle(edge, false);
        true
    }
}
