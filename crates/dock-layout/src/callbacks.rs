// ABOUTME: Typed lifecycle callbacks registered per layout or per pane.
// ABOUTME: Start callbacks may cancel the operation they announce.

use dock_core::Edge;

use crate::pane::PaneState;
use crate::state::LayoutState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    LoadStart,
    LoadEnd,
    UnloadStart,
    UnloadEnd,
    ResizeAllStart,
    ResizeAllEnd,
    OpenStart,
    OpenEnd,
    CloseStart,
    CloseEnd,
    ShowStart,
    ShowEnd,
    HideStart,
    HideEnd,
    ResizeStart,
    ResizeEnd,
    SwapStart,
    SwapEnd,
    DragStart,
    DragEnd,
}

impl LifecycleEvent {
    /// Events whose handlers can veto the operation.
    ///
    /// `DragEnd` vetoes the final resize; unloading and resizing cannot be stopped.
    pub fn is_cancellable(self) -> bool {
        matches!(
            self,
            LifecycleEvent::LoadStart
                | LifecycleEvent::ResizeAllStart
                | LifecycleEvent::OpenStart
                | LifecycleEvent::CloseStart
                | LifecycleEvent::ShowStart
                | LifecycleEvent::HideStart
                | LifecycleEvent::SwapStart
                | LifecycleEvent::DragStart
                | LifecycleEvent::DragEnd
        )
    }
}

/// Handler verdict; only honored for cancellable events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Cancel,
}

/// What a handler gets to look at
pub struct CallbackContext<'a> {
    pub event: LifecycleEvent,
    /// Pane the event concerns; `None` for layout-wide events
    pub edge: Option<Edge>,
    pub pane: Option<&'a PaneState>,
    pub layout: &'a LayoutState,
    /// Layout name
    pub name: &'a str,
}

pub type Handler = Box<dyn FnMut(&CallbackContext<'_>) -> Flow>;

struct Registration {
    event: LifecycleEvent,
    /// Only fire for this pane
    edge: Option<Edge>,
    handler: Handler,
}

#[derive(Default)]
pub struct CallbackRegistry {
    registrations: Vec<Registration>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register for an event on any pane (or the layout itself)
    pub fn on(&mut self, event: LifecycleEvent, handler: Handler) {
        self.registrations.push(Registration {
            event,
            edge: None,
            handler,
        });
    }

    /// Register for an event on one pane only
    pub fn on_pane(&mut self, edge: Edge, event: LifecycleEvent, handler: Handler) {
        self.registrations.push(Registration {
            event,
            edge: Some(edge),
            handler,
        });
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Run every matching handler in registration order.
    ///
    /// All handlers run even after one cancels; the result is `Cancel` if any
    /// did and the event is cancellable.
    pub fn fire(&mut self, ctx: &CallbackContext<'_>) -> Flow {
        let mut flow = Flow::Continue;
        for reg in self.registrations.iter_mut() {
            if reg.event != ctx.event {
                continue;
            }
            if reg.edge.is_some() && reg.edge != ctx.edge {
                continue;
            }
            if (reg.handler)(ctx) == Flow::Cancel {
                flow = Flow::Cancel;
            }
        }
        if flow == Flow::Cancel && !ctx.event.is_cancellable() {
            tracing::debug!("Ignoring cancel from {:?} handler", ctx.event);
            return Flow::Continue;
        }
        flow
    }
}

impl std::fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("registrations", &self.registrations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn ctx<'a>(layout: &'a LayoutState, event: LifecycleEvent, edge: Option<Edge>) -> CallbackContext<'a> {
        CallbackContext {
            event,
            edge,
            pane: None,
            layout,
            name: "test",
        }
    }

    #[test]
    fn pane_filter_limits_handlers() {
        let layout = LayoutState::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = CallbackRegistry::new();

        let log = seen.clone();
        registry.on(
            LifecycleEvent::OpenEnd,
            Box::new(move |c| {
                log.borrow_mut().push(("any", c.edge));
                Flow::Continue
            }),
        );
        let log = seen.clone();
        registry.on_pane(
            Edge::West,
            LifecycleEvent::OpenEnd,
            Box::new(move |c| {
                log.borrow_mut().push(("west", c.edge));
                Flow::Continue
            }),
        );

        registry.fire(&ctx(&layout, LifecycleEvent::OpenEnd, Some(Edge::East)));
        registry.fire(&ctx(&layout, LifecycleEvent::OpenEnd, Some(Edge::West)));
        registry.fire(&ctx(&layout, LifecycleEvent::CloseEnd, Some(Edge::West)));

        assert_eq!(
            *seen.borrow(),
            vec![
                ("any", Some(Edge::East)),
                ("any", Some(Edge::West)),
                ("west", Some(Edge::West)),
            ]
        );
    }

    #[test]
    fn cancel_only_counts_for_start_events() {
        let layout = LayoutState::default();
        let mut registry = CallbackRegistry::new();
        registry.on(LifecycleEvent::CloseStart, Box::new(|_| Flow::Cancel));
        registry.on(LifecycleEvent::ResizeStart, Box::new(|_| Flow::Cancel));

        assert_eq!(
            registry.fire(&ctx(&layout, LifecycleEvent::CloseStart, Some(Edge::South))),
            Flow::Cancel
        );
        assert_eq!(
            registry.fire(&ctx(&layout, LifecycleEvent::ResizeStart, Some(Edge::South))),
            Flow::Continue
        );
        assert_eq!(
            registry.fire(&ctx(&layout, LifecycleEvent::OpenStart, Some(Edge::South))),
            Flow::Continue
        );
    }
}
