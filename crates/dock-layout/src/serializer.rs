// ABOUTME: Transition serializer: at most one pane animates or drags at a time per layout.
// ABOUTME: Requests arriving while busy are chained behind the moving pane and replayed in order.

use std::collections::{BTreeMap, BTreeSet};

use dock_core::Edge;

/// How an open request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    Open,
    /// Un-hiding a hidden pane as open
    Show,
}

/// How a close request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseMode {
    Close,
    /// Closing on the way to hidden
    Hide,
    /// Un-hiding a hidden pane as closed
    ShowClosed,
}

/// A deferred open or close, with every argument it was issued with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Open {
        slide: bool,
        no_animation: bool,
        no_alert: bool,
        mode: OpenMode,
    },
    Close {
        force: bool,
        no_animation: bool,
        skip_callback: bool,
        mode: CloseMode,
    },
}

/// A request deferred until another pane finishes moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueuedRequest {
    pub edge: Edge,
    pub request: Request,
}

/// What the busy pane is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Opening { mode: OpenMode },
    Closing { mode: CloseMode, skip_callback: bool },
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InFlight {
    pub edge: Edge,
    pub motion: Motion,
}

/// Outcome of queueing a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    /// Will replay when `waiting_on` finishes
    Attached { waiting_on: Edge },
    /// Superseded an earlier request for the same pane
    Replaced { waiting_on: Edge },
    /// Nothing is moving, or the chain loops back on itself
    Dropped,
}

#[derive(Debug, Default)]
pub struct TransitionQueue {
    in_flight: Option<InFlight>,
    /// Keyed by the pane each request waits on
    pending: BTreeMap<Edge, QueuedRequest>,
}

impl TransitionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<InFlight> {
        self.in_flight
    }

    pub fn is_moving(&self, edge: Edge) -> bool {
        self.in_flight.is_some_and(|f| f.edge == edge)
    }

    pub fn begin(&mut self, edge: Edge, motion: Motion) {
        if let Some(previous) = self.in_flight {
            tracing::warn!(
                "Starting {:?} on {} while {} is still in flight",
                motion,
                edge,
                previous.edge
            );
        }
        self.in_flight = Some(InFlight { edge, motion });
    }

    /// Mark `edge` as done moving and hand back whatever was waiting on it
    pub fn finish(&mut self, edge: Edge) -> Option<QueuedRequest> {
        if self.is_moving(edge) {
            self.in_flight = None;
        }
        self.pending.remove(&edge)
    }

    /// Take the request waiting on `edge` without touching the in-flight pane
    pub fn take_waiting(&mut self, edge: Edge) -> Option<QueuedRequest> {
        self.pending.remove(&edge)
    }

    /// Queue a request behind the moving pane.
    ///
    /// Walks the chain of waiting requests from the moving pane until it finds a
    /// pane nobody waits on. A request for a pane that already has one queued
    /// replaces it, so only the most recent request per pane survives.
    pub fn enqueue(&mut self, edge: Edge, request: Request) -> Enqueued {
        let Some(moving) = self.in_flight else {
            return Enqueued::Dropped;
        };
        let queued = QueuedRequest { edge, request };
        let mut visited = BTreeSet::new();
        let mut current = moving.edge;
        loop {
            match self.pending.get(&current) {
                None => {
                    self.pending.insert(current, queued);
                    return Enqueued::Attached { waiting_on: current };
                }
                Some(existing) if existing.edge == edge => {
                    self.pending.insert(current, queued);
                    return Enqueued::Replaced { waiting_on: current };
                }
                Some(existing) => {
                    visited.insert(current);
                    let next = existing.edge;
                    if visited.contains(&next) {
                        tracing::debug!("Dropping {:?} for {}: queue chain loops", request, edge);
                        return Enqueued::Dropped;
                    }
                    current = next;
                }
            }
        }
    }

    pub fn pending_for(&self, edge: Edge) -> Option<&QueuedRequest> {
        self.pending.get(&edge)
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drop everything waiting on or targeting a pane that is going away
    pub fn forget(&mut self, edge: Edge) {
        self.pending
            .retain(|&waiting_on, queued| waiting_on != edge && queued.edge != edge);
        if self.is_moving(edge) {
            self.in_flight = None;
        }
    }

    pub fn clear(&mut self) {
        self.in_flight = None;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLOSE: Request = Request::Close {
        force: false,
        no_animation: false,
        skip_callback: false,
        mode: CloseMode::Close,
    };
    const OPEN: Request = Request::Open {
        slide: false,
        no_animation: false,
        no_alert: false,
        mode: OpenMode::Open,
    };

    #[test]
    fn nothing_queues_when_idle() {
        let mut queue = TransitionQueue::new();
        assert!(!queue.is_busy());
        assert_eq!(queue.enqueue(Edge::West, CLOSE), Enqueued::Dropped);
    }

    #[test]
    fn request_waits_on_moving_pane() {
        let mut queue = TransitionQueue::new();
        queue.begin(Edge::West, Motion::Opening { mode: OpenMode::Open });
        assert_eq!(
            queue.enqueue(Edge::West, CLOSE),
            Enqueued::Attached {
                waiting_on: Edge::West
            }
        );
        let replay = queue.finish(Edge::West).unwrap();
        assert_eq!(replay.edge, Edge::West);
        assert_eq!(replay.request, CLOSE);
        assert!(!queue.is_busy());
        assert!(queue.finish(Edge::West).is_none());
    }

    #[test]
    fn requests_chain_through_waiting_panes() {
        let mut queue = TransitionQueue::new();
        queue.begin(Edge::West, Motion::Opening { mode: OpenMode::Open });
        queue.enqueue(Edge::East, OPEN);
        assert_eq!(
            queue.enqueue(Edge::North, CLOSE),
            Enqueued::Attached {
                waiting_on: Edge::East
            }
        );
        assert_eq!(queue.pending_len(), 2);
    }

    #[test]
    fn latest_request_for_a_pane_wins() {
        let mut queue = TransitionQueue::new();
        queue.begin(Edge::West, Motion::Opening { mode: OpenMode::Open });
        queue.enqueue(Edge::East, OPEN);
        assert_eq!(
            queue.enqueue(Edge::East, CLOSE),
            Enqueued::Replaced {
                waiting_on: Edge::West
            }
        );
        assert_eq!(queue.pending_for(Edge::West).unwrap().request, CLOSE);
        assert_eq!(queue.pending_len(), 1);
    }

    #[test]
    fn looping_chain_is_dropped() {
        let mut queue = TransitionQueue::new();
        queue.begin(Edge::West, Motion::Dragging);
        queue.enqueue(Edge::East, OPEN);
        queue.enqueue(Edge::West, CLOSE);
        // west waits on nothing new: chain is west -> east -> west
        assert_eq!(queue.enqueue(Edge::North, OPEN), Enqueued::Dropped);
    }

    #[test]
    fn waiting_request_can_be_taken_while_idle() {
        let mut queue = TransitionQueue::new();
        queue.begin(Edge::West, Motion::Opening { mode: OpenMode::Open });
        queue.enqueue(Edge::East, CLOSE);
        queue.enqueue(Edge::North, OPEN);
        let east = queue.finish(Edge::West).unwrap();
        assert_eq!(east.edge, Edge::East);

        // east never started moving, so north is still chained behind it
        assert!(!queue.is_busy());
        let north = queue.take_waiting(Edge::East).unwrap();
        assert_eq!(north.edge, Edge::North);
        assert_eq!(queue.pending_len(), 0);
    }

    #[test]
    fn forget_removes_requests_for_removed_pane() {
        let mut queue = TransitionQueue::new();
        queue.begin(Edge::West, Motion::Opening { mode: OpenMode::Open });
        queue.enqueue(Edge::South, OPEN);
        queue.forget(Edge::South);
        assert_eq!(queue.pending_len(), 0);
        assert!(queue.is_busy());
    }
}
