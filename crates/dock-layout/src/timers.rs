// ABOUTME: Deterministic timer scheduler driven by the embedder's clock.
// ABOUTME: Covers resize debouncing, slide delays, and animation completion.

use std::time::{Duration, Instant};

use dock_core::Edge;

/// One named timer slot; setting a key again replaces its deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerKey {
    /// Debounced container resize
    WindowResize,
    /// Forced re-layout during continuous container resizing
    ResizeRepeater,
    SlideOpen(Edge),
    SlideClose(Edge),
    /// Open/close animation completion
    Transition(Edge),
}

#[derive(Debug)]
pub struct Scheduler {
    now: Instant,
    entries: Vec<(TimerKey, Instant)>,
}

impl Scheduler {
    pub fn new(now: Instant) -> Self {
        Self {
            now,
            entries: Vec::new(),
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn set(&mut self, key: TimerKey, delay: Duration) {
        self.clear(key);
        self.entries.push((key, self.now + delay));
    }

    pub fn clear(&mut self, key: TimerKey) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| *k != key);
        before != self.entries.len()
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_set(&self, key: TimerKey) -> bool {
        self.entries.iter().any(|(k, _)| *k == key)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|(_, at)| *at).min()
    }

    /// Remove and return the earliest timer due at or before `until`.
    ///
    /// The clock moves to that timer's deadline, so timers set from its
    /// handler are scheduled relative to when it fired.
    pub fn pop_due(&mut self, until: Instant) -> Option<TimerKey> {
        let (index, &(key, at)) = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, (_, at))| *at <= until)
            .min_by_key(|(_, (_, at))| *at)?;
        self.entries.remove(index);
        if at > self.now {
            self.now = at;
        }
        Some(key)
    }

    /// Move the clock forward once every due timer has been handled
    pub fn settle(&mut self, until: Instant) {
        if until > self.now {
            self.now = until;
        }
    }
}
