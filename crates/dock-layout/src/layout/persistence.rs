// ABOUTME: Saving and restoring pane size, closed and hidden state through a StateStore.
// ABOUTME: Loaded state becomes the initial options, and is applied live once the layout exists.

use dock_core::{Edge, LayoutSnapshot, PaneSnapshot, SizeSpec, StateKey, StoreError};

use super::{CloseOptions, Layout, OpenOptions};
use crate::surface::Surface;

impl<S: Surface> Layout<S> {
    /// Current size, closed and hidden state of every border pane.
    ///
    /// A sliding pane counts as closed.
    pub fn state_snapshot(&self) -> LayoutSnapshot {
        let mut snapshot = LayoutSnapshot::new();
        for edge in Edge::BORDERS {
            let Some(pane) = self.state.pane(edge) else {
                continue;
            };
            *snapshot.pane_mut(edge) = PaneSnapshot {
                size: Some(pane.size),
                is_closed: Some(pane.is_closed || pane.is_sliding),
                is_hidden: Some(pane.is_hidden),
            };
        }
        snapshot
    }

    pub fn get_state(&self, keys: &[StateKey]) -> LayoutSnapshot {
        self.state_snapshot().filtered(keys)
    }

    /// Persist the configured state keys; without a store this does nothing
    pub fn save_state(&mut self) -> Result<(), StoreError> {
        let snapshot = self.get_state(&self.config.state.keys);
        let Some(store) = self.store.as_mut() else {
            return Ok(());
        };
        store.save(&snapshot)?;
        tracing::debug!("Saved state for {} keys", snapshot.keys().len());
        Ok(())
    }

    /// Read saved state and apply it; false when nothing was saved
    pub fn load_saved_state(&mut self) -> Result<bool, StoreError> {
        let Some(store) = self.store.as_ref() else {
            return Ok(false);
        };
        let Some(saved) = store.load()? else {
            return Ok(false);
        };
        let snapshot = saved.filtered(&self.config.state.keys);
        tracing::debug!("Loaded state for {} keys", snapshot.keys().len());
        self.load_state(&snapshot, false);
        Ok(true)
    }

    pub fn delete_saved_state(&mut self) -> Result<(), StoreError> {
        match self.store.as_mut() {
            Some(store) => store.delete(),
            None => Ok(()),
        }
    }

    /// Apply a snapshot.
    ///
    /// Values also replace the initial options, so a layout that is not yet
    /// initialized starts from them.
    pub fn load_state(&mut self, snapshot: &LayoutSnapshot, animate: bool) {
        for (&edge, saved) in &snapshot.panes {
            let Some(options) = self.config.pane_mut(edge) else {
                continue;
            };
            if let Some(size) = saved.size.filter(|&s| s > 0) {
                options.size = Some(SizeSpec::Pixels(size));
            }
            if let Some(closed) = saved.is_closed {
                options.init_closed = closed;
            }
            if let Some(hidden) = saved.is_hidden {
                options.init_hidden = hidden;
            }
        }

        if !self.state.initialized {
            return;
        }
        let no_animation = !animate;
        for (&edge, saved) in &snapshot.panes {
            if !self.state.has_pane(edge) {
                continue;
            }
            if let Some(size) = saved.size.filter(|&s| s > 0) {
                self.resize_pane(edge, size, false, false);
            }
            let hidden = self.state.pane(edge).is_some_and(|p| p.is_hidden);
            match (saved.is_hidden, saved.is_closed) {
                (Some(true), _) => self.hide(edge, no_animation),
                (_, Some(false)) if hidden => self.show(edge, true, no_animation),
                (_, Some(false)) => self.open(
                    edge,
                    OpenOptions {
                        no_animation,
                        ..OpenOptions::default()
                    },
                ),
                (_, Some(true)) if hidden => self.show(edge, false, no_animation),
                (_, Some(true)) => self.close(
                    edge,
                    CloseOptions {
                        no_animation,
                        ..CloseOptions::default()
                    },
                ),
                (Some(false), None) if hidden => self.show(edge, false, no_animation),
                _ => {}
            }
        }
    }
}
