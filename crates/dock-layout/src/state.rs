// ABOUTME: Layout-wide runtime state: measured container, pane states, and the transition queue.
// ABOUTME: Read-only views of it are handed to lifecycle callbacks.

use std::collections::BTreeMap;

use dock_core::{Edge, LayoutConfig};

use crate::geometry::{ContainerDims, Rect};
use crate::pane::PaneState;
use crate::serializer::TransitionQueue;
use crate::solver::{self, Occupancy};

#[derive(Debug, Default)]
pub struct LayoutState {
    /// Last measured container geometry
    pub container: ContainerDims,
    pub panes: BTreeMap<Edge, PaneState>,
    pub transitions: TransitionQueue,
    pub initialized: bool,
    /// True while the initial layout pass runs
    pub creating: bool,
}

impl LayoutState {
    pub fn pane(&self, edge: Edge) -> Option<&PaneState> {
        self.panes.get(&edge)
    }

    pub fn pane_mut(&mut self, edge: Edge) -> Option<&mut PaneState> {
        self.panes.get_mut(&edge)
    }

    pub fn has_pane(&self, edge: Edge) -> bool {
        self.panes.contains_key(&edge)
    }

    pub fn is_busy(&self) -> bool {
        self.transitions.is_busy()
    }

    /// Space taken from the center by each border pane present
    pub fn occupancy(&self, config: &LayoutConfig) -> Occupancy {
        let mut occ = Occupancy::default();
        for edge in Edge::BORDERS {
            if let (Some(pane), Some(options)) = (self.panes.get(&edge), config.pane(edge)) {
                occ.set(edge, pane.occupied(options));
            }
        }
        occ
    }

    /// Where the center pane goes given the current border panes
    pub fn center_rect(&self, config: &LayoutConfig) -> Rect {
        solver::center_rect(&self.container, &self.occupancy(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::ElementId;

    #[test]
    fn occupancy_skips_missing_panes() {
        let config = LayoutConfig::default();
        let mut state = LayoutState {
            container: ContainerDims::new(800, 600),
            ..LayoutState::default()
        };
        state
            .panes
            .insert(Edge::West, PaneState::border(Edge::West, ElementId(1), 200));
        let mut north = PaneState::border(Edge::North, ElementId(2), 40);
        north.is_closed = true;
        state.panes.insert(Edge::North, north);

        let occ = state.occupancy(&config);
        assert_eq!(occ.west, 206);
        assert_eq!(occ.north, 6);
        assert_eq!(occ.east, 0);
        assert_eq!(state.center_rect(&config), Rect::new(206, 6, 594, 594));
    }
}
