// ABOUTME: Pane edges (north, south, east, west, center) and their sizing axes.
// ABOUTME: Border panes pair up with an opposite edge along the same axis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Orientation of a border pane's resizer bar.
///
/// Horizontal panes (north/south) span the container width and are sized by
/// height; vertical panes (east/west) sit in the middle band and are sized by width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    North,
    South,
    East,
    West,
    Center,
}

impl Edge {
    /// The four closable panes
    pub const BORDERS: [Edge; 4] = [Edge::North, Edge::South, Edge::East, Edge::West];

    /// Initialization order: north and south first so the middle band can be measured
    pub const ALL: [Edge; 5] = [Edge::North, Edge::South, Edge::West, Edge::East, Edge::Center];

    pub fn is_border(self) -> bool {
        self != Edge::Center
    }

    /// The border pane sharing this pane's axis, if any
    pub fn opposite(self) -> Option<Edge> {
        match self {
            Edge::North => Some(Edge::South),
            Edge::South => Some(Edge::North),
            Edge::East => Some(Edge::West),
            Edge::West => Some(Edge::East),
            Edge::Center => None,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Edge::North | Edge::South => Some(Direction::Horizontal),
            Edge::East | Edge::West => Some(Direction::Vertical),
            Edge::Center => None,
        }
    }

    /// True for panes anchored to the far side of their axis
    pub fn is_far_side(self) -> bool {
        matches!(self, Edge::South | Edge::East)
    }

    pub fn name(self) -> &'static str {
        match self {
            Edge::North => "north",
            Edge::South => "south",
            Edge::East => "east",
            Edge::West => "west",
            Edge::Center => "center",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown pane edge: {0}")]
pub struct UnknownEdge(pub String);

impl FromStr for Edge {
    type Err = UnknownEdge;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" => Ok(Edge::North),
            "south" => Ok(Edge::South),
            "east" => Ok(Edge::East),
            "west" => Ok(Edge::West),
            "center" => Ok(Edge::Center),
            _ => Err(UnknownEdge(s.to_string())),
        }
    }
}
