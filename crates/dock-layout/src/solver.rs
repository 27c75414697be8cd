// ABOUTME: Size constraint solver: pure functions from measured numbers to pane limits and rectangles.
// ABOUTME: No element access happens here; callers gather measurements first.

use dock_core::{Direction, Edge, SizeSpec, TogglerAlign, UNLIMITED_SIZE};

use crate::geometry::{ContainerDims, Rect};
use crate::pane::ResizerBounds;

/// Inputs for a border pane's resize limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitInput {
    /// Container inner size along the pane axis
    pub container_size: i32,
    pub spacing_open: i32,
    /// Sliding panes overlay the center and opposite pane, so ignore them
    pub sliding: bool,
    pub center_min: i32,
    /// Outer size of the opposite pane, 0 if absent, invisible or sliding
    pub alt_size: i32,
    /// Gutter of the opposite pane, 0 if absent or hidden
    pub alt_spacing: i32,
    pub min_option: i32,
    /// 0 means unlimited
    pub max_option: i32,
    /// Smallest outer size the pane's border and padding allow
    pub css_floor: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub min: i32,
    pub max: i32,
}

impl SizeLimits {
    pub fn fits(&self) -> bool {
        self.min <= self.max
    }

    pub fn clamp(&self, size: i32) -> i32 {
        size.min(self.max).max(self.min)
    }
}

pub fn size_limits(input: &LimitInput) -> SizeLimits {
    let reserved = if input.sliding {
        0
    } else {
        input.center_min + input.alt_size + input.alt_spacing
    };
    let limit = input.container_size - input.spacing_open - reserved;
    let max_option = if input.max_option > 0 {
        input.max_option
    } else {
        UNLIMITED_SIZE
    };
    SizeLimits {
        min: input.min_option.max(input.css_floor),
        max: max_option.min(limit),
    }
}

/// Translate size limits into absolute resizer offsets from the container's outer origin
pub fn resizer_bounds(
    edge: Edge,
    limits: SizeLimits,
    container: &ContainerDims,
    spacing_open: i32,
) -> ResizerBounds {
    let top = container.inset.top;
    let left = container.inset.left;
    let w = container.inner_width;
    let h = container.inner_height;
    match edge {
        Edge::North => ResizerBounds {
            min: top + limits.min,
            max: top + limits.max,
        },
        Edge::West => ResizerBounds {
            min: left + limits.min,
            max: left + limits.max,
        },
        Edge::South => ResizerBounds {
            min: top + h - limits.max - spacing_open,
            max: top + h - limits.min - spacing_open,
        },
        Edge::East => ResizerBounds {
            min: left + w - limits.max - spacing_open,
            max: left + w - limits.min - spacing_open,
        },
        Edge::Center => ResizerBounds::default(),
    }
}

/// Resolve a configured size against the space available on its axis.
///
/// `natural` is only invoked for `auto` sizes; it performs the measurement round-trip.
pub fn resolve_size(spec: SizeSpec, available: i32, natural: impl FnOnce() -> i32) -> i32 {
    match spec {
        SizeSpec::Pixels(px) if px >= 0 => px,
        SizeSpec::Ratio(r) => (available as f64 * r).floor() as i32,
        SizeSpec::Percent(p) => (available as f64 * p / 100.0).floor() as i32,
        SizeSpec::Pixels(_) | SizeSpec::Auto => natural(),
    }
}

/// Size limits have no natural size; `auto` means no limit
pub fn resolve_limit(spec: SizeSpec, available: i32) -> i32 {
    resolve_size(spec, available, || 0)
}

/// Space each border pane takes from the center, gutters included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Occupancy {
    pub north: i32,
    pub south: i32,
    pub east: i32,
    pub west: i32,
}

impl Occupancy {
    pub fn get(&self, edge: Edge) -> i32 {
        match edge {
            Edge::North => self.north,
            Edge::South => self.south,
            Edge::East => self.east,
            Edge::West => self.west,
            Edge::Center => 0,
        }
    }

    pub fn set(&mut self, edge: Edge, px: i32) {
        match edge {
            Edge::North => self.north = px,
            Edge::South => self.south = px,
            Edge::East => self.east = px,
            Edge::West => self.west = px,
            Edge::Center => {}
        }
    }

    /// Height of the band between north and south
    pub fn middle_height(&self, container: &ContainerDims) -> i32 {
        container.inner_height - self.north - self.south
    }
}

/// Center rectangle; extents may be negative when the border panes overfill the container
pub fn center_rect(container: &ContainerDims, occ: &Occupancy) -> Rect {
    Rect {
        x: container.inset.left + occ.west,
        y: container.inset.top + occ.north,
        width: container.inner_width - occ.west - occ.east,
        height: occ.middle_height(container),
    }
}

/// Rectangle of an open border pane of the given outer size
pub fn pane_rect(edge: Edge, container: &ContainerDims, size: i32, occ: &Occupancy) -> Rect {
    let inset = container.inset;
    let middle_top = inset.top + occ.north;
    let middle_height = occ.middle_height(container);
    match edge {
        Edge::North => Rect::new(inset.left, inset.top, container.inner_width, size),
        Edge::South => Rect::new(
            inset.left,
            inset.top + container.inner_height - size,
            container.inner_width,
            size,
        ),
        Edge::West => Rect::new(inset.left, middle_top, size, middle_height),
        Edge::East => Rect::new(
            inset.left + container.inner_width - size,
            middle_top,
            size,
            middle_height,
        ),
        Edge::Center => center_rect(container, occ),
    }
}

/// Resizer bar of a border pane; `offset` is the pane's displayed size (0 when closed)
pub fn resizer_rect(
    edge: Edge,
    container: &ContainerDims,
    occ: &Occupancy,
    offset: i32,
    thickness: i32,
) -> Rect {
    let inset = container.inset;
    let middle_top = inset.top + occ.north;
    let middle_height = occ.middle_height(container);
    match edge {
        Edge::North => Rect::new(inset.left, inset.top + offset, container.inner_width, thickness),
        Edge::South => Rect::new(
            inset.left,
            inset.top + container.inner_height - offset - thickness,
            container.inner_width,
            thickness,
        ),
        Edge::West => Rect::new(inset.left + offset, middle_top, thickness, middle_height),
        Edge::East => Rect::new(
            inset.left + container.inner_width - offset - thickness,
            middle_top,
            thickness,
            middle_height,
        ),
        Edge::Center => Rect::default(),
    }
}

/// Toggler placed along a resizer bar.
///
/// A length that is not positive or exceeds the bar spans the whole bar.
pub fn toggler_rect(resizer: Rect, direction: Direction, length: i32, align: TogglerAlign) -> Rect {
    let bar_length = match direction {
        Direction::Horizontal => resizer.width,
        Direction::Vertical => resizer.height,
    };
    let (length, offset) = if length <= 0 || length > bar_length {
        (bar_length, 0)
    } else {
        let offset = match align {
            TogglerAlign::Start => 0,
            TogglerAlign::End => bar_length - length,
            TogglerAlign::Center => (bar_length - length) / 2,
            TogglerAlign::Offset(px) if px >= 0 => px,
            TogglerAlign::Offset(px) => bar_length - length + px,
        };
        (length, offset)
    };
    match direction {
        Direction::Horizontal => Rect::new(resizer.x + offset, resizer.y, length, resizer.height),
        Direction::Vertical => Rect::new(resizer.x, resizer.y + offset, resizer.width, length),
    }
}
