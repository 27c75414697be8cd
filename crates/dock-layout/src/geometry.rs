// ABOUTME: Pixel geometry shared by the solver and the render collaborator.
// ABOUTME: Rectangles, insets, container dimensions, and box-model size conversion.

use dock_core::Direction;

/// Rectangle in container pixel coordinates (outer box, relative to the container's outer origin)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same rectangle with negative extents clamped to zero
    pub fn floored(self) -> Self {
        Self {
            width: self.width.max(0),
            height: self.height.max(0),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Extent along the axis a pane of this direction is sized on
    pub fn extent(&self, direction: Direction) -> i32 {
        match direction {
            Direction::Horizontal => self.height,
            Direction::Vertical => self.width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Insets {
    pub fn uniform(px: i32) -> Self {
        Self {
            top: px,
            bottom: px,
            left: px,
            right: px,
        }
    }

    pub fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> i32 {
        self.top + self.bottom
    }

    /// Total inset along the axis a pane of this direction is sized on
    pub fn along(&self, direction: Direction) -> i32 {
        match direction {
            Direction::Horizontal => self.vertical(),
            Direction::Vertical => self.horizontal(),
        }
    }
}

/// Measured container geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerDims {
    pub inner_width: i32,
    pub inner_height: i32,
    /// Border plus padding on each side
    pub inset: Insets,
    /// False while the container (or an ancestor) is not displayed
    pub visible: bool,
}

impl ContainerDims {
    pub fn new(inner_width: i32, inner_height: i32) -> Self {
        Self {
            inner_width,
            inner_height,
            inset: Insets::default(),
            visible: true,
        }
    }

    pub fn with_inset(mut self, inset: Insets) -> Self {
        self.inset = inset;
        self
    }

    pub fn outer_width(&self) -> i32 {
        self.inner_width + self.inset.horizontal()
    }

    pub fn outer_height(&self) -> i32 {
        self.inner_height + self.inset.vertical()
    }

    /// Inner size along the axis a pane of this direction is sized on
    pub fn inner(&self, direction: Direction) -> i32 {
        match direction {
            Direction::Horizontal => self.inner_height,
            Direction::Vertical => self.inner_width,
        }
    }

    pub fn same_inner_size(&self, other: &ContainerDims) -> bool {
        self.inner_width == other.inner_width && self.inner_height == other.inner_height
    }
}

/// Border and padding of an element, used to convert outer sizes to style sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoxModel {
    pub border: Insets,
    pub padding: Insets,
    /// Style sizes include border and padding
    pub border_box: bool,
}

impl BoxModel {
    /// Border plus padding along a pane axis
    pub fn chrome(&self, direction: Direction) -> i32 {
        self.border.along(direction) + self.padding.along(direction)
    }

    /// Style size that yields the given outer size
    pub fn css_size(&self, outer: i32, direction: Direction) -> i32 {
        if self.border_box {
            outer
        } else {
            outer - self.chrome(direction)
        }
    }

    /// Smallest outer size that still leaves one pixel of content
    pub fn min_outer(&self, direction: Direction) -> i32 {
        self.chrome(direction) + 1
    }
}
