//! Pager-local geometry and the mapping from real screen coordinates into
//! miniature workspace cells.
//!
//! All coordinates are signed: pointer positions keep flowing while a drag
//! leaves the pager, and dragged windows may be drawn partially outside it.

use crate::constants::MIN_WINDOW_EXTENT;

/// A position in pager-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset of `self` relative to `origin`.
    pub fn relative_to(self, origin: Point) -> Point {
        Point {
            x: self.x.saturating_sub(origin.x),
            y: self.y.saturating_sub(origin.y),
        }
    }
}

/// Width and height pair. Used for the real screen, the pager allocation
/// and popup menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Signed rectangle with its origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PagerRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PagerRect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn contains(&self, point: Point) -> bool {
        rect_contains(*self, point)
    }

    pub fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }
}

/// Half-open containment test: the left and top edges are inside, the right
/// and bottom edges are not. Empty rectangles contain nothing.
pub fn rect_contains(rect: PagerRect, point: Point) -> bool {
    if rect.width <= 0 || rect.height <= 0 {
        return false;
    }
    let x = i64::from(point.x);
    let y = i64::from(point.y);
    x >= i64::from(rect.x) && x < rect.right() && y >= i64::from(rect.y) && y < rect.bottom()
}

/// Grow a rectangle so both edges are at least [`MIN_WINDOW_EXTENT`].
///
/// Applying it twice yields the same rectangle as applying it once.
pub fn clamp_min_extent(rect: PagerRect) -> PagerRect {
    PagerRect {
        width: rect.width.max(MIN_WINDOW_EXTENT),
        height: rect.height.max(MIN_WINDOW_EXTENT),
        ..rect
    }
}

/// Scale a window's real-screen geometry into a workspace cell.
///
/// Each component is multiplied by the cell/screen ratio of its axis and
/// truncated toward zero, then offset by the cell origin. The result is
/// clamped with [`clamp_min_extent`] so degenerate windows stay visible and
/// clickable. A zero-sized screen collapses every window onto the cell
/// origin.
pub fn map_window_to_cell(window: PagerRect, screen: Size, cell: PagerRect) -> PagerRect {
    let width_ratio = axis_ratio(cell.width, screen.width);
    let height_ratio = axis_ratio(cell.height, screen.height);

    let scale = |value: i32, ratio: f64| (f64::from(value) * ratio) as i32;

    let mapped = PagerRect {
        x: scale(window.x, width_ratio).saturating_add(cell.x),
        y: scale(window.y, height_ratio).saturating_add(cell.y),
        width: scale(window.width, width_ratio),
        height: scale(window.height, height_ratio),
    };
    clamp_min_extent(mapped)
}

fn axis_ratio(cell: i32, screen: i32) -> f64 {
    if screen <= 0 {
        return 0.0;
    }
    f64::from(cell) / f64::from(screen)
}

/// Whether the pointer has travelled further than `threshold` from `start`
/// along either axis.
pub fn exceeds_threshold(start: Point, current: Point, threshold: i32) -> bool {
    let dx = (i64::from(current.x) - i64::from(start.x)).abs();
    let dy = (i64::from(current.y) - i64::from(start.y)).abs();
    let threshold = i64::from(threshold);
    dx > threshold || dy > threshold
}
