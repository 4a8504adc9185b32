//! Shared crate-wide constants.

/// Default edge length of a workspace cell along the axis the rows are
/// stacked on. The other edge follows the real screen's aspect ratio.
pub const DEFAULT_CELL_SIZE: i32 = 48;

/// Smallest width and height a miniature window is given once scaled into
/// its workspace cell.
///
/// Tiny or degenerate windows would otherwise collapse to zero area and
/// become impossible to see or grab. Units: pager cells.
pub const MIN_WINDOW_EXTENT: i32 = 3;

/// Pointer travel on either axis that turns a pending press into a drag.
///
/// A press that is released before the pointer moves further than this
/// (strictly greater, per axis) is treated as a click. Hosts with coarse
/// pointer resolution, such as terminals, usually want a much smaller value.
pub const DEFAULT_DRAG_THRESHOLD: i32 = 8;

/// Horizontal padding (in columns) added around the longest action menu
/// label: one for each border plus one space on either side.
pub const MENU_HORIZONTAL_PADDING: i32 = 4;
