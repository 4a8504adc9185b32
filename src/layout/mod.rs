//! Workspace grid layout.
//!
//! The pager splits its allocation into a grid of equally sized workspace
//! cells. `row_count` lines of cells are stacked across the orientation axis
//! and each line holds `workspace_count / row_count` cells (integer
//! division). Workspaces past the last full line are not placed on the
//! surface: their cells land just beyond the final line.

pub mod cache;

pub use cache::CellLayout;

use crate::constants::DEFAULT_CELL_SIZE;
use crate::geometry::{PagerRect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Workspaces run left to right; `row_count` rows are stacked vertically.
    #[default]
    Horizontal,
    /// Workspaces run top to bottom; `row_count` columns sit side by side.
    Vertical,
}

/// Pager presentation settings.
///
/// `row_count` counts rows for horizontal pagers and columns for vertical
/// ones. It must be at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PagerConfig {
    row_count: usize,
    orientation: Orientation,
    cell_size: i32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            row_count: 1,
            orientation: Orientation::Horizontal,
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}

impl PagerConfig {
    /// # Panics
    ///
    /// Panics when `row_count` is zero.
    pub fn new(row_count: usize, orientation: Orientation, cell_size: i32) -> Self {
        assert!(row_count > 0, "pager row count must be at least 1");
        Self {
            row_count,
            orientation,
            cell_size,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    pub fn with_row_count(mut self, row_count: usize) -> Self {
        assert!(row_count > 0, "pager row count must be at least 1");
        self.row_count = row_count;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_cell_size(mut self, cell_size: i32) -> Self {
        self.cell_size = cell_size;
        self
    }
}

/// Cells along each line: `workspace_count / row_count`.
pub fn cells_per_line(config: &PagerConfig, workspace_count: usize) -> usize {
    assert!(config.row_count > 0, "pager row count must be at least 1");
    workspace_count / config.row_count
}

/// Number of workspaces that actually receive a cell on the pager surface.
pub fn laid_out_count(config: &PagerConfig, workspace_count: usize) -> usize {
    cells_per_line(config, workspace_count) * config.row_count
}

/// Grid dimensions as `(columns, rows)`.
pub fn grid_dimensions(config: &PagerConfig, workspace_count: usize) -> (usize, usize) {
    let per_line = cells_per_line(config, workspace_count);
    match config.orientation {
        Orientation::Horizontal => (per_line, config.row_count),
        Orientation::Vertical => (config.row_count, per_line),
    }
}

/// Grid position of a workspace as `(column, row)`. Cells fill the grid
/// row by row.
pub fn cell_position(index: usize, config: &PagerConfig, workspace_count: usize) -> (usize, usize) {
    let (columns, _) = grid_dimensions(config, workspace_count);
    if columns == 0 {
        return (0, 0);
    }
    (index % columns, index / columns)
}

/// Pager-local rectangle of workspace `index`.
///
/// Returns an empty rectangle when there are fewer workspaces than rows, in
/// which case nothing is laid out.
///
/// # Panics
///
/// Panics when the configured row count is zero.
pub fn compute_cell_rect(
    index: usize,
    config: &PagerConfig,
    allocation: Size,
    workspace_count: usize,
) -> PagerRect {
    let (columns, rows) = grid_dimensions(config, workspace_count);
    if columns == 0 || rows == 0 {
        return PagerRect::default();
    }
    let width = allocation.width / to_i32(columns);
    let height = allocation.height / to_i32(rows);
    let (column, row) = cell_position(index, config, workspace_count);
    PagerRect {
        x: width.saturating_mul(to_i32(column)),
        y: height.saturating_mul(to_i32(row)),
        width,
        height,
    }
}

/// Size the pager asks its host for, so every cell is `cell_size` long on
/// the stacking axis and follows the screen's aspect ratio on the other.
pub fn compute_preferred_size(config: &PagerConfig, workspace_count: usize, screen: Size) -> Size {
    let per_line = to_i32(cells_per_line(config, workspace_count));
    let rows = to_i32(config.row_count);
    let cell_size = config.cell_size;
    match config.orientation {
        Orientation::Vertical => {
            let other = (aspect(screen.height, screen.width) * f64::from(cell_size)) as i32;
            Size::new(cell_size.saturating_mul(rows), other.saturating_mul(per_line))
        }
        Orientation::Horizontal => {
            let other = (aspect(screen.width, screen.height) * f64::from(cell_size)) as i32;
            Size::new(other.saturating_mul(per_line), cell_size.saturating_mul(rows))
        }
    }
}

fn aspect(numerator: i32, denominator: i32) -> f64 {
    if denominator <= 0 {
        return 0.0;
    }
    f64::from(numerator) / f64::from(denominator)
}

fn to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
