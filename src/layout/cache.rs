use super::{PagerConfig, compute_cell_rect};
use crate::geometry::{PagerRect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutKey {
    config: PagerConfig,
    allocation: Size,
    workspace_count: usize,
}

/// Cached cell rectangles, one per workspace.
///
/// The cache rebuilds itself whenever the config, allocation or workspace
/// count it was built for differs from the request, so the rectangle count
/// always matches the workspace count passed in.
#[derive(Debug, Clone, Default)]
pub struct CellLayout {
    key: Option<LayoutKey>,
    cells: Vec<PagerRect>,
}

impl CellLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invalidate(&mut self) {
        self.key = None;
        self.cells.clear();
    }

    pub fn is_valid(&self) -> bool {
        self.key.is_some()
    }

    pub fn cells(
        &mut self,
        config: &PagerConfig,
        allocation: Size,
        workspace_count: usize,
    ) -> &[PagerRect] {
        let key = LayoutKey {
            config: *config,
            allocation,
            workspace_count,
        };
        if self.key != Some(key) {
            self.cells = (0..workspace_count)
                .map(|index| compute_cell_rect(index, config, allocation, workspace_count))
                .collect();
            self.key = Some(key);
        }
        &self.cells
    }

    pub fn cell(
        &mut self,
        index: usize,
        config: &PagerConfig,
        allocation: Size,
        workspace_count: usize,
    ) -> Option<PagerRect> {
        self.cells(config, allocation, workspace_count)
            .get(index)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Orientation;

    #[test]
    fn rebuilds_when_inputs_change() {
        let mut layout = CellLayout::new();
        let cfg = PagerConfig::new(1, Orientation::Horizontal, 48);
        assert!(!layout.is_valid());
        assert_eq!(layout.cells(&cfg, Size::new(100, 10), 4).len(), 4);
        assert!(layout.is_valid());
        assert_eq!(layout.cells(&cfg, Size::new(100, 10), 5).len(), 5);
        let first = layout.cell(1, &cfg, Size::new(200, 10), 5);
        assert_eq!(first, Some(PagerRect::new(40, 0, 40, 10)));
    }

    #[test]
    fn invalidate_drops_cells() {
        let mut layout = CellLayout::new();
        let cfg = PagerConfig::default();
        let _ = layout.cells(&cfg, Size::new(10, 10), 2);
        layout.invalidate();
        assert!(!layout.is_valid());
        assert_eq!(layout.cell(9, &cfg, Size::new(10, 10), 2), None);
    }
}
