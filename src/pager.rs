//! The pager object: owns configuration, cached layout and interaction
//! state, and turns pointer input and session notifications into actions
//! and redraw requests.

use crate::geometry::{PagerRect, Point, Size, map_window_to_cell};
use crate::hit_test::{cell_at_point, window_at_point, workspace_at_point};
use crate::input::PointerEvent;
use crate::interaction::{
    ActionMenuState, DragState, Interaction, PagerAction, PointerButton, PressTarget,
    dragged_window_rect,
};
use crate::layout::{CellLayout, Orientation, PagerConfig, compute_preferred_size};
use crate::menu::position_popup;
use crate::session::{SessionEvent, SessionModel, WindowId, WindowInfo, windows_for_workspace};
use crate::signals::{ListenerToken, Listeners};

/// One workspace cell as the renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    pub index: usize,
    pub rect: PagerRect,
    pub active: bool,
}

/// One miniature window as the renderer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowView {
    pub id: WindowId,
    pub rect: PagerRect,
    pub active: bool,
    pub icon: Option<String>,
    pub mini_icon: Option<char>,
}

impl WindowView {
    fn new(window: &WindowInfo, rect: PagerRect) -> Self {
        Self {
            id: window.id,
            rect,
            active: window.active,
            icon: window.icon.clone(),
            mini_icon: window.mini_icon,
        }
    }
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerSnapshot {
    pub cells: Vec<CellView>,
    /// Windows per cell, bottom to top, indexed like `cells`.
    pub windows: Vec<Vec<WindowView>>,
    pub dragged: Option<WindowView>,
}

#[derive(Debug)]
pub struct Pager {
    config: PagerConfig,
    allocation: Size,
    layout: CellLayout,
    interaction: Interaction,
    redraw_listeners: Listeners<()>,
    redraw_pending: bool,
    resize_pending: bool,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}

impl Pager {
    pub fn new(config: PagerConfig) -> Self {
        Self {
            config,
            allocation: Size::default(),
            layout: CellLayout::new(),
            interaction: Interaction::default(),
            redraw_listeners: Listeners::new(),
            redraw_pending: true,
            resize_pending: true,
        }
    }

    pub fn with_drag_threshold(mut self, threshold: i32) -> Self {
        self.interaction.set_drag_threshold(threshold);
        self
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub fn allocation(&self) -> Size {
        self.allocation
    }

    pub fn drag_state(&self) -> DragState {
        self.interaction.drag()
    }

    pub fn action_menu(&self) -> Option<ActionMenuState> {
        self.interaction.menu()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        if self.config.orientation() == orientation {
            return;
        }
        self.update_config(self.config.with_orientation(orientation));
    }

    /// # Panics
    ///
    /// Panics when `row_count` is zero.
    pub fn set_row_count(&mut self, row_count: usize) {
        if self.config.row_count() == row_count {
            return;
        }
        self.update_config(self.config.with_row_count(row_count));
    }

    pub fn set_cell_size(&mut self, cell_size: i32) {
        if self.config.cell_size() == cell_size {
            return;
        }
        self.update_config(self.config.with_cell_size(cell_size));
    }

    fn update_config(&mut self, config: PagerConfig) {
        tracing::debug!(?config, "pager config changed");
        self.config = config;
        self.layout.invalidate();
        self.resize_pending = true;
        self.request_redraw();
    }

    /// Record the area the host gave the pager, in pager-local units.
    pub fn set_allocation(&mut self, allocation: Size) {
        if self.allocation == allocation {
            return;
        }
        self.allocation = allocation;
        self.layout.invalidate();
        self.request_redraw();
    }

    pub fn preferred_size<S: SessionModel + ?Sized>(&self, session: &S) -> Size {
        compute_preferred_size(&self.config, session.workspace_count(), session.screen_size())
    }

    pub fn cell_rect(&mut self, index: usize, workspace_count: usize) -> Option<PagerRect> {
        self.layout
            .cell(index, &self.config, self.allocation, workspace_count)
    }

    pub fn workspace_at(&self, point: Point, workspace_count: usize) -> usize {
        workspace_at_point(point, &self.config, self.allocation, workspace_count)
    }

    pub fn on_button_press<S: SessionModel + ?Sized>(
        &mut self,
        session: &S,
        point: Point,
        button: PointerButton,
    ) -> Option<PagerAction> {
        let target = self.press_target(session, point);
        let transition = self.interaction.press(target, point, button);
        if transition.redraw {
            self.request_redraw();
        }
        transition.action
    }

    fn press_target<S: SessionModel + ?Sized>(&mut self, session: &S, point: Point) -> PressTarget {
        let count = session.workspace_count();
        let Some(workspace) = cell_at_point(point, &self.config, self.allocation, count) else {
            return PressTarget::Nothing;
        };
        if session.active_workspace() != Some(workspace) {
            return PressTarget::InactiveWorkspace(workspace);
        }
        let Some(cell) = self.cell_rect(workspace, count) else {
            return PressTarget::Nothing;
        };
        let stacked = session.windows_stacked();
        let candidates = windows_for_workspace(&stacked, workspace);
        let window = window_at_point(point, cell, session.screen_size(), candidates, None);
        PressTarget::ActiveWorkspace {
            workspace,
            cell_origin: cell.origin(),
            window,
        }
    }

    pub fn on_motion(&mut self, point: Point) {
        if self.interaction.motion(point).redraw {
            self.request_redraw();
        }
    }

    pub fn on_button_release<S: SessionModel + ?Sized>(
        &mut self,
        session: &S,
        point: Point,
        button: PointerButton,
    ) -> Option<PagerAction> {
        let count = session.workspace_count();
        let config = self.config;
        let allocation = self.allocation;
        let transition = self.interaction.release(point, button, |window, point| {
            let workspace = workspace_at_point(point, &config, allocation, count);
            if workspace >= count {
                tracing::warn!(
                    window_id = %window,
                    workspace,
                    count,
                    "drop rejected, no such workspace"
                );
                return None;
            }
            if !session.window_exists(window) {
                tracing::warn!(window_id = %window, "drop rejected, window gone");
                return None;
            }
            Some(workspace)
        });
        if transition.redraw {
            self.request_redraw();
        }
        transition.action
    }

    pub fn handle_pointer<S: SessionModel + ?Sized>(
        &mut self,
        session: &S,
        event: PointerEvent,
    ) -> Option<PagerAction> {
        match event {
            PointerEvent::Press { point, button } => self.on_button_press(session, point, button),
            PointerEvent::Motion { point } => {
                self.on_motion(point);
                None
            }
            PointerEvent::Release { point, button } => {
                self.on_button_release(session, point, button)
            }
        }
    }

    pub fn handle_session_event(&mut self, event: &SessionEvent) {
        match *event {
            SessionEvent::WorkspaceCreated(_) | SessionEvent::ScreenResized => {
                self.layout.invalidate();
                self.resize_pending = true;
            }
            SessionEvent::WorkspaceDestroyed(workspace) => {
                if self.interaction.clear_drag() {
                    tracing::debug!(workspace, "drag cleared, workspace destroyed");
                }
                self.layout.invalidate();
                self.resize_pending = true;
            }
            SessionEvent::WindowClosed(window) => {
                self.interaction.window_closed(window);
            }
            _ => {}
        }
        self.request_redraw();
    }

    /// Drop everything tied to the current session, e.g. when its screen
    /// goes away.
    pub fn disconnect_session(&mut self) {
        tracing::debug!("pager disconnected from session");
        self.interaction.reset();
        self.layout.invalidate();
        self.request_redraw();
    }

    pub fn close_action_menu(&mut self) -> Option<ActionMenuState> {
        let closed = self.interaction.close_menu();
        if let Some(menu) = closed {
            tracing::debug!(window_id = %menu.target, "action menu closed");
        }
        closed
    }

    /// Place a popup of `menu_size` for the open action menu. `pager_origin`
    /// is where the pager sits on the screen and `requested` is where the
    /// host would put the popup unclamped.
    pub fn position_action_menu(
        &self,
        requested: Point,
        pager_origin: Point,
        menu_size: Size,
        screen: Size,
    ) -> Option<Point> {
        let menu = self.interaction.menu()?;
        let anchor = Point::new(
            pager_origin.x.saturating_add(menu.click.x),
            pager_origin.y.saturating_add(menu.click.y),
        );
        Some(position_popup(requested, anchor, self.allocation, menu_size, screen))
    }

    pub fn connect_redraw(&mut self, listener: impl FnMut(&()) + 'static) -> ListenerToken {
        self.redraw_listeners.connect(listener)
    }

    pub fn disconnect_redraw(&mut self, token: ListenerToken) -> bool {
        self.redraw_listeners.disconnect(token)
    }

    pub fn request_redraw(&mut self) {
        self.redraw_pending = true;
        self.redraw_listeners.emit(&());
    }

    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_pending)
    }

    pub fn take_resize_request(&mut self) -> bool {
        std::mem::take(&mut self.resize_pending)
    }

    pub fn cells<S: SessionModel + ?Sized>(&mut self, session: &S) -> Vec<CellView> {
        let active = session.active_workspace();
        self.layout
            .cells(&self.config, self.allocation, session.workspace_count())
            .iter()
            .enumerate()
            .map(|(index, rect)| CellView {
                index,
                rect: *rect,
                active: active == Some(index),
            })
            .collect()
    }

    /// Miniature windows of one cell, bottom to top, without the window
    /// being dragged.
    pub fn windows_in_cell<S: SessionModel + ?Sized>(
        &mut self,
        session: &S,
        workspace: usize,
    ) -> Vec<WindowView> {
        let Some(cell) = self.cell_rect(workspace, session.workspace_count()) else {
            return Vec::new();
        };
        let dragging = match self.interaction.drag() {
            DragState::Active { window, .. } => Some(window),
            _ => None,
        };
        let screen = session.screen_size();
        let stacked = session.windows_stacked();
        windows_for_workspace(&stacked, workspace)
            .into_iter()
            .filter(|window| Some(window.id) != dragging)
            .map(|window| {
                WindowView::new(window, map_window_to_cell(window.geometry, screen, cell))
            })
            .collect()
    }

    /// The window being dragged, at its current render position.
    pub fn dragged_window<S: SessionModel + ?Sized>(&mut self, session: &S) -> Option<WindowView> {
        let DragState::Active {
            window,
            pointer,
            start_in_cell,
        } = self.interaction.drag()
        else {
            return None;
        };
        let info = session.window(window)?;
        let count = session.workspace_count();
        let workspace = self.workspace_at(pointer, count);
        let cell = self.cell_rect(workspace, count)?;
        let home = map_window_to_cell(info.geometry, session.screen_size(), cell);
        let rect = dragged_window_rect(home, cell.origin(), pointer, start_in_cell);
        Some(WindowView::new(&info, rect))
    }

    pub fn snapshot<S: SessionModel + ?Sized>(&mut self, session: &S) -> PagerSnapshot {
        let cells = self.cells(session);
        let windows = cells
            .iter()
            .map(|cell| self.windows_in_cell(session, cell.index))
            .collect();
        let dragged = self.dragged_window(session);
        PagerSnapshot {
            cells,
            windows,
            dragged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySession, SessionEvents};
    use std::cell::Cell;
    use std::rc::Rc;

    fn setup() -> (Pager, MemorySession, WindowId) {
        let mut session = MemorySession::new(Size::new(400, 200), 4);
        let id = session.open_window(
            WindowInfo::new(WindowId(0), "editor", PagerRect::new(0, 0, 200, 100)).on_workspace(0),
        );
        session.take_events();
        let mut pager =
            Pager::new(PagerConfig::new(1, Orientation::Horizontal, 48)).with_drag_threshold(1);
        pager.set_allocation(Size::new(400, 50));
        (pager, session, id)
    }

    #[test]
    fn setters_are_noops_when_unchanged() {
        let mut pager = Pager::default();
        pager.take_redraw_request();
        pager.take_resize_request();
        pager.set_row_count(1);
        pager.set_orientation(Orientation::Horizontal);
        pager.set_cell_size(48);
        assert!(!pager.take_redraw_request());
        assert!(!pager.take_resize_request());
        pager.set_cell_size(20);
        assert!(pager.take_redraw_request());
        assert!(pager.take_resize_request());
    }

    #[test]
    fn redraw_listener_fires_during_drag() {
        let (mut pager, session, _) = setup();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let token = pager.connect_redraw(move |_| counter.set(counter.get() + 1));
        pager.on_button_press(&session, Point::new(10, 10), PointerButton::Primary);
        pager.on_motion(Point::new(20, 10));
        pager.on_motion(Point::new(30, 10));
        assert_eq!(hits.get(), 2);
        assert!(pager.disconnect_redraw(token));
        pager.on_motion(Point::new(40, 10));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn press_outside_cells_is_dropped() {
        let (mut pager, session, _) = setup();
        let action = pager.on_button_press(&session, Point::new(10, 60), PointerButton::Primary);
        assert_eq!(action, None);
        assert_eq!(pager.drag_state(), DragState::Idle);
    }

    #[test]
    fn press_on_remainder_workspace_is_dropped() {
        let mut session = MemorySession::new(Size::new(400, 200), 5);
        session.take_events();
        let mut pager = Pager::new(PagerConfig::new(2, Orientation::Horizontal, 48));
        pager.set_allocation(Size::new(200, 100));
        // two rows of two; workspace 4 is not laid out and would sit below
        let action = pager.on_button_press(&session, Point::new(10, 110), PointerButton::Primary);
        assert_eq!(action, None);
        let action = pager.on_button_press(&session, Point::new(10, 60), PointerButton::Primary);
        assert_eq!(action, Some(PagerAction::ActivateWorkspace(2)));
    }

    #[test]
    fn drop_outside_pager_uses_edge_cell() {
        let (mut pager, session, id) = setup();
        pager.on_button_press(&session, Point::new(10, 10), PointerButton::Primary);
        pager.on_motion(Point::new(900, -40));
        let action =
            pager.on_button_release(&session, Point::new(900, -40), PointerButton::Primary);
        assert_eq!(
            action,
            Some(PagerAction::MoveWindowToWorkspace {
                window: id,
                workspace: 3
            })
        );
    }

    #[test]
    fn drop_is_rejected_when_workspaces_vanish() {
        let (mut pager, mut session, id) = setup();
        pager.on_button_press(&session, Point::new(10, 10), PointerButton::Primary);
        pager.on_motion(Point::new(30, 10));
        while session.workspace_count() > 0 {
            session.remove_workspace();
        }
        let action = pager.on_button_release(&session, Point::new(30, 10), PointerButton::Primary);
        assert_eq!(action, None);
        assert_eq!(pager.drag_state(), DragState::Idle);
        assert!(session.window_exists(id));
    }

    #[test]
    fn workspace_destroyed_clears_drag_and_requests_resize() {
        let (mut pager, session, _) = setup();
        pager.take_resize_request();
        pager.on_button_press(&session, Point::new(10, 10), PointerButton::Primary);
        pager.on_motion(Point::new(30, 10));
        pager.handle_session_event(&SessionEvent::WorkspaceDestroyed(3));
        assert_eq!(pager.drag_state(), DragState::Idle);
        assert!(pager.take_resize_request());
    }

    #[test]
    fn disconnect_clears_drag_and_menu() {
        let (mut pager, session, id) = setup();
        pager.on_button_press(&session, Point::new(10, 10), PointerButton::Primary);
        pager.on_motion(Point::new(30, 10));
        pager.on_button_press(&session, Point::new(10, 10), PointerButton::Secondary);
        assert!(pager.drag_state().is_active());
        assert_eq!(pager.action_menu().map(|menu| menu.target), Some(id));
        pager.take_redraw_request();

        pager.disconnect_session();
        assert_eq!(pager.drag_state(), DragState::Idle);
        assert_eq!(pager.action_menu(), None);
        assert!(pager.take_redraw_request());
    }

    #[test]
    fn workspace_created_requests_resize_and_new_cell() {
        let (mut pager, mut session, _) = setup();
        assert_eq!(pager.cells(&session).len(), 4);
        pager.take_resize_request();
        pager.take_redraw_request();

        assert_eq!(session.add_workspace(), 4);
        for event in session.take_events() {
            pager.handle_session_event(&event);
        }
        assert!(pager.take_resize_request());
        assert!(pager.take_redraw_request());
        let cells = pager.cells(&session);
        assert_eq!(cells.len(), 5);
        assert_eq!(cells[4].rect, PagerRect::new(320, 0, 80, 50));
    }

    #[test]
    fn attribute_changes_redraw_and_screen_resize_relayouts() {
        let (mut pager, mut session, id) = setup();
        pager.take_resize_request();
        pager.take_redraw_request();

        session.set_window_icon(id, Some("ed".into()), Some('e'));
        for event in session.take_events() {
            pager.handle_session_event(&event);
        }
        assert!(pager.take_redraw_request());
        assert!(!pager.take_resize_request());

        session.set_screen_size(Size::new(400, 400));
        for event in session.take_events() {
            pager.handle_session_event(&event);
        }
        assert!(pager.take_resize_request());
        // square screen -> square 48px cells
        assert_eq!(pager.preferred_size(&session), Size::new(192, 48));
    }

    #[test]
    fn dragged_window_is_excluded_from_its_cell() {
        let (mut pager, session, id) = setup();
        pager.on_button_press(&session, Point::new(10, 10), PointerButton::Primary);
        assert_eq!(pager.windows_in_cell(&session, 0).len(), 1);
        pager.on_motion(Point::new(130, 20));
        assert!(pager.windows_in_cell(&session, 0).is_empty());
        let dragged = pager.dragged_window(&session).expect("dragged window");
        assert_eq!(dragged.id, id);
        // home rect in cell 1 is (100, 0, 50, 25); grab offset (10, 10)
        assert_eq!(dragged.rect, PagerRect::new(120, 10, 50, 25));
    }

    #[test]
    fn popup_is_clamped_near_the_click() {
        let (mut pager, session, id) = setup();
        let action = pager.on_button_press(&session, Point::new(10, 10), PointerButton::Secondary);
        assert_eq!(
            action,
            Some(PagerAction::OpenActionMenu {
                window: id,
                point: Point::new(10, 10)
            })
        );
        let origin = Point::new(5, 5);
        let menu_size = Size::new(20, 6);
        let screen = Size::new(80, 24);
        let placed = pager.position_action_menu(Point::new(0, 0), origin, menu_size, screen);
        assert_eq!(placed, Some(Point::new(15, 15)));
        let placed = pager.position_action_menu(Point::new(79, 23), origin, menu_size, screen);
        assert_eq!(placed, Some(Point::new(60, 18)));
        pager.close_action_menu();
        let placed = pager.position_action_menu(Point::new(0, 0), origin, menu_size, screen);
        assert_eq!(placed, None);
    }

    #[test]
    fn snapshot_marks_active_cell() {
        let (mut pager, session, _) = setup();
        let snapshot = pager.snapshot(&session);
        assert_eq!(snapshot.cells.len(), 4);
        assert!(snapshot.cells[0].active);
        assert!(!snapshot.cells[1].active);
        assert_eq!(snapshot.windows[0].len(), 1);
        assert!(snapshot.windows[1].is_empty());
        assert_eq!(snapshot.dragged, None);
    }
}
