use term_pager::geometry::{PagerRect, Point, Size};
use term_pager::interaction::{DragState, PagerAction, PointerButton};
use term_pager::layout::{Orientation, PagerConfig};
use term_pager::pager::Pager;
use term_pager::session::{MemorySession, SessionEvents, SessionModel, WindowId, WindowInfo};

// Four workspaces in one row. The real screen is 400x200 and each cell is
// 100x50, so windows shrink by a factor of four.
fn setup(threshold: i32) -> (Pager, MemorySession, WindowId) {
    let mut session = MemorySession::new(Size::new(400, 200), 4);
    let w = session.open_window(
        WindowInfo::new(WindowId(0), "editor", PagerRect::new(40, 40, 200, 100)).on_workspace(0),
    );
    session.take_events();
    let mut pager =
        Pager::new(PagerConfig::new(1, Orientation::Horizontal, 48)).with_drag_threshold(threshold);
    pager.set_allocation(Size::new(400, 50));
    (pager, session, w)
}

fn drain(pager: &mut Pager, session: &mut MemorySession) {
    for event in session.take_events() {
        pager.handle_session_event(&event);
    }
}

#[test]
fn click_below_threshold_activates_window() {
    let (mut pager, mut session, w) = setup(4);
    let p = Point::new(20, 15);
    assert_eq!(pager.on_button_press(&session, p, PointerButton::Primary), None);
    assert_eq!(
        pager.drag_state(),
        DragState::Pending {
            window: w,
            start: p,
            start_in_cell: Point::new(20, 15),
        }
    );

    pager.on_motion(Point::new(21, 15));
    assert!(matches!(pager.drag_state(), DragState::Pending { .. }));

    let action = pager.on_button_release(&session, Point::new(21, 15), PointerButton::Primary);
    assert_eq!(action, Some(PagerAction::ActivateWindow(w)));
    assert_eq!(pager.drag_state(), DragState::Idle);

    action.unwrap().apply(&mut session);
    assert_eq!(session.active_window(), Some(w));
}

#[test]
fn drag_to_third_workspace_moves_window() {
    let (mut pager, mut session, w) = setup(4);
    pager.on_button_press(&session, Point::new(20, 15), PointerButton::Primary);
    pager.on_motion(Point::new(120, 20));
    assert!(pager.drag_state().is_active());
    pager.on_motion(Point::new(250, 20));

    let action = pager.on_button_release(&session, Point::new(250, 20), PointerButton::Primary);
    assert_eq!(
        action,
        Some(PagerAction::MoveWindowToWorkspace {
            window: w,
            workspace: 2
        })
    );
    assert_eq!(pager.drag_state(), DragState::Idle);

    action.unwrap().apply(&mut session);
    drain(&mut pager, &mut session);
    assert_eq!(session.window(w).and_then(|info| info.workspace), Some(2));
    assert!(pager.windows_in_cell(&session, 0).is_empty());
    assert_eq!(pager.windows_in_cell(&session, 2).len(), 1);
}

#[test]
fn secondary_press_opens_menu_without_dragging() {
    let (mut pager, session, w) = setup(4);
    let p = Point::new(20, 15);
    let action = pager.on_button_press(&session, p, PointerButton::Secondary);
    assert_eq!(action, Some(PagerAction::OpenActionMenu { window: w, point: p }));
    assert_eq!(pager.drag_state(), DragState::Idle);
    assert_eq!(pager.action_menu().map(|menu| menu.target), Some(w));
}

#[test]
fn closing_dragged_window_forces_idle() {
    let (mut pager, mut session, w) = setup(1);
    pager.on_button_press(&session, Point::new(20, 15), PointerButton::Primary);
    pager.on_motion(Point::new(60, 30));
    assert!(pager.drag_state().is_active());
    assert!(pager.dragged_window(&session).is_some());

    session.close_window(w);
    drain(&mut pager, &mut session);
    assert_eq!(pager.drag_state(), DragState::Idle);

    // render queries after the close see nothing of the window
    let snapshot = pager.snapshot(&session);
    assert_eq!(snapshot.dragged, None);
    assert!(snapshot.windows.iter().all(|cell| cell.is_empty()));
    assert_eq!(
        pager.on_button_release(&session, Point::new(60, 30), PointerButton::Primary),
        None
    );
}

#[test]
fn closing_menu_target_closes_menu() {
    let (mut pager, mut session, w) = setup(4);
    pager.on_button_press(&session, Point::new(20, 15), PointerButton::Secondary);
    session.close_window(w);
    drain(&mut pager, &mut session);
    assert_eq!(pager.action_menu(), None);
}

#[test]
fn press_on_inactive_workspace_switches() {
    let (mut pager, mut session, _) = setup(4);
    let action = pager.on_button_press(&session, Point::new(320, 10), PointerButton::Primary);
    assert_eq!(action, Some(PagerAction::ActivateWorkspace(3)));
    action.unwrap().apply(&mut session);
    assert_eq!(session.active_workspace(), Some(3));
    assert_eq!(
        pager.on_button_press(&session, Point::new(20, 10), PointerButton::Middle),
        None
    );
}

#[test]
fn pinned_window_is_grabbable_everywhere() {
    let (mut pager, mut session, _) = setup(4);
    let pinned = session.open_window(
        WindowInfo::new(WindowId(0), "clock", PagerRect::new(360, 0, 40, 40)).pinned(),
    );
    session.activate_workspace(1);
    drain(&mut pager, &mut session);
    // clock maps to (190, 0, 10, 10) inside cell 1
    pager.on_button_press(&session, Point::new(192, 2), PointerButton::Primary);
    assert_eq!(pager.drag_state().window(), Some(pinned));
}

#[test]
fn topmost_of_overlapping_windows_is_picked() {
    let (mut pager, mut session, w) = setup(4);
    let top = session.open_window(
        WindowInfo::new(WindowId(0), "dialog", PagerRect::new(80, 60, 80, 40)).on_workspace(0),
    );
    drain(&mut pager, &mut session);
    pager.on_button_press(&session, Point::new(25, 18), PointerButton::Primary);
    assert_eq!(pager.drag_state().window(), Some(top));

    session.raise_window(w);
    drain(&mut pager, &mut session);
    pager.on_button_press(&session, Point::new(25, 18), PointerButton::Primary);
    assert_eq!(pager.drag_state().window(), Some(w));
}
