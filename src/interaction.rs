//! Click-versus-drag state machine.
//!
//! Pointer events move the machine between idle, pending and active drags.
//! Every entry point returns a [`Transition`]: an optional [`PagerAction`]
//! for the host to apply to the session, and whether the view needs to be
//! redrawn. The machine never touches the session itself.

use crate::constants::DEFAULT_DRAG_THRESHOLD;
use crate::geometry::{PagerRect, Point, exceeds_threshold};
use crate::session::{SessionModel, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

impl PointerButton {
    /// Conventional X11 button number.
    pub fn number(self) -> u8 {
        match self {
            PointerButton::Primary => 1,
            PointerButton::Middle => 2,
            PointerButton::Secondary => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Button 1 went down on a window; the pointer has not moved far enough
    /// to count as a drag yet.
    Pending {
        window: WindowId,
        start: Point,
        /// Press position relative to the origin of the cell it landed in.
        start_in_cell: Point,
    },
    Active {
        window: WindowId,
        pointer: Point,
        start_in_cell: Point,
    },
}

impl DragState {
    pub fn window(&self) -> Option<WindowId> {
        match self {
            DragState::Idle => None,
            DragState::Pending { window, .. } | DragState::Active { window, .. } => Some(*window),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, DragState::Active { .. })
    }
}

/// The window an open action menu was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionMenuState {
    pub target: WindowId,
    /// Pager-local position of the click that opened the menu.
    pub click: Point,
}

/// Requests the pager hands to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    ActivateWorkspace(usize),
    ActivateWindow(WindowId),
    MoveWindowToWorkspace { window: WindowId, workspace: usize },
    OpenActionMenu { window: WindowId, point: Point },
}

impl PagerAction {
    /// Forward the action to the session. Menu requests are for the host's
    /// menu collaborator and leave the session untouched.
    pub fn apply<S: SessionModel + ?Sized>(&self, session: &mut S) {
        match *self {
            PagerAction::ActivateWorkspace(workspace) => session.activate_workspace(workspace),
            PagerAction::ActivateWindow(window) => session.activate_window(window),
            PagerAction::MoveWindowToWorkspace { window, workspace } => {
                session.move_window_to_workspace(window, workspace)
            }
            PagerAction::OpenActionMenu { .. } => {}
        }
    }
}

/// What a button press landed on, resolved by the pager before the state
/// machine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressTarget {
    /// Outside every cell.
    Nothing,
    InactiveWorkspace(usize),
    ActiveWorkspace {
        workspace: usize,
        cell_origin: Point,
        window: Option<WindowId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transition {
    pub action: Option<PagerAction>,
    pub redraw: bool,
}

impl Transition {
    pub fn none() -> Self {
        Self::default()
    }

    fn redraw() -> Self {
        Self {
            action: None,
            redraw: true,
        }
    }

    fn action(action: PagerAction) -> Self {
        Self {
            action: Some(action),
            redraw: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Interaction {
    drag: DragState,
    menu: Option<ActionMenuState>,
    drag_threshold: i32,
}

impl Default for Interaction {
    fn default() -> Self {
        Self::new(DEFAULT_DRAG_THRESHOLD)
    }
}

impl Interaction {
    pub fn new(drag_threshold: i32) -> Self {
        Self {
            drag: DragState::Idle,
            menu: None,
            drag_threshold: drag_threshold.max(0),
        }
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn menu(&self) -> Option<ActionMenuState> {
        self.menu
    }

    pub fn drag_threshold(&self) -> i32 {
        self.drag_threshold
    }

    pub fn set_drag_threshold(&mut self, threshold: i32) {
        self.drag_threshold = threshold.max(0);
    }

    pub fn press(
        &mut self,
        target: PressTarget,
        point: Point,
        button: PointerButton,
    ) -> Transition {
        match target {
            PressTarget::Nothing => Transition::none(),
            PressTarget::InactiveWorkspace(workspace) => {
                if button == PointerButton::Primary {
                    Transition::action(PagerAction::ActivateWorkspace(workspace))
                } else {
                    Transition::none()
                }
            }
            PressTarget::ActiveWorkspace {
                cell_origin,
                window: Some(window),
                ..
            } => match button {
                PointerButton::Primary => {
                    let start_in_cell = point.relative_to(cell_origin);
                    tracing::debug!(window_id = %window, ?start_in_cell, "drag pending");
                    self.drag = DragState::Pending {
                        window,
                        start: point,
                        start_in_cell,
                    };
                    Transition::none()
                }
                PointerButton::Secondary => {
                    if let Some(previous) = self.menu.take() {
                        tracing::debug!(window_id = %previous.target, "action menu replaced");
                    }
                    tracing::debug!(window_id = %window, ?point, "action menu opened");
                    self.menu = Some(ActionMenuState {
                        target: window,
                        click: point,
                    });
                    Transition::action(PagerAction::OpenActionMenu { window, point })
                }
                PointerButton::Middle => Transition::none(),
            },
            PressTarget::ActiveWorkspace { window: None, .. } => Transition::none(),
        }
    }

    pub fn motion(&mut self, point: Point) -> Transition {
        if self.menu.is_some() {
            return Transition::none();
        }
        match self.drag {
            DragState::Idle => Transition::none(),
            DragState::Pending {
                window,
                start,
                start_in_cell,
            } => {
                if !exceeds_threshold(start, point, self.drag_threshold) {
                    return Transition::none();
                }
                tracing::debug!(window_id = %window, ?point, "drag started");
                self.drag = DragState::Active {
                    window,
                    pointer: point,
                    start_in_cell,
                };
                Transition::redraw()
            }
            DragState::Active {
                window,
                start_in_cell,
                ..
            } => {
                self.drag = DragState::Active {
                    window,
                    pointer: point,
                    start_in_cell,
                };
                Transition::redraw()
            }
        }
    }

    /// Finish a gesture.
    ///
    /// `resolve_drop` maps the dragged window and release point to a target
    /// workspace, or `None` to reject the drop. The drag is cleared whatever
    /// it returns.
    pub fn release<F>(&mut self, point: Point, button: PointerButton, resolve_drop: F) -> Transition
    where
        F: FnOnce(WindowId, Point) -> Option<usize>,
    {
        let drag = std::mem::take(&mut self.drag);
        match (drag, button) {
            (DragState::Active { window, .. }, PointerButton::Primary) => {
                let action = resolve_drop(window, point).map(|workspace| {
                    tracing::debug!(window_id = %window, workspace, "drag committed");
                    PagerAction::MoveWindowToWorkspace { window, workspace }
                });
                Transition {
                    action,
                    redraw: true,
                }
            }
            (DragState::Pending { window, .. }, PointerButton::Primary) => {
                tracing::debug!(window_id = %window, "click activates window");
                Transition::action(PagerAction::ActivateWindow(window))
            }
            (drag, _) => Transition {
                action: None,
                redraw: drag.is_active(),
            },
        }
    }

    /// Forget everything referring to a window the session just closed.
    pub fn window_closed(&mut self, window: WindowId) -> Transition {
        let mut redraw = false;
        if self.drag.window() == Some(window) {
            tracing::debug!(window_id = %window, "drag cleared, window closed");
            redraw = self.clear_drag();
        }
        if self.menu.is_some_and(|menu| menu.target == window) {
            tracing::debug!(window_id = %window, "action menu closed, window closed");
            self.menu = None;
        }
        Transition {
            action: None,
            redraw,
        }
    }

    /// Returns whether an active drag was dropped.
    pub fn clear_drag(&mut self) -> bool {
        std::mem::take(&mut self.drag).is_active()
    }

    pub fn close_menu(&mut self) -> Option<ActionMenuState> {
        self.menu.take()
    }

    /// Drop all interaction state. Returns whether a redraw is needed.
    pub fn reset(&mut self) -> bool {
        self.menu = None;
        self.clear_drag()
    }
}

/// Where the dragged window is drawn: its miniature in the cell under the
/// pointer, shifted so the grab point keeps its offset from the pointer.
pub fn dragged_window_rect(
    rect_in_cell: PagerRect,
    cell_origin: Point,
    pointer: Point,
    start_in_cell: Point,
) -> PagerRect {
    let offset = pointer.relative_to(cell_origin).relative_to(start_in_cell);
    rect_in_cell.translate(offset.x, offset.y)
}
