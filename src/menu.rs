//! Per-window action menu opened by a secondary click on a miniature window.

use crossterm::event::{Event, KeyCode, KeyEventKind, MouseEventKind};

use crate::constants::MENU_HORIZONTAL_PADDING;
use crate::geometry::{PagerRect, Point, Size};
use crate::session::{SessionModel, WindowId, WindowInfo};

/// Clamp a popup position so it stays next to the click, then on screen.
///
/// The requested point is first kept between `anchor` (the click on screen)
/// and `anchor + pager_size`. It is then pulled back so a popup of
/// `menu_size` fits on `screen`; a popup larger than the screen is pinned to
/// the top-left corner.
pub fn position_popup(
    requested: Point,
    anchor: Point,
    pager_size: Size,
    menu_size: Size,
    screen: Size,
) -> Point {
    let near = |value: i32, low: i32, span: i32| {
        let high = low.saturating_add(span.max(0));
        value.clamp(low, high)
    };
    let on_screen = |value: i32, screen: i32, menu: i32| {
        value.clamp(0, screen.saturating_sub(menu).max(0))
    };
    let x = near(requested.x, anchor.x, pager_size.width);
    let y = near(requested.y, anchor.y, pager_size.height);
    Point::new(
        on_screen(x, screen.width, menu_size.width),
        on_screen(y, screen.height, menu_size.height),
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Activate,
    MoveToWorkspace(usize),
    CloseWindow,
}

impl MenuItem {
    pub fn label(&self) -> String {
        match self {
            MenuItem::Activate => "Activate".to_string(),
            MenuItem::MoveToWorkspace(workspace) => format!("Move to Workspace {}", workspace + 1),
            MenuItem::CloseWindow => "Close".to_string(),
        }
    }
}

/// What the host should do after the menu handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// Close the menu without acting.
    Dismiss,
    Invoke { window: WindowId, item: MenuItem },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    window: WindowId,
    title: String,
    items: Vec<MenuItem>,
    selected: usize,
    origin: Point,
}

impl ActionMenu {
    /// Menu for `window`: activate, move to every other workspace, close.
    pub fn for_window(window: &WindowInfo, workspace_count: usize) -> Self {
        let mut items = vec![MenuItem::Activate];
        items.extend(
            (0..workspace_count)
                .filter(|&workspace| window.pinned || window.workspace != Some(workspace))
                .map(MenuItem::MoveToWorkspace),
        );
        items.push(MenuItem::CloseWindow);
        Self {
            window: window.id,
            title: window.title.clone(),
            items,
            selected: 0,
            origin: Point::default(),
        }
    }

    pub fn from_session<S: SessionModel + ?Sized>(session: &S, window: WindowId) -> Option<Self> {
        let info = session.window(window)?;
        Some(Self::for_window(&info, session.workspace_count()))
    }

    pub fn window(&self) -> WindowId {
        self.window
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Outer size including the border.
    pub fn size(&self) -> Size {
        let label_width = self
            .items
            .iter()
            .map(|item| item.label().chars().count())
            .chain(std::iter::once(self.title.chars().count()))
            .max()
            .unwrap_or(1);
        let width = i32::try_from(label_width)
            .unwrap_or(i32::MAX)
            .saturating_add(MENU_HORIZONTAL_PADDING);
        let height = i32::try_from(self.items.len())
            .unwrap_or(i32::MAX)
            .saturating_add(2);
        Size::new(width, height)
    }

    pub fn bounds(&self) -> PagerRect {
        let size = self.size();
        PagerRect::new(self.origin.x, self.origin.y, size.width, size.height)
    }

    /// Screen rectangle of item `index`.
    pub fn item_rect(&self, index: usize) -> Option<PagerRect> {
        if index >= self.items.len() {
            return None;
        }
        let bounds = self.bounds();
        let row = i32::try_from(index).ok()?;
        Some(PagerRect::new(
            bounds.x.saturating_add(1),
            bounds.y.saturating_add(1).saturating_add(row),
            bounds.width.saturating_sub(2).max(1),
            1,
        ))
    }

    pub fn hit_test(&self, point: Point) -> Option<usize> {
        (0..self.items.len()).find(|&index| {
            self.item_rect(index)
                .is_some_and(|rect| rect.contains(point))
        })
    }

    pub fn select_next(&mut self) {
        let total = self.items.len();
        if total > 0 {
            self.selected = (self.selected + 1) % total;
        }
    }

    pub fn select_prev(&mut self) {
        let total = self.items.len();
        if total > 0 {
            self.selected = if self.selected == 0 {
                total - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn invoke(&self, index: usize) -> Option<MenuCommand> {
        self.items.get(index).map(|item| MenuCommand::Invoke {
            window: self.window,
            item: *item,
        })
    }

    /// Route a terminal event to the menu. Mouse coordinates are screen
    /// coordinates. Returns `None` for events the menu ignores.
    pub fn handle_event(&mut self, event: &Event) -> Option<MenuCommand> {
        match event {
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                let point = Point::new(i32::from(mouse.column), i32::from(mouse.row));
                if let Some(index) = self.hit_test(point) {
                    self.selected = index;
                    return self.invoke(index);
                }
                if !self.bounds().contains(point) {
                    return Some(MenuCommand::Dismiss);
                }
                None
            }
            Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
                KeyCode::Up | KeyCode::BackTab => {
                    self.select_prev();
                    None
                }
                KeyCode::Down | KeyCode::Tab => {
                    self.select_next();
                    None
                }
                KeyCode::Enter | KeyCode::Char(' ') => self.invoke(self.selected),
                KeyCode::Esc => Some(MenuCommand::Dismiss),
                _ => None,
            },
            _ => None,
        }
    }
}

impl MenuCommand {
    /// Carry out an invoked item on the session.
    pub fn apply<S: SessionModel + ?Sized>(&self, session: &mut S) {
        let MenuCommand::Invoke { window, item } = *self else {
            return;
        };
        match item {
            MenuItem::Activate => session.activate_window(window),
            MenuItem::MoveToWorkspace(workspace) => {
                session.move_window_to_workspace(window, workspace)
            }
            MenuItem::CloseWindow => session.close_window(window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers, MouseButton, MouseEvent};

    fn menu() -> ActionMenu {
        let info =
            WindowInfo::new(WindowId(5), "term", PagerRect::new(0, 0, 10, 10)).on_workspace(1);
        ActionMenu::for_window(&info, 3)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn items_skip_current_workspace() {
        assert_eq!(
            menu().items(),
            &[
                MenuItem::Activate,
                MenuItem::MoveToWorkspace(0),
                MenuItem::MoveToWorkspace(2),
                MenuItem::CloseWindow,
            ]
        );
    }

    #[test]
    fn popup_stays_near_click_then_on_screen() {
        let placed = position_popup(
            Point::new(2, 2),
            Point::new(10, 4),
            Size::new(30, 5),
            Size::new(12, 4),
            Size::new(80, 24),
        );
        assert_eq!(placed, Point::new(10, 4));
        let placed = position_popup(
            Point::new(70, 20),
            Point::new(60, 18),
            Size::new(30, 5),
            Size::new(12, 4),
            Size::new(80, 24),
        );
        assert_eq!(placed, Point::new(68, 20));
    }

    #[test]
    fn oversized_popup_pins_to_origin() {
        let placed = position_popup(
            Point::new(5, 5),
            Point::new(5, 5),
            Size::new(10, 10),
            Size::new(200, 100),
            Size::new(80, 24),
        );
        assert_eq!(placed, Point::new(0, 0));
    }

    #[test]
    fn keyboard_navigation_wraps() {
        let mut m = menu();
        assert_eq!(m.handle_event(&key(KeyCode::Up)), None);
        assert_eq!(m.selected(), 3);
        m.handle_event(&key(KeyCode::Down));
        assert_eq!(m.selected(), 0);
        m.handle_event(&key(KeyCode::Down));
        assert_eq!(
            m.handle_event(&key(KeyCode::Enter)),
            Some(MenuCommand::Invoke {
                window: WindowId(5),
                item: MenuItem::MoveToWorkspace(0)
            })
        );
        assert_eq!(m.handle_event(&key(KeyCode::Esc)), Some(MenuCommand::Dismiss));
    }

    #[test]
    fn mouse_selects_or_dismisses() {
        let mut m = menu();
        m.set_origin(Point::new(10, 5));
        // row 5 is the border, items start at row 6
        assert_eq!(
            m.handle_event(&click(12, 9)),
            Some(MenuCommand::Invoke {
                window: WindowId(5),
                item: MenuItem::CloseWindow
            })
        );
        assert_eq!(m.handle_event(&click(10, 5)), None);
        assert_eq!(m.handle_event(&click(0, 0)), Some(MenuCommand::Dismiss));
    }

    #[test]
    fn size_fits_longest_label() {
        let m = menu();
        // "Move to Workspace 1" is 19 wide
        assert_eq!(m.size(), Size::new(23, 6));
    }
}
