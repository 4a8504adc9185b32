use std::io;
use std::time::Duration;

use crossterm::event::Event;
use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};

use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::geometry::{Point, Size};
use crate::input::pointer_event;
use crate::interaction::PagerAction;
use crate::menu::{ActionMenu, MenuCommand};
use crate::pager::Pager;
use crate::render::{ActionMenuView, PagerView};
use crate::session::{SessionEvent, SessionEvents, SessionModel};

/// Columns and rows kept free around the pager.
const MARGIN: u16 = 1;

/// Glue between a terminal frame, a [`Pager`] and the session it mirrors.
///
/// The host owns the action menu popup and applies every action the pager
/// returns to the session, then feeds the session's notifications back.
pub struct PagerHost<S> {
    pager: Pager,
    session: S,
    menu: Option<ActionMenu>,
    area: Rect,
    screen: Size,
}

impl<S: SessionModel + SessionEvents> PagerHost<S> {
    pub fn new(pager: Pager, session: S) -> Self {
        Self {
            pager,
            session,
            menu: None,
            area: Rect::default(),
            screen: Size::default(),
        }
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub fn menu(&self) -> Option<&ActionMenu> {
        self.menu.as_ref()
    }

    /// Where the pager is drawn, in frame coordinates.
    pub fn pager_area(&self) -> Rect {
        self.area
    }

    fn origin(&self) -> Point {
        Point::new(i32::from(self.area.x), i32::from(self.area.y))
    }

    /// Place the pager in `frame_area` at its preferred size, shrunk to fit.
    pub fn layout(&mut self, frame_area: Rect) {
        self.pager.take_resize_request();
        let preferred = self.pager.preferred_size(&self.session);
        let inner = frame_area.inner(ratatui::layout::Margin::new(MARGIN, MARGIN));
        let fit = |wanted: i32, available: u16| {
            u16::try_from(wanted.max(0)).unwrap_or(u16::MAX).min(available)
        };
        let area = Rect::new(
            inner.x,
            inner.y,
            fit(preferred.width, inner.width),
            fit(preferred.height, inner.height),
        );
        let screen = Size::new(i32::from(frame_area.width), i32::from(frame_area.height));
        if area != self.area || screen != self.screen {
            tracing::debug!(?area, "pager placed");
            self.pager.request_redraw();
        }
        self.area = area;
        self.screen = screen;
        self.pager
            .set_allocation(Size::new(i32::from(area.width), i32::from(area.height)));
    }

    pub fn handle_event(&mut self, event: &Event) {
        if let Some(menu) = self.menu.as_mut() {
            if let Some(command) = menu.handle_event(event) {
                self.finish_menu(command);
            }
        } else {
            match event {
                Event::Mouse(mouse) => {
                    if let Some(pointer) = pointer_event(mouse, self.origin()) {
                        tracing::trace!(point = ?pointer.point(), "pointer event");
                        if let Some(action) = self.pager.handle_pointer(&self.session, pointer) {
                            self.apply(action);
                        }
                    }
                }
                Event::Resize(_, _) => self.pager.request_redraw(),
                _ => {}
            }
        }
        self.sync_session();
    }

    fn finish_menu(&mut self, command: MenuCommand) {
        tracing::debug!(?command, "action menu finished");
        command.apply(&mut self.session);
        self.menu = None;
        self.pager.close_action_menu();
        self.pager.request_redraw();
    }

    pub fn apply(&mut self, action: PagerAction) {
        tracing::debug!(?action, "pager action");
        match action {
            PagerAction::OpenActionMenu { window, point } => {
                let Some(mut menu) = ActionMenu::from_session(&self.session, window) else {
                    self.pager.close_action_menu();
                    return;
                };
                let origin = self.origin();
                let requested = Point::new(
                    origin.x.saturating_add(point.x),
                    origin.y.saturating_add(point.y),
                );
                if let Some(placed) =
                    self.pager
                        .position_action_menu(requested, origin, menu.size(), self.screen)
                {
                    menu.set_origin(placed);
                }
                self.menu = Some(menu);
                self.pager.request_redraw();
            }
            other => other.apply(&mut self.session),
        }
    }

    /// Deliver queued session notifications to the pager.
    pub fn sync_session(&mut self) {
        for event in self.session.take_events() {
            self.pager.handle_session_event(&event);
            if let SessionEvent::WindowClosed(window) = event
                && self.menu.as_ref().is_some_and(|menu| menu.window() == window)
            {
                self.menu = None;
            }
        }
        if self.pager.action_menu().is_none() {
            self.menu = None;
        }
    }

    pub fn take_redraw_request(&mut self) -> bool {
        self.pager.take_redraw_request()
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let snapshot = self.pager.snapshot(&self.session);
        frame.render_widget(PagerView::new(&snapshot), self.area);
        if let Some(menu) = &self.menu {
            frame.render_widget(ActionMenuView::new(menu), frame.area());
        }
    }
}

/// Drive `host` from `driver` until `should_quit` accepts an event.
///
/// Frames are only drawn on idle ticks where the pager asked for a redraw.
pub fn run_pager_app<B, D, S, FQuit>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    host: &mut PagerHost<S>,
    poll_interval: Duration,
    mut should_quit: FQuit,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
    S: SessionModel + SessionEvents,
    FQuit: FnMut(&Event, &PagerHost<S>) -> bool,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.driver().set_mouse_capture(true)?;

    event_loop.run(|_, event| {
        if let Some(evt) = event {
            if should_quit(&evt, host) {
                tracing::debug!("quit requested");
                return Ok(ControlFlow::Quit);
            }
            host.handle_event(&evt);
            return Ok(ControlFlow::Continue);
        }
        let size = terminal
            .size()
            .map_err(|e| io::Error::other(e.to_string()))?;
        host.layout(Rect::new(0, 0, size.width, size.height));
        if host.take_redraw_request() {
            terminal
                .draw(|frame| host.render(frame))
                .map_err(|e| io::Error::other(e.to_string()))?;
        }
        Ok(ControlFlow::Continue)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PagerRect;
    use crate::layout::{Orientation, PagerConfig};
    use crate::session::{MemorySession, WindowId, WindowInfo};
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };

    fn host() -> (PagerHost<MemorySession>, WindowId) {
        let mut session = MemorySession::new(Size::new(80, 40), 2);
        let id = session.open_window(
            WindowInfo::new(WindowId(0), "shell", PagerRect::new(0, 0, 40, 20)).on_workspace(0),
        );
        let pager =
            Pager::new(PagerConfig::new(1, Orientation::Horizontal, 10)).with_drag_threshold(1);
        let mut host = PagerHost::new(pager, session);
        host.sync_session();
        host.layout(Rect::new(0, 0, 60, 20));
        (host, id)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn layout_uses_preferred_size_inside_margin() {
        let (host, _) = host();
        // 2:1 screen, cell size 10 -> 20 x 10 per cell, two cells
        assert_eq!(host.pager_area(), Rect::new(1, 1, 40, 10));
    }

    #[test]
    fn secondary_click_opens_positioned_menu() {
        let (mut host, id) = host();
        host.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 3));
        let menu = host.menu().expect("menu open");
        assert_eq!(menu.window(), id);
        assert_eq!(menu.origin(), Point::new(3, 3));
        host.handle_event(&Event::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(host.menu().is_none());
        assert!(host.pager().action_menu().is_none());
    }

    #[test]
    fn menu_close_item_closes_window() {
        let (mut host, id) = host();
        host.handle_event(&mouse(MouseEventKind::Down(MouseButton::Right), 3, 3));
        host.handle_event(&Event::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)));
        host.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!host.session().window_exists(id));
        assert!(host.menu().is_none());
    }

    #[test]
    fn click_below_a_partial_grid_is_ignored() {
        let session = MemorySession::new(Size::new(80, 40), 5);
        let pager = Pager::new(PagerConfig::new(2, Orientation::Horizontal, 10));
        let mut host = PagerHost::new(pager, session);
        host.sync_session();
        host.layout(Rect::new(0, 0, 60, 40));
        assert_eq!(host.pager_area(), Rect::new(1, 1, 40, 20));
        host.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 25));
        assert_eq!(host.session().active_workspace(), Some(0));
        host.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 5, 15));
        assert_eq!(host.session().active_workspace(), Some(2));
    }

    #[test]
    fn click_on_inactive_cell_switches_workspace() {
        let (mut host, _) = host();
        host.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 30, 5));
        assert_eq!(host.session().active_workspace(), Some(1));
    }
}
