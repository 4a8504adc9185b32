//! Bridges terminal mouse events to pager pointer calls.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::Point;
use crate::interaction::PointerButton;

/// A pointer event in pager-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press { point: Point, button: PointerButton },
    Motion { point: Point },
    Release { point: Point, button: PointerButton },
}

impl PointerEvent {
    pub fn point(&self) -> Point {
        match *self {
            PointerEvent::Press { point, .. }
            | PointerEvent::Motion { point }
            | PointerEvent::Release { point, .. } => point,
        }
    }
}

impl From<MouseButton> for PointerButton {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => PointerButton::Primary,
            MouseButton::Middle => PointerButton::Middle,
            MouseButton::Right => PointerButton::Secondary,
        }
    }
}

/// Translate a mouse event relative to the pager's top-left corner
/// `origin`. Scroll events are not pointer input and yield `None`.
pub fn pointer_event(mouse: &MouseEvent, origin: Point) -> Option<PointerEvent> {
    let point = Point::new(i32::from(mouse.column), i32::from(mouse.row)).relative_to(origin);
    match mouse.kind {
        MouseEventKind::Down(button) => Some(PointerEvent::Press {
            point,
            button: button.into(),
        }),
        MouseEventKind::Up(button) => Some(PointerEvent::Release {
            point,
            button: button.into(),
        }),
        MouseEventKind::Drag(_) | MouseEventKind::Moved => Some(PointerEvent::Motion { point }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn coordinates_are_pager_local() {
        let down = mouse(MouseEventKind::Down(MouseButton::Left), 12, 7);
        let event = pointer_event(&down, Point::new(10, 5));
        assert_eq!(
            event,
            Some(PointerEvent::Press {
                point: Point::new(2, 2),
                button: PointerButton::Primary
            })
        );
    }

    #[test]
    fn points_left_of_the_pager_go_negative() {
        let drag = mouse(MouseEventKind::Drag(MouseButton::Left), 3, 0);
        let event = pointer_event(&drag, Point::new(10, 5));
        assert_eq!(event, Some(PointerEvent::Motion { point: Point::new(-7, -5) }));
    }

    #[test]
    fn buttons_map_to_conventional_numbers() {
        let up = mouse(MouseEventKind::Up(MouseButton::Right), 0, 0);
        let release = pointer_event(&up, Point::default());
        let Some(PointerEvent::Release { button, .. }) = release else {
            panic!("expected release, got {release:?}");
        };
        assert_eq!(button.number(), 3);
        assert_eq!(PointerButton::from(MouseButton::Middle).number(), 2);
    }

    #[test]
    fn every_pointer_event_reports_its_point() {
        let origin = Point::new(2, 1);
        for kind in [
            MouseEventKind::Down(MouseButton::Left),
            MouseEventKind::Moved,
            MouseEventKind::Up(MouseButton::Middle),
        ] {
            let event = pointer_event(&mouse(kind, 7, 4), origin).expect("pointer event");
            assert_eq!(event.point(), Point::new(5, 3));
        }
    }

    #[test]
    fn scroll_is_ignored() {
        assert_eq!(pointer_event(&mouse(MouseEventKind::ScrollUp, 1, 1), Point::default()), None);
    }
}
