//! ratatui widgets for the pager and its action menu.
//!
//! Both widgets draw cell by cell and clip every write to the area they are
//! given, since dragged windows and popups routinely hang over the edges.

use std::ops::Range;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use crate::geometry::PagerRect;
use crate::menu::ActionMenu;
use crate::pager::{PagerSnapshot, WindowView};

/// Which icon a miniature window has room for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconChoice {
    Full(String),
    Mini(char),
    None,
}

/// Prefer the full icon, fall back to the mini icon, else draw none. An
/// icon fits when it is no wider than the window minus its border and the
/// window has an interior row.
pub fn choose_icon(window: &WindowView) -> IconChoice {
    let inner_width = window.rect.width.saturating_sub(2);
    let inner_height = window.rect.height.saturating_sub(2);
    if inner_width <= 0 || inner_height <= 0 {
        return IconChoice::None;
    }
    if let Some(icon) = &window.icon {
        let width = i32::try_from(icon.chars().count()).unwrap_or(i32::MAX);
        if width > 0 && width <= inner_width {
            return IconChoice::Full(icon.clone());
        }
    }
    match window.mini_icon {
        Some(mini) => IconChoice::Mini(mini),
        None => IconChoice::None,
    }
}

/// Draws a [`PagerSnapshot`]. Snapshot coordinates are relative to the
/// top-left corner of the area the widget is rendered into.
pub struct PagerView<'a> {
    snapshot: &'a PagerSnapshot,
}

impl<'a> PagerView<'a> {
    pub fn new(snapshot: &'a PagerSnapshot) -> Self {
        Self { snapshot }
    }
}

impl Widget for PagerView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let clip = area.intersection(buf.area);
        if clip.width == 0 || clip.height == 0 {
            return;
        }
        let canvas = Canvas { area, clip };
        buf.set_style(clip, Style::default().bg(crate::theme::pager_bg()));

        for (index, cell) in self.snapshot.cells.iter().enumerate() {
            if cell.active {
                let inner = PagerRect::new(
                    cell.rect.x + 1,
                    cell.rect.y + 1,
                    cell.rect.width - 2,
                    cell.rect.height - 2,
                );
                canvas.fill(buf, inner, Style::default().bg(crate::theme::active_cell_bg()));
            }
            if let Some(windows) = self.snapshot.windows.get(index) {
                for window in windows {
                    draw_window(buf, &canvas, window, false);
                }
            }
            canvas.outline(buf, cell.rect, Style::default().fg(crate::theme::cell_border()));
        }

        if let Some(dragged) = &self.snapshot.dragged {
            draw_window(buf, &canvas, dragged, true);
        }
    }
}

fn draw_window(buf: &mut Buffer, canvas: &Canvas, window: &WindowView, dragged: bool) {
    let style = crate::theme::window_style(window.active, dragged);
    canvas.fill(buf, window.rect, style);
    canvas.outline(buf, window.rect, style.fg(crate::theme::window_border()));

    let rect = window.rect;
    let row = rect.y.saturating_add(rect.height / 2);
    match choose_icon(window) {
        IconChoice::Full(icon) => {
            let width = i32::try_from(icon.chars().count()).unwrap_or(i32::MAX);
            let x = rect.x.saturating_add((rect.width - width) / 2);
            canvas.text(buf, x, row, &icon, style);
        }
        IconChoice::Mini(mini) => {
            let x = rect.x.saturating_add(rect.width / 2);
            let mut tmp = [0u8; 4];
            canvas.text(buf, x, row, mini.encode_utf8(&mut tmp), style);
        }
        IconChoice::None => {}
    }
}

/// Signed drawing surface anchored at `area` and clipped to `clip`.
struct Canvas {
    area: Rect,
    clip: Rect,
}

impl Canvas {
    fn position(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let sx = i64::from(self.area.x) + i64::from(x);
        let sy = i64::from(self.area.y) + i64::from(y);
        let inside = sx >= i64::from(self.clip.x)
            && sx < i64::from(self.clip.right())
            && sy >= i64::from(self.clip.y)
            && sy < i64::from(self.clip.bottom());
        if !inside {
            return None;
        }
        Some((u16::try_from(sx).ok()?, u16::try_from(sy).ok()?))
    }

    fn put(&self, buf: &mut Buffer, x: i32, y: i32, symbol: &str, style: Style) {
        if let Some(pos) = self.position(x, y)
            && let Some(cell) = buf.cell_mut(pos)
        {
            cell.set_symbol(symbol);
            cell.set_style(style);
        }
    }

    /// Local columns and rows of `rect` that fall inside the clip.
    fn visible(&self, rect: PagerRect) -> (Range<i32>, Range<i32>) {
        let span = |start: i32, len: i32, origin: u16, lo: u16, hi: u16| {
            let start = i64::from(start);
            let end = start + i64::from(len.max(0));
            let from = start.max(i64::from(lo) - i64::from(origin));
            let to = end.min(i64::from(hi) - i64::from(origin)).max(from);
            let narrow = |v: i64| i32::try_from(v).unwrap_or(i32::MAX);
            narrow(from)..narrow(to)
        };
        (
            span(rect.x, rect.width, self.area.x, self.clip.x, self.clip.right()),
            span(rect.y, rect.height, self.area.y, self.clip.y, self.clip.bottom()),
        )
    }

    fn fill(&self, buf: &mut Buffer, rect: PagerRect, style: Style) {
        let (xs, ys) = self.visible(rect);
        for y in ys {
            for x in xs.clone() {
                self.put(buf, x, y, " ", style);
            }
        }
    }

    fn outline(&self, buf: &mut Buffer, rect: PagerRect, style: Style) {
        if rect.width < 2 || rect.height < 2 {
            return;
        }
        let right = rect.x.saturating_add(rect.width - 1);
        let bottom = rect.y.saturating_add(rect.height - 1);
        let (xs, ys) = self.visible(rect);
        for x in xs.filter(|&x| x > rect.x && x < right) {
            self.put(buf, x, rect.y, "─", style);
            self.put(buf, x, bottom, "─", style);
        }
        for y in ys.filter(|&y| y > rect.y && y < bottom) {
            self.put(buf, rect.x, y, "│", style);
            self.put(buf, right, y, "│", style);
        }
        self.put(buf, rect.x, rect.y, "┌", style);
        self.put(buf, right, rect.y, "┐", style);
        self.put(buf, rect.x, bottom, "└", style);
        self.put(buf, right, bottom, "┘", style);
    }

    fn text(&self, buf: &mut Buffer, x: i32, y: i32, text: &str, style: Style) {
        let mut tmp = [0u8; 4];
        for (offset, ch) in (0i32..).zip(text.chars()) {
            self.put(buf, x.saturating_add(offset), y, ch.encode_utf8(&mut tmp), style);
        }
    }
}

/// Draws an [`ActionMenu`] at its own screen position. Render it into the
/// whole frame area.
pub struct ActionMenuView<'a> {
    menu: &'a ActionMenu,
}

impl<'a> ActionMenuView<'a> {
    pub fn new(menu: &'a ActionMenu) -> Self {
        Self { menu }
    }
}

impl Widget for ActionMenuView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let clip = area.intersection(buf.area);
        if clip.width == 0 || clip.height == 0 {
            return;
        }
        // menu bounds are absolute, so anchor the canvas at the buffer origin
        let canvas = Canvas {
            area: Rect::new(0, 0, 0, 0),
            clip,
        };
        let bounds = self.menu.bounds();
        let menu_style = crate::theme::menu_style();
        canvas.fill(buf, bounds, menu_style);
        canvas.outline(buf, bounds, menu_style);
        canvas.text(buf, bounds.x + 2, bounds.y, self.menu.title(), menu_style);

        for (index, item) in self.menu.items().iter().enumerate() {
            let Some(row) = self.menu.item_rect(index) else {
                continue;
            };
            let style = if index == self.menu.selected() {
                crate::theme::menu_selected_style()
            } else {
                menu_style
            };
            canvas.fill(buf, row, style);
            let label = truncate_to_width(&item.label(), row.width.saturating_sub(2));
            canvas.text(buf, row.x + 1, row.y, &label, style);
        }
    }
}

fn truncate_to_width(value: &str, width: i32) -> String {
    let width = usize::try_from(width).unwrap_or(0);
    value.chars().take(width).collect()
}
