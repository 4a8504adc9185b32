use ratatui::style::{Color, Modifier, Style};

// Pager colors. Named colors only, so the pager looks the same on 16-color
// terminals as on truecolor ones.

pub fn pager_bg() -> Color {
    Color::Black
}

pub fn cell_border() -> Color {
    Color::Gray
}

pub fn active_cell_bg() -> Color {
    Color::DarkGray
}

// Miniature windows
pub fn window_bg() -> Color {
    Color::Blue
}
pub fn window_fg() -> Color {
    Color::White
}
pub fn active_window_bg() -> Color {
    Color::LightBlue
}
pub fn active_window_fg() -> Color {
    Color::Black
}
pub fn window_border() -> Color {
    Color::White
}
pub fn dragged_window_bg() -> Color {
    Color::Yellow
}

// Action menu
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Gray
}
pub fn menu_selected_fg() -> Color {
    Color::Black
}

pub fn menu_style() -> Style {
    Style::default().bg(menu_bg()).fg(menu_fg())
}

pub fn menu_selected_style() -> Style {
    Style::default()
        .bg(menu_selected_bg())
        .fg(menu_selected_fg())
        .add_modifier(Modifier::BOLD)
}

/// Fill and text style for a miniature window.
pub fn window_style(active: bool, dragged: bool) -> Style {
    let bg = if dragged {
        dragged_window_bg()
    } else if active {
        active_window_bg()
    } else {
        window_bg()
    };
    let fg = if active || dragged {
        active_window_fg()
    } else {
        window_fg()
    };
    Style::default().bg(bg).fg(fg)
}
