//! Pointer overlay: a dot on the pointer cell and a ring easing after
//! it, painted over everything else

use ratatui::{style::Style, Frame};

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    if !app.trail.is_enabled() {
        return;
    }
    let theme = &app.theme;
    let now = app.stage.now();

    if let Some((column, row)) = app.trail.ring() {
        paint(frame, column, row, "◯", Style::default().fg(theme.fade(theme.crimson, 0.6)));
    }
    if let Some((column, row)) = app.trail.dot() {
        let glyph = if app.trail.scale_value(now) < 0.8 {
            "•"
        } else {
            "●"
        };
        paint(frame, column, row, glyph, Style::default().fg(theme.crimson));
    }
}

fn paint(frame: &mut Frame, column: u16, row: u16, glyph: &str, style: Style) {
    let area = frame.area();
    if column >= area.width || row >= area.height {
        return;
    }
    if let Some(cell) = frame.buffer_mut().cell_mut((column, row)) {
        cell.set_symbol(glyph);
        cell.set_style(style);
    }
}
