//! Page sections and the full-frame renderer
//!
//! Each section paints one slice of the virtual page. A section gets the
//! screen rect its slice occupies plus the rows clipped off its top, and
//! lays content out in section-local coordinates through the helpers
//! here. The pointer overlay always paints last.

pub mod account;
pub mod cta;
pub mod dashboard;
pub mod features;
pub mod footer;
pub mod hero;
pub mod loader;
pub mod overlay;
pub mod philosophy;
pub mod testimonials;

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::{App, Phase};
use crate::page::Section;

/// Paint one full frame
pub fn render(frame: &mut Frame, app: &App) {
    let screen = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(app.theme.bg)),
        screen,
    );
    match app.phase {
        Phase::Loading => loader::render(frame, screen, app),
        Phase::Page => render_page(frame, app),
    }
    overlay::render(frame, app);
}

fn render_page(frame: &mut Frame, app: &App) {
    let screen = frame.area();
    let scroll = app.stage.scroll_offset();
    for visible in app.layout.visible(scroll) {
        if visible.screen_top >= screen.height {
            continue;
        }
        let area = Rect::new(
            0,
            visible.screen_top,
            screen.width,
            visible.rows.min(screen.height - visible.screen_top),
        );
        let cut = visible.cut;
        match visible.slot.section {
            Section::Hero => hero::render(frame, area, app, cut),
            Section::Dashboard => dashboard::render(frame, area, app, cut),
            Section::Features => features::render(frame, area, app, cut),
            Section::Philosophy => philosophy::render(frame, area, app, cut),
            Section::Testimonials => testimonials::render(frame, area, app, cut),
            Section::Account => account::render(frame, area, app, cut),
            Section::Cta => cta::render(frame, area, app, cut),
            Section::Footer => footer::render(frame, area, app, cut),
        }
    }
}

/// Screen rect and top clip of a section's visible slice
pub(crate) fn section_slice(app: &App, section: Section) -> Option<(Rect, u16)> {
    if app.phase != Phase::Page {
        return None;
    }
    let scroll = app.stage.scroll_offset();
    app.layout
        .visible(scroll)
        .into_iter()
        .find(|v| v.slot.section == section)
        .map(|v| {
            (
                Rect::new(0, v.screen_top, app.layout.width, v.rows),
                v.cut,
            )
        })
}

/// Translate a rect from section-local rows onto the screen slice,
/// clipping against what is visible. `None` when fully clipped.
pub(crate) fn local_rect(area: Rect, cut: u16, local: Rect) -> Option<Rect> {
    let top = local.y;
    let bottom = local.y.saturating_add(local.height);
    let vis_top = cut;
    let vis_bottom = cut.saturating_add(area.height);
    if bottom <= vis_top || top >= vis_bottom || local.width == 0 {
        return None;
    }
    let x = area.x.saturating_add(local.x);
    if x >= area.x + area.width {
        return None;
    }
    let clip_top = top.max(vis_top);
    let clip_bottom = bottom.min(vis_bottom);
    Some(Rect::new(
        x,
        area.y + (clip_top - vis_top),
        local.width.min(area.x + area.width - x),
        clip_bottom - clip_top,
    ))
}

/// Horizontally centered rect of the given width, in local columns
pub(crate) fn centered(width: u16, total: u16) -> u16 {
    total.saturating_sub(width) / 2
}

/// Rows a multi-line paragraph must scroll when its local rect is
/// top-clipped, so the text tracks the page instead of sticking
pub(crate) fn local_scroll(cut: u16, local_y: u16) -> u16 {
    cut.saturating_sub(local_y)
}

/// Rows an entering element still sits below its resting place
pub(crate) fn entrance_lift(value: f64) -> u16 {
    ((1.0 - value.clamp(0.0, 1.0)) * 3.0).round() as u16
}

/// Render one centered line at a section-local row
pub(crate) fn put_line(frame: &mut Frame, area: Rect, cut: u16, row: u16, line: Line) {
    if let Some(rect) = local_rect(area, cut, Rect::new(0, row, area.width, 1)) {
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_rect_untouched_without_cut() {
        let area = Rect::new(0, 5, 100, 40);
        let rect = local_rect(area, 0, Rect::new(10, 3, 20, 4)).unwrap();
        assert_eq!(rect, Rect::new(10, 8, 20, 4));
    }

    #[test]
    fn test_local_rect_clips_top() {
        let area = Rect::new(0, 0, 100, 40);
        // Two of four rows are scrolled off
        let rect = local_rect(area, 5, Rect::new(0, 3, 10, 4)).unwrap();
        assert_eq!(rect, Rect::new(0, 0, 10, 2));
    }

    #[test]
    fn test_local_rect_clips_bottom() {
        let area = Rect::new(0, 0, 100, 10);
        let rect = local_rect(area, 0, Rect::new(0, 8, 10, 6)).unwrap();
        assert_eq!(rect, Rect::new(0, 8, 10, 2));
    }

    #[test]
    fn test_local_rect_none_when_fully_hidden() {
        let area = Rect::new(0, 0, 100, 10);
        assert!(local_rect(area, 20, Rect::new(0, 5, 10, 4)).is_none());
        assert!(local_rect(area, 0, Rect::new(0, 30, 10, 4)).is_none());
        assert!(local_rect(area, 0, Rect::new(120, 2, 10, 1)).is_none());
    }

    #[test]
    fn test_entrance_lift_settles_to_zero() {
        assert_eq!(entrance_lift(0.0), 3);
        assert_eq!(entrance_lift(0.5), 2);
        assert_eq!(entrance_lift(1.0), 0);
        // Overshooting eases clamp instead of lifting upward
        assert_eq!(entrance_lift(1.2), 0);
    }
}
