//! Testimonial carousel: one voice at a time, slid and faded between
//! records, with arrow zones and a position rail

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::content;
use crate::page::Section;
use crate::sections::{centered, local_rect, local_scroll, put_line};

const CARD_WIDTH: u16 = 64;
const CARD_HEIGHT: u16 = 11;
const SLIDE_COLS: f64 = 12.0;

pub fn render(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let now = app.stage.now();
    let height = app.layout.slot(Section::Testimonials).height.max(1);
    let card_top = card_top(height);

    let record = match content::TESTIMONIALS.get(app.carousel.index()) {
        Some(record) => record,
        None => return,
    };
    let slide = (app.carousel.offset(now) * SLIDE_COLS).round() as i16;
    let faded = app.carousel.opacity(now).clamp(0.0, 1.0);

    let card_width = CARD_WIDTH.min(area.width.saturating_sub(12));
    let card_x = centered(card_width, area.width);
    let local = Rect::new(
        card_x.saturating_add_signed(slide),
        card_top,
        card_width,
        CARD_HEIGHT,
    );
    if let Some(rect) = local_rect(area, cut, local) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.fade(theme.line, faded)))
            .style(Style::default().bg(theme.fade(theme.surface, faded)));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let lines = vec![
            Line::default(),
            Line::from(Span::styled(
                format!("“{}”", record.quote),
                Style::default()
                    .fg(theme.fade(theme.fg, faded))
                    .add_modifier(Modifier::ITALIC),
            )),
            Line::default(),
            Line::from(Span::styled(
                record.author,
                Style::default()
                    .fg(theme.fade(theme.fg, faded))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} • {}", record.role, record.location),
                Style::default().fg(theme.fade(theme.fg_dim, faded)),
            )),
        ];
        let body = Rect::new(
            inner.x + 2,
            inner.y,
            inner.width.saturating_sub(4),
            inner.height,
        );
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((local_scroll(cut, local.y + 1), 0)),
            body,
        );
    }

    // Arrows hold still while the card slides; their zones anchor the
    // pointer hits
    let (left_local, right_local) = arrow_locals(area.width, height);
    for (local, glyph) in [(left_local, "←"), (right_local, "→")] {
        if let Some(rect) = local_rect(area, cut, local) {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!(" {} ", glyph),
                    Style::default().fg(theme.fg_dim),
                ))),
                rect,
            );
        }
    }

    let mut rail: Vec<Span> = Vec::with_capacity(content::TESTIMONIALS.len() * 2);
    for i in 0..content::TESTIMONIALS.len() {
        if i > 0 {
            rail.push(Span::raw(" "));
        }
        if i == app.carousel.index() {
            rail.push(Span::styled("▬▬▬▬", Style::default().fg(theme.crimson)));
        } else {
            rail.push(Span::styled("▬", Style::default().fg(theme.fg_faint)));
        }
    }
    put_line(frame, area, cut, card_top + CARD_HEIGHT + 1, Line::from(rail));
}

/// On-screen hit zones of the previous and next arrows
pub fn arrow_rects(app: &App) -> Option<(Rect, Rect)> {
    let (area, cut) = crate::sections::section_slice(app, Section::Testimonials)?;
    let height = app.layout.slot(Section::Testimonials).height.max(1);
    let (left, right) = arrow_locals(area.width, height);
    match (local_rect(area, cut, left), local_rect(area, cut, right)) {
        (Some(left), Some(right)) => Some((left, right)),
        _ => None,
    }
}

fn card_top(height: u16) -> u16 {
    height.saturating_sub(CARD_HEIGHT + 4) / 2
}

fn arrow_locals(width: u16, height: u16) -> (Rect, Rect) {
    let card_width = CARD_WIDTH.min(width.saturating_sub(12));
    let card_x = centered(card_width, width);
    let y = card_top(height) + CARD_HEIGHT / 2;
    (
        Rect::new(card_x.saturating_sub(5), y, 3, 1),
        Rect::new((card_x + card_width + 2).min(width.saturating_sub(3)), y, 3, 1),
    )
}
