//! Craft section: three feature cards over the live quality readouts,
//! a revealing signal curve beside the shuffling diagnostic window

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{self, Canvas, Points},
        Block, Borders, Paragraph, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

use vitrine_core::diagnostics::FeedStatus;

use crate::app::App;
use crate::content;
use crate::sections::{entrance_lift, local_rect, local_scroll};

const CARD_GLYPHS: [&str; 3] = ["◈", "◉", "∿"];
const CARD_TOP: u16 = 1;
const CARD_HEIGHT: u16 = 8;
const PANEL_TOP: u16 = 11;
const PANEL_HEIGHT: u16 = 10;
const FEED_ROW: u16 = 22;

/// Quadratic arcs of the quality signal, in canvas units with y up
const SIGNAL_ARCS: [((f64, f64), (f64, f64), (f64, f64)); 5] = [
    ((0.0, 10.0), (20.0, 15.0), (40.0, 40.0)),
    ((40.0, 40.0), (60.0, 65.0), (80.0, 30.0)),
    ((80.0, 30.0), (100.0, -5.0), (120.0, 60.0)),
    ((120.0, 60.0), (140.0, 125.0), (160.0, 50.0)),
    ((160.0, 50.0), (180.0, -25.0), (200.0, 70.0)),
];
const ARC_STEPS: usize = 16;
const SIGNAL_X_MAX: f64 = 200.0;
const SIGNAL_Y_MAX: f64 = 90.0;

pub fn render(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    render_cards(frame, area, app, cut);

    let margin = 4u16.min(area.width / 10);
    let span = area.width.saturating_sub(margin * 2);
    let signal_width = span * 3 / 5;
    let diag_width = span.saturating_sub(signal_width + 2);

    render_signal(
        frame,
        area,
        app,
        cut,
        Rect::new(margin, PANEL_TOP, signal_width, PANEL_HEIGHT),
    );
    render_diagnostics(
        frame,
        area,
        app,
        cut,
        Rect::new(margin + signal_width + 2, PANEL_TOP, diag_width, PANEL_HEIGHT),
    );
    render_feed(frame, area, app, cut, margin, span);
}

fn render_cards(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let margin = 4u16.min(area.width / 10);
    let span = area.width.saturating_sub(margin * 2);
    let card_width = span.saturating_sub(4) / 3;
    if card_width < 10 {
        return;
    }

    for (i, card) in content::FEATURE_CARDS.iter().enumerate() {
        let risen = app.channel_or(
            app.features.as_ref().and_then(|c| c.cards.get(i).copied()),
            1.0,
        );
        if risen <= 0.01 {
            continue;
        }
        let local = Rect::new(
            margin + i as u16 * (card_width + 2),
            CARD_TOP + entrance_lift(risen),
            card_width,
            CARD_HEIGHT,
        );
        let rect = match local_rect(area, cut, local) {
            Some(rect) => rect,
            None => continue,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.fade(theme.line, risen)))
            .style(Style::default().bg(theme.fade(theme.surface, risen)));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        let body = Rect::new(
            inner.x + 2,
            inner.y,
            inner.width.saturating_sub(4),
            inner.height,
        );
        let body_scroll = local_scroll(cut, local.y + 1);
        let lines = vec![
            Line::from(Span::styled(
                CARD_GLYPHS[i],
                Style::default().fg(theme.fade(theme.crimson, risen)),
            )),
            Line::default(),
            Line::from(Span::styled(
                card.title,
                Style::default()
                    .fg(theme.fade(theme.fg, risen))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                card.tagline,
                Style::default().fg(theme.fade(theme.fg_dim, risen)),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .scroll((body_scroll, 0)),
            body,
        );
    }
}

/// The signal sweeps left to right, the curve tracing in behind a set
/// of marker dots at its knots
fn render_signal(frame: &mut Frame, area: Rect, app: &App, cut: u16, local: Rect) {
    let theme = &app.theme;
    let rect = match local_rect(area, cut, local) {
        Some(rect) => rect,
        None => return,
    };
    if rect.height < local.height {
        // A partially scrolled canvas would re-project the whole curve;
        // hold it back until the full panel is on screen
        return;
    }
    let sweep = app
        .channel_or(app.features.as_ref().map(|c| c.signal), 1.0)
        .clamp(0.0, 1.0);

    let line_color = theme.crimson;
    let dot_color = theme.blush;
    let reach = sweep * SIGNAL_X_MAX;
    let knots: Vec<(f64, f64)> = SIGNAL_ARCS
        .iter()
        .map(|&(p0, _, _)| p0)
        .chain(std::iter::once(SIGNAL_ARCS[4].2))
        .filter(|&(x, _)| x <= reach)
        .collect();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, SIGNAL_X_MAX])
        .y_bounds([0.0, SIGNAL_Y_MAX])
        .paint(|ctx| {
            let mut prev: Option<(f64, f64)> = None;
            for &(p0, c, p1) in SIGNAL_ARCS.iter() {
                for step in 0..=ARC_STEPS {
                    let t = step as f64 / ARC_STEPS as f64;
                    let point = quad_point(p0, c, p1, t);
                    if point.0 > reach {
                        prev = None;
                        break;
                    }
                    if let Some(from) = prev {
                        ctx.draw(&canvas::Line {
                            x1: from.0,
                            y1: from.1,
                            x2: point.0,
                            y2: point.1,
                            color: line_color,
                        });
                    }
                    prev = Some(point);
                }
            }
            ctx.layer();
            ctx.draw(&Points {
                coords: &knots,
                color: dot_color,
            });
        });
    frame.render_widget(canvas, rect);
}

fn render_diagnostics(frame: &mut Frame, area: Rect, app: &App, cut: u16, local: Rect) {
    let theme = &app.theme;
    let rect = match local_rect(area, cut, local) {
        Some(rect) => rect,
        None => return,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.line))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let now = app.stage.now();
    for (slot, &entry) in app.diagnostics.rows().iter().enumerate() {
        let text = match content::DIAGNOSTIC_ROWS.get(entry) {
            Some(text) => *text,
            None => continue,
        };
        let flipped = app.diagnostics.row_entrance(slot, now).clamp(0.0, 1.0);
        let indent = ((1.0 - flipped) * 4.0).round() as u16;
        let y = inner.y + 1 + slot as u16 * 2;
        if y >= inner.y + inner.height {
            break;
        }
        let row = Rect::new(
            (inner.x + 2 + indent).min(inner.x + inner.width),
            y,
            inner.width.saturating_sub(4 + indent),
            1,
        );
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("▸ ", Style::default().fg(theme.fade(theme.crimson, flipped))),
                Span::styled(text, Style::default().fg(theme.fade(theme.fg, flipped))),
            ])),
            row,
        );
    }
}

/// One-line telemetry readout with a typed cursor and a status lamp
/// pinned to the right edge
fn render_feed(frame: &mut Frame, area: Rect, app: &App, cut: u16, margin: u16, span: u16) {
    let theme = &app.theme;
    let local = Rect::new(margin, FEED_ROW, span, 1);
    let rect = match local_rect(area, cut, local) {
        Some(rect) => rect,
        None => return,
    };

    let status = app.feed.status();
    let lamp = format!("● {}", status.label());
    let lamp_color = match status {
        FeedStatus::Typing => theme.blush,
        FeedStatus::Live => theme.success,
        FeedStatus::Scrambling => theme.ember,
    };

    let mut spans = vec![
        Span::styled("❯ ", Style::default().fg(theme.crimson)),
        Span::styled(app.feed.line().to_string(), Style::default().fg(theme.fg)),
    ];
    let mut used = 2 + UnicodeWidthStr::width(app.feed.line());
    if status == FeedStatus::Typing {
        spans.push(Span::styled("▌", Style::default().fg(theme.crimson)));
        used += 1;
    }
    let pad = (rect.width as usize).saturating_sub(used + UnicodeWidthStr::width(lamp.as_str()));
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(lamp, Style::default().fg(lamp_color)));
    frame.render_widget(Paragraph::new(Line::from(spans)), rect);
}

fn quad_point(p0: (f64, f64), c: (f64, f64), p1: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    (
        u * u * p0.0 + 2.0 * u * t * c.0 + t * t * p1.0,
        u * u * p0.1 + 2.0 * u * t * c.1 + t * t * p1.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_point_hits_endpoints() {
        let (p0, c, p1) = SIGNAL_ARCS[0];
        assert_eq!(quad_point(p0, c, p1, 0.0), p0);
        assert_eq!(quad_point(p0, c, p1, 1.0), p1);
    }

    #[test]
    fn test_arcs_join_end_to_end() {
        for pair in SIGNAL_ARCS.windows(2) {
            assert_eq!(pair[0].2, pair[1].0);
        }
    }
}
