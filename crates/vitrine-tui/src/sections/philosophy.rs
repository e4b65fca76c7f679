//! Manifesto section: the aside column and the word-by-word statement,
//! the statement drifting slowly against the scroll

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
use crate::sections::{entrance_lift, local_rect, local_scroll};

const ASIDE_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let height = app.layout.slot(Section::Philosophy).height.max(1);
    let base = (height.saturating_sub(8)) / 2;

    let aside_column = area.width * 3 / 10;
    let statement_left = aside_column + 4;

    // Left column: the counterpoint, held behind a rule
    let aside_width = aside_column.saturating_sub(8).max(12).min(area.width);
    let aside_local = Rect::new(6, base, aside_width, ASIDE_HEIGHT);
    if let Some(rect) = local_rect(area, cut, aside_local) {
        let block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(theme.crimson));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        frame.render_widget(
            Paragraph::new(content::PHILOSOPHY_ASIDE)
                .style(Style::default().fg(theme.fg_dim))
                .wrap(Wrap { trim: true })
                .scroll((local_scroll(cut, aside_local.y), 0)),
            Rect::new(inner.x + 1, inner.y, inner.width.saturating_sub(1), inner.height),
        );
    }

    // Right column: each word of the lead fades in on its own, and the
    // whole statement drifts down as the page passes
    let words = |i: usize| {
        app.channel_or(
            app.philosophy.as_ref().and_then(|c| c.words.get(i).copied()),
            1.0,
        )
    };
    let drift = app
        .channel_or(app.philosophy.as_ref().map(|c| c.drift), 0.0)
        .max(0.0)
        .round() as u16;
    let top = (base + drift).saturating_sub(entrance_lift(words(0)));

    let statement_width = area.width.saturating_sub(statement_left + 4);
    let local = Rect::new(statement_left, top, statement_width, 5);
    if let Some(rect) = local_rect(area, cut, local) {
        let lead_style = |v: f64| Style::default().fg(theme.fade(theme.fg, v));
        let lines = vec![
            Line::from(vec![
                Span::styled(content::PHILOSOPHY_LEAD[0], lead_style(words(0))),
                Span::raw(" "),
                Span::styled(content::PHILOSOPHY_LEAD[1], lead_style(words(1))),
                Span::raw(" "),
                Span::styled(content::PHILOSOPHY_LEAD[2], lead_style(words(2))),
            ]),
            Line::default(),
            Line::from(Span::styled(
                content::PHILOSOPHY_ACCENT_CRIMSON,
                Style::default()
                    .fg(theme.fade(theme.crimson, words(2)))
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(content::PHILOSOPHY_JOIN, lead_style(words(3))),
                Span::raw(" "),
                Span::styled(
                    content::PHILOSOPHY_ACCENT_RUBY,
                    Style::default()
                        .fg(theme.fade(theme.ruby, words(3)))
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines).scroll((local_scroll(cut, local.y), 0)),
            rect,
        );
    }
}
