//! Footer: brand recap, link columns, and the legal line

use chrono::{Datelike, Utc};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::content;
use crate::sections::{local_rect, local_scroll};

const MARGIN: u16 = 4;
const BLURB_WIDTH: u16 = 34;
const COLUMN_WIDTH: u16 = 22;

pub fn render(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;

    if let Some(rect) = local_rect(area, cut, Rect::new(0, 0, area.width, 1)) {
        frame.render_widget(
            Paragraph::new("─".repeat(rect.width as usize))
                .style(Style::default().fg(theme.line)),
            rect,
        );
    }

    if let Some(rect) = local_rect(area, cut, Rect::new(MARGIN, 2, area.width.saturating_sub(MARGIN), 1)) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                content::BRAND,
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ))),
            rect,
        );
    }
    let blurb_local = Rect::new(MARGIN, 4, BLURB_WIDTH.min(area.width.saturating_sub(MARGIN)), 3);
    if let Some(rect) = local_rect(area, cut, blurb_local) {
        frame.render_widget(
            Paragraph::new(content::FOOTER_BLURB)
                .style(Style::default().fg(theme.fg_dim))
                .wrap(Wrap { trim: true })
                .scroll((local_scroll(cut, blurb_local.y), 0)),
            rect,
        );
    }
    if let Some(rect) = local_rect(area, cut, Rect::new(MARGIN, 8, area.width.saturating_sub(MARGIN), 1)) {
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(theme.success)),
                Span::styled(content::FOOTER_STATUS, Style::default().fg(theme.fg_dim)),
            ])),
            rect,
        );
    }

    let columns_x = area.width / 2;
    for (i, column) in content::FOOTER_COLUMNS.iter().enumerate() {
        let x = columns_x + i as u16 * COLUMN_WIDTH;
        if x >= area.width {
            break;
        }
        let width = COLUMN_WIDTH.min(area.width - x);
        if let Some(rect) = local_rect(area, cut, Rect::new(x, 2, width, 1)) {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    column.title.to_uppercase(),
                    Style::default().fg(theme.fg_faint),
                ))),
                rect,
            );
        }
        for (row, link) in column.links.iter().enumerate() {
            let local = Rect::new(x, 4 + row as u16, width, 1);
            if let Some(rect) = local_rect(area, cut, local) {
                frame.render_widget(
                    Paragraph::new(Line::from(Span::styled(
                        *link,
                        Style::default().fg(theme.fg_dim),
                    ))),
                    rect,
                );
            }
        }
    }

    render_legal(frame, area, app, cut);
}

fn render_legal(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let height = app.layout.slot(crate::page::Section::Footer).height.max(2);
    let local = Rect::new(MARGIN, height - 2, area.width.saturating_sub(MARGIN * 2), 1);
    let rect = match local_rect(area, cut, local) {
        Some(rect) => rect,
        None => return,
    };

    let notice = format!("© {} {}", Utc::now().year(), content::BRAND);
    let legal = content::FOOTER_LEGAL.join("  ·  ");
    let pad = (rect.width as usize)
        .saturating_sub(UnicodeWidthStr::width(notice.as_str()) + UnicodeWidthStr::width(legal.as_str()));
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(notice, Style::default().fg(theme.fg_faint)),
            Span::raw(" ".repeat(pad)),
            Span::styled(legal, Style::default().fg(theme.fg_faint)),
        ])),
        rect,
    );
}
