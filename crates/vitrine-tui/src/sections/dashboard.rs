//! Pinned sales dashboard: quarterly bar graph plus the priority access
//! form, both driven by scroll position while the section holds still

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Frame,
};

use vitrine_core::form::Field;

use crate::app::{App, EditTarget};
use crate::content;
use crate::page::pin_rows;
use crate::sections::{centered, entrance_lift, local_rect, local_scroll, put_line};

const QUARTER_LABELS: [&str; 8] = ["Q1", "Q2", "Q3", "Q4", "Q5", "Q6", "Q7", "Q8"];
const CHART_TOP: u16 = 5;
const CHART_HEIGHT: u16 = 11;
const FORM_TOP: u16 = 17;
const FORM_HEIGHT: u16 = 12;
const FORM_WIDTH: u16 = 60;

pub fn render(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;

    // The leading rows of the slot are the pinned runway: scroll eats
    // them before any content moves
    let cut = cut.saturating_sub(pin_rows(app.stage.viewport()));

    put_line(
        frame,
        area,
        cut,
        1,
        Line::from(vec![
            Span::styled(
                content::DASHBOARD_TITLE,
                Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                content::DASHBOARD_TITLE_ACCENT,
                Style::default()
                    .fg(theme.crimson)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    );
    put_line(
        frame,
        area,
        cut,
        2,
        Line::from(Span::styled(
            content::DASHBOARD_SUBTITLE,
            Style::default().fg(theme.fg_dim),
        )),
    );
    put_line(
        frame,
        area,
        cut,
        3,
        Line::from(vec![
            Span::styled(
                format!(" {} ", content::DASHBOARD_BADGE_TREND),
                Style::default().fg(theme.trend_fg).bg(theme.trend_bg),
            ),
            Span::raw("  "),
            Span::styled(
                format!(" ● {} ", content::DASHBOARD_BADGE_LIVE),
                Style::default().fg(theme.crimson).bg(theme.live_bg),
            ),
        ]),
    );

    render_chart(frame, area, app, cut);
    render_form(frame, area, app, cut);

    put_line(
        frame,
        area,
        cut,
        FORM_TOP + FORM_HEIGHT + 1,
        Line::from(Span::styled(
            content::PRIORITY_FOOTNOTE,
            Style::default().fg(theme.fg_faint),
        )),
    );
}

fn render_chart(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let chart_width = area.width.saturating_sub(8).min(86);
    let local = Rect::new(centered(chart_width, area.width), CHART_TOP, chart_width, CHART_HEIGHT);
    let rect = match local_rect(area, cut, local) {
        Some(rect) => rect,
        None => return,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.panel_line))
        .style(Style::default().bg(theme.panel_bg));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let channels = app.dashboard.as_ref();
    let bars: Vec<Bar> = content::DASHBOARD_BARS
        .iter()
        .enumerate()
        .map(|(i, &base)| {
            let grown = app.channel_or(channels.and_then(|c| c.bars.get(i).copied()), 1.0);
            Bar::default()
                .value((base as f64 * grown.clamp(0.0, 1.0)).round() as u64)
                .label(Line::from(QUARTER_LABELS[i]))
                .text_value(String::new())
        })
        .collect();
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(6)
        .bar_gap(2)
        .max(110)
        .bar_style(Style::default().fg(theme.crimson))
        .label_style(Style::default().fg(theme.panel_dim))
        .style(Style::default().bg(theme.panel_bg));
    let chart_area = Rect::new(
        inner.x + centered(62.min(inner.width), inner.width),
        inner.y,
        62.min(inner.width),
        inner.height,
    );
    frame.render_widget(chart, chart_area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let reveal = app.channel_or(app.dashboard.as_ref().map(|c| c.form), 1.0);
    if reveal <= 0.01 {
        return;
    }

    let form_width = FORM_WIDTH.min(area.width.saturating_sub(4));
    let local = Rect::new(
        centered(form_width, area.width),
        FORM_TOP + entrance_lift(reveal),
        form_width,
        FORM_HEIGHT,
    );
    let rect = match local_rect(area, cut, local) {
        Some(rect) => rect,
        None => return,
    };

    let bg = theme.fade(theme.panel_bg, reveal);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.fade(theme.panel_line, reveal)))
        .style(Style::default().bg(bg));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let form = &app.priority_form;
    if form.is_submitted() {
        render_submitted(frame, inner, app, reveal);
        return;
    }

    let focused = app.form_target() == Some(EditTarget::Priority);
    let typing = app.editing == Some(EditTarget::Priority);
    let mut lines: Vec<Line> = Vec::with_capacity(inner.height as usize);
    lines.push(Line::from(vec![
        Span::styled(
            content::PRIORITY_TITLE,
            Style::default()
                .fg(theme.panel_fade(theme.panel_fg, reveal))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            content::PRIORITY_TITLE_ACCENT,
            Style::default()
                .fg(theme.panel_fade(theme.crimson, reveal))
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        content::PRIORITY_COPY,
        Style::default().fg(theme.panel_fade(theme.panel_dim, reveal)),
    )));
    lines.push(Line::default());
    for (i, field) in form.fields().iter().enumerate() {
        let caret = focused && form.focus() == i;
        lines.push(field_label(field, theme, reveal));
        lines.push(field_value(field, theme, reveal, caret, caret && typing));
    }
    lines.push(Line::default());
    lines.push(
        Line::from(Span::styled(
            format!("  {}  ", content::PRIORITY_SUBMIT),
            Style::default()
                .fg(theme.panel_fade(theme.panel_bg, reveal))
                .bg(theme.fade(theme.crimson, reveal))
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
    );

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

fn render_submitted(frame: &mut Frame, inner: Rect, app: &App, reveal: f64) {
    let theme = &app.theme;
    let middle = inner.height / 2;
    let lines: Vec<Line> = (0..inner.height)
        .map(|row| {
            if row + 1 == middle {
                Line::from(Span::styled(
                    content::PRIORITY_SUCCESS,
                    Style::default()
                        .fg(theme.panel_fade(theme.success, reveal))
                        .add_modifier(Modifier::BOLD),
                ))
            } else if row == middle + 1 {
                Line::from(Span::styled(
                    content::PRIORITY_SUCCESS_DETAIL,
                    Style::default().fg(theme.panel_fade(theme.panel_dim, reveal)),
                ))
            } else {
                Line::default()
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn field_label(field: &Field, theme: &crate::theme::Theme, fade: f64) -> Line<'static> {
    let color = if field.missing {
        theme.ruby
    } else {
        theme.panel_dim
    };
    Line::from(Span::styled(
        field.label.to_uppercase(),
        Style::default().fg(theme.panel_fade(color, fade)),
    ))
}

fn field_value(
    field: &Field,
    theme: &crate::theme::Theme,
    fade: f64,
    focused: bool,
    typing: bool,
) -> Line<'static> {
    let mut spans = Vec::with_capacity(3);
    if focused {
        spans.push(Span::styled(
            "❯ ",
            Style::default().fg(theme.panel_fade(theme.crimson, fade)),
        ));
    }
    if field.value.is_empty() {
        spans.push(Span::styled(
            field.placeholder.to_string(),
            Style::default().fg(theme.panel_fade(theme.panel_faint, fade)),
        ));
    } else {
        let shown = if field.secret {
            "•".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        spans.push(Span::styled(
            shown,
            Style::default().fg(theme.panel_fade(theme.panel_fg, fade)),
        ));
    }
    if typing {
        spans.push(Span::styled(
            "▌",
            Style::default().fg(theme.panel_fade(theme.crimson, fade)),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_field_value_masks_secrets() {
        let theme = Theme::default();
        let mut field = Field::secret("Password", "••••••••");
        field.value.push_str("hunter2");
        let line = field_value(&field, &theme, 1.0, false, false);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "•••••••");
    }

    #[test]
    fn test_field_value_shows_placeholder_when_empty() {
        let theme = Theme::default();
        let field = Field::required("Full Name", "Jane Doe");
        let line = field_value(&field, &theme, 1.0, true, true);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "❯ Jane Doe▌");
    }
}
