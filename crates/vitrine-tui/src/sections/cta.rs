//! Closing call to action: a gradient panel that squeezes open and a
//! button that leads back to the top of the page

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::content;
use crate::page::Section;
use crate::sections::{centered, local_rect, local_scroll};
use crate::theme::blend;

const PANEL_WIDTH: u16 = 70;
const PANEL_HEIGHT: u16 = 12;
const TITLE_ROW: u16 = 2;
const COPY_ROW: u16 = 4;
const BUTTON_ROW: u16 = 8;

pub fn render(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let risen = app.channel_or(app.cta.as_ref().map(|c| c.panel), 1.0);
    if risen <= 0.01 {
        return;
    }

    let settled = panel_local(app, area.width);
    let inset = ((1.0 - risen.clamp(0.0, 1.0)) * 3.0).round() as u16;
    let panel = Rect::new(
        settled.x + inset,
        settled.y,
        settled.width.saturating_sub(inset * 2),
        settled.height,
    );

    for row in 0..panel.height {
        let color = theme.fade(
            blend(theme.crimson, theme.ruby, row as f64 / panel.height as f64),
            risen,
        );
        let local = Rect::new(panel.x, panel.y + row, panel.width, 1);
        let rect = match local_rect(area, cut, local) {
            Some(rect) => rect,
            None => continue,
        };
        match row {
            TITLE_ROW => frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    content::CTA_TITLE,
                    Style::default()
                        .fg(theme.fade(theme.fg, risen))
                        .add_modifier(Modifier::BOLD),
                )))
                .alignment(Alignment::Center)
                .style(Style::default().bg(color)),
                rect,
            ),
            BUTTON_ROW => {
                frame.render_widget(Block::default().style(Style::default().bg(color)), rect);
                render_button(frame, area, app, cut, panel, risen);
            }
            _ => frame.render_widget(Block::default().style(Style::default().bg(color)), rect),
        }
    }

    // The copy spans two rows; one gradient stop covers both
    let copy_local = Rect::new(panel.x + 2, panel.y + COPY_ROW, panel.width.saturating_sub(4), 2);
    if let Some(rect) = local_rect(area, cut, copy_local) {
        let color = theme.fade(
            blend(
                theme.crimson,
                theme.ruby,
                COPY_ROW as f64 / panel.height as f64,
            ),
            risen,
        );
        frame.render_widget(
            Paragraph::new(content::CTA_COPY)
                .style(
                    Style::default()
                        .fg(theme.fade(theme.blush, risen))
                        .bg(color),
                )
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .scroll((local_scroll(cut, copy_local.y), 0)),
            rect,
        );
    }
}

fn render_button(frame: &mut Frame, area: Rect, app: &App, cut: u16, panel: Rect, risen: f64) {
    let theme = &app.theme;
    let (mx, my) = app.cta_magnet.offset(app.stage.now());
    let label_width = content::CTA_BUTTON.len() as u16 + 4;
    let local = Rect::new(
        (panel.x + centered(label_width, panel.width)).saturating_add_signed(mx.round() as i16),
        (panel.y + BUTTON_ROW).saturating_add_signed(my.round() as i16),
        label_width,
        1,
    );
    if let Some(rect) = local_rect(area, cut, local) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {}  ", content::CTA_BUTTON),
                Style::default()
                    .fg(theme.crimson)
                    .bg(theme.fade(theme.fg, risen))
                    .add_modifier(Modifier::BOLD),
            ))),
            rect,
        );
    }
}

/// Settled on-screen cell rect of the button
pub fn button_rect(app: &App) -> Option<Rect> {
    let (area, cut) = crate::sections::section_slice(app, Section::Cta)?;
    let panel = panel_local(app, area.width);
    let label_width = content::CTA_BUTTON.len() as u16 + 4;
    let local = Rect::new(
        panel.x + centered(label_width, panel.width),
        panel.y + BUTTON_ROW,
        label_width,
        1,
    );
    local_rect(area, cut, local)
}

fn panel_local(app: &App, width: u16) -> Rect {
    let height = app.layout.slot(Section::Cta).height.max(1);
    let panel_width = PANEL_WIDTH.min(width.saturating_sub(8));
    Rect::new(
        centered(panel_width, width),
        height.saturating_sub(PANEL_HEIGHT) / 2,
        panel_width,
        PANEL_HEIGHT,
    )
}
