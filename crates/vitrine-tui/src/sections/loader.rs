//! Boot sequence screen: grid rules, the diagnostic cell table, and the
//! progress readout, wiped upward on completion

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use vitrine_core::loader::{CELL_COUNT, H_RULE_COUNT, V_RULE_COUNT};

use crate::app::App;
use crate::content;
use crate::sections::{centered, local_rect};

const CELL_COLUMNS: usize = 4;
const CELL_WIDTH: u16 = 20;
const BAR_WIDTH: u16 = 48;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let loader = match &app.loader {
        Some(loader) => loader,
        None => return,
    };
    let theme = &app.theme;
    let now = app.stage.now();
    let height = area.height.max(1);
    let width = area.width.max(1);

    // The wipe scrolls the whole screen upward; treat the shift as a clip
    // off the top
    let cut = (-loader.wipe_offset(now) * height as f64).round() as u16;

    // Grid rules scale open from the center
    for i in 0..H_RULE_COUNT {
        let y = height / 4 * (i as u16 + 1);
        let scale = loader.rule_h_scale(i, now).clamp(0.0, 1.0);
        let rule_width = (width as f64 * scale).round() as u16;
        if rule_width == 0 {
            continue;
        }
        let local = Rect::new(centered(rule_width, width), y, rule_width, 1);
        if let Some(rect) = local_rect(area, cut, local) {
            frame.render_widget(
                Paragraph::new("─".repeat(rect.width as usize))
                    .style(Style::default().fg(theme.line)),
                rect,
            );
        }
    }
    for i in 0..V_RULE_COUNT {
        let x = width / 4 * (i as u16 + 1);
        let scale = loader.rule_v_scale(i, now).clamp(0.0, 1.0);
        let rule_height = (height as f64 * scale).round() as u16;
        if rule_height == 0 {
            continue;
        }
        let local = Rect::new(x, (height - rule_height) / 2, 1, rule_height);
        if let Some(rect) = local_rect(area, cut, local) {
            let bars = vec![Line::from("│"); rect.height as usize];
            frame.render_widget(
                Paragraph::new(bars).style(Style::default().fg(theme.line)),
                rect,
            );
        }
    }

    render_cells(frame, area, app, cut);

    // Progress bar with a warm gradient across the fill
    let progress = loader.progress(now).clamp(0.0, 1.0);
    let bar_width = BAR_WIDTH.min(width.saturating_sub(4));
    let filled = (progress * bar_width as f64).round() as u16;
    let mut spans = Vec::with_capacity(bar_width as usize);
    for i in 0..bar_width {
        let color = if i < filled {
            crate::theme::blend(theme.ember, theme.blush, i as f64 / bar_width as f64)
        } else {
            theme.surface_hi
        };
        spans.push(Span::styled("█", Style::default().fg(color)));
    }
    let bar_local = Rect::new(centered(bar_width, width), height.saturating_sub(7), bar_width, 1);
    if let Some(rect) = local_rect(area, cut, bar_local) {
        frame.render_widget(Paragraph::new(Line::from(spans)), rect);
    }

    // Brand and status bottom-left, percentage bottom-right, both riding
    // the closing lift
    let lift = (-loader.text_lift(now) * 2.0).round() as u16;
    let text_fade = loader.text_opacity(now).clamp(0.0, 1.0);
    let base = height.saturating_sub(4).saturating_sub(lift);
    let brand_local = Rect::new(4, base, width.saturating_sub(8), 1);
    if let Some(rect) = local_rect(area, cut, brand_local) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                content::BRAND.to_uppercase(),
                Style::default()
                    .fg(theme.fade(theme.fg, text_fade))
                    .add_modifier(Modifier::BOLD),
            ))),
            rect,
        );
    }
    let status_local = Rect::new(4, base + 1, width.saturating_sub(8), 1);
    if let Some(rect) = local_rect(area, cut, status_local) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                content::LOADER_STATUS,
                Style::default().fg(theme.fade(theme.fg_dim, text_fade)),
            ))),
            rect,
        );
    }
    let percent = format!("{:>3}%", (progress * 100.0).round() as u16);
    if let Some(rect) = local_rect(area, cut, Rect::new(width.saturating_sub(9), base, 8, 1)) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                percent,
                Style::default()
                    .fg(theme.fade(theme.crimson, text_fade))
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Right),
            rect,
        );
    }

    // Skip affordance sits outside the wipe
    let hint = Line::from(Span::styled(
        "enter to skip",
        Style::default().fg(theme.fg_faint),
    ));
    frame.render_widget(
        Paragraph::new(hint).alignment(Alignment::Center),
        Rect::new(area.x, area.y + height - 1, width, 1),
    );
}

/// The centered table of diagnostic cells, each label and status fading
/// in on its own shuffled schedule
fn render_cells(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let loader = match &app.loader {
        Some(loader) => loader,
        None => return,
    };
    let theme = &app.theme;
    let now = app.stage.now();
    let width = area.width.max(1);
    let height = area.height.max(1);

    let rows = CELL_COUNT / CELL_COLUMNS;
    let table_width = CELL_WIDTH * CELL_COLUMNS as u16;
    let table_height = rows as u16 * 2;

    // The closing shrink reads as a horizontal inset
    let scale = loader.table_scale(now);
    let inset = ((1.0 - scale) * table_width as f64).round() as u16 / 2;
    let fade = loader.table_opacity(now).clamp(0.0, 1.0);

    let left = centered(table_width, width) + inset;
    let top = centered(table_height, height);

    for i in 0..CELL_COUNT {
        let col = (i % CELL_COLUMNS) as u16;
        let row = (i / CELL_COLUMNS) as u16;
        let label_fade = loader.cell_label_opacity(i, now).clamp(0.0, 1.0) * fade;
        let status_fade = loader.cell_status_opacity(i, now).clamp(0.0, 1.0) * fade;

        let local = Rect::new(left + col * CELL_WIDTH, top + row * 2, CELL_WIDTH, 1);
        if let Some(rect) = local_rect(area, cut, local) {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    Span::styled(
                        format!("DATA_{:04x}", i),
                        Style::default().fg(theme.fade(theme.fg_dim, label_fade)),
                    ),
                    Span::raw(" "),
                    Span::styled(
                        "[SYS_OK]",
                        Style::default().fg(theme.fade(theme.success, status_fade)),
                    ),
                ])),
                rect,
            );
        }
    }
}
