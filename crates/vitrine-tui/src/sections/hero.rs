//! Opening section: the rotating torus behind the brand introduction

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Paragraph, Wrap,
    },
    Frame,
};

use crate::app::App;
use crate::content;
use crate::page::Section;
use crate::sections::{centered, entrance_lift, local_rect, local_scroll, put_line};

/// Scene units spanned by the full section height; the torus projects
/// within roughly ±1.2
const SCENE_SPAN: f64 = 2.4;
const SPINNER: [&str; 4] = ["◇", "◈", "◆", "◈"];
const SPINNER_INTERVAL_MS: u128 = 300;

pub fn render(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let now = app.stage.now();
    let height = app.layout.slot(Section::Hero).height.max(1);

    let canvas_fade = app.channel_or(app.hero.as_ref().map(|h| h.canvas), 1.0);
    if canvas_fade > 0.01 {
        render_scene(frame, area, app, cut, height, canvas_fade);
    }

    let origin = text_origin(height);
    let spinner = SPINNER[(now.as_millis() / SPINNER_INTERVAL_MS) as usize % SPINNER.len()];

    let brand_fade = app.channel_or(app.hero.as_ref().map(|h| h.brand), 1.0);
    put_line(
        frame,
        area,
        cut,
        origin + entrance_lift(brand_fade),
        Line::from(vec![
            Span::styled(spinner, Style::default().fg(theme.fade(theme.crimson, brand_fade))),
            Span::raw(" "),
            Span::styled(
                content::HERO_BADGE.to_uppercase(),
                Style::default().fg(theme.fade(theme.blush, brand_fade)),
            ),
        ]),
    );
    put_line(
        frame,
        area,
        cut,
        origin + 2 + entrance_lift(brand_fade),
        Line::from(Span::styled(
            letterspace(content::BRAND),
            Style::default().fg(theme.fade(theme.fg_dim, brand_fade)),
        )),
    );

    let headline_fade = app.channel_or(app.hero.as_ref().map(|h| h.headline), 1.0);
    let headline_lift = entrance_lift(headline_fade);
    put_line(
        frame,
        area,
        cut,
        origin + 4 + headline_lift,
        Line::from(Span::styled(
            content::HERO_TITLE_ACCENT,
            Style::default()
                .fg(theme.fade(theme.crimson, headline_fade))
                .add_modifier(Modifier::BOLD),
        )),
    );
    put_line(
        frame,
        area,
        cut,
        origin + 5 + headline_lift,
        Line::from(Span::styled(
            content::HERO_TITLE,
            Style::default()
                .fg(theme.fade(theme.fg, headline_fade))
                .add_modifier(Modifier::BOLD),
        )),
    );

    let copy_fade = app.channel_or(app.hero.as_ref().map(|h| h.copy), 1.0);
    let copy_width = 64.min(area.width.saturating_sub(4));
    let copy_local = Rect::new(
        centered(copy_width, area.width),
        origin + 7 + entrance_lift(copy_fade),
        copy_width,
        3,
    );
    if let Some(rect) = local_rect(area, cut, copy_local) {
        frame.render_widget(
            Paragraph::new(content::HERO_COPY)
                .style(Style::default().fg(theme.fade(theme.fg_dim, copy_fade)))
                .wrap(Wrap { trim: true })
                .alignment(Alignment::Center)
                .scroll((local_scroll(cut, copy_local.y), 0)),
            rect,
        );
    }

    let button_fade = app.channel_or(app.hero.as_ref().map(|h| h.button), 1.0);
    let (mx, my) = app.hero_magnet.offset(now);
    let local = button_local(area.width, height);
    let local = Rect::new(
        local.x.saturating_add_signed(mx.round() as i16),
        (local.y + entrance_lift(button_fade)).saturating_add_signed(my.round() as i16),
        local.width,
        local.height,
    );
    if let Some(rect) = local_rect(area, cut, local) {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("  {}  ", content::HERO_BUTTON),
                Style::default()
                    .fg(theme.panel_fg)
                    .bg(theme.fade(theme.panel_bg, button_fade))
                    .add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center),
            rect,
        );
    }
}

/// Settled on-screen cell rect of the call to action
pub fn button_rect(app: &App) -> Option<Rect> {
    let (area, cut) = crate::sections::section_slice(app, Section::Hero)?;
    let height = app.layout.slot(Section::Hero).height.max(1);
    local_rect(area, cut, button_local(area.width, height))
}

fn text_origin(height: u16) -> u16 {
    (height / 2).saturating_sub(7)
}

fn button_local(width: u16, height: u16) -> Rect {
    let label_width = content::HERO_BUTTON.len() as u16 + 4;
    Rect::new(
        centered(label_width, width),
        text_origin(height) + 11,
        label_width,
        1,
    )
}

fn letterspace(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    for c in text.to_uppercase().chars() {
        if c == ' ' {
            out.push(' ');
        } else {
            out.push(c);
        }
        out.push(' ');
    }
    out.trim_end().to_string()
}

/// Project the torus into the visible slice. Cells are twice as tall as
/// wide, so columns map to half the scene units rows do.
fn render_scene(frame: &mut Frame, area: Rect, app: &App, cut: u16, height: u16, fade: f64) {
    let theme = &app.theme;
    let scene = app.scene.frame(app.stage.now());

    let unit_rows = SCENE_SPAN / height as f64;
    let x_half = area.width as f64 * unit_rows / 4.0;
    let y_top = SCENE_SPAN / 2.0 - unit_rows * cut as f64;
    let y_bottom = y_top - unit_rows * area.height as f64;

    let near_color = theme.fade(theme.crimson, fade);
    let far_color = theme.fade(theme.fg_faint, fade * 0.7);
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([-x_half, x_half])
        .y_bounds([y_bottom, y_top])
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &scene.far,
                color: far_color,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &scene.near,
                color: near_color,
            });
        });
    frame.render_widget(canvas, area);
}
