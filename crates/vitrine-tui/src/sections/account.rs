//! Account panel: sign-in and register variants sharing one card, the
//! inactive variant reachable from the prompt row

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use vitrine_core::form::Field;

use crate::app::{AccountVariant, App, EditTarget};
use crate::content;
use crate::page::Section;
use crate::sections::{centered, entrance_lift, local_rect, local_scroll};

const PANEL_WIDTH: u16 = 58;

struct Copydeck {
    title: &'static str,
    copy: &'static str,
    button: &'static str,
    prompt: &'static str,
    switch: &'static str,
    success: &'static str,
}

fn copydeck(variant: AccountVariant) -> Copydeck {
    match variant {
        AccountVariant::SignIn => Copydeck {
            title: content::SIGN_IN_TITLE,
            copy: content::SIGN_IN_COPY,
            button: content::SIGN_IN_BUTTON,
            prompt: content::SIGN_IN_PROMPT,
            switch: content::REGISTER_BUTTON,
            success: content::SIGN_IN_SUCCESS,
        },
        AccountVariant::Register => Copydeck {
            title: content::REGISTER_TITLE,
            copy: content::REGISTER_COPY,
            button: content::REGISTER_BUTTON,
            prompt: content::REGISTER_PROMPT,
            switch: content::SIGN_IN_BUTTON,
            success: content::REGISTER_SUCCESS,
        },
    }
}

pub fn render(frame: &mut Frame, area: Rect, app: &App, cut: u16) {
    let theme = &app.theme;
    let deck = copydeck(app.account_variant);
    let risen = app.channel_or(app.account.as_ref().map(|c| c.panel), 1.0);
    if risen <= 0.01 {
        return;
    }

    let settled = panel_local(app, area.width);
    let local = Rect::new(
        settled.x,
        settled.y + entrance_lift(risen),
        settled.width,
        settled.height,
    );
    let rect = match local_rect(area, cut, local) {
        Some(rect) => rect,
        None => return,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.fade(theme.line, risen)))
        .style(Style::default().bg(theme.fade(theme.surface, risen)));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let form = &app.account_form;
    let mut lines: Vec<Line> = Vec::with_capacity(inner.height as usize);
    if form.is_submitted() {
        for _ in 0..inner.height.saturating_sub(3) / 2 {
            lines.push(Line::default());
        }
        lines.push(
            Line::from(Span::styled(
                deck.success,
                Style::default()
                    .fg(theme.fade(theme.success, risen))
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                deck.copy,
                Style::default().fg(theme.fade(theme.fg_dim, risen)),
            ))
            .alignment(Alignment::Center),
        );
    } else {
        let focused = app.form_target() == Some(EditTarget::Account);
        let typing = app.editing == Some(EditTarget::Account);
        lines.push(Line::from(Span::styled(
            deck.title,
            Style::default()
                .fg(theme.fade(theme.fg, risen))
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            deck.copy,
            Style::default().fg(theme.fade(theme.fg_dim, risen)),
        )));
        lines.push(Line::default());
        for (i, field) in form.fields().iter().enumerate() {
            let caret = focused && form.focus() == i;
            lines.push(field_label(field, theme, risen));
            lines.push(field_value(field, theme, risen, caret, caret && typing));
        }
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                format!("  {}  ", deck.button),
                Style::default()
                    .fg(theme.fg)
                    .bg(theme.fade(theme.crimson, risen))
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
        );
        lines.push(Line::default());
        lines.push(
            Line::from(vec![
                Span::styled(deck.prompt, Style::default().fg(theme.fade(theme.fg_dim, risen))),
                Span::raw(" "),
                Span::styled(
                    deck.switch,
                    Style::default().fg(theme.fade(theme.crimson, risen)),
                ),
                Span::styled(" [r]", Style::default().fg(theme.fade(theme.fg_faint, risen))),
            ])
            .alignment(Alignment::Center),
        );
    }

    let body = Rect::new(
        inner.x + 2,
        inner.y,
        inner.width.saturating_sub(4),
        inner.height,
    );
    frame.render_widget(
        Paragraph::new(lines).scroll((local_scroll(cut, local.y + 1), 0)),
        body,
    );
}

/// On-screen zone of the variant switch in the prompt row
pub fn toggle_rect(app: &App) -> Option<Rect> {
    let (area, cut) = crate::sections::section_slice(app, Section::Account)?;
    let deck = copydeck(app.account_variant);
    let panel = panel_local(app, area.width);
    let body_width = panel.width.saturating_sub(6);
    let prompt_width =
        (deck.prompt.len() + 1 + deck.switch.len() + 4) as u16;
    let x = panel.x + 3 + centered(prompt_width, body_width) + deck.prompt.len() as u16 + 1;
    let y = panel.y + panel.height.saturating_sub(2);
    local_rect(area, cut, Rect::new(x, y, deck.switch.len() as u16 + 4, 1))
}

/// Settled local rect of the card, sized to the active variant
fn panel_local(app: &App, width: u16) -> Rect {
    let height = app.layout.slot(Section::Account).height.max(1);
    let fields = app.account_form.fields().len() as u16;
    let panel_height = 9 + fields * 2;
    let panel_width = PANEL_WIDTH.min(width.saturating_sub(4));
    Rect::new(
        centered(panel_width, width),
        height.saturating_sub(panel_height) / 2,
        panel_width,
        panel_height,
    )
}

fn field_label(field: &Field, theme: &crate::theme::Theme, fade: f64) -> Line<'static> {
    let color = if field.missing {
        theme.ruby
    } else {
        theme.fg_faint
    };
    Line::from(Span::styled(
        field.label.to_uppercase(),
        Style::default().fg(theme.fade(color, fade)),
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
            Style::default().fg(theme.fade(theme.crimson, fade)),
        ));
    }
    if field.value.is_empty() {
        spans.push(Span::styled(
            field.placeholder.to_string(),
            Style::default().fg(theme.fade(theme.fg_faint, fade)),
        ));
    } else {
        let shown = if field.secret {
            "•".repeat(field.value.chars().count())
        } else {
            field.value.clone()
        };
        spans.push(Span::styled(
            shown,
            Style::default().fg(theme.fade(theme.fg, fade)),
        ));
    }
    if typing {
        spans.push(Span::styled(
            "▌",
            Style::default().fg(theme.fade(theme.crimson, fade)),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copydeck_switch_names_the_other_variant() {
        assert_eq!(copydeck(AccountVariant::SignIn).switch, content::REGISTER_BUTTON);
        assert_eq!(copydeck(AccountVariant::Register).switch, content::SIGN_IN_BUTTON);
    }
}
