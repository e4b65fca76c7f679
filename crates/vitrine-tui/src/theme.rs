use ratatui::style::Color;

/// Runtime theme with configurable colors
///
/// The page runs on the dark palette; the sales dashboard section switches
/// to the light `panel_*` group.
#[derive(Debug, Clone)]
pub struct Theme {
    // Page colors
    pub bg: Color,
    pub surface: Color,
    pub surface_hi: Color,
    pub line: Color,

    // Foreground tiers
    pub fg: Color,
    pub fg_dim: Color,
    pub fg_faint: Color,

    // Brand colors
    pub crimson: Color,
    pub ember: Color,
    pub blush: Color,
    pub ruby: Color,
    pub success: Color,

    // Light dashboard panel
    pub panel_bg: Color,
    pub panel_line: Color,
    pub panel_fg: Color,
    pub panel_dim: Color,
    pub panel_faint: Color,
    pub trend_bg: Color,
    pub trend_fg: Color,
    pub live_bg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Obsidian and crimson house palette
        Self {
            bg: Color::Rgb(0x05, 0x05, 0x05),
            surface: Color::Rgb(0x11, 0x11, 0x11),
            surface_hi: Color::Rgb(0x1c, 0x1c, 0x1c),
            line: Color::Rgb(0x2a, 0x2a, 0x2a),
            fg: Color::Rgb(0xff, 0xff, 0xff),
            fg_dim: Color::Rgb(0x85, 0x85, 0x85),
            fg_faint: Color::Rgb(0x4f, 0x4f, 0x4f),
            crimson: Color::Rgb(0xdc, 0x26, 0x26),
            ember: Color::Rgb(0xb9, 0x1c, 0x1c),
            blush: Color::Rgb(0xf8, 0x71, 0x71),
            ruby: Color::Rgb(0x88, 0x13, 0x37),
            success: Color::Rgb(0x22, 0xc5, 0x5e),
            panel_bg: Color::Rgb(0xff, 0xff, 0xff),
            panel_line: Color::Rgb(0xf3, 0xf4, 0xf6),
            panel_fg: Color::Rgb(0x05, 0x05, 0x05),
            panel_dim: Color::Rgb(0x6b, 0x72, 0x80),
            panel_faint: Color::Rgb(0x9c, 0xa3, 0xaf),
            trend_bg: Color::Rgb(0xf0, 0xfd, 0xf4),
            trend_fg: Color::Rgb(0x15, 0x80, 0x3d),
            live_bg: Color::Rgb(0xfe, 0xf2, 0xf2),
        }
    }
}

impl Theme {
    /// Blend a color toward the page background; `t` 1.0 is the full color,
    /// 0.0 disappears into the background. Stands in for opacity.
    pub fn fade(&self, color: Color, t: f64) -> Color {
        blend(self.bg, color, t)
    }

    /// Same as [`fade`](Self::fade) against the light panel background
    pub fn panel_fade(&self, color: Color, t: f64) -> Color {
        blend(self.panel_bg, color, t)
    }
}

/// Linear RGB blend from `from` to `to`. Non-RGB colors pass through
/// untouched since there is nothing to interpolate.
pub fn blend(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(fr, fg, fb), Color::Rgb(tr, tg, tb)) => Color::Rgb(
            mix(fr, tr, t),
            mix(fg, tg, t),
            mix(fb, tb, t),
        ),
        _ => to,
    }
}

fn mix(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        let theme = Theme::default();
        assert_eq!(theme.fade(theme.crimson, 1.0), theme.crimson);
        assert_eq!(theme.fade(theme.crimson, 0.0), theme.bg);
    }

    #[test]
    fn test_blend_clamps() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(100, 100, 100);
        assert_eq!(blend(a, b, -1.0), a);
        assert_eq!(blend(a, b, 2.0), b);
        assert_eq!(blend(a, b, 0.5), Color::Rgb(50, 50, 50));
    }

    #[test]
    fn test_non_rgb_passes_through() {
        assert_eq!(blend(Color::Reset, Color::Red, 0.3), Color::Red);
    }
}
