//! Fixed per-theme colors used by the shell and every chart.

use super::Theme;
use crate::plotting::colors::Rgba;

/// Two-stop and multi-stop color lists keyed by purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientPalette {
    pub primary: [Rgba; 2],
    pub accent: [Rgba; 2],
    /// Base colors cycled through for pie and doughnut segments
    pub chart: [Rgba; 4],
}

/// Named colors for one theme.
#[derive(Debug, Clone, PartialEq)]
pub struct ThemePalette {
    pub primary: Rgba,
    pub accent: Rgba,
    pub text: Rgba,
    pub background: Rgba,
    pub muted: Rgba,
    pub border: Rgba,
    pub gradients: GradientPalette,
}

const fn rgb(hex: u32) -> Rgba {
    Rgba::from_rgb_u32(hex)
}

static LIGHT: ThemePalette = ThemePalette {
    primary: rgb(0x8c5e3c),
    accent: rgb(0xa6c48a),
    text: rgb(0x3b322c),
    background: rgb(0xfdfcf9),
    muted: rgb(0xe6e0d4),
    border: rgb(0xd9c8b4),
    gradients: GradientPalette {
        primary: [rgb(0x8c5e3c), rgb(0xa67c52)],
        accent: [rgb(0xa6c48a), rgb(0x8fb86f)],
        chart: [rgb(0xa6c48a), rgb(0x8c5e3c), rgb(0xe6e0d4), rgb(0xd9c8b4)],
    },
};

static DARK: ThemePalette = ThemePalette {
    primary: rgb(0xff2d95),
    accent: rgb(0x00ffc6),
    text: rgb(0xe0e0f0),
    background: rgb(0x0e0e1b),
    muted: rgb(0x1c1c2b),
    border: rgb(0x31314f),
    gradients: GradientPalette {
        primary: [rgb(0xff2d95), rgb(0xff6bb3)],
        accent: [rgb(0x00ffc6), rgb(0x4dffd9)],
        chart: [rgb(0xff2d95), rgb(0x00ffc6), rgb(0x7c3aed), rgb(0x3b82f6)],
    },
};

impl ThemePalette {
    pub fn for_theme(theme: Theme) -> &'static ThemePalette {
        match theme {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }

    /// egui visuals for the application shell, tinted with this palette.
    pub fn visuals(&self, theme: Theme) -> egui::Visuals {
        let mut visuals = match theme {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        };

        visuals.panel_fill = self.background.into();
        visuals.window_fill = self.background.into();
        visuals.extreme_bg_color = self.muted.into();
        visuals.faint_bg_color = self.muted.into();
        visuals.override_text_color = Some(self.text.into());
        visuals.hyperlink_color = self.accent.into();
        visuals.selection.bg_fill = self.primary.with_alpha(0.6).over(self.background).into();
        visuals.window_stroke.color = self.border.into();
        visuals.widgets.noninteractive.bg_stroke.color = self.border.into();
        visuals
    }
}
