//! Rendering options derived from the display config and the active palette.

use std::time::Duration;

use crate::plotting::colors::Rgba;
use crate::theme::ThemePalette;
use crate::types::ChartDisplayConfig;

pub const FONT_FAMILY: &str = "sans-serif";

/// Space kept free around the chart, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Padding {
    pub top: u32,
    pub bottom: u32,
    pub left: u32,
    pub right: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub size: u32,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleOptions {
    pub display: bool,
    pub text: String,
    pub color: Rgba,
    pub font: FontSpec,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendOptions {
    pub display: bool,
    pub color: Rgba,
    pub font: FontSpec,
    /// Gap between entries
    pub padding: u32,
    /// Draw circular swatches instead of boxes
    pub use_point_style: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipOptions {
    pub enabled: bool,
    pub background: Rgba,
    pub title_color: Rgba,
    pub body_color: Rgba,
    pub border_color: Rgba,
    pub border_width: u32,
    pub corner_radius: u32,
    pub padding: u32,
    pub display_colors: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisOptions {
    pub tick_color: Rgba,
    pub tick_font: FontSpec,
    pub grid_color: Rgba,
    pub grid_line_width: u32,
    pub show_border: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScaleOptions {
    pub x: AxisOptions,
    pub y: AxisOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    EaseInOutQuart,
}

impl Easing {
    /// Maps linear progress `t` in `0.0..=1.0` onto the easing curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationOptions {
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationOptions {
    /// Eased progress after `elapsed`.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        self.easing
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }
}

/// Everything the renderer needs besides the data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub background: Rgba,
    pub padding: Padding,
    pub title: TitleOptions,
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
    /// `None` for pie and doughnut charts
    pub scales: Option<ScaleOptions>,
    pub animation: AnimationOptions,
    /// Doughnut hole as a fraction of the outer radius
    pub cutout: f64,
}

impl ChartOptions {
    pub fn build(config: &ChartDisplayConfig, palette: &ThemePalette) -> Self {
        let tick_font = FontSpec {
            size: 11,
            bold: false,
        };
        let axis = AxisOptions {
            tick_color: palette.text,
            tick_font,
            grid_color: palette.border.with_alpha(0.3),
            grid_line_width: 1,
            show_border: false,
        };

        Self {
            responsive: config.responsive,
            maintain_aspect_ratio: config.maintain_aspect_ratio,
            background: palette.background,
            padding: Padding {
                top: 20,
                bottom: 20,
                left: 10,
                right: 10,
            },
            title: TitleOptions {
                display: config.title.is_some(),
                text: config.title.clone().unwrap_or_default(),
                color: palette.text,
                font: FontSpec {
                    size: 18,
                    bold: true,
                },
            },
            legend: LegendOptions {
                display: config.show_legend,
                color: palette.text,
                font: FontSpec {
                    size: 12,
                    bold: false,
                },
                padding: 20,
                use_point_style: true,
            },
            tooltip: TooltipOptions {
                enabled: config.show_tooltips,
                background: palette.background,
                title_color: palette.text,
                body_color: palette.text,
                border_color: palette.border,
                border_width: 1,
                corner_radius: 12,
                padding: 12,
                display_colors: true,
            },
            scales: (!config.kind.is_radial()).then(|| ScaleOptions {
                x: axis.clone(),
                y: axis,
            }),
            animation: AnimationOptions {
                duration: Duration::from_millis(1500),
                easing: Easing::EaseInOutQuart,
            },
            cutout: match config.kind {
                crate::types::ChartKind::Doughnut => 0.5,
                _ => 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crate::types::ChartKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_radial_kinds_have_no_scales() {
        let palette = ThemePalette::for_theme(Theme::Light);
        for kind in [ChartKind::Pie, ChartKind::Doughnut] {
            let options = ChartOptions::build(&ChartDisplayConfig::new(kind), palette);
            assert!(options.scales.is_none());
        }
        let bar = ChartOptions::build(&ChartDisplayConfig::new(ChartKind::Bar), palette);
        let scales = bar.scales.expect("bar charts have axes");
        assert_eq!(scales.x.grid_color, palette.border.with_alpha(0.3));
    }

    #[test]
    fn test_options_follow_config_flags() {
        let palette = ThemePalette::for_theme(Theme::Dark);
        let config = ChartDisplayConfig {
            show_legend: false,
            show_tooltips: false,
            ..ChartDisplayConfig::new(ChartKind::Line).with_title("Revenue")
        };
        let options = ChartOptions::build(&config, palette);

        assert!(options.title.display);
        assert_eq!(options.title.text, "Revenue");
        assert_eq!(options.title.color, palette.text);
        assert!(!options.legend.display);
        assert!(!options.tooltip.enabled);
        assert_eq!(options.tooltip.background, palette.background);
    }

    #[test]
    fn test_ease_in_out_quart_endpoints() {
        let easing = Easing::EaseInOutQuart;
        assert_eq!(easing.apply(0.0), 0.0);
        assert_eq!(easing.apply(0.5), 0.5);
        assert_eq!(easing.apply(1.0), 1.0);
        assert!(easing.apply(0.25) < 0.25);
        assert!(easing.apply(0.75) > 0.75);
    }

    #[test]
    fn test_animation_progress_saturates() {
        let animation = AnimationOptions {
            duration: Duration::from_millis(1500),
            easing: Easing::Linear,
        };
        assert_eq!(animation.progress(Duration::from_secs(5)), 1.0);
        assert!((animation.progress(Duration::from_millis(750)) - 0.5).abs() < 1e-9);
    }
}
