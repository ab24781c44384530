//! Color values, hex parsing, palette generation and vertical gradients.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ColorError;

/// Opacity of the first pass through a base palette.
const PALETTE_START_OPACITY: f64 = 0.9;
/// Opacity lost each time the palette wraps around.
const PALETTE_OPACITY_STEP: f64 = 0.15;
/// Generated colors never get more transparent than this.
const PALETTE_MIN_OPACITY: f64 = 0.5;

/// An sRGB color with a fractional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Builds an opaque color from a packed `0xRRGGBB` value.
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Formats the color back to `#rrggbb`, dropping alpha.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Blends towards `other` by `t` (0 = self, 1 = other), alpha included.
    pub fn lerp(self, other: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Composites this color over an opaque background.
    pub fn over(self, background: Rgba) -> Rgba {
        background.with_alpha(1.0).lerp(self.with_alpha(1.0), self.a)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

impl From<Rgba> for plotters::style::RGBAColor {
    fn from(c: Rgba) -> Self {
        plotters::style::RGBAColor(c.r, c.g, c.b, c.a)
    }
}

impl From<Rgba> for egui::Color32 {
    fn from(c: Rgba) -> Self {
        egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, (c.a * 255.0).round() as u8)
    }
}

/// Parses `#rrggbb` and attaches the given opacity.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Result<Rgba, ColorError> {
    let digits = hex
        .strip_prefix('#')
        .filter(|d| d.len() == 6 && d.chars().all(|c| c.is_ascii_hexdigit()))
        .ok_or_else(|| ColorError::InvalidHex(hex.to_string()))?;

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| ColorError::InvalidHex(hex.to_string()))
    };

    Ok(Rgba::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 1.0).with_alpha(alpha))
}

/// Opaque variant of [`hex_to_rgba`].
pub fn parse_hex(hex: &str) -> Result<Rgba, ColorError> {
    hex_to_rgba(hex, 1.0)
}

/// Assigns `count` colors by cycling through `base`, fading a step every
/// time the cycle wraps.
pub fn generate_palette(base: &[Rgba], count: usize) -> Vec<Rgba> {
    if base.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let wraps = (i / base.len()) as f64;
            let opacity = PALETTE_START_OPACITY - wraps * PALETTE_OPACITY_STEP;
            base[i % base.len()].with_alpha(opacity.max(PALETTE_MIN_OPACITY))
        })
        .collect()
}

/// One stop of a [`LinearGradient`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient in `0.0..=1.0`
    pub offset: f64,
    pub color: Rgba,
}

/// A vertical gradient in surface pixel coordinates, running from `y0`
/// (top) to `y1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub y0: f64,
    pub y1: f64,
    pub stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// Gradient height used for chart fills.
    pub const DEFAULT_SPAN: f64 = 400.0;

    /// Two-stop gradient over the default span.
    pub fn vertical(top: Rgba, bottom: Rgba) -> Self {
        Self {
            y0: 0.0,
            y1: Self::DEFAULT_SPAN,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: top,
                },
                GradientStop {
                    offset: 1.0,
                    color: bottom,
                },
            ],
        }
    }

    pub fn first_color(&self) -> Option<Rgba> {
        self.stops.first().map(|s| s.color)
    }

    /// Color at pixel row `y`; rows outside the span take the end stops.
    pub fn color_at(&self, y: f64) -> Rgba {
        let span = self.y1 - self.y0;
        let t = if span.abs() < f64::EPSILON {
            0.0
        } else {
            ((y - self.y0) / span).clamp(0.0, 1.0)
        };

        let Some(first) = self.stops.first() else {
            return Rgba::new(0, 0, 0, 0.0);
        };
        if t <= first.offset {
            return first.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let width = b.offset - a.offset;
                let local = if width > 0.0 { (t - a.offset) / width } else { 1.0 };
                return a.color.lerp(b.color, local);
            }
        }

        self.stops.last().map_or(first.color, |s| s.color)
    }
}
