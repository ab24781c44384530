//! Theme-driven default styling for datasets.

use crate::plotting::colors::{generate_palette, LinearGradient};
use crate::theme::ThemePalette;
use crate::types::{ChartKind, ChartSeriesData, ColorSpec, Dataset, Fill, PointStyle};

pub const LINE_BORDER_WIDTH: u32 = 3;
pub const LINE_TENSION: f64 = 0.4;
pub const DEFAULT_BORDER_WIDTH: u32 = 0;

/// Returns a copy of `data` with every unset style field filled from the
/// palette. The input is left untouched, so deriving again after a theme
/// switch starts from the caller's original overrides.
pub fn derive_dataset_styles(
    data: &ChartSeriesData,
    kind: ChartKind,
    palette: &ThemePalette,
) -> ChartSeriesData {
    ChartSeriesData {
        labels: data.labels.clone(),
        datasets: data
            .datasets
            .iter()
            .map(|dataset| derive_one(dataset, kind, data.labels.len(), palette))
            .collect(),
    }
}

fn derive_one(
    dataset: &Dataset,
    kind: ChartKind,
    label_count: usize,
    palette: &ThemePalette,
) -> Dataset {
    let mut resolved = dataset.clone();
    let style = &mut resolved.style;

    if style.background.is_none() {
        match kind {
            ChartKind::Pie | ChartKind::Doughnut => {
                style.background = Some(Fill::PerPoint(generate_palette(
                    &palette.gradients.chart,
                    label_count,
                )));
                style.border.get_or_insert(ColorSpec::Single(palette.background));
            }
            ChartKind::Line => {
                style.background = Some(Fill::Gradient(LinearGradient::vertical(
                    palette.accent.with_alpha(0.8),
                    palette.accent.with_alpha(0.1),
                )));
                style.border.get_or_insert(ColorSpec::Single(palette.accent));
                style.border_width.get_or_insert(LINE_BORDER_WIDTH);
                style.tension.get_or_insert(LINE_TENSION);
                style.point.get_or_insert(PointStyle {
                    background: palette.accent,
                    border: palette.background,
                    border_width: 3,
                    radius: 6,
                    hover_radius: 8,
                });
            }
            ChartKind::Bar => {
                style.background = Some(Fill::Gradient(LinearGradient::vertical(
                    palette.primary.with_alpha(0.8),
                    palette.accent.with_alpha(0.6),
                )));
                style.border.get_or_insert(ColorSpec::Single(palette.primary));
            }
        }
    }

    style.border_width.get_or_insert(match kind {
        ChartKind::Line => LINE_BORDER_WIDTH,
        _ => DEFAULT_BORDER_WIDTH,
    });

    resolved
}
