//! # Common Types
//!
//! Chart data and display settings shared by the panels, the renderer and
//! the dashboard page.

use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::plotting::colors::{LinearGradient, Rgba};

/// The kind of chart a panel draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
    Pie,
    Doughnut,
}

impl ChartKind {
    /// Pie-like kinds have no axes and color per segment.
    pub fn is_radial(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }
}

/// How an area is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    Solid(Rgba),
    /// One color per data point, reused cyclically when shorter
    PerPoint(Vec<Rgba>),
    Gradient(LinearGradient),
}

impl Fill {
    /// Representative color for point `index`, used by legends and tooltips.
    pub fn color_for(&self, index: usize) -> Option<Rgba> {
        match self {
            Fill::Solid(c) => Some(*c),
            Fill::PerPoint(colors) if !colors.is_empty() => Some(colors[index % colors.len()]),
            Fill::PerPoint(_) => None,
            Fill::Gradient(g) => g.first_color(),
        }
    }
}

/// Stroke color, either shared or per data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpec {
    Single(Rgba),
    PerPoint(Vec<Rgba>),
}

impl ColorSpec {
    pub fn color_for(&self, index: usize) -> Option<Rgba> {
        match self {
            ColorSpec::Single(c) => Some(*c),
            ColorSpec::PerPoint(colors) if !colors.is_empty() => {
                Some(colors[index % colors.len()])
            }
            ColorSpec::PerPoint(_) => None,
        }
    }
}

/// Marker styling for line charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub background: Rgba,
    pub border: Rgba,
    pub border_width: u32,
    pub radius: u32,
    pub hover_radius: u32,
}

/// Per-dataset style. Every field left as `None` is filled from the theme;
/// set fields are never overwritten.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetStyle {
    pub background: Option<Fill>,
    pub border: Option<ColorSpec>,
    pub border_width: Option<u32>,
    /// Bezier curve tension for lines, `0.0` draws straight segments
    pub tension: Option<f64>,
    pub point: Option<PointStyle>,
    /// Paint the area under a line with its background
    pub fill: Option<bool>,
}

/// One named series of values aligned with the chart's labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(default)]
    pub style: DatasetStyle,
}

impl Dataset {
    pub fn new(label: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            data,
            style: DatasetStyle::default(),
        }
    }

    pub fn with_style(mut self, style: DatasetStyle) -> Self {
        self.style = style;
        self
    }
}

/// Category labels plus the series plotted against them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartSeriesData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeriesData {
    pub fn new<S: Into<String>>(
        labels: impl IntoIterator<Item = S>,
        datasets: Vec<Dataset>,
    ) -> Self {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
            datasets,
        }
    }

    /// Checks that every dataset has exactly one value per label.
    pub fn validate(&self) -> Result<(), ChartError> {
        match self
            .datasets
            .iter()
            .find(|d| d.data.len() != self.labels.len())
        {
            Some(d) => Err(ChartError::MisalignedSeries {
                dataset: d.label.clone(),
                points: d.data.len(),
                labels: self.labels.len(),
            }),
            None => Ok(()),
        }
    }

    /// Smallest and largest value over all datasets.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.datasets
            .iter()
            .flat_map(|d| d.data.iter().copied())
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

/// Display settings of a chart panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartDisplayConfig {
    pub kind: ChartKind,
    pub title: Option<String>,
    /// Follow the width of the containing panel
    pub responsive: bool,
    /// Keep the kind's natural width/height ratio instead of a fixed height
    pub maintain_aspect_ratio: bool,
    pub show_legend: bool,
    pub show_tooltips: bool,
}

impl Default for ChartDisplayConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            title: None,
            responsive: true,
            maintain_aspect_ratio: false,
            show_legend: true,
            show_tooltips: true,
        }
    }
}

impl ChartDisplayConfig {
    pub fn new(kind: ChartKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Width over height when the aspect ratio is locked.
    pub fn aspect_ratio(&self) -> f32 {
        if self.kind.is_radial() {
            1.0
        } else {
            2.0
        }
    }
}
