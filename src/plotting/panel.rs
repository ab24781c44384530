//! A chart bound to one drawing surface.
//!
//! A panel derives its dataset colors from the theme when it is created and
//! again whenever it is told the theme changed; it never watches the theme
//! store on its own. Lifecycle:
//!
//! 1. [`ChartPanel::new`] validates the data and derives colors.
//! 2. [`ChartPanel::mount`] attaches a surface and creates the chart instance.
//! 3. [`ChartPanel::update_chart`] / [`ChartPanel::update_theme`] react to changes.
//! 4. Dropping the panel (or [`ChartPanel::destroy`]) releases the instance.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use super::chart::PlottersRenderer;
use super::colors::Rgba;
use super::derive::derive_dataset_styles;
use super::renderer::{
    ChartInstance, ChartRenderer, ChartSpec, FrameLayout, InstanceRegistry, SurfaceSize,
};
use super::styles::ChartOptions;
use crate::error::ChartError;
use crate::theme::{Theme, ThemePalette, ThemeStore};
use crate::types::{ChartDisplayConfig, ChartSeriesData};

/// One row of a tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipItem {
    pub label: String,
    pub value: f64,
    pub color: Option<Rgba>,
}

/// Values under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub items: Vec<TooltipItem>,
}

pub struct ChartPanel {
    data: ChartSeriesData,
    config: ChartDisplayConfig,
    theme: Theme,
    resolved: ChartSeriesData,
    options: ChartOptions,
    surface: Option<SurfaceSize>,
    renderer: Box<dyn ChartRenderer>,
    registry: InstanceRegistry,
    chart: Option<ChartInstance>,
}

impl ChartPanel {
    /// Panel drawn with the plotters renderer.
    pub fn new(
        data: ChartSeriesData,
        config: ChartDisplayConfig,
        store: &ThemeStore,
    ) -> Result<Self, ChartError> {
        Self::with_renderer(
            data,
            config,
            store,
            Box::new(PlottersRenderer),
            InstanceRegistry::new(),
        )
    }

    pub fn with_renderer(
        data: ChartSeriesData,
        config: ChartDisplayConfig,
        store: &ThemeStore,
        renderer: Box<dyn ChartRenderer>,
        registry: InstanceRegistry,
    ) -> Result<Self, ChartError> {
        data.validate()?;
        let theme = store.theme();
        let palette = ThemePalette::for_theme(theme);

        Ok(Self {
            resolved: derive_dataset_styles(&data, config.kind, palette),
            options: ChartOptions::build(&config, palette),
            data,
            config,
            theme,
            surface: None,
            renderer,
            registry,
            chart: None,
        })
    }

    /// The data as supplied, without derived colors.
    pub fn data(&self) -> &ChartSeriesData {
        &self.data
    }

    /// The data with theme colors filled in.
    pub fn resolved_data(&self) -> &ChartSeriesData {
        &self.resolved
    }

    pub fn config(&self) -> &ChartDisplayConfig {
        &self.config
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    /// Theme the current colors were derived from.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn surface(&self) -> Option<SurfaceSize> {
        self.surface
    }

    pub fn chart(&self) -> Option<&ChartInstance> {
        self.chart.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.chart.is_some()
    }

    pub fn registry(&self) -> &InstanceRegistry {
        &self.registry
    }

    fn spec(&self) -> ChartSpec {
        ChartSpec {
            kind: self.config.kind,
            data: self.resolved.clone(),
            options: self.options.clone(),
        }
    }

    fn rederive(&mut self, theme: Theme) {
        let palette = ThemePalette::for_theme(theme);
        self.theme = theme;
        self.resolved = derive_dataset_styles(&self.data, self.config.kind, palette);
        self.options = ChartOptions::build(&self.config, palette);
    }

    /// Creates the chart instance, or does nothing while no surface exists.
    fn create_chart(&mut self) -> Result<(), ChartError> {
        let Some(surface) = self.surface else {
            debug!(kind = ?self.config.kind, "no surface yet, skipping chart creation");
            return Ok(());
        };
        let instance =
            ChartInstance::create(self.renderer.as_ref(), &self.registry, self.spec(), surface)?;
        self.chart = Some(instance);
        Ok(())
    }

    /// Attaches a drawing surface and creates the chart on first mount.
    pub fn mount(&mut self, surface: SurfaceSize) -> Result<(), ChartError> {
        if self.chart.is_some() {
            return self.resize(surface);
        }
        self.surface = Some(surface);
        self.create_chart()
    }

    /// Redraws in place at a new size.
    pub fn resize(&mut self, surface: SurfaceSize) -> Result<(), ChartError> {
        self.surface = Some(surface);
        match self.chart.as_mut() {
            Some(chart) => chart.resize(self.renderer.as_ref(), surface),
            None => Ok(()),
        }
    }

    /// Replaces the data, re-derives colors from the store's current theme
    /// and redraws the existing instance without recreating it.
    pub fn update_chart(
        &mut self,
        new_data: ChartSeriesData,
        store: &ThemeStore,
    ) -> Result<(), ChartError> {
        new_data.validate()?;
        self.data = new_data;
        self.rederive(store.theme());

        let resolved = self.resolved.clone();
        match self.chart.as_mut() {
            Some(chart) => chart.update(self.renderer.as_ref(), resolved),
            None => Ok(()),
        }
    }

    /// Re-derives colors and options for the store's current theme. A
    /// mounted chart is torn down and created again from scratch.
    pub fn update_theme(&mut self, store: &ThemeStore) -> Result<(), ChartError> {
        self.rederive(store.theme());
        if let Some(old) = self.chart.take() {
            debug!(id = ?old.id(), theme = %self.theme, "recreating chart for new theme");
            drop(old);
            self.create_chart()?;
        }
        Ok(())
    }

    /// Advances the entry animation. Returns whether another frame is due.
    pub fn advance_animation(&mut self, dt: Duration) -> Result<bool, ChartError> {
        match self.chart.as_mut() {
            Some(chart) => chart.advance(self.renderer.as_ref(), dt),
            None => Ok(false),
        }
    }

    pub fn finish_animation(&mut self) -> Result<(), ChartError> {
        match self.chart.as_mut() {
            Some(chart) => chart.finish_animation(self.renderer.as_ref()),
            None => Ok(()),
        }
    }

    /// Releases the chart instance. The panel can be mounted again.
    pub fn destroy(&mut self) {
        self.chart = None;
    }

    /// Tooltip for the pixel `(x, y)` of the current frame.
    pub fn tooltip_at(&self, x: f32, y: f32) -> Option<Tooltip> {
        if !self.options.tooltip.enabled {
            return None;
        }
        let frame = self.chart.as_ref()?.frame();

        match &frame.layout {
            FrameLayout::Empty => None,
            FrameLayout::Cartesian { category_x } => {
                let index = category_x
                    .iter()
                    .enumerate()
                    .min_by(|a, b| {
                        let da = (*a.1 as f32 - x).abs();
                        let db = (*b.1 as f32 - x).abs();
                        da.total_cmp(&db)
                    })
                    .map(|(i, _)| i)?;
                self.category_tooltip(index)
            }
            FrameLayout::Radial {
                center,
                outer_radius,
                inner_radius,
                segments,
            } => {
                let dx = x as f64 - center.0 as f64;
                let dy = y as f64 - center.1 as f64;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance > *outer_radius || distance < *inner_radius {
                    return None;
                }
                let angle = (dy.atan2(dx) + FRAC_PI_2).rem_euclid(TAU);
                let index = segments
                    .iter()
                    .position(|(start, end)| angle >= *start && angle < *end)?;
                self.segment_tooltip(index)
            }
        }
    }

    fn category_tooltip(&self, index: usize) -> Option<Tooltip> {
        let title = self.resolved.labels.get(index)?.clone();
        let items = self
            .resolved
            .datasets
            .iter()
            .filter_map(|d| {
                let value = *d.data.get(index)?;
                let color = d
                    .style
                    .border
                    .as_ref()
                    .and_then(|b| b.color_for(index))
                    .or_else(|| d.style.background.as_ref().and_then(|f| f.color_for(index)));
                Some(TooltipItem {
                    label: d.label.clone(),
                    value,
                    color,
                })
            })
            .collect();
        Some(Tooltip { title, items })
    }

    fn segment_tooltip(&self, index: usize) -> Option<Tooltip> {
        let dataset = self.resolved.datasets.first()?;
        let value = *dataset.data.get(index)?;
        Some(Tooltip {
            title: dataset.label.clone(),
            items: vec![TooltipItem {
                label: self.resolved.labels.get(index)?.clone(),
                value,
                color: dataset
                    .style
                    .background
                    .as_ref()
                    .and_then(|f| f.color_for(index)),
            }],
        })
    }

    /// Saves the current frame as an image file.
    pub fn export_png(&self, path: &Path) -> Result<(), ChartError> {
        let chart = self.chart.as_ref().ok_or(ChartError::NothingRendered)?;
        chart.frame().save(path)?;
        info!(path = %path.display(), "chart exported");
        Ok(())
    }
}
