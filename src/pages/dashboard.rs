//! The home dashboard: transactions, expenses and revenue.

use tracing::{info, warn};

use crate::error::ChartError;
use crate::plotting::{ChartPanel, ChartRenderer, InstanceRegistry, PlottersRenderer};
use crate::theme::ThemeStore;
use crate::types::{ChartDisplayConfig, ChartKind, ChartSeriesData, Dataset};

const MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

pub fn transaction_data() -> ChartSeriesData {
    ChartSeriesData::new(
        MONTHS,
        vec![Dataset::new(
            "Transactions",
            vec![12.0, 19.0, 3.0, 5.0, 2.0, 3.0],
        )],
    )
}

pub fn expense_data() -> ChartSeriesData {
    ChartSeriesData::new(
        ["Food", "Transport", "Leisure", "Bills", "Other"],
        vec![Dataset::new(
            "Expenses",
            vec![300.0, 150.0, 200.0, 400.0, 100.0],
        )],
    )
}

pub fn revenue_data() -> ChartSeriesData {
    ChartSeriesData::new(
        MONTHS,
        vec![Dataset::new(
            "Revenue",
            vec![1000.0, 1200.0, 900.0, 1400.0, 1100.0, 1300.0],
        )],
    )
}

fn config(kind: ChartKind, title: &str) -> ChartDisplayConfig {
    ChartDisplayConfig {
        kind,
        title: Some(title.to_string()),
        responsive: true,
        maintain_aspect_ratio: false,
        show_legend: true,
        show_tooltips: true,
    }
}

pub struct DashboardPage {
    panels: Vec<ChartPanel>,
    applied_revision: u64,
}

impl DashboardPage {
    pub fn new(store: &ThemeStore) -> Result<Self, ChartError> {
        Self::with_renderer(store, || Box::new(PlottersRenderer), InstanceRegistry::new())
    }

    /// Builds the page with panels drawn by renderers from `make_renderer`.
    pub fn with_renderer(
        store: &ThemeStore,
        make_renderer: impl Fn() -> Box<dyn ChartRenderer>,
        registry: InstanceRegistry,
    ) -> Result<Self, ChartError> {
        let sections = [
            (transaction_data(), config(ChartKind::Bar, "Monthly Transactions")),
            (expense_data(), config(ChartKind::Pie, "Expense Breakdown")),
            (revenue_data(), config(ChartKind::Line, "Revenue Over Time")),
        ];

        let panels = sections
            .into_iter()
            .map(|(data, config)| {
                ChartPanel::with_renderer(data, config, store, make_renderer(), registry.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(panels = panels.len(), theme = %store.theme(), "dashboard assembled");
        Ok(Self {
            panels,
            applied_revision: store.revision(),
        })
    }

    pub fn panels(&self) -> &[ChartPanel] {
        &self.panels
    }

    pub fn panels_mut(&mut self) -> &mut [ChartPanel] {
        &mut self.panels
    }

    /// Tells every panel the theme changed.
    pub fn apply_theme(&mut self, store: &ThemeStore) -> Result<(), ChartError> {
        self.applied_revision = store.revision();
        let mut first_error = None;
        for panel in &mut self.panels {
            if let Err(e) = panel.update_theme(store) {
                warn!(error = %e, kind = ?panel.config().kind, "panel failed to apply theme");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Applies the theme only if the store changed since the last call.
    pub fn sync_theme(&mut self, store: &ThemeStore) -> Result<bool, ChartError> {
        if store.revision() == self.applied_revision {
            return Ok(false);
        }
        self.apply_theme(store)?;
        Ok(true)
    }
}
