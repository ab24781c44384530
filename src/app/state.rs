use chrono::{DateTime, Local};
use eframe::App as EApp;
use egui::TextureHandle;
use std::collections::HashMap;
use std::path::PathBuf;

use super::navbar::Navbar;
use crate::config::AppConfig;
use crate::error::ChartError;
use crate::pages::DashboardPage;
use crate::plotting::InstanceId;
use crate::sidebar::SidebarStore;
use crate::theme::ThemeStore;

/// GPU copy of one chart frame, keyed by what it was uploaded from.
pub struct ChartTexture {
    pub instance: InstanceId,
    pub revision: u64,
    pub handle: TextureHandle,
}

impl ChartTexture {
    pub fn is_current(&self, instance: InstanceId, revision: u64) -> bool {
        self.instance == instance && self.revision == revision
    }
}

/// Main application state
pub struct App {
    pub config: AppConfig,
    pub theme: ThemeStore,
    pub sidebar: SidebarStore,
    pub navbar: Navbar,
    pub dashboard: DashboardPage,
    /// Uploaded frames by panel index
    pub textures: HashMap<usize, ChartTexture>,
    /// Panel the central view should scroll to on the next frame
    pub scroll_target: Option<usize>,
    pub status_message: Option<String>,
    pub error_message: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, theme: ThemeStore) -> Result<Self, ChartError> {
        let dashboard = DashboardPage::new(&theme)?;
        Ok(Self::with_dashboard(config, theme, dashboard))
    }

    /// App around an already assembled dashboard.
    pub fn with_dashboard(config: AppConfig, theme: ThemeStore, dashboard: DashboardPage) -> Self {
        Self {
            config,
            theme,
            sidebar: SidebarStore::new(),
            navbar: Navbar::new(),
            dashboard,
            textures: HashMap::new(),
            scroll_target: None,
            status_message: None,
            error_message: None,
        }
    }

    /// Directory chart exports are written to.
    pub fn export_dir(&self) -> PathBuf {
        dirs::picture_dir()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn report_error(&mut self, context: &str, error: &ChartError) {
        tracing::error!(%error, "{context}");
        self.error_message = Some(format!("{context}: {error}"));
    }
}

impl EApp for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::draw_ui(self, ctx);
    }
}

/// File name for an exported chart, e.g. `monthly-transactions-20240105-093000.png`.
pub fn export_file_name(title: Option<&str>, at: DateTime<Local>) -> String {
    let slug: String = title
        .unwrap_or("chart")
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    format!("{}-{}.png", slug, at.format("%Y%m%d-%H%M%S"))
}
