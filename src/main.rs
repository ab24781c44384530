//! Orzo
//!
//! A themed desktop dashboard of monthly transactions, expenses and revenue.

use anyhow::anyhow;
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use orzo::config::AppConfig;
use orzo::theme::{FileStorage, MemoryStorage, ThemeStorage, ThemeStore};
use orzo::App;

fn main() -> anyhow::Result<()> {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Some(e) = config_error {
        warn!(error = %e, "could not load configuration, using defaults");
    }

    let storage: Box<dyn ThemeStorage> = match config.storage_path() {
        Some(path) => Box::new(FileStorage::open(path)),
        None => {
            warn!("no data directory available, theme will not be remembered");
            Box::new(MemoryStorage::new())
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([config.window.min_width, config.window.min_height])
            .with_title("Orzo"),
        ..Default::default()
    };

    info!("starting dashboard");
    eframe::run_native(
        "Orzo",
        options,
        Box::new(move |cc| {
            let mut theme = ThemeStore::new(storage);
            theme.attach(Box::new(cc.egui_ctx.clone()));
            let app = App::new(config, theme)?;
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
    .map_err(|e| anyhow!("error running application: {e}"))
}
