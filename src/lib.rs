//! # Orzo
//!
//! `orzo` is the presentation layer of a small personal finance dashboard:
//! a themed navigation shell and chart panels that take their colors from
//! the active light or dark theme.
//!
//! ## Features
//!
//! - Light and dark themes, remembered between runs
//! - Collapsible sidebar
//! - Bar, line, pie and doughnut charts drawn with `plotters`
//! - Theme-derived palettes and gradients for datasets without explicit colors
//! - PNG export of any chart
//!
//! ## Example
//!
//! ```no_run
//! use orzo::config::AppConfig;
//! use orzo::theme::{MemoryStorage, ThemeStore};
//! use orzo::App;
//!
//! eframe::run_native(
//!     "Orzo",
//!     eframe::NativeOptions::default(),
//!     Box::new(|cc| {
//!         let mut theme = ThemeStore::new(Box::new(MemoryStorage::new()));
//!         theme.attach(Box::new(cc.egui_ctx.clone()));
//!         Ok(Box::new(App::new(AppConfig::default(), theme)?))
//!     }),
//! )
//! .unwrap();
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod pages;
pub mod plotting;
pub mod sidebar;
pub mod theme;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::App;
pub use error::{ChartError, ColorError, ConfigError};
pub use plotting::ChartPanel;
pub use sidebar::SidebarStore;
pub use theme::{Theme, ThemeStore};
pub use types::{ChartDisplayConfig, ChartKind, ChartSeriesData, Dataset};
