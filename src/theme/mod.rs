//! # Theme
//!
//! The process-wide light/dark mode. [`ThemeStore`] owns the current value,
//! persists it under the `"theme"` key and pushes every change to the
//! attached [`ThemeTarget`]s (the egui context in the running app).

pub mod palette;
pub mod storage;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

pub use palette::{GradientPalette, ThemePalette};
pub use storage::{FileStorage, MemoryStorage, ThemeStorage};

/// Storage key holding the persisted theme.
pub const THEME_KEY: &str = "theme";

/// Display mode of the whole application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme {0:?}")]
pub struct ParseThemeError(String);

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// Something that restyles itself when the theme changes.
pub trait ThemeTarget {
    fn apply_theme(&self, theme: Theme, palette: &ThemePalette);
}

impl ThemeTarget for egui::Context {
    fn apply_theme(&self, theme: Theme, palette: &ThemePalette) {
        self.set_visuals(palette.visuals(theme));
    }
}

/// Single owner of the current [`Theme`].
pub struct ThemeStore {
    current: Theme,
    storage: Box<dyn ThemeStorage>,
    targets: Vec<Box<dyn ThemeTarget>>,
    revision: u64,
}

impl ThemeStore {
    /// Creates the store, restoring a previously persisted theme if it is
    /// valid. Anything else leaves the light default in place.
    pub fn new(storage: Box<dyn ThemeStorage>) -> Self {
        let mut store = Self {
            current: Theme::default(),
            storage,
            targets: Vec::new(),
            revision: 0,
        };

        match store.storage.get(THEME_KEY).map(|raw| raw.parse::<Theme>()) {
            Some(Ok(saved)) => store.set_theme(saved),
            Some(Err(e)) => debug!(error = %e, "ignoring persisted theme"),
            None => {}
        }
        store
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    pub fn palette(&self) -> &'static ThemePalette {
        ThemePalette::for_theme(self.current)
    }

    /// Bumped on every [`ThemeStore::set_theme`]; lets views notice a change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Sets, persists and applies `theme`.
    pub fn set_theme(&mut self, theme: Theme) {
        self.current = theme;
        self.revision += 1;

        let palette = self.palette();
        for target in &self.targets {
            target.apply_theme(theme, palette);
        }

        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
            warn!(error = %e, "could not persist theme");
        }
        info!(theme = %theme, "theme applied");
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.current.toggled());
    }

    /// Registers a target and immediately styles it with the current theme.
    pub fn attach(&mut self, target: Box<dyn ThemeTarget>) {
        target.apply_theme(self.current, self.palette());
        self.targets.push(target);
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct RecordingTarget {
        applied: Rc<RefCell<Vec<Theme>>>,
    }

    impl ThemeTarget for RecordingTarget {
        fn apply_theme(&self, theme: Theme, _palette: &ThemePalette) {
            self.applied.borrow_mut().push(theme);
        }
    }

    #[test]
    fn test_default_is_light() {
        let store = ThemeStore::default();
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn test_set_theme_persists() {
        let storage = MemoryStorage::new();
        let mut store = ThemeStore::new(Box::new(storage.clone()));

        store.set_theme(Theme::Dark);
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(storage.get(THEME_KEY).as_deref(), Some("dark"));
    }

    #[test]
    fn test_toggle_flips_both_ways() {
        let mut store = ThemeStore::default();
        store.toggle_theme();
        assert_eq!(store.theme(), Theme::Dark);
        store.toggle_theme();
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_restores_persisted_theme() {
        let store = ThemeStore::new(Box::new(MemoryStorage::with_entry(THEME_KEY, "dark")));
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_invalid_persisted_theme_falls_back() {
        for bad in ["Dark", "blue", ""] {
            let store = ThemeStore::new(Box::new(MemoryStorage::with_entry(THEME_KEY, bad)));
            assert_eq!(store.theme(), Theme::Light);
        }
    }

    #[test]
    fn test_targets_follow_changes() {
        let target = RecordingTarget::default();
        let mut store = ThemeStore::default();

        store.attach(Box::new(target.clone()));
        store.toggle_theme();
        store.set_theme(Theme::Light);

        assert_eq!(
            *target.applied.borrow(),
            vec![Theme::Light, Theme::Dark, Theme::Light]
        );
    }

    #[test]
    fn test_theme_string_round_trip() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!(Theme::Light.to_string(), "light");
        assert!("LIGHT".parse::<Theme>().is_err());
    }
}
