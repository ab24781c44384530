//! Top bar widgets: the sidebar toggle and the light/dark switch.

use std::time::{Duration, Instant};
use tracing::debug;

use crate::sidebar::SidebarStore;
use crate::theme::{Theme, ThemeStore};

/// How long the sidebar keeps its "collapsing" look after being closed.
pub const COLLAPSE_TRANSITION: Duration = Duration::from_millis(300);

#[derive(Debug, Default)]
pub struct Navbar {
    collapsing_since: Option<Instant>,
}

impl Navbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the sidebar. Collapsing starts the transition.
    pub fn toggle_sidebar(&mut self, sidebar: &mut SidebarStore, now: Instant) {
        sidebar.toggle();
        self.collapsing_since = if sidebar.is_expanded() {
            None
        } else {
            debug!("sidebar collapse transition started");
            Some(now)
        };
    }

    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.collapsing_since
            .is_some_and(|start| now.saturating_duration_since(start) < COLLAPSE_TRANSITION)
    }

    /// Fraction of the collapse transition already played, `1.0` when idle.
    pub fn transition_progress(&self, now: Instant) -> f32 {
        match self.collapsing_since {
            Some(start) => {
                let elapsed = now.saturating_duration_since(start).as_secs_f32();
                (elapsed / COLLAPSE_TRANSITION.as_secs_f32()).min(1.0)
            }
            None => 1.0,
        }
    }
}

/// Button that shows the current theme and switches to the other one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThemeToggle;

impl ThemeToggle {
    pub fn icon(theme: Theme) -> &'static str {
        match theme {
            Theme::Light => "🌙",
            Theme::Dark => "☀",
        }
    }

    pub fn label(theme: Theme) -> &'static str {
        match theme {
            Theme::Light => "Switch to dark mode",
            Theme::Dark => "Switch to light mode",
        }
    }

    pub fn click(store: &mut ThemeStore) -> Theme {
        store.toggle_theme();
        store.theme()
    }
}
