pub mod navbar;
mod state;
pub mod ui;

pub use navbar::{Navbar, ThemeToggle};
pub use state::{export_file_name, App, ChartTexture};
