//! Chart colors, options, rendering and the panel that ties them together.

pub mod chart;
pub mod colors;
pub mod derive;
pub mod panel;
pub mod renderer;
pub mod styles;


pub use chart::PlottersRenderer;
pub use colors::{generate_palette, hex_to_rgba, LinearGradient, Rgba};
pub use derive::derive_dataset_styles;
pub use panel::{ChartPanel, Tooltip, TooltipItem};
pub use renderer::{
    ChartInstance, ChartRenderer, ChartSpec, FrameLayout, InstanceId, InstanceRegistry,
    RenderedFrame, SurfaceSize,
};
pub use styles::ChartOptions;
