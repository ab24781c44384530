//! # Error Types
//!
//! Library errors are plain `thiserror` enums; the binary wraps them in
//! `anyhow` at the edge.

use std::path::PathBuf;
use thiserror::Error;

/// A color string could not be turned into channel values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("expected a color in #rrggbb form, got {0:?}")]
    InvalidHex(String),
}

/// Failures while preparing or drawing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// A dataset does not have one value per category label.
    #[error("dataset {dataset:?} has {points} points but there are {labels} labels")]
    MisalignedSeries {
        dataset: String,
        points: usize,
        labels: usize,
    },

    #[error("surface {width}x{height} is too small to draw on")]
    EmptySurface { width: u32, height: u32 },

    #[error("no rendered frame is available")]
    NothingRendered,

    #[error("drawing failed: {0}")]
    Render(String),

    #[error("failed to write chart image to {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Problems reading or writing the JSON configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no configuration directory is available on this platform")]
    NoConfigDir,

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Key/value persistence failures. Callers treat these as best-effort.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode storage entries: {0}")]
    Encode(#[from] serde_json::Error),
}
