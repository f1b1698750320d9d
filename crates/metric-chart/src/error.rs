// File: crates/metric-chart/src/error.rs
// Summary: Error type shared by every stage of the chart pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Coarse classification of a [`ChartError`], convenient for matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FontUnavailable,
    PaletteUnavailable,
    InvalidSampleValue,
    GeometryConstructionFailed,
    CanvasCreationFailed,
    UnsupportedFormat,
    SinkWriteFailed,
    InvalidConfig,
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("no usable font face among [{}]", families.join(", "))]
    FontUnavailable { families: Vec<String> },

    #[error("color palette {name:?} is not available with {size} colors")]
    PaletteUnavailable { name: String, size: usize },

    #[error("sample value not a number in series {series}: {raw:?}")]
    InvalidSampleValue { series: String, raw: String },

    #[error("failed to build line for series {series}: {reason}")]
    GeometryConstructionFailed { series: String, reason: String },

    #[error("failed to create {format} canvas: {reason}")]
    CanvasCreationFailed { format: String, reason: String },

    #[error("unsupported output format {format:?}")]
    UnsupportedFormat { format: String },

    #[error("failed to write chart to {}", path.display())]
    SinkWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {field}: {reason}")]
    InvalidConfig { field: &'static str, reason: String },
}

impl ChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ChartError::FontUnavailable { .. } => ErrorKind::FontUnavailable,
            ChartError::PaletteUnavailable { .. } => ErrorKind::PaletteUnavailable,
            ChartError::InvalidSampleValue { .. } => ErrorKind::InvalidSampleValue,
            ChartError::GeometryConstructionFailed { .. } => ErrorKind::GeometryConstructionFailed,
            ChartError::CanvasCreationFailed { .. } => ErrorKind::CanvasCreationFailed,
            ChartError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            ChartError::SinkWriteFailed { .. } => ErrorKind::SinkWriteFailed,
            ChartError::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }
}

pub type Result<T, E = ChartError> = std::result::Result<T, E>;
