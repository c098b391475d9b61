//! Error types for canvasplot operations.

use std::io;
use thiserror::Error;

use crate::axis::AxisIndex;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in canvasplot operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a framebuffer or surface.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// The region leaves no plot area once the gap is removed.
    #[error("Invalid region: {width}x{height} with gap {gap} leaves no plot area")]
    InvalidRegion {
        /// Full region width.
        width: f64,
        /// Full region height.
        height: f64,
        /// Inset reserved for decoration.
        gap: f64,
    },

    /// An axis range that cannot be mapped (`max <= min` or non-finite).
    #[error("Degenerate range on {axis} axis: min {min}, max {max}")]
    DegenerateAxis {
        /// Offending axis.
        axis: AxisIndex,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Tick spacing that is zero, negative or non-finite.
    #[error("Invalid tick spacing {spacing} on {axis} axis")]
    InvalidTick {
        /// Offending axis.
        axis: AxisIndex,
        /// Rejected spacing.
        spacing: f64,
    },

    /// Data length mismatch between labels and values.
    #[error("Data length mismatch: {labels} labels, {values} values")]
    DataLengthMismatch {
        /// Number of labels.
        labels: usize,
        /// Number of values.
        values: usize,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// A figure with this id is already registered on the canvas.
    #[error("Figure '{0}' is already registered")]
    DuplicateFigure(String),

    /// Rendering error reported by a drawing surface.
    #[error("Rendering error: {0}")]
    Rendering(String),

    /// Malformed figure configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}
