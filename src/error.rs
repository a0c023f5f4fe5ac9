//! Error types for board construction, pattern parsing and persistence.

use thiserror::Error;

/// Errors produced by the simulation core and its file layer.
///
/// Classification misses and empty inputs are not errors; they yield
/// `"Undefined"` or empty results instead.
#[derive(Debug, Error)]
pub enum LifeError {
    /// Pixel dimensions that do not divide into a positive cell grid.
    #[error("invalid board dimensions: {width}x{height} px with cell size {cell_size}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        cell_size: usize,
    },

    /// Live density outside `[0, 1]`.
    #[error("live density {0} is outside [0, 1]")]
    InvalidDensity(f64),

    /// A pattern row whose length differs from the first row.
    #[error("pattern row {row} has length {found}, expected {expected}")]
    RaggedPattern {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A colony that does not fit on the board it is placed on.
    #[error("pattern {pattern_width}x{pattern_height} does not fit on a {columns}x{rows} board")]
    PatternTooLarge {
        pattern_width: usize,
        pattern_height: usize,
        columns: usize,
        rows: usize,
    },

    /// Configuration values that cannot be run.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),
}

impl LifeError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        LifeError::InvalidConfig(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LifeError>;
