//! Error types for blueprint export.

use crate::types::MapCoord;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`ExportError`].
pub type Result<T> = std::result::Result<T, ExportError>;

/// Everything that can abort a blueprint export.
///
/// Unsupported building or tile sub-variants are deliberately absent:
/// those degrade to placeholder tokens during classification and never
/// surface as errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No phase flags set and auto-detect off: nothing to do.
    #[error("no phases requested! nothing to do!")]
    NoPhaseRequested,

    /// No explicit start coordinate and the map has no active cursor.
    #[error("can't get cursor coords! specify a start position or activate the map cursor")]
    MissingCursor,

    /// The start coordinate lies outside the map.
    #[error("invalid start position: {0}")]
    InvalidStart(MapCoord),

    /// Width or height non-positive, or depth zero.
    #[error("invalid region dimensions: {width}x{height}x{depth}")]
    InvalidDimensions { width: i32, height: i32, depth: i32 },

    /// The output directory could not be created.
    #[error("could not create output directory '{}': {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The filename policy failed to produce a path.
    #[error("could not resolve output filename: {0}")]
    Filename(String),

    /// Writing or flushing an output stream failed.
    #[error("blueprint write failed: {0}")]
    Io(#[from] std::io::Error),
}
