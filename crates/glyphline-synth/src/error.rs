//! Error types for glyphline-synth

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading glyphs or generating lines
#[derive(Debug, Error)]
pub enum SynthError {
    /// No glyph could be loaded from the library root
    #[error("no glyph images found under {}", .root.display())]
    EmptyLibrary {
        /// Library root that was scanned
        root: PathBuf,
    },

    /// A character of the text has no glyph
    #[error("character {ch:?} not found in glyph library")]
    MissingGlyph {
        /// The missing character
        ch: char,
    },

    /// Invalid generator or compositor parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Worker pool could not be started
    #[error("worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image decode/encode error
    #[error("image error: {0}")]
    Image(#[from] glyphline_io::IoError),

    /// Geometric transform error
    #[error("transform error: {0}")]
    Transform(#[from] glyphline_transform::TransformError),

    /// Filter error
    #[error("filter error: {0}")]
    Filter(#[from] glyphline_filter::FilterError),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] glyphline_core::Error),
}

/// Result type for synthesis operations
pub type SynthResult<T> = Result<T, SynthError>;
