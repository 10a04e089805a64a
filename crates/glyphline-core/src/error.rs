//! Error types for glyphline-core

use thiserror::Error;

/// Errors raised by raster and rectangle operations
#[derive(Error, Debug)]
pub enum Error {
    /// An image side is zero
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel coordinate outside the image
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Source and destination depths differ
    #[error("incompatible pixel depths: {0} bpp vs {1} bpp")]
    IncompatibleDepths(u32, u32),

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
