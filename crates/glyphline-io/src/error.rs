//! Errors from reading and writing image files

use thiserror::Error;

/// Failure while reading or writing an image
#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Header not recognized, or a color layout the codecs do not handle
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Pixel data shorter or shaped differently than the header promises
    #[error("invalid image data: {0}")]
    InvalidData(String),

    #[error("decode error: {0}")]
    DecodeError(String),

    #[error("encode error: {0}")]
    EncodeError(String),

    #[error(transparent)]
    Core(#[from] glyphline_core::Error),
}

pub type IoResult<T> = Result<T, IoError>;
