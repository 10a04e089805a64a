//! Image files for the corpus tools
//!
//! Two formats cover the pipeline:
//!
//! - PNG: glyph templates (any color type) and box previews
//! - TIFF: uncompressed line images handed to the recognition engine
//!
//! # Example
//!
//! ```no_run
//! use glyphline_io::{read_image, write_image, ImageFormat};
//!
//! let pix = read_image("glyphs/lower_case/a.png").unwrap();
//! write_image(&pix, "line_0000.tif", ImageFormat::Tiff).unwrap();
//! ```

mod error;
pub mod format;
pub mod png;
mod samples;
pub mod tiff;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, format_from_path};
pub use glyphline_core::ImageFormat;

use glyphline_core::Pix;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// The format is detected from the file's magic bytes, not its extension.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);
    read_image_format(reader, format)
}

fn read_image_format<R: BufRead + Seek>(reader: R, format: ImageFormat) -> IoResult<Pix> {
    match format {
        ImageFormat::Png => crate::png::read_png(reader),
        ImageFormat::Tiff => crate::tiff::read_tiff(reader),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "unrecognized image header".to_string(),
        )),
    }
}

/// Write an image to a file path in the given format.
///
/// Passing [`ImageFormat::Unknown`] picks the format from the path's
/// extension.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let format = match format {
        ImageFormat::Unknown => format_from_path(path),
        f => f,
    };
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

fn write_image_to<W: Write + Seek>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        ImageFormat::Png => crate::png::write_png(pix, writer),
        ImageFormat::Tiff => crate::tiff::write_tiff(pix, writer),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(
            "no output format given".to_string(),
        )),
    }
}
