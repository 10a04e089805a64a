//! Format sniffing
//!
//! Reads trust the header bytes; writes without an explicit format go by
//! the file extension.

use crate::{IoError, IoResult};
use glyphline_core::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (b"\x89PNG\r\n\x1a\n", ImageFormat::Png),
    (b"II*\0", ImageFormat::Tiff),
    (b"MM\0*", ImageFormat::Tiff),
];

/// Format of the file at `path`, from its first bytes
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut header = Vec::with_capacity(8);
    File::open(path)?.take(8).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Format of an in-memory image; [`ImageFormat::Unknown`] for anything else.
///
/// # Errors
///
/// Fails on fewer than four bytes.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 4 {
        return Err(IoError::InvalidData(format!(
            "{} byte header is too short to identify",
            data.len()
        )));
    }
    Ok(SIGNATURES
        .iter()
        .find(|(magic, _)| data.starts_with(magic))
        .map_or(ImageFormat::Unknown, |&(_, format)| format))
}

/// Format named by the extension of `path`, or `Unknown`
pub fn format_from_path<P: AsRef<Path>>(path: P) -> ImageFormat {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(ImageFormat::from_extension)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signatures() {
        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0];
        assert_eq!(detect_format_from_bytes(&png).unwrap(), ImageFormat::Png);
        assert_eq!(detect_format_from_bytes(b"II*\0abcd").unwrap(), ImageFormat::Tiff);
        assert_eq!(detect_format_from_bytes(b"MM\0*abcd").unwrap(), ImageFormat::Tiff);
        assert_eq!(detect_format_from_bytes(b"GIF89a").unwrap(), ImageFormat::Unknown);
        assert!(detect_format_from_bytes(b"BM").is_err());
    }

    #[test]
    fn test_extension_lookup() {
        assert_eq!(format_from_path("a/line_0001.tif"), ImageFormat::Tiff);
        assert_eq!(format_from_path("p.PNG"), ImageFormat::Png);
        assert_eq!(format_from_path("noext"), ImageFormat::Unknown);
    }
}
