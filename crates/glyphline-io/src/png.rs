//! PNG codec
//!
//! Glyph templates arrive in any PNG color type. Palettes and sub-byte
//! depths are expanded and 16-bit samples stripped on read, so every
//! template lands as 8-bit gray or 32-bit RGB(A). Previews are written
//! as 8-bit RGB.

use crate::samples::{pix_from_samples, samples_from_pix};
use crate::{IoError, IoResult};
use glyphline_core::{ImageFormat, Pix};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG: {}", e)))?;
    let (width, height) = (reader.info().width, reader.info().height);

    let channels = match reader.output_color_type() {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => 2,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        (ct, depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNG output {:?} at {:?} after expansion",
                ct, depth
            )));
        }
    };

    let size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError(format!("PNG {}x{} too large", width, height)))?;
    let mut buf = vec![0; size];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame: {}", e)))?;

    let mut pm = pix_from_samples(
        width,
        height,
        channels,
        frame.line_size,
        &buf[..frame.buffer_size()],
    )?;
    pm.set_informat(ImageFormat::Png);
    Ok(pm.into())
}

/// Encode at 8 bits per sample; masks become gray with ink black.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let (channels, samples) = samples_from_pix(pix)?;
    let mut encoder = Encoder::new(writer, pix.width(), pix.height());
    encoder.set_color(match channels {
        4 => ColorType::Rgba,
        3 => ColorType::Rgb,
        _ => ColorType::Grayscale,
    });
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header: {}", e)))?;
    writer
        .write_image_data(&samples)
        .map_err(|e| IoError::EncodeError(format!("PNG data: {}", e)))
}
