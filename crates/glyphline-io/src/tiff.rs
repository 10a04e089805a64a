//! Uncompressed TIFF, the line image format the engine reads for box
//! generation and training

use crate::samples::{pix_from_samples, samples_from_pix};
use crate::{IoError, IoResult};
use glyphline_core::{ImageFormat, Pix};
use std::io::{Read, Seek, Write};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::{Gray8, RGB8, RGBA8};
use tiff::encoder::{Compression, TiffEncoder};
use tiff::tags::Tag;
use tiff::{ColorType, TiffError};

fn decode_err(e: TiffError) -> IoError {
    IoError::DecodeError(format!("TIFF: {}", e))
}

fn encode_err(e: TiffError) -> IoError {
    IoError::EncodeError(format!("TIFF: {}", e))
}

/// Expand a bilevel strip (8 pixels per byte, rows byte-aligned) to 0/255.
fn unpack_bilevel(data: &[u8], width: u32, height: u32) -> IoResult<Vec<u8>> {
    let row_bytes = (width as usize).div_ceil(8);
    if data.len() < row_bytes * height as usize {
        return Err(IoError::InvalidData(format!(
            "bilevel TIFF strip too short for {}x{}",
            width, height
        )));
    }
    let mut out = Vec::with_capacity(width as usize * height as usize);
    for row in data.chunks(row_bytes).take(height as usize) {
        out.extend((0..width as usize).map(|x| {
            let bit = (row[x / 8] >> (7 - x % 8)) & 1;
            bit * 255
        }));
    }
    Ok(out)
}

/// Decode the first page.
///
/// Gray pages (1, 8 or 16 bit) come back at 8 bpp with 0 as black, also
/// when the file declares WhiteIsZero. 16-bit samples keep their high byte.
pub fn read_tiff<R: Read + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader).map_err(decode_err)?;
    let (width, height) = decoder.dimensions().map_err(decode_err)?;
    let color_type = decoder.colortype().map_err(decode_err)?;
    let white_is_zero = matches!(decoder.get_tag_u32(Tag::PhotometricInterpretation), Ok(0));

    let channels = match color_type {
        ColorType::Gray(1 | 8 | 16) => 1,
        ColorType::GrayA(8) => 2,
        ColorType::RGB(8) => 3,
        ColorType::RGBA(8) => 4,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "TIFF color type {:?}",
                other
            )));
        }
    };

    let mut samples = match decoder.read_image().map_err(decode_err)? {
        DecodingResult::U8(data) if matches!(color_type, ColorType::Gray(1)) => {
            unpack_bilevel(&data, width, height)?
        }
        DecodingResult::U8(data) => data,
        DecodingResult::U16(data) => data.iter().map(|v| (v >> 8) as u8).collect(),
        _ => {
            return Err(IoError::UnsupportedFormat(
                "TIFF sample format other than 8 or 16 bit unsigned".to_string(),
            ));
        }
    };
    if white_is_zero && channels == 1 {
        samples.iter_mut().for_each(|v| *v = 255 - *v);
    }

    let mut pm = pix_from_samples(width, height, channels, width as usize * channels, &samples)?;
    pm.set_informat(ImageFormat::Tiff);
    Ok(pm.into())
}

/// Encode as a single uncompressed page; masks become 8-bit gray.
pub fn write_tiff<W: Write + Seek>(pix: &Pix, writer: W) -> IoResult<()> {
    let (channels, samples) = samples_from_pix(pix)?;
    let mut encoder = TiffEncoder::new(writer)
        .map_err(encode_err)?
        .with_compression(Compression::Uncompressed);
    let (w, h) = (pix.width(), pix.height());
    match channels {
        4 => encoder.write_image::<RGBA8>(w, h, &samples),
        3 => encoder.write_image::<RGB8>(w, h, &samples),
        _ => encoder.write_image::<Gray8>(w, h, &samples),
    }
    .map_err(encode_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphline_core::{PixMut, PixelDepth, color};
    use std::io::Cursor;

    fn roundtrip(pix: &Pix) -> Pix {
        let mut cursor = Cursor::new(Vec::new());
        write_tiff(pix, &mut cursor).unwrap();
        cursor.set_position(0);
        read_tiff(cursor).unwrap()
    }

    #[test]
    fn test_gray_line_roundtrip() {
        let mut pm = PixMut::new(7, 4, PixelDepth::Bit8).unwrap();
        pm.set_all(255);
        pm.set_pixel(3, 2, 10).unwrap();
        let pix: Pix = pm.into();
        let back = roundtrip(&pix);
        assert!(back.equals(&pix));
        assert_eq!(back.informat(), ImageFormat::Tiff);
    }

    #[test]
    fn test_rgb_roundtrip() {
        let mut pm = PixMut::new(3, 3, PixelDepth::Bit32).unwrap();
        pm.set_pixel(2, 0, color::compose_rgb(200, 100, 50)).unwrap();
        let back = roundtrip(&pm.into());
        assert_eq!(back.get_rgb(2, 0), Some((200, 100, 50)));
    }

    #[test]
    fn test_mask_comes_back_gray() {
        let mut pm = PixMut::new(4, 1, PixelDepth::Bit1).unwrap();
        pm.set_pixel(1, 0, 1).unwrap();
        let back = roundtrip(&pm.into());
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.get_pixel(1, 0), Some(0));
        assert_eq!(back.get_pixel(2, 0), Some(255));
    }

    #[test]
    fn test_unpack_bilevel() {
        let out = unpack_bilevel(&[0b1010_0000, 0b0000_0001], 3, 2).unwrap();
        assert_eq!(out, [255, 0, 255, 0, 0, 0]);
        assert!(unpack_bilevel(&[0], 3, 2).is_err());
    }
}
