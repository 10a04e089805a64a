//! Interleaved 8-bit samples, the common currency of both codecs
//!
//! Decoders produce rows of 1 (gray), 2 (gray + alpha), 3 (RGB) or
//! 4 (RGBA) bytes per pixel; encoders take the same.

use crate::{IoError, IoResult};
use glyphline_core::{Pix, PixMut, PixelDepth, color};

fn word(px: &[u8]) -> u32 {
    match *px {
        [] => 0,
        [g] => u32::from(g),
        [g, a] => color::compose_rgba(g, g, g, a),
        [r, g, b] => color::compose_rgb(r, g, b),
        [r, g, b, a, ..] => color::compose_rgba(r, g, b, a),
    }
}

/// Raster from `height` rows of `channels`-sample pixels, `stride` bytes apart.
///
/// Gray lands at 8 bpp; everything else at 32 bpp, with `spp = 4` when
/// the source had alpha.
pub(crate) fn pix_from_samples(
    width: u32,
    height: u32,
    channels: usize,
    stride: usize,
    data: &[u8],
) -> IoResult<PixMut> {
    let (depth, spp) = match channels {
        1 => (PixelDepth::Bit8, 1),
        3 => (PixelDepth::Bit32, 3),
        2 | 4 => (PixelDepth::Bit32, 4),
        n => {
            return Err(IoError::UnsupportedFormat(format!(
                "{} samples per pixel",
                n
            )));
        }
    };
    let mut pm = PixMut::new(width, height, depth)?;
    pm.set_spp(spp);

    let row_len = width as usize * channels;
    let needed = stride * (height as usize - 1) + row_len;
    if stride < row_len || data.len() < needed {
        return Err(IoError::InvalidData(format!(
            "pixel data holds {} bytes, {}x{} needs {}",
            data.len(),
            width,
            height,
            needed
        )));
    }
    for (y, row) in data.chunks(stride).take(height as usize).enumerate() {
        for (x, px) in row[..row_len].chunks_exact(channels).enumerate() {
            pm.set_pixel_unchecked(x as u32, y as u32, word(px));
        }
    }
    Ok(pm)
}

/// Samples per pixel and tightly packed rows for writing `pix`.
///
/// Masks and gray images go out as one gray sample with ink black.
pub(crate) fn samples_from_pix(pix: &Pix) -> IoResult<(usize, Vec<u8>)> {
    let source = match pix.depth() {
        PixelDepth::Bit32 => pix.clone(),
        _ => pix.convert_to_8()?,
    };
    let channels = match (source.depth(), source.spp()) {
        (PixelDepth::Bit32, 4) => 4,
        (PixelDepth::Bit32, _) => 3,
        _ => 1,
    };
    let (w, h) = (source.width(), source.height());
    let mut out = Vec::with_capacity(w as usize * h as usize * channels);
    for y in 0..h {
        for x in 0..w {
            let v = source.get_pixel_unchecked(x, y);
            if channels == 1 {
                out.push(v as u8);
            } else {
                out.extend_from_slice(&v.to_be_bytes()[..channels]);
            }
        }
    }
    Ok((channels, out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_alpha_widens_to_rgba() {
        let pm = pix_from_samples(2, 1, 2, 4, &[10, 255, 20, 0]).unwrap();
        assert_eq!(pm.depth(), PixelDepth::Bit32);
        assert_eq!(pm.spp(), 4);
        assert_eq!(pm.get_pixel(1, 0), Some(color::compose_rgba(20, 20, 20, 0)));
    }

    #[test]
    fn test_padded_rows() {
        // stride 4 for 3 gray pixels
        let pm = pix_from_samples(3, 2, 1, 4, &[1, 2, 3, 0, 4, 5, 6]).unwrap();
        assert_eq!(pm.get_pixel(2, 1), Some(6));
        assert!(pix_from_samples(3, 2, 1, 4, &[1, 2, 3, 0, 4]).is_err());
    }

    #[test]
    fn test_mask_written_as_gray() {
        let mut pm = PixMut::new(3, 1, PixelDepth::Bit1).unwrap();
        pm.set_pixel(1, 0, 1).unwrap();
        let (channels, data) = samples_from_pix(&pm.into()).unwrap();
        assert_eq!(channels, 1);
        assert_eq!(data, [255, 0, 255]);
    }

    #[test]
    fn test_rgb_drops_alpha_byte() {
        let mut pm = PixMut::new(1, 1, PixelDepth::Bit32).unwrap();
        pm.set_pixel(0, 0, color::compose_rgb(7, 8, 9)).unwrap();
        assert_eq!(samples_from_pix(&pm.into()).unwrap(), (3, vec![7, 8, 9]));
    }
}
