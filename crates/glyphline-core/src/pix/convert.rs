//! Depth conversion
//!
//! Masks follow the ink convention throughout: a set bit is ink and
//! converts to black.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::Result;

/// Channel value seen through alpha `a` against white paper
#[inline]
fn over_white(c: u8, a: u8) -> u8 {
    let (c, a) = (u32::from(c), u32::from(a));
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}

#[inline]
fn ink_to_gray(v: u32) -> u8 {
    if v != 0 { 0 } else { 255 }
}

impl Pix {
    /// New image at `depth` with `f` applied to every pixel value
    fn remap(&self, depth: PixelDepth, f: impl Fn(u32) -> u32) -> Result<Pix> {
        let mut out = PixMut::new(self.width(), self.height(), depth)?;
        out.set_informat(self.informat());
        for y in 0..self.height() {
            for x in 0..self.width() {
                out.set_pixel_unchecked(x, y, f(self.get_pixel_unchecked(x, y)));
            }
        }
        Ok(out.into())
    }

    /// 8 bpp gray version of the image.
    ///
    /// Ink becomes 0 and paper 255. Color goes through [`color::luma`],
    /// after compositing over white when the image has alpha, so the
    /// transparent parts of a glyph template read as paper. Gray input is
    /// returned as another handle to the same pixels.
    pub fn convert_to_8(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit8 => Ok(self.clone()),
            PixelDepth::Bit1 => self.remap(PixelDepth::Bit8, |v| u32::from(ink_to_gray(v))),
            PixelDepth::Bit32 => {
                let alpha = self.spp() == 4;
                self.remap(PixelDepth::Bit8, |v| {
                    let (r, g, b, a) = color::extract_rgba(v);
                    let gray = if alpha {
                        color::luma(over_white(r, a), over_white(g, a), over_white(b, a))
                    } else {
                        color::luma(r, g, b)
                    };
                    u32::from(gray)
                })
            }
        }
    }

    /// Opaque 32 bpp version; gray is copied into all three channels and
    /// any alpha is dropped.
    pub fn convert_to_32(&self) -> Result<Pix> {
        let gray_word = |g: u8| color::compose_rgb(g, g, g);
        match self.depth() {
            PixelDepth::Bit1 => self.remap(PixelDepth::Bit32, |v| gray_word(ink_to_gray(v))),
            PixelDepth::Bit8 => self.remap(PixelDepth::Bit32, |v| gray_word(v as u8)),
            PixelDepth::Bit32 => self.remap(PixelDepth::Bit32, |v| {
                let (r, g, b) = color::extract_rgb(v);
                color::compose_rgb(r, g, b)
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_to_gray() {
        let mut pm = PixMut::new(2, 1, PixelDepth::Bit1).unwrap();
        pm.set_pixel(0, 0, 1).unwrap();
        let gray = Pix::from(pm).convert_to_8().unwrap();
        assert_eq!(gray.get_pixel(0, 0), Some(0));
        assert_eq!(gray.get_pixel(1, 0), Some(255));
    }

    #[test]
    fn test_transparent_becomes_white() {
        let mut pm = PixMut::new(2, 1, PixelDepth::Bit32).unwrap();
        pm.set_spp(4);
        pm.set_pixel(0, 0, color::compose_rgba(0, 0, 0, 0)).unwrap();
        pm.set_pixel(1, 0, color::compose_rgba(0, 0, 0, 255)).unwrap();
        let gray = Pix::from(pm).convert_to_8().unwrap();
        assert_eq!(gray.get_pixel(0, 0), Some(255));
        assert_eq!(gray.get_pixel(1, 0), Some(0));
    }

    #[test]
    fn test_gray_to_rgb() {
        let pix = Pix::new_filled_gray(3, 2, 128).unwrap();
        let rgb = pix.convert_to_32().unwrap();
        assert_eq!(rgb.depth(), PixelDepth::Bit32);
        assert_eq!(rgb.get_rgb(2, 1), Some((128, 128, 128)));
    }
}
