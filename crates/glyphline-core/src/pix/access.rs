//! Per-pixel reads and writes
//!
//! Bit 31 of a row's first word holds pixel 0 of a mask; an 8 bpp row
//! keeps pixel 0 in bits 24..32.

use super::{Pix, PixMut, PixelDepth, Raster};
use crate::error::{Error, Result};

#[inline]
fn read_packed(line: &[u32], x: u32, depth: PixelDepth) -> u32 {
    match depth {
        PixelDepth::Bit1 => (line[(x >> 5) as usize] >> (31 - (x & 31))) & 1,
        PixelDepth::Bit8 => (line[(x >> 2) as usize] >> (8 * (3 - (x & 3)))) & 0xff,
        PixelDepth::Bit32 => line[x as usize],
    }
}

#[inline]
fn write_packed(line: &mut [u32], x: u32, depth: PixelDepth, val: u32) {
    match depth {
        PixelDepth::Bit1 => {
            let word = &mut line[(x >> 5) as usize];
            let mask = 1u32 << (31 - (x & 31));
            if val & 1 != 0 {
                *word |= mask;
            } else {
                *word &= !mask;
            }
        }
        PixelDepth::Bit8 => {
            let word = &mut line[(x >> 2) as usize];
            let shift = 8 * (3 - (x & 3));
            *word = (*word & !(0xff << shift)) | ((val & 0xff) << shift);
        }
        PixelDepth::Bit32 => line[x as usize] = val,
    }
}

impl Raster {
    fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    fn read(&self, x: u32, y: u32) -> Option<u32> {
        self.contains(x, y)
            .then(|| read_packed(self.row(y), x, self.depth))
    }
}

impl Pix {
    /// Pixel at (x, y), or `None` outside the image
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.raster().read(x, y)
    }

    /// Pixel at (x, y) with no bounds check.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_packed(self.raster().row(y), x, self.depth())
    }

    /// Channels of a 32 bpp pixel; `None` for other depths.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(crate::color::extract_rgb)
    }
}

impl PixMut {
    /// Pixel at (x, y), or `None` outside the image
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.raster().read(x, y)
    }

    /// Pixel at (x, y) with no bounds check
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_packed(self.raster().row(y), x, self.depth())
    }

    /// Write one pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfBounds`] outside the image.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        if !self.raster().contains(x, y) {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// Write one pixel with no bounds check; bits above the depth are dropped.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        write_packed(self.inner.row_mut(y), x, depth, val);
    }

    /// Fill the whole image with `val`
    pub fn set_all(&mut self, val: u32) {
        let word = match self.depth() {
            PixelDepth::Bit1 => {
                if val & 1 != 0 {
                    u32::MAX
                } else {
                    0
                }
            }
            PixelDepth::Bit8 => (val & 0xff) * 0x0101_0101,
            PixelDepth::Bit32 => val,
        };
        self.inner.words.fill(word);
    }
}
