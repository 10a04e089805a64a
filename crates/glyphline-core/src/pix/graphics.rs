//! Drawing onto rasters: rectangle fills, box outlines and pasting

use super::{Pix, PixMut, PixelDepth};
use crate::box_::{Box, Boxa};
use crate::color;
use crate::error::{Error, Result};

/// Opaque drawing color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// The color as an opaque 32 bpp word
    pub fn to_pixel32(&self) -> u32 {
        color::compose_rgb(self.r, self.g, self.b)
    }

    /// Value to store at `depth`: luma for gray, ink for anything but
    /// white on a mask.
    pub fn to_pixel(&self, depth: PixelDepth) -> u32 {
        match depth {
            PixelDepth::Bit1 => u32::from(*self != Color::WHITE),
            PixelDepth::Bit8 => u32::from(color::luma(self.r, self.g, self.b)),
            PixelDepth::Bit32 => self.to_pixel32(),
        }
    }
}

impl PixMut {
    fn bounds(&self) -> (i32, i32) {
        (self.width() as i32, self.height() as i32)
    }

    /// Set every pixel of `b` that lies on the image to the raw value `val`.
    pub fn fill_rect(&mut self, b: &Box, val: u32) {
        let (w, h) = self.bounds();
        if let Some(area) = b.clip(w, h) {
            for y in area.y..area.bottom() {
                for x in area.x..area.right() {
                    self.set_pixel_unchecked(x as u32, y as u32, val);
                }
            }
        }
    }

    /// Outline `b` with a `width` pixel stroke drawn inside its edges.
    ///
    /// The stroke covers columns `x..x + width` and `right - width..right`
    /// (likewise for rows) and is clipped to the image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a zero `width`.
    pub fn render_box_color(&mut self, b: &Box, width: u32, color: Color) -> Result<()> {
        if width == 0 {
            return Err(Error::InvalidParameter(
                "box outline width must be at least 1".to_string(),
            ));
        }
        if b.is_empty() {
            return Ok(());
        }
        let val = color.to_pixel(self.depth());
        let t = b.w.min(b.h).min(width.min(i32::MAX as u32) as i32);
        let bands = [
            Box::new_unchecked(b.x, b.y, b.w, t),
            Box::new_unchecked(b.x, b.bottom() - t, b.w, t),
            Box::new_unchecked(b.x, b.y, t, b.h),
            Box::new_unchecked(b.right() - t, b.y, t, b.h),
        ];
        for band in &bands {
            self.fill_rect(band, val);
        }
        Ok(())
    }

    /// [`PixMut::render_box_color`] for each box in turn
    pub fn render_boxa_color(&mut self, boxa: &Boxa, width: u32, color: Color) -> Result<()> {
        boxa.iter()
            .try_for_each(|b| self.render_box_color(b, width, color))
    }

    /// Copy `src` so its top-left pixel lands on `(dx, dy)`; offsets may be
    /// negative and whatever falls off this image is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleDepths`] when `src` has another depth.
    pub fn paste(&mut self, src: &Pix, dx: i32, dy: i32) -> Result<()> {
        if src.depth() != self.depth() {
            return Err(Error::IncompatibleDepths(
                src.depth().bits(),
                self.depth().bits(),
            ));
        }
        let (w, h) = self.bounds();
        let placed = Box::new_unchecked(dx, dy, src.width() as i32, src.height() as i32);
        let Some(area) = placed.clip(w, h) else {
            return Ok(());
        };
        for y in area.y..area.bottom() {
            let sy = (y - dy) as u32;
            for x in area.x..area.right() {
                let v = src.get_pixel_unchecked((x - dx) as u32, sy);
                self.set_pixel_unchecked(x as u32, y as u32, v);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_box_outline() {
        let mut pm = PixMut::new(10, 10, PixelDepth::Bit32).unwrap();
        pm.set_all(Color::WHITE.to_pixel32());
        pm.render_box_color(&Box::new_unchecked(2, 2, 5, 4), 1, Color::RED)
            .unwrap();
        let red = Color::RED.to_pixel32();
        assert_eq!(pm.get_pixel(2, 2), Some(red));
        assert_eq!(pm.get_pixel(6, 5), Some(red));
        assert_eq!(pm.get_pixel(4, 3), Some(Color::WHITE.to_pixel32()));
        assert_eq!(pm.get_pixel(7, 2), Some(Color::WHITE.to_pixel32()));
    }

    #[test]
    fn test_render_box_clipped() {
        let mut pm = PixMut::new(4, 4, PixelDepth::Bit8).unwrap();
        pm.render_box_color(&Box::new_unchecked(-2, -2, 10, 10), 1, Color::WHITE)
            .unwrap();
        assert_eq!(pm.get_pixel(0, 0), Some(0));
        assert!(pm.render_box_color(&Box::new_unchecked(0, 0, 2, 2), 0, Color::RED).is_err());
    }

    #[test]
    fn test_paste_negative_offset() {
        let mut src = PixMut::new(3, 3, PixelDepth::Bit8).unwrap();
        src.set_all(9);
        let src: Pix = src.into();
        let mut dst = PixMut::new(4, 4, PixelDepth::Bit8).unwrap();
        dst.paste(&src, -1, 2).unwrap();
        assert_eq!(dst.get_pixel(0, 2), Some(9));
        assert_eq!(dst.get_pixel(1, 3), Some(9));
        assert_eq!(dst.get_pixel(2, 2), Some(0));
        assert_eq!(dst.get_pixel(0, 1), Some(0));
    }

    #[test]
    fn test_paste_depth_mismatch() {
        let src = Pix::new(2, 2, PixelDepth::Bit1).unwrap();
        let mut dst = PixMut::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            dst.paste(&src, 0, 0),
            Err(Error::IncompatibleDepths(1, 8))
        ));
    }
}
