//! Fixed-size canvas placement

use crate::TransformResult;
use glyphline_core::{Pix, PixMut};

/// Center `pix` on a `width x height` canvas filled with `fill`.
///
/// A smaller image is padded and a larger one is cropped, equally on both
/// sides (the extra pixel of an odd difference goes right/bottom).
pub fn embed_centered(pix: &Pix, width: u32, height: u32, fill: u32) -> TransformResult<Pix> {
    if pix.width() == width && pix.height() == height {
        return Ok(pix.clone());
    }
    let mut canvas = PixMut::new(width, height, pix.depth())?;
    canvas.set_informat(pix.informat());
    canvas.set_all(fill);

    let dx = (width as i32 - pix.width() as i32) / 2;
    let dy = (height as i32 - pix.height() as i32) / 2;
    canvas.paste(pix, dx, dy)?;
    Ok(canvas.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphline_core::PixelDepth;

    #[test]
    fn test_pad_smaller() {
        let pix = Pix::new_filled_gray(4, 2, 0).unwrap();
        let out = embed_centered(&pix, 8, 6, 255).unwrap();
        assert_eq!(out.get_pixel(1, 2), Some(255));
        assert_eq!(out.get_pixel(2, 2), Some(0));
        assert_eq!(out.get_pixel(5, 3), Some(0));
        assert_eq!(out.get_pixel(6, 3), Some(255));
    }

    #[test]
    fn test_crop_larger() {
        let mut pm = PixMut::new(10, 4, PixelDepth::Bit8).unwrap();
        for x in 0..10 {
            for y in 0..4 {
                pm.set_pixel(x, y, x * 10).unwrap();
            }
        }
        let out = embed_centered(&pm.into(), 6, 4, 255).unwrap();
        assert_eq!(out.width(), 6);
        // two columns dropped on each side
        assert_eq!(out.get_pixel(0, 0), Some(20));
        assert_eq!(out.get_pixel(5, 0), Some(70));
    }
}
