//! Small-angle rotation of line images
//!
//! The image turns about its center and keeps its size. Whatever the turn
//! uncovers is filled with white paper. Positive angles turn
//! counter-clockwise on screen. Pixels are interpolated bilinearly.

use crate::{TransformError, TransformResult};
use glyphline_core::{Pix, PixMut, PixelDepth};

/// Angles below this many degrees leave the image untouched
const NEGLIGIBLE_DEGREES: f32 = 0.001;

/// Value of uncovered gray pixels
const PAPER: u32 = 255;

/// Turn the gray image `pix` by `angle` degrees about its center.
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedDepth`] for anything but 8 bpp
/// input and [`TransformError::InvalidParameters`] when `angle` is NaN or
/// infinite.
pub fn rotate(pix: &Pix, angle: f32) -> TransformResult<Pix> {
    if !angle.is_finite() {
        return Err(TransformError::InvalidParameters(format!(
            "cannot rotate by {} degrees",
            angle
        )));
    }
    if pix.depth() != PixelDepth::Bit8 {
        return Err(TransformError::UnsupportedDepth(format!(
            "only gray images rotate, got {} bpp",
            pix.depth().bits()
        )));
    }
    if angle.abs() < NEGLIGIBLE_DEGREES {
        return Ok(pix.clone());
    }

    let (w, h) = (pix.width(), pix.height());
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);
    let (sin, cos) = angle.to_radians().sin_cos();

    let mut out = PixMut::new(w, h, PixelDepth::Bit8)?;
    out.set_informat(pix.informat());
    for y in 0..h {
        // offsets of the destination pixel center from the turning point
        let oy = y as f32 + 0.5 - cy;
        for x in 0..w {
            let ox = x as f32 + 0.5 - cx;
            let sx = ox * cos - oy * sin + cx - 0.5;
            let sy = ox * sin + oy * cos + cy - 0.5;
            out.set_pixel_unchecked(x, y, sample_bilinear(pix, sx, sy));
        }
    }
    Ok(out.into())
}

/// Pixel at (x, y), or paper off the image
#[inline]
fn pixel_or_paper(pix: &Pix, x: i64, y: i64) -> u32 {
    if x < 0 || y < 0 || x >= pix.width() as i64 || y >= pix.height() as i64 {
        PAPER
    } else {
        pix.get_pixel_unchecked(x as u32, y as u32)
    }
}

fn sample_bilinear(pix: &Pix, sx: f32, sy: f32) -> u32 {
    let x0 = sx.floor();
    let y0 = sy.floor();
    let fx = sx - x0;
    let fy = sy - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let p00 = pixel_or_paper(pix, x0, y0) as f32;
    let p10 = pixel_or_paper(pix, x0 + 1, y0) as f32;
    let p01 = pixel_or_paper(pix, x0, y0 + 1) as f32;
    let p11 = pixel_or_paper(pix, x0 + 1, y0 + 1) as f32;

    let top = p00 + (p10 - p00) * fx;
    let bottom = p01 + (p11 - p01) * fx;
    (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u32
}
