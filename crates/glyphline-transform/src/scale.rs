//! Image scaling operations
//!
//! Resampling uses a separable Lanczos-3 filter. When downscaling, the
//! filter support is widened by the reduction factor so the result is
//! anti-aliased rather than sampled.
//!
//! | Function | Purpose |
//! |---|---|
//! | [`scale_to_size`] | resample to an exact width and height |
//! | [`scale`] | resample by factors (output size truncated) |
//! | [`scale_to_height`] | fix the height, keep the aspect ratio |

use crate::{TransformError, TransformResult};
use glyphline_core::{Pix, PixMut, PixelDepth};
use std::f32::consts::PI;

/// Lobes of the Lanczos window
const LANCZOS_A: f32 = 3.0;

fn sinc(x: f32) -> f32 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

fn lanczos(x: f32) -> f32 {
    if x.abs() < LANCZOS_A {
        sinc(x) * sinc(x / LANCZOS_A)
    } else {
        0.0
    }
}

/// Precomputed filter taps for one output coordinate
struct Taps {
    start: usize,
    weights: Vec<f32>,
}

/// Compute normalized filter taps mapping `in_size` samples to `out_size`.
fn compute_taps(in_size: u32, out_size: u32) -> Vec<Taps> {
    let scale = in_size as f32 / out_size as f32;
    let filter_scale = scale.max(1.0);
    let support = LANCZOS_A * filter_scale;

    (0..out_size)
        .map(|o| {
            let center = (o as f32 + 0.5) * scale;
            let lo = ((center - support).floor().max(0.0)) as usize;
            let hi = ((center + support).ceil() as usize).min(in_size as usize);
            let mut weights: Vec<f32> = (lo..hi)
                .map(|i| lanczos((i as f32 + 0.5 - center) / filter_scale))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() > f32::EPSILON {
                weights.iter_mut().for_each(|w| *w /= sum);
            }
            Taps { start: lo, weights }
        })
        .collect()
}

#[inline]
fn clamp_u8(v: f32) -> u32 {
    v.round().clamp(0.0, 255.0) as u32
}

/// Resample an 8 bpp image to an exact size.
///
/// # Arguments
///
/// * `pix` - 8 bpp grayscale input
/// * `width` - Target width (must be > 0)
/// * `height` - Target height (must be > 0)
///
/// # Errors
///
/// Returns [`TransformError::UnsupportedDepth`] for non-8 bpp input and
/// [`TransformError::InvalidParameters`] for a zero target size.
pub fn scale_to_size(pix: &Pix, width: u32, height: u32) -> TransformResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(TransformError::UnsupportedDepth(format!(
            "Lanczos resampling requires 8 bpp, got {} bpp",
            pix.depth().bits()
        )));
    }
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidParameters(format!(
            "target size must be positive: {}x{}",
            width, height
        )));
    }

    let (w, h) = (pix.width(), pix.height());
    if w == width && h == height {
        return Ok(pix.clone());
    }

    // horizontal pass: h rows of `width` samples
    let xtaps = compute_taps(w, width);
    let mut tmp = vec![0f32; width as usize * h as usize];
    for y in 0..h {
        let row = &mut tmp[y as usize * width as usize..(y as usize + 1) * width as usize];
        for (ox, t) in xtaps.iter().enumerate() {
            row[ox] = t
                .weights
                .iter()
                .enumerate()
                .map(|(k, wt)| wt * pix.get_pixel_unchecked((t.start + k) as u32, y) as f32)
                .sum();
        }
    }

    // vertical pass into the output
    let ytaps = compute_taps(h, height);
    let mut out = PixMut::new(width, height, PixelDepth::Bit8)?;
    out.set_informat(pix.informat());
    for (oy, t) in ytaps.iter().enumerate() {
        for ox in 0..width as usize {
            let v: f32 = t
                .weights
                .iter()
                .enumerate()
                .map(|(k, wt)| wt * tmp[(t.start + k) * width as usize + ox])
                .sum();
            out.set_pixel_unchecked(ox as u32, oy as u32, clamp_u8(v));
        }
    }

    Ok(out.into())
}

/// Scale an image by the given factors.
///
/// The output size is `floor(w * scale_x) x floor(h * scale_y)`.
///
/// # Errors
///
/// Returns [`TransformError::InvalidScaleFactor`] if a factor is not
/// positive or the output would be empty.
pub fn scale(pix: &Pix, scale_x: f32, scale_y: f32) -> TransformResult<Pix> {
    if !(scale_x > 0.0 && scale_y > 0.0) {
        return Err(TransformError::InvalidScaleFactor(format!(
            "{} x {}",
            scale_x, scale_y
        )));
    }
    let new_w = (pix.width() as f32 * scale_x) as u32;
    let new_h = (pix.height() as f32 * scale_y) as u32;
    if new_w == 0 || new_h == 0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "{} x {} collapses {}x{} image",
            scale_x,
            scale_y,
            pix.width(),
            pix.height()
        )));
    }
    scale_to_size(pix, new_w, new_h)
}

/// Width an image of size `w x h` gets when rescaled to `height`.
///
/// `floor(w * height / h)`, never less than 1.
pub fn width_for_height(w: u32, h: u32, height: u32) -> u32 {
    ((u64::from(w) * u64::from(height)) / u64::from(h.max(1))).max(1) as u32
}

/// Rescale to a fixed height, preserving the aspect ratio.
pub fn scale_to_height(pix: &Pix, height: u32) -> TransformResult<Pix> {
    let width = width_for_height(pix.width(), pix.height(), height);
    scale_to_size(pix, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taps_are_normalized() {
        for (i, o) in [(10, 20), (20, 10), (7, 7), (64, 13)] {
            for t in compute_taps(i, o) {
                let sum: f32 = t.weights.iter().sum();
                assert!((sum - 1.0).abs() < 1e-4);
                assert!(t.start + t.weights.len() <= i as usize);
            }
        }
    }

    #[test]
    fn test_constant_image_stays_constant() {
        let pix = Pix::new_filled_gray(9, 5, 200).unwrap();
        let out = scale_to_size(&pix, 17, 13).unwrap();
        assert_eq!((out.width(), out.height()), (17, 13));
        for y in 0..13 {
            for x in 0..17 {
                assert_eq!(out.get_pixel(x, y), Some(200));
            }
        }
    }

    #[test]
    fn test_width_for_height() {
        assert_eq!(width_for_height(10, 32, 64), 20);
        assert_eq!(width_for_height(15, 32, 64), 30);
        assert_eq!(width_for_height(7, 3, 64), 149);
        assert_eq!(width_for_height(1, 200, 64), 1);
    }

    #[test]
    fn test_scale_factor_truncates() {
        let pix = Pix::new_filled_gray(100, 64, 255).unwrap();
        let out = scale(&pix, 0.5, 1.25).unwrap();
        assert_eq!((out.width(), out.height()), (50, 80));
        assert!(scale(&pix, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_rgb() {
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            scale_to_size(&pix, 2, 2),
            Err(TransformError::UnsupportedDepth(_))
        ));
    }
}
