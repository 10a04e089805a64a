//! Binary thresholding
//!
//! Masks follow the ink convention: a pixel at or below the threshold is
//! dark, and dark pixels become foreground (1) in the 1 bpp output.

use crate::{ColorError, ColorResult, gray_histogram};
use glyphline_core::{Pix, PixMut, PixelDepth};

/// Convert a grayscale image to an ink mask using a fixed threshold.
///
/// Pixels `<= threshold` become foreground (1), brighter pixels become
/// background (0).
pub fn threshold_to_binary(pix: &Pix, threshold: u8) -> ColorResult<Pix> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            if pix.get_pixel_unchecked(x, y) <= threshold as u32 {
                out.set_pixel_unchecked(x, y, 1);
            }
        }
    }
    Ok(out.into())
}

/// Otsu's threshold for a 256-bin histogram.
///
/// Returns the level `t` that maximizes the between-class variance of
/// the split `[0, t]` / `(t, 255]`. The lowest such level wins ties, and
/// a histogram with a single populated level yields 0.
pub fn otsu_threshold_from_histogram(hist: &[u64; 256]) -> u8 {
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0;
    }
    let scale = 1.0 / total as f64;
    let mu: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &n)| i as f64 * n as f64 * scale)
        .sum();

    let mut q1 = 0.0f64;
    let mut mu1 = 0.0f64;
    let mut best_sigma = 0.0f64;
    let mut best = 0u8;

    for (i, &n) in hist.iter().enumerate() {
        let p = n as f64 * scale;
        mu1 *= q1;
        q1 += p;
        let q2 = 1.0 - q1;
        if q1.min(q2) < f32::EPSILON as f64 || q1.max(q2) > 1.0 - f32::EPSILON as f64 {
            continue;
        }
        mu1 = (mu1 + i as f64 * p) / q1;
        let mu2 = (mu - q1 * mu1) / q2;
        let sigma = q1 * q2 * (mu1 - mu2) * (mu1 - mu2);
        if sigma > best_sigma {
            best_sigma = sigma;
            best = i as u8;
        }
    }
    best
}

/// Compute Otsu's threshold for a grayscale image.
pub fn compute_otsu_threshold(pix: &Pix) -> ColorResult<u8> {
    Ok(otsu_threshold_from_histogram(&gray_histogram(pix)?))
}

/// Binarize with an automatically chosen global threshold.
///
/// Returns the ink mask together with the threshold used.
pub fn threshold_otsu(pix: &Pix) -> ColorResult<(Pix, u8)> {
    let t = compute_otsu_threshold(pix)?;
    Ok((threshold_to_binary(pix, t)?, t))
}
