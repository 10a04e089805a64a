//! Gray-level histograms

use crate::{ColorError, ColorResult};
use glyphline_core::{Pix, PixelDepth};

/// Count the pixels at each gray level of an 8 bpp image.
pub fn gray_histogram(pix: &Pix) -> ColorResult<[u64; 256]> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    let mut hist = [0u64; 256];
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            hist[pix.get_pixel_unchecked(x, y) as usize] += 1;
        }
    }
    Ok(hist)
}
