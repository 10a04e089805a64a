//! Convolution and Gaussian blur
//!
//! Borders are handled by replicating the nearest edge pixel.

use crate::{FilterError, FilterResult, Kernel};
use glyphline_core::{Pix, PixMut, PixelDepth};

fn require_gray(pix: &Pix) -> FilterResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(FilterError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Convolve an 8 bpp image with a 2-D kernel.
pub fn convolve(pix: &Pix, kernel: &Kernel) -> FilterResult<Pix> {
    require_gray(pix)?;
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let (kw, kh) = (kernel.width() as i32, kernel.height() as i32);
    let (cx, cy) = kernel.center();
    let (cx, cy) = (cx as i32, cy as i32);

    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit8)?;
    out.set_informat(pix.informat());

    for y in 0..h {
        for x in 0..w {
            let mut acc = 0f32;
            for ky in 0..kh {
                let sy = (y + ky - cy).clamp(0, h - 1) as u32;
                for kx in 0..kw {
                    let sx = (x + kx - cx).clamp(0, w - 1) as u32;
                    let kv = kernel.data()[(ky * kw + kx) as usize];
                    acc += kv * pix.get_pixel_unchecked(sx, sy) as f32;
                }
            }
            out.set_pixel_unchecked(x as u32, y as u32, acc.round().clamp(0.0, 255.0) as u32);
        }
    }
    Ok(out.into())
}

/// Convolve with a horizontal then a vertical kernel.
///
/// The intermediate result is kept in floating point so the two passes
/// round only once.
pub fn convolve_sep(pix: &Pix, kx: &Kernel, ky: &Kernel) -> FilterResult<Pix> {
    require_gray(pix)?;
    if kx.height() != 1 || ky.width() != 1 {
        return Err(FilterError::InvalidKernel(
            "separable convolution needs a row and a column kernel".to_string(),
        ));
    }
    let (w, h) = (pix.width() as i32, pix.height() as i32);

    let (cx, _) = kx.center();
    let cx = cx as i32;
    let mut tmp = vec![0f32; (w * h) as usize];
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0f32;
            for (k, kv) in kx.data().iter().enumerate() {
                let sx = (x + k as i32 - cx).clamp(0, w - 1) as u32;
                acc += kv * pix.get_pixel_unchecked(sx, y as u32) as f32;
            }
            tmp[(y * w + x) as usize] = acc;
        }
    }

    let (_, cy) = ky.center();
    let cy = cy as i32;
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit8)?;
    out.set_informat(pix.informat());
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0f32;
            for (k, kv) in ky.data().iter().enumerate() {
                let sy = (y + k as i32 - cy).clamp(0, h - 1);
                acc += kv * tmp[(sy * w + x) as usize];
            }
            out.set_pixel_unchecked(x as u32, y as u32, acc.round().clamp(0.0, 255.0) as u32);
        }
    }
    Ok(out.into())
}

/// Gaussian blur with standard deviation `sigma`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidKernel`] if `sigma` is not positive and
/// [`FilterError::UnsupportedDepth`] for non-8 bpp input.
pub fn gaussian_blur(pix: &Pix, sigma: f32) -> FilterResult<Pix> {
    let kx = Kernel::gaussian_1d(sigma)?;
    let ky = kx.transpose();
    convolve_sep(pix, &kx, &ky)
}
