//! Blur regression test
//!
//! The separable Gaussian must agree with the equivalent full 2-D kernel,
//! and wider radii must spread ink further.

use glyphline_core::Pix;
use glyphline_filter::{Kernel, convolve, gaussian_blur};
use glyphline_test::{RegParams, bar_glyph};

fn max_abs_diff(a: &Pix, b: &Pix) -> u32 {
    let mut max = 0;
    for y in 0..a.height() {
        for x in 0..a.width() {
            let (p, q) = (a.get_pixel_unchecked(x, y), b.get_pixel_unchecked(x, y));
            max = max.max(p.abs_diff(q));
        }
    }
    max
}

#[test]
fn blur_reg() {
    let mut rp = RegParams::new("blur");
    let pixs = bar_glyph(24, 32, 6).unwrap();

    // --- Test 1: separable pass matches the full 2-D kernel ---
    let k1 = Kernel::gaussian_1d(1.0).unwrap();
    let n = k1.width();
    let mut full = Vec::with_capacity((n * n) as usize);
    for y in 0..n {
        for x in 0..n {
            full.push(k1.data()[y as usize] * k1.data()[x as usize]);
        }
    }
    let k2 = Kernel::from_slice(n, n, &full).unwrap();
    let separable = gaussian_blur(&pixs, 1.0).unwrap();
    let direct = convolve(&pixs, &k2).unwrap();
    rp.check(max_abs_diff(&separable, &direct) <= 1, "separable equals 2-D");

    // --- Test 2: larger radius spreads ink further from the edge ---
    let narrow = gaussian_blur(&pixs, 0.5).unwrap();
    let wide = gaussian_blur(&pixs, 1.5).unwrap();
    let (nx, wx) = (narrow.get_pixel(4, 16).unwrap(), wide.get_pixel(4, 16).unwrap());
    rp.check(wx < nx, "wider blur darkens the margin more");
    rp.compare_values(255.0, narrow.get_pixel(0, 0).unwrap() as f64, 0.0);

    // --- Test 3: dimensions preserved, non-gray input rejected ---
    rp.compare_values(24.0, wide.width() as f64, 0.0);
    rp.compare_values(32.0, wide.height() as f64, 0.0);
    let rgb = pixs.convert_to_32().unwrap();
    rp.check(gaussian_blur(&rgb, 1.0).is_err(), "32 bpp rejected");

    assert!(rp.cleanup());
}
