//! Binarization regression test
//!
//! Otsu thresholding of clean and blurred glyph templates.

use glyphline_color::{compute_otsu_threshold, threshold_otsu, threshold_to_binary};
use glyphline_filter::gaussian_blur;
use glyphline_test::{RegParams, bar_glyph};

fn ink_count(pix: &glyphline_core::Pix) -> u32 {
    let mut n = 0;
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            n += pix.get_pixel_unchecked(x, y);
        }
    }
    n
}

#[test]
fn binarize_reg() {
    let mut rp = RegParams::new("binarize");

    let pixs = bar_glyph(20, 30, 4).expect("bar glyph");
    let ink_area = (20 - 8) * (30 - 8);

    // --- Test 1: clean template, every ink pixel found ---
    let (mask, t) = threshold_otsu(&pixs).expect("otsu");
    rp.compare_values(0.0, t as f64, 0.0);
    rp.compare_values(1.0, mask.depth().bits() as f64, 0.0);
    rp.compare_values(ink_area as f64, ink_count(&mask) as f64, 0.0);

    // --- Test 2: blur moves the threshold but keeps the ink area close ---
    let blurred = gaussian_blur(&pixs, 1.5).expect("blur");
    let t2 = compute_otsu_threshold(&blurred).expect("otsu blurred");
    rp.check(t2 > 0 && t2 < 255, "blurred threshold strictly inside range");
    let mask2 = threshold_to_binary(&blurred, t2).expect("threshold");
    let diff = (ink_count(&mask2) as f64 - ink_area as f64).abs();
    rp.check(diff < ink_area as f64 * 0.25, "blurred ink area within 25%");

    // --- Test 3: dimensions preserved ---
    rp.compare_values(pixs.width() as f64, mask2.width() as f64, 0.0);
    rp.compare_values(pixs.height() as f64, mask2.height() as f64, 0.0);

    assert!(rp.cleanup());
}
