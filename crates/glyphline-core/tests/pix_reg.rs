//! Pix regression test
//!
//! Canvas assembly as the line compositor and the box preview use it:
//! pasting templates side by side, outlining boxes, depth conversion.

use glyphline_core::{Box, Boxa, Color, Pix, PixMut, PixelDepth};
use glyphline_test::{RegParams, bar_glyph};

#[test]
fn pix_reg() {
    let mut rp = RegParams::new("pix");
    let glyph = bar_glyph(10, 20, 2).unwrap();

    // --- Test 1: templates pasted left to right with a gap ---
    let mut canvas = PixMut::new(25, 20, PixelDepth::Bit8).unwrap();
    canvas.set_all(255);
    canvas.paste(&glyph, 0, 0).unwrap();
    canvas.paste(&glyph, 15, 0).unwrap();
    let line: Pix = canvas.into();
    rp.compare_values(0.0, line.get_pixel(2, 2).unwrap() as f64, 0.0);
    rp.compare_values(255.0, line.get_pixel(12, 10).unwrap() as f64, 0.0);
    rp.compare_values(0.0, line.get_pixel(17, 17).unwrap() as f64, 0.0);
    rp.compare_values(255.0, line.get_pixel(24, 10).unwrap() as f64, 0.0);

    // --- Test 2: pasting past the edge is clipped ---
    let mut small = PixMut::new(6, 6, PixelDepth::Bit8).unwrap();
    small.set_all(255);
    small.paste(&glyph, -4, -10).unwrap();
    let small: Pix = small.into();
    rp.compare_values(0.0, small.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(255.0, small.get_pixel(5, 0).unwrap() as f64, 0.0);
    let mut mismatch = PixMut::new(6, 6, PixelDepth::Bit32).unwrap();
    rp.check(mismatch.paste(&glyph, 0, 0).is_err(), "depth mismatch rejected");

    // --- Test 3: preview outlines drawn on an RGB copy ---
    let mut preview = line.convert_to_32().unwrap().to_mut();
    let mut boxa = Boxa::new();
    boxa.push(Box::new_unchecked(2, 2, 6, 16));
    boxa.push(Box::new_unchecked(17, 2, 6, 16));
    preview.render_boxa_color(&boxa, 1, Color::RED).unwrap();
    let preview: Pix = preview.into();
    let red = Color::RED.to_pixel32();
    rp.check(preview.get_pixel(2, 2) == Some(red), "first box corner");
    rp.check(preview.get_pixel(22, 17) == Some(red), "second box far corner");
    rp.check(preview.get_pixel(4, 8) != Some(red), "box interior untouched");

    // --- Test 4: gray survives a trip through RGB ---
    let back = line.convert_to_32().unwrap().convert_to_8().unwrap();
    rp.compare_pix(&line, &back);

    assert!(rp.cleanup());
}
