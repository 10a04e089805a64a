//! Line composition regression test
//!
//! Loads a glyph directory from disk and checks the exact geometry of
//! composed lines.

use glyphline_synth::{ComposeOptions, GlyphLibrary, GlyphLibraryOptions, compose_line, line_width};
use glyphline_test::{GlyphDir, RegParams, lowercase_template_width};

#[test]
fn compose_reg() {
    let mut rp = RegParams::new("compose");

    let dir = GlyphDir::with_lowercase("ab", 32).unwrap();
    let lib = GlyphLibrary::load(dir.path(), &GlyphLibraryOptions::default()).unwrap();
    let opts = ComposeOptions {
        line_height: 64,
        spacing: 5,
    };

    // --- Test 1: library holds a, b and the synthesized space ---
    rp.compare_values(3.0, lib.len() as f64, 0.0);
    rp.check(lib.contains(' '), "space glyph present");

    // --- Test 2: "ab a" width is the sum of scaled glyphs plus spacing ---
    let line = compose_line("ab a", &lib, &opts).unwrap();
    let a = lowercase_template_width('a') * 2;
    let b = lowercase_template_width('b') * 2;
    let expected = a + b + 20 + a + 3 * 5;
    rp.compare_values(expected as f64, line.width() as f64, 0.0);
    rp.compare_values(64.0, line.height() as f64, 0.0);
    rp.compare_values(
        expected as f64,
        line_width("ab a", &lib, &opts).unwrap() as f64,
        0.0,
    );

    // --- Test 3: the space column and the gaps stay white ---
    let space_x = a + 5 + b + 5;
    for x in space_x..space_x + 20 {
        rp.compare_values(255.0, line.get_pixel(x, 32).unwrap() as f64, 0.0);
    }

    // --- Test 4: composition is deterministic ---
    let again = compose_line("ab a", &lib, &opts).unwrap();
    rp.compare_pix(&line, &again);

    // --- Test 5: an unknown character fails the line ---
    rp.check(compose_line("abc", &lib, &opts).is_err(), "missing glyph rejected");

    assert!(rp.cleanup());
}
