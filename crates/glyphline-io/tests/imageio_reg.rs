//! Image I/O regression test
//!
//! Line images go to disk as TIFF or PNG and glyph templates come back
//! in whatever PNG flavor they were saved with.

use glyphline_core::{ImageFormat, PixMut, PixelDepth, color};
use glyphline_io::{detect_format, read_image, write_image};
use glyphline_test::{RegParams, bar_glyph};

#[test]
fn imageio_reg() {
    let mut rp = RegParams::new("imageio");
    let dir = tempfile::tempdir().unwrap();
    let pixs = bar_glyph(17, 23, 3).unwrap();

    // --- Test 1: a line image survives both formats unchanged ---
    for (name, format) in [("line.tif", ImageFormat::Tiff), ("line.png", ImageFormat::Png)] {
        let path = dir.path().join(name);
        write_image(&pixs, &path, format).unwrap();
        rp.check(detect_format(&path).unwrap() == format, name);
        let back = read_image(&path).unwrap();
        rp.compare_pix(&pixs, &back);
    }

    // --- Test 2: format comes from the header, not the extension ---
    let misnamed = dir.path().join("glyph.tif");
    write_image(&pixs, &misnamed, ImageFormat::Png).unwrap();
    let back = read_image(&misnamed).unwrap();
    rp.check(back.informat() == ImageFormat::Png, "png detected by magic");
    rp.compare_pix(&pixs, &back);

    // --- Test 3: Unknown picks the format from the extension ---
    let by_ext = dir.path().join("line_0001.tiff");
    write_image(&pixs, &by_ext, ImageFormat::Unknown).unwrap();
    rp.check(detect_format(&by_ext).unwrap() == ImageFormat::Tiff, "tiff by extension");

    // --- Test 4: transparent template pixels read as paper ---
    let mut pm = PixMut::new(4, 4, PixelDepth::Bit32).unwrap();
    pm.set_spp(4);
    pm.set_all(color::compose_rgba(0, 0, 0, 0));
    pm.set_pixel(1, 1, color::compose_rgba(0, 0, 0, 255)).unwrap();
    let rgba = dir.path().join("symbol.png");
    write_image(&pm.into(), &rgba, ImageFormat::Png).unwrap();
    let gray = read_image(&rgba).unwrap().convert_to_8().unwrap();
    rp.compare_values(255.0, gray.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(0.0, gray.get_pixel(1, 1).unwrap() as f64, 0.0);

    assert!(rp.cleanup());
}
