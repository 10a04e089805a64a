//! Corpus generation regression test
//!
//! Generates small corpora into temporary directories and checks the
//! persisted image and ground-truth pairs.

use glyphline_core::ImageFormat;
use glyphline_synth::{
    CorpusGenerator, CorpusLayout, GeneratorOptions, GlyphLibrary, GlyphLibraryOptions,
};
use glyphline_test::{GlyphDir, RegParams};
use std::fs;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

#[test]
fn corpus_reg() {
    let mut rp = RegParams::new("corpus");

    let glyphs = GlyphDir::with_lowercase("catdog", 32).unwrap();
    let lib = GlyphLibrary::load(glyphs.path(), &GlyphLibraryOptions::default()).unwrap();
    let list = words(&["cat", "dog"]);

    // --- Test 1: N=5 units, all ground truth drawn from the word list ---
    let out = tempfile::tempdir().unwrap();
    let opts = GeneratorOptions {
        count: 5,
        seed: Some(11),
        ..Default::default()
    };
    let report = CorpusGenerator::new(&lib, &list, opts.clone())
        .unwrap()
        .generate(out.path())
        .unwrap();
    rp.compare_values(5.0, report.requested as f64, 0.0);
    rp.compare_values(5.0, report.generated as f64, 0.0);
    rp.compare_values(0.0, report.skipped.total() as f64, 0.0);

    let gt_files = fs::read_dir(out.path())
        .unwrap()
        .filter(|e| {
            e.as_ref()
                .unwrap()
                .file_name()
                .to_string_lossy()
                .ends_with(".gt.txt")
        })
        .count();
    rp.compare_values(5.0, gt_files as f64, 0.0);

    let layout = CorpusLayout::new(out.path(), 5, ImageFormat::Tiff);
    for i in 0..5 {
        let unit = layout.unit(i);
        rp.check(unit.image().exists(), "line image written");
        let text = fs::read_to_string(unit.ground_truth()).unwrap();
        let parts: Vec<&str> = text.split(' ').collect();
        rp.check((3..=8).contains(&parts.len()), "3 to 8 words");
        rp.check(
            parts.iter().all(|w| *w == "cat" || *w == "dog"),
            "only listed words",
        );
        rp.check(!text.ends_with('\n'), "no trailing newline");
        let pix = glyphline_io::read_image(unit.image()).unwrap();
        rp.compare_values(64.0, pix.height() as f64, 0.0);
    }
    rp.compare_values(5.0, CorpusLayout::scan(out.path()).unwrap().len() as f64, 0.0);

    // --- Test 2: the same seed on a worker pool gives the same corpus ---
    let pooled = tempfile::tempdir().unwrap();
    let pooled_opts = GeneratorOptions {
        workers: 3,
        ..opts.clone()
    };
    CorpusGenerator::new(&lib, &list, pooled_opts)
        .unwrap()
        .generate(pooled.path())
        .unwrap();
    let pooled_layout = CorpusLayout::new(pooled.path(), 5, ImageFormat::Tiff);
    for i in 0..5 {
        let a = fs::read(layout.unit(i).ground_truth()).unwrap();
        let b = fs::read(pooled_layout.unit(i).ground_truth()).unwrap();
        rp.compare_strings(&a, &b);
        let a = fs::read(layout.unit(i).image()).unwrap();
        let b = fs::read(pooled_layout.unit(i).image()).unwrap();
        rp.compare_strings(&a, &b);
    }

    // --- Test 3: lines with a missing glyph are skipped and absent ---
    let partial = tempfile::tempdir().unwrap();
    let list = words(&["cat", "zebra"]);
    let opts = GeneratorOptions {
        count: 20,
        seed: Some(5),
        image_format: ImageFormat::Png,
        ..Default::default()
    };
    let report = CorpusGenerator::new(&lib, &list, opts)
        .unwrap()
        .generate(partial.path())
        .unwrap();
    rp.compare_values(
        20.0,
        (report.generated + report.skipped.total()) as f64,
        0.0,
    );
    rp.compare_values(
        report.skipped.total() as f64,
        report.skipped.get("missing-glyph") as f64,
        0.0,
    );
    let units = CorpusLayout::scan(partial.path()).unwrap();
    rp.compare_values(report.generated as f64, units.len() as f64, 0.0);
    for unit in &units {
        let text = unit.read_ground_truth().unwrap();
        rp.check(!text.contains("zebra"), "skipped text not persisted");
    }

    assert!(rp.cleanup());
}
