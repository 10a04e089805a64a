//! End-to-end pipeline stages driven by [`Settings`]
//!
//! Each stage can run on its own against an existing corpus directory, or
//! all of them in sequence through [`run`].

use crate::settings::Settings;
use anyhow::{Context, Result, bail};
use glyphline_synth::{
    CorpusGenerator, CorpusLayout, CorpusReport, GlyphLibrary, UnitPaths, load_word_list,
};
use glyphline_train::{
    BoxAligner, BuildReport, MakeboxReport, RepairReport, TesseractEngine,
    TrainingArtifactBuilder, make_initial_boxes, repair_units,
};
use std::fmt;

/// Reports of a full pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Corpus generation
    pub corpus: CorpusReport,
    /// First-pass box files from the engine
    pub makebox: MakeboxReport,
    /// Box repair and training features
    pub build: BuildReport,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.corpus)?;
        writeln!(f, "{}", self.makebox)?;
        write!(f, "{}", self.build)
    }
}

/// Render the corpus described by `settings`.
pub fn generate(settings: &Settings) -> Result<CorpusReport> {
    let library = GlyphLibrary::load(&settings.glyph_root, &settings.glyphs).with_context(|| {
        format!(
            "failed to load glyph library: {}",
            settings.glyph_root.display()
        )
    })?;
    let words = load_word_list(&settings.word_list).with_context(|| {
        format!("failed to read word list: {}", settings.word_list.display())
    })?;
    let generator = CorpusGenerator::new(&library, &words, settings.generator.clone())?;
    let report = generator
        .generate(&settings.corpus_dir)
        .with_context(|| format!("failed to generate corpus: {}", settings.corpus_dir.display()))?;
    Ok(report)
}

/// Units currently present in the corpus directory.
pub fn corpus_units(settings: &Settings) -> Result<Vec<UnitPaths>> {
    let units = CorpusLayout::scan(&settings.corpus_dir)
        .with_context(|| format!("failed to scan corpus: {}", settings.corpus_dir.display()))?;
    if units.is_empty() {
        bail!(
            "no line images found in {}",
            settings.corpus_dir.display()
        );
    }
    Ok(units)
}

/// Ask the engine for an initial box file of every unit.
pub fn makebox(settings: &Settings) -> Result<MakeboxReport> {
    let units = corpus_units(settings)?;
    let engine = TesseractEngine::new(settings.engine.clone());
    Ok(make_initial_boxes(&engine, &units, settings.build.workers)?)
}

/// Validate every box file and regenerate the broken ones.
pub fn repair(settings: &Settings) -> Result<RepairReport> {
    let units = corpus_units(settings)?;
    let aligner = BoxAligner::new(settings.build.align);
    Ok(repair_units(&aligner, &units, settings.build.workers)?)
}

/// Produce the training feature file of every unit.
pub fn build(settings: &Settings) -> Result<BuildReport> {
    let units = corpus_units(settings)?;
    let engine = TesseractEngine::new(settings.engine.clone());
    let builder = TrainingArtifactBuilder::new(&engine, settings.build.clone())?;
    Ok(builder.build(&units)?)
}

/// Generate, box and build in sequence.
pub fn run(settings: &Settings) -> Result<RunReport> {
    let corpus = generate(settings)?;
    let makebox = makebox(settings)?;
    let build = build(settings)?;
    Ok(RunReport {
        corpus,
        makebox,
        build,
    })
}
