//! Corpus generation
//!
//! Draws random word sequences, renders and perturbs them and writes each
//! unit as an image plus ground-truth pair. Units are independent: a unit
//! that cannot be produced is skipped and counted, never fatal.
//!
//! Every unit draws from its own generator seeded from the run seed and
//! the unit index, so a given seed yields the same corpus for any number
//! of workers.

use crate::{
    AugmentOptions, AugmentRecord, ComposeOptions, CorpusLayout, GlyphLibrary, SynthError,
    SynthResult, Tally, augment, compose_line,
};
use glyphline_core::{ImageFormat, Pix};
use rand::{Rng, RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Load a word list, one or more words per line separated by whitespace.
pub fn load_word_list<P: AsRef<Path>>(path: P) -> SynthResult<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text.split_whitespace().map(str::to_string).collect())
}

/// Options for [`CorpusGenerator`]
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorOptions {
    /// Number of units to attempt
    pub count: usize,
    /// Fewest words per line
    pub min_words: usize,
    /// Most words per line
    pub max_words: usize,
    /// Run seed; drawn at random when `None`
    pub seed: Option<u64>,
    /// Worker threads; 1 runs on the calling thread
    pub workers: usize,
    /// Log progress after this many units; 0 disables
    pub progress_every: usize,
    /// Format of the line images
    pub image_format: ImageFormat,
    /// Line rendering
    pub compose: ComposeOptions,
    /// Line perturbation
    pub augment: AugmentOptions,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            count: 1000,
            min_words: 3,
            max_words: 8,
            seed: None,
            workers: 1,
            progress_every: 100,
            image_format: ImageFormat::Tiff,
            compose: ComposeOptions::default(),
            augment: AugmentOptions::default(),
        }
    }
}

/// One generated training sample
#[derive(Debug, Clone)]
pub struct LineUnit {
    /// Sequence index
    pub index: usize,
    /// Ground-truth text
    pub text: String,
    /// Rendered, perturbed line
    pub pix: Pix,
    /// Perturbations applied to the line
    pub augment: AugmentRecord,
}

/// What is kept of a unit once it is on disk
#[derive(Debug, Clone)]
struct WrittenUnit {
    text: String,
    width: u32,
    augment: AugmentRecord,
}

/// Why a unit was not written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The text uses a character with no glyph
    MissingGlyph {
        /// The missing character
        ch: char,
    },
    /// Rendering or perturbing the line failed
    Render(String),
    /// Writing the image or ground truth failed
    Write(String),
}

impl SkipReason {
    /// Stable label used in report tallies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingGlyph { .. } => "missing-glyph",
            Self::Render(_) => "render-failed",
            Self::Write(_) => "write-failed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGlyph { ch } => write!(f, "character {:?} not found in glyph library", ch),
            Self::Render(msg) => write!(f, "render failed: {}", msg),
            Self::Write(msg) => write!(f, "write failed: {}", msg),
        }
    }
}

impl From<SynthError> for SkipReason {
    fn from(e: SynthError) -> Self {
        match e {
            SynthError::MissingGlyph { ch } => Self::MissingGlyph { ch },
            other => Self::Render(other.to_string()),
        }
    }
}

/// Outcome of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusReport {
    /// Corpus directory
    pub dir: PathBuf,
    /// Run seed actually used
    pub seed: u64,
    /// Units attempted
    pub requested: usize,
    /// Units written
    pub generated: usize,
    /// Units skipped, by reason
    pub skipped: Tally,
}

impl fmt::Display for CorpusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "corpus: {}", self.dir.display())?;
        writeln!(f, "  seed:      {}", self.seed)?;
        writeln!(f, "  requested: {}", self.requested)?;
        writeln!(f, "  generated: {}", self.generated)?;
        write!(f, "  skipped:   {}", self.skipped)
    }
}

/// Seed of unit `index` in a run seeded with `seed`
fn unit_seed(seed: u64, index: usize) -> u64 {
    seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Drives line generation over a glyph library and a word list
#[derive(Debug)]
pub struct CorpusGenerator<'a> {
    library: &'a GlyphLibrary,
    words: &'a [String],
    options: GeneratorOptions,
}

impl<'a> CorpusGenerator<'a> {
    /// Create a generator.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::InvalidParameters`] for an empty word list, an
    /// empty word-count range, zero workers or bad augmentation options.
    pub fn new(
        library: &'a GlyphLibrary,
        words: &'a [String],
        options: GeneratorOptions,
    ) -> SynthResult<Self> {
        if words.is_empty() {
            return Err(SynthError::InvalidParameters(
                "word list is empty".to_string(),
            ));
        }
        if options.min_words == 0 || options.min_words > options.max_words {
            return Err(SynthError::InvalidParameters(format!(
                "words per line {}..={} is empty",
                options.min_words, options.max_words
            )));
        }
        if options.workers == 0 {
            return Err(SynthError::InvalidParameters(
                "at least one worker is required".to_string(),
            ));
        }
        options.augment.validate()?;
        Ok(Self {
            library,
            words,
            options,
        })
    }

    /// Options in use
    pub fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Draw the ground truth of one line.
    pub fn sample_text<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let k = rng.random_range(self.options.min_words..=self.options.max_words);
        (0..k)
            .map(|_| self.words[rng.random_range(0..self.words.len())].as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Produce unit `index` of a run seeded with `seed`, without writing it.
    pub fn generate_unit(&self, index: usize, seed: u64) -> Result<LineUnit, SkipReason> {
        let mut rng = ChaCha8Rng::seed_from_u64(unit_seed(seed, index));
        let text = self.sample_text(&mut rng);
        let line = compose_line(&text, self.library, &self.options.compose)?;
        let (pix, record) = augment(&line, &self.options.augment, &mut rng)?;
        Ok(LineUnit {
            index,
            text,
            pix,
            augment: record,
        })
    }

    fn write_unit(&self, unit: &LineUnit, layout: &CorpusLayout) -> Result<(), SkipReason> {
        let paths = layout.unit(unit.index);
        glyphline_io::write_image(&unit.pix, paths.image(), layout.image_format())
            .map_err(|e| SkipReason::Write(e.to_string()))?;
        if let Err(e) = fs::write(paths.ground_truth(), &unit.text) {
            // An image without its ground truth is not a unit
            let _ = fs::remove_file(paths.image());
            return Err(SkipReason::Write(e.to_string()));
        }
        Ok(())
    }

    fn run_unit(
        &self,
        index: usize,
        seed: u64,
        layout: &CorpusLayout,
    ) -> Result<WrittenUnit, SkipReason> {
        let unit = self.generate_unit(index, seed)?;
        self.write_unit(&unit, layout)?;
        Ok(WrittenUnit {
            text: unit.text,
            width: unit.pix.width(),
            augment: unit.augment,
        })
    }

    fn record(
        &self,
        report: &mut CorpusReport,
        layout: &CorpusLayout,
        index: usize,
        result: Result<WrittenUnit, SkipReason>,
    ) {
        let base = layout.base_name(index);
        match result {
            Ok(unit) => {
                report.generated += 1;
                debug!(unit = %base, text = %unit.text, width = unit.width, augment = ?unit.augment, "line written");
            }
            Err(reason) => {
                report.skipped.add(reason.kind());
                warn!(unit = %base, %reason, "line skipped");
            }
        }
        let every = self.options.progress_every;
        if every > 0 && (index + 1) % every == 0 {
            info!("processed {} of {} lines", index + 1, report.requested);
        }
    }

    /// Generate the corpus into `dir`.
    ///
    /// With one worker each unit is logged as soon as it is written. A
    /// pool keeps only a summary per unit and logs them in index order
    /// once every unit is done.
    ///
    /// # Errors
    ///
    /// Only run-level failures are errors: the directory cannot be created
    /// or the worker pool cannot be started. Unit failures are tallied in
    /// the report.
    pub fn generate<P: AsRef<Path>>(&self, dir: P) -> SynthResult<CorpusReport> {
        let layout = CorpusLayout::new(dir, self.options.count, self.options.image_format);
        fs::create_dir_all(layout.dir())?;
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        info!(
            dir = %layout.dir().display(),
            count = self.options.count,
            seed,
            workers = self.options.workers,
            "generating corpus"
        );

        let count = self.options.count;
        let mut report = CorpusReport {
            dir: layout.dir().to_path_buf(),
            seed,
            requested: count,
            generated: 0,
            skipped: Tally::new(),
        };
        if self.options.workers > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.options.workers)
                .build()?;
            let results: Vec<Result<WrittenUnit, SkipReason>> = pool.install(|| {
                (0..count)
                    .into_par_iter()
                    .map(|i| self.run_unit(i, seed, &layout))
                    .collect()
            });
            for (index, result) in results.into_iter().enumerate() {
                self.record(&mut report, &layout, index, result);
            }
        } else {
            for index in 0..count {
                let result = self.run_unit(index, seed, &layout);
                self.record(&mut report, &layout, index, result);
            }
        }
        info!(
            generated = report.generated,
            skipped = report.skipped.total(),
            "corpus generation complete"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Glyph, GlyphLibraryOptions};
    use glyphline_test::bar_glyph;

    fn library(chars: &str) -> GlyphLibrary {
        GlyphLibrary::from_glyphs(
            chars
                .chars()
                .map(|c| Glyph::new(c, &bar_glyph(12, 24, 2).unwrap()).unwrap()),
            &GlyphLibraryOptions::default(),
        )
        .unwrap()
    }

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_rejects_bad_options() {
        let lib = library("ab");
        let empty: Vec<String> = Vec::new();
        assert!(CorpusGenerator::new(&lib, &empty, GeneratorOptions::default()).is_err());
        let w = words(&["ab"]);
        let opts = GeneratorOptions {
            min_words: 5,
            max_words: 4,
            ..Default::default()
        };
        assert!(CorpusGenerator::new(&lib, &w, opts).is_err());
        let opts = GeneratorOptions {
            workers: 0,
            ..Default::default()
        };
        assert!(CorpusGenerator::new(&lib, &w, opts).is_err());
    }

    #[test]
    fn test_sample_text_word_counts() {
        let lib = library("catdog");
        let w = words(&["cat", "dog"]);
        let generator = CorpusGenerator::new(&lib, &w, GeneratorOptions::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let text = generator.sample_text(&mut rng);
            let parts: Vec<&str> = text.split(' ').collect();
            assert!((3..=8).contains(&parts.len()));
            assert!(parts.iter().all(|p| *p == "cat" || *p == "dog"));
        }
    }

    #[test]
    fn test_unit_is_deterministic() {
        let lib = library("ab");
        let w = words(&["ab", "ba", "a"]);
        let generator = CorpusGenerator::new(&lib, &w, GeneratorOptions::default()).unwrap();
        let a = generator.generate_unit(3, 77).unwrap();
        let b = generator.generate_unit(3, 77).unwrap();
        assert_eq!(a.text, b.text);
        assert!(a.pix.equals(&b.pix));
    }

    #[test]
    fn test_missing_glyph_becomes_skip() {
        let lib = library("ab");
        let w = words(&["abc"]);
        let generator = CorpusGenerator::new(&lib, &w, GeneratorOptions::default()).unwrap();
        let reason = generator.generate_unit(0, 1).unwrap_err();
        assert_eq!(reason, SkipReason::MissingGlyph { ch: 'c' });
        assert_eq!(reason.kind(), "missing-glyph");
    }

    #[test]
    fn test_failed_ground_truth_removes_image() {
        let lib = library("ab");
        let w = words(&["ab", "ba"]);
        let opts = GeneratorOptions {
            count: 2,
            seed: Some(4),
            augment: AugmentOptions::none(),
            ..Default::default()
        };
        let generator = CorpusGenerator::new(&lib, &w, opts).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let layout = CorpusLayout::new(dir.path(), 2, ImageFormat::Tiff);
        // A directory where the ground truth should go makes the write fail
        fs::create_dir_all(layout.unit(0).ground_truth()).unwrap();

        let report = generator.generate(dir.path()).unwrap();
        assert_eq!(report.generated, 1);
        assert_eq!(report.skipped.get("write-failed"), 1);
        assert!(!layout.unit(0).image().exists());
        assert!(layout.unit(1).image().exists());
        assert!(layout.unit(1).ground_truth().is_file());
    }

    #[test]
    fn test_pool_and_single_worker_reports_agree() {
        let lib = library("ab");
        let w = words(&["ab", "ba", "abc"]);
        let opts = GeneratorOptions {
            count: 12,
            seed: Some(21),
            progress_every: 5,
            augment: AugmentOptions::none(),
            ..Default::default()
        };
        let single = tempfile::tempdir().unwrap();
        let a = CorpusGenerator::new(&lib, &w, opts.clone())
            .unwrap()
            .generate(single.path())
            .unwrap();
        let pooled = tempfile::tempdir().unwrap();
        let b = CorpusGenerator::new(&lib, &w, GeneratorOptions { workers: 3, ..opts })
            .unwrap()
            .generate(pooled.path())
            .unwrap();
        assert_eq!(a.requested, 12);
        assert_eq!((a.generated, &a.skipped), (b.generated, &b.skipped));
        assert_eq!(a.generated + a.skipped.total(), 12);
    }

    #[test]
    fn test_load_word_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "cat dog\n\nbird  fish\n").unwrap();
        assert_eq!(load_word_list(&path).unwrap(), ["cat", "dog", "bird", "fish"]);
    }
}
