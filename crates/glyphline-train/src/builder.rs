//! Training feature generation
//!
//! For each corpus unit the builder checks the ground truth, optionally
//! validates and repairs the box file, then asks the engine for the
//! training feature file. Failures stay with their unit and are counted.

use crate::pool::map_ordered;
use crate::{
    AlignOptions, BoxAligner, EngineError, EngineMode, EngineRequest, OcrEngine, TrainError,
    TrainResult,
};
use glyphline_synth::{Tally, UnitPaths};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Options for [`TrainingArtifactBuilder`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Worker threads; 1 runs on the calling thread
    pub workers: usize,
    /// Validate and repair box files before calling the engine
    pub repair: bool,
    /// Trained model copied into `stage_dir` at the end of a run
    pub base_model: Option<PathBuf>,
    /// Directory receiving the base model copy
    pub stage_dir: PathBuf,
    /// Box alignment used for repairs
    pub align: AlignOptions,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            workers: 1,
            repair: true,
            base_model: None,
            stage_dir: PathBuf::from("."),
            align: AlignOptions::default(),
        }
    }
}

/// Why a unit produced no feature file
#[derive(Debug)]
pub enum UnitFailure {
    /// The ground-truth file is missing or unreadable
    MissingGroundTruth(PathBuf),
    /// The box file was invalid and could not be regenerated
    AlignmentMismatch {
        /// Detected ink regions
        regions: usize,
        /// Characters that need a region
        expected: usize,
    },
    /// Repairing the box file failed for another reason
    Repair(TrainError),
    /// The engine call failed
    Engine(EngineError),
}

impl UnitFailure {
    /// Stable label used in report tallies
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingGroundTruth(_) => "missing-ground-truth",
            Self::AlignmentMismatch { .. } => "alignment-mismatch",
            Self::Repair(_) => "repair-failed",
            Self::Engine(e) => e.kind(),
        }
    }
}

impl fmt::Display for UnitFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingGroundTruth(path) => {
                write!(f, "ground truth {} not readable", path.display())
            }
            Self::AlignmentMismatch { regions, expected } => write!(
                f,
                "alignment mismatch: {} regions for {} characters",
                regions, expected
            ),
            Self::Repair(e) => write!(f, "box repair failed: {}", e),
            Self::Engine(e) => write!(f, "{}", e),
        }
    }
}

impl From<TrainError> for UnitFailure {
    fn from(e: TrainError) -> Self {
        match e {
            TrainError::AlignmentMismatch { regions, expected } => {
                Self::AlignmentMismatch { regions, expected }
            }
            other => Self::Repair(other),
        }
    }
}

/// Outcome of [`TrainingArtifactBuilder::build`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Units considered
    pub attempted: usize,
    /// Box files regenerated
    pub repaired: usize,
    /// Feature files produced
    pub succeeded: usize,
    /// Units without a feature file, by reason
    pub skipped: Tally,
    /// Where the base model was copied, if it was
    pub staged_model: Option<PathBuf>,
}

impl fmt::Display for BuildReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "training features:")?;
        writeln!(f, "  attempted: {}", self.attempted)?;
        writeln!(f, "  repaired:  {}", self.repaired)?;
        writeln!(f, "  succeeded: {}", self.succeeded)?;
        write!(f, "  skipped:   {}", self.skipped)?;
        if let Some(path) = &self.staged_model {
            write!(f, "\n  base model staged at {}", path.display())?;
        }
        Ok(())
    }
}

/// Outcome of one unit
#[derive(Debug)]
pub struct UnitOutcome {
    /// Whether the box file was regenerated
    pub repaired: bool,
    /// Whether a feature file was produced
    pub result: Result<(), UnitFailure>,
}

/// Produces training feature files for a corpus
pub struct TrainingArtifactBuilder<'a> {
    engine: &'a dyn OcrEngine,
    aligner: BoxAligner,
    options: BuildOptions,
}

impl<'a> TrainingArtifactBuilder<'a> {
    /// Create a builder calling `engine`.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError::InvalidParameters`] for zero workers.
    pub fn new(engine: &'a dyn OcrEngine, options: BuildOptions) -> TrainResult<Self> {
        if options.workers == 0 {
            return Err(TrainError::InvalidParameters(
                "at least one worker is required".to_string(),
            ));
        }
        Ok(Self {
            engine,
            aligner: BoxAligner::new(options.align),
            options,
        })
    }

    /// Options in use
    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Process one unit end to end.
    pub fn build_unit(&self, unit: &UnitPaths) -> UnitOutcome {
        let text = match unit.read_ground_truth() {
            Ok(text) => text,
            Err(_) => {
                return UnitOutcome {
                    repaired: false,
                    result: Err(UnitFailure::MissingGroundTruth(unit.ground_truth())),
                };
            }
        };

        let mut repaired = false;
        if self.options.repair {
            match self.aligner.validate_and_repair(unit, &text) {
                Ok(outcome) => repaired = outcome.is_repaired(),
                Err(e) => {
                    return UnitOutcome {
                        repaired,
                        result: Err(e.into()),
                    };
                }
            }
        }

        let result = self
            .engine
            .run(&EngineRequest::new(
                unit.image(),
                unit.output_base(),
                EngineMode::LstmTrain,
            ))
            .map_err(UnitFailure::Engine);
        UnitOutcome { repaired, result }
    }

    /// Process every unit, then stage the base model.
    ///
    /// Unit failures are counted in the report. A base model that cannot
    /// be copied is logged and left out of the report.
    pub fn build(&self, units: &[UnitPaths]) -> TrainResult<BuildReport> {
        info!(
            units = units.len(),
            repair = self.options.repair,
            "generating training features"
        );
        let results = map_ordered(self.options.workers, units, |unit| self.build_unit(unit))?;

        let mut report = BuildReport {
            attempted: units.len(),
            ..Default::default()
        };
        for (unit, outcome) in units.iter().zip(&results) {
            if outcome.repaired {
                report.repaired += 1;
                warn!(unit = unit.base_name(), "box file regenerated");
            }
            match &outcome.result {
                Ok(()) => {
                    report.succeeded += 1;
                    debug!(unit = unit.base_name(), "training features generated");
                }
                Err(failure) => {
                    report.skipped.add(failure.kind());
                    warn!(unit = unit.base_name(), reason = %failure, "unit skipped");
                }
            }
        }

        report.staged_model = match self.stage_base_model() {
            Ok(staged) => staged,
            Err(e) => {
                warn!(error = %e, "could not stage base model");
                None
            }
        };
        info!(
            succeeded = report.succeeded,
            repaired = report.repaired,
            skipped = report.skipped.total(),
            "training feature generation complete"
        );
        Ok(report)
    }

    /// Copy the base model into the staging directory.
    ///
    /// Returns the copy's path, or `None` when no base model is set.
    pub fn stage_base_model(&self) -> TrainResult<Option<PathBuf>> {
        let Some(model) = &self.options.base_model else {
            return Ok(None);
        };
        let Some(name) = model.file_name() else {
            return Err(TrainError::InvalidParameters(format!(
                "base model path {} has no file name",
                model.display()
            )));
        };
        fs::create_dir_all(&self.options.stage_dir)?;
        let target = self.options.stage_dir.join(name);
        fs::copy(model, &target)?;
        info!(model = %model.display(), target = %target.display(), "base model staged");
        Ok(Some(target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphline_core::ImageFormat;
    use glyphline_synth::CorpusLayout;
    use std::sync::Mutex;

    /// Records requests and fails on chosen images
    struct MockEngine {
        calls: Mutex<Vec<EngineRequest>>,
        fail_on: Option<PathBuf>,
    }

    impl OcrEngine for MockEngine {
        fn run(&self, request: &EngineRequest) -> Result<(), EngineError> {
            self.calls.lock().unwrap().push(request.clone());
            if self.fail_on.as_deref() == Some(request.image.as_path()) {
                return Err(EngineError::Failed {
                    code: Some(1),
                    stderr: "boom".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn test_plain_mode_checks_ground_truth_only() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CorpusLayout::new(dir.path(), 3, ImageFormat::Tiff);
        let units: Vec<UnitPaths> = (0..3).map(|i| layout.unit(i)).collect();
        fs::write(units[0].ground_truth(), "cat").unwrap();
        fs::write(units[2].ground_truth(), "dog").unwrap();

        let engine = MockEngine {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(units[2].image().to_path_buf()),
        };
        let options = BuildOptions {
            repair: false,
            ..Default::default()
        };
        let builder = TrainingArtifactBuilder::new(&engine, options).unwrap();
        let report = builder.build(&units).unwrap();

        assert_eq!(report.attempted, 3);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.repaired, 0);
        assert_eq!(report.skipped.get("missing-ground-truth"), 1);
        assert_eq!(report.skipped.get("engine-exit"), 1);
        assert_eq!(report.staged_model, None);

        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].mode, EngineMode::LstmTrain);
        assert_eq!(calls[0].output_base, units[0].output_base());
    }

    #[test]
    fn test_alignment_mismatch_skips_engine() {
        use glyphline_synth::{ComposeOptions, Glyph, GlyphLibrary, GlyphLibraryOptions};
        use glyphline_test::full_ink_glyph;

        let solid = GlyphLibrary::from_glyphs(
            [
                Glyph::new('m', &full_ink_glyph(10, 32).unwrap()).unwrap(),
                Glyph::new('n', &full_ink_glyph(12, 32).unwrap()).unwrap(),
            ],
            &GlyphLibraryOptions::default(),
        )
        .unwrap();
        let compose = ComposeOptions {
            line_height: 64,
            spacing: 0,
        };
        let fused = glyphline_synth::compose_line("mn", &solid, &compose).unwrap();
        let fused = glyphline_transform::embed_centered(&fused, 60, 80, 255).unwrap();
        let apart = glyphline_synth::compose_line(
            "mn",
            &solid,
            &ComposeOptions {
                spacing: 8,
                ..compose
            },
        )
        .unwrap();
        let apart = glyphline_transform::embed_centered(&apart, 80, 80, 255).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let layout = CorpusLayout::new(dir.path(), 2, ImageFormat::Tiff);
        let units: Vec<UnitPaths> = (0..2).map(|i| layout.unit(i)).collect();
        for (unit, pix) in units.iter().zip([&fused, &apart]) {
            glyphline_io::write_image(pix, unit.image(), ImageFormat::Tiff).unwrap();
            fs::write(unit.ground_truth(), "mn").unwrap();
        }
        let stale = b"x 0 0 1 1 0\n";
        fs::write(units[0].box_file(), stale).unwrap();

        let engine = MockEngine {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        };
        let builder = TrainingArtifactBuilder::new(&engine, BuildOptions::default()).unwrap();
        let report = builder.build(&units).unwrap();

        assert_eq!(report.skipped.get("alignment-mismatch"), 1);
        assert_eq!(report.repaired, 1);
        assert_eq!(report.succeeded, 1);
        let calls = engine.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].image, units[1].image());
        assert_eq!(fs::read(units[0].box_file()).unwrap(), stale);
        assert!(!units[0].preview().exists());
    }

    #[test]
    fn test_stage_base_model() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("myarial.traineddata");
        fs::write(&model, b"model").unwrap();
        let stage = dir.path().join("stage");
        let engine = MockEngine {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        };
        let builder = TrainingArtifactBuilder::new(
            &engine,
            BuildOptions {
                base_model: Some(model),
                stage_dir: stage.clone(),
                ..Default::default()
            },
        )
        .unwrap();
        let report = builder.build(&[]).unwrap();
        let staged = stage.join("myarial.traineddata");
        assert_eq!(report.staged_model.as_deref(), Some(staged.as_path()));
        assert_eq!(fs::read(staged).unwrap(), b"model");
    }

    #[test]
    fn test_zero_workers_rejected() {
        let engine = MockEngine {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        };
        let options = BuildOptions {
            workers: 0,
            ..Default::default()
        };
        assert!(TrainingArtifactBuilder::new(&engine, options).is_err());
    }
}
