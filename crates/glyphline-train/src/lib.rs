//! glyphline-train - Box annotations and training features
//!
//! Turns a generated corpus into files a trainable OCR engine consumes:
//!
//! - [`BoxAnnotation`]: the per-character box file model
//! - [`BoxAligner`]: ink-region detection, matching against ground truth,
//!   and validate-and-repair of existing box files
//! - [`TesseractEngine`]: a time-bounded client for the external engine
//! - [`make_initial_boxes`]: first-pass box files from the engine
//! - [`TrainingArtifactBuilder`]: training feature files for a corpus
//!
//! # Example
//!
//! ```no_run
//! use glyphline_synth::CorpusLayout;
//! use glyphline_train::{BuildOptions, EngineConfig, TesseractEngine, TrainingArtifactBuilder};
//!
//! let units = CorpusLayout::scan("corpus")?;
//! let engine = TesseractEngine::new(EngineConfig::default());
//! let builder = TrainingArtifactBuilder::new(&engine, BuildOptions::default())?;
//! println!("{}", builder.build(&units)?);
//! # Ok::<(), glyphline_train::TrainError>(())
//! ```

pub mod align;
pub mod boxfile;
pub mod builder;
pub mod engine;
mod error;
pub mod makebox;
mod pool;

pub use align::{AlignOptions, BoxAligner, RepairOutcome, RepairReport, merge_stacked, repair_units};
pub use boxfile::{BoxAnnotation, CharBox};
pub use builder::{BuildOptions, BuildReport, TrainingArtifactBuilder, UnitFailure, UnitOutcome};
pub use engine::{EngineConfig, EngineMode, EngineRequest, OcrEngine, TesseractEngine};
pub use error::{EngineError, TrainError, TrainResult};
pub use makebox::{MakeboxReport, make_initial_boxes};
