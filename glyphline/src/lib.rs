//! glyphline - Synthetic OCR training corpora
//!
//! Renders text lines from per-character glyph images, perturbs them,
//! derives per-character box annotations and drives an external OCR
//! engine to produce training feature files.
//!
//! This crate re-exports the workspace crates and adds the settings,
//! logging and pipeline layers used by the `glyphline` binary.
//!
//! # Example
//!
//! ```no_run
//! use glyphline::{pipeline, settings};
//!
//! let settings = settings::load_settings(None)?;
//! let report = pipeline::run(&settings)?;
//! println!("{}", report);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub use glyphline_core::*;

pub use glyphline_color as color;
pub use glyphline_filter as filter;
pub use glyphline_io as io;
pub use glyphline_region as region;
pub use glyphline_synth as synth;
pub use glyphline_train as train;
pub use glyphline_transform as transform;

pub mod logging;
pub mod pipeline;
pub mod settings;

pub use settings::{Settings, load_settings};
