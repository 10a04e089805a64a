//! glyphline-synth - Synthetic text line generation
//!
//! This crate turns a directory of single-character templates into a
//! corpus of rendered text lines:
//!
//! - [`GlyphLibrary`]: categorized glyph templates keyed by character
//! - [`compose_line`]: one line image from a string
//! - [`augment`]: random rotation, rescaling and blur of a line
//! - [`CorpusGenerator`]: batches of image plus ground-truth pairs laid out
//!   by [`CorpusLayout`]
//!
//! # Example
//!
//! ```no_run
//! use glyphline_synth::{CorpusGenerator, GeneratorOptions, GlyphLibrary, GlyphLibraryOptions};
//!
//! let library = GlyphLibrary::load("fonts/arial", &GlyphLibraryOptions::default())?;
//! let words = glyphline_synth::load_word_list("words.txt")?;
//! let options = GeneratorOptions { count: 100, seed: Some(7), ..Default::default() };
//! let report = CorpusGenerator::new(&library, &words, options)?.generate("corpus")?;
//! println!("{}", report);
//! # Ok::<(), glyphline_synth::SynthError>(())
//! ```

pub mod augment;
pub mod compose;
pub mod corpus;
mod error;
pub mod glyphs;
pub mod layout;
mod tally;

pub use augment::{AugmentOptions, AugmentRecord, augment};
pub use compose::{ComposeOptions, compose_line, line_width};
pub use corpus::{
    CorpusGenerator, CorpusReport, GeneratorOptions, LineUnit, SkipReason, load_word_list,
};
pub use error::{SynthError, SynthResult};
pub use glyphs::{
    Glyph, GlyphCategory, GlyphLibrary, GlyphLibraryOptions, SYMBOL_NAMES, name_for_symbol,
    symbol_for_name,
};
pub use layout::{CorpusLayout, PREVIEW_DIR, UnitPaths};
pub use tally::Tally;
