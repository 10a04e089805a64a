//! Glyph library
//!
//! A glyph library is a directory with one subdirectory per category:
//!
//! ```text
//! <root>/upper_case/A.png
//! <root>/lower_case/a.png
//! <root>/digits/7.png
//! <root>/special_characters/HASH.png
//! ```
//!
//! The character a file stands for is derived from its stem according to
//! its category. Punctuation is stored under a symbolic name because not
//! every such character may appear in a file name.

use crate::{SynthError, SynthResult};
use glyphline_core::{ImageFormat, Pix};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Symbolic file names of the supported punctuation characters
pub const SYMBOL_NAMES: &[(&str, char)] = &[
    ("EXCLAMATION", '!'),
    ("AT", '@'),
    ("HASH", '#'),
    ("DOLLAR", '$'),
    ("PERCENT", '%'),
    ("CARET", '^'),
    ("AMPERSAND", '&'),
    ("ASTERISK", '*'),
    ("PARENTHESIS_LEFT", '('),
    ("PARENTHESIS_RIGHT", ')'),
    ("HYPHEN", '-'),
    ("UNDERSCORE", '_'),
    ("PLUS", '+'),
    ("EQUALS", '='),
    ("COMMA", ','),
    ("DOT", '.'),
    ("QUESTION_MARK", '?'),
    ("SLASH", '/'),
];

/// Misspelled names found in existing glyph sets, accepted on load
const SYMBOL_ALIASES: &[(&str, char)] = &[("ASKTERISK", '*')];

/// Character for a symbolic name, case-insensitive.
pub fn symbol_for_name(name: &str) -> Option<char> {
    let upper = name.to_ascii_uppercase();
    SYMBOL_NAMES
        .iter()
        .chain(SYMBOL_ALIASES)
        .find(|(n, _)| *n == upper)
        .map(|&(_, c)| c)
}

/// Canonical symbolic name of a punctuation character.
pub fn name_for_symbol(ch: char) -> Option<&'static str> {
    SYMBOL_NAMES.iter().find(|&&(_, c)| c == ch).map(|&(n, _)| n)
}

/// Category of a glyph file, decided by the directory it sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphCategory {
    /// Upper-case letters; the stem is upper-cased
    Upper,
    /// Lower-case letters; the stem is lower-cased
    Lower,
    /// Digits; the stem is used verbatim
    Digit,
    /// Punctuation; the stem is a symbolic name
    Symbol,
}

impl GlyphCategory {
    /// All categories in load order
    pub const ALL: [Self; 4] = [Self::Upper, Self::Lower, Self::Digit, Self::Symbol];

    /// Directory name of this category under the library root
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Upper => "upper_case",
            Self::Lower => "lower_case",
            Self::Digit => "digits",
            Self::Symbol => "special_characters",
        }
    }

    /// Category for a directory name, case-insensitive
    pub fn from_dir_name(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::ALL.into_iter().find(|c| c.dir_name() == lower)
    }

    /// Character a file stem stands for in this category.
    ///
    /// Returns `None` when the stem does not name exactly one character.
    pub fn char_for_stem(self, stem: &str) -> Option<char> {
        let mapped: String = match self {
            Self::Upper => stem.to_uppercase(),
            Self::Lower => stem.to_lowercase(),
            Self::Digit => stem.to_string(),
            Self::Symbol => return symbol_for_name(stem),
        };
        let mut chars = mapped.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

/// A grayscale template for one character
#[derive(Debug, Clone)]
pub struct Glyph {
    ch: char,
    pix: Pix,
}

impl Glyph {
    /// Create a glyph, converting the image to 8 bpp gray.
    pub fn new(ch: char, pix: &Pix) -> SynthResult<Self> {
        Ok(Self {
            ch,
            pix: pix.convert_to_8()?,
        })
    }

    /// Character this glyph renders
    pub fn ch(&self) -> char {
        self.ch
    }

    /// Template image (8 bpp)
    pub fn pix(&self) -> &Pix {
        &self.pix
    }

    /// Template width in pixels
    pub fn width(&self) -> u32 {
        self.pix.width()
    }

    /// Template height in pixels
    pub fn height(&self) -> u32 {
        self.pix.height()
    }
}

/// Options for [`GlyphLibrary`] construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphLibraryOptions {
    /// Height of the synthesized space glyph
    pub line_height: u32,
    /// Width of the synthesized space glyph
    pub space_width: u32,
}

impl Default for GlyphLibraryOptions {
    fn default() -> Self {
        Self {
            line_height: 64,
            space_width: 20,
        }
    }
}

/// Immutable mapping from character to glyph.
///
/// Never empty, and always able to render a space.
#[derive(Debug, Clone)]
pub struct GlyphLibrary {
    glyphs: BTreeMap<char, Glyph>,
}

impl GlyphLibrary {
    /// Load every glyph under `root`.
    ///
    /// Files are visited in sorted order so that the outcome of duplicate
    /// definitions does not depend on the file system. Unknown symbolic
    /// names, files outside the category directories and undecodable
    /// images are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SynthError::EmptyLibrary`] if no glyph was loaded and
    /// [`SynthError::Io`] if `root` cannot be listed.
    pub fn load<P: AsRef<Path>>(root: P, options: &GlyphLibraryOptions) -> SynthResult<Self> {
        let root = root.as_ref();
        let mut glyphs: Vec<Glyph> = Vec::new();

        for entry in sorted_entries(root)? {
            let name = entry
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if !entry.is_dir() {
                warn!(path = %entry.display(), "file outside a glyph category directory, skipped");
                continue;
            }
            let Some(category) = GlyphCategory::from_dir_name(&name) else {
                warn!(dir = %name, "unknown glyph category directory, skipped");
                continue;
            };
            let before = glyphs.len();
            load_category(&entry, category, &mut glyphs)?;
            debug!(category = ?category, count = glyphs.len() - before, "loaded glyph category");
        }

        if glyphs.is_empty() {
            return Err(SynthError::EmptyLibrary {
                root: root.to_path_buf(),
            });
        }
        let library = Self::from_glyphs(glyphs, options)?;
        info!(root = %root.display(), glyphs = library.len(), "glyph library loaded");
        Ok(library)
    }

    /// Build a library from glyphs already in memory.
    ///
    /// A later glyph replaces an earlier one for the same character. A
    /// blank space glyph is added when none is given.
    pub fn from_glyphs<I>(glyphs: I, options: &GlyphLibraryOptions) -> SynthResult<Self>
    where
        I: IntoIterator<Item = Glyph>,
    {
        let mut map = BTreeMap::new();
        for glyph in glyphs {
            if map.contains_key(&glyph.ch) {
                warn!(ch = ?glyph.ch, "duplicate glyph, the later one wins");
            }
            map.insert(glyph.ch, glyph);
        }
        if map.is_empty() {
            return Err(SynthError::EmptyLibrary {
                root: PathBuf::new(),
            });
        }
        if !map.contains_key(&' ') {
            let blank = Pix::new_filled_gray(options.space_width, options.line_height, 255)?;
            map.insert(' ', Glyph { ch: ' ', pix: blank });
        }
        Ok(Self { glyphs: map })
    }

    /// Glyph for `ch`, if present
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&ch)
    }

    /// Glyph for `ch`, or [`SynthError::MissingGlyph`]
    pub fn require(&self, ch: char) -> SynthResult<&Glyph> {
        self.get(ch).ok_or(SynthError::MissingGlyph { ch })
    }

    /// Whether a glyph exists for `ch`
    pub fn contains(&self, ch: char) -> bool {
        self.glyphs.contains_key(&ch)
    }

    /// Number of glyphs, the space included
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false; an empty library cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Characters in the library, in code point order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.keys().copied()
    }
}

fn sorted_entries(dir: &Path) -> SynthResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|e| e.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    Ok(entries)
}

fn load_category(dir: &Path, category: GlyphCategory, out: &mut Vec<Glyph>) -> SynthResult<()> {
    for path in sorted_entries(dir)? {
        let is_image = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension)
            .is_some();
        if !path.is_file() || !is_image {
            debug!(path = %path.display(), "not a glyph image, skipped");
            continue;
        }
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let Some(ch) = category.char_for_stem(&stem) else {
            warn!(path = %path.display(), category = ?category, "unrecognized glyph name, skipped");
            continue;
        };
        let pix = match glyphline_io::read_image(&path) {
            Ok(pix) => pix,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable glyph image, skipped");
                continue;
            }
        };
        out.push(Glyph::new(ch, &pix)?);
    }
    Ok(())
}
