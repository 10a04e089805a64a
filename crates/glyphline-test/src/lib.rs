//! glyphline-test - Regression test helpers for the glyphline crates
//!
//! Provides [`RegParams`], a small check recorder used by the `*_reg.rs`
//! integration tests, and glyph fixtures that write template images into
//! a temporary glyph library directory.
//!
//! # Usage
//!
//! ```ignore
//! use glyphline_test::{GlyphDir, RegParams};
//!
//! let glyphs = GlyphDir::with_lowercase("cat", 32).unwrap();
//! let mut rp = RegParams::new("compose");
//! rp.compare_values(3.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::RegParams;

use glyphline_core::{Box, ImageFormat, Pix, PixMut, PixelDepth};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Directory names of the four glyph categories
pub const UPPER_DIR: &str = "upper_case";
pub const LOWER_DIR: &str = "lower_case";
pub const DIGIT_DIR: &str = "digits";
pub const SYMBOL_DIR: &str = "special_characters";

/// White 8-bit template with one black rectangle inset from every edge.
///
/// The ink forms a single connected component.
pub fn bar_glyph(width: u32, height: u32, inset: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    pm.set_all(255);
    let ink = Box::new(
        inset as i32,
        inset as i32,
        width as i32 - 2 * inset as i32,
        height as i32 - 2 * inset as i32,
    )?;
    pm.fill_rect(&ink, 0);
    Ok(pm.into())
}

/// Template whose ink covers every pixel.
///
/// Two of these placed side by side with no spacing fuse into one
/// component.
pub fn full_ink_glyph(width: u32, height: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
    pm.set_all(0);
    Ok(pm.into())
}

/// Square ring with a separate dot inside its hole.
///
/// The dot is nested inside the ring and is not an outer component.
pub fn ring_with_dot_glyph(size: u32) -> TestResult<Pix> {
    let mut pm = PixMut::new(size, size, PixelDepth::Bit8)?;
    pm.set_all(255);
    let s = size as i32;
    let outer = Box::new(2, 2, s - 4, s - 4)?;
    let hole = Box::new(6, 6, s - 12, s - 12)?;
    let dot = Box::new(s / 2 - 1, s / 2 - 1, 3, 3)?;
    pm.fill_rect(&outer, 0);
    pm.fill_rect(&hole, 255);
    pm.fill_rect(&dot, 0);
    Ok(pm.into())
}

/// A glyph library laid out in a temporary directory.
///
/// The directory is removed when the value is dropped.
pub struct GlyphDir {
    dir: TempDir,
}

impl GlyphDir {
    /// Create an empty library root
    pub fn new() -> TestResult<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Library root containing the category directories
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `pix` as `<category>/<name>.png` and return the file path
    pub fn add(&self, category: &str, name: &str, pix: &Pix) -> TestResult<PathBuf> {
        let cat_dir = self.dir.path().join(category);
        fs::create_dir_all(&cat_dir)?;
        let path = cat_dir.join(format!("{}.png", name));
        glyphline_io::write_image(pix, &path, ImageFormat::Png).map_err(|e| {
            TestError::ImageWrite {
                path: path.display().to_string(),
                message: e.to_string(),
            }
        })?;
        Ok(path)
    }

    /// Write raw bytes as a file inside the library root
    pub fn add_raw(&self, relative: &str, data: &[u8]) -> TestResult<PathBuf> {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data)?;
        Ok(path)
    }

    /// Library with one bar glyph per lowercase letter in `chars`.
    ///
    /// Template widths vary per letter so composed lines are not uniform.
    pub fn with_lowercase(chars: &str, height: u32) -> TestResult<Self> {
        let dir = Self::new()?;
        for ch in chars.chars().filter(|c| c.is_ascii_lowercase()) {
            let width = lowercase_template_width(ch);
            dir.add(LOWER_DIR, &ch.to_string(), &bar_glyph(width, height, 3)?)?;
        }
        Ok(dir)
    }
}

/// Template width used by [`GlyphDir::with_lowercase`] for a letter
pub fn lowercase_template_width(ch: char) -> u32 {
    12 + (ch as u32 % 5) * 2
}
