//! Line composition
//!
//! Renders a string by scaling each glyph to the line height and placing
//! the glyphs side by side on a white line.

use crate::{GlyphLibrary, SynthError, SynthResult};
use glyphline_core::{Pix, PixMut, PixelDepth};
use glyphline_transform::{scale_to_height, width_for_height};

/// Options for [`compose_line`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    /// Height every glyph is scaled to
    pub line_height: u32,
    /// Gap between adjacent glyphs in pixels
    pub spacing: u32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            line_height: 64,
            spacing: 5,
        }
    }
}

/// Width of the line [`compose_line`] renders for `text`.
///
/// # Errors
///
/// Returns [`SynthError::MissingGlyph`] for the first character without a
/// glyph.
pub fn line_width(text: &str, library: &GlyphLibrary, options: &ComposeOptions) -> SynthResult<u32> {
    let mut total = 0u32;
    let mut count = 0u32;
    for ch in text.chars() {
        let glyph = library.require(ch)?;
        total += width_for_height(glyph.width(), glyph.height(), options.line_height);
        count += 1;
    }
    Ok(total + options.spacing * count.saturating_sub(1))
}

/// Render `text` as one 8 bpp line image.
///
/// The result is `line_height` tall and exactly as wide as the scaled
/// glyphs plus `spacing` between each adjacent pair.
///
/// # Errors
///
/// Returns [`SynthError::MissingGlyph`] naming the first character that
/// has no glyph, and [`SynthError::InvalidParameters`] for an empty text
/// or a zero line height.
pub fn compose_line(text: &str, library: &GlyphLibrary, options: &ComposeOptions) -> SynthResult<Pix> {
    if options.line_height == 0 {
        return Err(SynthError::InvalidParameters(
            "line height must be positive".to_string(),
        ));
    }
    if text.is_empty() {
        return Err(SynthError::InvalidParameters(
            "cannot compose an empty line".to_string(),
        ));
    }

    // look everything up first so a missing glyph costs no resampling
    let glyphs = text
        .chars()
        .map(|ch| library.require(ch))
        .collect::<SynthResult<Vec<_>>>()?;
    let scaled = glyphs
        .iter()
        .map(|g| scale_to_height(g.pix(), options.line_height))
        .collect::<Result<Vec<_>, _>>()?;

    let width = scaled.iter().map(|p| p.width()).sum::<u32>()
        + options.spacing * (scaled.len() as u32 - 1);
    let mut line = PixMut::new(width, options.line_height, PixelDepth::Bit8)?;
    line.set_all(255);

    let mut x = 0i32;
    for pix in &scaled {
        line.paste(pix, x, 0)?;
        x += (pix.width() + options.spacing) as i32;
    }
    Ok(line.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Glyph, GlyphLibraryOptions};
    use glyphline_test::bar_glyph;

    fn library() -> GlyphLibrary {
        GlyphLibrary::from_glyphs(
            [
                Glyph::new('a', &bar_glyph(16, 32, 2).unwrap()).unwrap(),
                Glyph::new('b', &bar_glyph(30, 40, 2).unwrap()).unwrap(),
            ],
            &GlyphLibraryOptions::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_width_is_exact() {
        let lib = library();
        let opts = ComposeOptions::default();
        let line = compose_line("ab a", &lib, &opts).unwrap();
        // a: 16*64/32 = 32, b: 30*64/40 = 48, space: 20
        assert_eq!(line.width(), 32 + 48 + 20 + 32 + 3 * 5);
        assert_eq!(line.height(), 64);
        assert_eq!(line_width("ab a", &lib, &opts).unwrap(), line.width());
    }

    #[test]
    fn test_spacing_is_background() {
        let lib = library();
        let line = compose_line("aa", &lib, &ComposeOptions::default()).unwrap();
        for x in 32..37 {
            assert_eq!(line.get_pixel(x, 32), Some(255));
        }
        assert_eq!(line.get_pixel(20, 32), Some(0));
        assert_eq!(line.get_pixel(50, 32), Some(0));
    }

    #[test]
    fn test_missing_glyph() {
        let lib = library();
        let err = compose_line("abc", &lib, &ComposeOptions::default()).unwrap_err();
        assert!(matches!(err, SynthError::MissingGlyph { ch: 'c' }));
        assert!(line_width("zz", &lib, &ComposeOptions::default()).is_err());
    }

    #[test]
    fn test_single_glyph_has_no_spacing() {
        let lib = library();
        let opts = ComposeOptions {
            line_height: 32,
            spacing: 9,
        };
        let line = compose_line("a", &lib, &opts).unwrap();
        assert_eq!((line.width(), line.height()), (16, 32));
    }

    #[test]
    fn test_empty_text_rejected() {
        assert!(compose_line("", &library(), &ComposeOptions::default()).is_err());
    }
}
