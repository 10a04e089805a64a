//! Line augmentation
//!
//! Random perturbations applied to a composed line, always in the same
//! order: rotation, scaling back onto the original canvas, blur. Each
//! step is decided independently.

use crate::{SynthError, SynthResult};
use glyphline_core::Pix;
use glyphline_filter::gaussian_blur;
use glyphline_transform::{embed_centered, rotate, scale};
use rand::{Rng, RngExt};

/// Probabilities and ranges of the augmentation steps
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AugmentOptions {
    /// Probability of rotating the line
    pub rotate_probability: f64,
    /// Largest rotation in degrees, either direction
    pub max_rotation: f32,
    /// Probability of rescaling the line
    pub scale_probability: f64,
    /// Smallest scale factor
    pub min_scale: f32,
    /// Largest scale factor
    pub max_scale: f32,
    /// Probability of blurring the line
    pub blur_probability: f64,
    /// Smallest blur radius (Gaussian sigma)
    pub min_blur: f32,
    /// Largest blur radius (Gaussian sigma)
    pub max_blur: f32,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            rotate_probability: 0.5,
            max_rotation: 2.0,
            scale_probability: 0.5,
            min_scale: 0.9,
            max_scale: 1.1,
            blur_probability: 0.3,
            min_blur: 0.5,
            max_blur: 1.5,
        }
    }
}

impl AugmentOptions {
    /// Options that never change the line
    pub fn none() -> Self {
        Self {
            rotate_probability: 0.0,
            scale_probability: 0.0,
            blur_probability: 0.0,
            ..Self::default()
        }
    }

    /// Check probabilities and ranges.
    pub fn validate(&self) -> SynthResult<()> {
        for (name, p) in [
            ("rotate", self.rotate_probability),
            ("scale", self.scale_probability),
            ("blur", self.blur_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(SynthError::InvalidParameters(format!(
                    "{} probability {} outside [0, 1]",
                    name, p
                )));
            }
        }
        if !(self.max_rotation >= 0.0) {
            return Err(SynthError::InvalidParameters(format!(
                "max rotation {} must not be negative",
                self.max_rotation
            )));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale) {
            return Err(SynthError::InvalidParameters(format!(
                "scale range {}..{} is empty or not positive",
                self.min_scale, self.max_scale
            )));
        }
        if !(self.min_blur > 0.0 && self.min_blur <= self.max_blur) {
            return Err(SynthError::InvalidParameters(format!(
                "blur range {}..{} is empty or not positive",
                self.min_blur, self.max_blur
            )));
        }
        Ok(())
    }
}

/// The steps [`augment`] applied, with their drawn parameters
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AugmentRecord {
    /// Rotation angle in degrees
    pub rotation: Option<f32>,
    /// Scale factor
    pub scale: Option<f32>,
    /// Blur radius
    pub blur: Option<f32>,
}

/// Randomly perturb an 8 bpp line image.
///
/// The output has the same size as the input. Exposed corners of a
/// rotation and the margin of a shrunk line are filled with white.
pub fn augment<R: Rng + ?Sized>(
    pix: &Pix,
    options: &AugmentOptions,
    rng: &mut R,
) -> SynthResult<(Pix, AugmentRecord)> {
    options.validate()?;
    let mut record = AugmentRecord::default();
    let mut out = pix.clone();

    if rng.random_bool(options.rotate_probability) {
        let angle = rng.random_range(-options.max_rotation..=options.max_rotation);
        out = rotate(&out, angle)?;
        record.rotation = Some(angle);
    }

    if rng.random_bool(options.scale_probability) {
        let factor = rng.random_range(options.min_scale..=options.max_scale);
        let (w, h) = (out.width(), out.height());
        let scaled = scale(&out, factor, factor)?;
        out = embed_centered(&scaled, w, h, 255)?;
        record.scale = Some(factor);
    }

    if rng.random_bool(options.blur_probability) {
        let radius = rng.random_range(options.min_blur..=options.max_blur);
        out = gaussian_blur(&out, radius)?;
        record.blur = Some(radius);
    }

    Ok((out, record))
}
