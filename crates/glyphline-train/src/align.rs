//! Box alignment
//!
//! Ink regions of a line image are matched to the ground-truth characters
//! by order: the k-th region from the left belongs to the k-th character
//! that carries ink. Whitespace has no ink of its own; its box spans the
//! gap between its neighbours.
//!
//! The matching is only attempted when the counts agree. Touching glyphs
//! merge into one region and broken glyphs split into several, and in
//! either case no partial mapping is produced.

use crate::pool::map_ordered;
use crate::{BoxAnnotation, CharBox, TrainError, TrainResult, UnitFailure};
use glyphline_color::threshold_otsu;
use glyphline_core::{Box, Boxa, Color, Pix};
use glyphline_region::{ConnectivityType, find_outer_components};
use glyphline_synth::{Tally, UnitPaths};
use std::fmt;
use std::fs;
use tracing::{debug, info, warn};

/// Options for [`BoxAligner`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignOptions {
    /// Connectivity of ink regions
    pub connectivity: ConnectivityType,
    /// Merge regions that share columns into one (dots of `i`, `j`, `!`)
    pub merge_stacked: bool,
    /// Outline width of the preview rectangles
    pub preview_line_width: u32,
}

impl Default for AlignOptions {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityType::EightWay,
            merge_stacked: false,
            preview_line_width: 2,
        }
    }
}

/// Result of [`BoxAligner::validate_and_repair`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The existing box file matched the ground truth and was left alone
    Valid,
    /// The box file was missing or wrong and has been regenerated
    Repaired(BoxAnnotation),
}

impl RepairOutcome {
    /// Whether a new box file was written
    pub fn is_repaired(&self) -> bool {
        matches!(self, Self::Repaired(_))
    }
}

/// Merge boxes whose column ranges overlap.
///
/// Input must be sorted by left edge; the output is too.
pub fn merge_stacked(boxa: &Boxa) -> Boxa {
    let mut merged: Vec<Box> = Vec::with_capacity(boxa.len());
    for b in boxa.iter() {
        match merged.last_mut() {
            Some(last) if last.horizontal_overlap(b) > 0 => *last = last.union(b),
            _ => merged.push(*b),
        }
    }
    merged.into_iter().collect()
}

/// Detects glyph regions and matches them to ground truth
#[derive(Debug, Clone, Default)]
pub struct BoxAligner {
    options: AlignOptions,
}

impl BoxAligner {
    /// Create an aligner
    pub fn new(options: AlignOptions) -> Self {
        Self { options }
    }

    /// Options in use
    pub fn options(&self) -> &AlignOptions {
        &self.options
    }

    /// Bounding boxes of the ink regions, sorted by left edge.
    ///
    /// The image is reduced to gray and binarized with Otsu's threshold,
    /// dark pixels being ink. Regions nested in the hole of another region
    /// are not reported.
    pub fn detect_regions(&self, pix: &Pix) -> TrainResult<Boxa> {
        let gray = pix.convert_to_8()?;
        let (mask, threshold) = threshold_otsu(&gray)?;
        let mut boxa: Boxa = find_outer_components(&mask, self.options.connectivity)?
            .into_iter()
            .map(|c| c.bounds)
            .collect();
        boxa.sort_by_x();
        if self.options.merge_stacked {
            boxa = merge_stacked(&boxa);
        }
        debug!(threshold, regions = boxa.len(), "detected ink regions");
        Ok(boxa)
    }

    /// Align `text` to the ink regions of `pix`.
    ///
    /// # Errors
    ///
    /// Returns [`TrainError::AlignmentMismatch`] when the number of regions
    /// differs from the number of non-whitespace characters.
    pub fn align(&self, pix: &Pix, text: &str) -> TrainResult<BoxAnnotation> {
        let regions = self.detect_regions(pix)?;
        let expected = text.chars().filter(|c| !c.is_whitespace()).count();
        if regions.len() != expected {
            return Err(TrainError::AlignmentMismatch {
                regions: regions.len(),
                expected,
            });
        }

        // vertical extent used for whitespace boxes
        let (top, bottom) = match regions.bounding_box() {
            Some(b) => (b.y, b.bottom()),
            None => (0, pix.height() as i32),
        };

        let chars: Vec<char> = text.chars().collect();
        let mut boxes: Vec<CharBox> = Vec::with_capacity(chars.len());
        let mut next_region = regions.iter().peekable();
        let mut prev_right = 0i32;
        let mut i = 0;
        while i < chars.len() {
            if !chars[i].is_whitespace() {
                // counts agree, so a region is always available here
                let Some(b) = next_region.next() else {
                    break;
                };
                boxes.push(CharBox::new(chars[i], b));
                prev_right = b.right();
                i += 1;
                continue;
            }
            // split the gap evenly over a run of whitespace
            let run = chars[i..].iter().take_while(|c| c.is_whitespace()).count();
            let next_left = next_region
                .peek()
                .map_or(pix.width() as i32, |b| b.x)
                .max(prev_right);
            let gap = next_left - prev_right;
            for j in 0..run {
                let left = prev_right + gap * j as i32 / run as i32;
                let right = prev_right + gap * (j as i32 + 1) / run as i32;
                boxes.push(CharBox {
                    ch: chars[i + j],
                    left,
                    top,
                    right,
                    bottom,
                    page: 0,
                });
            }
            i += run;
        }
        Ok(BoxAnnotation::new(boxes))
    }

    /// The line in color with every ink box outlined in red.
    pub fn render_preview(&self, pix: &Pix, annotation: &BoxAnnotation) -> TrainResult<Pix> {
        let mut preview = pix.convert_to_8()?.convert_to_32()?.to_mut();
        for b in annotation.boxes().iter().filter(|b| !b.ch.is_whitespace()) {
            preview.render_box_color(&b.to_box(), self.options.preview_line_width, Color::RED)?;
        }
        Ok(preview.into())
    }

    /// Align a corpus unit from scratch and write its box file and preview.
    ///
    /// Nothing is written when alignment fails.
    pub fn regenerate(&self, unit: &UnitPaths, text: &str) -> TrainResult<BoxAnnotation> {
        let pix = glyphline_io::read_image(unit.image())?;
        let annotation = self.align(&pix, text)?;
        annotation.write(unit.box_file())?;

        let preview_path = unit.preview();
        if let Some(dir) = preview_path.parent() {
            fs::create_dir_all(dir)?;
        }
        let preview = self.render_preview(&pix, &annotation)?;
        glyphline_io::write_image(&preview, &preview_path, glyphline_core::ImageFormat::Png)?;
        Ok(annotation)
    }

    /// Keep the unit's box file if it matches `text`, otherwise regenerate it.
    ///
    /// A box file is valid when its characters equal the ground truth
    /// position by position. A missing or unparsable file is invalid.
    /// Running this on a valid unit touches nothing.
    pub fn validate_and_repair(&self, unit: &UnitPaths, text: &str) -> TrainResult<RepairOutcome> {
        let box_path = unit.box_file();
        if box_path.exists() {
            match BoxAnnotation::read(&box_path) {
                Ok(existing) if existing.matches_text(text) => return Ok(RepairOutcome::Valid),
                Ok(existing) => {
                    debug!(unit = unit.base_name(), boxes = existing.len(), chars = text.chars().count(), "box file disagrees with ground truth");
                }
                Err(e) => warn!(unit = unit.base_name(), error = %e, "unreadable box file"),
            }
        }
        let annotation = self.regenerate(unit, text)?;
        Ok(RepairOutcome::Repaired(annotation))
    }
}

/// Outcome of [`repair_units`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Units examined
    pub checked: usize,
    /// Box files already matching their ground truth
    pub valid: usize,
    /// Box files regenerated
    pub repaired: usize,
    /// Units left as they were, by reason
    pub failed: Tally,
}

impl fmt::Display for RepairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "box repair:")?;
        writeln!(f, "  checked:  {}", self.checked)?;
        writeln!(f, "  valid:    {}", self.valid)?;
        writeln!(f, "  repaired: {}", self.repaired)?;
        write!(f, "  failed:   {}", self.failed)
    }
}

/// Validate and repair the box file of every unit.
pub fn repair_units(
    aligner: &BoxAligner,
    units: &[UnitPaths],
    workers: usize,
) -> TrainResult<RepairReport> {
    info!(units = units.len(), "validating box files");
    let results = map_ordered(workers, units, |unit| -> Result<RepairOutcome, UnitFailure> {
        let text = unit
            .read_ground_truth()
            .map_err(|_| UnitFailure::MissingGroundTruth(unit.ground_truth()))?;
        aligner
            .validate_and_repair(unit, &text)
            .map_err(UnitFailure::from)
    })?;

    let mut report = RepairReport {
        checked: units.len(),
        ..Default::default()
    };
    for (unit, result) in units.iter().zip(&results) {
        match result {
            Ok(RepairOutcome::Valid) => report.valid += 1,
            Ok(RepairOutcome::Repaired(_)) => {
                report.repaired += 1;
                warn!(unit = unit.base_name(), "box file regenerated");
            }
            Err(failure) => {
                report.failed.add(failure.kind());
                warn!(unit = unit.base_name(), reason = %failure, "box file not repaired");
            }
        }
    }
    info!(
        valid = report.valid,
        repaired = report.repaired,
        failed = report.failed.total(),
        "box validation complete"
    );
    Ok(report)
}
