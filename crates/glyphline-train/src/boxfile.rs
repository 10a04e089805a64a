//! Box annotation files
//!
//! One line per character, left to right:
//!
//! ```text
//! <char> <left> <top> <right> <bottom> <page>
//! ```
//!
//! Coordinates are in image pixels with the origin at the top-left corner;
//! `right` and `bottom` are exclusive. The character field may itself be a
//! space, so lines are split from the right.

use crate::{TrainError, TrainResult};
use glyphline_core::Box;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Bounding box claimed by one ground-truth character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharBox {
    /// Character this box belongs to
    pub ch: char,
    /// Left edge
    pub left: i32,
    /// Top edge
    pub top: i32,
    /// Right edge (exclusive)
    pub right: i32,
    /// Bottom edge (exclusive)
    pub bottom: i32,
    /// Page number, always 0 for single-line images
    pub page: u32,
}

impl CharBox {
    /// Box for `ch` covering `b` on page 0
    pub fn new(ch: char, b: &Box) -> Self {
        Self {
            ch,
            left: b.x,
            top: b.y,
            right: b.right(),
            bottom: b.bottom(),
            page: 0,
        }
    }

    /// Rectangle covered by this box
    pub fn to_box(&self) -> Box {
        Box::new_unchecked(
            self.left,
            self.top,
            self.right - self.left,
            self.bottom - self.top,
        )
    }
}

impl fmt::Display for CharBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.ch, self.left, self.top, self.right, self.bottom, self.page
        )
    }
}

/// Ordered per-character boxes of one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoxAnnotation {
    boxes: Vec<CharBox>,
}

impl BoxAnnotation {
    /// Create an annotation from boxes already in reading order
    pub fn new(boxes: Vec<CharBox>) -> Self {
        Self { boxes }
    }

    /// Number of boxes
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    /// Whether there are no boxes
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Boxes in order
    pub fn boxes(&self) -> &[CharBox] {
        &self.boxes
    }

    /// Characters of the boxes in order
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.boxes.iter().map(|b| b.ch)
    }

    /// Whether the box characters equal `text` position by position
    pub fn matches_text(&self, text: &str) -> bool {
        self.chars().eq(text.chars())
    }

    /// Read and parse a box file
    pub fn read<P: AsRef<Path>>(path: P) -> TrainResult<Self> {
        fs::read_to_string(path)?.parse()
    }

    /// Write the annotation as a box file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> TrainResult<()> {
        fs::write(path, self.to_string())?;
        Ok(())
    }
}

impl fmt::Display for BoxAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.boxes {
            writeln!(f, "{}", b)?;
        }
        Ok(())
    }
}

fn parse_line(line: &str, number: usize) -> TrainResult<CharBox> {
    let invalid = |message: String| TrainError::InvalidBoxFile {
        line: number,
        message,
    };
    let fields: Vec<&str> = line.rsplitn(6, ' ').collect();
    if fields.len() != 6 {
        return Err(invalid(format!("expected 6 fields, found {}", fields.len())));
    }
    // rsplitn yields fields right to left
    let mut chars = fields[5].chars();
    let ch = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(invalid(format!("{:?} is not a single character", fields[5]))),
    };
    let num = |s: &str| {
        s.parse::<i32>()
            .map_err(|_| invalid(format!("{:?} is not an integer", s)))
    };
    let page = fields[0]
        .parse::<u32>()
        .map_err(|_| invalid(format!("{:?} is not a page number", fields[0])))?;
    Ok(CharBox {
        ch,
        left: num(fields[4])?,
        top: num(fields[3])?,
        right: num(fields[2])?,
        bottom: num(fields[1])?,
        page,
    })
}

impl FromStr for BoxAnnotation {
    type Err = TrainError;

    /// Parse box file text; blank lines are ignored.
    fn from_str(s: &str) -> TrainResult<Self> {
        let mut boxes = Vec::new();
        for (i, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            boxes.push(parse_line(line, i + 1)?);
        }
        Ok(Self { boxes })
    }
}
