//! Rectangles in image coordinates
//!
//! Origin is the top-left pixel. `right()` and `bottom()` are one past the
//! last covered column and row, so `x = 3, w = 4` spans columns 3..7.

use crate::error::{Error, Result};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Box {
    /// Rectangle with a checked, non-negative size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a negative width or height.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "negative box size {}x{} at ({}, {})",
                w, h, x, y
            )));
        }
        Ok(Self::new_unchecked(x, y, w, h))
    }

    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Column after the last one covered
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Row after the last one covered
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Columns covered by both boxes, 0 when they are side by side
    pub fn horizontal_overlap(&self, other: &Box) -> i32 {
        let lo = self.x.max(other.x);
        let hi = self.right().min(other.right());
        (hi - lo).max(0)
    }

    /// Smallest box covering both
    pub fn union(&self, other: &Box) -> Box {
        Self::spanning(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Part of the box inside a `width` x `height` image, if any
    pub fn clip(&self, width: i32, height: i32) -> Option<Box> {
        let b = Self::spanning(
            self.x.max(0),
            self.y.max(0),
            self.right().min(width),
            self.bottom().min(height),
        );
        (!b.is_empty()).then_some(b)
    }

    fn spanning(left: i32, top: i32, right: i32, bottom: i32) -> Box {
        Box::new_unchecked(left, top, right - left, bottom - top)
    }
}

/// Ordered list of rectangles, e.g. the ink regions of one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Boxa {
    boxes: Vec<Box>,
}

impl Boxa {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn push(&mut self, b: Box) {
        self.boxes.push(b);
    }

    pub fn boxes(&self) -> &[Box] {
        &self.boxes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box> {
        self.boxes.iter()
    }

    /// Order left to right; boxes starting on the same column keep their order.
    pub fn sort_by_x(&mut self) {
        self.boxes.sort_by_key(|b| b.x);
    }

    /// Union of every box, `None` when empty
    pub fn bounding_box(&self) -> Option<Box> {
        self.boxes.iter().copied().reduce(|acc, b| acc.union(&b))
    }
}

impl FromIterator<Box> for Boxa {
    fn from_iter<I: IntoIterator<Item = Box>>(iter: I) -> Self {
        Self {
            boxes: Vec::from_iter(iter),
        }
    }
}

impl<'a> IntoIterator for &'a Boxa {
    type Item = &'a Box;
    type IntoIter = std::slice::Iter<'a, Box>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_exclusive() {
        let b = Box::new(3, 1, 4, 8).unwrap();
        assert_eq!((b.right(), b.bottom()), (7, 9));
        assert!(Box::new(0, 0, -1, 1).is_err());
        assert!(Box::new_unchecked(5, 5, 0, 3).is_empty());
    }

    #[test]
    fn test_union_and_overlap() {
        let a = Box::new_unchecked(0, 0, 10, 5);
        let b = Box::new_unchecked(6, 8, 10, 5);
        assert_eq!(a.union(&b), Box::new_unchecked(0, 0, 16, 13));
        assert_eq!(a.horizontal_overlap(&b), 4);
        assert_eq!(a.horizontal_overlap(&Box::new_unchecked(10, 0, 2, 2)), 0);
    }

    #[test]
    fn test_clip_to_image() {
        let b = Box::new_unchecked(-5, -5, 10, 10);
        assert_eq!(b.clip(20, 20), Some(Box::new_unchecked(0, 0, 5, 5)));
        assert_eq!(Box::new_unchecked(30, 0, 2, 2).clip(20, 20), None);
        assert_eq!(Box::new_unchecked(18, 18, 5, 5).clip(20, 20), Some(Box::new_unchecked(18, 18, 2, 2)));
    }

    #[test]
    fn test_regions_left_to_right() {
        let mut boxa: Boxa = [
            Box::new_unchecked(30, 2, 4, 4),
            Box::new_unchecked(0, 5, 4, 4),
            Box::new_unchecked(10, 0, 4, 4),
        ]
        .into_iter()
        .collect();
        boxa.sort_by_x();
        let xs: Vec<i32> = boxa.iter().map(|b| b.x).collect();
        assert_eq!(xs, [0, 10, 30]);
        assert_eq!(boxa.bounding_box(), Some(Box::new_unchecked(0, 0, 34, 9)));
        assert_eq!(Boxa::new().bounding_box(), None);
    }
}
