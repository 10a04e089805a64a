//! On-disk corpus layout
//!
//! Every unit of a corpus shares one base name, `line_<index>` with the
//! index zero-padded to a fixed width:
//!
//! ```text
//! <dir>/line_0007.tif          line image
//! <dir>/line_0007.gt.txt       ground truth
//! <dir>/line_0007.box          box annotation
//! <dir>/line_0007.lstmf        training features
//! <dir>/box_previews/line_0007_preview.png
//! ```

use crate::SynthResult;
use glyphline_core::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Prefix of every unit base name
pub const BASE_PREFIX: &str = "line_";

/// Subdirectory holding the box preview images
pub const PREVIEW_DIR: &str = "box_previews";

/// Smallest index width
const MIN_INDEX_WIDTH: usize = 4;

/// Paths of one corpus unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitPaths {
    index: usize,
    base_name: String,
    dir: PathBuf,
    image: PathBuf,
}

impl UnitPaths {
    /// Sequence index of the unit
    pub fn index(&self) -> usize {
        self.index
    }

    /// Base name shared by all files of the unit, e.g. `line_0007`
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Line image
    pub fn image(&self) -> &Path {
        &self.image
    }

    /// Path without extension, the output base handed to the engine
    pub fn output_base(&self) -> PathBuf {
        self.dir.join(&self.base_name)
    }

    /// Ground-truth text file
    pub fn ground_truth(&self) -> PathBuf {
        self.dir.join(format!("{}.gt.txt", self.base_name))
    }

    /// Box annotation file
    pub fn box_file(&self) -> PathBuf {
        self.dir.join(format!("{}.box", self.base_name))
    }

    /// Training feature file
    pub fn lstmf(&self) -> PathBuf {
        self.dir.join(format!("{}.lstmf", self.base_name))
    }

    /// Box preview image
    pub fn preview(&self) -> PathBuf {
        self.dir
            .join(PREVIEW_DIR)
            .join(format!("{}_preview.png", self.base_name))
    }

    /// Read the ground truth with surrounding whitespace removed
    pub fn read_ground_truth(&self) -> SynthResult<String> {
        Ok(fs::read_to_string(self.ground_truth())?.trim().to_string())
    }
}

/// Naming scheme of a corpus directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusLayout {
    dir: PathBuf,
    index_width: usize,
    image_format: ImageFormat,
}

impl CorpusLayout {
    /// Layout for a corpus of `count` units.
    ///
    /// The index width fits the largest index and is at least 4.
    pub fn new<P: AsRef<Path>>(dir: P, count: usize, image_format: ImageFormat) -> Self {
        let largest = count.saturating_sub(1);
        Self {
            dir: dir.as_ref().to_path_buf(),
            index_width: largest.to_string().len().max(MIN_INDEX_WIDTH),
            image_format,
        }
    }

    /// Corpus directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Zero-padded index width
    pub fn index_width(&self) -> usize {
        self.index_width
    }

    /// Format of the line images
    pub fn image_format(&self) -> ImageFormat {
        self.image_format
    }

    /// Base name for `index`
    pub fn base_name(&self, index: usize) -> String {
        format!("{}{:0width$}", BASE_PREFIX, index, width = self.index_width)
    }

    /// Paths of unit `index`
    pub fn unit(&self, index: usize) -> UnitPaths {
        let base_name = self.base_name(index);
        let image = self
            .dir
            .join(format!("{}.{}", base_name, self.image_format.extension()));
        UnitPaths {
            index,
            base_name,
            dir: self.dir.clone(),
            image,
        }
    }

    /// List the units present in `dir`, by line image, in index order.
    ///
    /// A unit is a file `line_<digits>.<png|tif|tiff>`. When several images
    /// share an index the first in name order is kept.
    pub fn scan<P: AsRef<Path>>(dir: P) -> SynthResult<Vec<UnitPaths>> {
        let dir = dir.as_ref();
        let mut units: Vec<UnitPaths> = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let is_image = path
                .extension()
                .and_then(|e| e.to_str())
                .and_then(ImageFormat::from_extension)
                .is_some();
            if !is_image {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(digits) = stem.strip_prefix(BASE_PREFIX) else {
                continue;
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            let Ok(index) = digits.parse::<usize>() else {
                continue;
            };
            units.push(UnitPaths {
                index,
                base_name: stem.to_string(),
                dir: dir.to_path_buf(),
                image: path.clone(),
            });
        }
        units.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.image.cmp(&b.image)));
        units.dedup_by(|later, first| {
            let dup = later.index == first.index;
            if dup {
                warn!(
                    kept = %first.image.display(),
                    ignored = %later.image.display(),
                    "two line images share an index"
                );
            }
            dup
        });
        Ok(units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_width() {
        assert_eq!(CorpusLayout::new("c", 0, ImageFormat::Tiff).index_width(), 4);
        assert_eq!(CorpusLayout::new("c", 10_000, ImageFormat::Tiff).index_width(), 4);
        assert_eq!(CorpusLayout::new("c", 10_001, ImageFormat::Tiff).index_width(), 5);
    }

    #[test]
    fn test_unit_paths() {
        let layout = CorpusLayout::new("/corpus", 5, ImageFormat::Tiff);
        let unit = layout.unit(7);
        assert_eq!(unit.base_name(), "line_0007");
        assert_eq!(unit.image(), Path::new("/corpus/line_0007.tif"));
        assert_eq!(unit.ground_truth(), Path::new("/corpus/line_0007.gt.txt"));
        assert_eq!(unit.box_file(), Path::new("/corpus/line_0007.box"));
        assert_eq!(unit.lstmf(), Path::new("/corpus/line_0007.lstmf"));
        assert_eq!(unit.output_base(), Path::new("/corpus/line_0007"));
        assert_eq!(
            unit.preview(),
            Path::new("/corpus/box_previews/line_0007_preview.png")
        );
    }

    #[test]
    fn test_scan_orders_and_filters() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "line_0010.tif",
            "line_0002.png",
            "line_0002.tif",
            "line_0002.gt.txt",
            "line_x.tif",
            "other_0001.tif",
            "line_0003.box",
        ] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let units = CorpusLayout::scan(dir.path()).unwrap();
        let names: Vec<_> = units
            .iter()
            .map(|u| u.image().file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["line_0002.png", "line_0010.tif"]);
        assert_eq!(units[1].index(), 10);
        assert_eq!(units[1].box_file(), dir.path().join("line_0010.box"));
    }

    #[test]
    fn test_read_ground_truth_trims() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CorpusLayout::new(dir.path(), 1, ImageFormat::Png);
        let unit = layout.unit(0);
        fs::write(unit.ground_truth(), "cat dog\n").unwrap();
        assert_eq!(unit.read_ground_truth().unwrap(), "cat dog");
    }
}
