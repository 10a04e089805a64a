//! Raster container
//!
//! Every stage of the pipeline hands images around as [`Pix`]: glyph
//! templates, composed and augmented lines, ink masks and box previews.
//!
//! Pixels are packed into 32-bit words, leftmost pixel in the most
//! significant bits, and every row starts on a fresh word. A 32 bpp pixel
//! is one word laid out `0xRRGGBBAA`.
//!
//! A `Pix` is a shared read-only handle; cloning it is a reference count
//! bump, so worker threads can hold the same glyph templates. Edits go
//! through [`PixMut`], obtained with [`Pix::to_mut`] (always copies) or
//! [`Pix::try_into_mut`] (reuses the buffer of a unique handle), and are
//! published again with `Into<Pix>`.

mod access;
pub mod convert;
pub mod graphics;

pub use graphics::Color;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Bits per pixel of the three raster kinds the pipeline uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// Ink mask, 1 = ink
    Bit1 = 1,
    /// Grayscale
    Bit8 = 8,
    /// RGB, optionally with alpha
    Bit32 = 32,
}

impl PixelDepth {
    /// Bits per pixel
    pub fn bits(self) -> u32 {
        self as u32
    }

    fn default_spp(self) -> u32 {
        match self {
            Self::Bit32 => 3,
            _ => 1,
        }
    }
}

/// On-disk image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Not read from a file, or not recognized
    #[default]
    Unknown,
    /// PNG
    Png,
    /// Uncompressed TIFF
    Tiff,
}

impl ImageFormat {
    /// Extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Tiff => "tif",
        }
    }

    /// Format named by a file extension, ignoring case
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }
}

/// Pixel storage behind both handle types
#[derive(Debug, Clone)]
struct Raster {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// Samples per pixel: 1 gray, 3 RGB, 4 RGBA
    spp: u32,
    words_per_row: usize,
    source_format: ImageFormat,
    words: Vec<u32>,
}

impl Raster {
    fn alloc(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let row_bits = u64::from(width) * u64::from(depth.bits());
        let words_per_row = usize::try_from(row_bits.div_ceil(32)).map_err(|_| {
            Error::InvalidParameter(format!("row of {} pixels is too wide", width))
        })?;
        let len = words_per_row
            .checked_mul(height as usize)
            .ok_or_else(|| Error::InvalidParameter(format!("{}x{} image is too large", width, height)))?;
        Ok(Self {
            width,
            height,
            depth,
            spp: depth.default_spp(),
            words_per_row,
            source_format: ImageFormat::Unknown,
            words: vec![0; len],
        })
    }

    #[inline]
    fn row(&self, y: u32) -> &[u32] {
        let start = y as usize * self.words_per_row;
        &self.words[start..start + self.words_per_row]
    }

    #[inline]
    fn row_mut(&mut self, y: u32) -> &mut [u32] {
        let start = y as usize * self.words_per_row;
        &mut self.words[start..start + self.words_per_row]
    }
}

/// Read-only geometry shared by [`Pix`] and [`PixMut`]
macro_rules! raster_geometry {
    () => {
        /// Width in pixels
        #[inline]
        pub fn width(&self) -> u32 {
            self.raster().width
        }

        /// Height in pixels
        #[inline]
        pub fn height(&self) -> u32 {
            self.raster().height
        }

        /// Bits per pixel
        #[inline]
        pub fn depth(&self) -> PixelDepth {
            self.raster().depth
        }

        /// Samples per pixel; 4 means the 32 bpp words carry alpha
        #[inline]
        pub fn spp(&self) -> u32 {
            self.raster().spp
        }

        /// Format the image was decoded from
        #[inline]
        pub fn informat(&self) -> ImageFormat {
            self.raster().source_format
        }

        /// Packed pixel words, row after row
        #[inline]
        pub fn data(&self) -> &[u32] {
            &self.raster().words
        }
    };
}

/// Shared, immutable image
///
/// ```
/// use glyphline_core::{Pix, PixelDepth};
///
/// let line = Pix::new(640, 64, PixelDepth::Bit8).unwrap();
/// assert_eq!((line.width(), line.height()), (640, 64));
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<Raster>,
}

impl Pix {
    /// Zero-filled image; black for gray and RGB, no ink for masks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if a side is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut::new(width, height, depth)?.into())
    }

    /// 8 bpp image with every pixel set to `value`.
    pub fn new_filled_gray(width: u32, height: u32, value: u8) -> Result<Self> {
        let mut pm = PixMut::new(width, height, PixelDepth::Bit8)?;
        pm.set_all(u32::from(value));
        Ok(pm.into())
    }

    #[inline]
    fn raster(&self) -> &Raster {
        &self.inner
    }

    raster_geometry!();

    /// Same width, height and depth
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.depth() == other.depth()
    }

    /// Same size and identical pixels
    pub fn equals(&self, other: &Pix) -> bool {
        self.sizes_equal(other) && self.data() == other.data()
    }

    /// Take the buffer for editing if no other handle shares it.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        Arc::try_unwrap(self.inner)
            .map(|inner| PixMut { inner })
            .map_err(|inner| Pix { inner })
    }

    /// Editable copy
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: self.raster().clone(),
        }
    }
}

/// Image being built or edited
#[derive(Debug)]
pub struct PixMut {
    inner: Raster,
}

impl PixMut {
    /// Zero-filled editable image
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut {
            inner: Raster::alloc(width, height, depth)?,
        })
    }

    #[inline]
    fn raster(&self) -> &Raster {
        &self.inner
    }

    raster_geometry!();

    /// Record the format the pixels were decoded from
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.source_format = format;
    }

    /// Set samples per pixel (4 marks alpha in 32 bpp words)
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.spp = spp;
    }
}

impl From<PixMut> for Pix {
    fn from(pm: PixMut) -> Self {
        Pix {
            inner: Arc::new(pm.inner),
        }
    }
}
