//! Raster and rectangle types shared by the glyphline crates
//!
//! [`Pix`] holds glyph templates, rendered lines and ink masks; [`Box`]
//! and [`Boxa`] hold character and region rectangles. The [`color`]
//! module packs and unpacks 32 bpp words.
//!
//! ```
//! use glyphline_core::{Box, PixMut, PixelDepth};
//!
//! let mut line = PixMut::new(120, 64, PixelDepth::Bit8).unwrap();
//! line.set_all(255);
//! line.fill_rect(&Box::new_unchecked(10, 20, 8, 24), 0);
//! assert_eq!(line.get_pixel(12, 30), Some(0));
//! ```

pub mod box_;
pub mod color;
pub mod error;
pub mod pix;

pub use box_::{Box, Boxa};
pub use error::{Error, Result};
pub use pix::{Color, ImageFormat, Pix, PixMut, PixelDepth};
