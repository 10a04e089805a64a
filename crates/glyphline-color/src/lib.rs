//! glyphline-color - Gray-level analysis and binarization
//!
//! - [`gray_histogram`] - 256-bin histogram of an 8 bpp image
//! - [`compute_otsu_threshold`] - automatic global threshold
//! - [`threshold_to_binary`] / [`threshold_otsu`] - ink masks where dark
//!   pixels become foreground (1)

mod error;
pub mod histogram;
pub mod threshold;

pub use error::{ColorError, ColorResult};
pub use histogram::gray_histogram;
pub use threshold::{
    compute_otsu_threshold, otsu_threshold_from_histogram, threshold_otsu, threshold_to_binary,
};
