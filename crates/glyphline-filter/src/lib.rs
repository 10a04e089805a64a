//! glyphline-filter - Image filtering
//!
//! Gaussian blur for the photometric augmentation of line images, built
//! on a small [`Kernel`] type and a separable convolution.
//!
//! # Example
//!
//! ```
//! use glyphline_core::Pix;
//! use glyphline_filter::gaussian_blur;
//!
//! let pix = Pix::new_filled_gray(32, 16, 255).unwrap();
//! let blurred = gaussian_blur(&pix, 1.2).unwrap();
//! assert_eq!(blurred.width(), 32);
//! ```

pub mod convolve;
mod error;
pub mod kernel;

pub use convolve::{convolve, convolve_sep, gaussian_blur};
pub use error::{FilterError, FilterResult};
pub use kernel::Kernel;
