//! glyphline-transform - Geometric transformations
//!
//! This crate provides the geometric operations used to build and perturb
//! text line images:
//!
//! - Lanczos-3 resampling ([`scale`], [`scale_to_size`], [`scale_to_height`])
//! - Rotation about the center with background fill ([`rotate`])
//! - Centered placement on a fixed-size canvas ([`embed_centered`])

pub mod canvas;
mod error;
pub mod rotate;
pub mod scale;

pub use canvas::embed_centered;
pub use error::{TransformError, TransformResult};
pub use rotate::rotate;
pub use scale::{scale, scale_to_height, scale_to_size, width_for_height};
