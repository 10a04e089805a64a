//! glyphline-region - Connected-component analysis
//!
//! Finds the foreground regions of a 1 bpp ink mask:
//!
//! - [`label_components`] - two-pass union-find labeling
//! - [`find_connected_components`] - every component with its bounding box
//! - [`find_outer_components`] - only components not nested inside the
//!   hole of another component

pub mod conncomp;
mod error;
pub mod outer;

pub use conncomp::{
    ConnectedComponent, ConnectivityType, LabelMap, find_connected_components, label_components,
};
pub use error::{RegionError, RegionResult};
pub use outer::find_outer_components;
