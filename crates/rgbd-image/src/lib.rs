#![deny(missing_docs)]
//! Image types for intensity and depth grids.

/// image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// image basic operations module.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
