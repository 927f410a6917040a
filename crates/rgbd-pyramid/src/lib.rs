#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// 2x2 block-averaging kernels for intensity and depth grids.
pub mod downsample;

/// Error types for pyramid construction.
pub mod error;

/// Pinhole camera intrinsics carried alongside each level.
pub mod intrinsics;

/// module containing parallelization utilities.
pub mod parallel;

/// Pyramid construction.
pub mod pyramid;

pub use crate::downsample::{
    downsample_depth, downsample_depth_with_strategy, downsample_gray,
    downsample_gray_with_strategy, pyrdown_depth, pyrdown_gray,
};
pub use crate::error::PyramidError;
pub use crate::intrinsics::{IntrinsicsScaling, PinholeIntrinsics};
pub use crate::parallel::ExecutionStrategy;
pub use crate::pyramid::{
    build_pyramid, PyramidBuilder, PyramidConfig, PyramidLevel, RgbdPyramid,
};
