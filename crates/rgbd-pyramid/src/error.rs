use rgbd_image::{ImageError, ImageSize};

/// An error type for pyramid construction.
#[derive(thiserror::Error, Debug)]
pub enum PyramidError {
    /// The intensity and depth images are not co-registered.
    #[error("Intensity size {gray} does not match depth size {depth}")]
    SizeMismatch {
        /// Size of the intensity image.
        gray: ImageSize,
        /// Size of the depth image.
        depth: ImageSize,
    },

    /// Error raised by an image operation.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The pyramid configuration could not be parsed.
    #[error("Invalid pyramid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
