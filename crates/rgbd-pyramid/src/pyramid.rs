use num_traits::Float;
use rgbd_image::{Image, ImageError};
use serde::{Deserialize, Serialize};

use crate::downsample::{downsample_depth_with_strategy, downsample_gray_with_strategy};
use crate::error::PyramidError;
use crate::intrinsics::{IntrinsicsScaling, PinholeIntrinsics};
use crate::parallel::ExecutionStrategy;

/// Parameters controlling how a pyramid is built.
///
/// Every field has a default, so a JSON document only needs the keys it changes.
///
/// ```
/// use rgbd_pyramid::{IntrinsicsScaling, PyramidConfig};
///
/// let config = PyramidConfig::from_json_str(r#"{"num_levels": 4}"#).unwrap();
/// assert_eq!(config.num_levels, 4);
/// assert_eq!(config.intrinsics_scaling, IntrinsicsScaling::Fixed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidConfig {
    /// Number of levels, including the base level.
    pub num_levels: usize,
    /// How intrinsics evolve from one level to the next.
    pub intrinsics_scaling: IntrinsicsScaling,
    /// How the downsampling kernels are executed.
    pub strategy: ExecutionStrategy,
}

impl Default for PyramidConfig {
    fn default() -> Self {
        Self {
            num_levels: 1,
            intrinsics_scaling: IntrinsicsScaling::Fixed,
            strategy: ExecutionStrategy::Serial,
        }
    }
}

impl PyramidConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self, PyramidError> {
        Ok(serde_json::from_str(s)?)
    }
}

/// A borrowed view of one pyramid level.
#[derive(Debug, Clone, Copy)]
pub struct PyramidLevel<'a, T> {
    /// Level index, 0 being the finest.
    pub index: usize,
    /// Intensity image of the level.
    pub gray: &'a Image<T, 1>,
    /// Depth image of the level.
    pub depth: &'a Image<u8, 1>,
    /// Camera intrinsics of the level.
    pub intrinsics: PinholeIntrinsics,
}

/// Aligned intensity, depth and intrinsics sequences ordered finest to coarsest.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbdPyramid<T = f32> {
    gray: Vec<Image<T, 1>>,
    depth: Vec<Image<u8, 1>>,
    intrinsics: Vec<PinholeIntrinsics>,
}

impl<T> RgbdPyramid<T> {
    fn with_capacity(num_levels: usize) -> Self {
        Self {
            gray: Vec::with_capacity(num_levels),
            depth: Vec::with_capacity(num_levels),
            intrinsics: Vec::with_capacity(num_levels),
        }
    }

    fn push(&mut self, gray: Image<T, 1>, depth: Image<u8, 1>, intrinsics: PinholeIntrinsics) {
        self.gray.push(gray);
        self.depth.push(depth);
        self.intrinsics.push(intrinsics);
    }

    /// Number of levels in the pyramid.
    pub fn len(&self) -> usize {
        self.gray.len()
    }

    /// Whether the pyramid has no levels.
    pub fn is_empty(&self) -> bool {
        self.gray.is_empty()
    }

    /// Get the level at `index`, or `None` if out of range.
    pub fn level(&self, index: usize) -> Option<PyramidLevel<'_, T>> {
        Some(PyramidLevel {
            index,
            gray: self.gray.get(index)?,
            depth: self.depth.get(index)?,
            intrinsics: *self.intrinsics.get(index)?,
        })
    }

    /// Iterate over the levels from finest to coarsest.
    pub fn levels(&self) -> impl Iterator<Item = PyramidLevel<'_, T>> + '_ {
        self.gray
            .iter()
            .zip(self.depth.iter())
            .zip(self.intrinsics.iter())
            .enumerate()
            .map(|(index, ((gray, depth), intrinsics))| PyramidLevel {
                index,
                gray,
                depth,
                intrinsics: *intrinsics,
            })
    }

    /// Intensity images, finest first.
    pub fn gray(&self) -> &[Image<T, 1>] {
        &self.gray
    }

    /// Depth images, finest first.
    pub fn depth(&self) -> &[Image<u8, 1>] {
        &self.depth
    }

    /// Intrinsics of every level, finest first.
    pub fn intrinsics(&self) -> &[PinholeIntrinsics] {
        &self.intrinsics
    }

    /// Split the pyramid into its intensity, depth and intrinsics sequences.
    #[allow(clippy::type_complexity)]
    pub fn into_parts(
        self,
    ) -> (
        Vec<Image<T, 1>>,
        Vec<Image<u8, 1>>,
        Vec<PinholeIntrinsics>,
    ) {
        (self.gray, self.depth, self.intrinsics)
    }
}

/// Builds [`RgbdPyramid`]s according to a [`PyramidConfig`].
#[derive(Debug, Clone, Default)]
pub struct PyramidBuilder {
    config: PyramidConfig,
}

impl PyramidBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: PyramidConfig) -> Self {
        Self { config }
    }

    /// The configuration used by this builder.
    pub fn config(&self) -> &PyramidConfig {
        &self.config
    }

    /// Build a pyramid from a base intensity image, depth image and intrinsics.
    ///
    /// Level 0 holds the given images as they are; they are moved into the
    /// pyramid, not copied. Each further level is obtained by downsampling the
    /// previous one. With zero levels the result is empty.
    ///
    /// # Arguments
    ///
    /// * `gray` - The base intensity image, already converted to float.
    /// * `depth` - The base depth image, 0 marking missing measurements.
    /// * `intrinsics` - The camera intrinsics at the base resolution.
    ///
    /// # Errors
    ///
    /// Returns [`PyramidError::SizeMismatch`] if `gray` and `depth` differ in size.
    pub fn build<T>(
        &self,
        gray: Image<T, 1>,
        depth: Image<u8, 1>,
        intrinsics: PinholeIntrinsics,
    ) -> Result<RgbdPyramid<T>, PyramidError>
    where
        T: Float + Send + Sync,
    {
        if gray.size() != depth.size() {
            return Err(PyramidError::SizeMismatch {
                gray: gray.size(),
                depth: depth.size(),
            });
        }

        let num_levels = self.config.num_levels;
        let mut pyramid = RgbdPyramid::with_capacity(num_levels);

        let (mut gray, mut depth, mut intrinsics) = (gray, depth, intrinsics);
        for level in 0..num_levels {
            log::debug!(
                "pyramid level {}: {} f={} cx={} cy={}",
                level,
                gray.size(),
                intrinsics.f,
                intrinsics.cx,
                intrinsics.cy
            );

            let next = if level + 1 < num_levels {
                Some(self.next_level(&gray, &depth, &intrinsics)?)
            } else {
                None
            };

            pyramid.push(gray, depth, intrinsics);

            match next {
                Some((next_gray, next_depth, next_intrinsics)) => {
                    gray = next_gray;
                    depth = next_depth;
                    intrinsics = next_intrinsics;
                }
                None => break,
            }
        }

        log::debug!("built pyramid with {} levels", pyramid.len());

        Ok(pyramid)
    }

    fn next_level<T>(
        &self,
        gray: &Image<T, 1>,
        depth: &Image<u8, 1>,
        intrinsics: &PinholeIntrinsics,
    ) -> Result<(Image<T, 1>, Image<u8, 1>, PinholeIntrinsics), ImageError>
    where
        T: Float + Send + Sync,
    {
        let strategy = self.config.strategy;

        let mut next_gray = Image::from_size_val(gray.size().halved(), T::zero())?;
        downsample_gray_with_strategy(gray, &mut next_gray, strategy)?;

        let mut next_depth = Image::from_size_val(depth.size().halved(), 0u8)?;
        downsample_depth_with_strategy(depth, &mut next_depth, strategy)?;

        let next_intrinsics = self.config.intrinsics_scaling.next_level(intrinsics);

        Ok((next_gray, next_depth, next_intrinsics))
    }
}

/// Build an intensity, depth and intrinsics pyramid with `num_levels` levels.
///
/// The intrinsics are reported unchanged at every level. Use a
/// [`PyramidBuilder`] with [`IntrinsicsScaling::Halve`] to rescale them.
///
/// # Arguments
///
/// * `gray` - The base intensity image, already converted to float.
/// * `depth` - The base depth image, 0 marking missing measurements.
/// * `num_levels` - The number of levels, including the base level.
/// * `focal_length` - The focal length in pixels.
/// * `cx` - The x coordinate of the optical center.
/// * `cy` - The y coordinate of the optical center.
///
/// # Example
///
/// ```
/// use rgbd_image::Image;
/// use rgbd_pyramid::build_pyramid;
///
/// let gray = Image::<f32, 1>::from_size_val([8, 8].into(), 0.5).unwrap();
/// let depth = Image::<u8, 1>::from_size_val([8, 8].into(), 40).unwrap();
///
/// let pyramid = build_pyramid(gray, depth, 3, 525.0, 3.5, 3.5).unwrap();
///
/// assert_eq!(pyramid.len(), 3);
/// assert_eq!(pyramid.gray()[2].width(), 2);
/// ```
pub fn build_pyramid<T>(
    gray: Image<T, 1>,
    depth: Image<u8, 1>,
    num_levels: usize,
    focal_length: f64,
    cx: f64,
    cy: f64,
) -> Result<RgbdPyramid<T>, PyramidError>
where
    T: Float + Send + Sync,
{
    let config = PyramidConfig {
        num_levels,
        ..Default::default()
    };
    PyramidBuilder::new(config).build(
        gray,
        depth,
        PinholeIntrinsics::new(focal_length, cx, cy),
    )
}
