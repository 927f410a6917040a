use num_traits::Float;
use rgbd_image::{Image, ImageError, ImageSize};

use crate::parallel::{iter_row_pairs, ExecutionStrategy};

fn check_dst_size(src: ImageSize, dst: ImageSize) -> Result<(), ImageError> {
    let expected = src.halved();
    if dst != expected {
        return Err(ImageError::InvalidImageSize(
            expected.width,
            expected.height,
            dst.width,
            dst.height,
        ));
    }
    Ok(())
}

/// Halve an intensity image by averaging 2x2 blocks.
///
/// Each output pixel `(y, x)` is the mean of the source pixels `(2y, 2x)`,
/// `(2y, 2x + 1)`, `(2y + 1, 2x)` and `(2y + 1, 2x + 1)`. For odd dimensions the
/// last source row and/or column is ignored.
///
/// # Arguments
///
/// * `src` - The source intensity image with shape (H, W).
/// * `dst` - The destination image with shape (H / 2, W / 2).
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `dst` does not have the halved size.
///
/// # Example
///
/// ```
/// use rgbd_image::{Image, ImageSize};
/// use rgbd_pyramid::downsample::downsample_gray;
///
/// let image = Image::<f32, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![0.0, 1.0, 2.0, 3.0],
/// ).unwrap();
///
/// let mut downsampled = Image::<f32, 1>::from_size_val(image.size().halved(), 0.0).unwrap();
///
/// downsample_gray(&image, &mut downsampled).unwrap();
///
/// assert_eq!(downsampled.as_slice(), &[1.5]);
/// ```
pub fn downsample_gray<T>(src: &Image<T, 1>, dst: &mut Image<T, 1>) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    downsample_gray_with_strategy(src, dst, ExecutionStrategy::Serial)
}

/// Same as [`downsample_gray`] with an explicit [`ExecutionStrategy`].
pub fn downsample_gray_with_strategy<T>(
    src: &Image<T, 1>,
    dst: &mut Image<T, 1>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError>
where
    T: Float + Send + Sync,
{
    check_dst_size(src.size(), dst.size())?;

    let four = T::from(4.0).ok_or(ImageError::CastError(
        std::any::type_name::<T>().to_string(),
    ))?;

    let (src_cols, dst_cols) = (src.cols(), dst.cols());
    iter_row_pairs(
        src.as_slice(),
        src_cols,
        dst.as_slice_mut(),
        dst_cols,
        strategy,
        |top, bottom, out| {
            top.chunks_exact(2)
                .zip(bottom.chunks_exact(2))
                .zip(out.iter_mut())
                .for_each(|((t, b), o)| {
                    *o = (t[0] + t[1] + b[0] + b[1]) / four;
                });
        },
    );

    Ok(())
}

/// Mean of the valid (non-zero) samples of a 2x2 depth block.
///
/// Zeros add nothing to the sum, so dividing the raw sum by the number of
/// non-zero samples averages the valid ones only. A fully invalid block stays 0.
#[inline]
fn valid_depth_mean(block: [u8; 4]) -> u8 {
    let sum: u16 = block.iter().map(|&v| u16::from(v)).sum();
    let count = block.iter().filter(|&&v| v != 0).count().max(1) as u16;
    (sum / count).min(u16::from(u8::MAX)) as u8
}

/// Halve a depth image by averaging the valid samples of 2x2 blocks.
///
/// A depth of 0 marks a missing measurement and is excluded from the average.
/// A block without any valid sample produces 0. Averages are truncated toward
/// zero. Shape handling is the same as [`downsample_gray`].
///
/// # Arguments
///
/// * `src` - The source depth image with shape (H, W).
/// * `dst` - The destination image with shape (H / 2, W / 2).
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `dst` does not have the halved size.
///
/// # Example
///
/// ```
/// use rgbd_image::{Image, ImageSize};
/// use rgbd_pyramid::downsample::downsample_depth;
///
/// let depth = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![0, 0, 10, 20],
/// ).unwrap();
///
/// let mut downsampled = Image::<u8, 1>::from_size_val(depth.size().halved(), 0).unwrap();
///
/// downsample_depth(&depth, &mut downsampled).unwrap();
///
/// assert_eq!(downsampled.as_slice(), &[15]);
/// ```
pub fn downsample_depth(src: &Image<u8, 1>, dst: &mut Image<u8, 1>) -> Result<(), ImageError> {
    downsample_depth_with_strategy(src, dst, ExecutionStrategy::Serial)
}

/// Same as [`downsample_depth`] with an explicit [`ExecutionStrategy`].
pub fn downsample_depth_with_strategy(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    strategy: ExecutionStrategy,
) -> Result<(), ImageError> {
    check_dst_size(src.size(), dst.size())?;

    let (src_cols, dst_cols) = (src.cols(), dst.cols());
    iter_row_pairs(
        src.as_slice(),
        src_cols,
        dst.as_slice_mut(),
        dst_cols,
        strategy,
        |top, bottom, out| {
            top.chunks_exact(2)
                .zip(bottom.chunks_exact(2))
                .zip(out.iter_mut())
                .for_each(|((t, b), o)| {
                    *o = valid_depth_mean([t[0], t[1], b[0], b[1]]);
                });
        },
    );

    Ok(())
}

/// Allocate the next level and fill it with [`downsample_gray`].
pub fn pyrdown_gray<T>(src: &Image<T, 1>) -> Result<Image<T, 1>, ImageError>
where
    T: Float + Send + Sync,
{
    let mut dst = Image::from_size_val(src.size().halved(), T::zero())?;
    downsample_gray(src, &mut dst)?;
    Ok(dst)
}

/// Allocate the next level and fill it with [`downsample_depth`].
pub fn pyrdown_depth(src: &Image<u8, 1>) -> Result<Image<u8, 1>, ImageError> {
    let mut dst = Image::from_size_val(src.size().halved(), 0u8)?;
    downsample_depth(src, &mut dst)?;
    Ok(dst)
}
