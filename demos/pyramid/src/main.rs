use argh::FromArgs;
use std::path::PathBuf;

use rgbd_image::{ops::cast_and_scale, Image, ImageSize};
use rgbd_pyramid::{
    ExecutionStrategy, IntrinsicsScaling, PinholeIntrinsics, PyramidBuilder, PyramidConfig,
};

#[derive(FromArgs)]
/// Build an intensity + depth pyramid from a synthetic RGB-D frame
struct Args {
    /// width of the synthetic frame
    #[argh(option, default = "640")]
    width: usize,

    /// height of the synthetic frame
    #[argh(option, default = "480")]
    height: usize,

    /// number of pyramid levels
    #[argh(option, short = 'l')]
    levels: Option<usize>,

    /// focal length in pixels
    #[argh(option, default = "525.0")]
    focal: f64,

    /// optical center x, defaults to the image center
    #[argh(option)]
    cx: Option<f64>,

    /// optical center y, defaults to the image center
    #[argh(option)]
    cy: Option<f64>,

    /// halve the intrinsics at every level
    #[argh(switch)]
    halve_intrinsics: bool,

    /// downsample rows in parallel
    #[argh(switch)]
    parallel: bool,

    /// path to a JSON pyramid configuration
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args: Args = argh::from_env();

    // command line flags override the configuration file
    let mut config = match &args.config {
        Some(path) => PyramidConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => PyramidConfig {
            num_levels: 4,
            ..Default::default()
        },
    };
    if let Some(levels) = args.levels {
        config.num_levels = levels;
    }
    if args.halve_intrinsics {
        config.intrinsics_scaling = IntrinsicsScaling::Halve;
    }
    if args.parallel {
        config.strategy = ExecutionStrategy::ParallelRows;
    }
    log::info!("pyramid config: {:?}", config);

    let size = ImageSize {
        width: args.width,
        height: args.height,
    };
    let (gray_u8, depth) = synthetic_frame(size)?;

    // the pyramid kernels work on float intensities
    let mut gray = Image::<f32, 1>::from_size_val(size, 0.0)?;
    cast_and_scale(&gray_u8, &mut gray, 1.0 / 255.0)?;

    let intrinsics = PinholeIntrinsics::new(
        args.focal,
        args.cx.unwrap_or((size.width as f64 - 1.0) / 2.0),
        args.cy.unwrap_or((size.height as f64 - 1.0) / 2.0),
    );

    let pyramid = PyramidBuilder::new(config).build(gray, depth, intrinsics)?;

    for level in pyramid.levels() {
        let valid = level.depth.as_slice().iter().filter(|&&d| d != 0).count();
        log::info!(
            "level {}: {} valid depth {}/{} K={:?}",
            level.index,
            level.gray.size(),
            valid,
            level.depth.size().area(),
            level.intrinsics.camera_matrix()
        );
    }

    Ok(())
}

/// A horizontal intensity ramp and a tilted depth plane with a missing band.
fn synthetic_frame(
    size: ImageSize,
) -> Result<(Image<u8, 1>, Image<u8, 1>), rgbd_image::ImageError> {
    let mut gray = Image::<u8, 1>::from_size_val(size, 0)?;
    let mut depth = Image::<u8, 1>::from_size_val(size, 0)?;

    let cols = size.width.max(1);
    let rows = size.height.max(1);
    for (i, (g, d)) in gray
        .as_slice_mut()
        .iter_mut()
        .zip(depth.as_slice_mut().iter_mut())
        .enumerate()
    {
        let (y, x) = (i / cols, i % cols);
        *g = (x * 255 / cols) as u8;
        // the fourth of eight horizontal bands has no depth
        if (y * 8 / rows) % 8 != 3 {
            *d = (40 + y * 200 / rows) as u8;
        }
    }

    Ok((gray, depth))
}
