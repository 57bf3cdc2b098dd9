use warpkit_geometry::plan_rotation;
use warpkit_image::{Image, ImageDtype};

use super::{warp, RotateOptions, WarpOptions};
use crate::error::ImgprocError;

/// Rotate an image by `angle` radians about its center.
///
/// Positive angles rotate counter-clockwise. The output canvas is enlarged to
/// the bounding box of the rotated image; pixels not covered by the source are
/// filled according to `options.border`.
///
/// # Errors
///
/// Fails with a validation error whose message contains
/// "Angle must be a finite number" when `angle` is NaN, infinite or beyond
/// single-precision range.
pub fn rotate<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    angle: f64,
    options: &RotateOptions,
) -> Result<Image<T, C>, ImgprocError> {
    let plan = plan_rotation(angle, src.size())?;

    let warp_options = WarpOptions {
        size: Some(plan.size),
        interpolation: options.interpolation,
        border: options.border,
        strategy: options.strategy,
    };

    warp(src, &plan.transform.into(), &warp_options)
}
