use warpkit_geometry::{Point2d, Transform};
use warpkit_image::{Image, ImageDtype};

use super::WarpOptions;
use crate::{error::ImgprocError, interpolation::interpolate_pixel, parallel};

/// Resample an image through a transform.
///
/// The transform maps source coordinates to destination coordinates; it is
/// inverted once and every destination pixel center `(col, row)` is mapped
/// back into the source, then sampled with `options.interpolation` through
/// `options.border`. Values are clamped into the range of `T`.
///
/// # Arguments
///
/// * `src` - The input image with shape (height, width, channels).
/// * `transform` - The source to destination transform.
/// * `options` - Output size, interpolation, border and scheduling.
///
/// # Returns
///
/// A new image of `options.size`, or of the source size when unset.
///
/// # Errors
///
/// Fails when the output size is empty, when the transform is singular, or
/// when a projective transform sends a destination pixel to infinity. No
/// partial image is returned.
///
/// # Example
///
/// ```
/// use warpkit_geometry::{AffineTransform, Transform};
/// use warpkit_image::{Image, ImageSize};
/// use warpkit_imgproc::{interpolation::InterpolationMode, warp::{warp, WarpOptions}};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3]).unwrap();
/// let shift = Transform::from(AffineTransform::from_matrix([[1.0, 0.0, 1.0], [0.0, 1.0, 0.0]]).unwrap());
///
/// let options = WarpOptions::default().with_interpolation(InterpolationMode::Nearest);
/// let dst = warp(&src, &shift, &options).unwrap();
/// assert_eq!(dst.as_slice(), &[0, 1, 2]);
/// ```
pub fn warp<T: ImageDtype, const C: usize>(
    src: &Image<T, C>,
    transform: &Transform,
    options: &WarpOptions,
) -> Result<Image<T, C>, ImgprocError> {
    let size = options.size.unwrap_or(src.size());
    size.validate()?;

    // map destination positions back into the source
    let inverse = transform.inverse()?;

    log::debug!(
        "warp {} -> {} with {} transform, {:?} interpolation, {:?} border",
        src.size(),
        size,
        transform.family(),
        options.interpolation,
        options.border
    );

    let mut dst = Image::<T, C>::from_size_val(size, T::default())?;

    parallel::par_iter_rows_indexed(&mut dst, options.strategy, |row, dst_row: &mut [T]| {
        for (col, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let p = inverse.project(Point2d::new(col as f64, row as f64))?;
            let value = interpolate_pixel(
                src,
                p.x as f32,
                p.y as f32,
                options.interpolation,
                options.border,
            );
            dst_pixel
                .iter_mut()
                .zip(value.iter())
                .for_each(|(d, v)| *d = T::from_f32(*v));
        }
        Ok::<_, ImgprocError>(())
    })?;

    Ok(dst)
}
