use super::split_coord;
use crate::border::BorderMode;
use warpkit_image::{Image, ImageDtype};

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - How out of range taps are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderMode,
) -> [f32; C] {
    let (iu0, frac_u) = split_coord(u);
    let (iv0, frac_v) = split_coord(v);

    let frac_uu = 1.0 - frac_u;
    let frac_vv = 1.0 - frac_v;

    let w00 = frac_uu * frac_vv;
    let w01 = frac_u * frac_vv;
    let w10 = frac_uu * frac_v;
    let w11 = frac_u * frac_v;

    let p00 = border.sample(image, iv0, iu0);
    let p01 = border.sample(image, iv0, iu0 + 1);
    let p10 = border.sample(image, iv0 + 1, iu0);
    let p11 = border.sample(image, iv0 + 1, iu0 + 1);

    let mut pixel = [0.0; C];
    for k in 0..C {
        pixel[k] = p00[k] * w00 + p01[k] * w01 + p10[k] * w10 + p11[k] * w11;
    }

    pixel
}
