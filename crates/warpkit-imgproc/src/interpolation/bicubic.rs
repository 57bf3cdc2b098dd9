use super::split_coord;
use crate::border::BorderMode;
use warpkit_image::{Image, ImageDtype};

/// Free parameter of the Keys cubic convolution kernel.
const CUBIC_A: f32 = -0.5;

/// Cubic convolution weight for a tap at distance `x`.
#[inline]
fn cubic_weight(x: f32) -> f32 {
    let x = x.abs();
    if x <= 1.0 {
        ((CUBIC_A + 2.0) * x - (CUBIC_A + 3.0)) * x * x + 1.0
    } else if x < 2.0 {
        ((CUBIC_A * x - 5.0 * CUBIC_A) * x + 8.0 * CUBIC_A) * x - 4.0 * CUBIC_A
    } else {
        0.0
    }
}

#[inline]
fn cubic_weights(t: f32) -> [f32; 4] {
    [
        cubic_weight(1.0 + t),
        cubic_weight(t),
        cubic_weight(1.0 - t),
        cubic_weight(2.0 - t),
    ]
}

/// Kernel for bicubic interpolation over the 4x4 neighborhood.
///
/// The result may overshoot the range of the input values; callers clamp it
/// when storing into the destination type.
pub(crate) fn bicubic_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderMode,
) -> [f32; C] {
    let (iu, frac_u) = split_coord(u);
    let (iv, frac_v) = split_coord(v);

    let wu = cubic_weights(frac_u);
    let wv = cubic_weights(frac_v);

    let mut pixel = [0.0; C];
    for (dy, wy) in wv.iter().enumerate() {
        let row = iv - 1 + dy as isize;
        let mut acc = [0.0; C];
        for (dx, wx) in wu.iter().enumerate() {
            let tap = border.sample(image, row, iu - 1 + dx as isize);
            for k in 0..C {
                acc[k] += tap[k] * wx;
            }
        }
        for k in 0..C {
            pixel[k] += acc[k] * wy;
        }
    }

    pixel
}
