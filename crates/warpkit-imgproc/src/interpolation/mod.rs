//! Pixel interpolation methods for image transformations.
//!
//! Every kernel takes a fractional source coordinate and reads its taps
//! through a [`BorderMode`](crate::border::BorderMode), so out of range
//! neighbors are resolved per tap rather than per destination pixel.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: uses the nearest pixel value, ties rounding toward positive infinity
//! - **Bilinear**: linear interpolation between the 2x2 neighborhood
//! - **Bicubic**: cubic convolution over the 4x4 neighborhood

mod bicubic;
mod bilinear;
pub(crate) mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};

/// Largest coordinate magnitude converted to a tap index.
///
/// Keeps neighbor offsets from overflowing; anything this far out is outside
/// every image and resolves purely through the border mode.
const MAX_TAP_COORD: f32 = (1u32 << 30) as f32;

/// Split a coordinate into its integer floor and fractional part.
#[inline]
pub(crate) fn split_coord(u: f32) -> (isize, f32) {
    if u.is_nan() {
        return (-(MAX_TAP_COORD as isize), 0.0);
    }
    let u = u.clamp(-MAX_TAP_COORD, MAX_TAP_COORD);
    let floor = u.floor();
    (floor as isize, u - floor)
}
