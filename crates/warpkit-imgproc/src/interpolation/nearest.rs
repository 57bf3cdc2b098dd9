use super::split_coord;
use crate::border::BorderMode;
use warpkit_image::{Image, ImageDtype};

/// Kernel for nearest neighbor interpolation
///
/// Rounds half-way coordinates toward positive infinity.
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - How an out of range pixel is resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<T: ImageDtype, const C: usize>(
    image: &Image<T, C>,
    u: f32,
    v: f32,
    border: BorderMode,
) -> [f32; C] {
    let (iu, _) = split_coord(u + 0.5);
    let (iv, _) = split_coord(v + 0.5);
    border.sample(image, iv, iu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpkit_image::{ImageError, ImageSize};

    #[test]
    fn nearest_rounds_ties_up() -> Result<(), ImageError> {
        let img = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![10, 20, 30],
        )?;
        assert_eq!(
            nearest_neighbor_interpolation(&img, 0.5, 0.0, BorderMode::Zero),
            [20.0]
        );
        assert_eq!(
            nearest_neighbor_interpolation(&img, 0.49, 0.0, BorderMode::Zero),
            [10.0]
        );
        assert_eq!(
            nearest_neighbor_interpolation(&img, -0.5, 0.0, BorderMode::Zero),
            [10.0]
        );
        assert_eq!(
            nearest_neighbor_interpolation(&img, 2.5, 0.0, BorderMode::Zero),
            [0.0]
        );
        assert_eq!(
            nearest_neighbor_interpolation(&img, 2.5, 0.0, BorderMode::Replicate),
            [30.0]
        );
        Ok(())
    }
}
