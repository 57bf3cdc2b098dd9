use glam::DVec2;
use warpkit_image::ImageSize;

use crate::{error::GeometryError, transform::AffineTransform};

/// Largest accepted rotation angle magnitude, in radians.
pub const MAX_ANGLE: f64 = f32::MAX as f64;

/// An output canvas and the source-to-destination transform of a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationPlan {
    /// Maps source pixel coordinates to canvas pixel coordinates.
    pub transform: AffineTransform,
    /// Size of the canvas holding the whole rotated source.
    pub size: ImageSize,
}

/// Plan the rotation of an image of size `src` by `angle` radians about its center.
///
/// Positive angles rotate counter-clockwise as displayed, with `y` pointing
/// down. The canvas is the bounding box of the rotated source rectangle, so
/// content is never cropped, and the source center lands on the canvas center.
///
/// # Errors
///
/// [`GeometryError::InvalidAngle`] when `angle` is NaN, infinite or larger in
/// magnitude than [`MAX_ANGLE`].
pub fn plan_rotation(angle: f64, src: ImageSize) -> Result<RotationPlan, GeometryError> {
    if !angle.is_finite() || angle.abs() > MAX_ANGLE {
        return Err(GeometryError::InvalidAngle(angle));
    }

    let (sin, cos) = angle.sin_cos();
    let w = src.width as f64;
    let h = src.height as f64;

    // the small slack absorbs rounding in sin/cos for right angles
    let width = ((w * cos).abs() + (h * sin).abs() - 1e-9).ceil().max(1.0) as usize;
    let height = ((w * sin).abs() + (h * cos).abs() - 1e-9).ceil().max(1.0) as usize;

    let src_center = DVec2::new((w - 1.0) / 2.0, (h - 1.0) / 2.0);
    let dst_center = DVec2::new((width as f64 - 1.0) / 2.0, (height as f64 - 1.0) / 2.0);

    // p' = R (p - c_src) + c_dst
    let r = [[cos, sin], [-sin, cos]];
    let t = DVec2::new(
        dst_center.x - (r[0][0] * src_center.x + r[0][1] * src_center.y),
        dst_center.y - (r[1][0] * src_center.x + r[1][1] * src_center.y),
    );
    let transform = AffineTransform::from_matrix([[r[0][0], r[0][1], t.x], [r[1][0], r[1][1], t.y]])?;

    log::debug!("rotation by {angle} rad: {src} -> {width}x{height}");

    Ok(RotationPlan {
        transform,
        size: ImageSize { width, height },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    fn size(width: usize, height: usize) -> ImageSize {
        ImageSize { width, height }
    }

    #[test]
    fn zero_angle_is_identity() -> Result<(), GeometryError> {
        let plan = plan_rotation(0.0, size(7, 5))?;
        assert_eq!(plan.size, size(7, 5));
        let p = plan.transform.project(DVec2::new(3.0, 4.0));
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-12);
        assert_relative_eq!(p.y, 4.0, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn quarter_turn_swaps_dimensions() -> Result<(), GeometryError> {
        let plan = plan_rotation(FRAC_PI_2, size(6, 4))?;
        assert_eq!(plan.size, size(4, 6));

        // counter-clockwise: the top-right corner moves to the top-left
        let p = plan.transform.project(DVec2::new(5.0, 0.0));
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn half_turn_keeps_size() -> Result<(), GeometryError> {
        let plan = plan_rotation(PI, size(10, 3))?;
        assert_eq!(plan.size, size(10, 3));
        let p = plan.transform.project(DVec2::new(0.0, 0.0));
        assert_relative_eq!(p.x, 9.0, epsilon = 1e-9);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn diagonal_turn_enlarges_canvas() -> Result<(), GeometryError> {
        let plan = plan_rotation(FRAC_PI_4, size(10, 10))?;
        assert_eq!(plan.size, size(15, 15));

        // every source corner lands inside the canvas
        for corner in [(0.0, 0.0), (9.0, 0.0), (0.0, 9.0), (9.0, 9.0)] {
            let p = plan.transform.project(corner.into());
            assert!(p.x >= -0.5 && p.x <= 14.5, "{p}");
            assert!(p.y >= -0.5 && p.y <= 14.5, "{p}");
        }

        let center = plan.transform.project(DVec2::new(4.5, 4.5));
        assert_relative_eq!(center.x, 7.0, epsilon = 1e-9);
        assert_relative_eq!(center.y, 7.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn invalid_angles_rejected() {
        for angle in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e39, -1e39] {
            let err = plan_rotation(angle, size(4, 4));
            assert!(matches!(err, Err(GeometryError::InvalidAngle(_))));
            if let Err(e) = err {
                assert!(e.to_string().contains("Angle must be a finite number"));
            }
        }
    }
}
