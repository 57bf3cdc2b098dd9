use glam::{DMat3, DVec2, DVec3};

use crate::error::LinalgError;

/// Isotropic normalization of a 2d point set (Hartley).
///
/// Moves the centroid to the origin and scales so the mean distance to the
/// origin is `√2`. Solving in normalized coordinates keeps the entries of the
/// normal equations within a few orders of magnitude of each other, so a fixed
/// relative rank tolerance behaves the same for pixel and unit coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointNormalization {
    /// Centroid of the original points.
    pub centroid: DVec2,
    /// Scale applied after centering.
    pub scale: f64,
}

impl PointNormalization {
    /// Compute the normalization for a point set.
    ///
    /// When every point coincides the scale is left at `1.0`; detecting that
    /// degeneracy is the job of the solver consuming the normalized points.
    pub fn from_points(points: &[DVec2]) -> Result<Self, LinalgError> {
        if points.is_empty() {
            return Err(LinalgError::EmptyInput);
        }
        let n = points.len() as f64;
        let centroid = points.iter().fold(DVec2::ZERO, |acc, p| acc + *p) / n;
        let mean_dist = points.iter().map(|p| (*p - centroid).length()).sum::<f64>() / n;

        if !centroid.is_finite() || !mean_dist.is_finite() {
            return Err(LinalgError::NonFinite);
        }

        let scale = if mean_dist > f64::EPSILON * centroid.length().max(1.0) {
            std::f64::consts::SQRT_2 / mean_dist
        } else {
            1.0
        };

        Ok(Self { centroid, scale })
    }

    /// Normalize a single point.
    pub fn apply(&self, p: DVec2) -> DVec2 {
        (p - self.centroid) * self.scale
    }

    /// The normalization as a homogeneous 3x3 matrix.
    pub fn matrix(&self) -> DMat3 {
        let s = self.scale;
        DMat3::from_cols(
            DVec3::new(s, 0.0, 0.0),
            DVec3::new(0.0, s, 0.0),
            DVec3::new(-s * self.centroid.x, -s * self.centroid.y, 1.0),
        )
    }

    /// The inverse of [`PointNormalization::matrix`].
    pub fn inverse_matrix(&self) -> DMat3 {
        let s = 1.0 / self.scale;
        DMat3::from_cols(
            DVec3::new(s, 0.0, 0.0),
            DVec3::new(0.0, s, 0.0),
            DVec3::new(self.centroid.x, self.centroid.y, 1.0),
        )
    }
}
