//! # Transform estimation
//!
//! Fitting transforms from ordered point correspondences: index `i` of the
//! source list maps to index `i` of the destination list.
//!
//! - [`estimate_similarity`]: closed form from the 2x2 cross-covariance (Umeyama), 2+ points
//! - [`estimate_affine`]: QR least squares over the 6 matrix entries, 3+ points
//! - [`estimate_projective`]: direct linear transform, SVD null vector of the 9 entries, 4+ points
//!
//! Every family rejects degenerate configurations with
//! [`GeometryError::RankDeficient`] instead of returning unusable parameters.

use glam::DVec2;

use crate::{
    error::GeometryError,
    transform::{Transform, TransformFamily},
};

mod affine;
pub use affine::*;

mod projective;
pub use projective::*;

mod similarity;
pub use similarity::*;

/// Fit a transform of the given family to the correspondences.
///
/// # Example
///
/// ```
/// use warpkit_geometry::{estimate_transform, Point2d, TransformFamily};
///
/// let src = [Point2d::new(0.0, 0.0), Point2d::new(10.0, 0.0)];
/// let dst = [Point2d::new(5.0, 5.0), Point2d::new(15.0, 5.0)];
/// let t = estimate_transform(TransformFamily::Similarity, &src, &dst).unwrap();
/// let p = t.project((5.0, 0.0)).unwrap();
/// assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 5.0).abs() < 1e-9);
/// ```
pub fn estimate_transform(
    family: TransformFamily,
    src: &[DVec2],
    dst: &[DVec2],
) -> Result<Transform, GeometryError> {
    Ok(match family {
        TransformFamily::Similarity => Transform::Similarity(estimate_similarity(src, dst)?),
        TransformFamily::Affine => Transform::Affine(estimate_affine(src, dst)?),
        TransformFamily::Projective => Transform::Projective(estimate_projective(src, dst)?),
    })
}

/// Check the call-time contract shared by all families.
pub(crate) fn validate_correspondences(
    src: &[DVec2],
    dst: &[DVec2],
    family: TransformFamily,
) -> Result<(), GeometryError> {
    if src.len() != dst.len() {
        return Err(GeometryError::MismatchedLengths(src.len(), dst.len()));
    }

    if src.len() < family.min_points() {
        return Err(GeometryError::NotEnoughPoints {
            family,
            required: family.min_points(),
            actual: src.len(),
        });
    }

    if let Some(i) = src
        .iter()
        .zip(dst.iter())
        .position(|(s, d)| !s.is_finite() || !d.is_finite())
    {
        return Err(GeometryError::NonFinitePoint(i));
    }

    Ok(())
}
