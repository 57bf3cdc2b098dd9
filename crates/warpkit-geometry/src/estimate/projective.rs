use faer::Mat;
use glam::{DMat3, DVec2};
use warpkit_linalg::{
    lstsq::null_vector,
    mat::{mat3_to_rows, normalized_determinant},
    PointNormalization, RANK_TOLERANCE, SINGULAR_TOLERANCE,
};

use super::validate_correspondences;
use crate::{
    error::GeometryError,
    transform::{ProjectiveTransform, TransformFamily},
};

/// Fit a projective transform (homography) with the normalized direct linear transform.
///
/// All nine entries are unknown. Each correspondence `(x, y) -> (u, v)`
/// contributes the two rows
///
/// ```text
/// [x y 1 0 0 0 -ux -uy -u] h = 0
/// [0 0 0 x y 1 -vx -vy -v] h = 0
/// ```
///
/// and `h` is the right singular vector of the smallest singular value of the
/// `2n x 9` design matrix built from the normalized point sets. No entry is
/// pinned, so homographies sending a point to infinity are fitted too.
///
/// # Arguments
///
/// * `src` - Source points, at least 4.
/// * `dst` - Destination points, same length as `src`.
///
/// # Errors
///
/// [`GeometryError::RankDeficient`] when the null space of the design matrix
/// is not one dimensional (collinear or duplicated points), or the fitted
/// matrix is singular.
pub fn estimate_projective(
    src: &[DVec2],
    dst: &[DVec2],
) -> Result<ProjectiveTransform, GeometryError> {
    validate_correspondences(src, dst, TransformFamily::Projective)?;

    let rank_deficient = |_| GeometryError::RankDeficient(TransformFamily::Projective);
    let src_norm = PointNormalization::from_points(src).map_err(rank_deficient)?;
    let dst_norm = PointNormalization::from_points(dst).map_err(rank_deficient)?;

    let mut mat_a = Mat::<f64>::zeros(2 * src.len(), 9);
    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let s = src_norm.apply(*s);
        let d = dst_norm.apply(*d);

        mat_a[(2 * i, 0)] = s.x;
        mat_a[(2 * i, 1)] = s.y;
        mat_a[(2 * i, 2)] = 1.0;
        mat_a[(2 * i, 6)] = -d.x * s.x;
        mat_a[(2 * i, 7)] = -d.x * s.y;
        mat_a[(2 * i, 8)] = -d.x;

        mat_a[(2 * i + 1, 3)] = s.x;
        mat_a[(2 * i + 1, 4)] = s.y;
        mat_a[(2 * i + 1, 5)] = 1.0;
        mat_a[(2 * i + 1, 6)] = -d.y * s.x;
        mat_a[(2 * i + 1, 7)] = -d.y * s.y;
        mat_a[(2 * i + 1, 8)] = -d.y;
    }

    let solution = null_vector(mat_a.as_ref(), RANK_TOLERANCE).map_err(|e| {
        log::debug!("projective design matrix rejected: {e}");
        rank_deficient(e)
    })?;
    let h = &solution.x;

    let h_n = DMat3::from_cols_array(&[h[0], h[3], h[6], h[1], h[4], h[7], h[2], h[5], h[8]]);

    // a one dimensional null space can still hold a homography that collapses the plane
    let det = normalized_determinant(&h_n);
    if det.abs() <= SINGULAR_TOLERANCE {
        log::debug!("fitted homography is singular, normalized determinant {det:e}");
        return Err(GeometryError::RankDeficient(TransformFamily::Projective));
    }

    let m = dst_norm.inverse_matrix() * h_n * src_norm.matrix();

    log::debug!(
        "fitted projective transform from {} correspondences, rcond={:e}",
        src.len(),
        solution.rcond
    );

    ProjectiveTransform::from_matrix(mat3_to_rows(&m))
}

impl ProjectiveTransform {
    /// Fit a homography to point correspondences.
    ///
    /// See [`estimate_projective`].
    pub fn from_correspondences(src: &[DVec2], dst: &[DVec2]) -> Result<Self, GeometryError> {
        estimate_projective(src, dst)
    }
}
