use faer::Mat;
use glam::{DMat3, DVec2};
use warpkit_linalg::{lstsq::solve_lstsq, mat::mat3_to_rows, PointNormalization, RANK_TOLERANCE};

use super::validate_correspondences;
use crate::{
    error::GeometryError,
    transform::{AffineTransform, TransformFamily},
};

/// Fit an affine transform by linear least squares.
///
/// Both point sets are normalized first (see [`PointNormalization`]). The two
/// rows of the matrix share the design `[x y 1]`, so they are solved together
/// as one `n x 3` system with two right-hand sides through a QR decomposition,
/// then mapped back with `A = T_dst⁻¹ · A_n · T_src`.
///
/// # Arguments
///
/// * `src` - Source points, at least 3.
/// * `dst` - Destination points, same length as `src`.
///
/// # Errors
///
/// [`GeometryError::RankDeficient`] when the source points are collinear or
/// coincident.
pub fn estimate_affine(src: &[DVec2], dst: &[DVec2]) -> Result<AffineTransform, GeometryError> {
    validate_correspondences(src, dst, TransformFamily::Affine)?;

    let rank_deficient = |_| GeometryError::RankDeficient(TransformFamily::Affine);
    let src_norm = PointNormalization::from_points(src).map_err(rank_deficient)?;
    let dst_norm = PointNormalization::from_points(dst).map_err(rank_deficient)?;

    let n = src.len();
    let mut mat_a = Mat::<f64>::zeros(n, 3);
    let mut mat_b = Mat::<f64>::zeros(n, 2);
    for (i, (s, d)) in src.iter().zip(dst.iter()).enumerate() {
        let s = src_norm.apply(*s);
        let d = dst_norm.apply(*d);
        mat_a[(i, 0)] = s.x;
        mat_a[(i, 1)] = s.y;
        mat_a[(i, 2)] = 1.0;
        mat_b[(i, 0)] = d.x;
        mat_b[(i, 1)] = d.y;
    }

    let solution = solve_lstsq(mat_a.as_ref(), mat_b, RANK_TOLERANCE).map_err(|e| {
        log::debug!("affine design matrix rejected: {e}");
        rank_deficient(e)
    })?;
    let h = &solution.x;

    // column k of the solution holds row k of the normalized matrix
    let a_n = DMat3::from_cols_array(&[
        h[(0, 0)],
        h[(0, 1)],
        0.0,
        h[(1, 0)],
        h[(1, 1)],
        0.0,
        h[(2, 0)],
        h[(2, 1)],
        1.0,
    ]);
    let a = dst_norm.inverse_matrix() * a_n * src_norm.matrix();
    let rows = mat3_to_rows(&a);

    log::debug!(
        "fitted affine transform from {} correspondences, rcond={:e}",
        src.len(),
        solution.rcond
    );

    AffineTransform::from_matrix([rows[0], rows[1]])
}

impl AffineTransform {
    /// Fit an affine transform to point correspondences.
    ///
    /// See [`estimate_affine`].
    pub fn from_correspondences(src: &[DVec2], dst: &[DVec2]) -> Result<Self, GeometryError> {
        estimate_affine(src, dst)
    }
}
