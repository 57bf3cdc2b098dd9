use glam::{DMat2, DVec2};
use warpkit_linalg::{mat::singular_values2, PointNormalization, RANK_TOLERANCE};

use super::validate_correspondences;
use crate::{
    error::GeometryError,
    transform::{SimilarityTransform, TransformFamily},
};

/// Fit a similarity transform (uniform scale, rotation, translation) in closed form.
///
/// Minimizes the total squared distance between the mapped source points and
/// the destination points (Umeyama, restricted to proper rotations):
///
/// 1. center both sets and scale them to unit spread (see [`PointNormalization`]),
/// 2. build the 2x2 cross-covariance `Σ = 1/n Σ dᵢ sᵢᵀ` of the normalized points,
/// 3. the optimal rotation angle is `atan2(Σ₁₀ - Σ₀₁, Σ₀₀ + Σ₁₁)`,
/// 4. the scale is the ratio of the correlated spread to the source variance,
///    mapped back through both normalizations.
///
/// The rank checks only see the normalized points, so a point set far from
/// the origin is judged like the same set near it.
///
/// # Arguments
///
/// * `src` - Source points, at least 2.
/// * `dst` - Destination points, same length as `src`.
///
/// # Errors
///
/// [`GeometryError::RankDeficient`] when either point set collapses to a
/// single point or the cross-covariance vanishes, plus the validation errors
/// of the input contract.
pub fn estimate_similarity(
    src: &[DVec2],
    dst: &[DVec2],
) -> Result<SimilarityTransform, GeometryError> {
    validate_correspondences(src, dst, TransformFamily::Similarity)?;

    let rank_deficient = |_| GeometryError::RankDeficient(TransformFamily::Similarity);
    let src_norm = PointNormalization::from_points(src).map_err(rank_deficient)?;
    let dst_norm = PointNormalization::from_points(dst).map_err(rank_deficient)?;

    let n = src.len() as f64;
    let mut sigma = DMat2::ZERO;
    let mut var_src = 0.0;
    let mut var_dst = 0.0;
    for (s, d) in src.iter().zip(dst.iter()) {
        let a = src_norm.apply(*s);
        let b = dst_norm.apply(*d);
        // outer product b aᵀ, column major
        sigma += DMat2::from_cols(b * a.x, b * a.y);
        var_src += a.length_squared();
        var_dst += b.length_squared();
    }
    sigma *= 1.0 / n;
    var_src /= n;
    var_dst /= n;

    // a set with spread is scaled to variance >= 2, a collapsed one stays near 0
    if var_src <= RANK_TOLERANCE || var_dst <= RANK_TOLERANCE {
        return Err(GeometryError::RankDeficient(TransformFamily::Similarity));
    }

    let (s_max, _) = singular_values2(&sigma);
    if s_max <= RANK_TOLERANCE * (var_src * var_dst).sqrt() {
        return Err(GeometryError::RankDeficient(TransformFamily::Similarity));
    }

    let dot = sigma.x_axis.x + sigma.y_axis.y;
    let cross = sigma.x_axis.y - sigma.y_axis.x;
    let angle = cross.atan2(dot);
    let scale = dot.hypot(cross) / var_src * src_norm.scale / dst_norm.scale;
    let translation =
        dst_norm.centroid - scale * DVec2::from_angle(angle).rotate(src_norm.centroid);

    log::debug!(
        "fitted similarity transform from {} correspondences: scale={scale:.6} angle={angle:.6}",
        src.len()
    );

    SimilarityTransform::new(scale, angle, translation)
}

impl SimilarityTransform {
    /// Fit a similarity transform to point correspondences.
    ///
    /// See [`estimate_similarity`].
    pub fn from_correspondences(src: &[DVec2], dst: &[DVec2]) -> Result<Self, GeometryError> {
        estimate_similarity(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::Rng;

    fn assert_point_eq(a: DVec2, b: DVec2, eps: f64) {
        assert_relative_eq!(a.x, b.x, epsilon = eps);
        assert_relative_eq!(a.y, b.y, epsilon = eps);
    }

    #[test]
    fn similarity_translation() -> Result<(), GeometryError> {
        let src = [DVec2::new(0.0, 0.0), DVec2::new(10.0, 0.0)];
        let dst = [DVec2::new(5.0, 5.0), DVec2::new(15.0, 5.0)];
        let sim = estimate_similarity(&src, &dst)?;

        assert_relative_eq!(sim.scale(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(sim.angle(), 0.0, epsilon = 1e-12);
        assert_point_eq(sim.translation(), DVec2::new(5.0, 5.0), 1e-12);
        assert_point_eq(sim.project(DVec2::new(5.0, 0.0)), DVec2::new(10.0, 5.0), 1e-12);
        Ok(())
    }

    #[test]
    fn similarity_far_from_origin() -> Result<(), GeometryError> {
        // map-style coordinates, same geometry as the translation case
        let src = [DVec2::new(5e5, 4e6), DVec2::new(500_010.0, 4e6)];
        let dst = [DVec2::new(500_005.0, 4_000_005.0), DVec2::new(500_015.0, 4_000_005.0)];
        let sim = estimate_similarity(&src, &dst)?;
        assert_relative_eq!(sim.scale(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(sim.angle(), 0.0, epsilon = 1e-9);
        assert_point_eq(sim.project(src[1]), dst[1], 1e-6);

        // one pixel apart
        let src = [DVec2::new(1e5, 1e5), DVec2::new(100_001.0, 1e5)];
        let dst = [DVec2::new(1e5, 1e5), DVec2::new(1e5, 100_001.0)];
        let sim = estimate_similarity(&src, &dst)?;
        assert_relative_eq!(sim.scale(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(sim.angle(), std::f64::consts::FRAC_PI_2, epsilon = 1e-6);
        assert_point_eq(sim.project(src[1]), dst[1], 1e-6);
        Ok(())
    }

    #[test]
    fn similarity_far_duplicates_rank_deficient() {
        let src = [DVec2::new(5e5, 4e6); 3];
        let dst = [
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(0.0, 1.0),
        ];
        assert_eq!(
            estimate_similarity(&src, &dst),
            Err(GeometryError::RankDeficient(TransformFamily::Similarity))
        );
    }

    #[test]
    fn similarity_recovers_parameters() -> Result<(), GeometryError> {
        let truth = SimilarityTransform::new(1.7, 0.6, DVec2::new(-3.0, 12.0))?;
        let src = [
            DVec2::new(0.0, 0.0),
            DVec2::new(4.0, 1.0),
            DVec2::new(-2.0, 7.0),
            DVec2::new(9.0, -5.0),
        ];
        let dst = src.map(|p| truth.project(p));
        let sim = estimate_similarity(&src, &dst)?;

        assert_relative_eq!(sim.scale(), 1.7, epsilon = 1e-9);
        assert_relative_eq!(sim.angle(), 0.6, epsilon = 1e-9);
        for (s, d) in src.iter().zip(dst.iter()) {
            assert_point_eq(sim.project(*s), *d, 1e-9);
        }
        Ok(())
    }

    #[test]
    fn similarity_overdetermined_noisy() -> Result<(), GeometryError> {
        let mut rng = rand::rng();
        let truth = SimilarityTransform::new(0.8, -1.2, DVec2::new(40.0, 2.0))?;
        let src = (0..50)
            .map(|i| DVec2::new((i % 10) as f64 * 7.0, (i / 10) as f64 * 11.0))
            .collect::<Vec<_>>();
        let dst = src
            .iter()
            .map(|p| {
                truth.project(*p)
                    + DVec2::new(rng.random_range(-0.01..0.01), rng.random_range(-0.01..0.01))
            })
            .collect::<Vec<_>>();

        let sim = estimate_similarity(&src, &dst)?;
        assert_relative_eq!(sim.scale(), 0.8, epsilon = 1e-3);
        assert_relative_eq!(sim.angle(), -1.2, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn similarity_duplicate_points_rank_deficient() {
        let src = [DVec2::new(0.0, 0.0), DVec2::new(0.0, 0.0)];
        let dst = [DVec2::new(1.0, 1.0), DVec2::new(1.0, 1.0)];
        assert_eq!(
            estimate_similarity(&src, &dst),
            Err(GeometryError::RankDeficient(TransformFamily::Similarity))
        );
    }

    #[test]
    fn similarity_collapsed_destination_rank_deficient() {
        let src = [DVec2::new(0.0, 0.0), DVec2::new(3.0, 1.0)];
        let dst = [DVec2::new(2.0, 2.0), DVec2::new(2.0, 2.0)];
        assert_eq!(
            SimilarityTransform::from_correspondences(&src, &dst),
            Err(GeometryError::RankDeficient(TransformFamily::Similarity))
        );
    }
}
