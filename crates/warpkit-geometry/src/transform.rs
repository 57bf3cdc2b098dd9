use glam::{DMat3, DVec2};
use warpkit_linalg::{
    mat::{invert_mat3, mat3_from_rows, mat3_to_rows, normalized_determinant},
    SINGULAR_TOLERANCE,
};

use crate::error::GeometryError;

/// Smallest homogeneous scale magnitude accepted when projecting a point.
///
/// Projective matrices are stored normalized (see
/// [`ProjectiveTransform::from_matrix`]), so this threshold is absolute.
pub const HOMOGENEOUS_EPSILON: f64 = 1e-12;

/// The transform families supported by the solver, ordered by generality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransformFamily {
    /// Uniform scale, rotation and translation (4 degrees of freedom).
    Similarity,
    /// General 2x3 linear map plus translation (6 degrees of freedom).
    Affine,
    /// Homography acting on homogeneous coordinates (8 degrees of freedom).
    Projective,
}

impl TransformFamily {
    /// Minimum number of correspondences needed to fit the family.
    pub fn min_points(&self) -> usize {
        match self {
            TransformFamily::Similarity => 2,
            TransformFamily::Affine => 3,
            TransformFamily::Projective => 4,
        }
    }

    /// Lowercase name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            TransformFamily::Similarity => "similarity",
            TransformFamily::Affine => "affine",
            TransformFamily::Projective => "projective",
        }
    }
}

impl std::fmt::Display for TransformFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Uniform scale, rotation and translation: `p' = s R(θ) p + t`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimilarityTransform {
    scale: f64,
    angle: f64,
    translation: DVec2,
}

impl SimilarityTransform {
    /// Create a similarity from its parameters.
    ///
    /// # Arguments
    ///
    /// * `scale` - Uniform scale factor.
    /// * `angle` - Rotation angle in radians.
    /// * `translation` - Translation applied after scaling and rotating.
    pub fn new(scale: f64, angle: f64, translation: DVec2) -> Result<Self, GeometryError> {
        if !scale.is_finite() || !angle.is_finite() || !translation.is_finite() {
            return Err(GeometryError::NonFiniteParameters);
        }
        Ok(Self {
            scale,
            angle,
            translation,
        })
    }

    /// The identity similarity.
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            angle: 0.0,
            translation: DVec2::ZERO,
        }
    }

    /// Uniform scale factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotation angle in radians.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Translation vector.
    pub fn translation(&self) -> DVec2 {
        self.translation
    }

    /// The transform as a homogeneous 3x3 matrix.
    pub fn to_mat3(&self) -> DMat3 {
        let (sin, cos) = self.angle.sin_cos();
        let (a, b) = (self.scale * cos, self.scale * sin);
        mat3_from_rows(&[
            [a, -b, self.translation.x],
            [b, a, self.translation.y],
            [0.0, 0.0, 1.0],
        ])
    }

    /// Map a point.
    pub fn project(&self, p: DVec2) -> DVec2 {
        self.scale * DVec2::from_angle(self.angle).rotate(p) + self.translation
    }

    /// The inverse similarity.
    ///
    /// # Errors
    ///
    /// Fails with [`GeometryError::SingularTransform`] when the scale vanishes.
    pub fn inverse(&self) -> Result<Self, GeometryError> {
        if normalized_determinant(&self.to_mat3()).abs() <= SINGULAR_TOLERANCE {
            return Err(GeometryError::SingularTransform(
                TransformFamily::Similarity,
            ));
        }
        let scale = 1.0 / self.scale;
        let angle = -self.angle;
        let translation = -scale * DVec2::from_angle(angle).rotate(self.translation);
        Ok(Self {
            scale,
            angle,
            translation,
        })
    }
}

/// A 2x3 affine map `p' = A p + t`, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform {
    rows: [[f64; 3]; 2],
}

impl AffineTransform {
    /// Create an affine transform from its row-major 2x3 matrix.
    pub fn from_matrix(rows: [[f64; 3]; 2]) -> Result<Self, GeometryError> {
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFiniteParameters);
        }
        Ok(Self { rows })
    }

    /// The identity affine transform.
    pub fn identity() -> Self {
        Self {
            rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        }
    }

    /// The row-major 2x3 matrix.
    pub fn rows(&self) -> &[[f64; 3]; 2] {
        &self.rows
    }

    /// The transform as a homogeneous 3x3 matrix.
    pub fn to_mat3(&self) -> DMat3 {
        mat3_from_rows(&[self.rows[0], self.rows[1], [0.0, 0.0, 1.0]])
    }

    /// Map a point.
    pub fn project(&self, p: DVec2) -> DVec2 {
        let m = &self.rows;
        DVec2::new(
            m[0][0] * p.x + m[0][1] * p.y + m[0][2],
            m[1][0] * p.x + m[1][1] * p.y + m[1][2],
        )
    }

    /// The inverse affine transform.
    ///
    /// # Errors
    ///
    /// Fails with [`GeometryError::SingularTransform`] when the linear part is
    /// singular.
    pub fn inverse(&self) -> Result<Self, GeometryError> {
        let inv = invert_mat3(&self.to_mat3(), SINGULAR_TOLERANCE)
            .map_err(|_| GeometryError::SingularTransform(TransformFamily::Affine))?;
        let rows = mat3_to_rows(&inv);
        Ok(Self {
            rows: [rows[0], rows[1]],
        })
    }
}

impl From<SimilarityTransform> for AffineTransform {
    fn from(sim: SimilarityTransform) -> Self {
        let rows = mat3_to_rows(&sim.to_mat3());
        Self {
            rows: [rows[0], rows[1]],
        }
    }
}

/// A homography acting on homogeneous coordinates, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProjectiveTransform {
    rows: [[f64; 3]; 3],
}

impl ProjectiveTransform {
    /// Create a projective transform from its row-major 3x3 matrix.
    ///
    /// The matrix is only defined up to scale; it is stored normalized so the
    /// bottom-right entry is `1`, or to unit Frobenius norm when that entry
    /// vanishes.
    pub fn from_matrix(rows: [[f64; 3]; 3]) -> Result<Self, GeometryError> {
        if rows.iter().flatten().any(|v| !v.is_finite()) {
            return Err(GeometryError::NonFiniteParameters);
        }
        Ok(Self {
            rows: normalize_homography(rows),
        })
    }

    /// The identity homography.
    pub fn identity() -> Self {
        Self {
            rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    /// The normalized row-major 3x3 matrix.
    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.rows
    }

    /// The transform as a 3x3 matrix.
    pub fn to_mat3(&self) -> DMat3 {
        mat3_from_rows(&self.rows)
    }

    /// Map a point, dividing by the homogeneous scale.
    ///
    /// # Errors
    ///
    /// Fails with [`GeometryError::DegenerateProjection`] when the homogeneous
    /// scale is within [`HOMOGENEOUS_EPSILON`] of zero.
    pub fn project(&self, p: DVec2) -> Result<DVec2, GeometryError> {
        let m = &self.rows;
        let w = m[2][0] * p.x + m[2][1] * p.y + m[2][2];
        if w.abs() <= HOMOGENEOUS_EPSILON || !w.is_finite() {
            return Err(GeometryError::DegenerateProjection { x: p.x, y: p.y, w });
        }
        Ok(DVec2::new(
            (m[0][0] * p.x + m[0][1] * p.y + m[0][2]) / w,
            (m[1][0] * p.x + m[1][1] * p.y + m[1][2]) / w,
        ))
    }

    /// The inverse homography.
    ///
    /// # Errors
    ///
    /// Fails with [`GeometryError::SingularTransform`] when the matrix is singular.
    pub fn inverse(&self) -> Result<Self, GeometryError> {
        let inv = invert_mat3(&self.to_mat3(), SINGULAR_TOLERANCE)
            .map_err(|_| GeometryError::SingularTransform(TransformFamily::Projective))?;
        Ok(Self {
            rows: normalize_homography(mat3_to_rows(&inv)),
        })
    }
}

impl From<AffineTransform> for ProjectiveTransform {
    fn from(affine: AffineTransform) -> Self {
        Self {
            rows: [affine.rows[0], affine.rows[1], [0.0, 0.0, 1.0]],
        }
    }
}

fn normalize_homography(mut rows: [[f64; 3]; 3]) -> [[f64; 3]; 3] {
    let h22 = rows[2][2];
    let norm = rows.iter().flatten().map(|v| v * v).sum::<f64>().sqrt();
    let divisor = if h22.abs() > HOMOGENEOUS_EPSILON * norm {
        h22
    } else {
        norm
    };
    if divisor != 0.0 {
        rows.iter_mut().flatten().for_each(|v| *v /= divisor);
    }
    rows
}

/// A fitted or constructed 2d transform.
///
/// The set of families is closed: callers dispatch on the variant rather than
/// through an open trait.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Transform {
    /// A similarity transform.
    Similarity(SimilarityTransform),
    /// An affine transform.
    Affine(AffineTransform),
    /// A projective transform.
    Projective(ProjectiveTransform),
}

impl Transform {
    /// The family of the transform.
    pub fn family(&self) -> TransformFamily {
        match self {
            Transform::Similarity(_) => TransformFamily::Similarity,
            Transform::Affine(_) => TransformFamily::Affine,
            Transform::Projective(_) => TransformFamily::Projective,
        }
    }

    /// The transform as a homogeneous 3x3 matrix.
    pub fn to_mat3(&self) -> DMat3 {
        match self {
            Transform::Similarity(t) => t.to_mat3(),
            Transform::Affine(t) => t.to_mat3(),
            Transform::Projective(t) => t.to_mat3(),
        }
    }

    /// Map a single point.
    ///
    /// Only projective transforms can fail, see [`ProjectiveTransform::project`].
    pub fn project(&self, p: impl Into<DVec2>) -> Result<DVec2, GeometryError> {
        let p = p.into();
        match self {
            Transform::Similarity(t) => Ok(t.project(p)),
            Transform::Affine(t) => Ok(t.project(p)),
            Transform::Projective(t) => t.project(p),
        }
    }

    /// Map an ordered batch of points, one output per input.
    ///
    /// The batch fails as a whole on the first point that cannot be projected;
    /// use [`Transform::project`] per point to handle failures individually.
    pub fn project_points(&self, points: &[DVec2]) -> Result<Vec<DVec2>, GeometryError> {
        points.iter().map(|p| self.project(*p)).collect()
    }

    /// The inverse transform, in the same family.
    pub fn inverse(&self) -> Result<Transform, GeometryError> {
        Ok(match self {
            Transform::Similarity(t) => Transform::Similarity(t.inverse()?),
            Transform::Affine(t) => Transform::Affine(t.inverse()?),
            Transform::Projective(t) => Transform::Projective(t.inverse()?),
        })
    }

    /// The transform applying `self` first and `next` second.
    ///
    /// The result belongs to the more general of the two families.
    pub fn then(&self, next: &Transform) -> Result<Transform, GeometryError> {
        if let (Transform::Similarity(a), Transform::Similarity(b)) = (self, next) {
            let translation = b.project(a.translation());
            return Ok(Transform::Similarity(SimilarityTransform::new(
                a.scale() * b.scale(),
                a.angle() + b.angle(),
                translation,
            )?));
        }

        let rows = mat3_to_rows(&(next.to_mat3() * self.to_mat3()));
        match self.family().max(next.family()) {
            TransformFamily::Projective => {
                Ok(Transform::Projective(ProjectiveTransform::from_matrix(rows)?))
            }
            _ => Ok(Transform::Affine(AffineTransform::from_matrix([
                rows[0], rows[1],
            ])?)),
        }
    }
}

impl From<SimilarityTransform> for Transform {
    fn from(t: SimilarityTransform) -> Self {
        Transform::Similarity(t)
    }
}

impl From<AffineTransform> for Transform {
    fn from(t: AffineTransform) -> Self {
        Transform::Affine(t)
    }
}

impl From<ProjectiveTransform> for Transform {
    fn from(t: ProjectiveTransform) -> Self {
        Transform::Projective(t)
    }
}
