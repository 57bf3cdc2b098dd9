use thiserror::Error;

use crate::transform::TransformFamily;

/// Failure categories shared by every error surfaced from the core.
///
/// A binding layer maps these to its own exception types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed call-time arguments, detected before any numerical work.
    Validation,
    /// The linear system of a transform family is singular or ill-conditioned.
    RankDeficient,
    /// A transform cannot be inverted.
    SingularTransform,
    /// A per-point numerical failure, e.g. a vanishing homogeneous scale.
    Computation,
}

/// Errors raised while estimating, inverting or applying transforms.
#[derive(Error, Debug, PartialEq)]
pub enum GeometryError {
    /// Source and destination lists differ in length.
    #[error("source and destination point lists must have the same length, got {0} and {1}")]
    MismatchedLengths(usize, usize),

    /// Fewer correspondences than the family needs.
    #[error("{family} transform requires at least {required} point correspondences, got {actual}")]
    NotEnoughPoints {
        /// The transform family being fitted.
        family: TransformFamily,
        /// Minimum number of correspondences.
        required: usize,
        /// Number of correspondences provided.
        actual: usize,
    },

    /// A point holds NaN or infinite coordinates.
    #[error("point at index {0} has a non-finite coordinate")]
    NonFinitePoint(usize),

    /// Transform parameters hold NaN or infinite values.
    #[error("transform parameters must be finite numbers")]
    NonFiniteParameters,

    /// The rotation angle is NaN, infinite or beyond single-precision range.
    #[error("Angle must be a finite number representable in single precision, got {0}")]
    InvalidAngle(f64),

    /// The correspondence system is rank deficient.
    #[error("{0} transform is rank deficient: the point correspondences do not determine it")]
    RankDeficient(TransformFamily),

    /// The transform has no inverse.
    #[error("{0} transform is singular and cannot be inverted")]
    SingularTransform(TransformFamily),

    /// The homogeneous scale of a projected point vanished.
    #[error("homogeneous scale {w:e} is too close to zero when projecting ({x}, {y})")]
    DegenerateProjection {
        /// Input x coordinate.
        x: f64,
        /// Input y coordinate.
        y: f64,
        /// Homogeneous scale after mapping.
        w: f64,
    },
}

impl GeometryError {
    /// The failure category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GeometryError::MismatchedLengths(..)
            | GeometryError::NotEnoughPoints { .. }
            | GeometryError::NonFinitePoint(_)
            | GeometryError::NonFiniteParameters
            | GeometryError::InvalidAngle(_) => ErrorKind::Validation,
            GeometryError::RankDeficient(_) => ErrorKind::RankDeficient,
            GeometryError::SingularTransform(_) => ErrorKind::SingularTransform,
            GeometryError::DegenerateProjection { .. } => ErrorKind::Computation,
        }
    }
}
