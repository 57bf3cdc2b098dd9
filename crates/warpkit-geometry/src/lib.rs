#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the geometry module.
pub mod error;

/// Transform estimation from point correspondences.
pub mod estimate;

/// Rotation canvas planning.
pub mod rotation;

/// Similarity, affine and projective transform models.
pub mod transform;

pub use error::{ErrorKind, GeometryError};
pub use estimate::{estimate_affine, estimate_projective, estimate_similarity, estimate_transform};
pub use rotation::{plan_rotation, RotationPlan, MAX_ANGLE};
pub use transform::{
    AffineTransform, ProjectiveTransform, SimilarityTransform, Transform, TransformFamily,
    HOMOGENEOUS_EPSILON,
};

pub use glam;

/// A 2d point with double precision coordinates.
pub type Point2d = glam::DVec2;
