#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Error types for the linear algebra module.
pub mod error;

/// Least squares and null space solvers.
pub mod lstsq;

/// 2x2 and 3x3 matrix helpers.
pub mod mat;

/// Isotropic point normalization.
pub mod points;

pub use error::LinalgError;
pub use lstsq::{null_vector, solve_lstsq, LstsqSolution, NullVector};
pub use points::PointNormalization;

pub use faer;

/// Relative singular value threshold below which a linear system is rank deficient.
///
/// A design matrix whose deciding singular value `s` and largest singular
/// value `s_max` satisfy `s <= RANK_TOLERANCE * s_max` is rejected.
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Threshold on the scale-normalized determinant below which a matrix is
/// treated as singular and cannot be inverted.
pub const SINGULAR_TOLERANCE: f64 = 1e-12;
