use thiserror::Error;

/// Errors raised by the linear algebra primitives.
#[derive(Error, Debug, PartialEq)]
pub enum LinalgError {
    /// The system matrix is singular or too ill-conditioned to solve.
    #[error("matrix is rank deficient: singular value ratio {rcond:e} is below tolerance {tolerance:e}")]
    RankDeficient {
        /// Observed singular value ratio.
        rcond: f64,
        /// Relative tolerance the ratio was compared against.
        tolerance: f64,
    },

    /// The matrix cannot be inverted.
    #[error("matrix is singular (determinant {0:e})")]
    Singular(f64),

    /// The input contains NaN or infinite values.
    #[error("matrix contains non-finite values")]
    NonFinite,

    /// Not enough points to compute a normalization.
    #[error("at least one point is required")]
    EmptyInput,
}
