use faer::{prelude::SpSolverLstsq, Mat, MatRef};

use crate::error::LinalgError;

/// Result of a least squares solve.
#[derive(Debug, Clone)]
pub struct LstsqSolution {
    /// The minimizer `x` of `‖A x - b‖²`, one column per right-hand side.
    pub x: Mat<f64>,
    /// Ratio between the smallest and largest singular value of `A`.
    pub rcond: f64,
}

/// Result of a homogeneous solve `A x = 0`.
#[derive(Debug, Clone, PartialEq)]
pub struct NullVector {
    /// Unit vector minimizing `‖A x‖`.
    pub x: Vec<f64>,
    /// Ratio between the second smallest and the largest singular value of `A`.
    ///
    /// The null space is one dimensional only when this is well above zero.
    pub rcond: f64,
}

/// Singular values of `a` padded with zeros to `a.ncols()`, largest first.
///
/// A wide matrix has `ncols - nrows` trivial zero singular values that the
/// decomposition does not report.
fn padded_singular_values(a: MatRef<'_, f64>) -> Result<Vec<f64>, LinalgError> {
    let finite = (0..a.ncols()).all(|j| (0..a.nrows()).all(|i| a[(i, j)].is_finite()));
    if !finite {
        return Err(LinalgError::NonFinite);
    }
    let mut s = a.singular_values();
    s.resize(a.ncols(), 0.0);
    s.sort_by(|x, y| y.total_cmp(x));
    Ok(s)
}

fn ratio(num: f64, den: f64) -> f64 {
    if den > 0.0 {
        num / den
    } else {
        0.0
    }
}

/// Solve the overdetermined system `A x = b` in the least squares sense.
///
/// The solve uses a QR decomposition of `A`. The system is rejected first when
/// the smallest singular value of `A` is not larger than `tolerance` times the
/// largest one, so a rank deficient `A` never produces a solution.
///
/// # Arguments
///
/// * `a` - The design matrix, at least as many rows as columns.
/// * `b` - The right-hand sides, one per column, with `a.nrows()` rows.
/// * `tolerance` - Relative singular value threshold, see [`crate::RANK_TOLERANCE`].
///
/// # Example
///
/// ```
/// use warpkit_linalg::{faer, lstsq::solve_lstsq, RANK_TOLERANCE};
///
/// // fit y = m x + c through three points on y = 2x + 1
/// let a = faer::mat![[0.0, 1.0], [1.0, 1.0], [2.0, 1.0]];
/// let b = faer::mat![[1.0], [3.0], [5.0]];
/// let solution = solve_lstsq(a.as_ref(), b, RANK_TOLERANCE).unwrap();
/// assert!((solution.x[(0, 0)] - 2.0).abs() < 1e-12);
/// assert!((solution.x[(1, 0)] - 1.0).abs() < 1e-12);
/// ```
pub fn solve_lstsq(
    a: MatRef<'_, f64>,
    b: Mat<f64>,
    tolerance: f64,
) -> Result<LstsqSolution, LinalgError> {
    if a.nrows() < a.ncols() {
        return Err(LinalgError::RankDeficient {
            rcond: 0.0,
            tolerance,
        });
    }

    let s = padded_singular_values(a)?;
    let rcond = match (s.first(), s.last()) {
        (Some(max), Some(min)) => ratio(*min, *max),
        _ => 0.0,
    };
    if rcond <= tolerance {
        return Err(LinalgError::RankDeficient { rcond, tolerance });
    }

    let x = a.qr().solve_lstsq(b);
    Ok(LstsqSolution { x, rcond })
}

/// Find the unit vector spanning the null space of `A`.
///
/// The right singular vector of the smallest singular value minimizes `‖A x‖`
/// over unit vectors. The system is rejected when the second smallest singular
/// value is not larger than `tolerance` times the largest one: the null space
/// then has more than one dimension and the vector is not determined.
///
/// # Arguments
///
/// * `a` - The design matrix with at least `a.ncols() - 1` rows.
/// * `tolerance` - Relative singular value threshold, see [`crate::RANK_TOLERANCE`].
///
/// # Example
///
/// ```
/// use warpkit_linalg::{faer, lstsq::null_vector, RANK_TOLERANCE};
///
/// // solutions of x = y, z = 0
/// let a = faer::mat![[1.0, -1.0, 0.0], [2.0, -2.0, 1.0]];
/// let solution = null_vector(a.as_ref(), RANK_TOLERANCE).unwrap();
/// assert!((solution.x[0] - solution.x[1]).abs() < 1e-12);
/// assert!(solution.x[2].abs() < 1e-12);
/// ```
pub fn null_vector(a: MatRef<'_, f64>, tolerance: f64) -> Result<NullVector, LinalgError> {
    let n = a.ncols();
    if n < 2 || a.nrows() + 1 < n {
        return Err(LinalgError::RankDeficient {
            rcond: 0.0,
            tolerance,
        });
    }

    let s = padded_singular_values(a)?;
    let rcond = ratio(s[n - 2], s[0]);
    if rcond <= tolerance {
        return Err(LinalgError::RankDeficient { rcond, tolerance });
    }

    // a wide matrix needs the full decomposition to expose its null space
    let x = if a.nrows() >= n {
        let svd = a.thin_svd();
        let v = svd.v().col(n - 1);
        (0..n).map(|i| v[i]).collect()
    } else {
        let svd = a.svd();
        let v = svd.v().col(n - 1);
        (0..n).map(|i| v[i]).collect()
    };

    Ok(NullVector { x, rcond })
}
