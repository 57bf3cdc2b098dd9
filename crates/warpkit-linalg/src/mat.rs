use glam::{DMat2, DMat3, DVec3};

use crate::error::LinalgError;

/// Build a matrix from row-major rows.
pub fn mat3_from_rows(rows: &[[f64; 3]; 3]) -> DMat3 {
    DMat3::from_cols(
        DVec3::new(rows[0][0], rows[1][0], rows[2][0]),
        DVec3::new(rows[0][1], rows[1][1], rows[2][1]),
        DVec3::new(rows[0][2], rows[1][2], rows[2][2]),
    )
}

/// Return the row-major rows of a matrix.
pub fn mat3_to_rows(m: &DMat3) -> [[f64; 3]; 3] {
    [
        m.row(0).to_array(),
        m.row(1).to_array(),
        m.row(2).to_array(),
    ]
}

/// Determinant divided by the product of the row norms (Hadamard ratio).
///
/// The ratio lies in `[-1, 1]` and does not depend on the scale of the matrix
/// or of any single row, so a homogeneous matrix known only up to scale gets
/// the same answer for every representative.
pub fn normalized_determinant(m: &DMat3) -> f64 {
    let norms = m.row(0).length() * m.row(1).length() * m.row(2).length();
    if norms == 0.0 || !norms.is_finite() {
        return 0.0;
    }
    m.determinant() / norms
}

/// Singular values `(σ1, σ2)` of a 2x2 matrix, largest first.
///
/// Closed form from the Frobenius norm and the determinant:
/// `σ1² + σ2² = ‖M‖²` and `σ1 σ2 = |det M|`.
pub fn singular_values2(m: &DMat2) -> (f64, f64) {
    let frob2 = m.x_axis.length_squared() + m.y_axis.length_squared();
    let det = m.determinant().abs();
    let disc = (frob2 * frob2 - 4.0 * det * det).max(0.0).sqrt();
    let s1 = ((frob2 + disc) / 2.0).max(0.0).sqrt();
    let s2 = if s1 > 0.0 { det / s1 } else { 0.0 };
    (s1, s2)
}

/// Invert a 3x3 matrix, rejecting it when it is singular within `tolerance`.
///
/// # Errors
///
/// Returns [`LinalgError::Singular`] when [`normalized_determinant`] is not
/// larger than `tolerance` in magnitude, and [`LinalgError::NonFinite`] when
/// the input holds NaN or infinite values.
pub fn invert_mat3(m: &DMat3, tolerance: f64) -> Result<DMat3, LinalgError> {
    if !m.is_finite() {
        return Err(LinalgError::NonFinite);
    }
    let det = normalized_determinant(m);
    if det.abs() <= tolerance {
        return Err(LinalgError::Singular(m.determinant()));
    }
    Ok(m.inverse())
}
