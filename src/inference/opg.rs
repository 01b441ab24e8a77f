//! inference::opg: outer-product-of-gradients score covariance.
//!
//! Purpose
//! -------
//! Build the IID score covariance
//!
//! ```text
//! S = (1/n) Σ_i s_i s_iᵀ = (1/n) SᵀS,
//! ```
//!
//! from an `n×p` matrix of per-observation scores (rows = observations,
//! columns = parameters). `S` is the "meat" of the sandwich covariance in
//! `inference::hessian::calc_covariance`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations are independent, as in a cross-section; no lag terms are
//!   added.
//! - Scores are not centered. At an interior maximum the column means are
//!   zero up to optimizer tolerance.
//! - The result is on the average-score scale, matching the
//!   average-log-likelihood Hessian.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::Array2;

/// IID OPG covariance `(1/n) SᵀS` of the rows of `scores`.
///
/// # Errors
/// - [`InferenceError::EmptyScores`] if `scores` has no rows or columns.
/// - [`InferenceError::NonFiniteScore`] for the first NaN/±∞ entry in
///   row-major order.
///
/// # Example
/// ```rust
/// # use ndarray::array;
/// # use rust_frontier::inference::opg::calculate_opg_cov;
/// let scores = array![[1.0, 0.0], [-1.0, 2.0]];
/// let s = calculate_opg_cov(&scores)?;
/// assert_eq!(s, array![[1.0, -1.0], [-1.0, 2.0]]);
/// # Ok::<(), rust_frontier::inference::InferenceError>(())
/// ```
pub fn calculate_opg_cov(scores: &Array2<f64>) -> InferenceResult<Array2<f64>> {
    let (n, p) = scores.dim();
    if n == 0 || p == 0 {
        return Err(InferenceError::EmptyScores { rows: n, cols: p });
    }
    if let Some(((row, col), &value)) = scores.indexed_iter().find(|(_, v)| !v.is_finite()) {
        return Err(InferenceError::NonFiniteScore { row, col, value });
    }
    let mut cov = Array2::<f64>::zeros((p, p));
    cov.scaled_add(1.0 / n as f64, &scores.t().dot(scores));
    Ok(cov)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement with the explicit sum of outer products.
    // - Symmetry of the result.
    // - Rejection of empty and non-finite score matrices.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The OPG matrix equals the average of the row outer products.
    //
    // Given
    // -----
    // - A 3×2 score matrix.
    //
    // Expect
    // ------
    // - Entrywise agreement with `(1/n) Σ s_i s_iᵀ` and exact symmetry.
    fn opg_matches_average_outer_product() {
        // Arrange
        let scores = array![[1.0, 2.0], [3.0, 4.0], [-1.0, 0.5]];
        let mut expected = Array2::<f64>::zeros((2, 2));
        for row in scores.rows() {
            for a in 0..2 {
                for b in 0..2 {
                    expected[[a, b]] += row[a] * row[b] / 3.0;
                }
            }
        }

        // Act
        let cov = calculate_opg_cov(&scores).expect("finite scores");

        // Assert
        for (got, want) in cov.iter().zip(expected.iter()) {
            assert_relative_eq!(*got, *want, epsilon = 1e-12);
        }
        assert_eq!(cov[[0, 1]], cov[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // Degenerate inputs are errors, not panics or NaN matrices.
    //
    // Given
    // -----
    // - A 0×2 matrix and a matrix with an infinite entry at (1, 0).
    //
    // Expect
    // ------
    // - `EmptyScores` and `NonFiniteScore { row: 1, col: 0, .. }`.
    fn opg_rejects_empty_and_non_finite() {
        let empty = Array2::<f64>::zeros((0, 2));
        assert_eq!(
            calculate_opg_cov(&empty),
            Err(InferenceError::EmptyScores { rows: 0, cols: 2 })
        );

        let bad = array![[0.1, 0.2], [f64::INFINITY, 0.0]];
        assert!(matches!(
            calculate_opg_cov(&bad),
            Err(InferenceError::NonFiniteScore { row: 1, col: 0, .. })
        ));
    }
}
