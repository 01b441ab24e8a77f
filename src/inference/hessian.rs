//! inference::hessian: Hessian-based covariance and standard errors.
//!
//! Purpose
//! -------
//! Turn a finite-difference Hessian of the average log-likelihood into a
//! parameter covariance matrix, either classical (`J⁺`) or robust
//! (`J⁺ S J⁺`, the sandwich), where `J` is the observed information and `S`
//! a score covariance such as the OPG matrix from `inference::opg`.
//!
//! Key behaviors
//! -------------
//! - Call [`compute_hessian`] on the supplied gradient map to obtain
//!   `J(θ̂)`.
//! - Copy it into a `nalgebra::DMatrix` (`fill_dmatrix`) and form the
//!   Moore–Penrose pseudoinverse from a symmetric eigendecomposition.
//! - [`calc_standard_errors`] is the square root of the covariance
//!   diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - [`compute_hessian`] returns a finite, symmetric `p×p` matrix with
//!   `p = θ̂.len()`; this module does not re-symmetrize.
//! - The gradient map is for the **negative** average log-likelihood, so
//!   `J` is positive semi-definite at a maximum. Eigenvalues at or below
//!   [`EIGEN_EPS`] are dropped from the pseudoinverse, which zeroes
//!   variance along directions the data do not identify instead of
//!   dividing by noise.
//! - When provided, `scores` is a `p×p` score covariance on the
//!   average-score scale.
//!
//! Conventions
//! -----------
//! - Everything is on the average log-likelihood scale; the model layer
//!   divides by `n` to report covariances of the total.
//! - No explicit inverse is formed.
//! - Errors are reported via [`OptResult<T>`].
//!
//! Testing notes
//! -------------
//! - Unit tests cover the ndarray → nalgebra copy, analytic covariances of
//!   quadratic objectives, the sandwich with an inflated score covariance,
//!   and rank-deficient information.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::finite_diff::compute_hessian,
    numerical_stability::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Parameter covariance from observed information.
///
/// Parameters
/// ----------
/// - `f`: gradient map `θ ↦ ∇(-ℓ̄)(θ)` of the negative average
///   log-likelihood. A map that cannot be evaluated should return a
///   non-finite vector; the Hessian validation then reports it.
/// - `theta_hat`: the point `θ̂` of length `p`.
/// - `scores`: `None` for the classical covariance `J⁺`; `Some(S)` for
///   the sandwich `J⁺ S J⁺`.
///
/// Returns
/// -------
/// A symmetric `p×p` covariance matrix on the average scale.
///
/// Errors
/// ------
/// - Errors from [`compute_hessian`] (non-finite or misshaped Hessian).
/// - [`OptError::HessianDimMismatch`] if `S` is not `p×p`.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::{Array1, array};
/// # use rust_frontier::inference::hessian::calc_covariance;
/// // Quadratic with information A = diag(4, 1): covariance diag(1/4, 1).
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let f = |theta: &Array1<f64>| a.dot(theta);
/// let cov = calc_covariance(&f, &array![1.0, -1.0], None)?;
/// assert!((cov[[0, 0]] - 0.25).abs() < 1e-6);
/// # Ok::<(), rust_frontier::optimization::errors::OptError>(())
/// ```
pub fn calc_covariance<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>, scores: Option<&Array2<f64>>,
) -> OptResult<Array2<f64>> {
    let p = theta_hat.len();
    if let Some(s) = scores {
        if s.dim() != (p, p) {
            return Err(OptError::HessianDimMismatch { expected: p, found: s.dim() });
        }
    }
    let obs_info = compute_hessian(f, theta_hat)?;
    let mut obs_info_nalg = DMatrix::<f64>::zeros(p, p);
    fill_dmatrix(&obs_info, &mut obs_info_nalg);
    let j_pinv = pseudo_inverse(obs_info_nalg, p);
    match scores {
        Some(s) => Ok(j_pinv.dot(s).dot(&j_pinv)),
        None => Ok(j_pinv),
    }
}

/// Standard errors: square roots of the diagonal of [`calc_covariance`].
///
/// # Errors
/// Same as [`calc_covariance`].
pub fn calc_standard_errors<F: Fn(&Array1<f64>) -> Array1<f64>>(
    f: &F, theta_hat: &Array1<f64>, scores: Option<&Array2<f64>>,
) -> OptResult<Array1<f64>> {
    let cov = calc_covariance(f, theta_hat, scores)?;
    Ok(cov.diag().mapv(f64::sqrt))
}

// ---- Helper methods ----

/// Copy a square `ndarray` matrix into a preallocated `DMatrix` of the same
/// size, column by column.
fn fill_dmatrix(obs_info: &Array2<f64>, obs_info_nalg: &mut DMatrix<f64>) {
    let n = obs_info.ncols();
    for j in 0..n {
        for i in 0..n {
            obs_info_nalg[(i, j)] = obs_info[[i, j]];
        }
    }
}

/// `J⁺ = Σ_{k: λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k` from `J = Q Λ Qᵀ`.
fn pseudo_inverse(obs_info_nalg: DMatrix<f64>, p: usize) -> Array2<f64> {
    let eigen_decomp = obs_info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;
    let mut pinv = Array2::<f64>::zeros((p, p));
    for (k, &lambda) in eigenvals.iter().enumerate() {
        if lambda > EIGEN_EPS {
            for i in 0..p {
                let coeff = q[(i, k)] / lambda;
                for j in 0..p {
                    pinv[[i, j]] += coeff * q[(j, k)];
                }
            }
        }
    }
    pinv
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Correct copying of matrices from `ndarray` into `DMatrix`.
    // - Classical covariance and SEs for quadratic objectives with known
    //   information matrices.
    // - Sandwich covariance with an inflated score covariance.
    // - Rank-deficient information and a misshaped score covariance.
    //
    // They intentionally DO NOT cover:
    // - Frontier-model covariances (see the crate's integration tests).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `fill_dmatrix` copies entries without altering values.
    //
    // Given
    // -----
    // - A 2×2 matrix with distinct entries.
    //
    // Expect
    // ------
    // - Identical entries at every position of the `DMatrix`.
    fn fill_dmatrix_copies_ndarray_into_dmatrix_without_modification() {
        // Arrange
        let obs_info: Array2<f64> = array![[2.0, 0.5], [0.5, 1.0]];
        let mut obs_info_nalg = DMatrix::<f64>::zeros(2, 2);

        // Act
        fill_dmatrix(&obs_info, &mut obs_info_nalg);

        // Assert
        assert_eq!(obs_info_nalg[(0, 0)], 2.0);
        assert_eq!(obs_info_nalg[(0, 1)], 0.5);
        assert_eq!(obs_info_nalg[(1, 0)], 0.5);
        assert_eq!(obs_info_nalg[(1, 1)], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // The classical covariance is the inverse of a non-diagonal information
    // matrix, and SEs are the square roots of its diagonal.
    //
    // Given
    // -----
    // - Linear gradient map g(θ) = Aθ with A = [[2, 1], [1, 2]].
    //
    // Expect
    // ------
    // - cov ≈ A⁻¹ = [[2/3, -1/3], [-1/3, 2/3]]; SE ≈ √(2/3) for both.
    fn calc_covariance_inverts_information() {
        // Arrange
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let f = |theta: &Array1<f64>| -> Array1<f64> { a.dot(theta) };
        let theta_hat = array![0.3, -0.2];

        // Act
        let cov = calc_covariance(&f, &theta_hat, None).expect("finite Hessian");
        let se = calc_standard_errors(&f, &theta_hat, None).expect("finite Hessian");

        // Assert
        assert!((cov[[0, 0]] - 2.0 / 3.0).abs() < 1e-6);
        assert!((cov[[0, 1]] + 1.0 / 3.0).abs() < 1e-6);
        assert!((cov[[1, 0]] - cov[[0, 1]]).abs() < 1e-12);
        assert!((se[0] - (2.0_f64 / 3.0).sqrt()).abs() < 1e-6);
        assert!((se[1] - (2.0_f64 / 3.0).sqrt()).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // A score covariance larger than the information inflates robust SEs.
    //
    // Given
    // -----
    // - Identity information (g(θ) = θ) and S = 2 I.
    //
    // Expect
    // ------
    // - Classical SEs ≈ 1; robust SEs ≈ √2.
    fn sandwich_inflates_se_when_scores_are_larger() {
        // Arrange
        let f = |theta: &Array1<f64>| -> Array1<f64> { theta.clone() };
        let theta_hat = array![1.0, 2.0];
        let scores = array![[2.0, 0.0], [0.0, 2.0]];

        // Act
        let classical = calc_standard_errors(&f, &theta_hat, None).expect("ok");
        let robust = calc_standard_errors(&f, &theta_hat, Some(&scores)).expect("ok");

        // Assert
        let sqrt2 = 2.0_f64.sqrt();
        for i in 0..2 {
            assert!((classical[i] - 1.0).abs() < 1e-6);
            assert!((robust[i] - sqrt2).abs() < 1e-6);
            assert!(robust[i] > classical[i]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Flat directions are dropped from the pseudoinverse, and a misshaped
    // score covariance is rejected.
    //
    // Given
    // -----
    // - g(θ) = (θ_0, 0): information diag(1, 0).
    // - A 3×3 score covariance for a 2-parameter problem.
    //
    // Expect
    // ------
    // - cov ≈ diag(1, 0); `HessianDimMismatch { expected: 2, found: (3, 3) }`.
    fn rank_deficient_information_and_bad_scores() {
        let f = |theta: &Array1<f64>| -> Array1<f64> { array![theta[0], 0.0] };
        let theta_hat = array![0.5, 0.5];

        let cov = calc_covariance(&f, &theta_hat, None).expect("finite Hessian");
        assert!((cov[[0, 0]] - 1.0).abs() < 1e-6);
        assert!(cov[[1, 1]].abs() < 1e-12);

        let s = Array2::<f64>::eye(3);
        let err = calc_covariance(&f, &theta_hat, Some(&s)).expect_err("shape mismatch");
        assert_eq!(err, OptError::HessianDimMismatch { expected: 2, found: (3, 3) });
    }
}
