//! loglik_optimizer::finite_diff: numerical derivatives with validation.
//!
//! Purpose
//! -------
//! Frontier log-likelihoods have no analytic gradient in this crate, so
//! every derivative the optimizer and the inference layer need is numerical.
//! This module wraps `finitediff` with error capture, validation, and the
//! fallbacks that keep a single failed evaluation from poisoning a whole
//! derivative.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient of a scalar objective whose
//!   closure can report an error through a side channel.
//! - [`compute_hessian`]: central-difference Hessian of a gradient map,
//!   retried with forward differences when the central one is not finite,
//!   then symmetrized.
//! - [`central_scores`]: `n × p` matrix of per-observation score
//!   contributions `∂ℓ_i/∂θ_j`, the transposed `central_jacobian` of a
//!   vector-valued contribution map.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every matrix or vector returned here has passed the shape and
//!   finiteness checks in [`validation`](super::validation).
//! - [`central_scores`] uses the `finitediff` step `√ε` for every column.
//!
//! Downstream usage
//! ----------------
//! - The argmin adapter calls [`run_fd_diff`] when central differences of
//!   the cost fail.
//! - `inference::hessian` calls [`compute_hessian`] on the gradient of the
//!   average log-likelihood.
//! - `FrontierModel` calls [`central_scores`] on `loglik_contributions` to
//!   build OPG matrices for robust covariances.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use ndarray::{Array1, Array2};
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta`.
///
/// `func` must return `f64`, so callers route evaluation failures into
/// `closure_err` and return `NaN`. The cell is cleared on entry and
/// inspected afterwards.
///
/// # Errors
/// - The error captured in `closure_err`, converted into [`OptError`].
/// - [`OptError::InvalidGradient`] if any component is non-finite.
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Finite-difference Hessian of a gradient map `f` at `theta`.
///
/// Central differences first; if they produce a non-finite entry the forward
/// scheme is tried once. Whichever succeeds is symmetrized by averaging the
/// off-diagonal pairs.
///
/// # Errors
/// - [`OptError::InvalidHessian`] / [`OptError::HessianDimMismatch`] when
///   the forward fallback also fails validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

/// Per-observation score matrix by central differences.
///
/// `contributions(θ)` returns the length-`n` vector of log-likelihood
/// contributions `ℓ_i(θ)`. The Jacobian comes from
/// `FiniteDiff::central_jacobian` (shape `p × n`) and is returned
/// transposed, so row `i` holds `∂ℓ_i/∂θ`.
///
/// The closure handed to `finitediff` cannot fail, so the first error of a
/// perturbed evaluation is parked in a cell and the closure returns a `NaN`
/// vector of the base length; the cell is inspected after the sweep.
///
/// # Errors
/// - Any error returned by `contributions`.
/// - [`OptError::GradientDimMismatch`] if a perturbed evaluation changes
///   length.
/// - [`OptError::InvalidGradient`] for a non-finite score, reported with
///   the flat row-major index.
pub fn central_scores<F>(contributions: &F, theta: &Theta) -> OptResult<Array2<f64>>
where
    F: Fn(&Theta) -> OptResult<Array1<f64>>,
{
    let n = contributions(theta)?.len();
    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let eval = |t: &Theta| -> Array1<f64> {
        let failed = |err: OptError| {
            let mut slot = closure_err.borrow_mut();
            if slot.is_none() {
                *slot = Some(err);
            }
            Array1::from_elem(n, f64::NAN)
        };
        match contributions(t) {
            Ok(values) if values.len() == n => values,
            Ok(values) => {
                failed(OptError::GradientDimMismatch { expected: n, found: values.len() })
            }
            Err(err) => failed(err),
        }
    };
    let jacobian = theta.central_jacobian(&eval);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }

    let scores = jacobian.reversed_axes().as_standard_layout().into_owned();
    if let Some(index) = scores.iter().position(|v| !v.is_finite()) {
        return Err(OptError::InvalidGradient {
            index,
            value: scores.iter().nth(index).copied().unwrap_or(f64::NAN),
            reason: "Score contributions must be finite.",
        });
    }
    Ok(scores)
}

// ---- Helper methods ----

fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use argmin::core::ArgminError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward-difference gradients with and without a captured error.
    // - Hessian construction, fallback failure, and symmetrization.
    // - Per-observation central scores on a model with known derivatives.
    //
    // They intentionally DO NOT cover:
    // - Frontier-specific scores, which are exercised through
    //   `FrontierModel::covariance_matrix`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `run_fd_diff` recovers the gradient of a smooth quadratic.
    //
    // Given
    // -----
    // - f(θ) = θᵀθ at θ = (0, 1).
    //
    // Expect
    // ------
    // - Gradient ≈ (0, 2).
    fn run_fd_diff_recovers_quadratic_gradient() {
        // Arrange
        let theta: Theta = array![0.0, 1.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |x: &Theta| x.dot(x);

        // Act
        let grad = run_fd_diff(&theta, &f, &closure_err).expect("quadratic gradient");

        // Assert
        assert_relative_eq!(grad[0], 0.0, epsilon = 1e-6);
        assert_relative_eq!(grad[1], 2.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // An error raised inside the closure wins over the numeric result.
    //
    // Given
    // -----
    // - A closure that stores `ArgminError::NotImplemented` and returns NaN.
    //
    // Expect
    // ------
    // - `OptError::NotImplemented`.
    fn run_fd_diff_propagates_captured_error() {
        let theta: Theta = array![1.0];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let f = |_: &Theta| {
            closure_err
                .replace(Some(ArgminError::NotImplemented { text: "fd test".to_string() }.into()));
            f64::NAN
        };

        let err = run_fd_diff(&theta, &f, &closure_err).expect_err("captured error should surface");

        assert!(matches!(err, OptError::NotImplemented { .. }), "got {err:?}");
    }

    #[test]
    // Purpose
    // -------
    // `compute_hessian` returns a symmetric matrix for a linear gradient map
    // and fails cleanly when every entry is NaN.
    //
    // Given
    // -----
    // - g(θ) = Aθ with A = [[2, 1], [1, 4]]; and g(θ) = (NaN).
    //
    // Expect
    // ------
    // - Hessian ≈ A; `InvalidHessian` for the NaN map.
    fn compute_hessian_recovers_linear_map_and_rejects_nan() {
        let a = array![[2.0, 1.0], [1.0, 4.0]];
        let grad_fn = |theta: &Theta| a.dot(theta);
        let hess = compute_hessian(&grad_fn, &array![0.3, -0.7]).expect("finite Hessian");
        for ((i, j), v) in hess.indexed_iter() {
            assert_relative_eq!(*v, a[[i, j]], epsilon = 1e-6);
        }
        assert_eq!(hess[[0, 1]], hess[[1, 0]]);

        let nan_fn = |_: &Theta| array![f64::NAN];
        assert!(matches!(
            compute_hessian(&nan_fn, &array![0.0]),
            Err(OptError::InvalidHessian { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Averaging off-diagonal pairs leaves the diagonal alone.
    //
    // Given
    // -----
    // - [[1, 2], [0, 3]].
    //
    // Expect
    // ------
    // - [[1, 1], [1, 3]].
    fn symmetrize_hess_averages_off_diagonal() {
        let mut h: Hessian = array![[1.0, 2.0], [0.0, 3.0]];
        symmetrize_hess(&mut h);
        assert_eq!(h, array![[1.0, 1.0], [1.0, 3.0]]);
    }

    #[test]
    // Purpose
    // -------
    // `central_scores` reproduces analytic per-observation derivatives.
    //
    // Given
    // -----
    // - ℓ_i(θ) = -½ (x_i - θ_0)² · exp(θ_1) for x = (0, 1, 3), θ = (1, 0).
    //
    // Expect
    // ------
    // - Column 0 = (x_i - θ_0) e^{θ_1}, column 1 = ℓ_i(θ).
    fn central_scores_match_analytic_derivatives() {
        // Arrange
        let x = array![0.0, 1.0, 3.0];
        let contrib = |t: &Theta| -> OptResult<Array1<f64>> {
            Ok(x.mapv(|xi: f64| -0.5 * (xi - t[0]).powi(2) * t[1].exp()))
        };
        let theta = array![1.0, 0.0];

        // Act
        let scores = central_scores(&contrib, &theta).expect("finite scores");

        // Assert
        assert_eq!(scores.dim(), (3, 2));
        for (i, &xi) in x.iter().enumerate() {
            assert_relative_eq!(scores[[i, 0]], xi - 1.0, epsilon = 1e-6);
            assert_relative_eq!(scores[[i, 1]], -0.5 * (xi - 1.0_f64).powi(2), epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // Errors from the contribution map pass straight through.
    //
    // Given
    // -----
    // - A map that always fails with `NoTolerancesProvided`.
    //
    // Expect
    // ------
    // - The same error from `central_scores`.
    fn central_scores_propagate_evaluation_errors() {
        let failing = |_: &Theta| -> OptResult<Array1<f64>> { Err(OptError::NoTolerancesProvided) };
        assert_eq!(central_scores(&failing, &array![0.0]), Err(OptError::NoTolerancesProvided));
    }

    #[test]
    // Purpose
    // -------
    // A failure that only shows up at a perturbed θ is reported, not
    // swallowed into a NaN score.
    //
    // Given
    // -----
    // - A map that succeeds at θ = 0 but fails with `NoTolerancesProvided`
    //   once θ_0 > 0; and a map whose length changes away from θ = 0.
    //
    // Expect
    // ------
    // - `NoTolerancesProvided`; `GradientDimMismatch { expected: 2, found: 3 }`.
    fn central_scores_surface_perturbed_failures() {
        // Arrange
        let failing_up = |t: &Theta| -> OptResult<Array1<f64>> {
            if t[0] > 0.0 { Err(OptError::NoTolerancesProvided) } else { Ok(array![t[0], 1.0]) }
        };
        let resizing = |t: &Theta| -> OptResult<Array1<f64>> {
            if t[0] == 0.0 { Ok(array![0.0, 0.0]) } else { Ok(array![t[0], t[0], t[0]]) }
        };

        // Act
        let first = central_scores(&failing_up, &array![0.0]);
        let second = central_scores(&resizing, &array![0.0]);

        // Assert
        assert_eq!(first, Err(OptError::NoTolerancesProvided));
        assert_eq!(second, Err(OptError::GradientDimMismatch { expected: 2, found: 3 }));
    }
}
