//! Consistency checks shared by the optimizer.
//!
//! Every helper returns the first violation it finds as a typed
//! [`OptError`], so configuration mistakes and numerical breakdowns surface
//! with an index and a reason instead of as a silent `NaN` downstream.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// Reject a gradient-norm tolerance that is present but not finite and
/// strictly positive.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

/// Same rule as [`verify_tol_grad`] for the cost-change tolerance.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol {
        Some(tol) if !tol.is_finite() => {
            Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." })
        }
        Some(tol) if tol <= 0.0 => {
            Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." })
        }
        _ => Ok(()),
    }
}

/// Check that `grad` has length `dim` and only finite entries.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] on a length mismatch.
/// - [`OptError::InvalidGradient`] for the first `NaN`/`±∞` entry.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match grad.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(OptError::InvalidGradient {
            index,
            value: grad[index],
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Unwrap the solver's best parameter vector, insisting it exists and is
/// finite.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if argmin never recorded a best point.
/// - [`OptError::InvalidThetaHat`] for the first non-finite coordinate.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some(index) = theta.iter().position(|v| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value: theta[index],
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

/// A log-likelihood value may be any finite number (including the large
/// negative underflow sentinel), but never `NaN` or `±∞`.
pub fn validate_value(value: f64) -> OptResult<()> {
    if value.is_finite() { Ok(()) } else { Err(OptError::NonFiniteCost { value }) }
}

/// Check that `hessian` is `dim × dim` with finite entries.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] on a shape mismatch.
/// - [`OptError::InvalidHessian`] with the `(row, col)` of the first
///   non-finite entry.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    match hessian.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(OptError::InvalidHessian { row, col, value }),
        None => Ok(()),
    }
}
