//! Helpers shared by the frontier model's fit and inference paths.
//!
//! - [`extract_theta`]: θ̂ of a fitted model or `ModelNotFitted`.
//! - [`contribution_scores`]: `n × p` per-observation scores `∂ℓ_i/∂θ_j` by
//!   central differences of `loglik_contributions`.
//! - [`calculate_scores`]: the same at θ̂.
//! - [`avg_neg_gradient`]: `∇(-ℓ̄)(θ)` as the negated column mean of the
//!   score matrix; this is the gradient map handed to the Hessian.
//!
//! Contributions are always evaluated with `debug = false`, so inference
//! does not flood the log with per-observation events.
use crate::{
    frontier::{
        core::{data::FrontierData, loglik::loglik_contributions},
        errors::{SFAError, SFAResult},
        models::sfa::FrontierModel,
    },
    optimization::{
        errors::OptResult,
        loglik_optimizer::{Theta, finite_diff::central_scores},
    },
};
use ndarray::{Array1, Array2, Axis};

/// θ̂ from the last successful `fit`.
///
/// # Errors
/// [`SFAError::ModelNotFitted`] before the first successful fit.
pub fn extract_theta(model: &FrontierModel) -> SFAResult<&Array1<f64>> {
    match model.results {
        Some(ref outcome) => Ok(&outcome.theta_hat),
        None => Err(SFAError::ModelNotFitted),
    }
}

/// Per-observation scores at an arbitrary θ.
///
/// # Errors
/// - Evaluator errors (dimensions, invalid parameters) at θ or at a
///   perturbed θ.
/// - [`SFAError::Inference`] if a score is not finite.
pub fn contribution_scores(
    model: &FrontierModel, theta: &Theta, data: &FrontierData,
) -> SFAResult<Array2<f64>> {
    let contributions = |t: &Theta| -> OptResult<Array1<f64>> {
        Ok(loglik_contributions(
            t.view(),
            data.y.view(),
            data.x.view(),
            model.dist,
            model.kind,
            false,
        )?)
    };
    central_scores(&contributions, theta).map_err(|err| match SFAError::from(err) {
        SFAError::OptimizationFailed { status } => SFAError::Inference { text: status },
        model_err => model_err,
    })
}

/// Per-observation scores at θ̂.
///
/// # Errors
/// [`SFAError::ModelNotFitted`], then as [`contribution_scores`].
pub fn calculate_scores(model: &FrontierModel, data: &FrontierData) -> SFAResult<Array2<f64>> {
    let theta_hat = extract_theta(model)?;
    contribution_scores(model, theta_hat, data)
}

/// Gradient of the negative average log-likelihood at θ.
///
/// Returns a vector of NaN when the scores cannot be formed, which the
/// Hessian validation downstream reports as an invalid Hessian.
pub fn avg_neg_gradient(
    model: &FrontierModel, theta: &Theta, data: &FrontierData,
) -> Array1<f64> {
    match contribution_scores(model, theta, data) {
        Ok(scores) => scores.sum_axis(Axis(0)) / -(data.n() as f64),
        Err(_) => Array1::from_elem(theta.len(), f64::NAN),
    }
}
