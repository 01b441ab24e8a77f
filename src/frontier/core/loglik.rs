//! Cross-sectional stochastic frontier log-likelihood.
//!
//! Purpose
//! -------
//! Evaluate `ℓ(θ) = Σ_i ln f(ε_i)` for the composed-error model
//! `y_i = x_iβ + v_i - s·u_i` given raw arrays, a distribution selector, and a
//! debug flag. This is the numeric core every other part of the crate is
//! built on: model fitting maximizes it, inference differentiates it, and the
//! Python `ll_cs` entry point returns it directly.
//!
//! Key behaviors
//! -------------
//! - Fail fast, before any arithmetic, on misaligned or empty arrays
//!   ([`SFAError::DimensionMismatch`], [`SFAError::EmptyData`]) and on
//!   parameters whose scales do not map to finite positive values
//!   ([`SFAError::InvalidParameter`]).
//! - Per observation: residual `e_i = y_i - x_iβ`, oriented error
//!   `ε_i = s·e_i`, log density from [`DensityKernel`].
//! - A non-finite log density is replaced by [`LOG_DENSITY_SENTINEL`] and
//!   counted; the returned value is therefore always finite.
//! - With `debug = true`, per-observation and summary diagnostics are
//!   emitted as `tracing` events on the `rust_frontier::loglik` target.
//!
//! Invariants & assumptions
//! ------------------------
//! - Pure and deterministic: no shared state, and the accumulation order is
//!   fixed, so identical inputs give bit-identical output with `debug` on or
//!   off.
//! - [`log_likelihood_with_kind`] is exactly the sum of
//!   [`loglik_contributions`].
//!
//! Downstream usage
//! ----------------
//! - `FrontierModel::value` evaluates this with the fitted data.
//! - Robust covariances difference [`loglik_contributions`] to obtain
//!   per-observation scores.
use crate::frontier::{
    core::{
        data::check_dimensions, inefficiency::DensityKernel, inefficiency::InefficiencyDist,
        orientation::FrontierKind, params::FrontierParams,
    },
    errors::{SFAError, SFAResult},
};
use ndarray::{Array1, ArrayView1, ArrayView2};
use tracing::{debug, warn};

/// Value substituted for a non-finite per-observation log density.
///
/// Large enough to dominate any genuine contribution, small enough that a
/// sum over millions of observations stays finite.
pub const LOG_DENSITY_SENTINEL: f64 = -1e10;

/// Log-likelihood of a production frontier.
///
/// Shorthand for [`log_likelihood_with_kind`] with
/// [`FrontierKind::Production`].
///
/// # Errors
/// See [`loglik_contributions`].
pub fn log_likelihood(
    params: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>, x: ArrayView2<'_, f64>,
    dist: InefficiencyDist, debug: bool,
) -> SFAResult<f64> {
    log_likelihood_with_kind(params, y, x, dist, FrontierKind::Production, debug)
}

/// Log-likelihood `ℓ(θ)` for either frontier orientation.
///
/// # Errors
/// See [`loglik_contributions`].
pub fn log_likelihood_with_kind(
    params: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>, x: ArrayView2<'_, f64>,
    dist: InefficiencyDist, kind: FrontierKind, debug: bool,
) -> SFAResult<f64> {
    let contributions = loglik_contributions(params, y, x, dist, kind, debug)?;
    let total = contributions.sum();
    if debug {
        debug!(
            target: "rust_frontier::loglik",
            n = y.len(),
            dist = %dist,
            kind = %kind,
            loglik = total,
            "log-likelihood evaluated"
        );
    }
    Ok(total)
}

/// Per-observation log densities `ln f(ε_i)` after sentinel substitution.
///
/// Parameters
/// ----------
/// - `params`: θ of length `k + dist.n_extra_params()`.
/// - `y`: outcomes, length `n ≥ 1`.
/// - `x`: `n × k` design matrix, `k ≥ 1`.
/// - `dist`: law of the one-sided term.
/// - `kind`: production (`ε = e`) or cost (`ε = -e`).
/// - `debug`: emit per-observation `tracing` events.
///
/// Errors
/// ------
/// - [`SFAError::DimensionMismatch`] when `x.nrows() != y.len()` or
///   `params.len() != x.ncols() + dist.n_extra_params()`.
/// - [`SFAError::EmptyData`] when `n == 0` or `k == 0`.
/// - [`SFAError::InvalidParameter`] when a coefficient, scale, or location is
///   invalid (see `FrontierParams::from_theta`).
///
/// Notes
/// -----
/// - Underflow is never an error here: each affected observation
///   contributes [`LOG_DENSITY_SENTINEL`] and a single `warn` event reports
///   how many were replaced.
pub fn loglik_contributions(
    params: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>, x: ArrayView2<'_, f64>,
    dist: InefficiencyDist, kind: FrontierKind, debug: bool,
) -> SFAResult<Array1<f64>> {
    check_dimensions(y, x)?;
    let fp = FrontierParams::from_theta(params, x.ncols(), dist)?;
    let kernel = DensityKernel::new(&fp);
    let sign = kind.sign();
    let fitted = x.dot(&fp.beta);

    if debug {
        debug!(
            target: "rust_frontier::loglik",
            n = y.len(),
            k = x.ncols(),
            dist = %dist,
            kind = %kind,
            sigma_v = fp.sigma_v,
            sigma_u = fp.sigma_u,
            mu = fp.mu,
            "evaluating composed-error log-likelihood"
        );
    }

    let mut first_underflow: Option<SFAError> = None;
    let mut n_underflow = 0usize;
    let contributions = Array1::from_iter(y.iter().zip(fitted.iter()).enumerate().map(
        |(i, (&yi, &fi))| {
            let residual = yi - fi;
            let eps = sign * residual;
            let raw = kernel.ln_density(eps);
            let substituted = !raw.is_finite();
            let value = if substituted {
                n_underflow += 1;
                first_underflow.get_or_insert(SFAError::NumericUnderflow { index: i });
                LOG_DENSITY_SENTINEL
            } else {
                raw
            };
            if debug {
                debug!(
                    target: "rust_frontier::loglik",
                    obs = i,
                    residual,
                    eps,
                    log_density = value,
                    substituted,
                    "observation"
                );
            }
            value
        },
    ));

    if let Some(err) = first_underflow {
        warn!(
            target: "rust_frontier::loglik",
            count = n_underflow,
            first = %err,
            "non-finite log densities replaced by sentinel"
        );
    }
    Ok(contributions)
}
