//! numerical_stability: log-space normal primitives and scale transforms.
//!
//! Purpose
//! -------
//! Collect the numerically stable scalar routines that composed-error
//! likelihoods and efficiency scores are built from. This module centralizes
//! the branch cutoffs and tolerances so the frontier and inference layers can
//! assume well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - Provide `ln φ(z)`, `Φ(z)`, and a `ln Φ(z)` that never underflows to
//!   `-∞` for finite arguments (`ln_norm_cdf`), plus its lower-tail
//!   bracket `ln Φ(z) + z²/2` (`ln_norm_cdf_scaled`).
//! - Provide the log inverse Mills ratio (`ln_mills_ratio`) used by
//!   conditional-mean efficiency estimators.
//! - Map unconstrained log-variances to positive standard deviations and
//!   back (`scale_from_log_var`, `log_var_from_scale`).
//! - Centralize shared tolerances (`EIGEN_EPS`, `GENERAL_TOL`).
//!
//! Invariants & assumptions
//! ------------------------
//! - All routines are pure functions of their `f64` inputs; no allocation,
//!   I/O, or global state.
//! - Positivity and finiteness of transformed scales are *not* enforced
//!   here; parameter validation lives in `frontier::core::params`.
//!
//! Conventions
//! -----------
//! - Log-variances are the optimizer-space representation of every scale
//!   parameter: `θ = ln σ²`, `σ = exp(θ / 2)`.
//!
//! Downstream usage
//! ----------------
//! - `frontier::core::inefficiency` evaluates composed log densities with
//!   these primitives.
//! - `frontier::core::efficiency` uses `ln_mills_ratio` and `ln_norm_cdf`
//!   for JLMS and Battese–Coelli scores.
//! - `inference::hessian` uses `EIGEN_EPS` for pseudoinverse truncation.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] check `ln_norm_cdf` against
//!   high-precision references in every regime, continuity at the cutoffs,
//!   and the limits of the Mills ratio.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, FRAC_SQRT_2_PI, GENERAL_TOL, LN_SQRT_2PI, ln_mills_ratio, ln_norm_cdf,
    ln_norm_cdf_scaled, ln_norm_pdf, log_var_from_scale, norm_cdf, scale_from_log_var,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_frontier::optimization::numerical_stability::prelude::*;
//
// to import the main numerical-stability surface in a single line.

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, GENERAL_TOL, ln_mills_ratio, ln_norm_cdf, ln_norm_cdf_scaled, ln_norm_pdf,
        log_var_from_scale, norm_cdf, scale_from_log_var,
    };
}
