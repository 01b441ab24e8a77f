//! optimization: likelihood maximization, stable numerics, optimizer errors.
//!
//! Purpose
//! -------
//! Everything the frontier models need to go from "I can evaluate `ℓ(θ)`" to
//! "here is `θ̂`": an L-BFGS driver (`loglik_optimizer`), the log-space normal
//! primitives every composed-error density is built from
//! (`numerical_stability`), and one error enum for the whole layer
//! (`errors::OptError`).
//!
//! Conventions
//! -----------
//! - Optimization always maximizes `ℓ(θ)` by minimizing `-ℓ(θ)` internally;
//!   user-facing values are log-likelihoods.
//! - `θ` is unconstrained. Scale parameters enter as log-variances and are
//!   mapped to standard deviations by `numerical_stability` helpers.
//! - argmin errors and frontier-model errors raised during a run both come
//!   back as `OptError`.
//!
//! Downstream usage
//! ----------------
//! - `frontier::models::sfa` implements `LogLikelihood` and calls
//!   `maximize`.
//! - `inference` uses `finite_diff::compute_hessian` and `EIGEN_EPS`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_frontier::optimization::prelude::*;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
