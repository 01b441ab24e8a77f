//! loglik_optimizer: argmin-backed maximum-likelihood driver.
//!
//! Purpose
//! -------
//! Fit any model that can evaluate its log-likelihood `ℓ(θ)` by L-BFGS,
//! without the model knowing anything about argmin. Frontier models
//! implement [`LogLikelihood`] and call [`maximize`]; inference code reuses
//! the finite-difference helpers for Hessians and per-observation scores.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ArgMinAdapter`] presents `c(θ) = -ℓ(θ)` to argmin and falls
//!   back to finite differences when the model has no analytic gradient.
//! - [`builders`] create L-BFGS with More–Thuente or Hager–Zhang line
//!   search; [`run::run_lbfgs`] executes it and logs the outcome through
//!   `tracing`.
//! - [`finite_diff`] supplies validated gradients, Hessians, and score
//!   matrices.
//! - [`Tolerances`] and [`MLEOptions`] are validated at construction.
//!
//! Invariants & assumptions
//! ------------------------
//! - Models return `ℓ`, never the cost; errors are `OptError` values, not
//!   panics.
//! - A returned [`OptimOutcome`] always has a finite `theta_hat` and value.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; [`api`] fits a Gaussian toy
//!   model end to end. Frontier fits are covered by the crate's
//!   integration tests.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
