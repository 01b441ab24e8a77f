//! inference: covariance matrices and standard errors for fitted models.
//!
//! Purpose
//! -------
//! Post-estimation uncertainty quantification in the unconstrained optimizer
//! space `θ`: classical covariances from the observed information, and
//! robust (sandwich) covariances that combine it with the outer product of
//! per-observation scores.
//!
//! Key behaviors
//! -------------
//! - [`calc_covariance`] / [`calc_standard_errors`] build `J⁺` or
//!   `J⁺ S J⁺` from a finite-difference Hessian and an eigen
//!   pseudoinverse.
//! - [`calculate_opg_cov`] builds the IID score covariance
//!   `S = (1/n) SᵀS`.
//! - Score-matrix failures are [`InferenceError`]s; Hessian failures are
//!   `OptError`s shared with the optimizer's finite differences.
//!
//! Invariants & assumptions
//! ------------------------
//! - Scores and Hessians are on the **average** log-likelihood scale, with
//!   score matrices shaped `n × p` (rows = observations).
//! - Observations are independent; there is no serial-correlation
//!   correction.
//!
//! Downstream usage
//! ----------------
//! - `FrontierModel::covariance_matrix` computes per-observation scores,
//!   passes them through [`calculate_opg_cov`] when a robust covariance is
//!   requested, and rescales the result by `1/n`.

pub mod errors;
pub mod hessian;
pub mod opg;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{calc_covariance, calc_standard_errors};
pub use self::opg::calculate_opg_cov;

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use rust_frontier::inference::prelude::*;` to
// import the primary inference surface in a single line.

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::{calc_covariance, calc_standard_errors};
    pub use super::opg::calculate_opg_cov;
}
