//! core: cross-sectional frontier data, parameters, densities, and scores.
//!
//! Purpose
//! -------
//! Collect the building blocks of the composed-error model
//! `y_i = x_iβ + v_i - s·u_i`: validated data, the θ ↔ model-space mapping,
//! the inefficiency laws and their log densities, the log-likelihood
//! evaluator, starting values, and post-fit efficiency scores. The model
//! type in `frontier::models` wires these into the optimizer.
//!
//! Key behaviors
//! -------------
//! - [`log_likelihood`] is a pure function over `ndarray` views: fail-fast
//!   validation, per-observation densities, sentinel substitution, optional
//!   `tracing` diagnostics.
//! - [`FrontierParams`] decodes θ once per evaluation; [`DensityKernel`]
//!   precomputes everything that does not depend on the observation.
//! - [`initial_theta`] builds corrected-OLS starts; [`efficiency_scores`]
//!   gives JLMS and Battese–Coelli predictions.
//!
//! Invariants & assumptions
//! ------------------------
//! - θ layout is `(β_0 … β_{k-1}, ln σ_v², ln σ_u² [, μ])`; `μ` is present
//!   only for [`InefficiencyDist::TruncatedNormal`].
//! - Dimension, parameter, and selector errors are raised before any
//!   arithmetic; numeric underflow is recovered locally.
//!
//! Conventions
//! -----------
//! - `s = +1` for production frontiers and `-1` for cost frontiers
//!   ([`FrontierKind::sign`]); all densities are written for `ε = s·e`.
//! - No I/O. Diagnostics go through `tracing` only, and only when asked.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests; fitting, limits, and property-based
//!   checks live in the crate's integration tests.

pub mod data;
pub mod efficiency;
pub mod inefficiency;
pub mod init;
pub mod loglik;
pub mod options;
pub mod orientation;
pub mod params;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::FrontierData;
pub use self::efficiency::{EfficiencyScores, efficiency_scores};
pub use self::inefficiency::{DensityKernel, InefficiencyDist};
pub use self::init::{Init, OlsFit, initial_theta, ols_fit};
pub use self::loglik::{
    LOG_DENSITY_SENTINEL, log_likelihood, log_likelihood_with_kind, loglik_contributions,
};
pub use self::options::FrontierOptions;
pub use self::orientation::FrontierKind;
pub use self::params::FrontierParams;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_frontier::frontier::core::prelude::*;

pub mod prelude {
    pub use super::data::FrontierData;
    pub use super::efficiency::EfficiencyScores;
    pub use super::inefficiency::InefficiencyDist;
    pub use super::init::Init;
    pub use super::loglik::{log_likelihood, log_likelihood_with_kind};
    pub use super::options::FrontierOptions;
    pub use super::orientation::FrontierKind;
    pub use super::params::FrontierParams;
}
