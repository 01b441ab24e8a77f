//! frontier: cross-sectional stochastic frontier stack: core numerics,
//! models, and errors.
//!
//! Purpose
//! -------
//! Bundle everything needed to evaluate, fit, and interpret a stochastic
//! frontier `y_i = x_iβ + v_i - s·u_i` with normal noise `v` and a one-sided
//! inefficiency term `u` (exponential, half-normal, or truncated normal).
//! This is the main entry point of the crate and the surface the Python
//! bindings depend on.
//!
//! Key behaviors
//! -------------
//! - [`core`]: validated data, θ ↔ parameter mapping, composed-error log
//!   densities, the pure log-likelihood evaluator, corrected-OLS starts, and
//!   JLMS / Battese–Coelli efficiency scores.
//! - [`models`]: [`FrontierModel`], which maximizes the likelihood with
//!   L-BFGS and computes classical or robust covariances.
//! - [`errors`]: [`SFAError`] and [`SFAResult`], shared by every layer
//!   above and convertible to and from the optimizer's `OptError`.
//!
//! Invariants & assumptions
//! ------------------------
//! - θ = `(β_0 … β_{k-1}, ln σ_v², ln σ_u² [, μ])`, with `μ` only for the
//!   truncated normal.
//! - Misaligned arrays, invalid scales, and unknown selectors fail before any
//!   arithmetic. Non-finite per-observation densities are replaced by
//!   [`LOG_DENSITY_SENTINEL`], so the evaluator never returns NaN.
//! - Evaluation is pure: same inputs, bit-identical output, with or without
//!   diagnostics.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; matrix indices in errors are flat row-major.
//! - Diagnostics are `tracing` events on the `rust_frontier::loglik` and
//!   `rust_frontier::optim` targets. The library installs no subscriber.
//!
//! Downstream usage
//! ----------------
//! - One-off evaluation: [`log_likelihood`] with `ArrayView`s of θ, `y`,
//!   `X` and an [`InefficiencyDist`].
//! - Estimation: build [`FrontierData`], then
//!   `FrontierModel::new(dist, kind, FrontierOptions::default(), k)` and
//!   `fit(&data)`; afterwards `efficiency(&data)` and
//!   `standard_errors(&data, robust)`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule. Integration tests in `tests/`
//!   cover the evaluator's contract (limits, rescaling, determinism,
//!   never-NaN) and parameter recovery on simulated frontiers.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    EfficiencyScores, FrontierData, FrontierKind, FrontierOptions, FrontierParams,
    InefficiencyDist, Init, LOG_DENSITY_SENTINEL, log_likelihood, log_likelihood_with_kind,
    loglik_contributions,
};

pub use self::errors::{SFAError, SFAResult};

pub use self::models::{FrontierModel, calculate_scores};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_frontier::frontier::prelude::*;
//
// to import the main frontier surface in a single line.

pub mod prelude {
    pub use super::{
        EfficiencyScores, FrontierData, FrontierKind, FrontierModel, FrontierOptions,
        FrontierParams, InefficiencyDist, Init, SFAError, SFAResult, log_likelihood,
        log_likelihood_with_kind,
    };
}
