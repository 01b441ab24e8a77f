//! models: the user-facing stochastic frontier model.
//!
//! Purpose
//! -------
//! Wire `frontier::core` (data, densities, starting values, efficiency
//! scores) to the L-BFGS optimizer and to the inference layer, behind one
//! model type with `fit`, `efficiency`, `covariance_matrix`, and
//! `standard_errors`.
//!
//! Key behaviors
//! -------------
//! - [`FrontierModel`] implements [`LogLikelihood`] over [`FrontierData`];
//!   trial points with undecodable scales score the sentinel total instead
//!   of failing the line search.
//! - [`model_internals`] builds per-observation score matrices
//!   ([`calculate_scores`]) and the gradient map used for Hessians.
//!
//! Invariants & assumptions
//! ------------------------
//! - θ has length `k + 2` (`k + 3` for the truncated normal) and decodes via
//!   `FrontierParams::from_theta`; `check` enforces both.
//! - The model holds no interior mutability; `&FrontierModel` can be shared
//!   across threads.
//!
//! Downstream usage
//! ----------------
//! - Build `FrontierData::new(y, x)`, choose `FrontierOptions`, then
//!   `FrontierModel::new(dist, kind, options, k).fit(&data)`.
//! - After a fit, read `results` / `fitted_params`, or call `efficiency` and
//!   `standard_errors(&data, robust)`.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`sfa`] and [`model_internals`]; parameter recovery on
//!   simulated data lives in the crate's integration tests.
//!
//! [`LogLikelihood`]: crate::optimization::loglik_optimizer::LogLikelihood
//! [`FrontierData`]: crate::frontier::core::FrontierData

pub mod model_internals;
pub mod sfa;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::model_internals::{calculate_scores, extract_theta};
pub use self::sfa::FrontierModel;

// ---- Optional convenience prelude for downstream crates -------------------
//
//     use rust_frontier::frontier::models::prelude::*;

pub mod prelude {
    pub use super::model_internals::calculate_scores;
    pub use super::sfa::FrontierModel;
}
