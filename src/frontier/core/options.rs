//! Frontier options: estimation-time configuration.
//!
//! Purpose
//! -------
//! Bundle the start policy, optimizer settings, and the diagnostic flag used
//! when fitting a frontier model, so model code receives one validated value
//! instead of loose arguments.
//!
//! Invariants & assumptions
//! ------------------------
//! - Components are validated by their own constructors (`Init::fixed`,
//!   `MLEOptions::new`); no cross-field checks happen here.
//!
//! Testing notes
//! -------------
//! - Unit tests check that `new` stores its inputs and that the defaults
//!   are OLS starts, default optimizer options, and `debug = false`.
use crate::{frontier::core::init::Init, optimization::loglik_optimizer::MLEOptions};

/// Estimation-time configuration for [`FrontierModel`].
///
/// Fields
/// ------
/// - `init`: start policy for θ (corrected OLS by default).
/// - `mle_opts`: L-BFGS tolerances, iteration cap, and line search.
/// - `debug`: forward per-observation diagnostics from every likelihood
///   evaluation to `tracing`. This is very chatty during a fit and is meant
///   for single evaluations or small samples.
///
/// [`FrontierModel`]: crate::frontier::models::FrontierModel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontierOptions {
    pub init: Init,
    pub mle_opts: MLEOptions,
    pub debug: bool,
}

impl FrontierOptions {
    pub fn new(init: Init, mle_opts: MLEOptions, debug: bool) -> FrontierOptions {
        FrontierOptions { init, mle_opts, debug }
    }
}
