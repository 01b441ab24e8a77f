//! Configuration, result, and model-facing trait for likelihood maximization.
//!
//! - [`LogLikelihood`]: implemented by frontier models (and test doubles).
//! - [`Tolerances`] / [`MLEOptions`] / [`LineSearcher`]: validated solver
//!   configuration.
//! - [`OptimOutcome`]: what `maximize` hands back.
//!
//! Sign convention: models report `ℓ(θ)` and, optionally, `∇ℓ(θ)`. The
//! argmin adapter minimizes `-ℓ(θ)` and flips gradient signs itself.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::TerminationStatus;
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// A log-likelihood `ℓ(θ)` over some data payload.
///
/// `value` and `check` are required. `grad` defaults to
/// [`OptError::GradientNotImplemented`], which tells the adapter to fall
/// back to finite differences of the cost.
///
/// Implementations report domain problems (bad dimensions, non-positive
/// scales) as `Err`, never by panicking; the optimizer turns them into a
/// failed line-search step or a failed run.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside L-BFGS.
///
/// Parses case-insensitively from `"MoreThuente"` or `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineSearcher {
    #[default]
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Stopping rules for a run.
///
/// Each rule is optional, but at least one must be set, otherwise L-BFGS
/// would have no reason to stop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Build validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] when all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for a
    ///   non-finite or non-positive tolerance.
    /// - [`OptError::InvalidMaxIter`] for `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    /// `tol_grad = 1e-6`, no cost rule, at most 500 iterations.
    fn default() -> Self {
        Self { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(500) }
    }
}

/// Solver configuration for [`maximize`](super::maximize).
///
/// - `tols`: stopping rules.
/// - `line_searcher`: L-BFGS line search.
/// - `verbose`: with the `obs_slog` feature, attach a terminal observer
///   that logs every iteration.
/// - `lbfgs_mem`: history length, `None` meaning
///   [`DEFAULT_LBFGS_MEM`](super::DEFAULT_LBFGS_MEM).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// # Errors
    /// [`OptError::InvalidLBFGSMem`] when `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

/// Normalized result of a maximization run.
///
/// `value` is the best log-likelihood `ℓ(θ̂)`, not the internal cost.
/// `converged` is `true` whenever argmin reports any terminating status;
/// `status` carries the status text (e.g. `"Terminated(MaxItersReached)"`)
/// so callers can distinguish a tolerance hit from an iteration cap.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Validate raw solver state and package it.
    ///
    /// # Errors
    /// - [`OptError::MissingThetaHat`] / [`OptError::InvalidThetaHat`] for a
    ///   missing or non-finite best point.
    /// - [`OptError::NonFiniteCost`] for a non-finite best value.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus,
        iterations: u64, fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            other => (true, format!("{other:?}")),
        };
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}
