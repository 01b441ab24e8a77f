//! loglik_optimizer::types: numeric aliases and pre-wired solver types.
//!
//! Purpose
//! -------
//! Give the optimizer one vocabulary for parameters, gradients, curvature
//! matrices, and costs so that frontier models, inference routines, and the
//! argmin backend all agree on shapes without spelling out generics.
//!
//! Conventions
//! -----------
//! - `Theta` is the unconstrained frontier parameter vector
//!   `(β, ln σ_v², ln σ_u² [, μ])`; `Grad` has the same length.
//! - `Hessian` is square with side `Theta.len()`.
//! - `Cost` is a scalar; whether it holds `ℓ(θ)` or `-ℓ(θ)` depends on the
//!   call site (the adapter owns the sign flip).
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector.
pub type Theta = Array1<f64>;

/// Gradient vector, same length as [`Theta`].
pub type Grad = Array1<f64>;

/// Dense square matrix of second derivatives.
pub type Hessian = Array2<f64>;

/// Scalar objective value.
pub type Cost = f64;

/// argmin function-evaluation counters keyed by name (e.g. `"cost_count"`).
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length used when `MLEOptions::lbfgs_mem` is `None`.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
