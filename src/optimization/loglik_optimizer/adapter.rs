//! Bridge from a [`LogLikelihood`] to argmin's minimization traits.
//!
//! argmin minimizes, so the adapter exposes `c(θ) = -ℓ(θ)`. A model's
//! analytic gradient is negated; without one, the gradient is a finite
//! difference of the cost itself and needs no sign flip.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::run_fd_diff,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// A model and its data, viewed as an argmin problem.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    /// Central-difference gradient of the cost, falling back to forward
    /// differences if any evaluation failed or the result is not finite.
    fn fd_gradient(&self, theta: &Theta) -> Result<Grad, Error> {
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let cost_fn = |t: &Theta| -> f64 {
            self.cost(t).unwrap_or_else(|e| {
                let mut slot = closure_err.borrow_mut();
                if slot.is_none() {
                    *slot = Some(e);
                }
                f64::NAN
            })
        };
        let central = theta.central_diff(&cost_fn);
        let central_failed = closure_err.borrow().is_some();
        if !central_failed && validate_grad(&central, theta.len()).is_ok() {
            return Ok(central);
        }
        Ok(run_fd_diff(theta, &cost_fn, &closure_err)?)
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// `-ℓ(θ)`, with a non-finite `ℓ` reported as
    /// [`OptError::NonFiniteCost`].
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let ll = self.f.value(theta, self.data)?;
        if !ll.is_finite() {
            return Err(OptError::NonFiniteCost { value: ll }.into());
        }
        Ok(-ll)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// `-∇ℓ(θ)` from the model when available, else a finite-difference
    /// gradient of the cost.
    ///
    /// # Errors
    /// Model gradient errors other than `GradientNotImplemented`, cost
    /// evaluation errors hit during differencing, and validation failures.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => self.fd_gradient(theta),
            Err(e) => Err(e.into()),
        }
    }
}
