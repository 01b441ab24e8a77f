//! Executor wiring: run a configured L-BFGS solver and package the result.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;
use tracing::{debug, warn};

/// Run `solver` on `problem` from `theta0` and return an [`OptimOutcome`].
///
/// The iteration cap comes from `opts.tols.max_iter`; gradient and cost
/// tolerances were already baked into `solver` by the builders. With the
/// `obs_slog` feature and `opts.verbose`, a terminal slog observer logs
/// every iteration and the starting log-likelihood is logged first.
///
/// A finished run is logged at `debug` level on the `rust_frontier::optim`
/// target; a run that stops without a termination reason is logged at
/// `warn`.
///
/// # Errors
/// - argmin runtime errors (including model errors raised inside the cost),
///   normalized into `OptError`.
/// - Validation failures from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let n_params = theta0.len();
    let mut executor = Executor::new(problem, solver).configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut state = executor.run()?.state().clone();
    let iterations = state.get_iter();
    let fn_evals = state.get_func_counts().clone();
    let termination = state.get_termination_status().clone();
    let grad = state.take_gradient();
    let outcome = OptimOutcome::new(
        state.take_best_param(),
        -state.get_best_cost(),
        termination,
        iterations,
        fn_evals,
        grad,
    )?;

    if outcome.converged {
        debug!(
            target: "rust_frontier::optim",
            n_params,
            iterations = outcome.iterations,
            loglik = outcome.value,
            status = %outcome.status,
            "L-BFGS finished"
        );
    } else {
        warn!(
            target: "rust_frontier::optim",
            n_params,
            iterations = outcome.iterations,
            "L-BFGS stopped without a termination reason"
        );
    }
    Ok(outcome)
}

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    let grad_norm = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    tracing::info!(
        target: "rust_frontier::optim",
        loglik = ll0,
        grad_norm = ?grad_norm,
        "starting L-BFGS"
    );
    Ok(())
}
