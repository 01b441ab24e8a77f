//! `maximize`: the one entry point model code calls to fit by maximum
//! likelihood.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize `ℓ(θ)` with L-BFGS, starting from `theta0`.
///
/// Steps: `f.check(theta0, data)`, wrap `(f, data)` in an
/// [`ArgMinAdapter`] (cost `-ℓ`), build the solver for
/// `opts.line_searcher`, run it.
///
/// # Errors
/// - Whatever `f.check` rejects.
/// - Solver configuration or runtime errors, and outcome validation
///   failures, all as `OptError`.
///
/// # Example
/// ```no_run
/// use ndarray::{Array1, array};
/// use rust_frontier::optimization::errors::OptResult;
/// use rust_frontier::optimization::loglik_optimizer::{LogLikelihood, MLEOptions, maximize};
///
/// // Gaussian log-likelihood in (mean, ln variance).
/// struct Normal;
/// impl LogLikelihood for Normal {
///     type Data = Array1<f64>;
///     fn value(&self, theta: &Array1<f64>, y: &Array1<f64>) -> OptResult<f64> {
///         let var = theta[1].exp();
///         Ok(y.iter().map(|v| -0.5 * (var.ln() + (v - theta[0]).powi(2) / var)).sum())
///     }
///     fn check(&self, _: &Array1<f64>, _: &Array1<f64>) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let y = array![0.3, -1.2, 0.8, 0.1];
/// let out = maximize(&Normal, array![0.0, 0.0], &y, &MLEOptions::default())?;
/// println!("mean = {}", out.theta_hat[0]);
/// # Ok::<(), rust_frontier::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            run_lbfgs(theta0, opts, problem, build_optimizer_more_thuente(opts)?)
        }
        LineSearcher::HagerZhang => {
            run_lbfgs(theta0, opts, problem, build_optimizer_hager_zhang(opts)?)
        }
    }
}
