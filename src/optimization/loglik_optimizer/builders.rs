//! loglik_optimizer::builders: L-BFGS solver construction.
//!
//! Purpose
//! -------
//! Turn an [`MLEOptions`] into a ready-to-run argmin L-BFGS solver for either
//! supported line search. Initial parameters and iteration caps are left to
//! the runner; builders only choose the line search, the history length, and
//! the convergence tolerances.
//!
//! Invariants & assumptions
//! ------------------------
//! - Tolerances were validated by `Tolerances::new`; argmin may still reject
//!   them, in which case the argmin error is normalized into `OptError`.
//! - The history length is `opts.lbfgs_mem` or [`DEFAULT_LBFGS_MEM`].
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// L-BFGS with Hager–Zhang line search, configured from `opts`.
///
/// # Errors
/// Tolerance rejections from argmin, as `OptError`.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    configure_lbfgs(LBFGS::new(HagerZhangLS::new(), history_len(opts)), opts)
}

/// L-BFGS with More–Thuente line search, configured from `opts`.
///
/// # Errors
/// Tolerance rejections from argmin, as `OptError`.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    configure_lbfgs(LBFGS::new(MoreThuenteLS::new(), history_len(opts)), opts)
}

/// Apply the gradient-norm and cost-change tolerances that are set in
/// `opts`; absent ones keep argmin's defaults.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

fn history_len(opts: &MLEOptions) -> usize {
    opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::loglik_optimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Solver construction for both line searches with default and explicit
    //   history lengths.
    // - Tolerance wiring when tolerances are present or absent.
    //
    // They intentionally DO NOT cover:
    // - Running the solver (see `run` and the frontier integration tests).
    // -------------------------------------------------------------------------

    fn opts(searcher: LineSearcher, tol_cost: Option<f64>, mem: Option<usize>) -> MLEOptions {
        let tols = Tolerances::new(Some(1e-6), tol_cost, Some(50)).expect("valid tolerances");
        MLEOptions::new(tols, searcher, false, mem).expect("valid options")
    }

    #[test]
    // Purpose
    // -------
    // Both builders succeed with the default history length.
    //
    // Given
    // -----
    // - `lbfgs_mem = None` and both tolerances set.
    //
    // Expect
    // ------
    // - `Ok(_)` from each builder; `history_len` is `DEFAULT_LBFGS_MEM`.
    fn builders_use_default_history() {
        let hz = opts(LineSearcher::HagerZhang, Some(1e-8), None);
        let mt = opts(LineSearcher::MoreThuente, Some(1e-8), None);
        assert_eq!(history_len(&hz), DEFAULT_LBFGS_MEM);
        assert!(build_optimizer_hager_zhang(&hz).is_ok());
        assert!(build_optimizer_more_thuente(&mt).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // An explicit history length is honored.
    //
    // Given
    // -----
    // - `lbfgs_mem = Some(11)`.
    //
    // Expect
    // ------
    // - `history_len == 11` and the builder succeeds.
    fn builders_respect_explicit_history() {
        let o = opts(LineSearcher::HagerZhang, None, Some(11));
        assert_eq!(history_len(&o), 11);
        assert!(build_optimizer_hager_zhang(&o).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` accepts configurations without a cost tolerance.
    //
    // Given
    // -----
    // - A raw More–Thuente solver and `tol_cost = None`.
    //
    // Expect
    // ------
    // - `Ok(_)`.
    fn configure_lbfgs_skips_absent_tolerances() {
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let o = opts(LineSearcher::MoreThuente, None, None);
        assert!(configure_lbfgs(raw, &o).is_ok());
    }
}
