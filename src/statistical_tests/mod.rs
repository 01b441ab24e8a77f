//! statistical_tests: diagnostics around a stochastic frontier fit.
//!
//! Purpose
//! -------
//! Answer the two questions asked before and after estimating a frontier:
//! do the OLS residuals carry one-sided skew at all, and does the fitted
//! inefficiency term improve on OLS significantly?
//!
//! Key behaviors
//! -------------
//! - [`SkewnessOutcome::skewness_test`](skewness::SkewnessOutcome::skewness_test):
//!   Coelli's M3T statistic with a one-sided p-value and a wrong-skew flag.
//! - [`LROutcome::lr_test`](likelihood_ratio::LROutcome::lr_test): boundary
//!   LR test with the mixed chi-square reference law.
//! - [`ols_loglik`]: the restricted (σ_u = 0) log-likelihood.
//! - [`TestError`] / [`TestResult`], mapped to `ValueError` in Python.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use rust_frontier::frontier::FrontierKind;
//! use rust_frontier::statistical_tests::{LROutcome, SkewnessOutcome, ols_loglik};
//!
//! let e = [0.3, 0.2, 0.25, 0.1, -1.5, 0.35, 0.3];
//! let skew = SkewnessOutcome::skewness_test(&e, FrontierKind::Production)?;
//! let lr = LROutcome::lr_test(ols_loglik(&e)?, ols_loglik(&e)? + 2.0, 1)?;
//! assert!(!skew.wrong_skew());
//! assert!(lr.p_value() < 0.05);
//! # Ok::<(), rust_frontier::statistical_tests::TestError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live in each submodule.

pub mod errors;
pub mod likelihood_ratio;
pub mod skewness;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{TestError, TestResult};
pub use self::likelihood_ratio::{LROutcome, ols_loglik};
pub use self::skewness::SkewnessOutcome;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{TestError, TestResult};
    pub use super::likelihood_ratio::{LROutcome, ols_loglik};
    pub use super::skewness::SkewnessOutcome;
}
