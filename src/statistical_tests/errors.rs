//! statistical_tests::errors: error type for frontier diagnostics.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the residual skewness test
//! and the likelihood-ratio test, together with a conversion to Python
//! exceptions for the PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - [`TestError`] names the violated input constraint and carries the
//!   offending value so logs are meaningful without further context.
//! - With `python-bindings`, `From<TestError> for PyErr` raises
//!   `ValueError` with the `Display` message.
//!
//! Invariants & assumptions
//! ------------------------
//! - Diagnostics validate their inputs and return [`TestResult<T>`] instead
//!   of panicking.
//! - Variants are small and cheap to clone.
//!
//! Testing notes
//! -------------
//! - Unit tests check that each `Display` message embeds its payload. The
//!   PyO3 conversion is left to Python-level tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for statistical diagnostics.
pub type TestResult<T> = Result<T, TestError>;

/// Input and runtime failures of the frontier diagnostics.
///
/// Variants
/// --------
/// - `InsufficientData { needed, found }`
///   Fewer residuals than the statistic requires.
/// - `InvalidData(value)`
///   A residual is NaN or ±∞.
/// - `ZeroVariance`
///   All residuals are identical, so the standardized third moment is
///   undefined.
/// - `InvalidLogLikelihood(value)`
///   A log-likelihood passed to the LR test is not finite.
/// - `InvalidDegreesOfFreedom(df)`
///   The number of restrictions is zero.
#[derive(Debug, Clone, PartialEq)]
pub enum TestError {
    InsufficientData { needed: usize, found: usize },
    InvalidData(f64),
    ZeroVariance,
    InvalidLogLikelihood(f64),
    InvalidDegreesOfFreedom(usize),
}

impl std::error::Error for TestError {}

impl std::fmt::Display for TestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestError::InsufficientData { needed, found } => {
                write!(f, "Need at least {needed} residuals, found {found}.")
            }
            TestError::InvalidData(value) => {
                write!(f, "Invalid residual value: {value}. Must be a finite number.")
            }
            TestError::ZeroVariance => {
                write!(f, "Residuals have zero variance; skewness is undefined.")
            }
            TestError::InvalidLogLikelihood(value) => {
                write!(f, "Invalid log-likelihood: {value}. Must be a finite number.")
            }
            TestError::InvalidDegreesOfFreedom(df) => {
                write!(f, "Invalid degrees of freedom: {df}. Must be at least 1.")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<TestError> for PyErr {
    fn from(err: TestError) -> PyErr {
        PyValueError::new_err(format!("TestError: {err}"))
    }
}
