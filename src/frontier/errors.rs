//! Errors for stochastic frontier models (input validation, parameter
//! mapping, selector decoding, and estimation failures).
//!
//! [`SFAError`] is the single error type of the `frontier` stack. It
//! implements `Display`/`Error`, travels through the optimizer wrapped in
//! `OptError::Model`, and converts to a Python `ValueError` when the
//! `python-bindings` feature is on.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Dimension, parameter, and selector problems are reported before any
//!   arithmetic happens; numeric underflow inside a density is *not* an
//!   error at the evaluator boundary (see [`SFAError::NumericUnderflow`]).
//! - Optimizer/backend errors are normalized to
//!   [`SFAError::OptimizationFailed`] with a human-readable status.
use crate::{inference::errors::InferenceError, optimization::errors::OptError};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for frontier operations.
pub type SFAResult<T> = Result<T, SFAError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SFAError {
    // ---- Input/data validation ----
    /// Array lengths disagree (`X` rows vs `y`, or `θ` vs `k + extras`).
    DimensionMismatch { context: &'static str, expected: usize, found: usize },

    /// No observations or no regressors.
    EmptyData,

    /// A data point is NaN/±inf. `index` is flat row-major for matrices.
    NonFiniteData { index: usize, value: f64 },

    // ---- Parameters ----
    /// A scale maps to a non-positive or non-finite value, or a location is
    /// not finite.
    InvalidParameter { name: &'static str, value: f64, reason: &'static str },

    /// Unrecognized inefficiency-distribution tag.
    UnsupportedSelector { tag: String },

    /// Log density at observation `index` was not finite. Recovered
    /// internally by sentinel substitution; never returned by the evaluator.
    NumericUnderflow { index: usize },

    // ---- Estimation ----
    /// Starting values could not be formed (e.g. rank-deficient `X`).
    InvalidInit { reason: String },

    /// Model hasn't been fitted yet.
    ModelNotFitted,

    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    /// Covariance or score computation failed.
    Inference { text: String },
}

impl std::error::Error for SFAError {}

impl std::fmt::Display for SFAError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            SFAError::DimensionMismatch { context, expected, found } => {
                write!(f, "Dimension mismatch in {context}: expected {expected}, found {found}")
            }
            SFAError::EmptyData => {
                write!(f, "Data must contain at least one observation and one regressor")
            }
            SFAError::NonFiniteData { index, value } => {
                write!(f, "Data must be finite, got {value} at index {index}")
            }

            // ---- Parameters ----
            SFAError::InvalidParameter { name, value, reason } => {
                write!(f, "Invalid parameter {name} = {value}: {reason}")
            }
            SFAError::UnsupportedSelector { tag } => {
                write!(
                    f,
                    "Unsupported inefficiency distribution '{tag}': expected 0/'exponential', \
                     1/'half_normal' or 2/'truncated_normal'"
                )
            }
            SFAError::NumericUnderflow { index } => {
                write!(f, "Log density underflowed at observation {index}")
            }

            // ---- Estimation ----
            SFAError::InvalidInit { reason } => {
                write!(f, "Could not form starting values: {reason}")
            }
            SFAError::ModelNotFitted => {
                write!(f, "Model has not been fitted yet")
            }
            SFAError::OptimizationFailed { status } => {
                write!(f, "Optimization failed: {status}")
            }
            SFAError::Inference { text } => {
                write!(f, "Inference failed: {text}")
            }
        }
    }
}

/// Unwrap model errors that were carried through the optimizer; everything
/// else is an optimization failure.
impl From<OptError> for SFAError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::Model(inner) => inner,
            other => SFAError::OptimizationFailed { status: other.to_string() },
        }
    }
}

impl From<InferenceError> for SFAError {
    fn from(err: InferenceError) -> Self {
        SFAError::Inference { text: err.to_string() }
    }
}

/// Convert an [`SFAError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<SFAError> for PyErr {
    fn from(err: SFAError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
