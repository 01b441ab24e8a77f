//! Error handling for score-based inference routines.
//!
//! This module defines `InferenceError`, the error type of the score
//! covariance builders, plus the alias `InferenceResult<T>`. Hessian-based
//! routines report through `OptError` instead, because they share the
//! finite-difference validation of the optimizer.

/// Error type for score covariance construction.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Score matrix ----
    /// The score matrix has no rows or no columns.
    EmptyScores { rows: usize, cols: usize },

    /// A score entry is NaN or infinite.
    NonFiniteScore { row: usize, col: usize, value: f64 },

    // ---- Fallback ----
    UnknownError,
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Score matrix ----
            InferenceError::EmptyScores { rows, cols } => {
                write!(f, "Inference Error: score matrix is empty ({rows} x {cols})")
            }
            InferenceError::NonFiniteScore { row, col, value } => {
                write!(f, "Inference Error: score at ({row}, {col}) is {value}, must be finite")
            }

            // ---- Fallback ----
            InferenceError::UnknownError => write!(f, "Inference Error: Unknown error occurred"),
        }
    }
}
