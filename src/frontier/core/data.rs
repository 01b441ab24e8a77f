//! Validated cross-sectional data for frontier models.
//!
//! Purpose
//! -------
//! Hold the outcome vector `y` and design matrix `X` of a cross-sectional
//! stochastic frontier after checking the invariants every downstream
//! routine relies on, so that fitting, scoring, and inference never
//! re-validate raw input.
//!
//! Invariants & assumptions
//! ------------------------
//! - `n = y.len() ≥ 1` and `k = X.ncols() ≥ 1`.
//! - `X.nrows() == n`.
//! - Every entry of `y` and `X` is finite.
//!
//! Conventions
//! -----------
//! - Row `i` of `X` is aligned with `y[i]`; an intercept, if wanted, is an
//!   explicit column of ones.
//! - Indices in errors are 0-based; for `X` the index is flat row-major.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path and each rejection in
//!   [`FrontierData::new`].
use crate::frontier::errors::{SFAError, SFAResult};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Outcome vector and design matrix of one cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierData {
    /// Outcomes (log output or log cost, typically).
    pub y: Array1<f64>,
    /// Design matrix, `n × k`.
    pub x: Array2<f64>,
}

impl FrontierData {
    /// Validate and wrap `(y, X)`.
    ///
    /// # Errors
    /// - [`SFAError::EmptyData`] if `y` is empty or `X` has no columns.
    /// - [`SFAError::DimensionMismatch`] if `X.nrows() != y.len()`.
    /// - [`SFAError::NonFiniteData`] for the first NaN/±∞ in `y`, then in
    ///   `X`.
    pub fn new(y: Array1<f64>, x: Array2<f64>) -> SFAResult<Self> {
        check_dimensions(y.view(), x.view())?;
        if let Some(index) = y.iter().position(|v| !v.is_finite()) {
            return Err(SFAError::NonFiniteData { index, value: y[index] });
        }
        if let Some((index, &value)) = x.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SFAError::NonFiniteData { index, value });
        }
        Ok(Self { y, x })
    }

    /// Number of observations.
    pub fn n(&self) -> usize {
        self.y.len()
    }

    /// Number of regressors.
    pub fn k(&self) -> usize {
        self.x.ncols()
    }

    /// Regression residuals `e = y - Xβ`.
    ///
    /// # Panics
    /// If `beta.len() != k`; callers pass coefficients decoded for this data.
    pub fn residuals(&self, beta: ArrayView1<'_, f64>) -> Array1<f64> {
        &self.y - &self.x.dot(&beta)
    }

    /// Index of the first all-ones column, if any.
    pub fn intercept_column(&self) -> Option<usize> {
        (0..self.k()).find(|&j| self.x.column(j).iter().all(|&v| v == 1.0))
    }
}

/// Shape checks shared by [`FrontierData::new`] and the raw-array
/// evaluator: non-empty, `X.nrows() == y.len()`.
pub(crate) fn check_dimensions(y: ArrayView1<'_, f64>, x: ArrayView2<'_, f64>) -> SFAResult<()> {
    if x.nrows() != y.len() {
        return Err(SFAError::DimensionMismatch {
            context: "design matrix rows vs observations",
            expected: y.len(),
            found: x.nrows(),
        });
    }
    if y.is_empty() || x.ncols() == 0 {
        return Err(SFAError::EmptyData);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `FrontierData::new` acceptance and each rejection path.
    // - Residuals and intercept detection.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Clean input is accepted and residuals follow `y - Xβ`.
    //
    // Given
    // -----
    // - y = (1, 2, 4), X = [1 | x] with x = (0, 1, 2), β = (1, 1).
    //
    // Expect
    // ------
    // - n = 3, k = 2, residuals (0, 0, 1), intercept in column 0.
    fn new_accepts_clean_data_and_computes_residuals() {
        // Arrange
        let y = array![1.0, 2.0, 4.0];
        let x = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];

        // Act
        let data = FrontierData::new(y, x).expect("clean data");

        // Assert
        assert_eq!((data.n(), data.k()), (3, 2));
        assert_eq!(data.residuals(array![1.0, 1.0].view()), array![0.0, 0.0, 1.0]);
        assert_eq!(data.intercept_column(), Some(0));
    }

    #[test]
    // Purpose
    // -------
    // Shape problems are reported as such, with the mismatched sizes.
    //
    // Given
    // -----
    // - y of length 5 with a 4-row X; an empty y with an empty X.
    //
    // Expect
    // ------
    // - `DimensionMismatch { expected: 5, found: 4 }`; `EmptyData`.
    fn new_rejects_misaligned_and_empty_inputs() {
        let err = FrontierData::new(Array1::zeros(5), Array2::zeros((4, 1)));
        assert!(matches!(err, Err(SFAError::DimensionMismatch { expected: 5, found: 4, .. })));

        let err = FrontierData::new(Array1::zeros(0), Array2::zeros((0, 1)));
        assert_eq!(err, Err(SFAError::EmptyData));
    }

    #[test]
    // Purpose
    // -------
    // Non-finite data is located by index.
    //
    // Given
    // -----
    // - NaN in y[1]; +∞ in X[1, 0] (flat index 2 for k = 2).
    //
    // Expect
    // ------
    // - `NonFiniteData { index: 1 }` and `NonFiniteData { index: 2 }`.
    fn new_rejects_non_finite_values() {
        let err = FrontierData::new(array![0.0, f64::NAN], array![[1.0], [1.0]]);
        assert!(matches!(err, Err(SFAError::NonFiniteData { index: 1, .. })));

        let err = FrontierData::new(
            array![0.0, 0.0],
            array![[1.0, 0.0], [f64::INFINITY, 0.0]],
        );
        assert!(matches!(err, Err(SFAError::NonFiniteData { index: 2, .. })));
    }
}
