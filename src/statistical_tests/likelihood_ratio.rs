//! statistical_tests::likelihood_ratio: LR test against the OLS model.
//!
//! Purpose
//! -------
//! Test `H0: σ_u² = 0` (no inefficiency) against a fitted frontier. The
//! null puts a parameter on the boundary of its space, so the LR statistic
//! follows the mixed chi-square `½χ²_{df-1} + ½χ²_{df}` rather than `χ²_{df}`
//! (Kodde & Palm, 1986). With one restriction this halves the usual χ²₁
//! tail.
//!
//! Key behaviors
//! -------------
//! - [`LROutcome::lr_test`] forms `LR = -2 (ℓ_r - ℓ_u)` and its
//!   mixed-chi-square p-value.
//! - [`ols_loglik`] gives the restricted log-likelihood from OLS residuals.
//!
//! Invariants & assumptions
//! ------------------------
//! - `LR` is floored at zero; a restricted model that fits better than the
//!   unrestricted one gives `LR = 0` and p-value 1.
use crate::{
    optimization::numerical_stability::LN_SQRT_2PI,
    statistical_tests::{
        errors::{TestError, TestResult},
        skewness::validate_residuals,
    },
};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// Outcome of a boundary likelihood-ratio test.
#[derive(Debug, Copy, Clone)]
pub struct LROutcome {
    stat: f64,
    df: usize,
    p_value: f64,
}

impl LROutcome {
    /// Likelihood-ratio test with a mixed chi-square reference law.
    ///
    /// Parameters
    /// ----------
    /// - `ll_restricted`: log-likelihood under H0 (e.g. [`ols_loglik`]).
    /// - `ll_unrestricted`: log-likelihood of the fitted frontier.
    /// - `df`: number of restrictions, at least 1 (1 for half-normal or
    ///   exponential, 2 for truncated normal with μ).
    ///
    /// Errors
    /// ------
    /// - `TestError::InvalidLogLikelihood` for a non-finite input.
    /// - `TestError::InvalidDegreesOfFreedom` for `df == 0`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_frontier::statistical_tests::LROutcome;
    ///
    /// let out = LROutcome::lr_test(-120.0, -117.0, 1)?;
    /// assert_eq!(out.stat(), 6.0);
    /// assert!(out.p_value() < 0.01);
    /// # Ok::<(), rust_frontier::statistical_tests::TestError>(())
    /// ```
    pub fn lr_test(ll_restricted: f64, ll_unrestricted: f64, df: usize) -> TestResult<Self> {
        for ll in [ll_restricted, ll_unrestricted] {
            if !ll.is_finite() {
                return Err(TestError::InvalidLogLikelihood(ll));
            }
        }
        if df == 0 {
            return Err(TestError::InvalidDegreesOfFreedom(df));
        }
        let stat = (-2.0 * (ll_restricted - ll_unrestricted)).max(0.0);
        let p_value = if stat == 0.0 {
            1.0
        } else {
            0.5 * chi_square_tail(df - 1, stat)? + 0.5 * chi_square_tail(df, stat)?
        };
        Ok(LROutcome { stat, df, p_value })
    }

    /// LR statistic `-2 (ℓ_r - ℓ_u)`, floored at zero.
    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// Number of restrictions.
    pub fn df(&self) -> usize {
        self.df
    }

    /// Mixed chi-square p-value.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }
}

/// Gaussian log-likelihood of regression residuals at the MLE variance
/// `σ̂² = Σ e² / n`:
///
/// ```text
/// ℓ = -n/2 · (ln 2π + ln σ̂² + 1)
/// ```
///
/// # Errors
/// - `TestError::InsufficientData` / `TestError::InvalidData` as for the
///   skewness test.
/// - `TestError::ZeroVariance` when every residual is zero.
pub fn ols_loglik(residuals: &[f64]) -> TestResult<f64> {
    validate_residuals(residuals)?;
    let n = residuals.len() as f64;
    let sigma_sq = residuals.iter().map(|e| e * e).sum::<f64>() / n;
    if sigma_sq <= 0.0 {
        return Err(TestError::ZeroVariance);
    }
    Ok(-n * (LN_SQRT_2PI + 0.5 * sigma_sq.ln() + 0.5))
}

/// `P(χ²_df > x)`; χ²₀ is a point mass at zero.
fn chi_square_tail(df: usize, x: f64) -> TestResult<f64> {
    if df == 0 {
        return Ok(0.0);
    }
    let law = ChiSquared::new(df as f64).map_err(|_| TestError::InvalidDegreesOfFreedom(df))?;
    Ok(law.sf(x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The halved χ²₁ tail for one restriction and the mixture for two.
    // - The zero floor on LR.
    // - `ols_loglik` against a closed form and its validation.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // With one restriction the p-value is half the χ²₁ tail.
    //
    // Given
    // -----
    // - ℓ_r = -10, ℓ_u = -8.0794 so LR = 3.8412 (the 5% χ²₁ critical value).
    //
    // Expect
    // ------
    // - p ≈ 0.025.
    fn single_restriction_halves_chi_square_tail() {
        // Arrange / Act
        let out = LROutcome::lr_test(-10.0, -10.0 + 3.841_459 / 2.0, 1).expect("valid");

        // Assert
        assert_relative_eq!(out.stat(), 3.841_459, epsilon = 1e-9);
        assert_relative_eq!(out.p_value(), 0.025, epsilon = 1e-5);
        assert_eq!(out.df(), 1);
    }

    #[test]
    // Purpose
    // -------
    // Two restrictions mix χ²₁ and χ²₂ tails.
    //
    // Given
    // -----
    // - LR = 4.
    //
    // Expect
    // ------
    // - p = ½ P(χ²₁ > 4) + ½ exp(-2).
    fn two_restrictions_mix_tails() {
        let out = LROutcome::lr_test(-12.0, -10.0, 2).expect("valid");

        let chi1 = ChiSquared::new(1.0).expect("df = 1").sf(4.0);
        let expected = 0.5 * chi1 + 0.5 * (-2.0_f64).exp();
        assert_relative_eq!(out.p_value(), expected, epsilon = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // A restricted fit better than the unrestricted one is no evidence
    // against H0; invalid inputs are rejected.
    //
    // Given
    // -----
    // - ℓ_r > ℓ_u; a NaN log-likelihood; df = 0.
    //
    // Expect
    // ------
    // - LR = 0 with p = 1; `InvalidLogLikelihood`; `InvalidDegreesOfFreedom`.
    fn floor_and_validation() {
        let out = LROutcome::lr_test(-5.0, -6.0, 1).expect("valid");
        assert_eq!(out.stat(), 0.0);
        assert_eq!(out.p_value(), 1.0);

        assert!(matches!(
            LROutcome::lr_test(f64::NAN, -1.0, 1),
            Err(TestError::InvalidLogLikelihood(_))
        ));
        assert_eq!(
            LROutcome::lr_test(-2.0, -1.0, 0).unwrap_err(),
            TestError::InvalidDegreesOfFreedom(0)
        );
    }

    #[test]
    // Purpose
    // -------
    // `ols_loglik` matches the Gaussian closed form.
    //
    // Given
    // -----
    // - e = (1, -1, 1, -1): σ̂² = 1.
    //
    // Expect
    // ------
    // - ℓ = -2 (ln 2π + 1); all-zero residuals give `ZeroVariance`.
    fn ols_loglik_closed_form() {
        let ll = ols_loglik(&[1.0, -1.0, 1.0, -1.0]).expect("valid");
        let expected = -2.0 * ((2.0 * std::f64::consts::PI).ln() + 1.0);
        assert_relative_eq!(ll, expected, epsilon = 1e-12);

        assert_eq!(ols_loglik(&[0.0; 4]).unwrap_err(), TestError::ZeroVariance);
    }
}
