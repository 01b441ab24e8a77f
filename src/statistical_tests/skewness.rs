//! statistical_tests::skewness: third-moment test for inefficiency.
//!
//! Purpose
//! -------
//! Check whether OLS residuals carry the one-sided skew a stochastic
//! frontier implies before fitting one. Under the null of no inefficiency
//! the composed error is symmetric and the standardized third moment
//!
//! ```text
//! M3T = m3 / sqrt(6 m2³ / n)
//! ```
//!
//! is asymptotically N(0, 1) (Coelli, 1995). A production frontier implies
//! negative skew, a cost frontier positive skew.
//!
//! Key behaviors
//! -------------
//! - [`SkewnessOutcome::skewness_test`] computes central moments, the M3T
//!   statistic, a one-sided p-value in the frontier's direction, and a
//!   wrong-skew flag.
//!
//! Invariants & assumptions
//! ------------------------
//! - At least 3 finite residuals with non-zero variance.
//! - Residuals are centred internally; raw or demeaned input is fine.
//!
//! Downstream usage
//! ----------------
//! - Wrong skew means corrected-OLS starts fall back to a small σ_u and the
//!   MLE typically converges to σ_u → 0; report it alongside the fit.
use crate::{
    frontier::core::orientation::FrontierKind,
    statistical_tests::errors::{TestError, TestResult},
};
use statrs::distribution::{ContinuousCDF, Normal};

const MIN_OBS: usize = 3;

/// Outcome of the residual skewness test.
#[derive(Debug, Copy, Clone)]
pub struct SkewnessOutcome {
    skewness: f64,
    stat: f64,
    p_value: f64,
    wrong_skew: bool,
}

impl SkewnessOutcome {
    /// Run the M3T skewness test on regression residuals.
    ///
    /// Parameters
    /// ----------
    /// - `residuals`: `&[f64]`
    ///   OLS residuals `e = y - Xβ̂`, length n ≥ 3, all finite.
    /// - `kind`: [`FrontierKind`]
    ///   Orientation; fixes the direction of the one-sided alternative.
    ///
    /// Returns
    /// -------
    /// `TestResult<SkewnessOutcome>` with
    /// - `skewness`: the sample coefficient `m3 / m2^{3/2}`,
    /// - `stat`: M3T,
    /// - `p_value`: `Φ(s · M3T)` with `s = +1` for production and `-1` for
    ///   cost, i.e. small when the skew points the way the frontier needs,
    /// - `wrong_skew`: `s · m3 ≥ 0`.
    ///
    /// Errors
    /// ------
    /// - `TestError::InsufficientData` for fewer than 3 residuals.
    /// - `TestError::InvalidData` for a non-finite residual.
    /// - `TestError::ZeroVariance` when all residuals are equal.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// use rust_frontier::frontier::FrontierKind;
    /// use rust_frontier::statistical_tests::SkewnessOutcome;
    ///
    /// let e = [0.3, 0.2, 0.25, 0.1, -1.5, 0.35, 0.3];
    /// let out = SkewnessOutcome::skewness_test(&e, FrontierKind::Production)?;
    ///
    /// assert!(out.stat() < 0.0);
    /// assert!(!out.wrong_skew());
    /// # Ok::<(), rust_frontier::statistical_tests::TestError>(())
    /// ```
    pub fn skewness_test(residuals: &[f64], kind: FrontierKind) -> TestResult<Self> {
        validate_residuals(residuals)?;
        let n = residuals.len() as f64;
        let (m2, m3) = central_moments(residuals);
        if m2 <= 0.0 {
            return Err(TestError::ZeroVariance);
        }
        let stat = m3 / (6.0 * m2.powi(3) / n).sqrt();
        let directed = kind.sign() * stat;

        Ok(SkewnessOutcome {
            skewness: m3 / m2.powf(1.5),
            stat,
            p_value: Normal::standard().cdf(directed),
            wrong_skew: kind.sign() * m3 >= 0.0,
        })
    }

    /// Sample skewness coefficient `m3 / m2^{3/2}`.
    pub fn skewness(&self) -> f64 {
        self.skewness
    }

    /// M3T statistic.
    pub fn stat(&self) -> f64 {
        self.stat
    }

    /// One-sided asymptotic p-value.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Whether residuals are skewed against the frontier's direction.
    pub fn wrong_skew(&self) -> bool {
        self.wrong_skew
    }
}

// ---------- Private helpers ----------

/// Length and finiteness guard shared with the LR module.
pub(crate) fn validate_residuals(residuals: &[f64]) -> TestResult<()> {
    if residuals.len() < MIN_OBS {
        return Err(TestError::InsufficientData { needed: MIN_OBS, found: residuals.len() });
    }
    match residuals.iter().find(|v| !v.is_finite()) {
        Some(&bad) => Err(TestError::InvalidData(bad)),
        None => Ok(()),
    }
}

/// Biased second and third central moments.
fn central_moments(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let (s2, s3) = data.iter().fold((0.0, 0.0), |(a2, a3), &v| {
        let d = v - mean;
        (a2 + d * d, a3 + d * d * d)
    });
    (s2 / n, s3 / n)
}
