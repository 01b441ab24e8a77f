//! Starting values for frontier maximum likelihood.
//!
//! Purpose
//! -------
//! Turn a start policy ([`Init`]) into a θ vector the optimizer can begin
//! from. The default policy fits OLS and backs out the variance components
//! from the second and third moments of the residuals (corrected OLS); the
//! alternative is a caller-supplied θ.
//!
//! Key behaviors
//! -------------
//! - [`ols_fit`] solves least squares through a nalgebra SVD and rejects
//!   rank-deficient designs with [`SFAError::InvalidInit`].
//! - Method of moments on the oriented residuals `ε = s·e`:
//!   - exponential: `σ_u = (-s·m3 / 2)^{1/3}`;
//!   - half-normal and truncated normal:
//!     `σ_u = (-s·m3 / (√(2/π)(4/π - 1)))^{1/3}`;
//!   - residuals skewed the wrong way fall back to `σ_u² = 0.1·m2`;
//!   - `σ_v² = max(m2 - Var(u), 0.05·m2)`.
//! - The intercept (first all-ones column, if any) is shifted by `s·E[u]`;
//!   the truncated-normal location starts at `μ = 0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The returned θ always decodes through `FrontierParams::from_theta`.
//! - `n > k` is required for the OLS policy; otherwise the residual moments
//!   are degenerate.
use crate::{
    frontier::{
        core::{
            data::FrontierData, inefficiency::InefficiencyDist, orientation::FrontierKind,
            params::FrontierParams,
        },
        errors::{SFAError, SFAResult},
    },
    optimization::numerical_stability::{FRAC_SQRT_2_PI, GENERAL_TOL},
};
use nalgebra::{DMatrix, DVector};
use ndarray::Array1;
use std::f64::consts::PI;

/// Share of the residual variance given to `σ_u²` when the residuals are
/// skewed the wrong way.
const WRONG_SKEW_SHARE: f64 = 0.1;

/// Lower bound on `σ_v²` as a share of the residual variance.
const NOISE_FLOOR_SHARE: f64 = 0.05;

/// Start policy for [`initial_theta`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Init {
    /// Corrected OLS: least-squares β plus moment-based scales.
    #[default]
    Ols,
    /// Caller-supplied θ, used as is after validation.
    Fixed(Array1<f64>),
}

impl Init {
    pub const fn ols() -> Self {
        Init::Ols
    }

    /// Wrap a caller-supplied θ.
    ///
    /// Only finiteness is checked here; the length is checked against the
    /// model in [`initial_theta`].
    ///
    /// # Errors
    /// [`SFAError::InvalidInit`] if any entry is NaN or infinite.
    pub fn fixed(theta: Array1<f64>) -> SFAResult<Self> {
        if let Some(index) = theta.iter().position(|v| !v.is_finite()) {
            return Err(SFAError::InvalidInit {
                reason: format!("fixed start has {} at index {index}", theta[index]),
            });
        }
        Ok(Init::Fixed(theta))
    }
}

/// Least-squares fit of `y` on `X`.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub beta: Array1<f64>,
    pub residuals: Array1<f64>,
}

impl OlsFit {
    /// Central moments `(m2, m3)` of the residuals, divided by `n`.
    pub fn residual_moments(&self) -> (f64, f64) {
        central_moments(&self.residuals)
    }
}

/// Ordinary least squares through a singular value decomposition.
///
/// # Errors
/// - [`SFAError::InvalidInit`] if `X` does not have full column rank or the
///   SVD solve fails.
pub fn ols_fit(data: &FrontierData) -> SFAResult<OlsFit> {
    let (n, k) = (data.n(), data.k());
    let x = DMatrix::from_fn(n, k, |i, j| data.x[[i, j]]);
    let y = DVector::from_iterator(n, data.y.iter().copied());
    let svd = x.svd(true, true);
    let max_sv = svd.singular_values.max();
    let rank_tol = GENERAL_TOL * max_sv.max(1.0) * n.max(k) as f64;
    let rank = svd.rank(rank_tol);
    if rank < k {
        return Err(SFAError::InvalidInit {
            reason: format!("design matrix has rank {rank} < {k} columns"),
        });
    }
    let solution = svd
        .solve(&y, rank_tol)
        .map_err(|msg| SFAError::InvalidInit { reason: msg.to_string() })?;
    let beta = Array1::from_iter(solution.iter().copied());
    let residuals = data.residuals(beta.view());
    Ok(OlsFit { beta, residuals })
}

/// Build the starting θ for `dist` and `kind` according to `init`.
///
/// # Errors
/// - [`SFAError::InvalidInit`] if OLS fails, `n <= k`, or the residual
///   variance is zero.
/// - [`SFAError::DimensionMismatch`] / [`SFAError::InvalidParameter`] if a
///   fixed θ does not decode for this model.
pub fn initial_theta(
    init: &Init, data: &FrontierData, dist: InefficiencyDist, kind: FrontierKind,
) -> SFAResult<Array1<f64>> {
    match init {
        Init::Fixed(theta) => {
            FrontierParams::from_theta(theta.view(), data.k(), dist)?;
            Ok(theta.clone())
        }
        Init::Ols => moment_start(data, dist, kind),
    }
}

fn moment_start(
    data: &FrontierData, dist: InefficiencyDist, kind: FrontierKind,
) -> SFAResult<Array1<f64>> {
    if data.n() <= data.k() {
        return Err(SFAError::InvalidInit {
            reason: format!("need more observations ({}) than regressors ({})", data.n(), data.k()),
        });
    }
    let ols = ols_fit(data)?;
    let (m2, m3) = ols.residual_moments();
    if m2 <= 0.0 || !m2.is_finite() {
        return Err(SFAError::InvalidInit {
            reason: format!("OLS residual variance must be positive and finite, got {m2}"),
        });
    }
    let s = kind.sign();
    let oriented_m3 = s * m3;

    let (sigma_u, var_u, mean_u) = match dist {
        InefficiencyDist::Exponential => {
            let sigma_u = if oriented_m3 < 0.0 {
                (-oriented_m3 / 2.0).cbrt()
            } else {
                (WRONG_SKEW_SHARE * m2).sqrt()
            };
            (sigma_u, sigma_u * sigma_u, sigma_u)
        }
        InefficiencyDist::HalfNormal | InefficiencyDist::TruncatedNormal => {
            let c = FRAC_SQRT_2_PI;
            let sigma_u = if oriented_m3 < 0.0 {
                (-oriented_m3 / (c * (4.0 / PI - 1.0))).cbrt()
            } else {
                (WRONG_SKEW_SHARE * m2).sqrt()
            };
            (sigma_u, sigma_u * sigma_u * (1.0 - 2.0 / PI), sigma_u * c)
        }
    };
    let sigma_v = (m2 - var_u).max(NOISE_FLOOR_SHARE * m2).sqrt();

    let mut beta = ols.beta;
    if let Some(j) = data.intercept_column() {
        beta[j] += s * mean_u;
    }
    let start = FrontierParams { beta, sigma_v, sigma_u, mu: 0.0, dist };
    let theta = start.to_theta();
    // Guards against overflow in the moment formulas on extreme data.
    FrontierParams::from_theta(theta.view(), data.k(), dist)?;
    Ok(theta)
}

fn central_moments(e: &Array1<f64>) -> (f64, f64) {
    let n = e.len() as f64;
    let mean = e.sum() / n;
    let (m2, m3) = e.iter().fold((0.0, 0.0), |(a2, a3), &v| {
        let d = v - mean;
        (a2 + d * d, a3 + d * d * d)
    });
    (m2 / n, m3 / n)
}
