//! Observation-level technical (in)efficiency from a fitted frontier.
//!
//! Purpose
//! -------
//! Predict the unobserved one-sided term `u_i` from the composed residual
//! `ε_i` using its conditional law `u | ε ~ N⁺(μ*_i, σ*²)`, which is a
//! truncated normal for every supported inefficiency distribution.
//!
//! Key behaviors
//! -------------
//! - Conditional parameters, with `σ² = σ_v² + σ_u²`:
//!   - exponential: `μ* = -ε - σ_v²/σ_u`, `σ* = σ_v`;
//!   - half-normal: `μ* = -ε σ_u²/σ²`, `σ* = σ_u σ_v/σ`;
//!   - truncated normal: `μ* = (-ε σ_u² + μ σ_v²)/σ²`, `σ* = σ_u σ_v/σ`.
//! - Inefficiency (Jondrow–Lovell–Materov–Schmidt):
//!   `E[u|ε] = μ* + σ* φ(z)/Φ(z)`, `z = μ*/σ*`.
//! - Efficiency (Battese–Coelli):
//!   `E[exp(-u)|ε] = exp(-μ* + σ*²/2) Φ(z - σ*)/Φ(z)`.
//! - Both are evaluated in log space through `ln_mills_ratio` and
//!   `ln_norm_cdf` so that large residuals do not produce `0/0`.
//!
//! Conventions
//! -----------
//! - For cost frontiers `ε = -e`; the scores are then cost inefficiency and
//!   cost efficiency, still with `efficiency ∈ (0, 1]`.
//! - Rounding can push `E[u|ε]` marginally below zero or `E[exp(-u)|ε]`
//!   marginally above one in the far tails; both are clamped.
use crate::{
    frontier::{
        core::{
            data::FrontierData, inefficiency::InefficiencyDist, orientation::FrontierKind,
            params::FrontierParams,
        },
        errors::{SFAError, SFAResult},
    },
    optimization::numerical_stability::{ln_mills_ratio, ln_norm_cdf},
};
use ndarray::{Array1, Zip};

/// Per-observation predictions of `u_i` and `exp(-u_i)`.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyScores {
    /// JLMS point predictions `E[u_i | ε_i] ≥ 0`.
    pub inefficiency: Array1<f64>,
    /// Battese–Coelli predictions `E[exp(-u_i) | ε_i] ∈ (0, 1]`.
    pub efficiency: Array1<f64>,
}

impl EfficiencyScores {
    /// Sample average of the efficiency predictions.
    pub fn mean_efficiency(&self) -> f64 {
        self.efficiency.mean().unwrap_or(f64::NAN)
    }
}

/// Efficiency scores for every observation in `data`.
///
/// # Errors
/// - [`SFAError::DimensionMismatch`] if `params.beta.len() != data.k()`.
/// - [`SFAError::NonFiniteData`] if a prediction is not finite (only
///   possible for parameters that did not come from `from_theta`).
pub fn efficiency_scores(
    params: &FrontierParams, data: &FrontierData, kind: FrontierKind,
) -> SFAResult<EfficiencyScores> {
    if params.beta.len() != data.k() {
        return Err(SFAError::DimensionMismatch {
            context: "coefficients vs design matrix columns",
            expected: data.k(),
            found: params.beta.len(),
        });
    }
    let eps = data.residuals(params.beta.view()) * kind.sign();
    let mut inefficiency = Array1::<f64>::zeros(data.n());
    let mut efficiency = Array1::<f64>::zeros(data.n());
    Zip::from(&mut inefficiency).and(&mut efficiency).and(&eps).for_each(|u, te, &e| {
        let (mu_star, sigma_star) = conditional_law(params, e);
        let z = mu_star / sigma_star;
        *u = (mu_star + sigma_star * ln_mills_ratio(z).exp()).max(0.0);
        let ln_te = -mu_star + 0.5 * sigma_star * sigma_star + ln_norm_cdf(z - sigma_star)
            - ln_norm_cdf(z);
        *te = ln_te.exp().min(1.0);
    });
    let bad = inefficiency.iter().chain(efficiency.iter()).position(|v| !v.is_finite());
    if let Some(pos) = bad {
        let index = pos % data.n();
        return Err(SFAError::NonFiniteData { index, value: eps[index] });
    }
    Ok(EfficiencyScores { inefficiency, efficiency })
}

/// Location and scale of `u | ε`.
fn conditional_law(params: &FrontierParams, eps: f64) -> (f64, f64) {
    let var_v = params.sigma_v * params.sigma_v;
    let var_u = params.sigma_u * params.sigma_u;
    let sigma_sq = var_v + var_u;
    match params.dist {
        InefficiencyDist::Exponential => (-eps - var_v / params.sigma_u, params.sigma_v),
        InefficiencyDist::HalfNormal => {
            (-eps * var_u / sigma_sq, params.sigma_u * params.sigma_v / sigma_sq.sqrt())
        }
        InefficiencyDist::TruncatedNormal => (
            (-eps * var_u + params.mu * var_v) / sigma_sq,
            params.sigma_u * params.sigma_v / sigma_sq.sqrt(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Closed-form values at ε = 0 for the half-normal law.
    // - Range and monotonicity of the scores in ε.
    // - Orientation: cost scores at e equal production scores at -e.
    // - Extreme residuals stay finite.
    // -------------------------------------------------------------------------

    fn params(dist: InefficiencyDist, mu: f64) -> FrontierParams {
        FrontierParams { beta: array![0.0], sigma_v: 0.5, sigma_u: 1.0, mu, dist }
    }

    fn intercept_data(y: Array1<f64>) -> FrontierData {
        let n = y.len();
        FrontierData::new(y, Array2::ones((n, 1))).expect("valid data")
    }

    #[test]
    // Purpose
    // -------
    // At ε = 0 the half-normal JLMS prediction is σ* φ(0)/Φ(0).
    //
    // Given
    // -----
    // - σ_v = 0.5, σ_u = 1, a single residual of zero.
    //
    // Expect
    // ------
    // - μ* = 0, σ* = 0.5/√1.25, E[u|ε] = σ* · 2φ(0).
    fn half_normal_jlms_at_zero_residual() {
        let data = intercept_data(array![0.0]);
        let p = params(InefficiencyDist::HalfNormal, 0.0);

        let scores = efficiency_scores(&p, &data, FrontierKind::Production).expect("scores");

        let sigma_star = 0.5 / 1.25_f64.sqrt();
        let phi0 = 1.0 / (2.0 * std::f64::consts::PI).sqrt();
        assert_relative_eq!(scores.inefficiency[0], sigma_star * 2.0 * phi0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Scores are in range and more negative residuals mean more inefficiency.
    //
    // Given
    // -----
    // - Sorted residuals from -3 to 3 under all three laws.
    //
    // Expect
    // ------
    // - inefficiency ≥ 0 and decreasing in ε; efficiency in (0, 1] and
    //   increasing in ε.
    fn scores_are_bounded_and_monotone() {
        let data = intercept_data(array![-3.0, -1.0, -0.2, 0.0, 0.4, 1.5, 3.0]);
        for (dist, mu) in [
            (InefficiencyDist::Exponential, 0.0),
            (InefficiencyDist::HalfNormal, 0.0),
            (InefficiencyDist::TruncatedNormal, 0.7),
        ] {
            let s = efficiency_scores(&params(dist, mu), &data, FrontierKind::Production)
                .expect("scores");
            assert!(s.inefficiency.iter().all(|&u| u >= 0.0));
            assert!(s.efficiency.iter().all(|&te| te > 0.0 && te <= 1.0));
            for w in s.inefficiency.windows(2) {
                assert!(w[0] > w[1], "{dist}: JLMS not decreasing");
            }
            for w in s.efficiency.windows(2) {
                assert!(w[0] < w[1], "{dist}: BC not increasing");
            }
            assert!(s.mean_efficiency() > 0.0 && s.mean_efficiency() <= 1.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // Cost scores are production scores evaluated at the mirrored residual.
    //
    // Given
    // -----
    // - y = (0.4, -0.7) under a cost frontier and y = (-0.4, 0.7) under a
    //   production frontier, β = 0.
    //
    // Expect
    // ------
    // - Identical inefficiency and efficiency vectors.
    fn cost_scores_mirror_production() {
        let p = params(InefficiencyDist::Exponential, 0.0);
        let cost = efficiency_scores(&p, &intercept_data(array![0.4, -0.7]), FrontierKind::Cost)
            .expect("scores");
        let prod = efficiency_scores(
            &p,
            &intercept_data(array![-0.4, 0.7]),
            FrontierKind::Production,
        )
        .expect("scores");

        assert_eq!(cost, prod);
    }

    #[test]
    // Purpose
    // -------
    // Far-tail residuals give finite, clamped scores.
    //
    // Given
    // -----
    // - ε = ±60 with σ_v = 0.5 (z far beyond the normal cdf tables).
    //
    // Expect
    // ------
    // - Finite values; efficiency for the large positive residual is ≤ 1
    //   and inefficiency for it is ≥ 0.
    fn extreme_residuals_stay_finite() {
        let data = intercept_data(array![-60.0, 60.0]);
        for dist in [InefficiencyDist::Exponential, InefficiencyDist::HalfNormal] {
            let s = efficiency_scores(&params(dist, 0.0), &data, FrontierKind::Production)
                .expect("finite scores");
            assert!(s.inefficiency.iter().all(|v| v.is_finite() && *v >= 0.0));
            assert!(s.efficiency.iter().all(|v| v.is_finite() && *v <= 1.0));
        }
    }

    #[test]
    // Purpose
    // -------
    // Coefficient length is checked against the data.
    //
    // Given
    // -----
    // - k = 1 data and a two-coefficient parameter set.
    //
    // Expect
    // ------
    // - `DimensionMismatch { expected: 1, found: 2 }`.
    fn rejects_mismatched_coefficients() {
        let mut p = params(InefficiencyDist::HalfNormal, 0.0);
        p.beta = array![0.0, 1.0];
        let err = efficiency_scores(&p, &intercept_data(array![0.0]), FrontierKind::Production);
        assert!(matches!(err, Err(SFAError::DimensionMismatch { expected: 1, found: 2, .. })));
    }
}
