//! Frontier parameters in model space and their θ-space encoding.
//!
//! Purpose
//! -------
//! Map the unconstrained optimizer vector
//! `θ = (β_0 … β_{k-1}, ln σ_v², ln σ_u² [, μ])` to validated model-space
//! parameters and back, and expose the derived quantities users report
//! (total variance, `λ`, `γ`, mean inefficiency).
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ.len() == k + dist.n_extra_params()`.
//! - After [`FrontierParams::from_theta`], `β` and `μ` are finite and
//!   `σ_v`, `σ_u` are finite and strictly positive.
//! - `μ` is `0.0` and not part of θ for the exponential and half-normal
//!   laws.
use crate::{
    frontier::{
        core::inefficiency::InefficiencyDist,
        errors::{SFAError, SFAResult},
    },
    optimization::numerical_stability::{
        FRAC_SQRT_2_PI, ln_mills_ratio, log_var_from_scale, scale_from_log_var,
    },
};
use ndarray::{Array1, ArrayView1, s};

/// Validated model-space parameters of a stochastic frontier.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierParams {
    /// Frontier coefficients, one per column of `X`.
    pub beta: Array1<f64>,
    /// Standard deviation of the symmetric noise `v`.
    pub sigma_v: f64,
    /// Scale of the one-sided term `u`.
    pub sigma_u: f64,
    /// Pre-truncation mean of `u` (truncated normal only, else `0.0`).
    pub mu: f64,
    pub dist: InefficiencyDist,
}

impl FrontierParams {
    /// Decode and validate θ for a model with `k` regressors.
    ///
    /// # Errors
    /// - [`SFAError::DimensionMismatch`] if `θ.len() != k + n_extra`.
    /// - [`SFAError::InvalidParameter`] if a coefficient or `μ` is not finite,
    ///   or if `exp(½ ln σ²)` is not finite and strictly positive for either
    ///   scale (NaN input, underflow to zero, overflow to infinity).
    pub fn from_theta(
        theta: ArrayView1<'_, f64>, k: usize, dist: InefficiencyDist,
    ) -> SFAResult<Self> {
        let expected = k + dist.n_extra_params();
        if theta.len() != expected {
            return Err(SFAError::DimensionMismatch {
                context: "parameter vector length",
                expected,
                found: theta.len(),
            });
        }
        if let Some(&value) = theta.slice(s![..k]).iter().find(|v| !v.is_finite()) {
            return Err(SFAError::InvalidParameter {
                name: "beta",
                value,
                reason: "coefficients must be finite",
            });
        }
        let sigma_v = checked_scale("sigma_v", theta[k])?;
        let sigma_u = checked_scale("sigma_u", theta[k + 1])?;
        let mu = if dist.has_location() { theta[k + 2] } else { 0.0 };
        if !mu.is_finite() {
            return Err(SFAError::InvalidParameter {
                name: "mu",
                value: mu,
                reason: "location must be finite",
            });
        }
        Ok(Self { beta: theta.slice(s![..k]).to_owned(), sigma_v, sigma_u, mu, dist })
    }

    /// Inverse of [`from_theta`](Self::from_theta).
    pub fn to_theta(&self) -> Array1<f64> {
        let mut theta: Vec<f64> = self.beta.to_vec();
        theta.push(log_var_from_scale(self.sigma_v));
        theta.push(log_var_from_scale(self.sigma_u));
        if self.dist.has_location() {
            theta.push(self.mu);
        }
        Array1::from(theta)
    }

    /// `σ² = σ_v² + σ_u²`.
    pub fn sigma_sq(&self) -> f64 {
        self.sigma_v * self.sigma_v + self.sigma_u * self.sigma_u
    }

    /// `λ = σ_u / σ_v`.
    pub fn lambda(&self) -> f64 {
        self.sigma_u / self.sigma_v
    }

    /// `γ = σ_u² / σ²`, the share of the composed variance parameter
    /// attributable to inefficiency. Lies in `(0, 1)`.
    pub fn gamma(&self) -> f64 {
        self.sigma_u * self.sigma_u / self.sigma_sq()
    }

    /// `E[u]` under the fitted inefficiency law.
    ///
    /// Exponential `σ_u`; half-normal `σ_u √(2/π)`; truncated normal
    /// `μ + σ_u φ(μ/σ_u)/Φ(μ/σ_u)`.
    pub fn mean_inefficiency(&self) -> f64 {
        match self.dist {
            InefficiencyDist::Exponential => self.sigma_u,
            InefficiencyDist::HalfNormal => self.sigma_u * FRAC_SQRT_2_PI,
            InefficiencyDist::TruncatedNormal => {
                self.mu + self.sigma_u * ln_mills_ratio(self.mu / self.sigma_u).exp()
            }
        }
    }
}

fn checked_scale(name: &'static str, log_var: f64) -> SFAResult<f64> {
    let scale = scale_from_log_var(log_var);
    if !scale.is_finite() {
        return Err(SFAError::InvalidParameter {
            name,
            value: log_var,
            reason: "log-variance maps to a non-finite scale",
        });
    }
    if scale <= 0.0 {
        return Err(SFAError::InvalidParameter {
            name,
            value: log_var,
            reason: "log-variance maps to a non-positive scale",
        });
    }
    Ok(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - θ decoding, validation failures, and the inverse mapping.
    // - Derived quantities (σ², λ, γ, E[u]).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Decoding a valid truncated-normal θ and re-encoding it is lossless.
    //
    // Given
    // -----
    // - k = 2, θ = (1.5, -0.3, ln 0.25, ln 1.0, 0.2).
    //
    // Expect
    // ------
    // - σ_v = 0.5, σ_u = 1, μ = 0.2; `to_theta` returns θ.
    fn from_theta_decodes_and_round_trips() {
        // Arrange
        let theta = array![1.5, -0.3, 0.25_f64.ln(), 0.0, 0.2];

        // Act
        let p = FrontierParams::from_theta(theta.view(), 2, InefficiencyDist::TruncatedNormal)
            .expect("valid θ");

        // Assert
        assert_eq!(p.beta, array![1.5, -0.3]);
        assert_relative_eq!(p.sigma_v, 0.5, epsilon = 1e-15);
        assert_relative_eq!(p.sigma_u, 1.0, epsilon = 1e-15);
        assert_eq!(p.mu, 0.2);
        for (a, b) in p.to_theta().iter().zip(theta.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-14);
        }
    }

    #[test]
    // Purpose
    // -------
    // Length and scale problems are rejected before any evaluation.
    //
    // Given
    // -----
    // - A half-normal θ one entry short; log-variances of NaN, -2000, +2000.
    //
    // Expect
    // ------
    // - `DimensionMismatch` for the length; `InvalidParameter` naming the
    //   offending scale otherwise.
    fn from_theta_rejects_bad_lengths_and_scales() {
        let dist = InefficiencyDist::HalfNormal;
        assert!(matches!(
            FrontierParams::from_theta(array![0.0, 0.0].view(), 1, dist),
            Err(SFAError::DimensionMismatch { expected: 3, found: 2, .. })
        ));
        for bad in [f64::NAN, -2000.0, 2000.0] {
            match FrontierParams::from_theta(array![0.0, bad, 0.0].view(), 1, dist) {
                Err(SFAError::InvalidParameter { name, .. }) => assert_eq!(name, "sigma_v"),
                other => panic!("expected InvalidParameter, got {other:?}"),
            }
            match FrontierParams::from_theta(array![0.0, 0.0, bad].view(), 1, dist) {
                Err(SFAError::InvalidParameter { name, .. }) => assert_eq!(name, "sigma_u"),
                other => panic!("expected InvalidParameter, got {other:?}"),
            }
        }
        assert!(matches!(
            FrontierParams::from_theta(array![f64::INFINITY, 0.0, 0.0].view(), 1, dist),
            Err(SFAError::InvalidParameter { name: "beta", .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Derived quantities follow their definitions.
    //
    // Given
    // -----
    // - σ_v = 0.6, σ_u = 0.8 under each law, μ = 0 for the truncated normal.
    //
    // Expect
    // ------
    // - σ² = 1, λ = 4/3, γ = 0.64; E[u] = σ_u, σ_u√(2/π), σ_u√(2/π).
    fn derived_quantities_match_definitions() {
        let theta = |extra: bool| {
            let mut v = vec![0.0, 2.0 * 0.6_f64.ln(), 2.0 * 0.8_f64.ln()];
            if extra {
                v.push(0.0);
            }
            Array1::from(v)
        };
        let exp =
            FrontierParams::from_theta(theta(false).view(), 1, InefficiencyDist::Exponential)
                .expect("valid");
        let hn = FrontierParams::from_theta(theta(false).view(), 1, InefficiencyDist::HalfNormal)
            .expect("valid");
        let tn =
            FrontierParams::from_theta(theta(true).view(), 1, InefficiencyDist::TruncatedNormal)
                .expect("valid");

        assert_relative_eq!(hn.sigma_sq(), 1.0, epsilon = 1e-14);
        assert_relative_eq!(hn.lambda(), 4.0 / 3.0, epsilon = 1e-14);
        assert_relative_eq!(hn.gamma(), 0.64, epsilon = 1e-14);
        assert_relative_eq!(exp.mean_inefficiency(), 0.8, epsilon = 1e-14);
        let hn_mean = 0.8 * (2.0 / std::f64::consts::PI).sqrt();
        assert_relative_eq!(hn.mean_inefficiency(), hn_mean, epsilon = 1e-14);
        assert_relative_eq!(tn.mean_inefficiency(), hn_mean, epsilon = 1e-12);
    }
}
