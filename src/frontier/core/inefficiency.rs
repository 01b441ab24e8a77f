//! One-sided inefficiency distributions and their composed log densities.
//!
//! Purpose
//! -------
//! Decode the inefficiency-distribution selector and evaluate the closed-form
//! log density of the composed error `ε = v - u`, `v ~ N(0, σ_v²)`, for each
//! supported law of `u ≥ 0`.
//!
//! Key behaviors
//! -------------
//! - [`InefficiencyDist`] parses from host integer codes
//!   (`0 = exponential`, `1 = half-normal`, `2 = truncated normal`) and from
//!   names; anything else is [`SFAError::UnsupportedSelector`].
//! - [`DensityKernel`] precomputes every parameter-only quantity once per
//!   likelihood call, so the per-observation work is a handful of flops plus
//!   one `ln Φ` evaluation.
//!
//! Invariants & assumptions
//! ------------------------
//! - `σ_v`, `σ_u` are finite and strictly positive and `μ` is finite; this is
//!   guaranteed by `FrontierParams::from_theta`.
//! - `ln Φ` is always evaluated through `ln_norm_cdf` or
//!   `ln_norm_cdf_scaled`, so the densities stay finite for very negative
//!   arguments. A non-finite result can still arise
//!   from non-finite data or from `∞ - ∞` at extreme scale ratios; the caller
//!   substitutes a sentinel in that case.
//!
//! Conventions
//! -----------
//! Densities are for the production form. With `σ² = σ_v² + σ_u²` and
//! `λ = σ_u / σ_v`:
//!
//! - exponential(σ_u), with `z = -ε/σ_v - σ_v/σ_u`:
//!   `ln f = -ln σ_u + ε/σ_u + σ_v²/(2σ_u²) + ln Φ(z)`
//!   `     = -ln σ_u - ε²/(2σ_v²) + [ln Φ(z) + z²/2]`
//!   The second form is used for `z < 0`, where `σ_v²/(2σ_u²)` and `ln Φ(z)`
//!   would otherwise cancel as `σ_u → 0`.
//! - half-normal(σ_u):
//!   `ln f = ln 2 - ln σ + ln φ(ε/σ) + ln Φ(-ελ/σ)`
//! - truncated normal N⁺(μ, σ_u²):
//!   `ln f = -ln σ + ln φ((ε + μ)/σ) + ln Φ(μ/(σλ) - ελ/σ) - ln Φ(μ/σ_u)`
use crate::{
    frontier::{
        core::params::FrontierParams,
        errors::{SFAError, SFAResult},
    },
    optimization::numerical_stability::{ln_norm_cdf, ln_norm_cdf_scaled, ln_norm_pdf},
};
use std::f64::consts::LN_2;
use std::fmt;
use std::str::FromStr;

/// Distribution of the one-sided inefficiency term `u`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InefficiencyDist {
    Exponential,
    HalfNormal,
    TruncatedNormal,
}

impl InefficiencyDist {
    /// Decode a host integer selector.
    ///
    /// # Errors
    /// [`SFAError::UnsupportedSelector`] for codes other than 0, 1, 2.
    pub fn from_code(code: i64) -> SFAResult<Self> {
        match code {
            0 => Ok(InefficiencyDist::Exponential),
            1 => Ok(InefficiencyDist::HalfNormal),
            2 => Ok(InefficiencyDist::TruncatedNormal),
            other => Err(SFAError::UnsupportedSelector { tag: other.to_string() }),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            InefficiencyDist::Exponential => 0,
            InefficiencyDist::HalfNormal => 1,
            InefficiencyDist::TruncatedNormal => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            InefficiencyDist::Exponential => "exponential",
            InefficiencyDist::HalfNormal => "half_normal",
            InefficiencyDist::TruncatedNormal => "truncated_normal",
        }
    }

    /// Number of θ entries after the `k` slope coefficients:
    /// `ln σ_v²`, `ln σ_u²`, and `μ` for the truncated normal.
    pub fn n_extra_params(self) -> usize {
        match self {
            InefficiencyDist::Exponential | InefficiencyDist::HalfNormal => 2,
            InefficiencyDist::TruncatedNormal => 3,
        }
    }

    pub fn has_location(self) -> bool {
        self == InefficiencyDist::TruncatedNormal
    }
}

impl fmt::Display for InefficiencyDist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InefficiencyDist {
    type Err = SFAError;

    /// Case-insensitive names: `exponential`/`exp`, `half_normal`/`hnormal`,
    /// `truncated_normal`/`tnormal` (hyphens are accepted for underscores).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        match key.as_str() {
            "exponential" | "exp" => Ok(InefficiencyDist::Exponential),
            "half_normal" | "hnormal" => Ok(InefficiencyDist::HalfNormal),
            "truncated_normal" | "tnormal" => Ok(InefficiencyDist::TruncatedNormal),
            _ => Err(SFAError::UnsupportedSelector { tag: s.to_string() }),
        }
    }
}

/// Parameter-only pieces of a composed log density, computed once per call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityKernel {
    dist: InefficiencyDist,
    sigma_v: f64,
    sigma_u: f64,
    mu: f64,
    /// `σ = √(σ_v² + σ_u²)`.
    sigma: f64,
    /// `λ = σ_u / σ_v`.
    lambda: f64,
    /// Everything in `ln f` that does not depend on `ε`.
    offset: f64,
}

impl DensityKernel {
    pub fn new(params: &FrontierParams) -> Self {
        let (sigma_v, sigma_u, mu, dist) =
            (params.sigma_v, params.sigma_u, params.mu, params.dist);
        let sigma = sigma_v.hypot(sigma_u);
        let lambda = sigma_u / sigma_v;
        let offset = match dist {
            InefficiencyDist::Exponential => -sigma_u.ln(),
            InefficiencyDist::HalfNormal => LN_2 - sigma.ln(),
            InefficiencyDist::TruncatedNormal => -sigma.ln() - ln_norm_cdf(mu / sigma_u),
        };
        Self { dist, sigma_v, sigma_u, mu, sigma, lambda, offset }
    }

    /// `ln f(ε)` for the production-form composed error.
    #[inline]
    pub fn ln_density(&self, eps: f64) -> f64 {
        match self.dist {
            InefficiencyDist::Exponential => {
                let ratio = self.sigma_v / self.sigma_u;
                let z = -eps / self.sigma_v - ratio;
                if z < 0.0 {
                    let w = eps / self.sigma_v;
                    self.offset - 0.5 * w * w + ln_norm_cdf_scaled(z)
                } else {
                    self.offset + eps / self.sigma_u + 0.5 * ratio * ratio + ln_norm_cdf(z)
                }
            }
            InefficiencyDist::HalfNormal => {
                let z = eps / self.sigma;
                self.offset + ln_norm_pdf(z) + ln_norm_cdf(-z * self.lambda)
            }
            InefficiencyDist::TruncatedNormal => {
                let z = eps / self.sigma;
                self.offset
                    + ln_norm_pdf((eps + self.mu) / self.sigma)
                    + ln_norm_cdf(self.mu / (self.sigma * self.lambda) - z * self.lambda)
            }
        }
    }
}
