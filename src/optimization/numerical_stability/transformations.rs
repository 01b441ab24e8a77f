//! Numerical stability utilities.
//!
//! Provides safe implementations of the normal-distribution primitives and
//! scale transforms used by composed-error likelihoods. The naïve forms
//! (`ln(Φ(z))`, `exp(θ)` for a log-variance) underflow or overflow long
//! before the model itself becomes meaningless, so every routine here stays
//! in log space and guards its branch points explicitly.
//!
//! # Provided items
//! - [`EIGEN_EPS`], [`GENERAL_TOL`]: shared numerical tolerances.
//! - [`ln_norm_pdf(z)`]: `ln φ(z)` without evaluating `exp`.
//! - [`norm_cdf(z)`]: `Φ(z)` via `erfc`, accurate in the lower tail.
//! - [`ln_norm_cdf(z)`]: `ln Φ(z)` that stays finite for every finite `z`.
//! - [`ln_norm_cdf_scaled(z)`]: `ln Φ(z) + z²/2`, the lower-tail bracket
//!   with its leading Gaussian term removed.
//! - [`ln_mills_ratio(z)`]: `ln(φ(z) / Φ(z))`, the inverse Mills ratio in
//!   log space.
//! - [`scale_from_log_var(θ)`] / [`log_var_from_scale(σ)`]: mapping between
//!   an unconstrained log-variance and a positive standard deviation.
//!
//! # Rationale
//! Stochastic frontier densities are products of a normal pdf and a normal
//! cdf evaluated at arguments that become very negative when the one-sided
//! scale is small relative to the noise. Working with `ln Φ` directly keeps
//! the limit `σ_u → 0` well defined.
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

/// Eigenvalue floor used when forming pseudoinverses of information
/// matrices. Eigenvalues at or below this threshold are treated as zero.
pub const EIGEN_EPS: f64 = 1e-10;

/// Generic tolerance for comparisons against zero in model-space checks.
pub const GENERAL_TOL: f64 = 1e-12;

/// `ln(√(2π))`.
pub const LN_SQRT_2PI: f64 = 0.918_938_533_204_672_8;

/// Below this argument `ln Φ(z)` switches to the asymptotic tail series.
const LN_CDF_LOWER_CUTOFF: f64 = -20.0;

/// Above this argument `ln Φ(z)` is computed as `ln1p(-Φ(-z))`.
const LN_CDF_UPPER_CUTOFF: f64 = 6.0;

/// Log-density of the standard normal: `ln φ(z) = -z²/2 - ln √(2π)`.
#[inline]
pub fn ln_norm_pdf(z: f64) -> f64 {
    -0.5 * z * z - LN_SQRT_2PI
}

/// Standard normal cdf `Φ(z) = ½ erfc(-z/√2)`.
///
/// Using `erfc` rather than `1 + erf` keeps relative accuracy in the lower
/// tail, where `Φ(z)` is tiny.
#[inline]
pub fn norm_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

/// Numerically stable `ln Φ(z)`.
///
/// Three regimes:
///
/// - `z > 6`: `Φ(z)` is within `1e-9` of one, so `ln Φ(z) = ln1p(-Φ(-z))`
///   keeps the tiny negative value instead of rounding to zero.
/// - `-20 ≤ z ≤ 6`: `ln(½ erfc(-z/√2))` is accurate to machine precision.
/// - `z < -20`: the Mills-ratio asymptotic expansion
///   `ln Φ(z) = -z²/2 - ln(-z) - ln √(2π) + ln(1 - 1/z² + 3/z⁴ - …)`,
///   truncated after five correction terms (error below `1e-11`).
///
/// # Returns
/// - A finite value for every finite `z`; `NaN` only for `NaN` input;
///   `0.0` for `+∞` and `-∞` for `-∞`.
pub fn ln_norm_cdf(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z > LN_CDF_UPPER_CUTOFF {
        (-norm_cdf(-z)).ln_1p()
    } else if z >= LN_CDF_LOWER_CUTOFF {
        norm_cdf(z).ln()
    } else if z == f64::NEG_INFINITY {
        f64::NEG_INFINITY
    } else {
        -0.5 * z * z + lower_tail_scaled(z)
    }
}

/// `ln Φ(z) + z²/2`, evaluated without forming either term for `z < -20`.
///
/// In the lower tail `ln Φ(z) ≈ -z²/2 - ln(-z)`, so adding `z²/2` back to
/// [`ln_norm_cdf`] cancels two numbers of size `z²/2`. Densities that carry
/// a matching `+z²/2` elsewhere (the normal–exponential law as `σ_u → 0`)
/// call this instead and keep full precision at any `z`.
///
/// # Returns
/// - About `-ln(-z) - ln √(2π)` as `z → -∞`; finite for every finite `z`.
pub fn ln_norm_cdf_scaled(z: f64) -> f64 {
    if z.is_nan() || z == f64::NEG_INFINITY {
        return f64::NAN;
    }
    if z < LN_CDF_LOWER_CUTOFF { lower_tail_scaled(z) } else { ln_norm_cdf(z) + 0.5 * z * z }
}

/// Mills-ratio series for `ln Φ(z) + z²/2` with five correction terms.
fn lower_tail_scaled(z: f64) -> f64 {
    let z2 = z * z;
    let mut term = 1.0;
    let mut correction = 0.0;
    let mut double_factorial = 1.0;
    for k in 1..=5 {
        double_factorial *= (2 * k - 1) as f64;
        term /= -z2;
        correction += double_factorial * term;
    }
    -(-z).ln() - LN_SQRT_2PI + correction.ln_1p()
}

/// `ln(φ(z) / Φ(z))`, the log of the inverse Mills ratio.
///
/// For very negative `z` this tends to `ln(-z)`; the difference of two
/// stable logs avoids the `0/0` of the direct ratio.
#[inline]
pub fn ln_mills_ratio(z: f64) -> f64 {
    ln_norm_pdf(z) - ln_norm_cdf(z)
}

/// Map an unconstrained log-variance `θ = ln σ²` to the standard deviation
/// `σ = exp(θ/2)`.
///
/// The result can be `0.0` (underflow, `θ < -1490`) or `+∞` (overflow);
/// callers are expected to validate positivity and finiteness.
#[inline]
pub fn scale_from_log_var(theta: f64) -> f64 {
    (0.5 * theta).exp()
}

/// Inverse of [`scale_from_log_var`]: `ln σ² = 2 ln σ`.
#[inline]
pub fn log_var_from_scale(sigma: f64) -> f64 {
    2.0 * sigma.ln()
}

/// `√(2/π)`, the mean of a standard half-normal variate.
pub const FRAC_SQRT_2_PI: f64 = 0.797_884_560_802_865_4;
