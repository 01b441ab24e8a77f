//! Cross-sectional stochastic frontier model.
//!
//! This module wires the frontier log-likelihood to the `LogLikelihood`
//! trait so that L-BFGS can maximize it, and adds the post-fit operations a
//! user needs: fitted parameters, efficiency scores, and classical or robust
//! covariance matrices of θ̂.
//!
//! Key ideas:
//! - θ is unconstrained: scales enter as log-variances, so every θ with a
//!   finite decode is a valid model and the optimizer needs no bounds.
//! - There is no analytic gradient; the argmin adapter differences the cost.
//! - During a line search, a trial θ whose scales overflow or underflow is
//!   not an error: it scores `n · LOG_DENSITY_SENTINEL`, which pushes the
//!   search back toward the interior.
//! - Covariances come from the Hessian of the average log-likelihood and the
//!   OPG matrix of per-observation scores, then are rescaled by `1/n` to the
//!   total-log-likelihood scale.
use crate::{
    frontier::{
        core::{
            data::FrontierData,
            efficiency::{EfficiencyScores, efficiency_scores},
            inefficiency::InefficiencyDist,
            init::initial_theta,
            loglik::{LOG_DENSITY_SENTINEL, log_likelihood_with_kind},
            options::FrontierOptions,
            orientation::FrontierKind,
            params::FrontierParams,
        },
        errors::{SFAError, SFAResult},
        models::model_internals::{avg_neg_gradient, calculate_scores, extract_theta},
    },
    inference::{hessian::calc_covariance, opg::calculate_opg_cov},
    optimization::{
        errors::OptResult,
        loglik_optimizer::{LogLikelihood, OptimOutcome, Theta, maximize},
    },
};
use ndarray::{Array1, Array2};
use tracing::debug;

/// Stochastic frontier `y = Xβ + v - s·u` with a chosen inefficiency law.
///
/// After [`fit`](Self::fit), `results` holds the optimizer outcome
/// (including θ̂) and `fitted_params` its model-space decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct FrontierModel {
    /// Law of the one-sided term `u`.
    pub dist: InefficiencyDist,
    /// Production (`ε = v - u`) or cost (`ε = v + u`).
    pub kind: FrontierKind,
    /// Model options.
    pub options: FrontierOptions,
    /// Number of regressors (columns of `X`).
    pub k: usize,
    /// Fit results (populated after `fit`).
    pub results: Option<OptimOutcome>,
    /// Fitted parameters (populated after `fit`).
    pub fitted_params: Option<FrontierParams>,
}

impl FrontierModel {
    pub fn new(
        dist: InefficiencyDist, kind: FrontierKind, options: FrontierOptions, k: usize,
    ) -> FrontierModel {
        FrontierModel { dist, kind, options, k, results: None, fitted_params: None }
    }

    /// Length of θ: `k + 2`, or `k + 3` for the truncated normal.
    pub fn n_params(&self) -> usize {
        self.k + self.dist.n_extra_params()
    }

    /// Fit by maximum likelihood and cache the results.
    ///
    /// ## Steps
    /// 1. Check that `data` has `k` regressors.
    /// 2. Build θ₀ from `options.init` (corrected OLS by default).
    /// 3. Run L-BFGS per `options.mle_opts`.
    /// 4. Decode θ̂ into `fitted_params`.
    ///
    /// ## Errors
    /// - Start-value failures (`InvalidInit`, dimension errors) wrapped in
    ///   `OptError::Model`.
    /// - Optimizer failures.
    ///
    /// A failed fit leaves any previous results untouched.
    pub fn fit(&mut self, data: &FrontierData) -> OptResult<()> {
        self.check_regressors(data)?;
        let theta0 = initial_theta(&self.options.init, data, self.dist, self.kind)?;
        debug!(
            target: "rust_frontier::optim",
            n = data.n(),
            k = self.k,
            dist = %self.dist,
            kind = %self.kind,
            theta0 = ?theta0.as_slice(),
            "starting frontier fit"
        );
        let outcome = maximize(&*self, theta0, data, &self.options.mle_opts)?;
        let params = FrontierParams::from_theta(outcome.theta_hat.view(), self.k, self.dist)?;
        self.results = Some(outcome);
        self.fitted_params = Some(params);
        Ok(())
    }

    /// Maximized log-likelihood `ℓ(θ̂)`.
    ///
    /// # Errors
    /// [`SFAError::ModelNotFitted`] before fitting.
    pub fn loglik(&self) -> SFAResult<f64> {
        self.results.as_ref().map(|r| r.value).ok_or(SFAError::ModelNotFitted)
    }

    /// JLMS inefficiency and Battese–Coelli efficiency for each observation
    /// of `data` at the fitted parameters.
    ///
    /// # Errors
    /// - [`SFAError::ModelNotFitted`] before fitting.
    /// - [`SFAError::DimensionMismatch`] if `data` has the wrong number of
    ///   regressors.
    pub fn efficiency(&self, data: &FrontierData) -> SFAResult<EfficiencyScores> {
        let params = self.fitted_params.as_ref().ok_or(SFAError::ModelNotFitted)?;
        efficiency_scores(params, data, self.kind)
    }

    /// Covariance matrix of θ̂ on the total-log-likelihood scale.
    ///
    /// - `robust = false`: inverse observed information, `J⁺ / n`.
    /// - `robust = true`: sandwich `J⁺ S J⁺ / n`, with `S` the OPG matrix of
    ///   per-observation scores.
    ///
    /// Rows and columns follow the θ layout
    /// `(β, ln σ_v², ln σ_u² [, μ])`.
    ///
    /// # Errors
    /// - [`SFAError::ModelNotFitted`] before fitting.
    /// - [`SFAError::DimensionMismatch`] if `data` does not match the model.
    /// - [`SFAError::Inference`] if scores or the Hessian are not finite.
    pub fn covariance_matrix(&self, data: &FrontierData, robust: bool) -> SFAResult<Array2<f64>> {
        let theta_hat = extract_theta(self)?;
        self.check_regressors(data)?;
        let grad_fn = |theta: &Array1<f64>| avg_neg_gradient(self, theta, data);
        let opg = if robust {
            Some(calculate_opg_cov(&calculate_scores(self, data)?)?)
        } else {
            None
        };
        let avg_cov = calc_covariance(&grad_fn, theta_hat, opg.as_ref())
            .map_err(|err| SFAError::Inference { text: err.to_string() })?;
        Ok(avg_cov / data.n() as f64)
    }

    /// Standard errors of θ̂: square roots of the covariance diagonal.
    ///
    /// # Errors
    /// See [`covariance_matrix`](Self::covariance_matrix).
    pub fn standard_errors(&self, data: &FrontierData, robust: bool) -> SFAResult<Array1<f64>> {
        Ok(self.covariance_matrix(data, robust)?.diag().mapv(f64::sqrt))
    }

    fn check_regressors(&self, data: &FrontierData) -> SFAResult<()> {
        if data.k() != self.k {
            return Err(SFAError::DimensionMismatch {
                context: "model regressors vs design matrix columns",
                expected: self.k,
                found: data.k(),
            });
        }
        Ok(())
    }
}

impl LogLikelihood for FrontierModel {
    type Data = FrontierData;

    /// Log-likelihood at θ.
    ///
    /// Scales that do not decode to finite positive values yield
    /// `n · LOG_DENSITY_SENTINEL` instead of an error, so a line search can
    /// step back; every other evaluator error is returned.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let ll = log_likelihood_with_kind(
            theta.view(),
            data.y.view(),
            data.x.view(),
            self.dist,
            self.kind,
            self.options.debug,
        );
        match ll {
            Ok(value) => Ok(value),
            Err(SFAError::InvalidParameter { .. }) => Ok(data.n() as f64 * LOG_DENSITY_SENTINEL),
            Err(err) => Err(err.into()),
        }
    }

    /// θ must have length `k + n_extra` and decode to valid parameters.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        self.check_regressors(data)?;
        FrontierParams::from_theta(theta.view(), self.k, self.dist)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::core::init::Init;
    use crate::optimization::errors::OptError;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `LogLikelihood` conformance: `value` matches the evaluator, invalid
    //   scales give the sentinel total, `check` validates θ.
    // - Errors from post-fit methods on an unfitted model.
    // - A small fit followed by efficiency scores and covariance matrices.
    //
    // They intentionally DO NOT cover:
    // - Parameter recovery on large simulated samples (integration tests).
    // -------------------------------------------------------------------------

    fn small_data() -> FrontierData {
        let x = array![
            [1.0, 0.10],
            [1.0, 0.35],
            [1.0, 0.52],
            [1.0, 0.80],
            [1.0, 1.10],
            [1.0, 1.31],
            [1.0, 1.62],
            [1.0, 1.95],
            [1.0, 2.20],
            [1.0, 2.43],
            [1.0, 2.71],
            [1.0, 3.00]
        ];
        let u = array![0.05, 0.60, 0.12, 0.90, 0.02, 0.33, 1.40, 0.08, 0.45, 0.20, 0.75, 0.03];
        let v = array![0.04, -0.03, 0.05, -0.02, 0.01, 0.03, -0.05, 0.02, -0.01, 0.04, 0.0, -0.04];
        let y = 1.0 + 0.5 * &x.column(1) + &v - &u;
        FrontierData::new(y, x).expect("valid data")
    }

    #[test]
    // Purpose
    // -------
    // `value` is the evaluator, and undecodable scales give the sentinel.
    //
    // Given
    // -----
    // - A half-normal model with k = 2; θ with ln σ_u² = -3000.
    //
    // Expect
    // ------
    // - `value` equals `log_likelihood_with_kind` at a valid θ.
    // - `value` is `n · LOG_DENSITY_SENTINEL` at the invalid θ, while `check`
    //   rejects it.
    fn value_matches_evaluator_and_maps_invalid_scales() {
        let data = small_data();
        let model = FrontierModel::new(
            InefficiencyDist::HalfNormal,
            FrontierKind::Production,
            FrontierOptions::default(),
            2,
        );
        let theta = array![1.0, 0.5, -3.0, -1.0];
        let bad = array![1.0, 0.5, -3.0, -3000.0];

        let direct = log_likelihood_with_kind(
            theta.view(),
            data.y.view(),
            data.x.view(),
            model.dist,
            model.kind,
            false,
        )
        .expect("valid");

        assert_eq!(model.value(&theta, &data), Ok(direct));
        assert_eq!(model.value(&bad, &data), Ok(12.0 * LOG_DENSITY_SENTINEL));
        assert!(matches!(
            model.check(&bad, &data),
            Err(OptError::Model(SFAError::InvalidParameter { name: "sigma_u", .. }))
        ));
        assert!(matches!(
            model.check(&array![1.0, 0.5, -3.0], &data),
            Err(OptError::Model(SFAError::DimensionMismatch { expected: 4, found: 3, .. }))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Post-fit methods refuse to run before `fit`.
    //
    // Given
    // -----
    // - A freshly constructed exponential model.
    //
    // Expect
    // ------
    // - `ModelNotFitted` from `loglik`, `efficiency`, and
    //   `covariance_matrix`.
    fn post_fit_methods_require_fit() {
        let data = small_data();
        let model = FrontierModel::new(
            InefficiencyDist::Exponential,
            FrontierKind::Production,
            FrontierOptions::default(),
            2,
        );

        assert_eq!(model.loglik(), Err(SFAError::ModelNotFitted));
        assert_eq!(model.efficiency(&data), Err(SFAError::ModelNotFitted));
        assert_eq!(model.covariance_matrix(&data, false), Err(SFAError::ModelNotFitted));
    }

    #[test]
    // Purpose
    // -------
    // A fit improves on its start and supports every post-fit method.
    //
    // Given
    // -----
    // - Twelve observations with one-sided shocks; exponential model started
    //   from corrected OLS.
    //
    // Expect
    // ------
    // - ℓ(θ̂) ≥ ℓ(θ₀); fitted scales positive.
    // - Efficiency scores in (0, 1].
    // - Classical and robust covariances are 4×4, symmetric, with finite,
    //   non-negative diagonals.
    fn fit_then_efficiency_and_covariance() {
        // Arrange
        let data = small_data();
        let dist = InefficiencyDist::Exponential;
        let kind = FrontierKind::Production;
        let mut model = FrontierModel::new(dist, kind, FrontierOptions::default(), 2);
        let theta0 = initial_theta(&Init::Ols, &data, dist, kind).expect("start");
        let ll0 = model.value(&theta0, &data).expect("finite start");

        // Act
        model.fit(&data).expect("fit succeeds");

        // Assert
        assert!(model.loglik().expect("fitted") >= ll0 - 1e-9);
        let params = model.fitted_params.as_ref().expect("fitted params");
        assert!(params.sigma_v > 0.0 && params.sigma_u > 0.0);

        let scores = model.efficiency(&data).expect("scores");
        assert!(scores.efficiency.iter().all(|&te| te > 0.0 && te <= 1.0));

        for robust in [false, true] {
            let cov = model.covariance_matrix(&data, robust).expect("covariance");
            assert_eq!(cov.dim(), (4, 4));
            for i in 0..4 {
                assert!(cov[[i, i]].is_finite() && cov[[i, i]] >= 0.0);
                for j in 0..4 {
                    assert!((cov[[i, j]] - cov[[j, i]]).abs() < 1e-10);
                }
            }
        }
        let se = model.standard_errors(&data, false).expect("standard errors");
        assert_eq!(se.len(), model.n_params());
    }
}
