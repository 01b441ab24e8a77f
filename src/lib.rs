//! rust_frontier: stochastic frontier likelihoods with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the frontier log-likelihood, estimation, and diagnostics to
//! Python via the `_rust_frontier` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`frontier`, `inference`,
//!   `optimization`, `statistical_tests`) as the public crate surface.
//! - With `python-bindings`, define the `ll_cs` function, the
//!   `StochasticFrontier` class and its result wrappers, and the
//!   `statistical_tests` submodule.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input decoding, and error mapping.
//! - `ll_cs(params, y, X, ineff, deb)` mirrors
//!   [`frontier::log_likelihood`] exactly: the integer selector is decoded
//!   with [`InefficiencyDist::from_code`](frontier::InefficiencyDist::from_code)
//!   and errors surface as `ValueError`.
//!
//! Conventions
//! -----------
//! - Python classes live under `_rust_frontier` and
//!   `_rust_frontier.statistical_tests`; submodules are registered in
//!   `sys.modules` for dot-notation imports.
//! - Matrices cross the boundary as lists of rows.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by Rust unit and integration tests; the PyO3
//!   layer is exercised from Python.

pub mod frontier;
pub mod inference;
pub mod optimization;
pub mod statistical_tests;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    frontier::{
        core::{
            inefficiency::InefficiencyDist, loglik::log_likelihood, orientation::FrontierKind,
            params::FrontierParams,
        },
        errors::SFAError,
        models::sfa::FrontierModel,
    },
    optimization::loglik_optimizer::traits::OptimOutcome,
    statistical_tests::{
        likelihood_ratio::{LROutcome, ols_loglik},
        skewness::SkewnessOutcome,
    },
    utils::{
        build_frontier_model, extract_f64_array, extract_f64_matrix, extract_f64_vector,
        extract_frontier_data,
    },
};

/// Cross-sectional stochastic frontier log-likelihood.
///
/// Parameters
/// ----------
/// - `params`: θ = `(β, ln σ_v², ln σ_u² [, μ])`.
/// - `y`: outputs, length n.
/// - `X`: n × k regressors.
/// - `ineff`: 0 exponential, 1 half-normal, 2 truncated normal.
/// - `deb`: emit per-observation `tracing` events.
///
/// Raises `ValueError` for misaligned arrays, invalid scales, or an
/// unknown selector.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    signature = (params, y, x, ineff, deb = false),
    text_signature = "(params, y, X, ineff, deb=False)"
)]
pub fn ll_cs<'py>(
    py: Python<'py>, params: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>,
    ineff: i64, deb: bool,
) -> PyResult<f64> {
    let dist = InefficiencyDist::from_code(ineff)?;
    let params = extract_f64_vector(py, params, "params")?;
    let y = extract_f64_vector(py, y, "y")?;
    let x = extract_f64_matrix(py, x, "X")?;
    Ok(log_likelihood(params.view(), y.view(), x.view(), dist, deb)?)
}

/// StochasticFrontier: Python-facing wrapper around [`FrontierModel`].
///
/// Constructed as
/// `StochasticFrontier(k, dist='half_normal', kind='production', init='ols', ...)`,
/// then `fit(y, X)`. After fitting, `efficiency`, `covariance_matrix`, and
/// `standard_errors` take the same `(y, X)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_frontier")]
pub struct StochasticFrontier {
    pub inner: FrontierModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl StochasticFrontier {
    #[new]
    #[pyo3(
        signature = (
            k,
            dist = None,
            kind = None,
            init = None,
            init_theta = None,
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
            debug = None,
        ),
        text_signature = "(k, /, dist='half_normal', kind='production', init='ols', \
                          init_theta=None, tol_grad=None, tol_cost=None, max_iter=None, \
                          line_searcher=None, lbfgs_mem=None, debug=False)"
    )]
    pub fn new<'py>(
        py: Python<'py>, k: usize, dist: Option<&str>, kind: Option<&str>, init: Option<&str>,
        init_theta: Option<&Bound<'py, PyAny>>, tol_grad: Option<f64>, tol_cost: Option<f64>,
        max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
        debug: Option<bool>,
    ) -> PyResult<Self> {
        let inner = build_frontier_model(
            py,
            k,
            dist,
            kind,
            init,
            init_theta,
            tol_grad,
            tol_cost,
            max_iter,
            line_searcher,
            lbfgs_mem,
            debug,
        )?;
        Ok(StochasticFrontier { inner })
    }

    #[pyo3(text_signature = "(self, y, X)")]
    pub fn fit<'py>(
        &mut self, py: Python<'py>, y: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>,
    ) -> PyResult<()> {
        let data = extract_frontier_data(py, y, x)?;
        self.inner.fit(&data).map_err(SFAError::from)?;
        Ok(())
    }

    /// `(inefficiency, efficiency)`: JLMS `E[u|ε]` and Battese–Coelli
    /// `E[exp(-u)|ε]` per observation.
    #[pyo3(text_signature = "(self, y, X)")]
    pub fn efficiency<'py>(
        &self, py: Python<'py>, y: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>,
    ) -> PyResult<(Vec<f64>, Vec<f64>)> {
        let data = extract_frontier_data(py, y, x)?;
        let scores = self.inner.efficiency(&data)?;
        Ok((scores.inefficiency.to_vec(), scores.efficiency.to_vec()))
    }

    #[pyo3(signature = (y, x, robust = false), text_signature = "(self, y, X, /, robust=False)")]
    pub fn covariance_matrix<'py>(
        &self, py: Python<'py>, y: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>, robust: bool,
    ) -> PyResult<Vec<Vec<f64>>> {
        let data = extract_frontier_data(py, y, x)?;
        let cov = self.inner.covariance_matrix(&data, robust)?;
        Ok(cov.rows().into_iter().map(|row| row.to_vec()).collect())
    }

    #[pyo3(signature = (y, x, robust = false), text_signature = "(self, y, X, /, robust=False)")]
    pub fn standard_errors<'py>(
        &self, py: Python<'py>, y: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>, robust: bool,
    ) -> PyResult<Vec<f64>> {
        let data = extract_frontier_data(py, y, x)?;
        Ok(self.inner.standard_errors(&data, robust)?.to_vec())
    }

    #[getter]
    pub fn loglik(&self) -> PyResult<f64> {
        Ok(self.inner.loglik()?)
    }

    #[getter]
    pub fn results(&self) -> PyResult<FrontierOptimOutcome> {
        match &self.inner.results {
            Some(outcome) => Ok(FrontierOptimOutcome { inner: outcome.clone() }),
            None => Err(SFAError::ModelNotFitted.into()),
        }
    }

    #[getter]
    pub fn fitted_params(&self) -> PyResult<FrontierFittedParams> {
        match &self.inner.fitted_params {
            Some(params) => Ok(FrontierFittedParams { inner: params.clone() }),
            None => Err(SFAError::ModelNotFitted.into()),
        }
    }
}

#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_frontier")]
pub struct FrontierOptimOutcome {
    pub inner: OptimOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl FrontierOptimOutcome {
    #[getter]
    pub fn theta_hat(&self) -> Vec<f64> {
        self.inner.theta_hat.to_vec()
    }

    #[getter]
    pub fn value(&self) -> f64 {
        self.inner.value
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.grad_norm
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }
}

#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_frontier")]
pub struct FrontierFittedParams {
    pub inner: FrontierParams,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl FrontierFittedParams {
    #[getter]
    pub fn beta(&self) -> Vec<f64> {
        self.inner.beta.to_vec()
    }

    #[getter]
    pub fn sigma_v(&self) -> f64 {
        self.inner.sigma_v
    }

    #[getter]
    pub fn sigma_u(&self) -> f64 {
        self.inner.sigma_u
    }

    #[getter]
    pub fn mu(&self) -> f64 {
        self.inner.mu
    }

    #[getter]
    pub fn lambda(&self) -> f64 {
        self.inner.lambda()
    }

    #[getter]
    pub fn gamma(&self) -> f64 {
        self.inner.gamma()
    }

    #[getter]
    pub fn mean_inefficiency(&self) -> f64 {
        self.inner.mean_inefficiency()
    }
}

/// SkewnessTest: M3T test on OLS residuals,
/// `SkewnessTest(residuals, kind='production')`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_frontier.statistical_tests")]
pub struct SkewnessTest {
    inner: SkewnessOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl SkewnessTest {
    #[new]
    #[pyo3(
        signature = (residuals, kind = "production"),
        text_signature = "(residuals, /, kind='production')"
    )]
    pub fn skewness_test<'py>(
        py: Python<'py>, residuals: &Bound<'py, PyAny>, kind: &str,
    ) -> PyResult<SkewnessTest> {
        let kind: FrontierKind = kind.parse()?;
        let e = extract_f64_array(py, residuals)?;
        let inner = SkewnessOutcome::skewness_test(contiguous(&e)?, kind)?;
        Ok(SkewnessTest { inner })
    }

    #[getter]
    pub fn skewness(&self) -> f64 {
        self.inner.skewness()
    }

    #[getter]
    pub fn statistic(&self) -> f64 {
        self.inner.stat()
    }

    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value()
    }

    #[getter]
    pub fn wrong_skew(&self) -> bool {
        self.inner.wrong_skew()
    }
}

/// LikelihoodRatioTest: boundary LR test,
/// `LikelihoodRatioTest(ll_restricted, ll_unrestricted, df=1)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_frontier.statistical_tests")]
pub struct LikelihoodRatioTest {
    inner: LROutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl LikelihoodRatioTest {
    #[new]
    #[pyo3(
        signature = (ll_restricted, ll_unrestricted, df = 1),
        text_signature = "(ll_restricted, ll_unrestricted, /, df=1)"
    )]
    pub fn lr_test(ll_restricted: f64, ll_unrestricted: f64, df: usize) -> PyResult<Self> {
        let inner = LROutcome::lr_test(ll_restricted, ll_unrestricted, df)?;
        Ok(LikelihoodRatioTest { inner })
    }

    #[getter]
    pub fn statistic(&self) -> f64 {
        self.inner.stat()
    }

    #[getter]
    pub fn df(&self) -> usize {
        self.inner.df()
    }

    #[getter]
    pub fn pvalue(&self) -> f64 {
        self.inner.p_value()
    }
}

/// Gaussian log-likelihood of OLS residuals (the `σ_u = 0` model).
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "ols_loglik")]
pub fn py_ols_loglik<'py>(py: Python<'py>, residuals: &Bound<'py, PyAny>) -> PyResult<f64> {
    let e = extract_f64_array(py, residuals)?;
    Ok(ols_loglik(contiguous(&e)?)?)
}

#[cfg(feature = "python-bindings")]
fn contiguous<'a>(arr: &'a numpy::PyReadonlyArray1<'_, f64>) -> PyResult<&'a [f64]> {
    arr.as_slice().map_err(|_| {
        pyo3::exceptions::PyValueError::new_err(
            "residuals must be a 1-D contiguous float64 array or sequence",
        )
    })
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_frontier<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ll_cs, m)?)?;
    m.add_class::<StochasticFrontier>()?;
    m.add_class::<FrontierOptimOutcome>()?;
    m.add_class::<FrontierFittedParams>()?;

    let statistical_tests_mod = PyModule::new(_py, "statistical_tests")?;
    statistical_tests(_py, m, &statistical_tests_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_frontier.statistical_tests", statistical_tests_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn statistical_tests<'py>(
    _py: Python, rust_frontier: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<SkewnessTest>()?;
    m.add_class::<LikelihoodRatioTest>()?;
    m.add_function(wrap_pyfunction!(py_ols_loglik, m)?)?;
    rust_frontier.add_submodule(m)?;
    Ok(())
}
