//! utils: Python-side decoding for the PyO3 bindings.
//!
//! Everything here is compiled only with `python-bindings`. The helpers turn
//! host objects (numpy arrays, pandas objects, nested sequences, strings)
//! into the crate's Rust types, mapping every failure to a Python exception
//! before any numeric code runs.

#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyTypeError, PyValueError},
    prelude::*,
    types::PyAny,
};

#[cfg(feature = "python-bindings")]
use crate::{
    frontier::{
        core::{
            data::FrontierData, inefficiency::InefficiencyDist, init::Init,
            options::FrontierOptions, orientation::FrontierKind,
        },
        errors::SFAError,
        models::sfa::FrontierModel,
    },
    optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
    PyUntypedArrayMethods, // .shape()
};

/// Borrow a contiguous `f64` vector from a numpy array, a pandas Series, or
/// any sequence of floats (copied in the last case).
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D host array into an owned `Array1`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vector<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 1-D contiguous float64 array or sequence"))
    })?;
    Ok(Array1::from(slice.to_vec()))
}

/// Copy a 2-D host matrix (numpy array, pandas DataFrame, or nested
/// sequence) into an owned row-major `Array2`.
///
/// The object goes through `numpy.ascontiguousarray(obj, "float64")`, so
/// Fortran-ordered and integer inputs arrive as C-ordered floats.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_matrix<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<Array2<f64>> {
    let contiguous = py.import("numpy")?.call_method1("ascontiguousarray", (raw_data, "float64"))?;
    let arr: PyReadonlyArray2<f64> = contiguous.extract().map_err(|_| {
        PyTypeError::new_err(format!("{name} must be a 2-D array-like of float64"))
    })?;
    let (rows, cols) = (arr.shape()[0], arr.shape()[1]);
    let slice = arr.as_slice().map_err(|_| {
        PyValueError::new_err(format!("{name} must be C-contiguous after conversion"))
    })?;
    Array2::from_shape_vec((rows, cols), slice.to_vec())
        .map_err(|err| PyValueError::new_err(format!("{name}: {err}")))
}

/// Decode `(y, X)` into validated [`FrontierData`].
#[cfg(feature = "python-bindings")]
pub fn extract_frontier_data<'py>(
    py: Python<'py>, y: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>,
) -> PyResult<FrontierData> {
    let y = extract_f64_vector(py, y, "y")?;
    let x = extract_f64_matrix(py, x, "X")?;
    Ok(FrontierData::new(y, x)?)
}

/// Assemble a [`FrontierModel`] from Python keyword arguments.
#[cfg(feature = "python-bindings")]
pub fn build_frontier_model<'py>(
    py: Python<'py>, k: usize, dist: Option<&str>, kind: Option<&str>, init: Option<&str>,
    init_theta: Option<&Bound<'py, PyAny>>, tol_grad: Option<f64>, tol_cost: Option<f64>,
    max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
    debug: Option<bool>,
) -> PyResult<FrontierModel> {
    if k == 0 {
        return Err(PyValueError::new_err("k must be at least 1"));
    }
    let dist: InefficiencyDist = dist.unwrap_or("half_normal").parse()?;
    let kind: FrontierKind = kind.unwrap_or("production").parse()?;

    let init_policy = extract_init(py, init, init_theta)?;
    let mle_opts = extract_mle_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?;
    let opts = FrontierOptions::new(init_policy, mle_opts, debug.unwrap_or(false));

    Ok(FrontierModel::new(dist, kind, opts, k))
}

#[cfg(feature = "python-bindings")]
fn extract_init<'py>(
    py: Python<'py>, init: Option<&str>, init_theta: Option<&Bound<'py, PyAny>>,
) -> PyResult<Init> {
    match init.unwrap_or("ols") {
        "ols" => Ok(Init::ols()),
        "fixed" => {
            let theta_any = init_theta.ok_or_else(|| {
                PyValueError::new_err("init_theta must be provided when init='fixed'")
            })?;
            let theta = extract_f64_vector(py, theta_any, "init_theta")?;
            Ok(Init::fixed(theta)?)
        }
        other => Err(PyValueError::new_err(format!(
            "invalid init policy {other:?} (expected 'ols' or 'fixed')"
        ))),
    }
}

#[cfg(feature = "python-bindings")]
fn extract_mle_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    // All three unset means "use the defaults", not "no stopping rule".
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        Tolerances::default()
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter).map_err(SFAError::from)?
    };

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(SFAError::from)?,
        None => LineSearcher::MoreThuente,
    };

    let opts = MLEOptions::new(tols, ls, false, lbfgs_mem).map_err(SFAError::from)?;

    Ok(opts)
}
