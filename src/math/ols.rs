//! Ordinary least squares via the normal equations.
//!
//! The solver fits `y ≈ Xβ` where `X` is the caller's feature matrix with an
//! intercept column of ones prepended, and reports coefficients, the residual
//! sum of squares, and per-coefficient standard errors from the diagonal of
//! `(XᵀX)⁻¹`.
//!
//! The call is a pure function of its inputs: no caching, no shared state, no
//! retries. Identical inputs always yield identical outputs.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::math::kernel;

/// Output of a single OLS fit.
///
/// `coefficients[0]` is the intercept; `coefficients[1..]` follow the input
/// feature columns in order. `std_errors` uses the same ordering. The struct
/// is a plain value with no references into caller memory, so it is safe to
/// pass across any boundary by copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub coefficients: Vec<f64>,
    pub std_errors: Vec<f64>,
    /// Residual sum of squares.
    pub ssr: f64,
    /// Observations used.
    pub nobs: usize,
    /// Coefficient count (`n_predictors + 1`).
    pub nparams: usize,
}

impl RegressionResult {
    /// Degrees of freedom of the residual, always positive for a fit that
    /// succeeded.
    pub fn dof(&self) -> usize {
        self.nobs - self.nparams
    }

    /// Residual variance `ssr / dof`.
    pub fn residual_variance(&self) -> f64 {
        self.ssr / self.dof() as f64
    }

    /// t-ratio for coefficient `j` (`coefficient / std_error`).
    pub fn t_ratio(&self, j: usize) -> f64 {
        self.coefficients[j] / self.std_errors[j]
    }
}

/// Fit `y ≈ intercept + x·β` by ordinary least squares.
///
/// `x_flat` is the feature matrix in row-major order: observation `i`'s
/// feature `j` lives at `x_flat[i * n_predictors + j]`.
///
/// # Errors
/// - `ShapeMismatch` when `x_flat`/`y` lengths disagree with the declared
///   dimensions
/// - `InsufficientObservations` when `n_observations <= n_predictors + 1`
///   (degrees of freedom would be zero or negative)
/// - `SingularMatrix` when `XᵀX` cannot be inverted (collinear predictors,
///   or a constant feature duplicating the intercept)
pub fn fit(
    y: &[f64],
    x_flat: &[f64],
    n_observations: usize,
    n_predictors: usize,
) -> Result<RegressionResult, FitError> {
    if x_flat.len() != n_observations * n_predictors {
        return Err(FitError::ShapeMismatch {
            what: "feature matrix",
            expected: n_observations * n_predictors,
            actual: x_flat.len(),
        });
    }
    if y.len() != n_observations {
        return Err(FitError::ShapeMismatch {
            what: "target vector",
            expected: n_observations,
            actual: y.len(),
        });
    }

    // dof = nobs - nparams must be strictly positive: at dof = 0 the residual
    // variance (and with it every standard error) is undefined.
    let nparams = n_predictors + 1;
    if n_observations <= nparams {
        return Err(FitError::InsufficientObservations {
            nobs: n_observations,
            nparams,
        });
    }

    // Design matrix: intercept column of ones, then the caller's features.
    let x = DMatrix::from_fn(n_observations, nparams, |i, j| {
        if j == 0 {
            1.0
        } else {
            x_flat[i * n_predictors + (j - 1)]
        }
    });
    let yv = DVector::from_column_slice(y);

    let xt = kernel::transpose(&x);
    let xtx = kernel::multiply(&xt, &x)?;
    let xtx_inv = kernel::invert(&xtx)?;

    // β = (XᵀX)⁻¹ Xᵀ y. Shapes are consistent by construction here, so the
    // matrix-vector products use nalgebra operators directly.
    let xty = &xt * &yv;
    let beta = &xtx_inv * &xty;

    let fitted = &x * &beta;
    let residuals = &yv - &fitted;
    let ssr = residuals.norm_squared();

    let dof = n_observations - nparams;
    let sigma2 = ssr / dof as f64;

    let diag = kernel::diagonal(&xtx_inv)?;
    let std_errors: Vec<f64> = diag
        .iter()
        .map(|&d| {
            let se = (sigma2 * d).sqrt();
            // A negative diagonal entry can only arise from severe roundoff;
            // surface it as an unusable standard error, never as NaN.
            if se.is_finite() { se } else { f64::INFINITY }
        })
        .collect();

    Ok(RegressionResult {
        coefficients: beta.iter().copied().collect(),
        std_errors,
        ssr,
        nobs: n_observations,
        nparams,
    })
}
