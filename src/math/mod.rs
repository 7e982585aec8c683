//! Mathematical core: dense matrix kernel and the OLS solver.

pub mod kernel;
pub mod ols;

pub use ols::{RegressionResult, fit};
