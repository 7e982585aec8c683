//! Statistical procedures built on the OLS engine.

pub mod adf;
pub mod pairs;
