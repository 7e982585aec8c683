//! Synthetic data generation for demos and tests.

pub mod synthetic;

pub use synthetic::{SyntheticRegression, ar1_series, linear_dataset};
