//! Export fit results to JSON.
//!
//! The JSON file is the "portable" representation of a fit: the result value
//! plus the coefficient names, so downstream scripts do not need to know the
//! column order that produced it.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::error::AppError;
use crate::math::RegressionResult;

/// Schema of the exported file.
#[derive(Debug, Clone, Serialize)]
pub struct ResultFile {
    pub tool: String,
    /// Coefficient names, index-aligned with the result vectors
    /// (`"intercept"` first).
    pub coefficient_names: Vec<String>,
    pub result: RegressionResult,
}

/// Write a regression result as pretty-printed JSON.
pub fn write_result_json(
    path: &Path,
    result: &RegressionResult,
    coefficient_names: &[String],
) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create result JSON '{}': {e}", path.display()),
        )
    })?;

    let out = ResultFile {
        tool: "pstat".to_string(),
        coefficient_names: coefficient_names.to_vec(),
        result: result.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
    Ok(())
}
