//! CSV ingest and normalization.
//!
//! This module turns a numeric CSV into clean, aligned columns that are safe
//! to feed to the regression engine.
//!
//! Design goals:
//! - **Strict schema** for requested columns (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Deterministic behavior** (no hidden randomness)
//! - **Separation of concerns**: no fitting logic here

use std::fs::File;
use std::path::Path;

use crate::error::AppError;

/// A row-level problem encountered during ingest. The row is skipped in every
/// requested column so the columns stay aligned.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: aligned numeric columns plus bookkeeping.
#[derive(Debug, Clone)]
pub struct IngestedColumns {
    /// One vector per requested column, in request order. All vectors have
    /// equal length.
    pub columns: Vec<Vec<f64>>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
    pub rows_used: usize,
}

impl IngestedColumns {
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }
}

/// Load the named columns from a headered CSV.
///
/// Header matching is case-insensitive. Rows where any requested cell is
/// missing, unparsable, or non-finite are skipped as a whole and recorded in
/// `row_errors`.
pub fn load_columns(path: &Path, names: &[&str]) -> Result<IngestedColumns, AppError> {
    if names.is_empty() {
        return Err(AppError::new(2, "No columns requested from CSV."));
    }

    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let mut indices = Vec::with_capacity(names.len());
    for name in names {
        let idx = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                let available: Vec<&str> = headers.iter().collect();
                AppError::new(
                    2,
                    format!(
                        "Column '{name}' not found in CSV. Available columns: {}",
                        available.join(", ")
                    ),
                )
            })?;
        indices.push(idx);
    }

    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for (record_idx, record) in reader.records().enumerate() {
        // +2: one for the header line, one for 1-based numbering.
        let line = record_idx + 2;
        rows_read += 1;

        let record = match record {
            Ok(r) => r,
            Err(e) => {
                row_errors.push(RowError {
                    line,
                    message: format!("Unreadable row: {e}"),
                });
                continue;
            }
        };

        let mut parsed = Vec::with_capacity(names.len());
        let mut bad: Option<String> = None;
        for (&idx, name) in indices.iter().zip(names.iter()) {
            let raw = record.get(idx).unwrap_or("");
            match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => parsed.push(v),
                Ok(v) => {
                    bad = Some(format!("Column '{name}' is non-finite ({v})."));
                    break;
                }
                Err(_) => {
                    bad = Some(if raw.is_empty() {
                        format!("Column '{name}' is empty.")
                    } else {
                        format!("Column '{name}' is not numeric ('{raw}').")
                    });
                    break;
                }
            }
        }

        match bad {
            Some(message) => row_errors.push(RowError { line, message }),
            None => {
                for (col, v) in columns.iter_mut().zip(parsed) {
                    col.push(v);
                }
            }
        }
    }

    let rows_used = columns.first().map_or(0, Vec::len);
    if rows_used == 0 {
        return Err(AppError::new(
            2,
            format!("No usable rows in CSV '{}'.", path.display()),
        ));
    }

    Ok(IngestedColumns {
        columns,
        row_errors,
        rows_read,
        rows_used,
    })
}

/// Flatten feature columns to the row-major layout `fit` expects.
pub fn flatten_features(feature_columns: &[Vec<f64>]) -> Vec<f64> {
    let n_rows = feature_columns.first().map_or(0, Vec::len);
    let mut out = Vec::with_capacity(n_rows * feature_columns.len());
    for i in 0..n_rows {
        for col in feature_columns {
            out.push(col[i]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        let unique = format!(
            "pair_stats_ingest_{}_{}.csv",
            std::process::id(),
            contents.len()
        );
        path.push(unique);
        let mut f = File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_requested_columns_case_insensitive() {
        let path = write_temp_csv("Date,Close_A,Close_B\n2024-01-02,10.0,20.0\n2024-01-03,11.0,21.5\n");
        let table = load_columns(&path, &["close_a", "CLOSE_B"]).unwrap();
        assert_eq!(table.rows_used, 2);
        assert_eq!(table.columns[0], vec![10.0, 11.0]);
        assert_eq!(table.columns[1], vec![20.0, 21.5]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn skips_bad_rows_and_reports_them() {
        let path = write_temp_csv("y,x\n1.0,2.0\n,3.0\n2.0,oops\n3.0,4.0\n");
        let table = load_columns(&path, &["y", "x"]).unwrap();
        assert_eq!(table.rows_read, 4);
        assert_eq!(table.rows_used, 2);
        assert_eq!(table.row_errors.len(), 2);
        assert_eq!(table.columns[0], vec![1.0, 3.0]);
        assert_eq!(table.columns[1], vec![2.0, 4.0]);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_column_is_an_error() {
        let path = write_temp_csv("a,b\n1,2\n");
        let err = load_columns(&path, &["a", "spread"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn flatten_is_row_major() {
        let cols = vec![vec![1.0, 2.0], vec![10.0, 20.0]];
        assert_eq!(flatten_features(&cols), vec![1.0, 10.0, 2.0, 20.0]);
    }
}
