//! Dense matrix primitives for normal-equation OLS.
//!
//! The solver only needs four operations: transpose, multiply, invert, and
//! diagonal extraction. We build on `nalgebra`'s dense storage but keep the
//! failure modes explicit:
//!
//! - `multiply` checks inner dimensions instead of panicking
//! - `invert` runs Gauss-Jordan elimination with partial pivoting and reports
//!   `SingularMatrix` when no usable pivot exists, so near-collinear systems
//!   are rejected here rather than surfacing as `NaN`/`Inf` downstream
//!
//! All arithmetic is f64. Everything is pure and allocation-local: each call
//! constructs, uses, and discards its own matrices.

use nalgebra::DMatrix;

use crate::error::FitError;

/// Relative singularity threshold for pivot selection.
///
/// A pivot candidate is rejected when `|pivot| < EPS * max(1, max|entry|)`,
/// where the max entry is taken over the *input* matrix. Scaling by the input
/// magnitude keeps the test meaningful for matrices far from unit scale;
/// the `max(1, _)` floor keeps it meaningful for tiny ones.
const SINGULARITY_EPS: f64 = 1e-12;

/// Transpose of `m`. Pure structural transform, no failure mode.
pub fn transpose(m: &DMatrix<f64>) -> DMatrix<f64> {
    m.transpose()
}

/// Matrix product `a * b`, with an explicit inner-dimension check.
pub fn multiply(a: &DMatrix<f64>, b: &DMatrix<f64>) -> Result<DMatrix<f64>, FitError> {
    if a.ncols() != b.nrows() {
        return Err(FitError::DimensionMismatch {
            what: "matrix product",
            left: a.ncols(),
            right: b.nrows(),
        });
    }
    Ok(a * b)
}

/// Inverse of a square matrix via Gauss-Jordan elimination with partial
/// pivoting (largest-magnitude pivot in the remaining column).
pub fn invert(m: &DMatrix<f64>) -> Result<DMatrix<f64>, FitError> {
    let n = m.nrows();
    if m.ncols() != n {
        return Err(FitError::DimensionMismatch {
            what: "matrix inverse",
            left: n,
            right: m.ncols(),
        });
    }

    let scale = m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    let threshold = SINGULARITY_EPS * scale.max(1.0);

    // Augmented system [M | I], reduced in place to [I | M^-1].
    let mut aug = DMatrix::<f64>::zeros(n, 2 * n);
    aug.view_mut((0, 0), (n, n)).copy_from(m);
    for i in 0..n {
        aug[(i, n + i)] = 1.0;
    }

    for col in 0..n {
        let mut pivot_row = col;
        for row in (col + 1)..n {
            if aug[(row, col)].abs() > aug[(pivot_row, col)].abs() {
                pivot_row = row;
            }
        }
        if aug[(pivot_row, col)].abs() < threshold {
            return Err(FitError::SingularMatrix { column: col });
        }
        aug.swap_rows(col, pivot_row);

        let pivot = aug[(col, col)];
        for j in col..(2 * n) {
            aug[(col, j)] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = aug[(row, col)];
            if factor == 0.0 {
                continue;
            }
            for j in col..(2 * n) {
                aug[(row, j)] -= factor * aug[(col, j)];
            }
        }
    }

    Ok(DMatrix::from_fn(n, n, |i, j| aug[(i, n + j)]))
}

/// Diagonal entries of a square matrix.
pub fn diagonal(m: &DMatrix<f64>) -> Result<Vec<f64>, FitError> {
    if m.ncols() != m.nrows() {
        return Err(FitError::DimensionMismatch {
            what: "matrix diagonal",
            left: m.nrows(),
            right: m.ncols(),
        });
    }
    Ok(m.diagonal().iter().copied().collect())
}
