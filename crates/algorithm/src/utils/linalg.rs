//! Small dense linear algebra helpers
//!
//! Enough to solve the penalised normal equations of the regression models
//! without pulling in a matrix library.

use crate::{Result, TsError};

/// Solve `min ||y - X b||² + Σ λ_j b_j²`
///
/// `rows` is the design matrix in row-major form (every row must have
/// `penalties.len()` columns). Solved through the normal equations
/// `(XᵀX + Λ) b = Xᵀy` with a Cholesky factorisation.
pub fn ridge_least_squares(rows: &[Vec<f64>], y: &[f64], penalties: &[f64]) -> Result<Vec<f64>> {
    let p = penalties.len();
    if rows.len() != y.len() {
        return Err(TsError::InvalidData(format!(
            "design has {} rows but target has {} values",
            rows.len(),
            y.len()
        )));
    }
    if let Some(row) = rows.iter().find(|row| row.len() != p) {
        return Err(TsError::InvalidData(format!(
            "design row has {} columns, expected {}",
            row.len(),
            p
        )));
    }

    let mut gram = vec![0.0; p * p];
    let mut rhs = vec![0.0; p];
    for (row, &target) in rows.iter().zip(y) {
        for i in 0..p {
            rhs[i] += row[i] * target;
            for j in 0..=i {
                gram[i * p + j] += row[i] * row[j];
            }
        }
    }
    for i in 0..p {
        for j in 0..i {
            gram[j * p + i] = gram[i * p + j];
        }
        gram[i * p + i] += penalties[i];
    }

    cholesky_solve(&mut gram, &rhs, p)
}

/// Solve `A x = b` for a symmetric positive definite `A` (row-major, `n × n`)
///
/// `a` is overwritten with its Cholesky factor.
pub fn cholesky_solve(a: &mut [f64], b: &[f64], n: usize) -> Result<Vec<f64>> {
    if a.len() != n * n || b.len() != n {
        return Err(TsError::InvalidData(
            "matrix and vector dimensions do not match".to_string(),
        ));
    }

    // Lower-triangular factor in place.
    for j in 0..n {
        let mut diag = a[j * n + j];
        for k in 0..j {
            diag -= a[j * n + k] * a[j * n + k];
        }
        if diag <= 0.0 || !diag.is_finite() {
            return Err(TsError::NumericalError(
                "matrix is not positive definite".to_string(),
            ));
        }
        let diag = diag.sqrt();
        a[j * n + j] = diag;

        for i in (j + 1)..n {
            let mut sum = a[i * n + j];
            for k in 0..j {
                sum -= a[i * n + k] * a[j * n + k];
            }
            a[i * n + j] = sum / diag;
        }
    }

    // Forward substitution: L z = b
    let mut z = vec![0.0; n];
    for i in 0..n {
        let mut sum = b[i];
        for k in 0..i {
            sum -= a[i * n + k] * z[k];
        }
        z[i] = sum / a[i * n + i];
    }

    // Back substitution: Lᵀ x = z
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = z[i];
        for k in (i + 1)..n {
            sum -= a[k * n + i] * x[k];
        }
        x[i] = sum / a[i * n + i];
    }

    Ok(x)
}
