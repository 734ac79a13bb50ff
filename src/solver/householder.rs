//! This module provides the dense linear solve used to equilibrate charges.
//!
//! The equilibration matrix is dense, unsymmetric, and modest in size (one row per
//! atom), so it is factorized once per run by Householder elimination without pivoting
//! and never reused. Rank deficiency is reported as an error instead of producing
//! non-finite charges.

use crate::error::EqeqError;
use faer::{Col, Mat};

/// Reflection magnitudes below this threshold indicate a rank-deficient column.
const SINGULARITY_THRESHOLD: f64 = 1e-5;

/// Solves the square system `A x = b` in place by Householder elimination followed by
/// back-substitution, consuming both operands.
///
/// # Errors
///
/// Returns an `EqeqError::SingularSystem` when an elimination column has zero or
/// non-finite norm, or when its reflection magnitude falls below the singularity
/// threshold. Coincident atoms reach this as non-finite interaction entries.
pub(crate) fn solve(mut matrix: Mat<f64>, mut rhs: Col<f64>) -> Result<Col<f64>, EqeqError> {
    let size = matrix.nrows();
    // Negated reflection diagonal, consumed by the back-substitution.
    let mut diagonal = vec![0.0; size];

    for column in 0..size {
        let mut norm_squared = 0.0;
        for row in column..size {
            norm_squared += matrix[(row, column)] * matrix[(row, column)];
        }
        if norm_squared == 0.0 || !norm_squared.is_finite() {
            return Err(EqeqError::SingularSystem { column });
        }

        let reflection = if matrix[(column, column)] < 0.0 {
            -norm_squared.sqrt()
        } else {
            norm_squared.sqrt()
        };
        if reflection.abs() < SINGULARITY_THRESHOLD {
            return Err(EqeqError::SingularSystem { column });
        }

        let scale = 1.0 / (norm_squared + reflection * matrix[(column, column)]);
        matrix[(column, column)] += reflection;
        diagonal[column] = -reflection;

        for other in (column + 1)..size {
            let mut projection = 0.0;
            for row in column..size {
                projection += matrix[(row, other)] * matrix[(row, column)];
            }
            projection *= scale;
            for row in column..size {
                let correction = projection * matrix[(row, column)];
                matrix[(row, other)] -= correction;
            }
        }

        let mut projection = 0.0;
        for row in column..size {
            projection += rhs[row] * matrix[(row, column)];
        }
        projection *= scale;
        for row in column..size {
            rhs[row] -= projection * matrix[(row, column)];
        }
    }

    for row in (0..size).rev() {
        let mut accumulated = 0.0;
        for column in (row + 1)..size {
            accumulated += matrix[(row, column)] * rhs[column];
        }
        rhs[row] = (rhs[row] - accumulated) / diagonal[row];
    }

    Ok(rhs)
}
