// src/validation/mod.rs

//! Provides functions to check that vectors, density matrices and frames
//! describe physical single-qubit states.

use crate::core::{BlochError, BlochVector, DensityMatrix, Frame, NORM_EPSILON, Result};

// Default tolerance values (can be overridden by caller)
const DEFAULT_MATRIX_TOLERANCE: f64 = 1e-9;

/// Checks that `v` is finite and lies in the closed unit ball.
///
/// # Arguments
/// * `v` - The vector to check.
/// * `tolerance` - Allowed excess over unit length. Defaults to `NORM_EPSILON`.
///
/// # Returns
/// * `Ok(())` if the vector is a valid state.
/// * `Err(BlochError::NotPhysical)` otherwise.
pub fn check_unit_ball(v: BlochVector, tolerance: Option<f64>) -> Result<()> {
    let tolerance = tolerance.unwrap_or(NORM_EPSILON);
    if !v.is_finite() {
        return Err(BlochError::NotPhysical { message: format!("Bloch vector {} has non-finite components", v) });
    }
    let len = v.length();
    if len > 1.0 + tolerance {
        return Err(BlochError::NotPhysical {
            message: format!("Bloch vector length {} exceeds 1 (tolerance {})", len, tolerance),
        });
    }
    Ok(())
}

/// Checks that `rho` is Hermitian, has unit trace and is positive-semidefinite.
///
/// For a 2×2 Hermitian matrix positivity is equivalent to both diagonal
/// entries and the determinant being non-negative.
///
/// # Arguments
/// * `rho` - The matrix to check.
/// * `tolerance` - Allowed numerical slack. Defaults to 1e-9.
pub fn check_density(rho: &DensityMatrix, tolerance: Option<f64>) -> Result<()> {
    let tolerance = tolerance.unwrap_or(DEFAULT_MATRIX_TOLERANCE);
    if !rho.is_hermitian(tolerance) {
        return Err(BlochError::NotPhysical { message: "density matrix is not Hermitian".to_string() });
    }
    let trace = rho.trace();
    if (trace.re - 1.0).abs() > tolerance || trace.im.abs() > tolerance {
        return Err(BlochError::NotPhysical { message: format!("density matrix trace is {} (expected 1)", trace) });
    }
    let (a, d) = (rho.get(0, 0).re, rho.get(1, 1).re);
    let det = rho.determinant().re;
    if a < -tolerance || d < -tolerance || det < -tolerance {
        return Err(BlochError::NotPhysical {
            message: format!("density matrix is not positive-semidefinite (diag {:.3e}, {:.3e}; det {:.3e})", a, d, det),
        });
    }
    Ok(())
}

/// Checks both halves of a frame and that they describe the same state.
pub fn validate_frame(frame: &Frame) -> Result<()> {
    check_unit_ball(frame.bloch_vector, None)?;
    check_density(&frame.density_matrix, None)?;
    let recovered = frame.density_matrix.to_bloch();
    if !recovered.approx_eq(frame.bloch_vector, DEFAULT_MATRIX_TOLERANCE) {
        return Err(BlochError::NotPhysical {
            message: format!("density matrix encodes {} but frame records {}", recovered, frame.bloch_vector),
        });
    }
    Ok(())
}
