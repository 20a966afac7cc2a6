// src/operations/gates.rs

//! Gate library: unitary gates as rotations of the Bloch vector.
//!
//! The Pauli gates are applied as exact sign flips rather than through
//! `cos(π)`/`sin(π)`, so `X·X` returns the input bit for bit. Hadamard uses
//! the conjugation identities HXH = Z, HZH = X, HYH = -Y.

use super::GateStep;
use crate::core::BlochVector;

/// Applies `gate` to `v` and clamps the result into the unit ball.
///
/// Total and deterministic. [`GateStep::Unrecognized`] returns `v` unchanged:
/// step data written by a newer or older editor must never break evaluation.
pub fn apply_gate(gate: &GateStep, v: BlochVector) -> BlochVector {
    let out = match gate {
        GateStep::X => BlochVector::new(v.x, -v.y, -v.z),
        GateStep::Y => BlochVector::new(-v.x, v.y, -v.z),
        GateStep::Z => BlochVector::new(-v.x, -v.y, v.z),
        GateStep::H => BlochVector::new(v.z, -v.y, v.x),
        GateStep::RotateX { theta } => rotate_x(v, finite_angle(*theta)),
        GateStep::RotateY { theta } => rotate_y(v, finite_angle(*theta)),
        GateStep::RotateZ { theta } => rotate_z(v, finite_angle(*theta)),
        GateStep::Unrecognized { .. } => v,
    };
    out.clamp_to_unit_ball()
}

/// String-keyed entry point: resolves `name` with [`GateStep::from_name`] and applies it.
pub fn apply_gate_by_name(name: &str, v: BlochVector, theta: Option<f64>) -> BlochVector {
    apply_gate(&GateStep::from_name(name, theta), v)
}

/// NaN and infinite angles act as the identity rotation.
pub(crate) fn finite_angle(theta: f64) -> f64 {
    if theta.is_finite() { theta } else { 0.0 }
}

fn rotate_x(v: BlochVector, theta: f64) -> BlochVector {
    let (s, c) = theta.sin_cos();
    BlochVector::new(v.x, c * v.y - s * v.z, s * v.y + c * v.z)
}

fn rotate_y(v: BlochVector, theta: f64) -> BlochVector {
    let (s, c) = theta.sin_cos();
    BlochVector::new(c * v.x + s * v.z, v.y, -s * v.x + c * v.z)
}

fn rotate_z(v: BlochVector, theta: f64) -> BlochVector {
    let (s, c) = theta.sin_cos();
    BlochVector::new(c * v.x - s * v.y, s * v.x + c * v.y, v.z)
}
