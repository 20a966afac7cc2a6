//! Numerical constants shared by the state engine and the scheduler.

use super::vector::BlochVector;

/// Slack allowed above unit length before a vector is rescaled back onto
/// the sphere.
pub const NORM_EPSILON: f64 = 1e-9;

/// Threshold on `1 - |dot|` below which two directions count as coincident
/// (or antipodal) for spherical interpolation.
pub const SLERP_EPSILON: f64 = 1e-6;

/// Lengths below this are treated as the zero vector when a direction is needed.
pub const ZERO_LENGTH: f64 = 1e-12;

/// The canonical ground state |0⟩, the north pole of the sphere.
pub const GROUND_STATE: BlochVector = BlochVector::new(0.0, 0.0, 1.0);

/// Angle used for a rotation gate whose angle was not supplied.
pub const DEFAULT_THETA: f64 = std::f64::consts::FRAC_PI_2;

/// Default tween length in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 800.0;
