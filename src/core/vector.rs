// src/core/vector.rs

//! Bloch vectors and the 3-vector primitives the engine and the scheduler
//! are built from.
//!
//! A [`BlochVector`] is a real triple inside the closed unit ball. Pure states
//! sit on the sphere, mixed states inside it, and the zero vector is the
//! maximally mixed state. Nothing in this module silently replaces the zero
//! vector with some default direction: operations that need a direction
//! either return an `Option` or fall back to plain linear interpolation.

use super::constants::{NORM_EPSILON, SLERP_EPSILON, ZERO_LENGTH};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A single-qubit state in Bloch coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BlochVector {
    /// ⟨σx⟩
    pub x: f64,
    /// ⟨σy⟩
    pub y: f64,
    /// ⟨σz⟩
    pub z: f64,
}

impl BlochVector {
    /// Creates a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The maximally mixed state.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Euclidean length.
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Returns `v / |v|`, or `None` for a (numerically) zero vector.
    ///
    /// What a zero vector should become is left to the caller.
    pub fn normalize(self) -> Option<Self> {
        let len = self.length();
        if len < ZERO_LENGTH || !len.is_finite() {
            None
        } else {
            Some(self * (1.0 / len))
        }
    }

    /// Rescales onto the unit sphere if the vector is longer than `1 + NORM_EPSILON`.
    ///
    /// Vectors inside the ball, the zero vector included, are returned as is.
    pub fn clamp_to_unit_ball(self) -> Self {
        let len = self.length();
        if len > 1.0 + NORM_EPSILON {
            self * (1.0 / len)
        } else {
            self
        }
    }

    /// `true` when every component is finite.
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Purity Tr(ρ²) = (1 + |v|²) / 2. One for pure states, one half at the centre.
    pub fn purity(self) -> f64 {
        0.5 * (1.0 + self.dot(self))
    }

    /// Polar angle from +Z in `[0, π]`. Zero for the zero vector.
    pub fn theta(self) -> f64 {
        let len = self.length();
        if len < ZERO_LENGTH {
            0.0
        } else {
            (self.z / len).clamp(-1.0, 1.0).acos()
        }
    }

    /// Azimuthal angle from +X in `[0, 2π)`.
    pub fn phi(self) -> f64 {
        let raw = self.y.atan2(self.x);
        if raw < 0.0 { raw + 2.0 * PI } else { raw }
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl Add for BlochVector {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for BlochVector {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for BlochVector {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for BlochVector {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for BlochVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}

/// Component-wise affine interpolation `a + (b - a) t`. No renormalization.
pub fn lerp(a: BlochVector, b: BlochVector, t: f64) -> BlochVector {
    a + (b - a) * t
}

/// Spherical interpolation between the directions of `a` and `b`.
///
/// Both endpoints are normalized first, so the result is a unit vector.
/// Branches, checked in order:
/// 1. nearly coincident directions: linear interpolation, renormalized;
/// 2. nearly antipodal directions: rotate `a` by `t·π` about an axis
///    perpendicular to it (`a × Z`, or `a × X` when `a` lies on the Z axis);
/// 3. otherwise the usual `sin((1-t)ω)/sin ω`, `sin(tω)/sin ω` weighting.
///
/// If either endpoint is the zero vector there is no direction to follow and
/// the result is `lerp(a, b, t)`.
pub fn slerp(a: BlochVector, b: BlochVector, t: f64) -> BlochVector {
    let (Some(ua), Some(ub)) = (a.normalize(), b.normalize()) else {
        return lerp(a, b, t);
    };
    let dot = ua.dot(ub);
    let gap = 1.0 - dot.abs();

    if dot > 0.0 && gap < SLERP_EPSILON {
        return lerp(ua, ub, t).normalize().unwrap_or(ua);
    }
    if dot < 0.0 && gap < SLERP_EPSILON {
        return rotate_around_axis(ua, perpendicular_axis(ua), t * PI);
    }

    let omega = dot.clamp(-1.0, 1.0).acos();
    let sin_omega = omega.sin();
    let wa = ((1.0 - t) * omega).sin() / sin_omega;
    let wb = (t * omega).sin() / sin_omega;
    ua * wa + ub * wb
}

/// Geodesic tween for possibly mixed states: the direction follows [`slerp`]
/// and the length is interpolated linearly between `|a|` and `|b|`.
///
/// Falls back to [`lerp`] when either endpoint is the zero vector.
pub fn geodesic(a: BlochVector, b: BlochVector, t: f64) -> BlochVector {
    let (la, lb) = (a.length(), b.length());
    if la < ZERO_LENGTH || lb < ZERO_LENGTH {
        return lerp(a, b, t);
    }
    slerp(a, b, t) * (la + (lb - la) * t)
}

/// Rodrigues' rotation of `v` by `theta` radians about the unit axis `k`.
pub fn rotate_around_axis(v: BlochVector, k: BlochVector, theta: f64) -> BlochVector {
    let (s, c) = theta.sin_cos();
    v * c + k.cross(v) * s + k * (k.dot(v) * (1.0 - c))
}

/// Cubic ease-in/ease-out on `[0, 1]`; inputs outside are clamped first.
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

// Any unit axis orthogonal to `a`.
fn perpendicular_axis(a: BlochVector) -> BlochVector {
    let z_axis = BlochVector::new(0.0, 0.0, 1.0);
    let x_axis = BlochVector::new(1.0, 0.0, 0.0);
    let around_z = a.cross(z_axis);
    let candidate = if around_z.length() > SLERP_EPSILON { around_z } else { a.cross(x_axis) };
    candidate.normalize().unwrap_or(x_axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const TOL: f64 = 1e-9;

    fn assert_vec_close(actual: BlochVector, expected: BlochVector, tol: f64) {
        assert!(
            actual.approx_eq(expected, tol),
            "vector mismatch - actual: {}, expected: {}",
            actual,
            expected
        );
    }

    fn unit_direction() -> impl Strategy<Value = BlochVector> {
        (0.0..PI, 0.0..2.0 * PI).prop_map(|(theta, phi)| {
            BlochVector::new(theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos())
        })
    }

    #[test]
    fn test_normalize_zero_is_none() {
        assert_eq!(BlochVector::zero().normalize(), None);
        let n = BlochVector::new(3.0, 0.0, 4.0).normalize().unwrap();
        assert_vec_close(n, BlochVector::new(0.6, 0.0, 0.8), TOL);
    }

    #[test]
    fn test_cross_is_right_handed() {
        let x = BlochVector::new(1.0, 0.0, 0.0);
        let y = BlochVector::new(0.0, 1.0, 0.0);
        assert_vec_close(x.cross(y), BlochVector::new(0.0, 0.0, 1.0), TOL);
    }

    #[test]
    fn test_clamp_leaves_interior_and_zero_alone() {
        let inner = BlochVector::new(0.1, -0.2, 0.3);
        assert_eq!(inner.clamp_to_unit_ball(), inner);
        assert_eq!(BlochVector::zero().clamp_to_unit_ball(), BlochVector::zero());
        let barely = BlochVector::new(0.0, 0.0, 1.0 + 0.5e-9);
        assert_eq!(barely.clamp_to_unit_ball(), barely);
        let outside = BlochVector::new(0.0, 2.0, 0.0).clamp_to_unit_ball();
        assert_vec_close(outside, BlochVector::new(0.0, 1.0, 0.0), TOL);
    }

    #[test]
    fn test_slerp_quarter_turn_midpoint() {
        let a = BlochVector::new(0.0, 0.0, 1.0);
        let b = BlochVector::new(1.0, 0.0, 0.0);
        let mid = slerp(a, b, 0.5);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert_vec_close(mid, BlochVector::new(h, 0.0, h), 1e-12);
    }

    #[test]
    fn test_slerp_antipodal_stays_on_sphere() {
        let a = BlochVector::new(0.0, 0.0, 1.0);
        let b = BlochVector::new(0.0, 0.0, -1.0);
        for i in 0..=10 {
            let t = i as f64 / 10.0;
            let v = slerp(a, b, t);
            assert!(v.is_finite());
            assert_abs_diff_eq!(v.length(), 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(v.z, (t * PI).cos(), epsilon = 1e-12);
        }
        assert_vec_close(slerp(a, b, 1.0), b, 1e-12);
    }

    #[test]
    fn test_slerp_antipodal_off_axis() {
        let a = BlochVector::new(1.0, 0.0, 0.0);
        let v = slerp(a, -a, 1.0);
        assert_vec_close(v, -a, 1e-12);
    }

    #[test]
    fn test_slerp_with_zero_endpoint_is_lerp() {
        let a = BlochVector::zero();
        let b = BlochVector::new(0.0, 0.0, 1.0);
        assert_vec_close(slerp(a, b, 0.25), BlochVector::new(0.0, 0.0, 0.25), TOL);
    }

    #[test]
    fn test_geodesic_keeps_mixed_length() {
        let a = BlochVector::new(0.0, 0.0, 0.5);
        let b = BlochVector::new(0.5, 0.0, 0.0);
        for i in 0..=4 {
            let v = geodesic(a, b, i as f64 / 4.0);
            assert_abs_diff_eq!(v.length(), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_rotate_around_axis_quarter_turn() {
        let v = BlochVector::new(1.0, 0.0, 0.0);
        let z = BlochVector::new(0.0, 0.0, 1.0);
        let r = rotate_around_axis(v, z, PI / 2.0);
        assert_vec_close(r, BlochVector::new(0.0, 1.0, 0.0), 1e-12);
    }

    #[test]
    fn test_easing_endpoints_and_symmetry() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_out_cubic(7.0), 1.0);
        assert_abs_diff_eq!(ease_in_out_cubic(0.5), 0.5, epsilon = 1e-15);
        for i in 0..=20 {
            let t = i as f64 / 20.0;
            assert_abs_diff_eq!(ease_in_out_cubic(t) + ease_in_out_cubic(1.0 - t), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_angles() {
        let v = BlochVector::new(0.0, -1.0, 0.0);
        assert_abs_diff_eq!(v.theta(), PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.phi(), 1.5 * PI, epsilon = 1e-12);
        assert_eq!(BlochVector::zero().theta(), 0.0);
    }

    proptest! {
        #[test]
        fn slerp_of_equal_endpoints_is_identity(a in unit_direction(), t in 0.0..=1.0f64) {
            prop_assert!(slerp(a, a, t).approx_eq(a, 1e-9));
        }

        #[test]
        fn slerp_hits_both_endpoints(a in unit_direction(), b in unit_direction()) {
            prop_assert!(slerp(a, b, 0.0).approx_eq(a, 1e-9));
            prop_assert!(slerp(a, b, 1.0).approx_eq(b, 1e-6));
        }

        #[test]
        fn slerp_stays_on_sphere(a in unit_direction(), b in unit_direction(), t in 0.0..=1.0f64) {
            let v = slerp(a, b, t);
            prop_assert!(v.is_finite());
            prop_assert!((v.length() - 1.0).abs() < 1e-9);
        }

        #[test]
        fn easing_is_monotone(t1 in 0.0..=1.0f64, t2 in 0.0..=1.0f64) {
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            prop_assert!(ease_in_out_cubic(lo) <= ease_in_out_cubic(hi));
        }
    }
}
