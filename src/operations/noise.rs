// src/operations/noise.rs

//! Noise library: the three dissipative channels as affine maps of the Bloch
//! vector.
//!
//! | channel           | x, y          | z                |
//! |-------------------|---------------|------------------|
//! | amplitude damping | × √(1-γ)      | (1-γ)z + γ       |
//! | phase damping     | × (1-λ)       | unchanged        |
//! | depolarizing      | × (1-p)       | × (1-p)          |
//!
//! These agree with the Kraus forms in [`super::kraus`].

use super::{NoiseStep, StepParams};
use crate::core::BlochVector;

/// Applies `noise` to `v` and clamps the result into the unit ball.
///
/// The strength is clamped into `[0, 1]` first whatever the caller passed.
/// [`NoiseStep::Unrecognized`] returns `v` unchanged, like unknown gates.
pub fn apply_noise(noise: &NoiseStep, v: BlochVector) -> BlochVector {
    let out = match noise {
        NoiseStep::AmplitudeDamping { gamma } => {
            let gamma = clamp_probability(*gamma);
            let shrink = (1.0 - gamma).sqrt();
            BlochVector::new(shrink * v.x, shrink * v.y, (1.0 - gamma) * v.z + gamma)
        }
        NoiseStep::PhaseDamping { lambda } => {
            let shrink = 1.0 - clamp_probability(*lambda);
            BlochVector::new(shrink * v.x, shrink * v.y, v.z)
        }
        NoiseStep::Depolarizing { p } => v * (1.0 - clamp_probability(*p)),
        NoiseStep::Unrecognized { .. } => v,
    };
    out.clamp_to_unit_ball()
}

/// String-keyed entry point: resolves `name` with [`NoiseStep::from_name`] and applies it.
pub fn apply_noise_by_name(name: &str, v: BlochVector, params: &StepParams) -> BlochVector {
    apply_noise(&NoiseStep::from_name(name, params), v)
}

/// Clamps a probability into `[0, 1]`; NaN counts as zero.
pub fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GROUND_STATE;
    use proptest::prelude::*;

    const TOL: f64 = 1e-9;

    fn ball_vector() -> impl Strategy<Value = BlochVector> {
        (-1.0..=1.0f64, -1.0..=1.0f64, -1.0..=1.0f64)
            .prop_map(|(x, y, z)| BlochVector::new(x, y, z).clamp_to_unit_ball())
    }

    #[test]
    fn test_full_amplitude_damping_fixes_ground_state() {
        let v = apply_noise(&NoiseStep::AmplitudeDamping { gamma: 1.0 }, GROUND_STATE);
        assert!(v.approx_eq(GROUND_STATE, TOL));
        let excited = BlochVector::new(0.0, 0.0, -1.0);
        let v = apply_noise(&NoiseStep::AmplitudeDamping { gamma: 1.0 }, excited);
        assert!(v.approx_eq(GROUND_STATE, TOL));
    }

    #[test]
    fn test_phase_damping_keeps_populations() {
        let v = BlochVector::new(0.6, 0.0, 0.8);
        let out = apply_noise(&NoiseStep::PhaseDamping { lambda: 0.5 }, v);
        assert!(out.approx_eq(BlochVector::new(0.3, 0.0, 0.8), TOL));
    }

    #[test]
    fn test_depolarizing_by_name() {
        let v = BlochVector::new(1.0, 0.0, 0.0);
        assert!(apply_noise_by_name("depolarizing", v, &StepParams::with_p(0.0)).approx_eq(v, TOL));
        assert!(
            apply_noise_by_name("depolarizing", v, &StepParams::with_p(1.0))
                .approx_eq(BlochVector::zero(), TOL)
        );
    }

    #[test]
    fn test_out_of_range_parameters_are_clamped() {
        let v = BlochVector::new(0.0, 1.0, 0.0);
        let over = apply_noise(&NoiseStep::Depolarizing { p: 7.5 }, v);
        assert!(over.approx_eq(BlochVector::zero(), TOL));
        let under = apply_noise(&NoiseStep::PhaseDamping { lambda: -3.0 }, v);
        assert!(under.approx_eq(v, TOL));
        let nan = apply_noise(&NoiseStep::AmplitudeDamping { gamma: f64::NAN }, v);
        assert!(nan.approx_eq(v, TOL));
    }

    #[test]
    fn test_unrecognized_channel_is_noop() {
        let v = BlochVector::new(0.2, -0.1, 0.4);
        assert_eq!(apply_noise_by_name("thermal_relaxation", v, &StepParams::with_p(0.9)), v);
    }

    #[test]
    fn test_clamp_probability() {
        assert_eq!(clamp_probability(-0.1), 0.0);
        assert_eq!(clamp_probability(1.1), 1.0);
        assert_eq!(clamp_probability(0.25), 0.25);
        assert_eq!(clamp_probability(f64::NAN), 0.0);
    }

    proptest! {
        #[test]
        fn channels_never_leave_the_ball(v in ball_vector(), s in -2.0..3.0f64) {
            for noise in [
                NoiseStep::AmplitudeDamping { gamma: s },
                NoiseStep::PhaseDamping { lambda: s },
                NoiseStep::Depolarizing { p: s },
            ] {
                let out = apply_noise(&noise, v);
                prop_assert!(out.is_finite());
                prop_assert!(out.length() <= 1.0 + TOL);
            }
        }

        #[test]
        fn channels_never_increase_transverse_length(v in ball_vector(), s in 0.0..=1.0f64) {
            let transverse = |w: BlochVector| (w.x * w.x + w.y * w.y).sqrt();
            for noise in [
                NoiseStep::AmplitudeDamping { gamma: s },
                NoiseStep::PhaseDamping { lambda: s },
                NoiseStep::Depolarizing { p: s },
            ] {
                prop_assert!(transverse(apply_noise(&noise, v)) <= transverse(v) + TOL);
            }
        }
    }
}
