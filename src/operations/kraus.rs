// src/operations/kraus.rs

//! Matrix forms of the steps: the 2×2 unitary of every gate and the Kraus
//! set of every noise channel. The Bloch-space maps in [`super::gates`] and
//! [`super::noise`] are what the evaluator runs; these forms let a caller
//! evolve a [`DensityMatrix`](crate::core::DensityMatrix) directly and let
//! the tests check that both pictures agree.

use super::gates::finite_angle;
use super::noise::clamp_probability;
use super::{CircuitStep, GateStep, NoiseStep};
use crate::core::DensityMatrix;
use crate::core::density::{Matrix2, identity, mat_mul, scale};
use num_complex::Complex64;
use num_traits::Zero;
use std::f64::consts::FRAC_1_SQRT_2;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

pub fn pauli_x() -> Matrix2 {
    [[c(0.0, 0.0), c(1.0, 0.0)], [c(1.0, 0.0), c(0.0, 0.0)]]
}

pub fn pauli_y() -> Matrix2 {
    [[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]
}

pub fn pauli_z() -> Matrix2 {
    [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(-1.0, 0.0)]]
}

pub fn hadamard() -> Matrix2 {
    let h = FRAC_1_SQRT_2;
    [[c(h, 0.0), c(h, 0.0)], [c(h, 0.0), c(-h, 0.0)]]
}

impl GateStep {
    /// The 2×2 unitary of this gate. Unrecognized gates are the identity.
    pub fn unitary(&self) -> Matrix2 {
        match self {
            GateStep::X => pauli_x(),
            GateStep::Y => pauli_y(),
            GateStep::Z => pauli_z(),
            GateStep::H => hadamard(),
            GateStep::RotateX { theta } => {
                let (s, co) = (finite_angle(*theta) / 2.0).sin_cos();
                [[c(co, 0.0), c(0.0, -s)], [c(0.0, -s), c(co, 0.0)]]
            }
            GateStep::RotateY { theta } => {
                let (s, co) = (finite_angle(*theta) / 2.0).sin_cos();
                [[c(co, 0.0), c(-s, 0.0)], [c(s, 0.0), c(co, 0.0)]]
            }
            GateStep::RotateZ { theta } => {
                let half = finite_angle(*theta) / 2.0;
                [
                    [Complex64::from_polar(1.0, -half), Complex64::zero()],
                    [Complex64::zero(), Complex64::from_polar(1.0, half)],
                ]
            }
            GateStep::Unrecognized { .. } => identity(),
        }
    }
}

impl NoiseStep {
    /// Kraus operators {K_i} with Σ K_i†K_i = I, strength clamped into `[0, 1]`.
    ///
    /// Unrecognized channels return the single operator I.
    pub fn kraus_operators(&self) -> Vec<Matrix2> {
        match self {
            NoiseStep::AmplitudeDamping { gamma } => {
                let gamma = clamp_probability(*gamma);
                vec![
                    [[c(1.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c((1.0 - gamma).sqrt(), 0.0)]],
                    [[c(0.0, 0.0), c(gamma.sqrt(), 0.0)], [c(0.0, 0.0), c(0.0, 0.0)]],
                ]
            }
            NoiseStep::PhaseDamping { lambda } => {
                let lambda = clamp_probability(*lambda);
                let root = lambda.sqrt();
                vec![
                    scale(&identity(), (1.0 - lambda).sqrt()),
                    [[c(root, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(0.0, 0.0)]],
                    [[c(0.0, 0.0), c(0.0, 0.0)], [c(0.0, 0.0), c(root, 0.0)]],
                ]
            }
            NoiseStep::Depolarizing { p } => {
                let p = clamp_probability(*p);
                let side = (p / 4.0).sqrt();
                vec![
                    scale(&identity(), (1.0 - 3.0 * p / 4.0).sqrt()),
                    scale(&pauli_x(), side),
                    scale(&pauli_y(), side),
                    scale(&pauli_z(), side),
                ]
            }
            NoiseStep::Unrecognized { .. } => vec![identity()],
        }
    }
}

/// Evolves a density matrix through one step in matrix form.
pub fn evolve_density(rho: &DensityMatrix, step: &CircuitStep) -> DensityMatrix {
    match step {
        CircuitStep::Gate(gate) => rho.conjugate(&gate.unitary()),
        CircuitStep::Gates(gates) => {
            let combined = gates
                .iter()
                .fold(identity(), |acc, gate| mat_mul(&gate.unitary(), &acc));
            rho.conjugate(&combined)
        }
        CircuitStep::Noise(noise) => rho.apply_kraus(&noise.kraus_operators()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BlochVector;
    use crate::core::density::dagger;
    use crate::operations::{apply_gate, apply_noise};
    use proptest::prelude::*;

    const TOL: f64 = 1e-9;

    fn ball_vector() -> impl Strategy<Value = BlochVector> {
        (-1.0..=1.0f64, -1.0..=1.0f64, -1.0..=1.0f64)
            .prop_map(|(x, y, z)| BlochVector::new(x, y, z).clamp_to_unit_ball())
    }

    fn assert_completeness(ops: &[Matrix2]) {
        let mut sum = [[Complex64::zero(); 2]; 2];
        for k in ops {
            let term = mat_mul(&dagger(k), k);
            for r in 0..2 {
                for col in 0..2 {
                    sum[r][col] += term[r][col];
                }
            }
        }
        let id = identity();
        for r in 0..2 {
            for col in 0..2 {
                assert!((sum[r][col] - id[r][col]).norm() < TOL, "Σ K†K != I at ({}, {})", r, col);
            }
        }
    }

    #[test]
    fn test_kraus_sets_are_trace_preserving() {
        for s in [0.0, 0.25, 0.5, 1.0, 1.7] {
            assert_completeness(&NoiseStep::AmplitudeDamping { gamma: s }.kraus_operators());
            assert_completeness(&NoiseStep::PhaseDamping { lambda: s }.kraus_operators());
            assert_completeness(&NoiseStep::Depolarizing { p: s }.kraus_operators());
        }
    }

    #[test]
    fn test_unitaries_are_unitary() {
        for gate in [
            GateStep::X,
            GateStep::Y,
            GateStep::Z,
            GateStep::H,
            GateStep::RotateX { theta: 0.4 },
            GateStep::RotateY { theta: -2.2 },
            GateStep::RotateZ { theta: 5.0 },
        ] {
            assert_completeness(&[gate.unitary()]);
        }
    }

    #[test]
    fn test_compound_step_matches_sequential_gates() {
        let v = BlochVector::new(0.0, 0.0, 1.0);
        let step = CircuitStep::Gates(vec![GateStep::H, GateStep::RotateZ { theta: 0.9 }]);
        let rho = evolve_density(&DensityMatrix::from_bloch(v), &step);
        let expected = apply_gate(&GateStep::RotateZ { theta: 0.9 }, apply_gate(&GateStep::H, v));
        assert!(rho.to_bloch().approx_eq(expected, TOL));
    }

    proptest! {
        #[test]
        fn gate_maps_agree_with_unitaries(v in ball_vector(), theta in -7.0..7.0f64) {
            for gate in [
                GateStep::X,
                GateStep::Y,
                GateStep::Z,
                GateStep::H,
                GateStep::RotateX { theta },
                GateStep::RotateY { theta },
                GateStep::RotateZ { theta },
            ] {
                let via_matrix = DensityMatrix::from_bloch(v).conjugate(&gate.unitary()).to_bloch();
                prop_assert!(via_matrix.approx_eq(apply_gate(&gate, v), TOL), "{} disagrees", gate);
            }
        }

        #[test]
        fn noise_maps_agree_with_kraus(v in ball_vector(), s in 0.0..=1.0f64) {
            for noise in [
                NoiseStep::AmplitudeDamping { gamma: s },
                NoiseStep::PhaseDamping { lambda: s },
                NoiseStep::Depolarizing { p: s },
            ] {
                let via_kraus = DensityMatrix::from_bloch(v).apply_kraus(&noise.kraus_operators()).to_bloch();
                prop_assert!(via_kraus.approx_eq(apply_noise(&noise, v), TOL), "{} disagrees", noise);
            }
        }
    }
}
