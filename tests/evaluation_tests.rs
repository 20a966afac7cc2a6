// tests/evaluation_tests.rs

// Import necessary types from the blochq crate
use blochq::{
    BlochError, BlochVector, Circuit, CircuitBuilder, CircuitStep, Evaluator, EvaluatorConfig, GateStep,
    NoiseStep, TransitionMode, UnknownStepPolicy, evaluate, validate_frame,
};
use blochq::operations::kraus::evolve_density;
use blochq::DensityMatrix;

use approx::assert_abs_diff_eq;
use std::f64::consts::PI;

const TOL: f64 = 1e-9;

// Helper to check a frame's vector against expected components
fn check_vector(actual: BlochVector, expected: (f64, f64, f64)) {
    assert_abs_diff_eq!(actual.x, expected.0, epsilon = TOL);
    assert_abs_diff_eq!(actual.y, expected.1, epsilon = TOL);
    assert_abs_diff_eq!(actual.z, expected.2, epsilon = TOL);
}

#[test]
fn test_empty_circuit() {
    let frames = evaluate(&[]);
    assert_eq!(frames.len(), 1, "Empty circuit should yield only the initial frame");
    check_vector(frames[0].bloch_vector, (0.0, 0.0, 1.0));
}

#[test]
fn test_hadamard_on_ground_state() {
    let frames = evaluate(&[CircuitStep::Gate(GateStep::H)]);
    assert_eq!(frames.len(), 2);
    check_vector(frames[1].bloch_vector, (1.0, 0.0, 0.0));
}

#[test]
fn test_rx_pi_equals_x() {
    let via_rx = evaluate(&[CircuitStep::Gate(GateStep::RotateX { theta: PI })]);
    let via_x = evaluate(&[CircuitStep::Gate(GateStep::X)]);
    check_vector(via_rx[1].bloch_vector, (0.0, 0.0, -1.0));
    check_vector(via_x[1].bloch_vector, (0.0, 0.0, -1.0));
}

#[test]
fn test_full_amplitude_damping_on_ground_state_is_fixed_point() {
    let frames = evaluate(&[CircuitStep::Noise(NoiseStep::AmplitudeDamping { gamma: 1.0 })]);
    check_vector(frames[1].bloch_vector, (0.0, 0.0, 1.0));
}

#[test]
fn test_depolarizing_extremes() {
    let identity = evaluate(&[
        CircuitStep::Gate(GateStep::H),
        CircuitStep::Noise(NoiseStep::Depolarizing { p: 0.0 }),
    ]);
    check_vector(identity[2].bloch_vector, (1.0, 0.0, 0.0));

    let mixed = evaluate(&[
        CircuitStep::Gate(GateStep::H),
        CircuitStep::Noise(NoiseStep::Depolarizing { p: 1.0 }),
    ]);
    check_vector(mixed[2].bloch_vector, (0.0, 0.0, 0.0));
    // the maximally mixed state is a valid state and stays put under rotations
    let after = evaluate(&[
        CircuitStep::Noise(NoiseStep::Depolarizing { p: 1.0 }),
        CircuitStep::Gate(GateStep::RotateY { theta: 0.8 }),
        CircuitStep::Gate(GateStep::H),
    ]);
    check_vector(after[3].bloch_vector, (0.0, 0.0, 0.0));
}

#[test]
fn test_frame_count_is_steps_plus_one() {
    for n in 0..6 {
        let steps: Vec<CircuitStep> = (0..n).map(|i| CircuitStep::Gate(GateStep::RotateZ { theta: i as f64 })).collect();
        assert_eq!(evaluate(&steps).len(), n + 1);
    }
}

#[test]
fn test_malformed_steps_degrade_to_noops() {
    let frames = evaluate(&[
        CircuitStep::Gate(GateStep::H),
        CircuitStep::Gate(GateStep::Unrecognized { name: "Toffoli".to_string() }),
        CircuitStep::Noise(NoiseStep::Unrecognized { name: "leakage".to_string() }),
        CircuitStep::Noise(NoiseStep::Depolarizing { p: -4.0 }),
        CircuitStep::Gate(GateStep::RotateX { theta: f64::NAN }),
    ]);
    assert_eq!(frames.len(), 6);
    for frame in &frames[1..] {
        check_vector(frame.bloch_vector, (1.0, 0.0, 0.0));
    }
}

#[test]
fn test_every_frame_is_physical() -> Result<(), BlochError> {
    let circuit = CircuitBuilder::new()
        .gate(GateStep::H)
        .gate(GateStep::RotateZ { theta: 0.7 })
        .noise(NoiseStep::AmplitudeDamping { gamma: 0.35 })
        .gates(vec![GateStep::Y, GateStep::RotateX { theta: -2.1 }])
        .noise(NoiseStep::PhaseDamping { lambda: 0.6 })
        .noise(NoiseStep::Depolarizing { p: 0.2 })
        .gate(GateStep::H)
        .build();
    let evaluation = Evaluator::new().run(&circuit);
    for frame in evaluation.frames() {
        validate_frame(frame)?;
        assert!(frame.bloch_vector.length() <= 1.0 + blochq::core::NORM_EPSILON);
    }
    Ok(())
}

#[test]
fn test_bloch_evolution_matches_density_evolution() {
    let circuit = CircuitBuilder::new()
        .gate(GateStep::RotateY { theta: 1.1 })
        .noise(NoiseStep::AmplitudeDamping { gamma: 0.4 })
        .gate(GateStep::RotateZ { theta: 2.3 })
        .noise(NoiseStep::Depolarizing { p: 0.15 })
        .gates(vec![GateStep::H, GateStep::Z])
        .noise(NoiseStep::PhaseDamping { lambda: 0.25 })
        .build();
    let frames = Evaluator::new().run(&circuit).into_frames();

    let mut rho = DensityMatrix::from_bloch(frames[0].bloch_vector);
    for (i, step) in circuit.steps().iter().enumerate() {
        rho = evolve_density(&rho, step);
        let expected = frames[i + 1].bloch_vector;
        assert!(
            rho.to_bloch().approx_eq(expected, TOL),
            "Frame {} mismatch - matrix path: {}, Bloch path: {}",
            i + 1,
            rho.to_bloch(),
            expected
        );
    }
}

#[test]
fn test_transition_modes_follow_step_kind() {
    let circuit = CircuitBuilder::new()
        .gate(GateStep::X)
        .noise(NoiseStep::Depolarizing { p: 0.5 })
        .gates(vec![GateStep::H, GateStep::H])
        .build();
    let evaluation = Evaluator::new().run(&circuit);
    assert_eq!(
        evaluation.transitions(),
        &[TransitionMode::Geodesic, TransitionMode::Linear, TransitionMode::Geodesic]
    );
}

#[test]
fn test_strict_evaluation_reports_out_of_range_noise() {
    let circuit: Circuit = vec![
        CircuitStep::Gate(GateStep::H),
        CircuitStep::Noise(NoiseStep::AmplitudeDamping { gamma: 1.2 }),
    ]
    .into();
    let strict = Evaluator::with_config(EvaluatorConfig { unknown_steps: UnknownStepPolicy::Reject });
    match strict.try_run(&circuit) {
        Err(BlochError::ParameterOutOfRange { name, value }) => {
            assert_eq!(name, "gamma");
            assert_eq!(value, 1.2);
        }
        other => panic!("expected ParameterOutOfRange, got {:?}", other),
    }
    // the fail-open path clamps instead
    let frames = Evaluator::new().run(&circuit).into_frames();
    check_vector(frames[2].bloch_vector, (0.0, 0.0, 1.0));
}
