// src/lib.rs

//! `blochq` - A single-qubit Bloch-vector state engine and playback scheduler
//!
//! Circuits of unitary gates and noise channels are folded over the ground
//! state to produce one frame (Bloch vector + density matrix) per step, and a
//! cooperative scheduler animates between consecutive frames for a visualizer.

pub mod core;
pub mod operations;
pub mod circuits;
pub mod simulation;
pub mod playback;
pub mod validation;
pub mod wire;

// Re-export the most common types for easier top-level use
pub use crate::core::{BlochError, BlochVector, DensityMatrix, Frame, Result, density_from_bloch};
pub use operations::{CircuitStep, GateStep, NoiseStep, StepParams, TransitionMode, apply_gate, apply_noise};
pub use circuits::{Circuit, CircuitBuilder};
pub use simulation::{Evaluation, Evaluator, EvaluatorConfig, UnknownStepPolicy, evaluate};
pub use playback::{Easing, PlaybackConfig, PlaybackScheduler, PlaybackState, TickOutcome};
pub use validation::{check_density, check_unit_ball, validate_frame};

// Example 1: Superposition, then dephasing
// A Hadamard moves the ground state onto the equator; phase damping then
// shrinks it toward the z axis without touching the populations.
/// ```
/// use blochq::{BlochVector, CircuitBuilder, Evaluator, GateStep, NoiseStep, validate_frame};
///
/// let circuit = CircuitBuilder::new()
///     .gate(GateStep::H)
///     .noise(NoiseStep::PhaseDamping { lambda: 0.5 })
///     .build();
/// println!("{}", circuit);
///
/// let evaluation = Evaluator::new().run(&circuit);
/// assert_eq!(evaluation.len(), 3);
///
/// let frames = evaluation.frames();
/// assert!(frames[0].bloch_vector.approx_eq(BlochVector::new(0.0, 0.0, 1.0), 1e-12));
/// assert!(frames[1].bloch_vector.approx_eq(BlochVector::new(1.0, 0.0, 0.0), 1e-12));
/// assert!(frames[2].bloch_vector.approx_eq(BlochVector::new(0.5, 0.0, 0.0), 1e-12));
/// for frame in frames {
///     validate_frame(frame).expect("every frame is a physical state");
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Wire round trip
// A collaborator's HTTP handler only needs `wire::run_json`.
/// ```
/// let body = r#"{"steps": [{"type": "gate", "name": "X", "qubit": 0},
///                          {"type": "noise", "name": "amplitude_damping", "params": {"gamma": 1.0}}]}"#;
/// let response: serde_json::Value = serde_json::from_str(&blochq::wire::run_json(body)?)?;
///
/// let steps = response["steps"].as_array().expect("steps array");
/// assert_eq!(steps.len(), 3);
/// // X flips to |1⟩, full amplitude damping relaxes back to |0⟩
/// assert_eq!(steps[1]["bloch_vector"]["z"], -1.0);
/// assert_eq!(steps[2]["density_matrix"][0][0], serde_json::json!([1.0, 0.0]));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
