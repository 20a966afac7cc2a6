// src/simulation/engine.rs

use crate::core::{BlochError, BlochVector, Result};
use crate::operations::{CircuitStep, GateStep, NoiseStep, apply_gate, apply_noise};
use tracing::debug;

/// Applies one step to `v` and clamps the result into the unit ball.
///
/// Never fails: unrecognized gates and channels pass `v` through, and noise
/// strengths are clamped by the noise library.
pub(crate) fn apply_step(step: &CircuitStep, v: BlochVector) -> BlochVector {
    let out = match step {
        CircuitStep::Gate(gate) => apply_logged_gate(gate, v),
        CircuitStep::Gates(gates) => gates.iter().fold(v, |acc, gate| apply_logged_gate(gate, acc)),
        CircuitStep::Noise(noise) => {
            match noise {
                NoiseStep::Unrecognized { name } => {
                    debug!(name = %name, "unrecognized noise channel treated as identity");
                }
                _ => {
                    if let Some((param, value)) = noise.strength() {
                        if !(0.0..=1.0).contains(&value) {
                            debug!(param, value, "noise strength clamped into [0, 1]");
                        }
                    }
                }
            }
            apply_noise(noise, v)
        }
    };
    let clamped = out.clamp_to_unit_ball();
    if clamped != out {
        debug!(length = out.length(), "step output rescaled onto the unit sphere");
    }
    clamped
}

fn apply_logged_gate(gate: &GateStep, v: BlochVector) -> BlochVector {
    if let GateStep::Unrecognized { name } = gate {
        debug!(name = %name, "unrecognized gate treated as identity");
    }
    apply_gate(gate, v)
}

/// Rejects a step that the fail-open path would have silently degraded.
pub(crate) fn check_step(step: &CircuitStep) -> Result<()> {
    match step {
        CircuitStep::Gate(gate) => check_gate(gate),
        CircuitStep::Gates(gates) => gates.iter().try_for_each(check_gate),
        CircuitStep::Noise(noise) => check_noise(noise),
    }
}

fn check_gate(gate: &GateStep) -> Result<()> {
    if let GateStep::Unrecognized { name } = gate {
        return Err(BlochError::UnrecognizedGate { name: name.clone() });
    }
    match gate.theta() {
        Some(theta) if !theta.is_finite() => Err(BlochError::NonFiniteParameter { name: "theta".to_string() }),
        _ => Ok(()),
    }
}

fn check_noise(noise: &NoiseStep) -> Result<()> {
    let Some((param, value)) = noise.strength() else {
        return Err(BlochError::UnrecognizedNoise { name: noise.name().to_string() });
    };
    if !value.is_finite() {
        return Err(BlochError::NonFiniteParameter { name: param.to_string() });
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(BlochError::ParameterOutOfRange { name: param.to_string(), value });
    }
    Ok(())
}
