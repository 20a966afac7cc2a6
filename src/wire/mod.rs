// src/wire/mod.rs

//! JSON shapes for exposing the evaluator behind a network boundary.
//!
//! Request:
//!
//! ```json
//! {"steps": [{"type": "gate", "name": "Rx", "qubit": 0, "params": {"theta": 1.57}},
//!            {"type": "noise", "name": "depolarizing", "params": {"p": 0.1}}]}
//! ```
//!
//! Response:
//!
//! ```json
//! {"steps": [{"bloch_vector": {"x": 0.0, "y": 0.0, "z": 1.0},
//!             "density_matrix": [[[1.0, 0.0], [0.0, 0.0]], [[0.0, 0.0], [0.0, 0.0]]]}]}
//! ```
//!
//! Complex entries are `[re, im]` pairs. Decoding a step never fails on
//! unknown names; they become unrecognized steps and evaluate as no-ops
//! unless the evaluator is strict.

use crate::circuits::Circuit;
use crate::core::{Frame, Result};
use crate::operations::{CircuitStep, GateStep, NoiseStep, StepParams};
use crate::simulation::Evaluator;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One step as sent by an editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StepSpec {
    /// `"gate"` or `"noise"`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    /// Target qubit. Only single-qubit circuits exist, so this is ignored,
    /// whatever its sign.
    #[serde(default)]
    pub qubit: i64,
    /// Gate names applied in order within this one step. When non-empty it
    /// takes precedence over `name`; every rotation shares `params.theta`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<StepParams>,
}

impl StepSpec {
    /// Decodes into a [`CircuitStep`]. Total: an unknown `type` becomes an
    /// unrecognized gate named after it.
    pub fn to_step(&self) -> CircuitStep {
        let params = self.params.unwrap_or_default();
        match self.kind.trim().to_ascii_lowercase().as_str() {
            "gate" => match self.gates.as_slice() {
                [] => CircuitStep::Gate(GateStep::from_name(&self.name, params.theta)),
                [single] => CircuitStep::Gate(GateStep::from_name(single, params.theta)),
                many => CircuitStep::Gates(many.iter().map(|g| GateStep::from_name(g, params.theta)).collect()),
            },
            "noise" => CircuitStep::Noise(NoiseStep::from_name(&self.name, &params)),
            _ => {
                debug!(kind = %self.kind, "unknown step type");
                CircuitStep::Gate(GateStep::Unrecognized { name: self.kind.clone() })
            }
        }
    }
}

impl From<&CircuitStep> for StepSpec {
    fn from(step: &CircuitStep) -> Self {
        match step {
            CircuitStep::Gate(gate) => StepSpec {
                kind: "gate".to_string(),
                name: gate.name().to_string(),
                params: gate.theta().map(StepParams::with_theta),
                ..StepSpec::default()
            },
            CircuitStep::Gates(gates) => StepSpec {
                kind: "gate".to_string(),
                name: gates.first().map(|g| g.name().to_string()).unwrap_or_default(),
                gates: gates.iter().map(|g| g.name().to_string()).collect(),
                params: gates.iter().find_map(GateStep::theta).map(StepParams::with_theta),
                ..StepSpec::default()
            },
            CircuitStep::Noise(noise) => {
                let params = match noise {
                    NoiseStep::AmplitudeDamping { gamma } => Some(StepParams::with_gamma(*gamma)),
                    NoiseStep::PhaseDamping { lambda } => Some(StepParams::with_lambda(*lambda)),
                    NoiseStep::Depolarizing { p } => Some(StepParams::with_p(*p)),
                    NoiseStep::Unrecognized { .. } => None,
                };
                StepSpec {
                    kind: "noise".to_string(),
                    name: noise.name().to_string(),
                    params,
                    ..StepSpec::default()
                }
            }
        }
    }
}

/// `{"steps": [...]}` as posted by an editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CircuitRequest {
    pub steps: Vec<StepSpec>,
}

impl CircuitRequest {
    pub fn to_circuit(&self) -> Circuit {
        self.steps.iter().map(StepSpec::to_step).collect()
    }
}

impl From<&Circuit> for CircuitRequest {
    fn from(circuit: &Circuit) -> Self {
        Self { steps: circuit.steps().iter().map(StepSpec::from).collect() }
    }
}

/// `{"steps": [frame, ...]}`, one frame per step plus the initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitResponse {
    pub steps: Vec<Frame>,
}

/// Evaluates a decoded request with `evaluator` (honouring its strict policy).
pub fn handle_request(evaluator: &Evaluator, request: &CircuitRequest) -> Result<CircuitResponse> {
    let evaluation = evaluator.try_run(&request.to_circuit())?;
    Ok(CircuitResponse { steps: evaluation.into_frames() })
}

/// Full JSON round trip with the default (fail-open) evaluator.
///
/// # Errors
/// `BlochError::Wire` when the body is not a valid request.
pub fn run_json(body: &str) -> Result<String> {
    run_json_with(&Evaluator::new(), body)
}

/// Full JSON round trip with a caller-supplied evaluator.
pub fn run_json_with(evaluator: &Evaluator, body: &str) -> Result<String> {
    let request: CircuitRequest = serde_json::from_str(body)?;
    debug!(steps = request.steps.len(), "circuit request decoded");
    let response = handle_request(evaluator, &request)?;
    Ok(serde_json::to_string(&response)?)
}
