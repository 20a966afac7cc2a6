// src/simulation/mod.rs

//! Evaluates circuits: folds the step list over the ground state and records
//! one [`Frame`] per step.
//!
//! [`evaluate`] is the pure, total entry point. [`Evaluator`] wraps it with a
//! configuration and an opt-in strict mode that reports the step data the
//! fail-open path would have degraded.

mod results;
pub(crate) mod engine;

pub use results::Evaluation;

use crate::circuits::Circuit;
use crate::core::{Frame, GROUND_STATE, Result};
use crate::operations::CircuitStep;
use engine::{apply_step, check_step};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Evaluates `steps` from the ground state `(0, 0, 1)`.
///
/// Always returns `steps.len() + 1` frames; frame 0 is the ground state.
/// Malformed steps degrade to no-ops and out-of-range strengths are clamped,
/// so this never fails.
pub fn evaluate(steps: &[CircuitStep]) -> Vec<Frame> {
    evaluate_steps(steps).into_frames()
}

fn evaluate_steps(steps: &[CircuitStep]) -> Evaluation {
    debug!(steps = steps.len(), "evaluating circuit");
    let mut state = GROUND_STATE;
    let mut evaluation = Evaluation::new(Frame::from_vector(state));
    for (index, step) in steps.iter().enumerate() {
        state = apply_step(step, state);
        trace!(index, step = %step, x = state.x, y = state.y, z = state.z, "step applied");
        evaluation.record(Frame::from_vector(state), step.transition_mode());
    }
    evaluation
}

/// What [`Evaluator::try_run`] does with step data it cannot interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownStepPolicy {
    /// Degrade to a no-op (unknown names) or clamp (out-of-range strengths).
    #[default]
    Ignore,
    /// Fail on the first such step.
    Reject,
}

/// Evaluator settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub unknown_steps: UnknownStepPolicy,
}

impl EvaluatorConfig {
    /// Parses a JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Runs circuits through the state engine.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    /// Creates an evaluator with the fail-open default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with `config`.
    ///
    /// The policy only affects [`try_run`](Self::try_run); [`run`](Self::run)
    /// stays fail-open whatever the policy says.
    pub fn with_config(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluates `circuit`, always fail-open regardless of the configured policy.
    pub fn run(&self, circuit: &Circuit) -> Evaluation {
        if self.config.unknown_steps == UnknownStepPolicy::Reject {
            debug!("run() ignores the reject policy; use try_run() for strict evaluation");
        }
        evaluate_steps(circuit.steps())
    }

    /// Evaluates `circuit` under the configured [`UnknownStepPolicy`].
    ///
    /// # Errors
    /// With [`UnknownStepPolicy::Reject`]: `UnrecognizedGate`,
    /// `UnrecognizedNoise`, `ParameterOutOfRange` or `NonFiniteParameter` for the
    /// first offending step. With `Ignore` this never fails.
    pub fn try_run(&self, circuit: &Circuit) -> Result<Evaluation> {
        if self.config.unknown_steps == UnknownStepPolicy::Reject {
            for (index, step) in circuit.steps().iter().enumerate() {
                check_step(step).inspect_err(|err| debug!(index, error = %err, "strict evaluation rejected step"))?;
            }
        }
        Ok(self.run(circuit))
    }
}
