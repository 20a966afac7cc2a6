// src/operations/mod.rs

//! Defines the steps a circuit is made of: unitary gates and noise channels.
//!
//! Every step is a pure function of the incoming Bloch vector. Names that the
//! libraries do not recognize are kept as explicit `Unrecognized` variants so
//! that the "unknown step is a no-op" policy is a visible arm of every match
//! rather than a missing case.

pub mod gates;
pub mod noise;
pub mod kraus;

use crate::core::constants::DEFAULT_THETA;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use gates::{apply_gate, apply_gate_by_name};
pub use noise::{apply_noise, apply_noise_by_name, clamp_probability};

/// A unitary single-qubit gate.
#[derive(Debug, Clone, PartialEq)]
pub enum GateStep {
    /// Pauli X, a π rotation about x.
    X,
    /// Pauli Y, a π rotation about y.
    Y,
    /// Pauli Z, a π rotation about z.
    Z,
    /// Hadamard: (x, y, z) ↦ (z, -y, x).
    H,
    /// Right-handed rotation about x by `theta` radians.
    RotateX {
        theta: f64,
    },
    /// Right-handed rotation about y by `theta` radians.
    RotateY {
        theta: f64,
    },
    /// Right-handed rotation about z by `theta` radians.
    RotateZ {
        theta: f64,
    },
    /// A gate name the library does not know. Applying it leaves the state unchanged.
    Unrecognized {
        name: String,
    },
}

impl GateStep {
    /// Resolves a gate name (case-insensitive: `X`, `Y`, `Z`, `H`, `Rx`, `Ry`, `Rz`).
    ///
    /// Rotations without an angle get `π/2`. Unknown names never fail; they
    /// become [`GateStep::Unrecognized`].
    pub fn from_name(name: &str, theta: Option<f64>) -> Self {
        let theta = theta.unwrap_or(DEFAULT_THETA);
        match name.trim().to_ascii_lowercase().as_str() {
            "x" => GateStep::X,
            "y" => GateStep::Y,
            "z" => GateStep::Z,
            "h" => GateStep::H,
            "rx" => GateStep::RotateX { theta },
            "ry" => GateStep::RotateY { theta },
            "rz" => GateStep::RotateZ { theta },
            _ => GateStep::Unrecognized { name: name.to_string() },
        }
    }

    /// Canonical name, the inverse of [`GateStep::from_name`].
    pub fn name(&self) -> &str {
        match self {
            GateStep::X => "X",
            GateStep::Y => "Y",
            GateStep::Z => "Z",
            GateStep::H => "H",
            GateStep::RotateX { .. } => "Rx",
            GateStep::RotateY { .. } => "Ry",
            GateStep::RotateZ { .. } => "Rz",
            GateStep::Unrecognized { name } => name,
        }
    }

    /// The rotation angle, for the parameterized gates.
    pub fn theta(&self) -> Option<f64> {
        match self {
            GateStep::RotateX { theta } | GateStep::RotateY { theta } | GateStep::RotateZ { theta } => {
                Some(*theta)
            }
            _ => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, GateStep::Unrecognized { .. })
    }
}

impl fmt::Display for GateStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.theta() {
            Some(theta) => write!(f, "{}({:.2})", self.name(), theta),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// A closed-form Bloch-affine noise channel. Parameters are stored as given
/// and clamped into `[0, 1]` whenever the channel is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseStep {
    /// Energy relaxation toward |0⟩ with probability `gamma`.
    AmplitudeDamping {
        gamma: f64,
    },
    /// Dephasing with probability `lambda`; populations are untouched.
    PhaseDamping {
        lambda: f64,
    },
    /// Replacement by the maximally mixed state with probability `p`.
    Depolarizing {
        p: f64,
    },
    /// A channel name the library does not know. Applying it leaves the state unchanged.
    Unrecognized {
        name: String,
    },
}

impl NoiseStep {
    /// Resolves a channel name (`amplitude_damping`, `phase_damping`,
    /// `depolarizing`; case-insensitive, `-` and spaces accepted for `_`).
    ///
    /// The strength is read from the parameter matching the channel
    /// (`gamma`, `lambda`, `p`), falling back to `p` and then to zero.
    pub fn from_name(name: &str, params: &StepParams) -> Self {
        let normalized: String = name
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "amplitude_damping" => NoiseStep::AmplitudeDamping { gamma: params.gamma.or(params.p).unwrap_or(0.0) },
            "phase_damping" => NoiseStep::PhaseDamping { lambda: params.lambda.or(params.p).unwrap_or(0.0) },
            "depolarizing" => NoiseStep::Depolarizing { p: params.p.unwrap_or(0.0) },
            _ => NoiseStep::Unrecognized { name: name.to_string() },
        }
    }

    /// Canonical name, the inverse of [`NoiseStep::from_name`].
    pub fn name(&self) -> &str {
        match self {
            NoiseStep::AmplitudeDamping { .. } => "amplitude_damping",
            NoiseStep::PhaseDamping { .. } => "phase_damping",
            NoiseStep::Depolarizing { .. } => "depolarizing",
            NoiseStep::Unrecognized { name } => name,
        }
    }

    /// Name of the strength parameter and its raw (unclamped) value.
    pub fn strength(&self) -> Option<(&'static str, f64)> {
        match self {
            NoiseStep::AmplitudeDamping { gamma } => Some(("gamma", *gamma)),
            NoiseStep::PhaseDamping { lambda } => Some(("lambda", *lambda)),
            NoiseStep::Depolarizing { p } => Some(("p", *p)),
            NoiseStep::Unrecognized { .. } => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, NoiseStep::Unrecognized { .. })
    }

    /// Short label used in circuit diagrams.
    pub fn symbol(&self) -> &str {
        match self {
            NoiseStep::AmplitudeDamping { .. } => "AD",
            NoiseStep::PhaseDamping { .. } => "PD",
            NoiseStep::Depolarizing { .. } => "DP",
            NoiseStep::Unrecognized { .. } => "?",
        }
    }
}

impl fmt::Display for NoiseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.strength() {
            Some((_, value)) => write!(f, "{}({:.2})", self.symbol(), value),
            None => write!(f, "{}", self.name()),
        }
    }
}

/// One entry of a circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitStep {
    /// A single unitary gate.
    Gate(GateStep),
    /// Several gates applied in order and recorded as one frame.
    Gates(Vec<GateStep>),
    /// A noise channel.
    Noise(NoiseStep),
}

impl CircuitStep {
    /// How the scheduler should animate into the frame this step produces.
    pub fn transition_mode(&self) -> TransitionMode {
        match self {
            CircuitStep::Gate(_) | CircuitStep::Gates(_) => TransitionMode::Geodesic,
            CircuitStep::Noise(_) => TransitionMode::Linear,
        }
    }

    pub fn is_noise(&self) -> bool {
        matches!(self, CircuitStep::Noise(_))
    }
}

impl From<GateStep> for CircuitStep {
    fn from(gate: GateStep) -> Self {
        CircuitStep::Gate(gate)
    }
}

impl From<NoiseStep> for CircuitStep {
    fn from(noise: NoiseStep) -> Self {
        CircuitStep::Noise(noise)
    }
}

impl fmt::Display for CircuitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitStep::Gate(gate) => write!(f, "{}", gate),
            CircuitStep::Gates(gates) => {
                let labels: Vec<String> = gates.iter().map(|g| g.to_string()).collect();
                write!(f, "{}", labels.join("·"))
            }
            CircuitStep::Noise(noise) => write!(f, "{}", noise),
        }
    }
}

/// Interpolation used when animating between two consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Along the sphere, for unitary steps.
    Geodesic,
    /// Straight line through the ball, for dissipative steps.
    Linear,
}

/// Optional numeric parameters attached to a step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StepParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gamma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<f64>,
}

impl StepParams {
    pub fn with_theta(theta: f64) -> Self {
        Self { theta: Some(theta), ..Self::default() }
    }

    pub fn with_gamma(gamma: f64) -> Self {
        Self { gamma: Some(gamma), ..Self::default() }
    }

    pub fn with_lambda(lambda: f64) -> Self {
        Self { lambda: Some(lambda), ..Self::default() }
    }

    pub fn with_p(p: f64) -> Self {
        Self { p: Some(p), ..Self::default() }
    }
}
