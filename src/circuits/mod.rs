// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! circuit steps (`blochq::operations::CircuitStep`).
//!
//! This module provides the `Circuit` structure, an ordered list of gate and
//! noise steps applied to a single qubit, and `CircuitBuilder` for assembling
//! one with method chaining.

use crate::operations::{CircuitStep, GateStep, NoiseStep};
use std::fmt;

/// An ordered sequence of steps applied to one qubit.
///
/// The order is the evaluation order; each step sees only the vector the
/// previous step produced.
#[derive(Clone, PartialEq, Default)]
pub struct Circuit {
    steps: Vec<CircuitStep>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Appends a step to the end of the sequence.
    pub fn add_step(&mut self, step: impl Into<CircuitStep>) {
        self.steps.push(step.into());
    }

    /// Appends every step from an iterator.
    pub fn add_steps<I>(&mut self, steps: I)
    where
        I: IntoIterator<Item = CircuitStep>,
    {
        self.steps.extend(steps);
    }

    /// Returns the ordered steps.
    pub fn steps(&self) -> &[CircuitStep] {
        &self.steps
    }

    /// Returns the total number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the circuit contains no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl From<Vec<CircuitStep>> for Circuit {
    fn from(steps: Vec<CircuitStep>) -> Self {
        Self { steps }
    }
}

impl FromIterator<CircuitStep> for Circuit {
    fn from_iter<I: IntoIterator<Item = CircuitStep>>(iter: I) -> Self {
        Self { steps: iter.into_iter().collect() }
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
#[derive(Default)]
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty CircuitBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a single step.
    ///
    /// Returns `self` to allow for continued method chaining.
    pub fn add_step(mut self, step: impl Into<CircuitStep>) -> Self {
        self.circuit.add_step(step);
        self
    }

    /// Adds multiple steps from an iterator.
    pub fn add_steps<I>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = CircuitStep>,
    {
        self.circuit.add_steps(steps);
        self
    }

    pub fn gate(self, gate: GateStep) -> Self {
        self.add_step(CircuitStep::Gate(gate))
    }

    /// Adds one step that applies `gates` in order and records a single frame.
    pub fn gates(self, gates: Vec<GateStep>) -> Self {
        self.add_step(CircuitStep::Gates(gates))
    }

    pub fn noise(self, noise: NoiseStep) -> Self {
        self.add_step(CircuitStep::Noise(noise))
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const H_WIRE: char = '─';
        const MIN_CELL: usize = 7; // e.g. "───H───"

        if self.steps.is_empty() {
            return writeln!(f, "blochq::Circuit[0 steps]");
        }

        // Centres a label on a wire segment at least MIN_CELL wide
        fn format_cell(symbol: &str) -> String {
            let slen = symbol.chars().count();
            let width = MIN_CELL.max(slen + 4);
            let total_dashes = width - slen;
            let pre_dashes = total_dashes / 2;
            let post_dashes = total_dashes - pre_dashes;
            format!(
                "{}{}{}",
                H_WIRE.to_string().repeat(pre_dashes),
                symbol,
                H_WIRE.to_string().repeat(post_dashes)
            )
        }

        writeln!(f, "blochq::Circuit[{} steps]", self.steps.len())?;
        write!(f, "q0: ")?;
        for step in &self.steps {
            let label = match step {
                CircuitStep::Gate(GateStep::Unrecognized { .. })
                | CircuitStep::Noise(NoiseStep::Unrecognized { .. }) => "?".to_string(),
                other => other.to_string(),
            };
            write!(f, "{}", format_cell(&label))?;
        }
        writeln!(f)
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
