// src/core/frame.rs

use super::density::DensityMatrix;
use super::vector::BlochVector;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One recorded snapshot of the evolving state: the Bloch vector after a step
/// and the density matrix reconstructed from it.
///
/// Frames are produced by the evaluator and never modified afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// State after the step.
    pub bloch_vector: BlochVector,
    /// ½(I + r·σ) for `bloch_vector`.
    pub density_matrix: DensityMatrix,
}

impl Frame {
    /// Records `v` together with its reconstructed density matrix.
    pub fn from_vector(v: BlochVector) -> Self {
        Self {
            bloch_vector: v,
            density_matrix: DensityMatrix::from_bloch(v),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame{} purity={:.4}", self.bloch_vector, self.bloch_vector.purity())
    }
}
