// src/simulation/results.rs
use crate::core::Frame;
use crate::operations::TransitionMode;
use std::fmt;

/// The output of evaluating a circuit: one frame for the initial state plus
/// one per step, and for every step the way it should be animated.
///
/// `frames().len() == transitions().len() + 1` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    frames: Vec<Frame>,
    /// `transitions[i]` animates `frames[i]` into `frames[i + 1]`.
    transitions: Vec<TransitionMode>,
}

impl Evaluation {
    pub(crate) fn new(initial: Frame) -> Self {
        Self { frames: vec![initial], transitions: Vec::new() }
    }

    pub(crate) fn record(&mut self, frame: Frame, mode: TransitionMode) {
        self.frames.push(frame);
        self.transitions.push(mode);
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn transitions(&self) -> &[TransitionMode] {
        &self.transitions
    }

    /// Number of frames (steps + 1).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Never true for an evaluator-produced value; there is always frame 0.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Interpolation mode for the tween that ends on `frames[index]`.
    /// `None` for frame 0 and out-of-range indices.
    pub fn transition_into(&self, index: usize) -> Option<TransitionMode> {
        index.checked_sub(1).and_then(|i| self.transitions.get(i).copied())
    }

    pub fn final_frame(&self) -> Option<&Frame> {
        self.frames.last()
    }

    pub fn into_frames(self) -> Vec<Frame> {
        self.frames
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Evaluation ({} frames):", self.frames.len())?;
        for (i, frame) in self.frames.iter().enumerate() {
            let via = match self.transition_into(i) {
                Some(TransitionMode::Geodesic) => "geodesic",
                Some(TransitionMode::Linear) => "linear",
                None => "initial",
            };
            writeln!(f, "  [{}] {} ({})", i, frame, via)?;
        }
        Ok(())
    }
}
