// src/playback/scheduler.rs

//! The playback state machine.

use super::PlaybackConfig;
use crate::core::{BlochVector, DensityMatrix, GROUND_STATE, geodesic, lerp};
use crate::operations::TransitionMode;
use crate::simulation::Evaluation;
use tracing::{debug, trace};

/// An animation between two consecutive frames. Exists only while in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenState {
    pub from: BlochVector,
    pub to: BlochVector,
    pub mode: TransitionMode,
    /// Host clock reading when the tween began, in milliseconds.
    pub start_ms: f64,
    /// Captured from the config when the tween began.
    pub duration_ms: f64,
    /// `start_ms + duration_ms`. The tween lands on the first tick at or after it.
    pub end_ms: f64,
    /// Index of the frame the tween leaves; it lands on `from_index + 1`.
    pub from_index: usize,
    /// Frame-list generation the tween belongs to.
    pub generation: u64,
}

impl TweenState {
    fn new(from: BlochVector, to: BlochVector, mode: TransitionMode, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            from,
            to,
            mode,
            start_ms,
            duration_ms,
            end_ms: start_ms + duration_ms,
            from_index: 0,
            generation: 0,
        }
    }

    /// Raw (uneased) progress at `now_ms`, used for easing only. A zero,
    /// negative or non-finite duration completes immediately; a non-finite
    /// clock reads as no progress.
    pub fn progress(&self, now_ms: f64) -> f64 {
        if !self.has_duration() {
            return 1.0;
        }
        if !now_ms.is_finite() {
            return 0.0;
        }
        (now_ms - self.start_ms) / self.duration_ms
    }

    /// `true` once `now_ms` has reached `end_ms`.
    ///
    /// `(start + d - start) / d` can round to just below one, so landing is
    /// decided on the stored end time, not on [`progress`](Self::progress).
    pub fn is_complete(&self, now_ms: f64) -> bool {
        !self.has_duration() || now_ms >= self.end_ms
    }

    fn has_duration(&self) -> bool {
        self.duration_ms.is_finite() && self.duration_ms > 0.0
    }
}

/// Observable state of the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackState {
    /// Showing a recorded frame.
    Idle { index: usize },
    /// Animating from `from_index` toward `from_index + 1`.
    Tweening { from_index: usize, progress: f64 },
}

/// What a call to [`PlaybackScheduler::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// No tween in flight; nothing published.
    Idle,
    /// Mid-tween; `vector` was published.
    Advanced { vector: BlochVector },
    /// A tween landed on `index` and the next one has already started.
    Landed { index: usize },
    /// A tween landed on `index` and playback stopped.
    Finished { index: usize },
    /// The in-flight tween belonged to a replaced frame list and was dropped.
    ///
    /// `load` already clears the tween synchronously, so this only fires if
    /// that invariant is ever broken; the generation tag is a second check.
    Stale,
}

/// Cooperative, single-threaded scheduler that animates between recorded frames.
///
/// All timing comes from the `now_ms` arguments; the scheduler never reads a
/// clock itself. Unitary steps animate along the sphere, noise steps in a
/// straight line through the ball.
///
/// # Examples
///
/// ```
/// use blochq::{BlochVector, CircuitBuilder, Evaluator, GateStep, PlaybackConfig, PlaybackScheduler};
///
/// let circuit = CircuitBuilder::new().gate(GateStep::H).build();
/// let mut scheduler = PlaybackScheduler::new(PlaybackConfig::default());
/// scheduler.load(Evaluator::new().run(&circuit));
///
/// assert!(scheduler.play(0.0));
/// scheduler.tick(400.0); // halfway along the arc
/// scheduler.tick(800.0); // lands exactly on the recorded frame
/// assert_eq!(scheduler.current_index(), 1);
/// assert!(scheduler.published().approx_eq(BlochVector::new(1.0, 0.0, 0.0), 1e-12));
/// ```
#[derive(Debug)]
pub struct PlaybackScheduler {
    config: PlaybackConfig,
    /// Frames being played; `None` until the first `load`.
    evaluation: Option<Evaluation>,
    /// Frame currently shown (or being left, while tweening).
    index: usize,
    /// The single in-flight tween, if any.
    tween: Option<TweenState>,
    /// Continuous playback is active: a landing tween chains into the next.
    continuous: bool,
    /// Last vector handed to the visualizer.
    published: BlochVector,
    /// Bumped on every `load`.
    generation: u64,
}

impl PlaybackScheduler {
    /// Creates an idle scheduler with no frames, publishing the ground state.
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            evaluation: None,
            index: 0,
            tween: None,
            continuous: false,
            published: GROUND_STATE,
            generation: 0,
        }
    }

    /// Replaces the frame list.
    ///
    /// Any tween is dropped and playback stops. The current index is kept if
    /// it still exists, otherwise clamped to the new last frame, and that
    /// frame's vector is published.
    pub fn load(&mut self, evaluation: Evaluation) {
        self.generation += 1;
        self.tween = None;
        self.continuous = false;
        self.index = self.index.min(evaluation.len().saturating_sub(1));
        if let Some(frame) = evaluation.frame(self.index) {
            self.published = frame.bloch_vector;
        }
        debug!(frames = evaluation.len(), index = self.index, generation = self.generation, "frame list loaded");
        self.evaluation = Some(evaluation);
    }

    /// Starts playback from the current frame, wrapping to frame 0 when at
    /// the end. Keeps going frame after frame when `config.continuous` is set.
    ///
    /// Returns `false` (and does nothing) when there is nothing to animate
    /// or `now_ms` is not finite.
    pub fn play(&mut self, now_ms: f64) -> bool {
        let continuous = self.config.continuous;
        self.begin(now_ms, continuous)
    }

    /// Animates exactly one transition from the current frame, ignoring
    /// `config.continuous`.
    pub fn step_forward(&mut self, now_ms: f64) -> bool {
        self.begin(now_ms, false)
    }

    fn begin(&mut self, now_ms: f64, continuous: bool) -> bool {
        if !now_ms.is_finite() {
            debug!(now_ms, "play ignored: non-finite clock");
            return false;
        }
        let frame_count = self.frame_count();
        if frame_count < 2 {
            debug!(frames = frame_count, "play ignored: nothing to animate");
            return false;
        }
        self.tween = None;
        if self.index >= frame_count - 1 {
            self.index = 0;
            if let Some(first) = self.frame_vector(0) {
                self.published = first;
            }
        }
        self.continuous = continuous;
        debug!(index = self.index, continuous, "playback started");
        self.start_tween(now_ms)
    }

    // Caller guarantees `index + 1` is a valid frame.
    fn start_tween(&mut self, now_ms: f64) -> bool {
        let Some(evaluation) = &self.evaluation else {
            return false;
        };
        let (Some(from), Some(to), Some(mode)) = (
            evaluation.frame(self.index),
            evaluation.frame(self.index + 1),
            evaluation.transition_into(self.index + 1),
        ) else {
            return false;
        };
        let tween = TweenState {
            from_index: self.index,
            generation: self.generation,
            ..TweenState::new(from.bloch_vector, to.bloch_vector, mode, now_ms, self.config.duration_ms)
        };
        trace!(from_index = tween.from_index, ?mode, duration_ms = tween.duration_ms, "tween started");
        self.tween = Some(tween);
        true
    }

    /// Advances the in-flight tween to `now_ms` and publishes the result.
    ///
    /// When the tween completes the exact recorded vector of the target frame
    /// is published and the index advances. With continuous playback the next
    /// tween starts at `now_ms`; after the last frame playback stops.
    ///
    /// A non-finite `now_ms` is ignored: nothing is published and the tween
    /// stays in flight.
    pub fn tick(&mut self, now_ms: f64) -> TickOutcome {
        let Some(tween) = self.tween else {
            return TickOutcome::Idle;
        };
        if !now_ms.is_finite() {
            debug!(now_ms, "tick ignored: non-finite clock");
            return TickOutcome::Idle;
        }
        if tween.generation != self.generation {
            debug!(tween_generation = tween.generation, generation = self.generation, "stale tween discarded");
            self.tween = None;
            return TickOutcome::Stale;
        }

        if tween.is_complete(now_ms) {
            self.tween = None;
            self.index = tween.from_index + 1;
            self.published = tween.to;
            trace!(index = self.index, "tween landed");
            if self.continuous && self.index + 1 < self.frame_count() && self.start_tween(now_ms) {
                return TickOutcome::Landed { index: self.index };
            }
            self.continuous = false;
            return TickOutcome::Finished { index: self.index };
        }

        let t = self.config.easing.apply(tween.progress(now_ms)).clamp(0.0, 1.0);
        let vector = match tween.mode {
            TransitionMode::Geodesic => geodesic(tween.from, tween.to, t),
            TransitionMode::Linear => lerp(tween.from, tween.to, t),
        };
        self.published = vector;
        TickOutcome::Advanced { vector }
    }

    /// Stops playback, dropping the in-flight tween. The last published
    /// vector stays on screen; the index only moves for completed tweens.
    pub fn pause(&mut self) {
        debug!(index = self.index, "playback paused");
        self.discard();
    }

    /// Same as [`pause`](Self::pause): drops the tween and freezes the view.
    pub fn cancel(&mut self) {
        debug!(index = self.index, "playback cancelled");
        self.discard();
    }

    fn discard(&mut self) {
        self.tween = None;
        self.continuous = false;
    }

    /// Jumps to `index` without animation, clamped to the last frame.
    ///
    /// Returns `false` (and does nothing) when no frames are loaded.
    pub fn seek(&mut self, index: usize) -> bool {
        let frame_count = self.frame_count();
        if frame_count == 0 {
            return false;
        }
        self.discard();
        self.index = index.min(frame_count - 1);
        if let Some(v) = self.frame_vector(self.index) {
            self.published = v;
        }
        debug!(index = self.index, "seek");
        true
    }

    /// Sets the tween length used from the next tween on.
    pub fn set_duration_ms(&mut self, duration_ms: f64) {
        self.config.duration_ms = duration_ms;
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Vector the visualizer should draw.
    pub fn published(&self) -> BlochVector {
        self.published
    }

    /// Density matrix of the published vector.
    pub fn published_density(&self) -> DensityMatrix {
        DensityMatrix::from_bloch(self.published)
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.evaluation.as_ref().map_or(0, Evaluation::len)
    }

    pub fn evaluation(&self) -> Option<&Evaluation> {
        self.evaluation.as_ref()
    }

    pub fn tween(&self) -> Option<&TweenState> {
        self.tween.as_ref()
    }

    /// `true` while a tween is in flight.
    pub fn is_tweening(&self) -> bool {
        self.tween.is_some()
    }

    /// `true` while continuous playback will chain into the next frame.
    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current state, with tween progress measured at `now_ms`.
    pub fn state(&self, now_ms: f64) -> PlaybackState {
        match &self.tween {
            Some(tween) => PlaybackState::Tweening {
                from_index: tween.from_index,
                progress: tween.progress(now_ms).clamp(0.0, 1.0),
            },
            None => PlaybackState::Idle { index: self.index },
        }
    }

    fn frame_vector(&self, index: usize) -> Option<BlochVector> {
        self.evaluation.as_ref()?.frame(index).map(|f| f.bloch_vector)
    }
}

impl Default for PlaybackScheduler {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
