//! Checkpoint-Gated Playback
//!
//! [`PhaseController`] drives the intro clip through a fixed list of
//! checkpoints. Playback only moves forward while [`PhaseState::Playing`];
//! reaching a checkpoint pins the clip there until the next advance signal.
//!
//! ```text
//! WaitingForInteraction(0) ─advance→ Playing(0) ─tick→ PausedAt(0)
//!        ─advance→ Playing(1) ─tick→ PausedAt(1) ... ─tick→ Completed
//! ```
//!
//! The controller is usable before any asset has loaded: without a timeline
//! every operation is a no-op.

use crate::animation::timeline::AnimationTimeline;

/// Default cap on the time a single tick may apply, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.05;

/// Where the intro sequence currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseState {
    /// Idle until an interaction starts playback toward checkpoint `i`.
    WaitingForInteraction(usize),
    /// Clip time is advancing toward checkpoint `i`.
    Playing(usize),
    /// Clip time is pinned exactly at checkpoint `i`.
    PausedAt(usize),
    /// Clip time is pinned at the last checkpoint; further signals are ignored.
    Completed,
}

impl PhaseState {
    #[must_use]
    pub fn checkpoint_index(self) -> Option<usize> {
        match self {
            Self::WaitingForInteraction(i) | Self::Playing(i) | Self::PausedAt(i) => Some(i),
            Self::Completed => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Playing(_))
    }
}

impl Default for PhaseState {
    fn default() -> Self {
        Self::WaitingForInteraction(0)
    }
}

/// Result of feeding one advance signal to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Playback started toward checkpoint `i` from a waiting state.
    Started(usize),
    /// Playback resumed from a paused checkpoint toward checkpoint `i`.
    Resumed(usize),
    /// The signal had no effect (already playing, completed, or nothing loaded).
    Ignored,
}

impl AdvanceOutcome {
    /// Whether playback (re)started, in which case the frame clock must be flushed.
    #[inline]
    #[must_use]
    pub fn started_playback(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[derive(Debug, Clone)]
pub struct PhaseController {
    timeline: Option<AnimationTimeline>,
    phase: PhaseState,
    max_delta: f32,
}

impl Default for PhaseController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DELTA)
    }
}

impl PhaseController {
    /// Creates an empty controller; all operations are no-ops until a timeline is set.
    #[must_use]
    pub fn new(max_delta: f32) -> Self {
        Self {
            timeline: None,
            phase: PhaseState::default(),
            max_delta: if max_delta.is_finite() && max_delta > 0.0 {
                max_delta
            } else {
                DEFAULT_MAX_DELTA
            },
        }
    }

    #[must_use]
    pub fn with_timeline(timeline: AnimationTimeline, max_delta: f32) -> Self {
        let mut controller = Self::new(max_delta);
        controller.set_timeline(Some(timeline));
        controller
    }

    /// Replaces the timeline and returns to the initial phase.
    pub fn set_timeline(&mut self, timeline: Option<AnimationTimeline>) {
        self.timeline = timeline;
        self.reset();
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> PhaseState {
        self.phase
    }

    #[inline]
    #[must_use]
    pub fn timeline(&self) -> Option<&AnimationTimeline> {
        self.timeline.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn has_timeline(&self) -> bool {
        self.timeline.is_some()
    }

    #[inline]
    #[must_use]
    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Current clip time, or `0.0` when nothing is loaded.
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.timeline
            .as_ref()
            .map_or(0.0, AnimationTimeline::current_time)
    }

    /// Handles one normalized interaction.
    ///
    /// The caller must flush its frame clock when the outcome
    /// [`started_playback`](AdvanceOutcome::started_playback), otherwise the
    /// idle time between interactions is applied by the next tick.
    pub fn on_advance_signal(&mut self) -> AdvanceOutcome {
        let Some(timeline) = self.timeline.as_mut() else {
            return AdvanceOutcome::Ignored;
        };

        let outcome = match self.phase {
            PhaseState::WaitingForInteraction(i) => {
                if i == 0 {
                    timeline.set_current_time(0.0);
                }
                self.phase = PhaseState::Playing(i);
                AdvanceOutcome::Started(i)
            }
            PhaseState::PausedAt(i) if i < timeline.last_index() => {
                self.phase = PhaseState::Playing(i + 1);
                AdvanceOutcome::Resumed(i + 1)
            }
            PhaseState::PausedAt(_) | PhaseState::Playing(_) | PhaseState::Completed => {
                AdvanceOutcome::Ignored
            }
        };

        if outcome.started_playback() {
            log::debug!("Intro phase -> {:?} at t={:.3}s", self.phase, timeline.current_time());
        }
        outcome
    }

    /// Advances clip time by one frame.
    ///
    /// `delta` is clamped to `[0, max_delta]` before it is applied. Reaching the
    /// target checkpoint pins the time exactly on it. Returns the new phase when
    /// this tick caused a transition.
    pub fn tick(&mut self, delta: f32) -> Option<PhaseState> {
        let PhaseState::Playing(i) = self.phase else {
            return None;
        };
        let timeline = self.timeline.as_mut()?;
        let target = timeline.checkpoint(i)?;

        let delta = if delta.is_finite() {
            delta.clamp(0.0, self.max_delta)
        } else {
            0.0
        };
        let time = timeline.current_time() + delta;

        if time < target {
            timeline.set_current_time(time);
            return None;
        }

        timeline.set_current_time(target);
        self.phase = if i >= timeline.last_index() {
            PhaseState::Completed
        } else {
            PhaseState::PausedAt(i)
        };
        log::debug!("Intro phase -> {:?} at t={target:.3}s", self.phase);
        Some(self.phase)
    }

    /// Returns to `WaitingForInteraction(0)` with the clip rewound to zero.
    pub fn reset(&mut self) {
        self.phase = PhaseState::WaitingForInteraction(0);
        if let Some(timeline) = self.timeline.as_mut() {
            timeline.set_current_time(0.0);
        }
    }
}
