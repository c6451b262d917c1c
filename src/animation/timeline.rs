use crate::animation::clip::AnimationClip;
use crate::errors::{Result, ShowroomError};

/// Playback position of the intro clip plus the checkpoints it must pause at.
///
/// Invariants upheld by construction:
/// - `checkpoints` is non-empty, strictly increasing and positive
/// - the last checkpoint is `<= clip_duration`
/// - `0 <= current_time <= clip_duration`
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationTimeline {
    clip_duration: f32,
    checkpoints: Vec<f32>,
    current_time: f32,
}

impl AnimationTimeline {
    /// Creates a timeline from checkpoint times in seconds.
    ///
    /// Checkpoints past the end of the clip collapse into a single checkpoint
    /// at `clip_duration`, so a clip shorter than authored still plays to its end.
    pub fn new(clip_duration: f32, checkpoints: &[f32]) -> Result<Self> {
        if !clip_duration.is_finite() || clip_duration <= 0.0 {
            return Err(ShowroomError::InvalidTimeline(format!(
                "clip duration must be positive, got {clip_duration}"
            )));
        }

        let mut points: Vec<f32> = Vec::with_capacity(checkpoints.len());
        for &time in checkpoints {
            if !time.is_finite() || time <= 0.0 {
                return Err(ShowroomError::InvalidTimeline(format!(
                    "checkpoint must be positive, got {time}"
                )));
            }
            if let Some(&last) = points.last()
                && time <= last
            {
                return Err(ShowroomError::InvalidTimeline(format!(
                    "checkpoints must be strictly increasing ({last} then {time})"
                )));
            }
            points.push(time);
        }

        if let Some(first_past_end) = points.iter().position(|&t| t > clip_duration) {
            log::warn!(
                "Dropping {} checkpoint(s) beyond clip end ({clip_duration:.3}s)",
                points.len() - first_past_end
            );
            points.truncate(first_past_end);
            if points.last().is_none_or(|&t| t < clip_duration) {
                points.push(clip_duration);
            }
        }

        if points.is_empty() {
            points.push(clip_duration);
        }

        Ok(Self {
            clip_duration,
            checkpoints: points,
            current_time: 0.0,
        })
    }

    /// Derives checkpoint times from authored frame numbers at `frame_rate` fps.
    pub fn from_frames(clip_duration: f32, frames: &[u32], frame_rate: f32) -> Result<Self> {
        if !frame_rate.is_finite() || frame_rate <= 0.0 {
            return Err(ShowroomError::InvalidTimeline(format!(
                "frame rate must be positive, got {frame_rate}"
            )));
        }
        let times: Vec<f32> = frames.iter().map(|&f| f as f32 / frame_rate).collect();
        Self::new(clip_duration, &times)
    }

    pub fn for_clip(clip: &AnimationClip, frames: &[u32], frame_rate: f32) -> Result<Self> {
        Self::from_frames(clip.duration, frames, frame_rate)
    }

    #[inline]
    #[must_use]
    pub fn clip_duration(&self) -> f32 {
        self.clip_duration
    }

    #[inline]
    #[must_use]
    pub fn checkpoints(&self) -> &[f32] {
        &self.checkpoints
    }

    #[inline]
    #[must_use]
    pub fn checkpoint(&self, index: usize) -> Option<f32> {
        self.checkpoints.get(index).copied()
    }

    #[inline]
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.checkpoints.len() - 1
    }

    #[inline]
    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub(crate) fn set_current_time(&mut self, time: f32) {
        self.current_time = time.clamp(0.0, self.clip_duration);
    }
}
