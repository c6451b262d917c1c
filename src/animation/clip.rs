/// A single animation timeline bundled with a loaded asset.
///
/// The viewer never samples tracks itself (posing is the rendering engine's
/// job); it only needs the clip's identity and length to drive playback time.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    pub duration: f32,
}

impl AnimationClip {
    pub fn new(name: impl Into<String>, duration: f32) -> Self {
        Self {
            name: name.into(),
            duration: duration.max(0.0),
        }
    }

    /// Builds a clip whose duration is the latest keyframe time across all channels.
    pub fn from_keyframe_times(name: impl Into<String>, times: impl IntoIterator<Item = f32>) -> Self {
        let duration = times
            .into_iter()
            .filter(|t| t.is_finite())
            .fold(0.0_f32, f32::max);

        Self::new(name, duration)
    }

    /// A zero-length clip cannot be played.
    #[inline]
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.duration > 0.0
    }
}
