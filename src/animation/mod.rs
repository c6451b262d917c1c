pub mod clip;
pub mod phase;
pub mod timeline;

pub use clip::AnimationClip;
pub use phase::{AdvanceOutcome, DEFAULT_MAX_DELTA, PhaseController, PhaseState};
pub use timeline::AnimationTimeline;
