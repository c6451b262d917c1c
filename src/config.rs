//! Viewer Configuration
//!
//! Every knob the viewer reads at load time lives in [`ViewerConfig`]. All
//! fields have defaults, so a partial JSON document is enough:
//!
//! ```json
//! {
//!   "model_url": "./models/scene.glb",
//!   "intro": { "frame_rate": 30.0, "checkpoint_frames": [60, 120] }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::phase::DEFAULT_MAX_DELTA;
use crate::errors::{Result, ShowroomError};
use crate::interaction::input::Key;
use crate::viewer::backend::DebugRenderMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// File path or `http(s)://` URL of the packaged scene.
    pub model_url: String,
    /// Name of the in-scene camera that rendering is locked to.
    pub camera_name: String,
    pub intro: IntroConfig,
    pub input: InputConfig,
    pub dashboard: DashboardConfig,
    pub debug_mode: DebugRenderMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            model_url: "./models/scene.glb".to_string(),
            camera_name: "computerCamera".to_string(),
            intro: IntroConfig::default(),
            input: InputConfig::default(),
            dashboard: DashboardConfig::default(),
            debug_mode: DebugRenderMode::Normal,
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.camera_name.trim().is_empty() {
            return Err(ShowroomError::InvalidConfig("camera_name is empty".into()));
        }
        self.intro.validate()?;
        self.input.validate()?;
        self.dashboard.validate()
    }
}

/// Checkpoint authoring for the intro clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Frame rate the checkpoint frames were authored at.
    pub frame_rate: f32,
    /// Frames at which playback pauses, strictly increasing.
    pub checkpoint_frames: Vec<u32>,
    /// Upper bound on the time one render tick may apply, in seconds.
    pub max_delta: f32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            frame_rate: 24.0,
            checkpoint_frames: vec![48, 96, 132],
            max_delta: DEFAULT_MAX_DELTA,
        }
    }
}

impl IntroConfig {
    fn validate(&self) -> Result<()> {
        if !(self.frame_rate.is_finite() && self.frame_rate > 0.0) {
            return Err(ShowroomError::InvalidConfig(format!(
                "intro.frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if !(self.max_delta.is_finite() && self.max_delta > 0.0) {
            return Err(ShowroomError::InvalidConfig(format!(
                "intro.max_delta must be positive, got {}",
                self.max_delta
            )));
        }
        if self.checkpoint_frames.first() == Some(&0) {
            return Err(ShowroomError::InvalidConfig(
                "intro.checkpoint_frames must start after frame 0".into(),
            ));
        }
        if self.checkpoint_frames.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ShowroomError::InvalidConfig(
                "intro.checkpoint_frames must be strictly increasing".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Wheel events closer together than this belong to the same gesture.
    pub wheel_cooldown_ms: u64,
    /// Keys that advance the intro.
    pub advance_keys: Vec<Key>,
    /// How far a finger may drift, in surface pixels, and still count as a tap.
    pub tap_slop_px: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            wheel_cooldown_ms: 400,
            advance_keys: vec![Key::ArrowRight, Key::ArrowLeft],
            tap_slop_px: 10.0,
        }
    }
}

impl InputConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.tap_slop_px.is_finite() || self.tap_slop_px < 0.0 {
            return Err(ShowroomError::InvalidConfig(format!(
                "tap_slop_px must be a non-negative number, got {}",
                self.tap_slop_px
            )));
        }
        Ok(())
    }
}

/// Layout of the in-scene dashboard canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub padding: f32,
    pub button_width: f32,
    pub button_height: f32,
    pub gap: f32,
    /// Opened in a new browsing context by the `CODE` button.
    pub code_url: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 512,
            canvas_height: 256,
            padding: 28.0,
            button_width: 220.0,
            button_height: 40.0,
            gap: 14.0,
            code_url: "https://github.com/BMERCER-XYZ/V4Site".to_string(),
        }
    }
}

impl DashboardConfig {
    fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ShowroomError::InvalidConfig(
                "dashboard canvas must have a non-zero size".into(),
            ));
        }
        if self.button_width <= 0.0 || self.button_height <= 0.0 {
            return Err(ShowroomError::InvalidConfig(
                "dashboard buttons must have a positive size".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json_str(r#"{ "camera_name": "introCam" }"#).unwrap();
        assert_eq!(config.camera_name, "introCam");
        assert_eq!(config.intro.checkpoint_frames, vec![48, 96, 132]);
        assert_eq!(config.dashboard.canvas_width, 512);
    }

    #[test]
    fn rejects_unordered_frames() {
        let json = r#"{ "intro": { "checkpoint_frames": [10, 5] } }"#;
        assert!(matches!(
            ViewerConfig::from_json_str(json),
            Err(ShowroomError::InvalidConfig(_))
        ));
    }

    #[test]
    fn keys_and_debug_mode_parse_by_name() {
        let json = r#"{ "input": { "advance_keys": ["Space"] }, "debug_mode": "Wireframe" }"#;
        let config = ViewerConfig::from_json_str(json).unwrap();
        assert_eq!(config.input.advance_keys, vec![Key::Space]);
        assert_eq!(config.debug_mode, DebugRenderMode::Wireframe);
        assert!((config.input.tap_slop_px - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reads_config_file() {
        let path = std::env::temp_dir().join(format!("showroom-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "model_url": "https://example.com/car.glb" }"#).unwrap();
        let config = ViewerConfig::from_json_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.unwrap().model_url, "https://example.com/car.glb");
    }

    #[test]
    fn rejects_negative_tap_slop() {
        let json = r#"{ "input": { "tap_slop_px": -1.0 } }"#;
        assert!(matches!(
            ViewerConfig::from_json_str(json),
            Err(ShowroomError::InvalidConfig(_))
        ));
    }
}
