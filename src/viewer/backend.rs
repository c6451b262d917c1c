//! Seams to the host environment.
//!
//! The viewer never draws pixels or opens browser tabs itself. A
//! [`RenderBackend`] draws the scene through the resolved camera and a
//! [`Navigator`] performs out-of-band navigation.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::scene::{Camera, Scene};

/// Optional diagnostic overlay, passed explicitly to every render call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DebugRenderMode {
    #[default]
    Normal,
    Wireframe,
    BoundingBoxes,
    UvPattern,
}

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    pub scene: &'a Scene,
    pub camera: &'a Camera,
    /// Playback position of the intro clip, in seconds.
    pub clip_time: f32,
    pub debug_mode: DebugRenderMode,
    pub frame_count: u64,
}

/// Per-frame draw call into the rendering engine.
pub trait RenderBackend {
    fn render(&mut self, frame: &FrameContext<'_>) -> Result<()>;
}

/// Fire-and-forget navigation side effect.
pub trait Navigator {
    fn open_external(&mut self, url: &str);
}

/// Navigator that only records the request in the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn open_external(&mut self, url: &str) {
        log::info!("Open external: {url}");
    }
}

/// Backend that draws nothing. Useful for headless runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullBackend {
    pub frames: u64,
}

impl RenderBackend for NullBackend {
    fn render(&mut self, _frame: &FrameContext<'_>) -> Result<()> {
        self.frames += 1;
        Ok(())
    }
}
