//! Platform-independent input events.
//!
//! Windowing backends translate their native events into [`InputEvent`]
//! (see `app::winit::input_adapter`); everything downstream only sees
//! these types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Keys the viewer can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    PageUp,
    PageDown,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// One fired wheel event; `delta_y` is positive when scrolling down.
    Wheel { delta_y: f32 },
    /// A finger touched the surface.
    TouchStart { id: u64, position: Vec2 },
    /// A finger was lifted at `position`.
    TouchEnd { id: u64, position: Vec2 },
    /// The platform took the touch away (a system gesture, the window lost focus).
    TouchCancel { id: u64 },
    /// A primary-button click at `position`, in surface pixels from the top-left.
    Click { position: Vec2 },
    /// A key press. `repeat` is set for auto-repeat events while held.
    Key { key: Key, repeat: bool },
    /// The render surface changed size, in physical pixels.
    Resize { width: u32, height: u32 },
}

/// Maps a surface pixel position to normalized device coordinates.
///
/// `x` grows right and `y` grows up, both in `[-1, 1]`. Returns `None` for a
/// surface with no area.
#[must_use]
pub fn pointer_to_ndc(position: Vec2, surface_size: Vec2) -> Option<Vec2> {
    if surface_size.x <= 0.0 || surface_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (position.x / surface_size.x) * 2.0 - 1.0,
        -(position.y / surface_size.y) * 2.0 + 1.0,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners() {
        let size = Vec2::new(800.0, 400.0);
        assert_eq!(pointer_to_ndc(Vec2::ZERO, size), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_to_ndc(size, size), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pointer_to_ndc(size * 0.5, size), Some(Vec2::ZERO));
    }

    #[test]
    fn empty_surface_has_no_ndc() {
        assert_eq!(pointer_to_ndc(Vec2::ONE, Vec2::new(0.0, 10.0)), None);
    }
}
