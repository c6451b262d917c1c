//! Winit input adapter
//!
//! Translates winit window events into the viewer's platform-independent
//! [`InputEvent`]s.

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::interaction::input::{InputEvent, Key};

/// Pixels per wheel "line" for devices reporting pixel deltas.
const PIXELS_PER_LINE: f32 = 100.0;

/// Converts a winit `PhysicalKey` into a viewer [`Key`].
#[must_use]
pub fn translate_key(physical_key: PhysicalKey) -> Option<Key> {
    let PhysicalKey::Code(code) = physical_key else {
        return None;
    };

    let key = match code {
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::Space => Key::Space,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Escape => Key::Escape,
        _ => return None,
    };

    Some(key)
}

/// Converts one winit touch update. Moves are not reported; the dispatcher
/// only compares where a finger landed with where it was lifted.
#[must_use]
pub fn translate_touch(id: u64, phase: TouchPhase, location: PhysicalPosition<f64>) -> Option<InputEvent> {
    let position = Vec2::new(location.x as f32, location.y as f32);
    match phase {
        TouchPhase::Started => Some(InputEvent::TouchStart { id, position }),
        TouchPhase::Ended => Some(InputEvent::TouchEnd { id, position }),
        TouchPhase::Cancelled => Some(InputEvent::TouchCancel { id }),
        TouchPhase::Moved => None,
    }
}

/// Stateful translator; winit reports clicks without a position, so the
/// adapter tracks the cursor.
#[derive(Debug, Clone, Copy, Default)]
pub struct WinitInputAdapter {
    cursor: Vec2,
}

impl WinitInputAdapter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Translates one window event. Events the viewer does not react to yield `None`.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                None
            }

            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => Some(InputEvent::Click {
                position: self.cursor,
            }),

            WindowEvent::MouseWheel { delta, .. } => {
                // winit reports positive y for scrolling up; the viewer expects positive down.
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -*y,
                    MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32) / PIXELS_PER_LINE,
                };
                Some(InputEvent::Wheel { delta_y })
            }

            WindowEvent::Touch(touch) => translate_touch(touch.id, touch.phase, touch.location),

            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                translate_key(event.physical_key).map(|key| InputEvent::Key {
                    key,
                    repeat: event.repeat,
                })
            }

            WindowEvent::Resized(size) => Some(InputEvent::Resize {
                width: size.width,
                height: size.height,
            }),

            _ => None,
        }
    }
}
