//! Interaction Dispatcher
//!
//! Collapses wheel, touch, key and click input into a single "advance"
//! signal, firing at most once per physical gesture:
//!
//! - **Wheel**: a scroll gesture emits a burst of wheel events. The first one
//!   advances; any event arriving within the cooldown of the previous one is
//!   part of the same gesture and is swallowed (the window slides with each
//!   event).
//! - **Touch**: the first finger down advances; additional fingers joining
//!   the same gesture do not. The gesture ends when every finger is lifted.
//!   A single finger lifted within `tap_slop_px` of where it landed is also
//!   reported as [`Dispatch::Tap`], so touch screens can press buttons.
//! - **Keys**: a configured key press advances; auto-repeat does not.
//! - **Clicks**: returned as [`Dispatch::Click`] so the caller can offer them
//!   to the in-scene buttons first and only advance on a miss.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::config::InputConfig;
use crate::interaction::input::{InputEvent, Key};

/// What the caller should do with one input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispatch {
    /// Send one advance signal to the phase controller.
    Advance,
    /// Resolve against button regions; advance if nothing is hit.
    Click(Vec2),
    /// Resolve against button regions only. The touch that produced it has
    /// already advanced.
    Tap(Vec2),
    /// Re-sync the active camera to the new surface size.
    Resize { width: u32, height: u32 },
    /// Nothing to do.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct InteractionDispatcher {
    wheel_cooldown: Duration,
    advance_keys: Vec<Key>,
    tap_slop: f32,
    last_wheel: Option<Instant>,
    /// Landing position of every finger still down.
    active_touches: FxHashMap<u64, Vec2>,
    /// Cleared once a second finger joins or the platform cancels a touch.
    tap_possible: bool,
}

impl Default for InteractionDispatcher {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}

impl InteractionDispatcher {
    #[must_use]
    pub fn new(config: &InputConfig) -> Self {
        Self {
            wheel_cooldown: Duration::from_millis(config.wheel_cooldown_ms),
            advance_keys: config.advance_keys.clone(),
            tap_slop: config.tap_slop_px,
            last_wheel: None,
            active_touches: FxHashMap::default(),
            tap_possible: false,
        }
    }

    /// Forgets in-flight gestures. Called when a new asset replaces the scene.
    pub fn reset(&mut self) {
        self.last_wheel = None;
        self.active_touches.clear();
        self.tap_possible = false;
    }

    #[must_use]
    pub fn wheel_cooldown(&self) -> Duration {
        self.wheel_cooldown
    }

    /// Classifies `event`, received at `now`.
    pub fn dispatch(&mut self, event: &InputEvent, now: Instant) -> Dispatch {
        match *event {
            InputEvent::Wheel { .. } => self.on_wheel(now),
            InputEvent::TouchStart { id, position } => self.on_touch_start(id, position),
            InputEvent::TouchEnd { id, position } => self.on_touch_end(id, position),
            InputEvent::TouchCancel { id } => {
                self.active_touches.remove(&id);
                self.tap_possible = false;
                Dispatch::Ignored
            }
            InputEvent::Key { key, repeat } => {
                if !repeat && self.advance_keys.contains(&key) {
                    Dispatch::Advance
                } else {
                    Dispatch::Ignored
                }
            }
            InputEvent::Click { position } => Dispatch::Click(position),
            InputEvent::Resize { width, height } => Dispatch::Resize { width, height },
        }
    }

    fn on_touch_start(&mut self, id: u64, position: Vec2) -> Dispatch {
        let gesture_start = self.active_touches.is_empty();
        self.active_touches.insert(id, position);
        self.tap_possible = gesture_start;
        if gesture_start {
            Dispatch::Advance
        } else {
            Dispatch::Ignored
        }
    }

    fn on_touch_end(&mut self, id: u64, position: Vec2) -> Dispatch {
        let Some(start) = self.active_touches.remove(&id) else {
            return Dispatch::Ignored;
        };
        let tap = self.tap_possible
            && self.active_touches.is_empty()
            && start.distance(position) <= self.tap_slop;
        if tap {
            self.tap_possible = false;
            Dispatch::Tap(position)
        } else {
            Dispatch::Ignored
        }
    }

    fn on_wheel(&mut self, now: Instant) -> Dispatch {
        let same_gesture = self
            .last_wheel
            .is_some_and(|last| now.saturating_duration_since(last) < self.wheel_cooldown);
        self.last_wheel = Some(now);

        if same_gesture {
            Dispatch::Ignored
        } else {
            Dispatch::Advance
        }
    }
}
