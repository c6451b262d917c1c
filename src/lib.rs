#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

//! Showroom: scene viewer core.
//!
//! Loads a packaged glTF scene, locks rendering to a named in-scene camera
//! and paces a single intro clip through checkpoints that only advance on
//! user interaction. Clicks on the in-scene dashboard are mapped back through
//! the surface's UV transform to canvas buttons.
//!
//! - [`animation`]: checkpoint timeline and the gated phase controller
//! - [`interaction`]: input events and gesture debouncing
//! - [`picking`]: ray casting and UV-space button hit mapping
//! - [`scene`] / [`resources`]: CPU-side scene model
//! - [`assets`]: glTF loading
//! - [`patches`]: post-load material tagging and presets
//! - [`viewer`]: orchestration of all of the above per render surface

pub mod animation;
#[cfg(feature = "winit")]
pub mod app;
pub mod assets;
pub mod config;
pub mod errors;
pub mod interaction;
pub mod patches;
pub mod picking;
pub mod resources;
pub mod scene;
pub mod utils;
pub mod viewer;

pub use animation::{AdvanceOutcome, AnimationClip, AnimationTimeline, PhaseController, PhaseState};
pub use assets::{AssetSource, LoadedAsset};
pub use config::ViewerConfig;
pub use errors::{Result, ShowroomError};
pub use interaction::{InputEvent, InteractionDispatcher, Key};
pub use picking::{ButtonRegion, UvHitMapper};
pub use scene::{Camera, Node, Scene};
pub use utils::Clock;
pub use viewer::{CameraResolver, DebugRenderMode, LoadStatus, RenderBackend, Viewer};

#[cfg(feature = "winit")]
pub use app::App;
