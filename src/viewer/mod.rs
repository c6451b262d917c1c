//! Viewer orchestration.
//!
//! [`Viewer`] wires the pieces together for one render surface:
//!
//! - input events go through the [`InteractionDispatcher`]; clicks are
//!   offered to the dashboard buttons first and advance the intro on a miss
//! - every frame, the [`Clock`] delta drives the [`PhaseController`] and the
//!   scene is handed to a [`RenderBackend`] with the resolved camera
//! - each load builds a fresh [`LoadedContext`], so nothing from a previous
//!   asset survives into the next one
//! - [`Viewer::request_load`] fetches without blocking; the result is
//!   installed by the first frame after it arrives

pub mod backend;
pub mod camera_resolver;

pub use backend::{DebugRenderMode, FrameContext, LogNavigator, Navigator, NullBackend, RenderBackend};
pub use camera_resolver::CameraResolver;

use std::fmt;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use glam::{UVec2, Vec2};

use crate::animation::{AdvanceOutcome, AnimationClip, AnimationTimeline, PhaseController, PhaseState};
use crate::assets::{self, AssetSource, LoadedAsset};
use crate::config::ViewerConfig;
use crate::errors::{Result, ShowroomError};
use crate::interaction::input::pointer_to_ndc;
use crate::interaction::{Dispatch, InputEvent, InteractionDispatcher};
use crate::patches::{DashboardAction, DashboardLayout, RoleMap, apply_dashboard, apply_material_presets, tag_roles};
use crate::picking::hit_mapper::{ButtonRegion, UvHitMapper};
use crate::scene::{NodeHandle, Scene};
use crate::utils::time::Clock;

/// Frames between repeated "no camera" warnings.
const MISSING_CAMERA_WARN_INTERVAL: u64 = 600;

/// Loading state shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "No scene loaded"),
            Self::Loading => write!(f, "Loading..."),
            Self::Ready => write!(f, "Ready"),
            Self::Failed(reason) => write!(f, "Failed to load scene: {reason}"),
        }
    }
}

/// How the viewer reacted to one input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputResponse {
    Advanced(AdvanceOutcome),
    Button(DashboardAction),
    Resized,
    Ignored,
}

/// State derived from one loaded asset.
#[derive(Debug, Clone)]
pub struct LoadedContext {
    pub scene: Scene,
    pub controller: PhaseController,
    pub camera: CameraResolver,
    pub roles: RoleMap,
    /// Nodes whose surfaces receive dashboard clicks.
    pub hit_surfaces: Vec<NodeHandle>,
    pub clip: Option<AnimationClip>,
}

/// An asset fetch still in flight.
struct PendingLoad {
    source: AssetSource,
    receiver: flume::Receiver<Result<LoadedAsset>>,
}

pub struct Viewer {
    config: ViewerConfig,
    clock: Clock,
    dispatcher: InteractionDispatcher,
    hit_mapper: UvHitMapper,
    layout: DashboardLayout,
    navigator: Box<dyn Navigator>,

    context: Option<LoadedContext>,
    pending: Option<PendingLoad>,
    status: LoadStatus,

    viewport: UVec2,
    frame_count: u64,
    skipped_frames: u64,
}

impl fmt::Debug for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewer")
            .field("status", &self.status)
            .field("phase", &self.phase())
            .field("viewport", &self.viewport)
            .field("frame_count", &self.frame_count)
            .finish_non_exhaustive()
    }
}

impl Viewer {
    /// Creates a viewer with nothing loaded. Fails on an invalid config.
    pub fn new(config: ViewerConfig) -> Result<Self> {
        config.validate()?;
        let layout = DashboardLayout::compute(&config.dashboard);
        Ok(Self {
            clock: Clock::new(),
            dispatcher: InteractionDispatcher::new(&config.input),
            hit_mapper: UvHitMapper::new(layout.canvas_width, layout.canvas_height),
            layout,
            navigator: Box::new(LogNavigator),
            context: None,
            pending: None,
            status: LoadStatus::Idle,
            viewport: UVec2::new(1280, 720),
            frame_count: 0,
            skipped_frames: 0,
            config,
        })
    }

    #[must_use]
    pub fn with_navigator(mut self, navigator: Box<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = UVec2::new(width, height);
        self
    }

    // ========================================================================
    // Loading
    // ========================================================================

    /// Loads an asset and installs it, replacing any previous scene.
    ///
    /// The previous context is discarded before loading starts. On failure the
    /// viewer stays unloaded and [`status`](Self::status) carries the reason.
    pub fn load_asset(&mut self, source: &AssetSource) -> Result<()> {
        self.pending = None;
        self.context = None;
        self.status = LoadStatus::Loading;

        let result = assets::load(source);
        self.finish_load(source, result)
    }

    /// Starts a non-blocking load of `config.model_url`.
    pub fn request_configured_load(&mut self) {
        let source = AssetSource::from_location(&self.config.model_url);
        self.request_load(source);
    }

    /// Starts a non-blocking load, replacing any previous scene or pending load.
    ///
    /// The status is `Loading` until a later [`frame_at`](Self::frame_at) (or
    /// [`poll_pending_load`](Self::poll_pending_load)) sees the result arrive.
    /// This is the only load path that works in a browser.
    pub fn request_load(&mut self, source: AssetSource) {
        self.context = None;
        self.dispatcher.reset();
        self.status = LoadStatus::Loading;

        let (sender, receiver) = flume::bounded(1);
        assets::load_async(&source, move |result| {
            // The viewer may have moved on to another load; nobody is listening then.
            let _ = sender.send(result);
        });
        self.pending = Some(PendingLoad { source, receiver });
    }

    /// Installs the result of a pending load if it has arrived.
    ///
    /// Returns `true` when the load finished on this call, either way.
    pub fn poll_pending_load(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        let result = match pending.receiver.try_recv() {
            Ok(result) => result,
            Err(flume::TryRecvError::Empty) => {
                self.pending = Some(pending);
                return false;
            }
            Err(flume::TryRecvError::Disconnected) => Err(ShowroomError::HttpError(
                "fetch ended without a response".to_string(),
            )),
        };
        // Already logged on failure.
        let _ = self.finish_load(&pending.source, result);
        true
    }

    /// Whether a non-blocking load is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    fn finish_load(&mut self, source: &AssetSource, result: Result<LoadedAsset>) -> Result<()> {
        match result {
            Ok(asset) => {
                self.install(asset);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", source.display());
                self.status = LoadStatus::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Installs a loaded asset: tags and patches materials, resolves the
    /// camera and builds the intro timeline.
    pub fn install(&mut self, asset: LoadedAsset) {
        let clip = asset.intro_clip().cloned();
        let LoadedAsset { mut scene, .. } = asset;
        scene.update_world_matrices();

        let mut roles = tag_roles(&scene);
        apply_material_presets(&mut scene, &roles);
        let hit_surfaces = apply_dashboard(&mut scene, &mut roles, &self.layout);

        let mut camera = CameraResolver::new(self.config.camera_name.clone());
        camera.resolve(&scene);
        camera.on_resize(&mut scene, self.viewport.x, self.viewport.y);

        let timeline = clip.as_ref().and_then(|clip| {
            let intro = &self.config.intro;
            AnimationTimeline::for_clip(clip, &intro.checkpoint_frames, intro.frame_rate)
                .map_err(|e| log::warn!("Intro clip '{}' unusable: {e}", clip.name))
                .ok()
        });
        if timeline.is_none() {
            log::info!("No intro animation; interactions will be ignored");
        }

        let mut controller = PhaseController::new(self.config.intro.max_delta);
        controller.set_timeline(timeline);

        self.dispatcher.reset();
        self.clock.reset();
        self.skipped_frames = 0;
        self.pending = None;
        self.context = Some(LoadedContext {
            scene,
            controller,
            camera,
            roles,
            hit_surfaces,
            clip,
        });
        self.status = LoadStatus::Ready;
    }

    /// Drops the loaded scene.
    pub fn unload(&mut self) {
        self.pending = None;
        self.context = None;
        self.dispatcher.reset();
        self.status = LoadStatus::Idle;
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Handles one input event received at `now`.
    pub fn handle_input(&mut self, event: &InputEvent, now: Instant) -> InputResponse {
        match self.dispatcher.dispatch(event, now) {
            Dispatch::Advance => InputResponse::Advanced(self.advance_at(now)),
            Dispatch::Click(position) => match self.press_button(position, now) {
                Some(action) => InputResponse::Button(action),
                None => InputResponse::Advanced(self.advance_at(now)),
            },
            // The touch already advanced on contact, so a miss does nothing more.
            Dispatch::Tap(position) => self
                .press_button(position, now)
                .map_or(InputResponse::Ignored, InputResponse::Button),
            Dispatch::Resize { width, height } => {
                self.resize(width, height);
                InputResponse::Resized
            }
            Dispatch::Ignored => InputResponse::Ignored,
        }
    }

    /// Sends one advance signal to the intro controller.
    pub fn advance(&mut self) -> AdvanceOutcome {
        self.advance_at(Instant::now())
    }

    fn advance_at(&mut self, now: Instant) -> AdvanceOutcome {
        let Some(context) = self.context.as_mut() else {
            return AdvanceOutcome::Ignored;
        };
        let outcome = context.controller.on_advance_signal();
        if outcome.started_playback() {
            self.clock.reset_at(now);
        }
        outcome
    }

    /// Dashboard button under the pointer at `position` (surface pixels).
    #[must_use]
    pub fn button_at(&self, position: Vec2) -> Option<&ButtonRegion> {
        let context = self.context.as_ref()?;
        let camera = context.camera.camera(&context.scene)?;
        let ndc = pointer_to_ndc(position, self.viewport.as_vec2())?;
        self.hit_mapper.map_pointer_to_canvas_pixel(
            ndc,
            camera,
            &context.scene,
            &context.hit_surfaces,
            &self.layout.buttons,
        )
    }

    /// Runs the action of the button under `position`, if any.
    fn press_button(&mut self, position: Vec2, now: Instant) -> Option<DashboardAction> {
        let action = self
            .button_at(position)
            .and_then(|region| self.layout.action_for(&region.id))?;
        self.run_action(&action, now);
        Some(action)
    }

    fn run_action(&mut self, action: &DashboardAction, now: Instant) {
        match action {
            DashboardAction::OpenExternal(url) => self.navigator.open_external(url),
            DashboardAction::ResetIntro => {
                self.reset_intro();
                self.clock.reset_at(now);
            }
        }
    }

    /// Returns the intro to its first phase.
    pub fn reset_intro(&mut self) {
        if let Some(context) = self.context.as_mut() {
            context.controller.reset();
            log::info!("Intro reset");
        }
        self.clock.reset();
    }

    /// Re-syncs the camera to a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = UVec2::new(width, height);
        if let Some(context) = self.context.as_mut() {
            context.camera.on_resize(&mut context.scene, width, height);
        }
    }

    // ========================================================================
    // Frame loop
    // ========================================================================

    /// Advances clip time by `delta` seconds. Returns the new phase on a transition.
    pub fn tick(&mut self, delta: f32) -> Option<PhaseState> {
        self.context.as_mut()?.controller.tick(delta)
    }

    /// Runs one frame at the current instant.
    pub fn frame(&mut self, backend: &mut dyn RenderBackend) -> bool {
        self.frame_at(backend, Instant::now())
    }

    /// Installs any finished load, ticks the clock to `now`, advances the
    /// intro and renders.
    ///
    /// Never fails: a missing camera or a backend error skips the draw for
    /// this frame only. Returns whether a frame was submitted.
    pub fn frame_at(&mut self, backend: &mut dyn RenderBackend, now: Instant) -> bool {
        self.poll_pending_load();
        let delta = self.clock.tick_at(now);
        if let Some(phase) = self.tick(delta) {
            log::debug!("Intro phase -> {phase:?}");
        }

        let Some(context) = self.context.as_ref() else {
            return false;
        };
        let camera = match context.camera.require(&context.scene) {
            Ok(camera) => camera,
            Err(e) => {
                if self.skipped_frames % MISSING_CAMERA_WARN_INTERVAL == 0 {
                    log::warn!("Skipping frame: {e}");
                }
                self.skipped_frames += 1;
                return false;
            }
        };

        let frame = FrameContext {
            scene: &context.scene,
            camera,
            clip_time: context.controller.current_time(),
            debug_mode: self.config.debug_mode,
            frame_count: self.frame_count,
        };
        let rendered = match backend.render(&frame) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Frame {} skipped: {e}", self.frame_count);
                false
            }
        };
        self.frame_count += 1;
        rendered
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> &DashboardLayout {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub fn context(&self) -> Option<&LoadedContext> {
        self.context.as_ref()
    }

    /// Frames skipped because the camera was unavailable.
    #[inline]
    #[must_use]
    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }

    #[inline]
    #[must_use]
    pub fn viewport(&self) -> UVec2 {
        self.viewport
    }

    /// Current intro phase; the initial phase when nothing is loaded.
    #[must_use]
    pub fn phase(&self) -> PhaseState {
        self.context
            .as_ref()
            .map_or_else(PhaseState::default, |c| c.controller.phase())
    }

    #[must_use]
    pub fn current_time(&self) -> f32 {
        self.context
            .as_ref()
            .map_or(0.0, |c| c.controller.current_time())
    }

    pub fn set_debug_mode(&mut self, mode: DebugRenderMode) {
        self.config.debug_mode = mode;
    }
}
