//! Winit-based application runner
//!
//! Hosts a [`Viewer`] in a native window (or a canvas on the web):
//!
//! - window events are translated by [`WinitInputAdapter`] and fed to the viewer
//! - every redraw runs [`Viewer::frame`] against the supplied [`RenderBackend`]
//! - the configured asset loads in the background and is installed by the
//!   first frame after it arrives; the window title tracks the load status
//!
//! # Example
//!
//! ```rust,ignore
//! use showroom::app::App;
//! use showroom::config::ViewerConfig;
//! use showroom::viewer::NullBackend;
//!
//! fn main() -> showroom::errors::Result<()> {
//!     App::new(ViewerConfig::default())
//!         .with_title("Showroom")
//!         .run(NullBackend::default())
//! }
//! ```

use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
pub use winit::window::{Window, WindowId};

use crate::config::ViewerConfig;
use crate::errors::Result;
use crate::viewer::{LoadStatus, Navigator, RenderBackend, Viewer};

pub mod input_adapter;

pub use input_adapter::{WinitInputAdapter, translate_key};

/// Application builder: window settings plus the viewer configuration.
pub struct App {
    title: String,
    config: ViewerConfig,
    navigator: Option<Box<dyn Navigator>>,
}

impl App {
    #[must_use]
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            title: "Showroom".into(),
            config,
            navigator: None,
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Overrides how `CODE` button presses open their link.
    #[must_use]
    pub fn with_navigator(mut self, navigator: Box<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    fn into_runner<B: RenderBackend + 'static>(self, backend: B) -> Result<AppRunner<B>> {
        let mut viewer = Viewer::new(self.config)?;
        if let Some(navigator) = self.navigator {
            viewer = viewer.with_navigator(navigator);
        }
        viewer.request_configured_load();

        Ok(AppRunner {
            title: self.title,
            shown_status: viewer.status().clone(),
            window: None,
            viewer,
            backend,
            adapter: WinitInputAdapter::new(),
        })
    }

    /// Runs the event loop until the window closes.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run<B: RenderBackend + 'static>(self, backend: B) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut runner = self.into_runner(backend)?;
        event_loop.run_app(&mut runner)?;
        Ok(())
    }

    /// Spawns the event loop and returns immediately; frames run via `requestAnimationFrame`.
    #[cfg(target_arch = "wasm32")]
    pub fn run<B: RenderBackend + 'static>(self, backend: B) -> Result<()> {
        use winit::platform::web::EventLoopExtWebSys;

        let event_loop = EventLoop::new()?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let runner = self.into_runner(backend)?;
        event_loop.spawn_app(runner);
        Ok(())
    }
}

struct AppRunner<B: RenderBackend> {
    title: String,
    /// Status the window title currently reflects.
    shown_status: LoadStatus,

    window: Option<Arc<Window>>,
    viewer: Viewer,
    backend: B,
    adapter: WinitInputAdapter,
}

impl<B: RenderBackend> AppRunner<B> {
    fn window_title(&self) -> String {
        match self.viewer.status() {
            LoadStatus::Ready => self.title.clone(),
            status => format!("{} ({status})", self.title),
        }
    }

    fn sync_title(&mut self) {
        if self.shown_status == *self.viewer.status() {
            return;
        }
        self.shown_status = self.viewer.status().clone();
        if let Some(window) = &self.window {
            window.set_title(&self.window_title());
        }
    }

    fn window_attributes(&self) -> winit::window::WindowAttributes {
        Window::default_attributes()
            .with_title(self.window_title())
            .with_inner_size(winit::dpi::LogicalSize::new(1280.0, 720.0))
    }
}

impl<B: RenderBackend> ApplicationHandler for AppRunner<B> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.viewer.resize(size.width, size.height);
        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::RedrawRequested => {
                self.viewer.frame(&mut self.backend);
                self.sync_title();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            event => {
                if let Some(input) = self.adapter.translate(&event) {
                    self.viewer.handle_input(&input, Instant::now());
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
