//! Windowing integration.
//!
//! - [`winit`]: event-loop runner driving a [`Viewer`](crate::viewer::Viewer)
//!   and the adapter translating winit events into [`InputEvent`](crate::interaction::InputEvent)

pub mod winit;

pub use self::winit::App;
