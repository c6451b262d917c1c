//! Input normalization.
//!
//! - [`input`]: platform-independent input events and pointer helpers
//! - [`dispatcher`]: gesture debouncing and advance-signal classification

pub mod dispatcher;
pub mod input;

pub use dispatcher::{Dispatch, InteractionDispatcher};
pub use input::{InputEvent, Key, pointer_to_ndc};
