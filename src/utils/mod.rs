//! Utility Module
//!
//! - [`time`]: the per-frame [`Clock`]

pub mod time;

pub use time::Clock;
