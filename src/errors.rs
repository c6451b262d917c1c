//! Error Types
//!
//! This module defines the error types used throughout the viewer.
//!
//! # Overview
//!
//! [`ShowroomError`] covers the failure modes that are surfaced to the caller:
//! - Asset fetching and glTF decoding errors
//! - Configuration and timeline validation errors
//! - Event loop errors (with the `winit` feature)
//!
//! Anomalies that the viewer absorbs (a missing camera, a missing clip, a
//! pointer that hits nothing) are logged instead of being returned.
//!
//! ```rust,ignore
//! use showroom::errors::{ShowroomError, Result};
//!
//! fn load() -> Result<()> {
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The main error type for the viewer.
#[derive(Error, Debug)]
pub enum ShowroomError {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// glTF parsing or loading error.
    #[error("glTF error: {0}")]
    GltfError(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    // ========================================================================
    // HTTP & Network Errors
    // ========================================================================
    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// HTTP response error with status code.
    #[error("HTTP response error: status {status}")]
    HttpResponseError {
        /// HTTP status code
        status: u16,
    },

    /// Feature not enabled.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A configuration value failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Checkpoints could not be turned into a playable timeline.
    #[error("Invalid timeline: {0}")]
    InvalidTimeline(String),

    // ========================================================================
    // Scene Errors
    // ========================================================================
    /// The named render camera is absent from the loaded scene.
    #[error("Camera not found: {0}")]
    MissingCamera(String),

    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),
}

impl From<gltf::Error> for ShowroomError {
    fn from(err: gltf::Error) -> Self {
        ShowroomError::GltfError(err.to_string())
    }
}

/// Alias for `Result<T, ShowroomError>`.
pub type Result<T> = std::result::Result<T, ShowroomError>;
