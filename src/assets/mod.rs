//! Asset loading.
//!
//! A packaged scene is a single glTF/GLB file holding the geometry, the
//! materials, the named camera and the intro animation clip.

pub mod io;
pub mod loaders;

pub use io::AssetSource;
pub use loaders::{load_gltf_bytes, load_gltf_file};

use crate::animation::AnimationClip;
use crate::errors::Result;
use crate::scene::Scene;

/// Result of a successful load, before any viewer patching.
#[derive(Debug, Clone, Default)]
pub struct LoadedAsset {
    pub scene: Scene,
    pub clips: Vec<AnimationClip>,
}

impl LoadedAsset {
    /// The intro clip: the first clip with a positive duration.
    #[must_use]
    pub fn intro_clip(&self) -> Option<&AnimationClip> {
        self.clips.iter().find(|clip| clip.is_playable())
    }
}

/// Loads and parses the asset at `source`, blocking the caller.
pub fn load(source: &AssetSource) -> Result<LoadedAsset> {
    log::info!("Loading asset from {}", source.display());
    match source {
        AssetSource::File(path) => {
            io::ensure_exists(path)?;
            load_gltf_file(path)
        }
        AssetSource::Http(_) => load_gltf_bytes(&source.read_bytes()?),
    }
}

/// Loads the asset at `source` without blocking and hands the result to `on_done`.
///
/// Native file paths are parsed with [`load_gltf_file`] so external buffers
/// still resolve; everything else is fetched and parsed from memory.
pub fn load_async(source: &AssetSource, on_done: impl FnOnce(Result<LoadedAsset>) + Send + 'static) {
    log::info!("Fetching asset from {}", source.display());
    match source {
        #[cfg(not(target_arch = "wasm32"))]
        AssetSource::File(_) => on_done(load(source)),
        _ => source.fetch(move |bytes| on_done(bytes.and_then(|bytes| load_gltf_bytes(&bytes)))),
    }
}
