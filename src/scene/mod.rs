//! Scene graph of a loaded asset.
//!
//! - [`Node`]: named hierarchy node with a [`Transform`]
//! - [`Scene`]: node forest plus mesh, camera and material pools
//! - [`Camera`]: projection, view matrices and NDC ray construction

pub mod camera;
pub mod node;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;

pub use camera::{Camera, ProjectionType};
pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct MaterialKey;
}
