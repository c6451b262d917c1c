use smallvec::SmallVec;

use crate::resources::geometry::{BoundingBox, Geometry};
use crate::scene::MaterialKey;

/// One draw range of a mesh: geometry plus the material slot it is shaded with.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub geometry: Geometry,
    pub material: MaterialKey,
}

/// A renderable mesh. Most meshes carry a single primitive.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub name: String,
    pub primitives: SmallVec<[Primitive; 1]>,
}

impl Mesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            primitives: SmallVec::new(),
        }
    }

    pub fn from_geometry(name: impl Into<String>, geometry: Geometry, material: MaterialKey) -> Self {
        let mut mesh = Self::new(name);
        mesh.primitives.push(Primitive { geometry, material });
        mesh
    }

    /// Local-space bounds over all primitives.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.primitives
            .iter()
            .filter_map(|p| p.geometry.bounding_box())
            .reduce(|a, b| a.union(&b))
    }

    pub fn materials(&self) -> impl Iterator<Item = MaterialKey> + '_ {
        self.primitives.iter().map(|p| p.material)
    }
}
