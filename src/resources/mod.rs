//! Resource Module
//!
//! CPU-side descriptions of the data the rendering engine draws:
//!
//! - [`Geometry`]: positions, UVs and indices, with bounding helpers
//! - [`Mesh`]: primitives pairing geometry with a material slot
//! - [`Material`]: the patchable subset of PBR material state
//! - [`TextureBinding`]: a texture source plus its UV transform and sampling

pub mod geometry;
pub mod material;
pub mod mesh;
pub mod texture;

pub use geometry::{BoundingBox, Geometry, UvBounds};
pub use material::{Material, MaterialKind, PhysicalParams, Side};
pub use mesh::{Mesh, Primitive};
pub use texture::{ColorSpace, FilterMode, TextureBinding, TextureSource, TextureTransform, WrapMode};
