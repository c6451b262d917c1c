//! One-time tagging of special materials after load.
//!
//! Name matching happens exactly once here. Everything downstream works
//! with the typed [`RoleMap`] instead of re-comparing strings.

use rustc_hash::FxHashMap;

use crate::resources::material::Material;
use crate::scene::{MaterialKey, MeshKey, NodeHandle, Scene};

pub const LIVERY_MATERIAL: &str = "mat_livery_0_157_001.004";
pub const PAINT_MATERIAL: &str = "IMG_6721.001";

/// Logical purpose of a material slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialRole {
    /// Shows the clickable dashboard canvas.
    InteractiveSurface,
    /// Shows the looping screen video.
    VideoSurface,
    /// Car livery clearcoat paint.
    Livery,
    /// Photo-textured panel with glossy finish.
    Paint,
}

/// One material slot of one mesh node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialTarget {
    pub node: NodeHandle,
    pub mesh: MeshKey,
    pub primitive: usize,
    pub material: MaterialKey,
}

#[derive(Debug, Clone, Default)]
pub struct RoleMap {
    targets: FxHashMap<MaterialRole, Vec<MaterialTarget>>,
}

impl RoleMap {
    pub fn insert(&mut self, role: MaterialRole, target: MaterialTarget) {
        self.targets.entry(role).or_default().push(target);
    }

    #[must_use]
    pub fn targets(&self, role: MaterialRole) -> &[MaterialTarget] {
        self.targets.get(&role).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn has(&self, role: MaterialRole) -> bool {
        !self.targets(role).is_empty()
    }

    /// Distinct nodes carrying `role`, in tagging order.
    #[must_use]
    pub fn nodes(&self, role: MaterialRole) -> Vec<NodeHandle> {
        let mut nodes: Vec<NodeHandle> = Vec::new();
        for target in self.targets(role) {
            if !nodes.contains(&target.node) {
                nodes.push(target.node);
            }
        }
        nodes
    }

    /// Replaces the material key recorded for `target`'s slot.
    pub(crate) fn retarget(&mut self, role: MaterialRole, primitive: (NodeHandle, usize), material: MaterialKey) {
        if let Some(list) = self.targets.get_mut(&role) {
            for t in list.iter_mut().filter(|t| (t.node, t.primitive) == primitive) {
                t.material = material;
            }
        }
    }
}

/// Role of a material slot, judged by its material name and owning mesh node name.
#[must_use]
pub fn classify(material: &Material, node_name: &str) -> Option<MaterialRole> {
    let material_name = material.normalized_name();
    let node_name = node_name.trim().to_uppercase();

    if material_name.contains("DASH") || node_name.contains("DASH") {
        Some(MaterialRole::InteractiveSurface)
    } else if material_name == "SCREEN" {
        Some(MaterialRole::VideoSurface)
    } else if material.name.trim() == LIVERY_MATERIAL {
        Some(MaterialRole::Livery)
    } else if material.name.trim() == PAINT_MATERIAL {
        Some(MaterialRole::Paint)
    } else {
        None
    }
}

/// Walks every mesh node once and records the role of each material slot.
#[must_use]
pub fn tag_roles(scene: &Scene) -> RoleMap {
    let mut roles = RoleMap::default();

    for (handle, mesh_key) in scene.mesh_nodes() {
        let (Some(node), Some(mesh)) = (scene.get_node(handle), scene.meshes.get(mesh_key)) else {
            continue;
        };
        for (index, primitive) in mesh.primitives.iter().enumerate() {
            let Some(material) = scene.materials.get(primitive.material) else {
                continue;
            };
            if let Some(role) = classify(material, &node.name) {
                roles.insert(
                    role,
                    MaterialTarget {
                        node: handle,
                        mesh: mesh_key,
                        primitive: index,
                        material: primitive.material,
                    },
                );
            }
        }
    }

    for role in [
        MaterialRole::InteractiveSurface,
        MaterialRole::VideoSurface,
        MaterialRole::Livery,
        MaterialRole::Paint,
    ] {
        let count = roles.targets(role).len();
        if count > 0 {
            log::info!("Tagged {count} material slot(s) as {role:?}");
        }
    }

    roles
}

/// Mesh node with the largest world-space bounding box volume.
#[must_use]
pub fn largest_mesh_node(scene: &Scene) -> Option<NodeHandle> {
    let mut best: Option<(NodeHandle, f32)> = None;
    for (handle, _) in scene.mesh_nodes() {
        let Some(bounds) = scene.world_bounding_box(handle) else {
            continue;
        };
        let volume = bounds.volume();
        if volume > best.map_or(0.0, |(_, v)| v) {
            best = Some((handle, volume));
        }
    }
    best.map(|(handle, _)| handle)
}
