use glam::Affine3A;
use slotmap::SlotMap;

use crate::resources::geometry::BoundingBox;
use crate::resources::material::Material;
use crate::resources::mesh::Mesh;
use crate::scene::camera::Camera;
use crate::scene::node::Node;
use crate::scene::{CameraKey, MaterialKey, MeshKey, NodeHandle};

/// Scene graph of one loaded asset.
///
/// Nodes form a forest rooted at `root_nodes`; meshes, cameras and
/// materials live in keyed pools and are referenced from nodes.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SlotMap<CameraKey, Camera>,
    pub materials: SlotMap<MaterialKey, Material>,
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node at the root of the scene.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            return self.add_node(child);
        }
        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    #[inline]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    #[inline]
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    pub fn set_mesh(&mut self, handle: NodeHandle, mesh: Mesh) -> Option<MeshKey> {
        let node = self.nodes.get_mut(handle)?;
        let key = self.meshes.insert(mesh);
        node.mesh = Some(key);
        Some(key)
    }

    pub fn set_camera(&mut self, handle: NodeHandle, camera: Camera) -> Option<CameraKey> {
        let node = self.nodes.get_mut(handle)?;
        let key = self.cameras.insert(camera);
        node.camera = Some(key);
        Some(key)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialKey {
        self.materials.insert(material)
    }

    /// First node (depth-first from the roots) whose name equals `name`.
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        let mut found = None;
        self.traverse(|handle, node| {
            if found.is_none() && node.name == name {
                found = Some(handle);
            }
        });
        found
    }

    /// Visits every node reachable from the roots, parents before children.
    pub fn traverse(&self, mut visit: impl FnMut(NodeHandle, &Node)) {
        let mut stack: Vec<NodeHandle> = self.root_nodes.iter().rev().copied().collect();
        while let Some(handle) = stack.pop() {
            if let Some(node) = self.nodes.get(handle) {
                visit(handle, node);
                stack.extend(node.children.iter().rev().copied());
            }
        }
    }

    /// Nodes carrying a mesh, in traversal order.
    pub fn mesh_nodes(&self) -> Vec<(NodeHandle, MeshKey)> {
        let mut out = Vec::new();
        self.traverse(|handle, node| {
            if let Some(mesh) = node.mesh {
                out.push((handle, mesh));
            }
        });
        out
    }

    /// Recomputes world matrices top-down and syncs camera view matrices.
    pub fn update_world_matrices(&mut self) {
        let mut stack: Vec<(NodeHandle, Affine3A)> = self
            .root_nodes
            .iter()
            .map(|&h| (h, Affine3A::IDENTITY))
            .collect();

        while let Some((handle, parent_world)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };
            let world = parent_world * node.transform.local_matrix();
            node.transform.world_matrix = world;

            if let Some(camera) = node.camera.and_then(|key| self.cameras.get_mut(key)) {
                camera.update_view_projection(&world);
            }

            stack.extend(node.children.iter().map(|&child| (child, world)));
        }
    }

    /// Bounds of a node's mesh in world space.
    pub fn world_bounding_box(&self, handle: NodeHandle) -> Option<BoundingBox> {
        let node = self.nodes.get(handle)?;
        let mesh = self.meshes.get(node.mesh?)?;
        mesh.bounding_box()
            .map(|b| b.transform(node.world_matrix()))
    }

    /// Camera component attached to `handle`.
    pub fn camera_of(&self, handle: NodeHandle) -> Option<&Camera> {
        self.cameras.get(self.nodes.get(handle)?.camera?)
    }

    pub fn camera_of_mut(&mut self, handle: NodeHandle) -> Option<&mut Camera> {
        let key = self.nodes.get(handle)?.camera?;
        self.cameras.get_mut(key)
    }
}
