//! glTF 2.0 loader.
//!
//! Builds the CPU-side [`Scene`] the viewer orchestrates: the node hierarchy
//! with names and TRS, cameras, triangle geometry (positions, `TEXCOORD_0`,
//! indices), material names and factors, and the duration of every animation.

use std::path::Path;

use glam::{Quat, Vec2, Vec3};

use crate::animation::AnimationClip;
use crate::assets::LoadedAsset;
use crate::errors::Result;
use crate::resources::geometry::Geometry;
use crate::resources::material::{Material, MaterialKind, Side};
use crate::resources::mesh::{Mesh, Primitive};
use crate::resources::texture::{ColorSpace, TextureBinding, TextureSource};
use crate::scene::{Camera, CameraKey, MaterialKey, MeshKey, Node, NodeHandle, Scene};

/// Loads a `.glb` or self-contained `.gltf` from memory.
pub fn load_gltf_bytes(bytes: &[u8]) -> Result<LoadedAsset> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;
    Ok(GltfLoader::new(&buffers).build(&document))
}

/// Loads a glTF file, resolving external buffers relative to its directory.
pub fn load_gltf_file(path: impl AsRef<Path>) -> Result<LoadedAsset> {
    let (document, buffers, _images) = gltf::import(path)?;
    Ok(GltfLoader::new(&buffers).build(&document))
}

struct GltfLoader<'a> {
    buffers: &'a [gltf::buffer::Data],
    scene: Scene,
    material_map: Vec<MaterialKey>,
    default_material: Option<MaterialKey>,
    mesh_map: Vec<MeshKey>,
    camera_map: Vec<Camera>,
}

impl<'a> GltfLoader<'a> {
    fn new(buffers: &'a [gltf::buffer::Data]) -> Self {
        Self {
            buffers,
            scene: Scene::new(),
            material_map: Vec::new(),
            default_material: None,
            mesh_map: Vec::new(),
            camera_map: Vec::new(),
        }
    }

    fn build(mut self, document: &gltf::Document) -> LoadedAsset {
        self.load_materials(document);
        self.load_meshes(document);
        self.load_cameras(document);

        let gltf_scene = document.default_scene().or_else(|| document.scenes().next());
        if let Some(gltf_scene) = gltf_scene {
            for node in gltf_scene.nodes() {
                self.spawn_node(&node, None);
            }
        }
        self.scene.update_world_matrices();

        let clips = self.load_animations(document);
        log::info!(
            "Loaded glTF: {} nodes, {} meshes, {} cameras, {} clips",
            self.scene.nodes.len(),
            self.scene.meshes.len(),
            self.scene.cameras.len(),
            clips.len()
        );

        LoadedAsset {
            scene: self.scene,
            clips,
        }
    }

    fn load_materials(&mut self, document: &gltf::Document) {
        for material in document.materials() {
            let pbr = material.pbr_metallic_roughness();
            let name = material
                .name()
                .map_or_else(|| format!("Material_{}", self.material_map.len()), str::to_string);

            let mut mat = Material::new(name, MaterialKind::Standard);
            let [r, g, b, a] = pbr.base_color_factor();
            mat.color = Vec3::new(r, g, b);
            mat.opacity = a;
            mat.metalness = pbr.metallic_factor();
            mat.roughness = pbr.roughness_factor();
            mat.emissive = Vec3::from_array(material.emissive_factor());
            mat.side = if material.double_sided() { Side::Double } else { Side::Front };

            if let Some(info) = pbr.base_color_texture() {
                mat.map = Some(image_binding(&info, ColorSpace::Srgb));
            }
            if let Some(info) = material.emissive_texture() {
                mat.emissive_map = Some(image_binding(&info, ColorSpace::Srgb));
            }
            if let Some(info) = pbr.metallic_roughness_texture() {
                mat.roughness_map = Some(image_binding(&info, ColorSpace::Linear));
                mat.metalness_map = Some(image_binding(&info, ColorSpace::Linear));
            }
            if let Some(info) = material.normal_texture() {
                mat.normal_map = Some(linear_binding(info.texture().source().index()));
            }
            if let Some(info) = material.occlusion_texture() {
                mat.ao_map = Some(linear_binding(info.texture().source().index()));
            }

            let key = self.scene.add_material(mat);
            self.material_map.push(key);
        }
    }

    fn material_for(&mut self, index: Option<usize>) -> MaterialKey {
        if let Some(key) = index.and_then(|i| self.material_map.get(i)) {
            return *key;
        }
        *self
            .default_material
            .get_or_insert_with(|| self.scene.add_material(Material::new_standard("Default")))
    }

    fn load_meshes(&mut self, document: &gltf::Document) {
        for mesh in document.meshes() {
            let name = mesh
                .name()
                .map_or_else(|| format!("Mesh_{}", mesh.index()), str::to_string);
            let mut engine_mesh = Mesh::new(name);

            for primitive in mesh.primitives() {
                if primitive.mode() != gltf::mesh::Mode::Triangles {
                    log::debug!("Skipping non-triangle primitive in mesh '{}'", engine_mesh.name);
                    continue;
                }
                let Some(geometry) = self.load_primitive_geometry(&primitive) else {
                    log::warn!("Primitive without POSITION in mesh '{}'", engine_mesh.name);
                    continue;
                };
                let material = self.material_for(primitive.material().index());
                engine_mesh.primitives.push(Primitive { geometry, material });
            }

            let key = self.scene.meshes.insert(engine_mesh);
            self.mesh_map.push(key);
        }
    }

    fn load_primitive_geometry(&self, primitive: &gltf::Primitive) -> Option<Geometry> {
        let buffers = self.buffers;
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

        let positions: Vec<Vec3> = reader.read_positions()?.map(Vec3::from_array).collect();
        let mut geometry = Geometry::new(positions);

        if let Some(iter) = reader.read_tex_coords(0).map(|r| r.into_f32()) {
            geometry.uvs = Some(iter.map(Vec2::from_array).collect());
        }
        if let Some(iter) = reader.read_indices() {
            geometry.indices = Some(iter.into_u32().collect());
        }

        Some(geometry)
    }

    fn load_cameras(&mut self, document: &gltf::Document) {
        for camera in document.cameras() {
            let mut engine_camera = match camera.projection() {
                gltf::camera::Projection::Perspective(p) => Camera::new_perspective_radians(
                    p.yfov(),
                    p.aspect_ratio().unwrap_or(1.0),
                    p.znear(),
                    p.zfar().unwrap_or(1000.0),
                ),
                gltf::camera::Projection::Orthographic(o) => {
                    let aspect = if o.ymag() > 0.0 { o.xmag() / o.ymag() } else { 1.0 };
                    Camera::new_orthographic(o.ymag(), aspect, o.znear(), o.zfar())
                }
            };
            engine_camera.name = camera
                .name()
                .map_or_else(|| format!("Camera_{}", camera.index()), str::to_string);
            self.camera_map.push(engine_camera);
        }
    }

    fn spawn_node(&mut self, node: &gltf::Node, parent: Option<NodeHandle>) {
        let name = node
            .name()
            .map_or_else(|| format!("Node_{}", node.index()), str::to_string);
        let mut engine_node = Node::new(name);

        let (t, r, s) = node.transform().decomposed();
        engine_node.transform.position = Vec3::from_array(t);
        engine_node.transform.rotation = Quat::from_array(r);
        engine_node.transform.scale = Vec3::from_array(s);

        engine_node.mesh = node.mesh().and_then(|m| self.mesh_map.get(m.index()).copied());

        let handle = match parent {
            Some(parent) => self.scene.add_to_parent(engine_node, parent),
            None => self.scene.add_node(engine_node),
        };

        if let Some(camera) = node.camera().and_then(|c| self.camera_map.get(c.index()).cloned()) {
            let key: Option<CameraKey> = self.scene.set_camera(handle, camera);
            debug_assert!(key.is_some());
        }

        for child in node.children() {
            self.spawn_node(&child, Some(handle));
        }
    }

    fn load_animations(&self, document: &gltf::Document) -> Vec<AnimationClip> {
        let buffers = self.buffers;
        document
            .animations()
            .map(|anim| {
                let name = anim
                    .name()
                    .map_or_else(|| format!("Animation_{}", anim.index()), str::to_string);
                let times = anim.channels().flat_map(|channel| {
                    let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
                    reader.read_inputs().into_iter().flatten()
                });
                AnimationClip::from_keyframe_times(name, times)
            })
            .collect()
    }
}

fn image_binding(info: &gltf::texture::Info, color_space: ColorSpace) -> TextureBinding {
    let mut binding = TextureBinding::new(TextureSource::Image(info.texture().source().index()));
    binding.color_space = color_space;
    binding
}

fn linear_binding(image: usize) -> TextureBinding {
    let mut binding = TextureBinding::new(TextureSource::Image(image));
    binding.color_space = ColorSpace::Linear;
    binding
}
