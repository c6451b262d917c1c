//! Interactive dashboard canvas.
//!
//! The dashboard is a 2D canvas (drawn by the host page) shown on every
//! `InteractiveSurface` slot. This module owns the canvas layout, i.e. the
//! button regions hit testing resolves against, and binds the canvas to the
//! tagged materials with a per-slot transform fitted to each UV island.

use glam::Vec3;

use crate::config::DashboardConfig;
use crate::patches::roles::{MaterialRole, RoleMap, largest_mesh_node};
use crate::picking::hit_mapper::{ButtonRegion, Rect};
use crate::resources::material::{Material, MaterialKind, Side};
use crate::resources::texture::{ColorSpace, TextureBinding, TextureSource, TextureTransform, WrapMode};
use crate::scene::{NodeHandle, Scene};

pub const CODE_BUTTON: &str = "CODE";
pub const RESET_BUTTON: &str = "RESET";

/// What pressing a dashboard button does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    OpenExternal(String),
    ResetIntro,
}

/// Canvas size and button regions, in top-left-origin canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub buttons: Vec<ButtonRegion>,
    code_url: String,
}

impl DashboardLayout {
    /// Lays out the `CODE` and `RESET` buttons stacked around the canvas center.
    ///
    /// The canvas is drawn in a vertically flipped space; stored rects are
    /// converted back with `y' = H - (y + h)`.
    #[must_use]
    pub fn compute(config: &DashboardConfig) -> Self {
        let width = config.canvas_width as f32;
        let height = config.canvas_height as f32;
        let center_x = width / 2.0;
        let center_y = height / 2.0;

        let button_width = config.button_width.min(width - config.padding * 2.0).max(0.0);
        let button_height = config.button_height;
        let half_stride = (button_height + config.gap) / 2.0;

        let unflip = |id: &str, drawn_center_y: f32| {
            let x = center_x - button_width / 2.0;
            let drawn_y = drawn_center_y - button_height / 2.0;
            ButtonRegion::new(
                id,
                Rect::new(x, height - (drawn_y + button_height), button_width, button_height),
            )
        };

        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            buttons: vec![
                unflip(CODE_BUTTON, center_y - half_stride),
                unflip(RESET_BUTTON, center_y + half_stride),
            ],
            code_url: config.code_url.clone(),
        }
    }

    #[must_use]
    pub fn region(&self, id: &str) -> Option<&ButtonRegion> {
        self.buttons.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn action_for(&self, id: &str) -> Option<DashboardAction> {
        match id {
            CODE_BUTTON => Some(DashboardAction::OpenExternal(self.code_url.clone())),
            RESET_BUTTON => Some(DashboardAction::ResetIntro),
            _ => None,
        }
    }

    fn canvas_binding(&self) -> TextureBinding {
        let mut binding = TextureBinding::new(TextureSource::Canvas {
            width: self.canvas_width,
            height: self.canvas_height,
        });
        binding.flip_y = true;
        binding.color_space = ColorSpace::Srgb;
        binding.set_linear_no_mipmaps();
        binding
    }
}

/// Binds the dashboard canvas to every `InteractiveSurface` slot.
///
/// Each slot gets its own material copy so the island-fitted transforms of
/// different meshes never overwrite each other. Without any tagged slot the
/// largest mesh is given an unlit dashboard material instead.
///
/// Returns the nodes that should receive dashboard clicks.
pub fn apply_dashboard(scene: &mut Scene, roles: &mut RoleMap, layout: &DashboardLayout) -> Vec<NodeHandle> {
    if !roles.has(MaterialRole::InteractiveSurface) {
        return apply_fallback(scene, layout);
    }
    let targets = roles.targets(MaterialRole::InteractiveSurface).to_vec();

    for target in &targets {
        let Some(source) = scene.materials.get(target.material) else {
            continue;
        };

        let transform = scene
            .meshes
            .get(target.mesh)
            .and_then(|mesh| mesh.primitives.get(target.primitive))
            .and_then(|p| p.geometry.uv_bounds())
            .map_or(TextureTransform::IDENTITY, |bounds| TextureTransform::fit_uv_island(&bounds));

        let mut binding = layout.canvas_binding();
        binding.transform = transform;
        binding.wrap = WrapMode::ClampToEdge;

        let mut material = dashboard_material(source, binding);
        material.needs_update();
        let key = scene.materials.insert(material);

        if let Some(primitive) = scene
            .meshes
            .get_mut(target.mesh)
            .and_then(|mesh| mesh.primitives.get_mut(target.primitive))
        {
            primitive.material = key;
        }
        roles.retarget(MaterialRole::InteractiveSurface, (target.node, target.primitive), key);

        log::debug!(
            "Dashboard slot fitted: repeat={} offset={}",
            transform.repeat,
            transform.offset
        );
    }

    roles.nodes(MaterialRole::InteractiveSurface)
}

/// Emissive, double-sided copy of `source` showing the canvas.
fn dashboard_material(source: &Material, binding: TextureBinding) -> Material {
    match source.kind {
        kind if kind.is_pbr() => {
            let mut material = source.clone();
            material.map = Some(binding.clone());
            material.emissive = Vec3::ONE;
            material.emissive_intensity = 8.0;
            material.emissive_map = Some(binding);
            material.roughness = 0.1;
            material.metalness = 0.0;
            material.tone_mapped = false;
            material.side = Side::Double;
            material
        }
        MaterialKind::Basic => {
            let mut material = source.clone();
            material.map = Some(binding);
            material.side = Side::Double;
            material
        }
        _ => {
            let name = if source.name.is_empty() { "DASHNEW" } else { source.name.as_str() };
            let mut material = Material::new_basic(name);
            material.map = Some(binding);
            material.side = Side::Double;
            material
        }
    }
}

fn apply_fallback(scene: &mut Scene, layout: &DashboardLayout) -> Vec<NodeHandle> {
    let Some(handle) = largest_mesh_node(scene) else {
        log::warn!("No dashboard surface and no mesh to fall back on");
        return Vec::new();
    };

    let mut material = Material::new_basic("DASHNEW_FALLBACK");
    material.map = Some(layout.canvas_binding());
    let key = scene.materials.insert(material);

    let mesh_key = scene.get_node(handle).and_then(|n| n.mesh);
    if let Some(mesh) = mesh_key.and_then(|k| scene.meshes.get_mut(k)) {
        for primitive in &mut mesh.primitives {
            primitive.material = key;
        }
    }

    log::warn!("No dashboard material tagged; using the largest mesh as fallback surface");
    vec![handle]
}
