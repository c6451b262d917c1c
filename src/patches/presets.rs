//! Material presets for tagged slots.
//!
//! Patches replace the material in its pool slot, so every mesh sharing the
//! material sees the change.

use glam::Vec3;

use crate::patches::roles::{MaterialRole, RoleMap};
use crate::resources::material::{Material, MaterialKind};
use crate::resources::texture::{ColorSpace, TextureBinding, TextureSource};
use crate::scene::{MaterialKey, Scene};

/// Video shown on `SCREEN` materials.
pub const SCREEN_VIDEO_URI: &str = "./screen.mp4";

/// Applies the livery, paint and video presets to every tagged slot.
pub fn apply_material_presets(scene: &mut Scene, roles: &RoleMap) {
    for key in distinct_materials(roles, MaterialRole::Livery) {
        patch(scene, key, apply_livery);
    }
    for key in distinct_materials(roles, MaterialRole::Paint) {
        patch(scene, key, apply_paint);
    }
    for key in distinct_materials(roles, MaterialRole::VideoSurface) {
        patch(scene, key, |m| *m = video_screen_material(&m.name));
    }
}

fn distinct_materials(roles: &RoleMap, role: MaterialRole) -> Vec<MaterialKey> {
    let mut keys: Vec<MaterialKey> = Vec::new();
    for target in roles.targets(role) {
        if !keys.contains(&target.material) {
            keys.push(target.material);
        }
    }
    keys
}

fn patch(scene: &mut Scene, key: MaterialKey, f: impl FnOnce(&mut Material)) {
    if let Some(material) = scene.materials.get_mut(key) {
        f(material);
        material.needs_update();
        log::info!("Patched material '{}' ({:?})", material.name, material.kind);
    }
}

/// Clearcoated white livery with no sheen or transmission.
pub fn apply_livery(material: &mut Material) {
    if material.kind != MaterialKind::Physical {
        *material = material.to_physical();
    }
    material.color = Vec3::ONE;
    material.roughness = 0.0;
    material.metalness = 0.0;
    material.emissive = Vec3::ZERO;
    material.env_map_intensity = 1.0;

    let p = &mut material.physical;
    p.sheen = 0.0;
    p.sheen_color = Vec3::ZERO;
    p.sheen_roughness = 1.0;
    p.specular_intensity = 0.0;
    p.specular_color = Vec3::ONE;
    p.clearcoat = 0.7;
    p.clearcoat_roughness = 0.0;
    p.dispersion = 0.0;
    p.iridescence = 0.0;
    p.iridescence_ior = 1.3;
    p.iridescence_thickness_range = [100.0, 400.0];
    p.anisotropy = 0.0;
    p.anisotropy_rotation = 0.0;
    p.reflectivity = 0.5;
    p.transmission = 0.0;
    p.thickness = 0.0;
    p.attenuation_color = Vec3::ONE;
}

/// Semi-metallic glossy finish; the photo map is shown without mipmapping.
pub fn apply_paint(material: &mut Material) {
    if material.kind != MaterialKind::Physical {
        *material = material.to_physical();
    }
    material.color = Vec3::ONE;
    material.roughness = 0.2;
    material.metalness = 0.5;
    material.env_map_intensity = 1.0;

    let p = &mut material.physical;
    p.clearcoat = 0.3;
    p.clearcoat_roughness = 0.1;
    p.transmission = 0.0;
    p.thickness = 0.0;

    if let Some(map) = material.map.as_mut() {
        map.set_linear_no_mipmaps();
        map.color_space = ColorSpace::Srgb;
    }
}

/// Standard material lit by a looping muted video on both color and emission.
#[must_use]
pub fn video_screen_material(name: &str) -> Material {
    let mut video = TextureBinding::new(TextureSource::Video {
        uri: SCREEN_VIDEO_URI.to_string(),
        looping: true,
        muted: true,
    });
    video.set_linear_no_mipmaps();
    video.color_space = ColorSpace::Srgb;
    video.flip_y = false;

    let mut material = Material::new_standard(name);
    material.color = Vec3::ONE;
    material.emissive = Vec3::ONE;
    material.emissive_intensity = 0.5;
    material.tone_mapped = true;
    material.map = Some(video.clone());
    material.emissive_map = Some(video);
    material
}
