//! Material descriptions handed to the rendering engine.
//!
//! Only the properties the viewer patches after load are modelled. The
//! rendering engine owns shading; this is the data it consumes.

use glam::Vec3;

use crate::resources::texture::TextureBinding;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Unlit, color map only.
    Basic,
    /// Metallic-roughness PBR.
    Standard,
    /// Standard PBR plus clearcoat, sheen, transmission and friends.
    Physical,
    /// Anything the viewer cannot patch in place (toon, custom shaders).
    Other,
}

impl MaterialKind {
    /// Kinds that carry emissive and PBR parameters.
    #[inline]
    #[must_use]
    pub fn is_pbr(self) -> bool {
        matches!(self, Self::Standard | Self::Physical)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Front,
    Back,
    Double,
}

/// Extra parameters of [`MaterialKind::Physical`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalParams {
    pub clearcoat: f32,
    pub clearcoat_roughness: f32,
    pub sheen: f32,
    pub sheen_color: Vec3,
    pub sheen_roughness: f32,
    pub specular_intensity: f32,
    pub specular_color: Vec3,
    pub transmission: f32,
    pub thickness: f32,
    pub attenuation_color: Vec3,
    pub iridescence: f32,
    pub iridescence_ior: f32,
    pub iridescence_thickness_range: [f32; 2],
    pub anisotropy: f32,
    pub anisotropy_rotation: f32,
    pub dispersion: f32,
    pub reflectivity: f32,
}

impl Default for PhysicalParams {
    fn default() -> Self {
        Self {
            clearcoat: 0.0,
            clearcoat_roughness: 0.0,
            sheen: 0.0,
            sheen_color: Vec3::ZERO,
            sheen_roughness: 1.0,
            specular_intensity: 1.0,
            specular_color: Vec3::ONE,
            transmission: 0.0,
            thickness: 0.0,
            attenuation_color: Vec3::ONE,
            iridescence: 0.0,
            iridescence_ior: 1.3,
            iridescence_thickness_range: [100.0, 400.0],
            anisotropy: 0.0,
            anisotropy_rotation: 0.0,
            dispersion: 0.0,
            reflectivity: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,

    pub color: Vec3,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub env_map_intensity: f32,
    pub tone_mapped: bool,
    pub side: Side,
    pub physical: PhysicalParams,

    pub map: Option<TextureBinding>,
    pub emissive_map: Option<TextureBinding>,
    pub normal_map: Option<TextureBinding>,
    pub roughness_map: Option<TextureBinding>,
    pub metalness_map: Option<TextureBinding>,
    pub ao_map: Option<TextureBinding>,

    version: u64,
}

impl Material {
    pub fn new(name: impl Into<String>, kind: MaterialKind) -> Self {
        Self {
            name: name.into(),
            kind,
            color: Vec3::ONE,
            opacity: 1.0,
            roughness: 1.0,
            metalness: 0.0,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            env_map_intensity: 1.0,
            tone_mapped: true,
            side: Side::Front,
            physical: PhysicalParams::default(),
            map: None,
            emissive_map: None,
            normal_map: None,
            roughness_map: None,
            metalness_map: None,
            ao_map: None,
            version: 0,
        }
    }

    pub fn new_basic(name: impl Into<String>) -> Self {
        Self::new(name, MaterialKind::Basic)
    }

    pub fn new_standard(name: impl Into<String>) -> Self {
        Self::new(name, MaterialKind::Standard)
    }

    pub fn new_physical(name: impl Into<String>) -> Self {
        Self::new(name, MaterialKind::Physical)
    }

    /// A physical material carrying over this material's name, maps and colors.
    #[must_use]
    pub fn to_physical(&self) -> Material {
        let mut physical = Material::new_physical(self.name.clone());
        physical.map = self.map.clone();
        physical.normal_map = self.normal_map.clone();
        physical.roughness_map = self.roughness_map.clone();
        physical.metalness_map = self.metalness_map.clone();
        physical.emissive_map = self.emissive_map.clone();
        physical.ao_map = self.ao_map.clone();
        physical.color = self.color;
        physical.emissive = self.emissive;
        physical.version = self.version + 1;
        physical
    }

    /// Trimmed, upper-cased name for role matching.
    #[must_use]
    pub fn normalized_name(&self) -> String {
        self.name.trim().to_uppercase()
    }

    /// Bumped whenever the material is patched; the renderer re-uploads on change.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn needs_update(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}
