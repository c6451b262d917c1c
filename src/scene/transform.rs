use glam::{Affine3A, Quat, Vec3};

/// Node-local TRS plus the cached world matrix.
///
/// The world matrix is written by [`Scene::update_world_matrices`](crate::scene::Scene::update_world_matrices).
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    pub(crate) world_matrix: Affine3A,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            world_matrix: Affine3A::IDENTITY,
        }
    }

    #[must_use]
    pub fn from_translation(position: Vec3) -> Self {
        Self { position, ..Self::new() }
    }

    #[must_use]
    pub fn local_matrix(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }
}
