use crate::errors::{Result, ShowroomError};
use crate::scene::{Camera, NodeHandle, Scene};

/// Locks rendering to one named camera of the loaded scene.
///
/// The active camera is looked up once per load and replaced wholesale on
/// the next load; it is never shared through global state.
#[derive(Debug, Clone)]
pub struct CameraResolver {
    name: String,
    active: Option<NodeHandle>,
}

impl CameraResolver {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn active(&self) -> Option<NodeHandle> {
        self.active
    }

    /// Finds the camera by node name, then by camera component name.
    ///
    /// Nodes without a camera component are skipped. Returns `None` and logs
    /// when the scene has no such camera.
    pub fn resolve(&mut self, scene: &Scene) -> Option<NodeHandle> {
        let mut by_node = None;
        let mut by_component = None;
        scene.traverse(|handle, node| {
            let Some(camera) = node.camera.and_then(|key| scene.cameras.get(key)) else {
                return;
            };
            if by_node.is_none() && node.name == self.name {
                by_node = Some(handle);
            }
            if by_component.is_none() && camera.name == self.name {
                by_component = Some(handle);
            }
        });

        self.active = by_node.or(by_component);
        match self.active {
            Some(handle) => log::info!("Active camera '{}' resolved ({handle:?})", self.name),
            None => log::warn!("Camera '{}' not found in loaded scene", self.name),
        }
        self.active
    }

    /// The active camera component, if resolved.
    #[must_use]
    pub fn camera<'s>(&self, scene: &'s Scene) -> Option<&'s Camera> {
        scene.camera_of(self.active?)
    }

    /// Like [`camera`](Self::camera), but reports absence as [`ShowroomError::MissingCamera`].
    pub fn require<'s>(&self, scene: &'s Scene) -> Result<&'s Camera> {
        self.camera(scene)
            .ok_or_else(|| ShowroomError::MissingCamera(self.name.clone()))
    }

    /// Re-syncs a perspective camera to a new surface size.
    ///
    /// Zero-sized surfaces (minimized windows) are ignored. Orthographic
    /// cameras keep their authored frustum.
    pub fn on_resize(&self, scene: &mut Scene, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let Some(camera) = self.active.and_then(|handle| scene.camera_of_mut(handle)) else {
            return;
        };
        if camera.is_perspective() {
            camera.set_aspect(width as f32 / height as f32);
        }
    }

    pub fn clear(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Node;

    #[test]
    fn resolves_by_component_name_when_node_differs() {
        let mut scene = Scene::new();
        let handle = scene.add_node(Node::new("CameraRig"));
        scene.set_camera(handle, Camera::new_perspective(45.0, 1.0, 0.1, 100.0).with_name("computerCamera"));

        let mut resolver = CameraResolver::new("computerCamera");
        assert_eq!(resolver.resolve(&scene), Some(handle));
    }

    #[test]
    fn node_without_camera_is_not_resolved() {
        let mut scene = Scene::new();
        scene.add_node(Node::new("computerCamera"));

        let mut resolver = CameraResolver::new("computerCamera");
        assert_eq!(resolver.resolve(&scene), None);
    }
}
