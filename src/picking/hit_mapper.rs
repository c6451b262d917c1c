//! UV-Space Hit Mapper
//!
//! Turns a pointer position into a pixel of the shared dashboard canvas:
//!
//! 1. cast a ray from the camera through the pointer's NDC,
//! 2. take the nearest hit among the interactive surfaces,
//! 3. read the interpolated UV at the hit,
//! 4. undo the surface's island-fitting [`TextureTransform`],
//! 5. scale to canvas pixels, flipping V (canvas rows grow downward),
//! 6. test the pixel against the button regions.
//!
//! Every failure along the way (no hit, no UVs, no texture) yields `None`.

use glam::{IVec2, UVec2, Vec2};

use crate::picking::ray::{RayHit, raycast};
use crate::resources::texture::TextureTransform;
use crate::scene::{Camera, NodeHandle, Scene};

/// Axis-aligned rectangle in canvas pixels, top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Edges are inclusive.
    #[must_use]
    pub fn contains(&self, point: IVec2) -> bool {
        let (px, py) = (point.x as f32, point.y as f32);
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

/// A named clickable area of the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonRegion {
    pub id: String,
    pub rect: Rect,
}

impl ButtonRegion {
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self { id: id.into(), rect }
    }
}

/// First region containing `pixel`.
#[must_use]
pub fn region_at(regions: &[ButtonRegion], pixel: IVec2) -> Option<&ButtonRegion> {
    regions.iter().find(|r| r.rect.contains(pixel))
}

/// Rounds half-way cases up, matching the canvas' pixel snapping.
#[inline]
fn round_half_up(x: f32) -> i32 {
    (x + 0.5).floor() as i32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UvHitMapper {
    canvas_size: UVec2,
}

impl UvHitMapper {
    #[must_use]
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_size: UVec2::new(canvas_width, canvas_height),
        }
    }

    #[inline]
    #[must_use]
    pub fn canvas_size(&self) -> UVec2 {
        self.canvas_size
    }

    /// Canvas pixel for a surface UV, undoing `transform`.
    ///
    /// `full = (uv - offset) / repeat`, then
    /// `px = round(full.u * W)`, `py = round((1 - full.v) * H)`.
    #[must_use]
    pub fn canvas_pixel(&self, uv: Vec2, transform: &TextureTransform) -> IVec2 {
        let full = transform.invert(uv);
        let size = self.canvas_size.as_vec2();
        IVec2::new(
            round_half_up(full.x * size.x),
            round_half_up((1.0 - full.y) * size.y),
        )
    }

    /// Canvas pixel for a ray hit, using the color-map transform of the hit material.
    #[must_use]
    pub fn canvas_pixel_for_hit(&self, scene: &Scene, hit: &RayHit) -> Option<IVec2> {
        let uv = hit.uv?;
        let node = scene.get_node(hit.node)?;
        let mesh = scene.meshes.get(node.mesh?)?;
        let primitive = mesh.primitives.get(hit.primitive)?;
        let material = scene.materials.get(primitive.material)?;
        let map = material.map.as_ref()?;
        Some(self.canvas_pixel(uv, &map.transform))
    }

    /// Canvas pixel under the pointer, or `None` if no candidate surface is hit.
    #[must_use]
    pub fn pick_canvas_pixel(
        &self,
        pointer_ndc: Vec2,
        camera: &Camera,
        scene: &Scene,
        candidates: &[NodeHandle],
    ) -> Option<IVec2> {
        let ray = camera.ray_from_ndc(pointer_ndc);
        let hit = raycast(scene, &ray, candidates)?;
        self.canvas_pixel_for_hit(scene, &hit)
    }

    /// Button region under the pointer, if any.
    #[must_use]
    pub fn map_pointer_to_canvas_pixel<'r>(
        &self,
        pointer_ndc: Vec2,
        camera: &Camera,
        scene: &Scene,
        candidates: &[NodeHandle],
        regions: &'r [ButtonRegion],
    ) -> Option<&'r ButtonRegion> {
        let pixel = self.pick_canvas_pixel(pointer_ndc, camera, scene, candidates)?;
        let region = region_at(regions, pixel);
        log::debug!("Canvas hit at {pixel} -> {:?}", region.map(|r| r.id.as_str()));
        region
    }
}
