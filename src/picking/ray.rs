use glam::{Vec2, Vec3};

use crate::scene::{NodeHandle, Scene};

const PARALLEL_EPSILON: f32 = 1e-8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Möller–Trumbore intersection with a double-sided triangle.
    ///
    /// Returns the distance along the ray and the barycentric weights of
    /// `(b, c)`; the weight of `a` is `1 - u - v`.
    #[must_use]
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<(f32, Vec2)> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > 0.0).then_some((t, Vec2::new(u, v)))
    }
}

/// Nearest intersection of a ray with a mesh primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub node: NodeHandle,
    pub primitive: usize,
    pub triangle: usize,
    pub distance: f32,
    pub point: Vec3,
    /// Interpolated `TEXCOORD_0`, when the primitive has UVs.
    pub uv: Option<Vec2>,
}

/// Casts `ray` against the meshes of `candidates` and returns the nearest hit.
///
/// Triangles are tested in world space, so distances are comparable across
/// nodes. Hidden nodes and nodes without meshes are skipped.
#[must_use]
pub fn raycast(scene: &Scene, ray: &Ray, candidates: &[NodeHandle]) -> Option<RayHit> {
    if ray.direction == Vec3::ZERO {
        return None;
    }

    let mut nearest: Option<RayHit> = None;

    for &handle in candidates {
        let Some(node) = scene.get_node(handle) else {
            continue;
        };
        if !node.visible {
            continue;
        }
        let Some(mesh) = node.mesh.and_then(|key| scene.meshes.get(key)) else {
            continue;
        };
        let world = node.world_matrix();

        for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
            let geometry = &primitive.geometry;
            for tri in 0..geometry.triangle_count() {
                let Some([ia, ib, ic]) = geometry.triangle(tri) else {
                    continue;
                };
                let a = world.transform_point3(geometry.positions[ia]);
                let b = world.transform_point3(geometry.positions[ib]);
                let c = world.transform_point3(geometry.positions[ic]);

                let Some((distance, bary)) = ray.intersect_triangle(a, b, c) else {
                    continue;
                };
                if nearest.is_some_and(|n| n.distance <= distance) {
                    continue;
                }

                let uv = match (geometry.uv(ia), geometry.uv(ib), geometry.uv(ic)) {
                    (Some(ua), Some(ub), Some(uc)) => {
                        Some(ua * (1.0 - bary.x - bary.y) + ub * bary.x + uc * bary.y)
                    }
                    _ => None,
                };

                nearest = Some(RayHit {
                    node: handle,
                    primitive: primitive_index,
                    triangle: tri,
                    distance,
                    point: ray.at(distance),
                    uv,
                });
            }
        }
    }

    nearest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hits_triangle_front_and_back() {
        let (a, b, c) = (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let front = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let back = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!((front.intersect_triangle(a, b, c).unwrap().0 - 5.0).abs() < 1e-5);
        assert!(back.intersect_triangle(a, b, c).is_some());
    }

    #[test]
    fn misses_behind_origin_and_outside() {
        let (a, b, c) = (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        let away = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        let beside = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(away.intersect_triangle(a, b, c).is_none());
        assert!(beside.intersect_triangle(a, b, c).is_none());
    }
}
