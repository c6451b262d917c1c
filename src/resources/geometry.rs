use glam::{Affine3A, Vec2, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self { min: first, max: first }, |b, p| Self {
            min: b.min.min(p),
            max: b.max.max(p),
        }))
    }

    pub fn size(&self) -> Vec3 { self.max - self.min }

    pub fn volume(&self) -> f32 {
        let s = self.size();
        s.x * s.y * s.z
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let corners = [
            Vec3::new(self.min.x, self.min.y, self.min.z),
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut new_min = Vec3::splat(f32::INFINITY);
        let mut new_max = Vec3::splat(f32::NEG_INFINITY);

        for point in corners {
            let transformed = matrix.transform_point3(point);
            new_min = new_min.min(transformed);
            new_max = new_max.max(transformed);
        }

        Self { min: new_min, max: new_max }
    }
}

/// Axis-aligned extent of a set of UV coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UvBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl UvBounds {
    #[inline]
    pub fn span(&self) -> Vec2 {
        self.max - self.min
    }
}

/// CPU-side triangle geometry: the attributes hit testing and UV fitting need.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    /// `TEXCOORD_0`, one per position when present.
    pub uvs: Option<Vec<Vec2>>,
    /// Triangle list indices; `None` means consecutive triples of positions.
    pub indices: Option<Vec<u32>>,
}

impl Geometry {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions, uvs: None, indices: None }
    }

    #[must_use]
    pub fn with_uvs(mut self, uvs: Vec<Vec2>) -> Self {
        self.uvs = Some(uvs);
        self
    }

    #[must_use]
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Vertex indices of triangle `i`, if every index is in range.
    pub fn triangle(&self, i: usize) -> Option<[usize; 3]> {
        let tri = match &self.indices {
            Some(indices) => {
                let base = indices.get(i * 3..i * 3 + 3)?;
                [base[0] as usize, base[1] as usize, base[2] as usize]
            }
            None => [i * 3, i * 3 + 1, i * 3 + 2],
        };
        if tri.iter().all(|&v| v < self.positions.len()) {
            Some(tri)
        } else {
            None
        }
    }

    pub fn uv(&self, vertex: usize) -> Option<Vec2> {
        self.uvs.as_ref()?.get(vertex).copied()
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(self.positions.iter().copied())
    }

    pub fn uv_bounds(&self) -> Option<UvBounds> {
        let uvs = self.uvs.as_ref()?;
        let mut iter = uvs.iter().copied();
        let first = iter.next()?;
        Some(iter.fold(UvBounds { min: first, max: first }, |b, uv| UvBounds {
            min: b.min.min(uv),
            max: b.max.max(uv),
        }))
    }
}
