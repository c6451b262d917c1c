use glam::Vec2;

use crate::resources::geometry::UvBounds;

/// Smallest UV span used when fitting a texture to an island.
pub const MIN_UV_SPAN: f32 = 1e-6;

/// Scale/offset applied to a mesh's UVs before sampling.
///
/// `repeat` is the per-axis scale, `offset` the translation:
/// `sampled = uv * repeat + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureTransform {
    pub offset: Vec2,
    pub repeat: Vec2,
}

impl Default for TextureTransform {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            repeat: Vec2::ONE,
        }
    }
}

impl TextureTransform {
    pub const IDENTITY: Self = Self {
        offset: Vec2::ZERO,
        repeat: Vec2::ONE,
    };

    /// Transform that stretches a full texture over the UV island `bounds`.
    ///
    /// `repeat = 1 / span`, `offset = -min / span`, mapping `[min, max]` onto
    /// `[0, 1]`. Spans below [`MIN_UV_SPAN`] are floored so flat islands
    /// never divide by zero.
    #[must_use]
    pub fn fit_uv_island(bounds: &UvBounds) -> Self {
        let span = bounds.span().max(Vec2::splat(MIN_UV_SPAN));
        let repeat = span.recip();
        Self {
            offset: -bounds.min * repeat,
            repeat,
        }
    }

    /// `uv * repeat + offset`.
    #[inline]
    #[must_use]
    pub fn apply(&self, uv: Vec2) -> Vec2 {
        uv * self.repeat + self.offset
    }

    /// `(uv - offset) / repeat`, with a zero or non-finite repeat treated as `1`.
    #[must_use]
    pub fn invert(&self, uv: Vec2) -> Vec2 {
        let safe = |r: f32| if r.is_finite() && r != 0.0 { r } else { 1.0 };
        let repeat = Vec2::new(safe(self.repeat.x), safe(self.repeat.y));
        (uv - self.offset) / repeat
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TextureSource {
    /// Image `index` embedded in the loaded asset.
    Image(usize),
    /// A 2D canvas drawn by the host page.
    Canvas { width: u32, height: u32 },
    /// A looping video element.
    Video { uri: String, looping: bool, muted: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    Linear,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    Repeat,
    ClampToEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorSpace {
    #[default]
    Srgb,
    Linear,
}

/// A texture source bound to a material slot, with its sampling state.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureBinding {
    pub source: TextureSource,
    pub transform: TextureTransform,
    pub flip_y: bool,
    pub color_space: ColorSpace,
    pub min_filter: FilterMode,
    pub mag_filter: FilterMode,
    pub generate_mipmaps: bool,
    pub wrap: WrapMode,
}

impl TextureBinding {
    pub fn new(source: TextureSource) -> Self {
        Self {
            source,
            transform: TextureTransform::IDENTITY,
            flip_y: false,
            color_space: ColorSpace::Srgb,
            min_filter: FilterMode::Linear,
            mag_filter: FilterMode::Linear,
            generate_mipmaps: true,
            wrap: WrapMode::Repeat,
        }
    }

    /// Linear filtering without mipmaps, for textures that are shown 1:1.
    pub fn set_linear_no_mipmaps(&mut self) {
        self.min_filter = FilterMode::Linear;
        self.mag_filter = FilterMode::Linear;
        self.generate_mipmaps = false;
    }
}
