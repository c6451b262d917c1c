pub mod hit_mapper;
pub mod ray;

pub use hit_mapper::{ButtonRegion, Rect, UvHitMapper, region_at};
pub use ray::{Ray, RayHit, raycast};
