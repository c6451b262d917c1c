//! Post-load material patching.
//!
//! - [`roles`]: tags special material slots once, by name
//! - [`presets`]: livery, paint and video-screen material presets
//! - [`dashboard`]: canvas layout and binding of the interactive dashboard

pub mod dashboard;
pub mod presets;
pub mod roles;

pub use dashboard::{DashboardAction, DashboardLayout, apply_dashboard};
pub use presets::apply_material_presets;
pub use roles::{MaterialRole, MaterialTarget, RoleMap, tag_roles};
