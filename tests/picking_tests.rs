//! Picking Tests
//!
//! Tests for:
//! - Texture transform fitting and inversion
//! - Canvas pixel conversion with the V flip
//! - Button region containment
//! - Ray/triangle intersection and nearest-hit ray casting
//! - End-to-end pointer -> button resolution through a camera

use glam::{IVec2, Vec2, Vec3};

use showroom::config::DashboardConfig;
use showroom::patches::DashboardLayout;
use showroom::patches::dashboard::{CODE_BUTTON, RESET_BUTTON};
use showroom::picking::{ButtonRegion, Ray, Rect, UvHitMapper, raycast, region_at};
use showroom::resources::{Geometry, Material, Mesh, TextureBinding, TextureSource, TextureTransform, UvBounds};
use showroom::scene::{Camera, Node, NodeHandle, Scene, Transform};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn approx_vec2(a: Vec2, b: Vec2) -> bool {
    approx(a.x, b.x) && approx(a.y, b.y)
}

const CANVAS_W: f32 = 512.0;
const CANVAS_H: f32 = 256.0;
const FOV_DEG: f32 = 60.0;
const ASPECT: f32 = 2.0;
const CAMERA_Z: f32 = 5.0;

fn unit_quad(half_w: f32, half_h: f32, z: f32) -> Geometry {
    Geometry::new(vec![
        Vec3::new(-half_w, -half_h, z),
        Vec3::new(half_w, -half_h, z),
        Vec3::new(half_w, half_h, z),
        Vec3::new(-half_w, half_h, z),
    ])
    .with_uvs(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ])
    .with_indices(vec![0, 1, 2, 0, 2, 3])
}

/// Camera at z=5 looking down -Z at a 4x2 canvas quad on the z=0 plane.
fn dashboard_scene() -> (Scene, NodeHandle, NodeHandle) {
    let mut scene = Scene::new();

    let camera_node = scene.add_node(
        Node::new("computerCamera").with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, CAMERA_Z))),
    );
    scene.set_camera(camera_node, Camera::new_perspective(FOV_DEG, ASPECT, 0.1, 100.0));

    let mut material = Material::new_basic("DASHNEW");
    material.map = Some(TextureBinding::new(TextureSource::Canvas {
        width: CANVAS_W as u32,
        height: CANVAS_H as u32,
    }));
    let material = scene.add_material(material);

    let dashboard = scene.add_node(Node::new("Dashboard"));
    scene.set_mesh(dashboard, Mesh::from_geometry("DashboardMesh", unit_quad(2.0, 1.0, 0.0), material));

    scene.update_world_matrices();
    (scene, camera_node, dashboard)
}

/// NDC that projects onto canvas pixel `(px, py)` of the dashboard quad.
fn ndc_for_canvas_pixel(px: f32, py: f32) -> Vec2 {
    let u = px / CANVAS_W;
    let v = 1.0 - py / CANVAS_H;
    let world = Vec2::new(-2.0 + 4.0 * u, -1.0 + 2.0 * v);
    let half_height = CAMERA_Z * (FOV_DEG.to_radians() / 2.0).tan();
    Vec2::new(world.x / (half_height * ASPECT), world.y / half_height)
}

fn rect_center(rect: Rect) -> (f32, f32) {
    (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0)
}

// ============================================================================
// Texture Transform
// ============================================================================

#[test]
fn inversion_recovers_full_canvas_uv() {
    let transform = TextureTransform {
        offset: Vec2::new(-0.5, -1.2),
        repeat: Vec2::new(2.0, 4.0),
    };
    let full = transform.invert(Vec2::new(0.5, 1.6));
    assert!(approx_vec2(full, Vec2::new(0.5, 0.7)), "got {full}");

    let mapper = UvHitMapper::new(CANVAS_W as u32, CANVAS_H as u32);
    // round(0.5 * 512) = 256, round((1 - 0.7) * 256) = round(76.8) = 77
    assert_eq!(mapper.canvas_pixel(Vec2::new(0.5, 1.6), &transform), IVec2::new(256, 77));
}

#[test]
fn fitted_transform_maps_island_to_unit_square() {
    let bounds = UvBounds {
        min: Vec2::new(0.25, 0.5),
        max: Vec2::new(0.75, 1.0),
    };
    let transform = TextureTransform::fit_uv_island(&bounds);

    assert!(approx_vec2(transform.repeat, Vec2::new(2.0, 2.0)));
    assert!(approx_vec2(transform.offset, Vec2::new(-0.5, -1.0)));
    assert!(approx_vec2(transform.apply(bounds.min), Vec2::ZERO));
    assert!(approx_vec2(transform.apply(bounds.max), Vec2::ONE));
}

#[test]
fn degenerate_island_is_span_floored() {
    let bounds = UvBounds {
        min: Vec2::new(0.3, 0.3),
        max: Vec2::new(0.3, 0.8),
    };
    let transform = TextureTransform::fit_uv_island(&bounds);
    assert!(transform.repeat.is_finite());
    assert!(transform.offset.is_finite());
    assert!(approx(transform.repeat.y, 2.0));

    // The flat U axis collapses onto the island's own coordinate:
    // full.u = 0.3 + 0.3 / repeat.x, full.v = (0.5 + 0.6) / 2 = 0.55.
    let mapper = UvHitMapper::new(512, 256);
    assert_eq!(mapper.canvas_pixel(Vec2::new(0.3, 0.5), &transform), IVec2::new(154, 115));
}

#[test]
fn zero_repeat_never_divides_by_zero() {
    let transform = TextureTransform {
        offset: Vec2::ZERO,
        repeat: Vec2::ZERO,
    };
    assert!(approx_vec2(transform.invert(Vec2::new(0.25, 0.75)), Vec2::new(0.25, 0.75)));
}

#[test]
fn canvas_pixel_flips_v() {
    let mapper = UvHitMapper::new(512, 256);
    let identity = TextureTransform::IDENTITY;
    assert_eq!(mapper.canvas_pixel(Vec2::new(0.0, 1.0), &identity), IVec2::new(0, 0));
    assert_eq!(mapper.canvas_pixel(Vec2::new(1.0, 0.0), &identity), IVec2::new(512, 256));
    assert_eq!(mapper.canvas_pixel(Vec2::new(0.25, 0.25), &identity), IVec2::new(128, 192));
}

// ============================================================================
// Button Regions
// ============================================================================

#[test]
fn region_edges_are_inclusive() {
    let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
    assert!(rect.contains(IVec2::new(10, 20)));
    assert!(rect.contains(IVec2::new(40, 60)));
    assert!(!rect.contains(IVec2::new(41, 60)));
    assert!(!rect.contains(IVec2::new(10, 19)));
}

#[test]
fn first_matching_region_wins() {
    let regions = vec![
        ButtonRegion::new("A", Rect::new(0.0, 0.0, 100.0, 100.0)),
        ButtonRegion::new("B", Rect::new(50.0, 50.0, 100.0, 100.0)),
    ];
    assert_eq!(region_at(&regions, IVec2::new(75, 75)).map(|r| r.id.as_str()), Some("A"));
    assert_eq!(region_at(&regions, IVec2::new(125, 125)).map(|r| r.id.as_str()), Some("B"));
    assert!(region_at(&regions, IVec2::new(500, 500)).is_none());
}

#[test]
fn default_layout_regions() {
    let layout = DashboardLayout::compute(&DashboardConfig::default());
    assert_eq!(layout.buttons.len(), 2);
    assert_eq!(layout.region(CODE_BUTTON).unwrap().rect, Rect::new(146.0, 135.0, 220.0, 40.0));
    assert_eq!(layout.region(RESET_BUTTON).unwrap().rect, Rect::new(146.0, 81.0, 220.0, 40.0));
}

// ============================================================================
// Ray Casting
// ============================================================================

#[test]
fn ray_hits_triangle_from_either_side() {
    let (a, b, c) = (Vec3::new(-1.0, -1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));

    let front = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::NEG_Z);
    let (t, _) = front.intersect_triangle(a, b, c).unwrap();
    assert!(approx(t, 3.0));

    let back = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
    assert!(back.intersect_triangle(a, b, c).is_some());

    let away = Ray::new(Vec3::new(0.0, 0.0, 3.0), Vec3::Z);
    assert!(away.intersect_triangle(a, b, c).is_none());

    let beside = Ray::new(Vec3::new(5.0, 0.0, 3.0), Vec3::NEG_Z);
    assert!(beside.intersect_triangle(a, b, c).is_none());
}

#[test]
fn raycast_interpolates_uv() {
    let (scene, _, dashboard) = dashboard_scene();
    let ray = Ray::new(Vec3::new(1.0, 0.5, 5.0), Vec3::NEG_Z);

    let hit = raycast(&scene, &ray, &[dashboard]).unwrap();
    assert_eq!(hit.node, dashboard);
    assert!(approx(hit.distance, 5.0));
    assert!(approx_vec2(hit.uv.unwrap(), Vec2::new(0.75, 0.75)));
}

#[test]
fn raycast_takes_nearest_candidate() {
    let (mut scene, _, dashboard) = dashboard_scene();
    let material = scene.add_material(Material::new_basic("Cover"));
    let cover = scene.add_node(Node::new("Cover"));
    scene.set_mesh(cover, Mesh::from_geometry("CoverMesh", unit_quad(2.0, 1.0, 1.0), material));
    scene.update_world_matrices();

    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    assert_eq!(raycast(&scene, &ray, &[dashboard, cover]).unwrap().node, cover);
    // Non-candidates never occlude.
    assert_eq!(raycast(&scene, &ray, &[dashboard]).unwrap().node, dashboard);

    scene.get_node_mut(cover).unwrap().visible = false;
    assert_eq!(raycast(&scene, &ray, &[dashboard, cover]).unwrap().node, dashboard);
}

#[test]
fn raycast_respects_world_transform() {
    let (mut scene, _, dashboard) = dashboard_scene();
    scene.get_node_mut(dashboard).unwrap().transform.position = Vec3::new(10.0, 0.0, 0.0);
    scene.update_world_matrices();

    let centered = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
    assert!(raycast(&scene, &centered, &[dashboard]).is_none());

    let shifted = Ray::new(Vec3::new(10.0, 0.0, 5.0), Vec3::NEG_Z);
    assert!(raycast(&scene, &shifted, &[dashboard]).is_some());
}

#[test]
fn camera_ray_through_center_points_forward() {
    let (scene, camera_node, _) = dashboard_scene();
    let camera = scene.camera_of(camera_node).unwrap();

    let ray = camera.ray_from_ndc(Vec2::ZERO);
    assert!((ray.origin - Vec3::new(0.0, 0.0, CAMERA_Z)).length() < EPSILON);
    assert!((ray.direction - Vec3::NEG_Z).length() < EPSILON);
}

// ============================================================================
// Pointer -> Button
// ============================================================================

#[test]
fn pointer_resolves_buttons() {
    let (scene, camera_node, dashboard) = dashboard_scene();
    let camera = scene.camera_of(camera_node).unwrap();
    let layout = DashboardLayout::compute(&DashboardConfig::default());
    let mapper = UvHitMapper::new(layout.canvas_width, layout.canvas_height);

    for id in [CODE_BUTTON, RESET_BUTTON] {
        let (px, py) = rect_center(layout.region(id).unwrap().rect);
        let region = mapper.map_pointer_to_canvas_pixel(
            ndc_for_canvas_pixel(px, py),
            camera,
            &scene,
            &[dashboard],
            &layout.buttons,
        );
        assert_eq!(region.map(|r| r.id.as_str()), Some(id));
    }
}

#[test]
fn pointer_pixel_matches_canvas_coordinates() {
    let (scene, camera_node, dashboard) = dashboard_scene();
    let camera = scene.camera_of(camera_node).unwrap();
    let mapper = UvHitMapper::new(512, 256);

    let pixel = mapper
        .pick_canvas_pixel(ndc_for_canvas_pixel(100.0, 40.0), camera, &scene, &[dashboard])
        .unwrap();
    assert!((pixel - IVec2::new(100, 40)).abs().max_element() <= 1, "got {pixel}");
}

#[test]
fn pointer_off_buttons_or_surface_resolves_nothing() {
    let (scene, camera_node, dashboard) = dashboard_scene();
    let camera = scene.camera_of(camera_node).unwrap();
    let layout = DashboardLayout::compute(&DashboardConfig::default());
    let mapper = UvHitMapper::new(layout.canvas_width, layout.canvas_height);

    // On the surface, above both buttons.
    let blank = ndc_for_canvas_pixel(256.0, 20.0);
    assert!(
        mapper
            .map_pointer_to_canvas_pixel(blank, camera, &scene, &[dashboard], &layout.buttons)
            .is_none()
    );

    // Off the surface entirely.
    let outside = Vec2::new(0.95, 0.95);
    assert!(
        mapper
            .map_pointer_to_canvas_pixel(outside, camera, &scene, &[dashboard], &layout.buttons)
            .is_none()
    );

    // No candidates.
    let (px, py) = rect_center(layout.region(RESET_BUTTON).unwrap().rect);
    assert!(
        mapper
            .map_pointer_to_canvas_pixel(ndc_for_canvas_pixel(px, py), camera, &scene, &[], &layout.buttons)
            .is_none()
    );
}

#[test]
fn pointer_resolves_through_fitted_transform() {
    let (mut scene, camera_node, dashboard) = dashboard_scene();
    let transform = TextureTransform {
        offset: Vec2::new(-0.5, -1.0),
        repeat: Vec2::new(2.0, 2.0),
    };
    for material in scene.materials.values_mut() {
        if let Some(map) = material.map.as_mut() {
            map.transform = transform;
        }
    }
    let camera = scene.camera_of(camera_node).unwrap();
    let layout = DashboardLayout::compute(&DashboardConfig::default());
    let mapper = UvHitMapper::new(layout.canvas_width, layout.canvas_height);

    // Surface UV whose inverted transform lands on the RESET center (256, 101).
    let (px, py) = rect_center(layout.region(RESET_BUTTON).unwrap().rect);
    let surface_uv = transform.apply(Vec2::new(px / CANVAS_W, 1.0 - py / CANVAS_H));
    assert!(approx_vec2(surface_uv, Vec2::new(0.5, 0.2109375)), "got {surface_uv}");
    let ndc = ndc_for_canvas_pixel(surface_uv.x * CANVAS_W, (1.0 - surface_uv.y) * CANVAS_H);

    let pixel = mapper.pick_canvas_pixel(ndc, camera, &scene, &[dashboard]).unwrap();
    assert!((pixel - IVec2::new(256, 101)).abs().max_element() <= 1, "got {pixel}");
    let region = mapper.map_pointer_to_canvas_pixel(ndc, camera, &scene, &[dashboard], &layout.buttons);
    assert_eq!(region.map(|r| r.id.as_str()), Some(RESET_BUTTON));
}

#[test]
fn surface_without_canvas_map_resolves_nothing() {
    let (mut scene, camera_node, dashboard) = dashboard_scene();
    for material in scene.materials.values_mut() {
        material.map = None;
    }
    let camera = scene.camera_of(camera_node).unwrap();
    let mapper = UvHitMapper::new(512, 256);
    assert!(mapper.pick_canvas_pixel(Vec2::ZERO, camera, &scene, &[dashboard]).is_none());
}
