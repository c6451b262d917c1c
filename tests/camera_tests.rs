//! Camera Resolver Tests
//!
//! Tests for:
//! - Resolving the render camera by node or component name
//! - Absent cameras (None / MissingCamera)
//! - Aspect re-sync on resize (perspective only, zero sizes ignored)
//! - NDC ray construction for perspective and orthographic cameras

use glam::{Vec2, Vec3};

use showroom::errors::ShowroomError;
use showroom::scene::{Camera, Node, Scene, Transform};
use showroom::viewer::CameraResolver;

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn scene_with_cameras() -> Scene {
    let mut scene = Scene::new();

    let orbit = scene.add_node(Node::new("orbitCamera"));
    scene.set_camera(orbit, Camera::new_perspective(45.0, 1.0, 0.1, 100.0));

    let rig = scene.add_node(Node::new("Rig"));
    let computer = scene.add_to_parent(
        Node::new("computerCamera").with_transform(Transform::from_translation(Vec3::new(0.0, 1.0, 4.0))),
        rig,
    );
    scene.set_camera(computer, Camera::new_perspective(50.0, 1.0, 0.1, 100.0));

    scene.update_world_matrices();
    scene
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn resolves_nested_camera_by_node_name() {
    let scene = scene_with_cameras();
    let mut resolver = CameraResolver::new("computerCamera");

    let handle = resolver.resolve(&scene).unwrap();
    assert_eq!(scene.get_node(handle).unwrap().name, "computerCamera");
    assert_eq!(resolver.active(), Some(handle));

    let camera = resolver.camera(&scene).unwrap();
    assert!((camera.position() - Vec3::new(0.0, 1.0, 4.0)).length() < EPSILON);
}

#[test]
fn node_name_wins_over_component_name() {
    let mut scene = scene_with_cameras();
    let decoy = scene.add_node(Node::new("Decoy"));
    scene.set_camera(decoy, Camera::new_perspective(30.0, 1.0, 0.1, 10.0).with_name("computerCamera"));

    let mut resolver = CameraResolver::new("computerCamera");
    let handle = resolver.resolve(&scene).unwrap();
    assert_ne!(handle, decoy);
}

#[test]
fn missing_camera_resolves_to_none() {
    let scene = scene_with_cameras();
    let mut resolver = CameraResolver::new("introCamera");

    assert_eq!(resolver.resolve(&scene), None);
    assert!(resolver.camera(&scene).is_none());
    assert!(matches!(
        resolver.require(&scene),
        Err(ShowroomError::MissingCamera(name)) if name == "introCamera"
    ));
}

#[test]
fn re_resolving_replaces_previous_camera() {
    let scene = scene_with_cameras();
    let mut resolver = CameraResolver::new("computerCamera");
    resolver.resolve(&scene);

    let empty = Scene::new();
    assert_eq!(resolver.resolve(&empty), None);
    assert_eq!(resolver.active(), None);

    resolver.resolve(&scene);
    resolver.clear();
    assert_eq!(resolver.active(), None);
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn resize_updates_perspective_aspect() {
    let mut scene = scene_with_cameras();
    let mut resolver = CameraResolver::new("computerCamera");
    resolver.resolve(&scene);

    let before = *resolver.camera(&scene).unwrap().projection_matrix();
    resolver.on_resize(&mut scene, 1920, 1080);

    let camera = resolver.camera(&scene).unwrap();
    assert!(approx(camera.aspect, 1920.0 / 1080.0));
    assert_ne!(*camera.projection_matrix(), before);
}

#[test]
fn resize_ignores_zero_sizes() {
    let mut scene = scene_with_cameras();
    let mut resolver = CameraResolver::new("computerCamera");
    resolver.resolve(&scene);

    resolver.on_resize(&mut scene, 0, 600);
    resolver.on_resize(&mut scene, 800, 0);
    assert!(approx(resolver.camera(&scene).unwrap().aspect, 1.0));
}

#[test]
fn resize_leaves_orthographic_camera_alone() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::new("computerCamera"));
    scene.set_camera(node, Camera::new_orthographic(5.0, 1.0, 0.1, 100.0));
    scene.update_world_matrices();

    let mut resolver = CameraResolver::new("computerCamera");
    resolver.resolve(&scene);
    resolver.on_resize(&mut scene, 1600, 400);
    assert!(approx(resolver.camera(&scene).unwrap().aspect, 1.0));
}

#[test]
fn resize_without_camera_is_noop() {
    let mut scene = scene_with_cameras();
    let resolver = CameraResolver::new("computerCamera");
    resolver.on_resize(&mut scene, 1024, 768);
}

// ============================================================================
// Rays
// ============================================================================

#[test]
fn perspective_corner_ray_matches_fov() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::new("cam"));
    scene.set_camera(node, Camera::new_perspective(90.0, 1.0, 0.1, 100.0));
    scene.update_world_matrices();

    let camera = scene.camera_of(node).unwrap();
    let ray = camera.ray_from_ndc(Vec2::new(0.0, 1.0));
    // 90 degree vertical fov: the top edge is 45 degrees above the view axis.
    let expected = Vec3::new(0.0, 1.0, -1.0).normalize();
    assert!((ray.direction - expected).length() < EPSILON, "got {}", ray.direction);
}

#[test]
fn orthographic_rays_are_parallel() {
    let mut scene = Scene::new();
    let node = scene.add_node(Node::new("cam").with_transform(Transform::from_translation(Vec3::new(0.0, 0.0, 10.0))));
    scene.set_camera(node, Camera::new_orthographic(2.0, 1.0, 0.5, 50.0));
    scene.update_world_matrices();

    let camera = scene.camera_of(node).unwrap();
    let center = camera.ray_from_ndc(Vec2::ZERO);
    let corner = camera.ray_from_ndc(Vec2::new(1.0, 1.0));

    assert!((center.direction - Vec3::NEG_Z).length() < EPSILON);
    assert!((corner.direction - Vec3::NEG_Z).length() < EPSILON);
    assert!((corner.origin - Vec3::new(2.0, 2.0, 9.5)).length() < 1e-3);
}
