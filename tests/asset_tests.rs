//! Asset Loading Tests
//!
//! Tests for:
//! - glTF scene construction (hierarchy, TRS, cameras, meshes, materials)
//! - Animation clip durations
//! - File vs. in-memory loading
//! - Error reporting for missing and malformed assets

use std::path::PathBuf;

use glam::{Vec2, Vec3};

use showroom::assets::{self, AssetSource, load_gltf_bytes, load_gltf_file};
use showroom::errors::ShowroomError;
use showroom::resources::{MaterialKind, Side};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/intro_scene.gltf")
}

// ============================================================================
// Scene Construction
// ============================================================================

#[test]
fn loads_node_hierarchy() -> anyhow::Result<()> {
    let asset = load_gltf_file(fixture())?;
    let scene = &asset.scene;

    assert_eq!(scene.nodes.len(), 5);
    assert_eq!(scene.root_nodes.len(), 4);

    let car = scene.find_node_by_name("Car").expect("Car node");
    let body = scene.find_node_by_name("Body").expect("Body node");
    assert_eq!(scene.get_node(body).unwrap().parent(), Some(car));
    assert_eq!(scene.get_node(car).unwrap().children(), &[body]);

    let world = scene.get_node(body).unwrap().world_matrix();
    assert!((Vec3::from(world.translation) - Vec3::new(0.0, -2.0, -1.0)).length() < EPSILON);
    Ok(())
}

#[test]
fn loads_named_camera() -> anyhow::Result<()> {
    let asset = load_gltf_file(fixture())?;
    let scene = &asset.scene;

    let node = scene.find_node_by_name("computerCamera").expect("camera node");
    let camera = scene.camera_of(node).expect("camera component");
    assert_eq!(camera.name, "computerCameraLens");
    assert!(camera.is_perspective());
    assert!(approx(camera.fov, 0.8));
    assert!(approx(camera.aspect, 1.5));
    assert!(approx(camera.near, 0.1));
    assert!(approx(camera.far, 100.0));
    assert!((camera.position() - Vec3::new(0.0, 0.0, 5.0)).length() < EPSILON);
    Ok(())
}

#[test]
fn loads_mesh_geometry() -> anyhow::Result<()> {
    let asset = load_gltf_file(fixture())?;
    let scene = &asset.scene;
    assert_eq!(scene.meshes.len(), 3);

    let dashboard = scene.find_node_by_name("Dashboard").unwrap();
    let mesh = &scene.meshes[scene.get_node(dashboard).unwrap().mesh.unwrap()];
    assert_eq!(mesh.name, "DashboardMesh");
    assert_eq!(mesh.primitives.len(), 1);

    let geometry = &mesh.primitives[0].geometry;
    assert_eq!(geometry.positions.len(), 4);
    assert_eq!(geometry.triangle_count(), 2);

    let bounds = geometry.uv_bounds().unwrap();
    assert!((bounds.min - Vec2::new(0.25, 0.5)).length() < EPSILON);
    assert!((bounds.max - Vec2::new(0.75, 1.0)).length() < EPSILON);
    Ok(())
}

#[test]
fn loads_material_factors() -> anyhow::Result<()> {
    let asset = load_gltf_file(fixture())?;
    let scene = &asset.scene;

    let names: Vec<&str> = scene.materials.values().map(|m| m.name.as_str()).collect();
    for expected in ["DASHNEW", "SCREEN", "mat_livery_0_157_001.004"] {
        assert!(names.contains(&expected), "missing material {expected}");
    }

    let livery = scene
        .materials
        .values()
        .find(|m| m.name == "mat_livery_0_157_001.004")
        .unwrap();
    assert_eq!(livery.kind, MaterialKind::Standard);
    assert_eq!(livery.side, Side::Double);
    assert!((livery.color - Vec3::new(0.8, 0.1, 0.1)).length() < EPSILON);
    assert!(approx(livery.metalness, 0.6));
    assert!(approx(livery.roughness, 0.4));
    Ok(())
}

#[test]
fn loads_clip_duration() -> anyhow::Result<()> {
    let asset = load_gltf_file(fixture())?;
    assert_eq!(asset.clips.len(), 1);

    let clip = asset.intro_clip().expect("intro clip");
    assert_eq!(clip.name, "IntroClip");
    assert!(approx(clip.duration, 6.0));
    Ok(())
}

// ============================================================================
// Sources
// ============================================================================

#[test]
fn bytes_and_file_loads_agree() -> anyhow::Result<()> {
    let from_file = load_gltf_file(fixture())?;
    let from_bytes = load_gltf_bytes(&std::fs::read(fixture())?)?;

    assert_eq!(from_file.scene.nodes.len(), from_bytes.scene.nodes.len());
    assert_eq!(from_file.scene.meshes.len(), from_bytes.scene.meshes.len());
    assert_eq!(from_file.clips, from_bytes.clips);
    Ok(())
}

#[test]
fn load_dispatches_on_source() -> anyhow::Result<()> {
    let source = AssetSource::from_location(fixture().to_str().unwrap());
    assert!(matches!(source, AssetSource::File(_)));

    let asset = assets::load(&source)?;
    assert!(asset.scene.find_node_by_name("computerCamera").is_some());
    Ok(())
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn missing_file_is_reported() {
    let source = AssetSource::from_location("./tests/fixtures/does_not_exist.glb");
    assert!(matches!(assets::load(&source), Err(ShowroomError::AssetNotFound(_))));
}

#[test]
fn malformed_bytes_are_reported() {
    let result = load_gltf_bytes(b"definitely not a gltf file");
    assert!(matches!(result, Err(ShowroomError::GltfError(_))));
}

#[cfg(not(feature = "http"))]
#[test]
fn http_source_requires_feature() {
    let source = AssetSource::from_location("https://example.com/scene.glb");
    assert!(matches!(assets::load(&source), Err(ShowroomError::FeatureNotEnabled(_))));
}
