// Host-side tests for scene composition and sprite flattening.

use folio_core::*;

fn small_config(backdrop: Backdrop) -> SceneConfig {
    SceneConfig {
        backdrop,
        layout: LayoutParams {
            particle_count: 40,
            connection_count: 3,
            ..LayoutParams::default()
        },
        field_count: 25,
        ..SceneConfig::default()
    }
}

#[test]
fn data_clusters_frame_contents() {
    let mut gen = LayoutGenerator::seeded(8);
    let scene = SceneComposer::new(small_config(Backdrop::DataClusters), &mut gen);
    let frame = scene.compose(0.0);
    assert_eq!(frame.clouds.len(), 1);
    assert_eq!(frame.lines.len(), 1);
    assert_eq!(frame.meshes.len(), 3);
    assert_eq!(frame.object_count(), 5);
    assert!(frame.meshes.iter().all(|m| m.item.wireframe));
    assert_eq!(frame.clouds[0].item.positions.len(), 40);
}

#[test]
fn neural_field_frame_contents() {
    let mut gen = LayoutGenerator::seeded(8);
    let scene = SceneComposer::new(small_config(Backdrop::NeuralField), &mut gen);
    let frame = scene.compose(1.0);
    assert_eq!(frame.clouds.len(), 1);
    assert!(frame.lines.is_empty());
    let names: Vec<&str> = frame.meshes.iter().map(|m| m.item.name).collect();
    assert_eq!(names, ["icosahedron", "torus", "octahedron"]);
    assert!(scene.layout().particles.is_empty());
}

#[test]
fn sprite_count_matches_instances() {
    let mut gen = LayoutGenerator::seeded(2);
    for backdrop in Backdrop::ALL {
        let scene = SceneComposer::new(small_config(backdrop), &mut gen);
        let frame = scene.compose(12.5);
        assert_eq!(frame.instances().len(), frame.sprite_count());
    }
}

#[test]
fn every_object_sees_the_same_instant() {
    let mut gen = LayoutGenerator::seeded(2);
    let scene = SceneComposer::new(small_config(Backdrop::NeuralField), &mut gen);
    let t = 42.0;
    let frame = scene.compose(t);
    assert_eq!(frame.elapsed_sec, t);
    for placed in &frame.meshes {
        assert_eq!(placed.transform, placed.item.motion.evaluate(t));
    }
    assert_eq!(frame.clouds[0].transform, scene.clouds()[0].motion.evaluate(t));
}

#[test]
fn cluster_cloud_rotation_follows_its_formula() {
    let mut gen = LayoutGenerator::seeded(2);
    let scene = SceneComposer::new(small_config(Backdrop::DataClusters), &mut gen);
    let t = 10.0_f64;
    let frame = scene.compose(t);
    let rot = frame.clouds[0].transform.rotation;
    assert!((rot.x - ((0.1 * t).sin() * 0.1) as f32).abs() < 1e-6);
    assert!((rot.y - (0.05 * t) as f32).abs() < 1e-6);
    let line_rot = frame.lines[0].transform.rotation;
    assert!((line_rot.y - ((0.1 * t).sin() * 0.2) as f32).abs() < 1e-6);
}

#[test]
fn wireframe_solids_are_static() {
    let mut gen = LayoutGenerator::seeded(2);
    let scene = SceneComposer::new(small_config(Backdrop::DataClusters), &mut gen);
    let a = scene.compose(0.0);
    let b = scene.compose(300.0);
    for (x, y) in a.meshes.iter().zip(&b.meshes) {
        assert_eq!(x.transform, y.transform);
    }
}

#[test]
fn regenerate_keeps_motion_but_moves_particles() {
    let mut gen = LayoutGenerator::seeded(5);
    let mut scene = SceneComposer::new(small_config(Backdrop::DataClusters), &mut gen);
    let before = scene.layout().particles.clone();
    let motion = scene.clouds()[0].motion.clone();
    scene.regenerate(&mut gen);
    assert_ne!(scene.layout().particles, before);
    assert_eq!(scene.clouds()[0].motion, motion);
}

#[test]
fn switching_backdrop_rebuilds_objects() {
    let mut gen = LayoutGenerator::seeded(5);
    let mut scene = SceneComposer::new(small_config(Backdrop::DataClusters), &mut gen);
    scene.set_backdrop(Backdrop::NeuralField, &mut gen);
    assert_eq!(scene.backdrop(), Backdrop::NeuralField);
    assert!(scene.lines().is_empty());
    assert_eq!(scene.clouds()[0].positions.len(), 25);
}

#[test]
fn backdrop_names_round_trip() {
    for b in Backdrop::ALL {
        assert_eq!(b.name().parse::<Backdrop>(), Ok(b));
    }
    assert_eq!("field".parse::<Backdrop>(), Ok(Backdrop::NeuralField));
    assert!("stars".parse::<Backdrop>().is_err());
}

#[test]
fn camera_projects_origin_to_screen_center() {
    let cam = Backdrop::DataClusters.camera(16.0 / 9.0);
    let (x, y, w) = cam
        .project(glam::Vec3::ZERO, 1600.0, 900.0)
        .expect("origin is in front of the camera");
    assert!((x - 800.0).abs() < 1e-2 && (y - 450.0).abs() < 1e-2);
    assert!(w > 0.0);
    assert!(cam.project(glam::Vec3::new(0.0, 0.0, 20.0), 1600.0, 900.0).is_none());
}

#[test]
fn wireframe_meshes_flatten_to_rings() {
    let mut gen = LayoutGenerator::seeded(5);
    let scene = SceneComposer::new(small_config(Backdrop::DataClusters), &mut gen);
    let instances = scene.compose(0.0).instances();
    let rings = instances.iter().filter(|i| i.ring == 1.0).count();
    assert_eq!(rings, 3);
}

struct CountingRenderer {
    frames: usize,
    sprites: usize,
}

impl FrameRenderer for CountingRenderer {
    type Error = std::convert::Infallible;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error> {
        self.frames += 1;
        self.sprites = frame.instances().len();
        Ok(())
    }
}

#[test]
fn renderer_receives_composed_frames() {
    let mut gen = LayoutGenerator::seeded(5);
    let scene = SceneComposer::new(small_config(Backdrop::NeuralField), &mut gen);
    let mut renderer = CountingRenderer { frames: 0, sprites: 0 };
    for i in 0..3 {
        let frame = scene.compose(i as f64 / 60.0);
        renderer.render(&frame).unwrap();
    }
    assert_eq!(renderer.frames, 3);
    assert_eq!(renderer.sprites, 25 + 3);
}
