//! Scene composition: cached layouts + per-tick motion → one renderable frame.
//!
//! A [`SceneComposer`] generates its layout once (or on explicit
//! regeneration) and, on every render tick, evaluates each object's motion
//! profile at the same elapsed time. The resulting [`Frame`] borrows the
//! cached geometry, so composing allocates only the small object lists.

use crate::constants::*;
use crate::layout::{default_clusters, Connection, Layout, LayoutGenerator, LayoutParams};
use crate::motion::{Channel, MotionProfile, Oscillator, Transform};
use crate::state::Camera;
use glam::Vec3;
use rand::Rng;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Icosahedron,
    Octahedron,
    Dodecahedron,
    Torus,
}

/// Named decorative mesh with a base position and a motion profile.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingShape {
    pub name: &'static str,
    pub kind: ShapeKind,
    /// bounding radius in world units
    pub size: f32,
    pub color: [f32; 3],
    pub opacity: f32,
    pub wireframe: bool,
    pub motion: MotionProfile,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PointColors {
    Uniform([f32; 3]),
    PerPoint(Vec<[f32; 3]>),
}

impl PointColors {
    pub fn get(&self, index: usize) -> [f32; 3] {
        match self {
            PointColors::Uniform(c) => *c,
            PointColors::PerPoint(cs) => cs.get(index).copied().unwrap_or([1.0; 3]),
        }
    }
}

/// Point primitive group rotated as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: PointColors,
    pub sprite_size: f32,
    pub opacity: f32,
    pub motion: MotionProfile,
}

/// Line primitive group rotated as a whole.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSet {
    pub segments: Vec<Connection>,
    pub color: [f32; 3],
    pub opacity: f32,
    pub motion: MotionProfile,
}

/// Which decorative background to compose.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Backdrop {
    /// clustered data domains, random connections, wireframe solids
    #[default]
    DataClusters,
    /// uniform neural field with three drifting solids
    NeuralField,
}

impl Backdrop {
    pub const ALL: [Backdrop; 2] = [Backdrop::DataClusters, Backdrop::NeuralField];

    pub fn name(self) -> &'static str {
        match self {
            Backdrop::DataClusters => "data-clusters",
            Backdrop::NeuralField => "neural-field",
        }
    }

    pub fn camera(self, aspect: f32) -> Camera {
        match self {
            Backdrop::DataClusters => {
                Camera::looking_at_origin(CAMERA_Z_CLUSTERS, CAMERA_FOV_CLUSTERS_DEG, aspect)
            }
            Backdrop::NeuralField => {
                Camera::looking_at_origin(CAMERA_Z_FIELD, CAMERA_FOV_FIELD_DEG, aspect)
            }
        }
    }
}

impl FromStr for Backdrop {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "data-clusters" | "clusters" => Ok(Backdrop::DataClusters),
            "neural-field" | "field" => Ok(Backdrop::NeuralField),
            other => Err(format!("unknown backdrop '{other}'")),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub backdrop: Backdrop,
    pub layout: LayoutParams,
    pub field_count: usize,
    pub field_half_extent: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            backdrop: Backdrop::default(),
            layout: LayoutParams::default(),
            field_count: FIELD_POINT_COUNT,
            field_half_extent: FIELD_HALF_EXTENT,
        }
    }
}

pub struct SceneComposer {
    config: SceneConfig,
    layout: Layout,
    clouds: Vec<PointCloud>,
    lines: Vec<LineSet>,
    shapes: Vec<FloatingShape>,
}

impl SceneComposer {
    pub fn new<R: Rng>(config: SceneConfig, generator: &mut LayoutGenerator<R>) -> Self {
        let mut composer = Self {
            config,
            layout: Layout::default(),
            clouds: Vec::new(),
            lines: Vec::new(),
            shapes: Vec::new(),
        };
        composer.regenerate(generator);
        composer
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn backdrop(&self) -> Backdrop {
        self.config.backdrop
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn clouds(&self) -> &[PointCloud] {
        &self.clouds
    }

    pub fn lines(&self) -> &[LineSet] {
        &self.lines
    }

    pub fn shapes(&self) -> &[FloatingShape] {
        &self.shapes
    }

    /// Replace every generated object. Motion timelines are unaffected.
    pub fn regenerate<R: Rng>(&mut self, generator: &mut LayoutGenerator<R>) {
        self.clouds.clear();
        self.lines.clear();
        match self.config.backdrop {
            Backdrop::DataClusters => {
                self.layout = generator.generate(&default_clusters(), &self.config.layout);
                self.clouds.push(PointCloud {
                    positions: self.layout.particles.iter().map(|p| p.position).collect(),
                    colors: PointColors::PerPoint(
                        self.layout.particles.iter().map(|p| p.color).collect(),
                    ),
                    sprite_size: PARTICLE_SPRITE_SIZE,
                    opacity: 1.0,
                    motion: MotionProfile::default()
                        .with(Channel::RotationX, Oscillator::sin(0.1, 0.1))
                        .with(Channel::RotationY, Oscillator::spin(0.05)),
                });
                self.lines.push(LineSet {
                    segments: self.layout.connections.clone(),
                    color: INDIGO,
                    opacity: CONNECTION_OPACITY,
                    motion: MotionProfile::default()
                        .with(Channel::RotationY, Oscillator::sin(0.1, 0.2)),
                });
                self.shapes = wireframe_solids();
            }
            Backdrop::NeuralField => {
                self.layout = Layout::default();
                let half = Vec3::splat(self.config.field_half_extent);
                self.clouds.push(PointCloud {
                    positions: generator.scatter(self.config.field_count, half),
                    colors: PointColors::Uniform(SKY),
                    sprite_size: FIELD_SPRITE_SIZE,
                    opacity: 1.0,
                    motion: MotionProfile::default()
                        .with(Channel::RotationX, Oscillator::spin(0.05))
                        .with(Channel::RotationY, Oscillator::spin(0.03)),
                });
                self.shapes = drifting_solids();
            }
        }
        log::debug!(
            "[scene] {} regenerated: clouds={} lines={} shapes={}",
            self.config.backdrop.name(),
            self.clouds.len(),
            self.lines.len(),
            self.shapes.len()
        );
    }

    /// Switch backdrop and regenerate for it.
    pub fn set_backdrop<R: Rng>(&mut self, backdrop: Backdrop, generator: &mut LayoutGenerator<R>) {
        self.config.backdrop = backdrop;
        self.regenerate(generator);
    }

    /// Frame at `elapsed_sec`; every object sees the same instant.
    pub fn compose(&self, elapsed_sec: f64) -> Frame<'_> {
        Frame {
            elapsed_sec,
            clouds: self
                .clouds
                .iter()
                .map(|cloud| Placed {
                    item: cloud,
                    transform: cloud.motion.evaluate(elapsed_sec),
                })
                .collect(),
            lines: self
                .lines
                .iter()
                .map(|set| Placed {
                    item: set,
                    transform: set.motion.evaluate(elapsed_sec),
                })
                .collect(),
            meshes: self
                .shapes
                .iter()
                .map(|shape| Placed {
                    item: shape,
                    transform: shape.motion.evaluate(elapsed_sec),
                })
                .collect(),
        }
    }
}

fn wireframe_solids() -> Vec<FloatingShape> {
    let solid = |name: &'static str,
                 kind: ShapeKind,
                 pos: [f32; 3],
                 size: f32,
                 color: [f32; 3],
                 opacity: f32| FloatingShape {
        name,
        kind,
        size,
        color,
        opacity,
        wireframe: true,
        motion: MotionProfile::still(Transform::at(Vec3::from(pos))),
    };
    vec![
        solid("icosahedron", ShapeKind::Icosahedron, [3.0, 2.0, -2.0], 0.3, INDIGO, 0.6),
        solid("octahedron", ShapeKind::Octahedron, [-3.0, -1.0, 1.0], 0.4, VIOLET, 0.5),
        solid("dodecahedron", ShapeKind::Dodecahedron, [0.0, 2.0, -3.0], 0.35, PINK, 0.4),
    ]
}

// Each animated axis replaces its base coordinate, so the base is zero there.
fn drifting_solids() -> Vec<FloatingShape> {
    let solid = |name: &'static str, kind: ShapeKind, pos: [f32; 3], size: f32| FloatingShape {
        name,
        kind,
        size,
        color: SKY,
        opacity: 0.6,
        wireframe: false,
        motion: MotionProfile::still(Transform::at(Vec3::from(pos))),
    };
    let mut ico = solid("icosahedron", ShapeKind::Icosahedron, [-3.0, 0.0, -2.0], 0.8);
    ico.motion = ico
        .motion
        .with(Channel::RotationX, Oscillator::sin(0.3, 0.2))
        .with(Channel::RotationY, Oscillator::spin(0.2))
        .with(Channel::PositionY, Oscillator::sin(0.4, 0.5));
    let mut torus = solid("torus", ShapeKind::Torus, [0.0, -1.0, -1.0], 0.85);
    torus.motion = torus
        .motion
        .with(Channel::RotationX, Oscillator::spin(0.15))
        .with(Channel::RotationZ, Oscillator::sin(0.25, 0.3))
        .with(Channel::PositionX, Oscillator::sin(0.3, 2.0));
    let mut octa = solid("octahedron", ShapeKind::Octahedron, [0.0, 2.0, 0.0], 0.7);
    octa.motion = octa
        .motion
        .with(Channel::RotationY, Oscillator::spin(0.25))
        .with(Channel::RotationZ, Oscillator::cos(0.2, 0.2))
        .with(Channel::PositionZ, Oscillator::cos(0.35, 1.5));
    vec![ico, torus, octa]
}

/// An object placed in the frame with its transform for this tick.
#[derive(Clone, Copy, Debug)]
pub struct Placed<'a, T> {
    pub item: &'a T,
    pub transform: Transform,
}

#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pub elapsed_sec: f64,
    pub clouds: Vec<Placed<'a, PointCloud>>,
    pub lines: Vec<Placed<'a, LineSet>>,
    pub meshes: Vec<Placed<'a, FloatingShape>>,
}

/// One world-space sprite; shared vertex layout for both renderers.
///
/// `ring` is 1.0 for outlined sprites (wireframe solids), 0.0 for filled dots.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceData {
    pub pos: [f32; 3],
    pub size: f32,
    pub color: [f32; 4],
    pub ring: f32,
}

impl<'a> Frame<'a> {
    pub fn object_count(&self) -> usize {
        self.clouds.len() + self.lines.len() + self.meshes.len()
    }

    pub fn sprite_count(&self) -> usize {
        let points: usize = self.clouds.iter().map(|c| c.item.positions.len()).sum();
        let dots: usize = self
            .lines
            .iter()
            .map(|l| l.item.segments.len() * CONNECTION_SAMPLES)
            .sum();
        points + dots + self.meshes.len()
    }

    /// Flatten the frame into world-space sprites.
    ///
    /// Line segments become runs of evenly spaced dots.
    pub fn instances(&self) -> Vec<InstanceData> {
        let mut out = Vec::with_capacity(self.sprite_count());
        for placed in &self.clouds {
            let m = placed.transform.matrix();
            let alpha = placed.item.opacity * placed.transform.opacity;
            for (i, p) in placed.item.positions.iter().enumerate() {
                let [r, g, b] = placed.item.colors.get(i);
                out.push(InstanceData {
                    pos: m.transform_point3(*p).to_array(),
                    size: placed.item.sprite_size,
                    color: [r, g, b, alpha],
                    ring: 0.0,
                });
            }
        }
        for placed in &self.lines {
            let m = placed.transform.matrix();
            let [r, g, b] = placed.item.color;
            let alpha = placed.item.opacity * placed.transform.opacity;
            for seg in &placed.item.segments {
                for s in 0..CONNECTION_SAMPLES {
                    let f = s as f32 / (CONNECTION_SAMPLES - 1).max(1) as f32;
                    out.push(InstanceData {
                        pos: m.transform_point3(seg.start.lerp(seg.end, f)).to_array(),
                        size: CONNECTION_SPRITE_SIZE,
                        color: [r, g, b, alpha],
                        ring: 0.0,
                    });
                }
            }
        }
        for placed in &self.meshes {
            let shape = placed.item;
            let [r, g, b] = shape.color;
            out.push(InstanceData {
                pos: placed.transform.position.to_array(),
                size: shape.size * 2.0 * placed.transform.scale.max_element(),
                color: [r, g, b, shape.opacity * placed.transform.opacity],
                ring: if shape.wireframe { 1.0 } else { 0.0 },
            });
        }
        out
    }
}

/// External rendering collaborator fed by the composer once per tick.
pub trait FrameRenderer {
    type Error;

    fn render(&mut self, frame: &Frame<'_>) -> Result<(), Self::Error>;
}
