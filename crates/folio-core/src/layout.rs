//! Randomized spatial layouts for decorative scenes.
//!
//! A [`LayoutGenerator`] owns its random source. Construct it with a seed for
//! reproducible output (tests, screenshots) or from entropy for a fresh layout
//! each session. The free functions accept any `Rng` so callers can inject
//! their own source.

use crate::constants::*;
use fnv::FnvHashMap;
use glam::Vec3;
use rand::prelude::*;

/// A named group of particles sharing a center and a color.
#[derive(Clone, Debug, PartialEq)]
pub struct Cluster {
    pub id: String,
    pub center: Vec3,
    pub color: [f32; 3],
}

impl Cluster {
    pub fn new(id: impl Into<String>, center: Vec3, color: [f32; 3]) -> Self {
        Self {
            id: id.into(),
            center,
            color,
        }
    }
}

/// The four data-domain clusters shown behind the hero section.
pub fn default_clusters() -> Vec<Cluster> {
    DEFAULT_CLUSTER_IDS
        .iter()
        .zip(DEFAULT_CLUSTER_CENTERS.iter())
        .zip(DEFAULT_CLUSTER_COLORS.iter())
        .map(|((id, center), color)| Cluster::new(*id, Vec3::from(*center), *color))
        .collect()
}

/// A point owned by exactly one cluster (`cluster` indexes `Layout::clusters`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub color: [f32; 3],
    pub cluster: usize,
}

/// A decorative edge between two random points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub start: Vec3,
    pub end: Vec3,
}

/// Parameters for a clustered layout.
///
/// - `particle_count`: exact number of particles to generate
/// - `jitter`: per-axis half-width of the cube around each cluster center
/// - `connection_count`: number of decorative edges
/// - `connection_half_extents`: edges' endpoints lie in `[-h, +h]` per axis
#[derive(Clone, Debug)]
pub struct LayoutParams {
    pub particle_count: usize,
    pub jitter: f32,
    pub connection_count: usize,
    pub connection_half_extents: Vec3,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            jitter: CLUSTER_JITTER,
            connection_count: CONNECTION_COUNT,
            connection_half_extents: CONNECTION_HALF_EXTENTS,
        }
    }
}

/// Generated, immutable scene layout. Regeneration replaces it wholesale.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub clusters: Vec<Cluster>,
    pub particles: Vec<Particle>,
    pub connections: Vec<Connection>,
}

impl Layout {
    pub fn cluster_of(&self, particle: &Particle) -> Option<&Cluster> {
        self.clusters.get(particle.cluster)
    }

    /// Number of particles assigned to each cluster id.
    pub fn membership_counts(&self) -> FnvHashMap<&str, usize> {
        let mut counts: FnvHashMap<&str, usize> = self
            .clusters
            .iter()
            .map(|c| (c.id.as_str(), 0))
            .collect();
        for p in &self.particles {
            if let Some(c) = self.clusters.get(p.cluster) {
                *counts.entry(c.id.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }
}

pub struct LayoutGenerator<R: Rng = StdRng> {
    rng: R,
}

impl LayoutGenerator<StdRng> {
    /// Reproducible generator: the same seed always yields the same layout.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Fresh layout every session.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> LayoutGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// The generator's random source, for other decorations of the same page.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn generate(&mut self, clusters: &[Cluster], params: &LayoutParams) -> Layout {
        let particles = cluster_particles(
            &mut self.rng,
            clusters,
            params.particle_count,
            params.jitter,
        );
        let connections = random_connections(
            &mut self.rng,
            params.connection_count,
            params.connection_half_extents,
        );
        log::debug!(
            "[layout] clusters={} particles={} connections={}",
            clusters.len(),
            particles.len(),
            connections.len()
        );
        Layout {
            clusters: clusters.to_vec(),
            particles,
            connections,
        }
    }

    pub fn scatter(&mut self, count: usize, half_extents: Vec3) -> Vec<Vec3> {
        scatter(&mut self.rng, count, half_extents)
    }
}

/// Assign each of `count` particles to a uniformly chosen cluster and jitter it
/// uniformly within `[-jitter, +jitter]` per axis around the cluster center.
pub fn cluster_particles<R: Rng + ?Sized>(
    rng: &mut R,
    clusters: &[Cluster],
    count: usize,
    jitter: f32,
) -> Vec<Particle> {
    if clusters.is_empty() {
        log::warn!("[layout] no clusters given; skipping {count} particles");
        return Vec::new();
    }
    let jitter = jitter.abs();
    (0..count)
        .map(|_| {
            let cluster = rng.gen_range(0..clusters.len());
            let c = &clusters[cluster];
            Particle {
                position: c.center + jitter_offset(rng, jitter),
                color: c.color,
                cluster,
            }
        })
        .collect()
}

pub fn random_connections<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    half_extents: Vec3,
) -> Vec<Connection> {
    (0..count)
        .map(|_| Connection {
            start: point_in_box(rng, half_extents),
            end: point_in_box(rng, half_extents),
        })
        .collect()
}

/// Uniform points in the axis-aligned box `[-h, +h]`.
pub fn scatter<R: Rng + ?Sized>(rng: &mut R, count: usize, half_extents: Vec3) -> Vec<Vec3> {
    (0..count).map(|_| point_in_box(rng, half_extents)).collect()
}

#[inline]
fn jitter_offset<R: Rng + ?Sized>(rng: &mut R, jitter: f32) -> Vec3 {
    point_in_box(rng, Vec3::splat(jitter))
}

#[inline]
fn point_in_box<R: Rng + ?Sized>(rng: &mut R, half: Vec3) -> Vec3 {
    let h = half.abs();
    Vec3::new(
        rng.gen_range(-h.x..=h.x),
        rng.gen_range(-h.y..=h.y),
        rng.gen_range(-h.z..=h.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_jitter_places_particles_on_centers() {
        let mut rng = StdRng::seed_from_u64(3);
        let clusters = default_clusters();
        let ps = cluster_particles(&mut rng, &clusters, 50, 0.0);
        for p in &ps {
            assert_eq!(p.position, clusters[p.cluster].center);
        }
    }

    #[test]
    fn negative_half_extents_are_treated_as_magnitudes() {
        let mut rng = StdRng::seed_from_u64(9);
        let pts = scatter(&mut rng, 100, Vec3::new(-1.0, -2.0, -3.0));
        for p in pts {
            assert!(p.x.abs() <= 1.0 && p.y.abs() <= 2.0 && p.z.abs() <= 3.0);
        }
    }
}
