// Host-side tests for the layout generator.

use folio_core::*;
use glam::Vec3;

fn small_params(count: usize) -> LayoutParams {
    LayoutParams {
        particle_count: count,
        ..LayoutParams::default()
    }
}

#[test]
fn generates_exact_particle_count() {
    let mut gen = LayoutGenerator::seeded(7);
    let layout = gen.generate(&default_clusters(), &LayoutParams::default());
    assert_eq!(layout.particles.len(), PARTICLE_COUNT);
    assert_eq!(layout.connections.len(), CONNECTION_COUNT);
}

#[test]
fn particles_stay_within_jitter_of_their_cluster() {
    let mut gen = LayoutGenerator::seeded(11);
    let layout = gen.generate(&default_clusters(), &LayoutParams::default());
    for p in &layout.particles {
        let c = layout.cluster_of(p).expect("particle cluster index in range");
        let d = (p.position - c.center).abs();
        assert!(
            d.max_element() <= CLUSTER_JITTER + 1e-5,
            "particle {:?} too far from {:?}",
            p.position,
            c.center
        );
        assert_eq!(p.color, c.color);
    }
}

#[test]
fn every_cluster_gets_members_when_count_is_large() {
    let mut gen = LayoutGenerator::seeded(3);
    let layout = gen.generate(&default_clusters(), &LayoutParams::default());
    let counts = layout.membership_counts();
    for id in DEFAULT_CLUSTER_IDS {
        assert!(counts.get(id).copied().unwrap_or(0) > 0, "cluster {id} is empty");
    }
    assert_eq!(counts.values().sum::<usize>(), PARTICLE_COUNT);
}

#[test]
fn same_seed_same_layout() {
    let a = LayoutGenerator::seeded(42).generate(&default_clusters(), &small_params(64));
    let b = LayoutGenerator::seeded(42).generate(&default_clusters(), &small_params(64));
    assert_eq!(a.particles, b.particles);
    assert_eq!(a.connections, b.connections);
}

#[test]
fn different_seeds_differ() {
    let a = LayoutGenerator::seeded(1).generate(&default_clusters(), &small_params(64));
    let b = LayoutGenerator::seeded(2).generate(&default_clusters(), &small_params(64));
    assert_ne!(a.particles, b.particles);
}

#[test]
fn no_clusters_means_no_particles() {
    let layout = LayoutGenerator::seeded(5).generate(&[], &small_params(100));
    assert!(layout.particles.is_empty());
    assert_eq!(layout.connections.len(), CONNECTION_COUNT);
}

#[test]
fn zero_count_is_empty() {
    let layout = LayoutGenerator::seeded(5).generate(&default_clusters(), &small_params(0));
    assert!(layout.particles.is_empty());
}

#[test]
fn connections_lie_inside_their_box() {
    let half = Vec3::new(4.0, 2.0, 2.0);
    let layout = LayoutGenerator::seeded(9).generate(&default_clusters(), &LayoutParams::default());
    for c in &layout.connections {
        for p in [c.start, c.end] {
            assert!(p.abs().cmple(half).all(), "{p:?} outside {half:?}");
        }
    }
}

#[test]
fn scatter_fills_the_field() {
    let mut gen = LayoutGenerator::seeded(13);
    let points = gen.scatter(FIELD_POINT_COUNT, Vec3::splat(FIELD_HALF_EXTENT));
    assert_eq!(points.len(), FIELD_POINT_COUNT);
    assert!(points
        .iter()
        .all(|p| p.abs().max_element() <= FIELD_HALF_EXTENT));
}

#[test]
fn custom_clusters_are_respected() {
    let clusters = vec![
        Cluster::new("a", Vec3::new(10.0, 0.0, 0.0), [1.0, 0.0, 0.0]),
        Cluster::new("b", Vec3::new(-10.0, 0.0, 0.0), [0.0, 0.0, 1.0]),
    ];
    let layout = LayoutGenerator::seeded(21).generate(
        &clusters,
        &LayoutParams {
            particle_count: 200,
            jitter: 0.5,
            ..LayoutParams::default()
        },
    );
    for p in &layout.particles {
        assert!(p.position.x.abs() >= 9.5 - 1e-5);
    }
    assert_eq!(layout.membership_counts().len(), 2);
}

#[test]
fn generator_rng_drives_other_page_decorations() {
    let mut a = LayoutGenerator::seeded(5);
    let mut b = LayoutGenerator::seeded(5);
    let rig_a = AvatarRig::build(AvatarVariant::Floating, a.rng_mut());
    let rig_b = AvatarRig::build(AvatarVariant::Floating, b.rng_mut());
    assert_eq!(rig_a.parts, rig_b.parts);
}
