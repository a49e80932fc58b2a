// Host-side tests for closed-form motion timelines.

use folio_core::*;
use glam::Vec3;
use std::f32::consts::TAU;

fn sample_times() -> impl Iterator<Item = f64> {
    (0..=4000).map(|i| i as f64 * 0.25)
}

#[test]
fn evaluate_is_deterministic() {
    let profile = MotionProfile::still(Transform::at(Vec3::new(1.0, 2.0, 3.0)))
        .with(Channel::RotationX, Oscillator::sin(0.3, 0.2))
        .with(Channel::RotationY, Oscillator::spin(0.2))
        .with(Channel::PositionY, Oscillator::sin(0.4, 0.5));
    for t in [0.0, 1.5, 37.25, 999.0] {
        let a = profile.evaluate(t);
        let b = profile.evaluate(t);
        assert_eq!(a.position.to_array().map(f32::to_bits), b.position.to_array().map(f32::to_bits));
        assert_eq!(a.rotation.to_array().map(f32::to_bits), b.rotation.to_array().map(f32::to_bits));
        assert_eq!(a.opacity.to_bits(), b.opacity.to_bits());
    }
}

#[test]
fn backdrop_motion_stays_in_range() {
    let mut gen = LayoutGenerator::seeded(1);
    for backdrop in Backdrop::ALL {
        let config = SceneConfig {
            backdrop,
            layout: LayoutParams {
                particle_count: 16,
                ..LayoutParams::default()
            },
            field_count: 16,
            ..SceneConfig::default()
        };
        let scene = SceneComposer::new(config, &mut gen);
        for t in sample_times() {
            let frame = scene.compose(t);
            let transforms = frame
                .clouds
                .iter()
                .map(|p| p.transform)
                .chain(frame.lines.iter().map(|p| p.transform))
                .chain(frame.meshes.iter().map(|p| p.transform));
            for tr in transforms {
                assert!(tr.rotation.abs().max_element() <= TAU + 1.0, "{tr:?} at {t}");
                assert!(tr.scale.min_element() >= 0.0);
                assert!((0.0..=1.0).contains(&tr.opacity));
            }
        }
    }
}

#[test]
fn spin_wraps_into_one_turn() {
    let spin = Oscillator::spin(0.05);
    for t in sample_times() {
        let v = spin.sample(t);
        assert!((0.0..TAU + 1e-4).contains(&v), "{v} at {t}");
    }
}

#[test]
fn pulse_is_zero_at_start_and_peaks_mid_period() {
    let pulse = Oscillator::looping(Wave::Pulse, 2.0, 0.5);
    assert!(pulse.sample(0.0).abs() < 1e-6);
    assert!((pulse.sample(1.0) - 0.5).abs() < 1e-6);
    assert!(pulse.sample(2.0).abs() < 1e-6);
}

#[test]
fn delay_shifts_the_loop() {
    let base = Oscillator::looping(Wave::Sin, 4.0, 1.0);
    let late = base.delayed(1.0);
    for t in [1.0, 2.5, 7.0] {
        assert!((late.sample(t) - base.sample(t - 1.0)).abs() < 1e-5);
    }
}

#[test]
fn opacity_and_scale_are_clamped() {
    let profile = MotionProfile::still(Transform::IDENTITY.with_scale(0.1))
        .with(Channel::Opacity, Oscillator::sin(1.0, 5.0))
        .with(Channel::Scale, Oscillator::sin(1.0, 2.0));
    for t in sample_times() {
        let tr = profile.evaluate(t);
        assert!((0.0..=1.0).contains(&tr.opacity));
        assert!(tr.scale.min_element() >= 0.0);
    }
}

#[test]
fn channels_on_the_same_axis_add_up() {
    let profile = MotionProfile::default()
        .with(Channel::PositionX, Oscillator::cos(0.0, 1.0))
        .with(Channel::PositionX, Oscillator::cos(0.0, 2.0));
    assert!((profile.evaluate(12.0).position.x - 3.0).abs() < 1e-6);
}

#[test]
fn still_profile_ignores_time() {
    let profile = MotionProfile::still(Transform::at(Vec3::ONE).with_opacity(0.4));
    assert!(profile.is_still());
    assert_eq!(profile.evaluate(0.0), profile.evaluate(500.0));
}
