//! Closed-form motion timelines.
//!
//! Every animated property is a pure function of elapsed time and a few static
//! constants. Nothing here keeps state between frames, so any instant can be
//! recomputed (scrubbing, replay, tests) and two objects only move in lockstep
//! if they share rate and phase.

use glam::Vec3;
use smallvec::SmallVec;
use std::f64::consts::TAU;

/// Periodic shape of an [`Oscillator`]. Every kind is bounded for any input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wave {
    /// `amp * sin(θ)` in `[-amp, amp]`
    Sin,
    /// `amp * cos(θ)` in `[-amp, amp]`
    Cos,
    /// `amp * (θ mod 2π)` in `[0, 2π·amp)`; continuous rotation
    Spin,
    /// `amp * (1 - cos θ) / 2` in `[0, amp]`; a smooth there-and-back loop
    Pulse,
}

/// One periodic signal: `θ = rate * t + phase`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillator {
    pub wave: Wave,
    /// angular rate in radians per second
    pub rate: f64,
    /// phase offset in radians
    pub phase: f64,
    pub amplitude: f32,
}

impl Oscillator {
    pub const fn new(wave: Wave, rate: f64, amplitude: f32) -> Self {
        Self {
            wave,
            rate,
            phase: 0.0,
            amplitude,
        }
    }

    pub const fn sin(rate: f64, amplitude: f32) -> Self {
        Self::new(Wave::Sin, rate, amplitude)
    }

    pub const fn cos(rate: f64, amplitude: f32) -> Self {
        Self::new(Wave::Cos, rate, amplitude)
    }

    /// Continuous rotation at `rate` rad/s.
    pub const fn spin(rate: f64) -> Self {
        Self::new(Wave::Spin, rate, 1.0)
    }

    /// A loop that completes one full cycle every `period_sec`.
    pub fn looping(wave: Wave, period_sec: f64, amplitude: f32) -> Self {
        let rate = if period_sec > 0.0 { TAU / period_sec } else { 0.0 };
        Self::new(wave, rate, amplitude)
    }

    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = phase;
        self
    }

    /// Shift the loop so it starts `delay_sec` later than an undelayed twin.
    pub fn delayed(mut self, delay_sec: f64) -> Self {
        self.phase -= self.rate * delay_sec;
        self
    }

    #[inline]
    pub fn sample(&self, t: f64) -> f32 {
        let theta = self.rate * t + self.phase;
        let unit = match self.wave {
            Wave::Sin => theta.sin(),
            Wave::Cos => theta.cos(),
            Wave::Spin => theta.rem_euclid(TAU),
            Wave::Pulse => 0.5 * (1.0 - theta.cos()),
        };
        (unit * self.amplitude as f64) as f32
    }
}

/// Animatable property of a transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    RotationX,
    RotationY,
    RotationZ,
    PositionX,
    PositionY,
    PositionZ,
    Scale,
    ScaleX,
    ScaleY,
    Opacity,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians (XYZ order)
    pub rotation: Vec3,
    /// per-axis scale; z follows the uniform scale channel only
    pub scale: Vec3,
    pub opacity: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
        opacity: 1.0,
    };

    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    pub fn matrix(&self) -> glam::Mat4 {
        let rot = glam::Quat::from_euler(
            glam::EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        glam::Mat4::from_scale_rotation_translation(self.scale, rot, self.position)
    }
}

/// Base transform plus the oscillators layered on top of it.
///
/// Oscillators on the same channel add up; channels never read each other.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MotionProfile {
    pub base: Transform,
    pub channels: SmallVec<[(Channel, Oscillator); 4]>,
}

impl MotionProfile {
    pub fn still(base: Transform) -> Self {
        Self {
            base,
            channels: SmallVec::new(),
        }
    }

    pub fn with(mut self, channel: Channel, osc: Oscillator) -> Self {
        self.channels.push((channel, osc));
        self
    }

    pub fn is_still(&self) -> bool {
        self.channels.is_empty()
    }

    /// Transform at elapsed time `t` (seconds).
    ///
    /// Scale components are clamped to be non-negative and opacity to
    /// `[0, 1]`; rotations are bounded by the oscillators' ranges.
    pub fn evaluate(&self, t: f64) -> Transform {
        let mut out = self.base;
        let mut uniform = 0.0_f32;
        for (channel, osc) in &self.channels {
            let v = osc.sample(t);
            match channel {
                Channel::RotationX => out.rotation.x += v,
                Channel::RotationY => out.rotation.y += v,
                Channel::RotationZ => out.rotation.z += v,
                Channel::PositionX => out.position.x += v,
                Channel::PositionY => out.position.y += v,
                Channel::PositionZ => out.position.z += v,
                Channel::Scale => uniform += v,
                Channel::ScaleX => out.scale.x += v,
                Channel::ScaleY => out.scale.y += v,
                Channel::Opacity => out.opacity += v,
            }
        }
        out.scale = (out.scale + Vec3::splat(uniform)).max(Vec3::ZERO);
        out.opacity = out.opacity.clamp(0.0, 1.0);
        out
    }
}

#[inline]
pub fn deg(degrees: f32) -> f32 {
    degrees.to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delayed_loop_lags_its_twin() {
        let a = Oscillator::looping(Wave::Pulse, 2.0, 1.0);
        let b = a.delayed(0.5);
        assert!((a.sample(1.0) - b.sample(1.5)).abs() < 1e-6);
    }

    #[test]
    fn zero_period_is_static() {
        let o = Oscillator::looping(Wave::Sin, 0.0, 3.0);
        assert_eq!(o.sample(0.0), 0.0);
        assert_eq!(o.sample(123.0), 0.0);
    }
}
