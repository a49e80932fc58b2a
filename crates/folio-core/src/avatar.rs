//! Decorative avatar rigs.
//!
//! The site grew three alternative animated avatars. They share one shape: a
//! handful of named parts, each looping on its own timeline. Here they are one
//! parametrized [`AvatarRig`] and the caller picks an [`AvatarVariant`].
//!
//! Rig coordinates are CSS-like pixels relative to the avatar box, y down.

use crate::constants::*;
use crate::motion::{deg, Channel, MotionProfile, Oscillator, Transform, Wave};
use crate::reveal::DelayedReveal;
use crate::timers::TimerQueue;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AvatarVariant {
    /// spinning badge with blinking face, tech icons and orbiting dots
    Orbiting,
    /// photo bubble with glow, drifting sparks and a status light
    #[default]
    Floating,
    /// standing figure that walks in and asks for a job
    Figure,
}

impl AvatarVariant {
    pub const ALL: [AvatarVariant; 3] = [
        AvatarVariant::Orbiting,
        AvatarVariant::Floating,
        AvatarVariant::Figure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AvatarVariant::Orbiting => "orbiting",
            AvatarVariant::Floating => "floating",
            AvatarVariant::Figure => "figure",
        }
    }
}

impl FromStr for AvatarVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orbiting" => Ok(AvatarVariant::Orbiting),
            "floating" => Ok(AvatarVariant::Floating),
            "figure" => Ok(AvatarVariant::Figure),
            other => Err(format!("unknown avatar variant '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartKind {
    Face,
    Glow,
    Feature,
    Icon,
    Limb,
    Spark,
    Ring,
    Status,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RigPart {
    pub name: String,
    pub kind: PartKind,
    pub motion: MotionProfile,
}

impl RigPart {
    fn new(name: impl Into<String>, kind: PartKind, motion: MotionProfile) -> Self {
        Self {
            name: name.into(),
            kind,
            motion,
        }
    }
}

/// Slide-and-fade entrance applied to the whole rig.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Entrance {
    pub from_offset: Vec3,
    pub duration_sec: f64,
}

impl Entrance {
    /// Eased progress in `[0, 1]`.
    pub fn progress(&self, t: f64) -> f32 {
        if self.duration_sec <= 0.0 {
            return 1.0;
        }
        let x = (t / self.duration_sec).clamp(0.0, 1.0) as f32;
        x * x * (3.0 - 2.0 * x)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PartPose {
    pub name: String,
    pub kind: PartKind,
    pub transform: Transform,
}

#[derive(Clone, Debug)]
pub struct AvatarRig {
    pub variant: AvatarVariant,
    pub parts: Vec<RigPart>,
    pub entrance: Option<Entrance>,
}

impl AvatarRig {
    /// Build the rig for `variant`. Only the floating sparks use `rng`.
    pub fn build<R: Rng + ?Sized>(variant: AvatarVariant, rng: &mut R) -> Self {
        match variant {
            AvatarVariant::Orbiting => orbiting_rig(),
            AvatarVariant::Floating => floating_rig(rng),
            AvatarVariant::Figure => figure_rig(),
        }
    }

    pub fn part(&self, name: &str) -> Option<&RigPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Every part's transform at elapsed time `t`.
    pub fn pose(&self, t: f64) -> Vec<PartPose> {
        let (offset, fade) = match &self.entrance {
            Some(e) => {
                let p = e.progress(t);
                (e.from_offset * (1.0 - p), p)
            }
            None => (Vec3::ZERO, 1.0),
        };
        self.parts
            .iter()
            .map(|part| {
                let mut transform = part.motion.evaluate(t);
                transform.position += offset;
                transform.opacity *= fade;
                PartPose {
                    name: part.name.clone(),
                    kind: part.kind,
                    transform,
                }
            })
            .collect()
    }

    /// When the figure's speech bubble appears, measured from mount.
    pub fn speech_bubble_delay(&self) -> Option<Duration> {
        match self.variant {
            AvatarVariant::Figure => Some(Duration::from_millis(
                FIGURE_ENTRANCE_MS + SPEECH_BUBBLE_DELAY_MS,
            )),
            _ => None,
        }
    }

    pub fn schedule_speech_bubble(&self, queue: &TimerQueue) -> Option<DelayedReveal> {
        self.speech_bubble_delay()
            .map(|d| DelayedReveal::schedule(queue, d))
    }
}

/// Pointer-follow offset for the floating avatar.
#[inline]
pub fn parallax(pointer: Vec2) -> Vec2 {
    pointer * AVATAR_PARALLAX
}

fn pulse(period: f64, amplitude: f32) -> Oscillator {
    Oscillator::looping(Wave::Pulse, period, amplitude)
}

fn spin(period: f64) -> Oscillator {
    Oscillator::looping(Wave::Spin, period, 1.0)
}

fn sway(period: f64, amplitude: f32) -> Oscillator {
    Oscillator::looping(Wave::Sin, period, amplitude)
}

fn orbiting_rig() -> AvatarRig {
    let still = |x: f32, y: f32| MotionProfile::still(Transform::at(Vec3::new(x, y, 0.0)));
    let mut parts = vec![
        RigPart::new(
            "face",
            PartKind::Face,
            still(0.0, 0.0)
                .with(Channel::RotationZ, spin(10.0))
                .with(Channel::Scale, pulse(3.0, 0.1)),
        ),
        RigPart::new(
            "glow",
            PartKind::Glow,
            MotionProfile::still(Transform::IDENTITY.with_opacity(0.3))
                .with(Channel::Scale, pulse(2.0, 0.2))
                .with(Channel::Opacity, pulse(2.0, 0.3)),
        ),
        RigPart::new(
            "eye-left",
            PartKind::Feature,
            still(-12.0, -8.0).with(Channel::ScaleY, pulse(3.0, -0.9)),
        ),
        RigPart::new(
            "eye-right",
            PartKind::Feature,
            still(12.0, -8.0).with(Channel::ScaleY, pulse(3.0, -0.9).delayed(0.1)),
        ),
        RigPart::new(
            "smile",
            PartKind::Feature,
            still(0.0, 10.0).with(Channel::ScaleX, pulse(2.0, 0.2)),
        ),
        RigPart::new(
            "icon-code",
            PartKind::Icon,
            MotionProfile::still(Transform::at(Vec3::new(36.0, -36.0, 0.0)).with_scale(0.8))
                .with(Channel::RotationZ, spin(4.0))
                .with(Channel::Scale, pulse(4.0, 0.4)),
        ),
        RigPart::new(
            "icon-zap",
            PartKind::Icon,
            MotionProfile::still(Transform::at(Vec3::new(-36.0, 36.0, 0.0)).with_scale(0.8))
                .with(Channel::RotationZ, reversed(spin(4.0)).delayed(2.0))
                .with(Channel::Scale, pulse(4.0, 0.4).delayed(2.0)),
        ),
        RigPart::new(
            "ring",
            PartKind::Ring,
            MotionProfile::still(Transform::IDENTITY.with_opacity(0.2))
                .with(Channel::Scale, pulse(2.0, 0.1))
                .with(Channel::Opacity, pulse(2.0, 0.6)),
        ),
    ];
    for i in 0..8 {
        let radius = 40.0 + 5.0 * i as f32;
        let period = 5.0 + 0.5 * i as f64;
        let delay = 0.2 * i as f64;
        parts.push(RigPart::new(
            format!("orbit-{i}"),
            PartKind::Spark,
            MotionProfile::default()
                .with(
                    Channel::PositionX,
                    Oscillator::looping(Wave::Cos, period, radius).delayed(delay),
                )
                .with(
                    Channel::PositionY,
                    Oscillator::looping(Wave::Sin, period, radius).delayed(delay),
                ),
        ));
    }
    AvatarRig {
        variant: AvatarVariant::Orbiting,
        parts,
        entrance: None,
    }
}

fn floating_rig<R: Rng + ?Sized>(rng: &mut R) -> AvatarRig {
    let mut parts = vec![
        RigPart::new(
            "glow",
            PartKind::Glow,
            MotionProfile::default()
                .with(Channel::Scale, pulse(8.0, 0.2))
                .with(Channel::RotationZ, spin(8.0)),
        ),
        RigPart::new("photo", PartKind::Face, MotionProfile::default()),
        RigPart::new(
            "status",
            PartKind::Status,
            MotionProfile::still(Transform::at(Vec3::new(52.0, 52.0, 0.0)))
                .with(Channel::Scale, pulse(2.0, 0.2)),
        ),
    ];
    for i in 0..6 {
        let start = Vec3::new(rng.gen_range(0.0..140.0), rng.gen_range(0.0..140.0), 0.0);
        let delay = 0.5 * i as f64;
        parts.push(RigPart::new(
            format!("spark-{i}"),
            PartKind::Spark,
            MotionProfile::still(Transform {
                opacity: 0.0,
                ..Transform::at(start).with_scale(0.0)
            })
            .with(Channel::Opacity, pulse(3.0, 1.0).delayed(delay))
            .with(Channel::Scale, pulse(3.0, 1.0).delayed(delay)),
        ));
    }
    AvatarRig {
        variant: AvatarVariant::Floating,
        parts,
        entrance: None,
    }
}

fn figure_rig() -> AvatarRig {
    let at = |x: f32, y: f32| MotionProfile::still(Transform::at(Vec3::new(x, y, 0.0)));
    let mut parts = vec![
        RigPart::new(
            "figure",
            PartKind::Face,
            MotionProfile::default()
                .with(Channel::PositionY, pulse(2.0, -20.0))
                .with(Channel::RotationZ, sway(3.0, deg(5.0))),
        ),
        RigPart::new(
            "head",
            PartKind::Face,
            at(0.0, -40.0).with(Channel::Scale, pulse(2.0, 0.05)),
        ),
        RigPart::new(
            "body",
            PartKind::Feature,
            at(0.0, 0.0).with(Channel::ScaleY, pulse(2.5, 0.02)),
        ),
        RigPart::new(
            "leg-left",
            PartKind::Limb,
            at(-8.0, 40.0).with(Channel::RotationZ, sway(3.0, deg(2.0))),
        ),
        RigPart::new(
            "leg-right",
            PartKind::Limb,
            at(8.0, 40.0).with(Channel::RotationZ, sway(3.0, deg(-2.0)).delayed(0.5)),
        ),
        RigPart::new(
            "arm-briefcase",
            PartKind::Limb,
            at(-24.0, 0.0).with(Channel::RotationZ, sway(2.0, deg(-10.0))),
        ),
        RigPart::new(
            "arm-resume",
            PartKind::Limb,
            at(24.0, 0.0).with(Channel::RotationZ, sway(2.0, deg(10.0)).delayed(1.0)),
        ),
    ];
    for i in 0..6 {
        let period = 3.0 + 0.5 * i as f64;
        let delay = 0.3 * i as f64;
        parts.push(RigPart::new(
            format!("spark-{i}"),
            PartKind::Spark,
            MotionProfile::still(Transform {
                opacity: 0.3,
                ..Transform::at(Vec3::new(20.0 + 10.0 * i as f32, 10.0 + 5.0 * i as f32, 0.0))
            })
            .with(Channel::PositionX, sway(period, 20.0).delayed(delay))
            .with(Channel::PositionY, sway(period, -30.0).delayed(delay))
            .with(Channel::Opacity, pulse(period, 0.7).delayed(delay)),
        ));
    }
    AvatarRig {
        variant: AvatarVariant::Figure,
        parts,
        entrance: Some(Entrance {
            from_offset: Vec3::new(-200.0, 100.0, 0.0),
            duration_sec: FIGURE_ENTRANCE_MS as f64 / 1000.0,
        }),
    }
}

fn reversed(mut osc: Oscillator) -> Oscillator {
    osc.rate = -osc.rate;
    osc
}

/// What fills the avatar bubble.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AvatarFace {
    Photo(String),
    /// generated stand-in showing the owner's initials
    Placeholder(String),
}

/// Photo with a generated fallback when the image cannot be loaded.
#[derive(Clone, Debug)]
pub struct AvatarImage {
    photo: Option<String>,
    initials: String,
    failed: bool,
}

impl AvatarImage {
    pub fn new(photo: Option<String>, initials: impl Into<String>) -> Self {
        Self {
            photo,
            initials: initials.into(),
            failed: false,
        }
    }

    /// Called by the front end when the photo fails to load.
    pub fn mark_failed(&mut self) {
        if !self.failed {
            log::warn!("[avatar] photo failed to load; using placeholder");
        }
        self.failed = true;
    }

    pub fn face(&self) -> AvatarFace {
        match (&self.photo, self.failed) {
            (Some(url), false) => AvatarFace::Photo(url.clone()),
            _ => AvatarFace::Placeholder(self.initials.clone()),
        }
    }

    /// Rig shown inside the bubble once the photo is unavailable.
    pub fn fallback_variant(&self) -> AvatarVariant {
        AvatarVariant::Orbiting
    }
}

/// A mounted avatar: the selected rig, its photo and the figure's speech
/// bubble.
///
/// A photo that fails to load swaps the rig for the image's fallback variant
/// and drops any pending bubble.
pub struct AvatarStage {
    rig: AvatarRig,
    image: AvatarImage,
    speech: Option<DelayedReveal>,
}

impl AvatarStage {
    pub fn mount<R: Rng + ?Sized>(
        variant: AvatarVariant,
        image: AvatarImage,
        queue: &TimerQueue,
        rng: &mut R,
    ) -> Self {
        let rig = AvatarRig::build(variant, rng);
        let speech = rig.schedule_speech_bubble(queue);
        log::info!("[avatar] mounted {} rig", variant.name());
        Self { rig, image, speech }
    }

    pub fn variant(&self) -> AvatarVariant {
        self.rig.variant
    }

    pub fn rig(&self) -> &AvatarRig {
        &self.rig
    }

    pub fn face(&self) -> AvatarFace {
        self.image.face()
    }

    pub fn pose(&self, t: f64) -> Vec<PartPose> {
        self.rig.pose(t)
    }

    pub fn speech_visible(&self) -> bool {
        self.speech.as_ref().is_some_and(DelayedReveal::is_revealed)
    }

    pub fn photo_failed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.image.mark_failed();
        let fallback = self.image.fallback_variant();
        if self.rig.variant != fallback {
            self.rig = AvatarRig::build(fallback, rng);
            self.speech = None;
        }
    }
}
