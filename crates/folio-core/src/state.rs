//! Per-frame view state shared by the native and web front ends.
//!
//! These types avoid platform APIs; `instant` gives the same monotonic clock
//! on desktop and in the browser.

use glam::{Mat4, Vec3, Vec4};
use instant::Instant;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera on the +Z axis looking at the origin.
    pub fn looking_at_origin(distance: f32, fovy_degrees: f32, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: fovy_degrees.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to pixel coordinates (y down) plus its clip `w`.
    ///
    /// Returns `None` for points behind the camera.
    pub fn project(&self, world: Vec3, width: f32, height: f32) -> Option<(f32, f32, f32)> {
        let clip = self.view_proj() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w <= 1e-5 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let sx = (ndc.x * 0.5 + 0.5) * width;
        let sy = (1.0 - (ndc.y * 0.5 + 0.5)) * height;
        Some((sx, sy, clip.w))
    }
}

/// Monotonic clock read once per frame.
///
/// All transforms of a frame are computed from one [`snapshot`](Self::snapshot)
/// so no object sees a partially advanced time.
#[derive(Clone, Copy, Debug)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
        }
    }

    /// Elapsed seconds since start and the delta since the previous snapshot.
    pub fn snapshot(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        FrameTime {
            elapsed_sec: (now - self.start).as_secs_f64(),
            dt,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    pub elapsed_sec: f64,
    pub dt: std::time::Duration,
}
