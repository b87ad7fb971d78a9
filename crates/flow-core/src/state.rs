//! Visual-side state types shared with the hosts.
//!
//! These types avoid referencing platform-specific APIs and are suitable for
//! use on both native and web targets. The web host uses the camera to project
//! particle positions onto its canvas.

use crate::constants::SCENE_DRIFT_RAD_PER_SEC;
use glam::{Mat4, Quat, Vec2, Vec3, Vec4Swizzles};

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

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 1.2, 8.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: 45f32.to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }
}

impl Camera {
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

    /// Camera swung around the Y axis by the slow scene drift.
    pub fn with_drift(&self, elapsed: f32) -> Self {
        let yaw = Quat::from_rotation_y(elapsed * SCENE_DRIFT_RAD_PER_SEC);
        Self {
            eye: self.target + yaw * (self.eye - self.target),
            ..self.clone()
        }
    }

    /// Project a world-space point to normalized device coordinates.
    /// Returns `None` for points behind the eye.
    pub fn project(&self, view_proj: &Mat4, point: Vec3) -> Option<Vec2> {
        let clip = *view_proj * point.extend(1.0);
        if clip.w <= self.znear * 0.5 {
            return None;
        }
        Some(clip.xy() / clip.w)
    }
}
