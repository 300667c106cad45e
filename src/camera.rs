//! Damped orbit camera.
//!
//! Drag and scroll input feed angular and zoom velocity; [`OrbitCamera::update`]
//! applies that velocity once per frame and then decays it by the damping
//! factor, so the view glides to a stop after the mouse is released.

use glam::{Mat4, Vec3};

pub const MIN_PITCH: f32 = -1.5;
pub const MAX_PITCH: f32 = 1.5;
pub const MIN_DISTANCE: f32 = 0.5;
pub const MAX_DISTANCE: f32 = 50.0;

const ROTATE_SPEED: f32 = 0.005;
const ZOOM_SPEED: f32 = 0.3;
/// Velocities below this snap to zero.
const REST_EPSILON: f32 = 1e-5;

/// Orbit camera looking at `target` from a yaw/pitch/distance position.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal rotation angle in radians.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of velocity shed per frame, in `(0, 1]`. 1 disables gliding.
    pub damping: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    zoom_velocity: f32,
}

impl OrbitCamera {
    /// Camera on the +z axis at `distance`, looking at the origin.
    pub fn new(distance: f32, fov_degrees: f32, damping: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.clamp(MIN_DISTANCE, MAX_DISTANCE),
            target: Vec3::ZERO,
            fov_degrees,
            near: 0.1,
            far: 100.0,
            damping: damping.clamp(f32::EPSILON, 1.0),
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            zoom_velocity: 0.0,
        }
    }

    /// Feed a mouse drag in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity -= dx * ROTATE_SPEED * self.damping;
        self.pitch_velocity += dy * ROTATE_SPEED * self.damping;
    }

    /// Feed a scroll amount in lines; positive zooms in.
    pub fn zoom(&mut self, lines: f32) {
        self.zoom_velocity -= lines * ZOOM_SPEED * self.damping;
    }

    /// Apply and decay pending velocity. Call once per frame.
    pub fn update(&mut self) {
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(MIN_PITCH, MAX_PITCH);
        self.distance = (self.distance + self.zoom_velocity).clamp(MIN_DISTANCE, MAX_DISTANCE);

        let keep = 1.0 - self.damping;
        for v in [
            &mut self.yaw_velocity,
            &mut self.pitch_velocity,
            &mut self.zoom_velocity,
        ] {
            *v *= keep;
            if v.abs() < REST_EPSILON {
                *v = 0.0;
            }
        }
    }

    /// Whether any velocity is still pending.
    pub fn is_moving(&self) -> bool {
        self.yaw_velocity != 0.0 || self.pitch_velocity != 0.0 || self.zoom_velocity != 0.0
    }

    /// Camera position in world space.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(3.0, 75.0, 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_default_looks_down_negative_z() {
        let cam = OrbitCamera::default();
        let pos = cam.position();
        assert_abs_diff_eq!(pos.x, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pos.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(pos.z, 3.0, epsilon = 1e-6);
    }

    #[test]
    fn test_damped_rotation_glides_to_rest() {
        let mut cam = OrbitCamera::default();
        cam.rotate(-100.0, 0.0);
        cam.update();
        let after_one = cam.yaw;
        assert!(after_one > 0.0);

        for _ in 0..1_000 {
            cam.update();
        }
        assert!(!cam.is_moving());
        assert!(cam.yaw > after_one);
        // Geometric series: total travel equals the injected velocity / damping.
        assert_abs_diff_eq!(cam.yaw, 100.0 * ROTATE_SPEED, epsilon = 1e-3);
    }

    #[test]
    fn test_undamped_rotation_applies_in_one_frame() {
        let mut cam = OrbitCamera::new(3.0, 75.0, 1.0);
        cam.rotate(0.0, 50.0);
        cam.update();
        assert_abs_diff_eq!(cam.pitch, 50.0 * ROTATE_SPEED, epsilon = 1e-6);
        assert!(!cam.is_moving());
    }

    #[test]
    fn test_pitch_and_distance_are_clamped() {
        let mut cam = OrbitCamera::new(3.0, 75.0, 1.0);
        cam.rotate(0.0, 10_000.0);
        cam.update();
        assert_eq!(cam.pitch, MAX_PITCH);

        cam.zoom(1_000.0);
        cam.update();
        assert_eq!(cam.distance, MIN_DISTANCE);

        cam.zoom(-1_000.0);
        cam.update();
        assert_eq!(cam.distance, MAX_DISTANCE);
    }
}
