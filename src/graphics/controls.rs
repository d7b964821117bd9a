//=========================================================================
// Orbit Controls
//=========================================================================
//
// Orbits a camera around a target point.
//
//   left-drag   rotate (azimuth from horizontal motion, polar from vertical)
//   wheel       dolly in / out
//
// Input is read from the StateTracker once per tick. Angular deltas are
// accumulated in spherical space and applied in `update()`; with damping
// enabled only a fraction is applied per tick and the rest decays, giving
// the inertial glide after release.
//
//=========================================================================

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::transform::Transform;
use crate::core::input::{MouseButton, StateTracker};

/// Keeps the polar angle off the poles so `look_at` stays defined.
const POLE_EPSILON: f32 = 1e-6;

//=== Spherical ===========================================================

/// Y-up spherical coordinates: `theta` around +Y from +Z, `phi` from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    theta: f32,
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius, theta: 0.0, phi: 0.0 };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi * self.theta.cos(),
        )
    }
}

//=== OrbitControls =======================================================

#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl OrbitControls {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enabled: true,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }

    /// Controls with damping on (factor 0.05).
    pub fn damped(target: Vec3) -> Self {
        Self { enable_damping: true, ..Self::new(target) }
    }

    //--- Input ------------------------------------------------------------

    /// Turns this tick's pointer and wheel input into pending deltas.
    ///
    /// `viewport_height` is in the same pixel units as the cursor.
    pub fn handle_input(&mut self, input: &StateTracker, viewport_height: f32) {
        if !self.enabled {
            return;
        }

        if input.is_button_down(MouseButton::Left) && viewport_height > 0.0 {
            let delta = input.cursor_delta() * self.rotate_speed;
            self.rotate_left(TAU * delta.x / viewport_height);
            self.rotate_up(TAU * delta.y / viewport_height);
        }

        let wheel = input.wheel_delta().y;
        if wheel != 0.0 {
            let factor = 0.95f32.powf(self.zoom_speed * wheel.abs() * 0.01);
            if wheel < 0.0 {
                self.dolly_in(factor);
            } else {
                self.dolly_out(factor);
            }
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Moves toward the target (`factor` < 1).
    pub fn dolly_in(&mut self, factor: f32) {
        self.scale *= factor;
    }

    pub fn dolly_out(&mut self, factor: f32) {
        if factor > 0.0 {
            self.scale /= factor;
        }
    }

    //--- Update -----------------------------------------------------------

    /// Applies pending deltas to `camera` and aims it at the target.
    ///
    /// Returns `true` when the camera moved.
    pub fn update(&mut self, camera: &mut Transform) -> bool {
        let before = camera.position;
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        if self.enable_damping {
            spherical.theta += self.delta_theta * self.damping_factor;
            spherical.phi += self.delta_phi * self.damping_factor;
        } else {
            spherical.theta += self.delta_theta;
            spherical.phi += self.delta_phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);

        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.look_at(self.target);

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        camera.position.distance_squared(before) > 1e-12
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
