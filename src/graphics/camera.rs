//=========================================================================
// Perspective Camera
//=========================================================================
//
// Projection parameters only. Placement is the owning node's transform,
// so a camera can be parented to a rig group (scroll page parallax).
//
//=========================================================================

use glam::Mat4;

use crate::core::viewport::Viewport;

//=== PerspectiveCamera ===================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self { fov, aspect, near, far }
    }

    /// Camera sized for `viewport`.
    pub fn for_viewport(fov: f32, viewport: &Viewport, near: f32, far: f32) -> Self {
        Self::new(fov, viewport.aspect(), near, far)
    }

    /// Tracks a resized surface.
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far)
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(50.0, 1.0, 0.1, 2000.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn aspect_follows_viewport() {
        let mut camera = PerspectiveCamera::for_viewport(75.0, &Viewport::new(800, 600, 1.0), 0.1, 100.0);
        assert!((camera.aspect - 4.0 / 3.0).abs() < 1e-6);

        camera.set_aspect(0.0);
        assert!((camera.aspect - 4.0 / 3.0).abs() < 1e-6);
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn projection_maps_near_plane_to_ndc_near() {
        let camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0);
        let clip = camera.projection_matrix().project_point3(Vec3::new(0.0, 0.0, -0.1));
        assert!(clip.z.abs() < 1e-4);

        let far = camera.projection_matrix().project_point3(Vec3::new(0.0, 0.0, -100.0));
        assert!((far.z - 1.0).abs() < 1e-3);
    }
}
