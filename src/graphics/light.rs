//=========================================================================
// Lights & Shadows
//=========================================================================
//
// Light descriptors. Position and orientation come from the owning node's
// transform; directional and spot lights aim at an explicit target point.
//
// Shadow casting is opt-in per light and only meaningful for directional,
// point and spot lights. Each caster renders a depth map from its shadow
// camera before the main pass.
//
//=========================================================================

use glam::Vec3;

use super::color::Color;

//=== ShadowCamera ========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShadowCamera {
    /// Box-shaped volume for directional lights.
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
        near: f32,
        far: f32,
    },
    /// Frustum for spot lights (fov in degrees) and the six faces of a
    /// point light cube map.
    Perspective { fov: f32, near: f32, far: f32 },
}

impl ShadowCamera {
    pub fn near(&self) -> f32 {
        match *self {
            Self::Orthographic { near, .. } | Self::Perspective { near, .. } => near,
        }
    }

    pub fn far(&self) -> f32 {
        match *self {
            Self::Orthographic { far, .. } | Self::Perspective { far, .. } => far,
        }
    }

    pub fn set_far(&mut self, value: f32) {
        match self {
            Self::Orthographic { far, .. } | Self::Perspective { far, .. } => *far = value,
        }
    }

    pub fn set_near(&mut self, value: f32) {
        match self {
            Self::Orthographic { near, .. } | Self::Perspective { near, .. } => *near = value,
        }
    }

    /// Symmetric orthographic bounds.
    pub fn set_extent(&mut self, half: f32) {
        if let Self::Orthographic { left, right, top, bottom, .. } = self {
            *left = -half;
            *right = half;
            *top = half;
            *bottom = -half;
        }
    }
}

//=== Shadow ==============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    /// Square depth map resolution.
    pub map_size: u32,
    pub camera: ShadowCamera,
}

//=== LightKind ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Ambient,
    Directional { target: Vec3 },
    Hemisphere { ground_color: Color },
    Point { distance: f32, decay: f32 },
    RectArea { width: f32, height: f32 },
    Spot { distance: f32, angle: f32, penumbra: f32, decay: f32, target: Vec3 },
}

//=== Light ===============================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub color: Color,
    pub intensity: f32,
    pub shadow: Option<Shadow>,
}

const DEFAULT_SHADOW_MAP: u32 = 512;

impl Light {
    fn new(kind: LightKind, color: Color, intensity: f32) -> Self {
        Self { kind, color, intensity, shadow: None }
    }

    pub fn ambient(color: Color, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    /// Sun-like light shining from the node position toward the origin.
    pub fn directional(color: Color, intensity: f32) -> Self {
        Self::new(LightKind::Directional { target: Vec3::ZERO }, color, intensity)
    }

    pub fn hemisphere(sky: Color, ground: Color, intensity: f32) -> Self {
        Self::new(LightKind::Hemisphere { ground_color: ground }, sky, intensity)
    }

    /// `distance` 0 means unlimited range.
    pub fn point(color: Color, intensity: f32, distance: f32, decay: f32) -> Self {
        Self::new(LightKind::Point { distance, decay }, color, intensity)
    }

    pub fn rect_area(color: Color, intensity: f32, width: f32, height: f32) -> Self {
        Self::new(LightKind::RectArea { width, height }, color, intensity)
    }

    /// `angle` is the cone half-angle in radians.
    pub fn spot(color: Color, intensity: f32, distance: f32, angle: f32, penumbra: f32, decay: f32) -> Self {
        Self::new(
            LightKind::Spot { distance, angle, penumbra, decay, target: Vec3::ZERO },
            color,
            intensity,
        )
    }

    //--- Shadows ----------------------------------------------------------

    pub fn can_cast_shadow(&self) -> bool {
        matches!(
            self.kind,
            LightKind::Directional { .. } | LightKind::Point { .. } | LightKind::Spot { .. }
        )
    }

    /// Turns shadow casting on with the default camera for this light kind
    /// and hands back the new shadow for tuning. Lights that cannot cast are
    /// left unchanged and yield `None`.
    pub fn enable_shadow(&mut self) -> Option<&mut Shadow> {
        let camera = match self.kind {
            LightKind::Directional { .. } => ShadowCamera::Orthographic {
                left: -5.0,
                right: 5.0,
                top: 5.0,
                bottom: -5.0,
                near: 0.5,
                far: 500.0,
            },
            LightKind::Point { .. } => ShadowCamera::Perspective { fov: 90.0, near: 0.5, far: 500.0 },
            LightKind::Spot { angle, .. } => ShadowCamera::Perspective {
                fov: (angle * 2.0).to_degrees(),
                near: 0.5,
                far: 500.0,
            },
            _ => return None,
        };
        Some(self.shadow.insert(Shadow { map_size: DEFAULT_SHADOW_MAP, camera }))
    }

    pub fn set_target(&mut self, point: Vec3) {
        match &mut self.kind {
            LightKind::Directional { target } | LightKind::Spot { target, .. } => *target = point,
            _ => {}
        }
    }
}

//=== LightHelper =========================================================

/// Debug visual drawn for a light or its shadow camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HelperKind {
    /// Gizmo sized `size` showing a light's position and direction.
    Light { size: f32 },
    /// Wire frustum of a light's shadow camera.
    ShadowCamera,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn only_directional_point_and_spot_cast_shadows() {
        let mut ambient = Light::ambient(Color::WHITE, 0.3);
        assert!(ambient.enable_shadow().is_none());
        assert!(ambient.shadow.is_none());

        let mut hemi = Light::hemisphere(Color::hex(0xff00ff), Color::hex(0x00ff00), 0.5);
        assert!(!hemi.can_cast_shadow());
        assert!(hemi.enable_shadow().is_none());

        let mut sun = Light::directional(Color::WHITE, 0.5);
        assert!(sun.can_cast_shadow());
        assert!(sun.shadow.is_none());
        assert!(sun.enable_shadow().is_some());
        assert!(matches!(sun.shadow.unwrap().camera, ShadowCamera::Orthographic { .. }));
    }

    #[test]
    fn shadow_camera_planes_are_editable() {
        let mut sun = Light::directional(Color::WHITE, 0.6);
        let shadow = sun.enable_shadow().unwrap();
        shadow.map_size = 1024;
        shadow.camera.set_far(15.0);
        shadow.camera.set_extent(7.0);

        let shadow = sun.shadow.unwrap();
        assert_eq!(shadow.camera.far(), 15.0);
        match shadow.camera {
            ShadowCamera::Orthographic { left, top, .. } => assert_eq!((left, top), (-7.0, 7.0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn spot_shadow_fov_covers_the_cone() {
        let mut spot = Light::spot(Color::WHITE, 0.4, 10.0, PI * 0.3, 0.0, 2.0);
        spot.enable_shadow();
        match spot.shadow.unwrap().camera {
            ShadowCamera::Perspective { fov, .. } => assert!((fov - 108.0).abs() < 1e-3),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn set_target_ignores_untargeted_lights() {
        let mut point = Light::point(Color::WHITE, 1.0, 9.0, 2.0);
        point.set_target(Vec3::ONE);
        assert_eq!(point.kind, LightKind::Point { distance: 9.0, decay: 2.0 });

        let mut spot = Light::spot(Color::WHITE, 1.0, 6.0, 0.3, 0.25, 1.0);
        spot.set_target(Vec3::ONE);
        assert!(matches!(spot.kind, LightKind::Spot { target, .. } if target == Vec3::ONE));
    }
}
