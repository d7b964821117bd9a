//=========================================================================
// Transform
//=========================================================================
//
// Position, Euler rotation (XYZ order, radians) and scale of a node.
//
// The Euler angles are the stored representation so per-axis animation
// (`rotation.x += dt * 0.3`, tweens on `rotation.y`) stays additive.
// Quaternion helpers convert at the boundary, e.g. when copying a rigid
// body orientation in.
//
//=========================================================================

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

//=== Transform ===========================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    //--- Rotation ---------------------------------------------------------

    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Replaces the rotation with `q`, decomposed back to XYZ Euler angles.
    pub fn set_quaternion(&mut self, q: Quat) {
        let (x, y, z) = q.normalize().to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }

    /// Rotates about the node's local X axis.
    pub fn rotate_x(&mut self, angle: f32) {
        self.rotate_local(Quat::from_rotation_x(angle));
    }

    /// Rotates about the node's local Y axis.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotate_local(Quat::from_rotation_y(angle));
    }

    /// Rotates about the node's local Z axis.
    pub fn rotate_z(&mut self, angle: f32) {
        self.rotate_local(Quat::from_rotation_z(angle));
    }

    fn rotate_local(&mut self, q: Quat) {
        let next = self.quaternion() * q;
        self.set_quaternion(next);
    }

    /// Orients the node so its local -Z axis points at `target`, +Y up.
    ///
    /// Cameras, spot and rect-area lights use this convention. Does
    /// nothing when `target` coincides with the position.
    pub fn look_at(&mut self, target: Vec3) {
        let forward = target - self.position;
        if forward.length_squared() < f32::EPSILON {
            return;
        }
        let back = -forward.normalize();

        let mut up = Vec3::Y;
        if back.cross(up).length_squared() < 1e-8 {
            // Looking straight up or down.
            up = Vec3::Z;
        }
        let right = up.cross(back).normalize();
        let true_up = back.cross(right);

        let basis = Mat3::from_cols(right, true_up, back);
        self.set_quaternion(Quat::from_mat3(&basis));
    }

    //--- Matrices ---------------------------------------------------------

    /// Local-to-parent matrix: translate * rotate * scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quaternion(), self.position)
    }

    pub fn set_uniform_scale(&mut self, s: f32) {
        self.scale = Vec3::splat(s);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
