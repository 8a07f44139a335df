//! Node transform and visibility

use crate::math::{Mat4, Quat, Vec3};

/// Local transform and visibility of a scene node
///
/// Position, rotation and scale are relative to the parent node.
#[derive(Clone, Debug, PartialEq)]
pub struct Object3D {
    /// Local position relative to parent
    pub position: Vec3,
    /// Local rotation as quaternion
    pub rotation: Quat,
    /// Local scale
    pub scale: Vec3,
    /// Visibility flag (hides the whole subtree when false)
    pub visible: bool,
}

impl Default for Object3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            visible: true,
        }
    }
}

impl Object3D {
    /// Create a new Object3D at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with position
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    /// Set position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Set rotation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Set uniform scale
    pub fn with_uniform_scale(mut self, s: f32) -> Self {
        self.scale = Vec3::splat(s);
        self
    }

    /// Compute local transformation matrix (T * R * S)
    pub fn local_matrix(&self) -> Mat4 {
        let translation = Mat4::translation(self.position);
        let rotation = self.rotation.to_mat4();
        let scale = Mat4::scale(self.scale);
        translation.mul(&rotation).mul(&scale)
    }
}
