//! Quaternion for 3D rotations

use super::vec::{Mat4, Vec3};

/// Quaternion for representing 3D rotations
///
/// Quaternions avoid gimbal lock and interpolate smoothly. Composition
/// follows the usual convention: `a * b` applies `b` first, then `a`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Create a new quaternion
    pub fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create from axis-angle representation
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let half_angle = angle * 0.5;
        let s = half_angle.sin();
        let len = axis.length();

        if len < 1e-6 {
            return Self::IDENTITY;
        }

        let inv_len = 1.0 / len;
        Self {
            x: axis.x * inv_len * s,
            y: axis.y * inv_len * s,
            z: axis.z * inv_len * s,
            w: half_angle.cos(),
        }
    }

    /// Rotation about the X axis
    pub fn from_rotation_x(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::RIGHT, angle)
    }

    /// Rotation about the Y axis
    pub fn from_rotation_y(angle: f32) -> Self {
        Self::from_axis_angle(Vec3::UP, angle)
    }

    /// Normalize the quaternion
    pub fn normalize(&self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len < 1e-6 || !len.is_finite() {
            return Self::IDENTITY;
        }
        let inv_len = 1.0 / len;
        Self {
            x: self.x * inv_len,
            y: self.y * inv_len,
            z: self.z * inv_len,
            w: self.w * inv_len,
        }
    }

    /// Get the conjugate (inverse for unit quaternions)
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Dot product of two quaternions
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Smallest rotation angle (radians, `0..=π`) taking `self` to `other`
    pub fn angle_to(&self, other: Self) -> f32 {
        // atan2 keeps precision near zero
        let r = self.conjugate().mul(&other);
        let v = (r.x * r.x + r.y * r.y + r.z * r.z).sqrt();
        2.0 * v.atan2(r.w.abs())
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }

    /// Instance method for slerp
    pub fn slerp(&self, other: Self, t: f32) -> Self {
        Self::slerp_static(self, &other, t)
    }

    /// Multiply two quaternions
    pub fn mul(&self, other: &Self) -> Self {
        Self {
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let qv = Self::new(v.x, v.y, v.z, 0.0);
        let result = self.mul(&qv).mul(&self.conjugate());
        Vec3::new(result.x, result.y, result.z)
    }

    /// Spherical linear interpolation (static version)
    ///
    /// Always takes the shorter arc: if the inputs lie in opposite
    /// hemispheres, `b` is negated first.
    pub fn slerp_static(a: &Quat, b: &Quat, t: f32) -> Quat {
        let mut cos_half_theta = a.x * b.x + a.y * b.y + a.z * b.z + a.w * b.w;

        let mut b = *b;
        if cos_half_theta < 0.0 {
            b = Self::new(-b.x, -b.y, -b.z, -b.w);
            cos_half_theta = -cos_half_theta;
        }

        // Close enough for linear interpolation
        if cos_half_theta > 0.9995 {
            return Self::new(
                a.x + t * (b.x - a.x),
                a.y + t * (b.y - a.y),
                a.z + t * (b.z - a.z),
                a.w + t * (b.w - a.w),
            )
            .normalize();
        }

        let half_theta = cos_half_theta.acos();
        let sin_half_theta = (1.0 - cos_half_theta * cos_half_theta).sqrt();

        let ratio_a = ((1.0 - t) * half_theta).sin() / sin_half_theta;
        let ratio_b = (t * half_theta).sin() / sin_half_theta;

        Self::new(
            a.x * ratio_a + b.x * ratio_b,
            a.y * ratio_a + b.y * ratio_b,
            a.z * ratio_a + b.z * ratio_b,
            a.w * ratio_a + b.w * ratio_b,
        )
    }

    /// Convert to a 4x4 rotation matrix
    pub fn to_mat4(&self) -> Mat4 {
        let x2 = self.x + self.x;
        let y2 = self.y + self.y;
        let z2 = self.z + self.z;

        let xx = self.x * x2;
        let xy = self.x * y2;
        let xz = self.x * z2;
        let yy = self.y * y2;
        let yz = self.y * z2;
        let zz = self.z * z2;
        let wx = self.w * x2;
        let wy = self.w * y2;
        let wz = self.w * z2;

        Mat4 {
            cols: [
                [1.0 - (yy + zz), xy + wz, xz - wy, 0.0],
                [xy - wz, 1.0 - (xx + zz), yz + wx, 0.0],
                [xz + wy, yz - wx, 1.0 - (xx + yy), 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Quat::mul(&self, &rhs)
    }
}

impl From<[f32; 4]> for Quat {
    /// From `[x, y, z, w]`, the glTF component order
    fn from(q: [f32; 4]) -> Self {
        Quat::new(q[0], q[1], q[2], q[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert!((a.x - b.x).abs() < 1e-5, "x: {} vs {}", a.x, b.x);
        assert!((a.y - b.y).abs() < 1e-5, "y: {} vs {}", a.y, b.y);
        assert!((a.z - b.z).abs() < 1e-5, "z: {} vs {}", a.z, b.z);
    }

    #[test]
    fn test_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_vec_eq(Quat::IDENTITY.rotate_vec3(v), v);
    }

    #[test]
    fn test_from_axis_angle() {
        // Rotate 90 degrees around Y axis
        let q = Quat::from_rotation_y(PI / 2.0);
        let rotated = q.rotate_vec3(Vec3::new(1.0, 0.0, 0.0));
        assert_vec_eq(rotated, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_composition_applies_right_operand_first() {
        // Tilt about X, then turn about world Y
        let tilt = Quat::from_rotation_x(PI / 2.0);
        let turn = Quat::from_rotation_y(PI / 2.0);
        let q = turn * tilt;

        // +Y tilts to +Z, then +Z turns to +X
        assert_vec_eq(q.rotate_vec3(Vec3::UP), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_slerp() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_y(PI / 2.0);

        let mid = Quat::slerp_static(&a, &b, 0.5);
        let rotated = mid.rotate_vec3(Vec3::new(1.0, 0.0, 0.0));

        // Should be rotated 45 degrees: x ≈ 0.707, z ≈ -0.707
        let expected = (PI / 4.0).cos();
        assert!((rotated.x - expected).abs() < 1e-4, "x: {}, expected: {}", rotated.x, expected);
        assert!((rotated.z + expected).abs() < 1e-4, "z: {}, expected: {}", rotated.z, -expected);
    }

    #[test]
    fn test_slerp_takes_short_arc_across_hemispheres() {
        let a = Quat::from_rotation_y(0.1);
        // Same orientation as a 0.3 rad turn, but on the far hemisphere
        let q = Quat::from_rotation_y(0.3);
        let b = Quat::new(-q.x, -q.y, -q.z, -q.w);

        let step = a.slerp(b, 0.5);
        assert!(a.angle_to(step) < 0.11);
        assert!(step.angle_to(q) < 0.11);
    }

    #[test]
    fn test_angle_to() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_y(PI);
        assert!((a.angle_to(b) - PI).abs() < 1e-3);
        assert!(a.angle_to(a) < 1e-3);
    }
}
