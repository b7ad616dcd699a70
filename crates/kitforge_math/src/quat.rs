//! Quaternion rotations
//!
//! Unit quaternions represent 3D rotations. Construction follows the
//! half-angle convention: q = cos(θ/2) + sin(θ/2)·(x,y,z) for a rotation
//! by θ around a unit axis.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// A rotation quaternion with vector part (x, y, z) and scalar part w
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Scalar component
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion from raw components
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a quaternion rotating by `angle` radians around `axis`
    ///
    /// The axis is normalized automatically.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        let half = angle * 0.5;
        let sin_h = half.sin();
        Self {
            x: axis.x * sin_h,
            y: axis.y * sin_h,
            z: axis.z * sin_h,
            w: half.cos(),
        }
    }

    /// Create a quaternion from Euler angles in radians
    ///
    /// Angles are applied in ZXY order (roll around Z, then pitch around X,
    /// then yaw around Y), matching the host editor convention. All-zero
    /// Euler angles produce the identity.
    pub fn from_euler(x: f32, y: f32, z: f32) -> Self {
        let qz = Self::from_axis_angle(Vec3::Z, z);
        let qx = Self::from_axis_angle(Vec3::X, x);
        let qy = Self::from_axis_angle(Vec3::Y, y);
        qy.compose(&qx).compose(&qz)
    }

    /// Compute the squared magnitude of the quaternion
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w
    }

    /// Compute the magnitude of the quaternion
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Normalize to unit magnitude
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            let inv = 1.0 / mag;
            Self {
                x: self.x * inv,
                y: self.y * inv,
                z: self.z * inv,
                w: self.w * inv,
            }
        } else {
            Self::IDENTITY
        }
    }

    /// Compute the conjugate of the quaternion
    ///
    /// For unit quaternions, this is the inverse rotation.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: self.w,
        }
    }

    /// Compose two rotations: `self.compose(&other)` applies `other` first,
    /// then `self` (Hamilton product self * other)
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        }
    }

    /// Rotate a vector by this quaternion (q v q*)
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let uv = u.cross(v);
        let uuv = u.cross(uv);
        v + (uv * self.w + uuv) * 2.0
    }

    /// Dot product with another quaternion
    #[inline]
    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Whether this quaternion represents the same rotation as `other`
    /// within the given tolerance
    ///
    /// q and -q encode the same rotation, so comparison uses the absolute
    /// dot product.
    pub fn approx_rotation_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.dot(other).abs() > 1.0 - epsilon
    }
}
