//! Local transform (position, rotation, scale)
//!
//! A Transform represents the position, rotation, and per-axis scale of a
//! scene node relative to its parent.

use kitforge_math::{Vec3, Quat};
use serde::{Serialize, Deserialize};

/// A local transform with position, rotation, and per-axis scale
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to the parent
    pub position: Vec3,
    /// Rotation relative to the parent
    pub rotation: Quat,
    /// Per-axis scale factor
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Transform a point from local space to parent space
    ///
    /// Applies scale, then rotation, then translation.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let scaled = p.component_mul(self.scale);
        let rotated = self.rotation.rotate(scaled);
        rotated + self.position
    }

    /// Transform a direction from local space to parent space
    ///
    /// Applies scale and rotation, but not translation.
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        self.rotation.rotate(d.component_mul(self.scale))
    }

    /// Map a point from parent space back into local space
    ///
    /// Exact inverse of [`transform_point`](Self::transform_point), valid
    /// under non-uniform scale. Components with a near-zero scale factor
    /// are passed through unchanged. Note that the inverse mapping is
    /// unscale-after-unrotate, which cannot be expressed as another
    /// `Transform` value; there is therefore no `inverse()` method.
    pub fn inverse_transform_point(&self, p: Vec3) -> Vec3 {
        let unrotated = self.rotation.conjugate().rotate(p - self.position);
        unrotated.component_div(self.scale)
    }

    /// Compose two transforms: result = self * other
    ///
    /// The composed transform applies `other` first, then `self`. Scale
    /// composes component-wise; shear introduced by rotating under
    /// non-uniform scale is not representable and is dropped, which matches
    /// how the host scene graph composes transforms.
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: self.rotation.compose(&other.rotation),
            scale: self.scale.component_mul(other.scale),
        }
    }

    /// Translate the transform by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Rotate the transform by a quaternion
    pub fn rotate(&mut self, q: Quat) {
        self.rotation = q.compose(&self.rotation).normalize();
    }
}
