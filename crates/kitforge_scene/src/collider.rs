//! Collider shapes
//!
//! The collider variants mirror what the host editor exposes. The platform
//! kit format only supports mesh, box, sphere, capsule and terrain
//! colliders; every other host collider type is represented by
//! [`ColliderShape::Other`] so conversion can reject it by name.

use kitforge_math::Vec3;
use serde::{Serialize, Deserialize};
use crate::mesh::{MeshKey, TerrainKey};

/// The axis a capsule extends along
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    #[default]
    Y,
    Z,
}

/// Collider geometry, tagged by representation
#[derive(Clone, Debug)]
pub enum ColliderShape {
    /// Arbitrary mesh geometry referencing shared mesh data
    Mesh {
        mesh: MeshKey,
        /// Whether the mesh is treated as its convex hull
        convex: bool,
    },
    /// Axis-aligned box in local space
    Box {
        /// Full extents along each local axis
        size: Vec3,
        /// Offset of the box center from the node origin
        center: Vec3,
    },
    /// Sphere in local space
    Sphere {
        radius: f32,
        /// Offset of the sphere center from the node origin
        center: Vec3,
    },
    /// Capsule in local space
    ///
    /// The host editor stores direction, radius and height; there is no
    /// separate center offset.
    Capsule {
        direction: Axis,
        radius: f32,
        /// End-to-end length including the hemispherical caps
        height: f32,
    },
    /// Heightmap terrain referencing shared terrain data
    Terrain { data: TerrainKey },
    /// Any host collider type outside the supported set
    Other {
        /// Host-side type name, reported in warnings
        type_name: String,
    },
}

impl ColliderShape {
    /// The default box shape: unit size, centered on the node origin
    pub fn default_box() -> Self {
        ColliderShape::Box {
            size: Vec3::ONE,
            center: Vec3::ZERO,
        }
    }

    /// Human-readable name of this shape's variant
    pub fn type_name(&self) -> &str {
        match self {
            ColliderShape::Mesh { .. } => "mesh",
            ColliderShape::Box { .. } => "box",
            ColliderShape::Sphere { .. } => "sphere",
            ColliderShape::Capsule { .. } => "capsule",
            ColliderShape::Terrain { .. } => "terrain",
            ColliderShape::Other { type_name } => type_name,
        }
    }

    /// Whether this shape can be carried into a kit
    pub fn is_supported(&self) -> bool {
        !matches!(self, ColliderShape::Other { .. })
    }
}
