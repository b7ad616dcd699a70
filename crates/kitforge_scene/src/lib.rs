//! Scene-graph data model for kitforge
//!
//! This crate provides the types the conversion pipeline operates on:
//!
//! - [`Transform`] - Position, rotation, and per-axis scale
//! - [`SceneObject`] - A node in the scene hierarchy
//! - [`Component`] - Renderer, light, or collider attached to a node
//! - [`ColliderShape`] - Tagged union over the host collider representations
//! - [`AssetLibrary`] - Owner of shared mesh and terrain data
//! - [`KitPrefab`] / [`SceneDocument`] - Serializable RON documents

mod transform;
mod component;
mod collider;
mod mesh;
mod node;
mod prefab;

pub use transform::Transform;
pub use component::{Component, MeshRenderer, Light, LightBake, Material, ShaderId, Collider};
pub use collider::{Axis, ColliderShape};
pub use mesh::{AssetLibrary, Mesh, MeshKey, TerrainData, TerrainKey};
pub use node::SceneObject;
pub use prefab::{
    KitPrefab, PrefabBuildError, PrefabComponent, PrefabLoadError, PrefabNode, PrefabSaveError,
    PrefabShape, SceneDocument,
};

// Re-export commonly used math types for convenience
pub use kitforge_math::{Vec3, Quat};
