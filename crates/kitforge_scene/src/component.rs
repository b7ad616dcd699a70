//! Node components: renderers, lights, colliders
//!
//! Components are plain data attached to a [`SceneObject`]. A node carries
//! an ordered list of them; enumeration always includes disabled
//! components, matching the host editor's include-inactive queries.
//!
//! [`SceneObject`]: crate::SceneObject

use serde::{Serialize, Deserialize};
use crate::collider::ColliderShape;
use crate::mesh::MeshKey;

/// Identifies a shader program on the target platform
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShaderId {
    /// The platform's default surface shader
    #[default]
    Standard,
    /// Vertex-lit diffuse shader
    DiffuseVertex,
    /// Unlit shader with lightmap support
    UnlitLightmap,
    /// Any other shader, by name
    Custom(String),
}

impl std::fmt::Display for ShaderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderId::Standard => write!(f, "Standard"),
            ShaderId::DiffuseVertex => write!(f, "Diffuse Vertex"),
            ShaderId::UnlitLightmap => write!(f, "Unlit (Supports Lightmap)"),
            ShaderId::Custom(name) => write!(f, "{}", name),
        }
    }
}

/// A shared material with a shader assignment and base color
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// The shader this material renders with
    pub shader: ShaderId,
    /// Base color as RGBA (each component 0.0-1.0)
    pub base_color: [f32; 4],
}

impl Default for Material {
    fn default() -> Self {
        Self {
            shader: ShaderId::Standard,
            base_color: [1.0, 1.0, 1.0, 1.0], // White
        }
    }
}

impl Material {
    /// Create a material with the given shader and white base color
    pub fn with_shader(shader: ShaderId) -> Self {
        Self {
            shader,
            base_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

/// Renders shared mesh geometry with a material
#[derive(Clone, Debug)]
pub struct MeshRenderer {
    pub enabled: bool,
    /// Shared mesh to render, if assigned
    pub mesh: Option<MeshKey>,
    pub material: Material,
}

impl MeshRenderer {
    /// Create an enabled renderer for the given mesh with a default material
    pub fn new(mesh: MeshKey) -> Self {
        Self {
            enabled: true,
            mesh: Some(mesh),
            material: Material::default(),
        }
    }
}

/// How a light participates in lightmap baking
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightBake {
    Baked,
    #[default]
    Mixed,
    Realtime,
}

/// A light source
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Light {
    pub enabled: bool,
    pub bake: LightBake,
    /// Light color as RGB (each component 0.0-1.0)
    pub color: [f32; 3],
    pub intensity: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            enabled: true,
            bake: LightBake::default(),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Collision geometry attached to a node
#[derive(Clone, Debug)]
pub struct Collider {
    pub enabled: bool,
    pub shape: ColliderShape,
}

impl Collider {
    /// Create an enabled collider with the given shape
    pub fn new(shape: ColliderShape) -> Self {
        Self { enabled: true, shape }
    }

    /// The disabled default-box collider used as a conversion fallback
    pub fn disabled_box() -> Self {
        Self {
            enabled: false,
            shape: ColliderShape::default_box(),
        }
    }
}

/// Any component a node can carry
#[derive(Clone, Debug)]
pub enum Component {
    Renderer(MeshRenderer),
    Light(Light),
    Collider(Collider),
}

impl Component {
    /// View this component as a renderer
    pub fn as_renderer(&self) -> Option<&MeshRenderer> {
        match self {
            Component::Renderer(r) => Some(r),
            _ => None,
        }
    }

    /// View this component as a collider
    pub fn as_collider(&self) -> Option<&Collider> {
        match self {
            Component::Collider(c) => Some(c),
            _ => None,
        }
    }

    /// View this component as a light
    pub fn as_light(&self) -> Option<&Light> {
        match self {
            Component::Light(l) => Some(l),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_default_is_standard() {
        let m = Material::default();
        assert_eq!(m.shader, ShaderId::Standard);
        assert_eq!(m.base_color, [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_shader_display() {
        assert_eq!(ShaderId::Standard.to_string(), "Standard");
        assert_eq!(ShaderId::Custom("Toon".to_string()).to_string(), "Toon");
    }

    #[test]
    fn test_disabled_box_collider() {
        let c = Collider::disabled_box();
        assert!(!c.enabled);
        assert!(matches!(c.shape, ColliderShape::Box { .. }));
    }

    #[test]
    fn test_component_accessors() {
        let c = Component::Collider(Collider::disabled_box());
        assert!(c.as_collider().is_some());
        assert!(c.as_renderer().is_none());
        assert!(c.as_light().is_none());
    }
}
