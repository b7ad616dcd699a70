//! Prefab and scene serialization
//!
//! Runtime nodes reference shared assets through slotmap keys, which are
//! meaningless outside one session. The document types here mirror the
//! runtime tree with keys resolved to stable asset names, making them
//! serializable to RON: [`KitPrefab`] for a converted kit,
//! [`SceneDocument`] for a list of authored source objects.

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use std::io;

use kitforge_math::Vec3;
use crate::collider::{Axis, ColliderShape};
use crate::component::{Collider, Component, Light, Material, MeshRenderer};
use crate::mesh::{AssetLibrary, Mesh, TerrainData};
use crate::node::SceneObject;
use crate::Transform;

/// Serializable collider shape with asset references by name
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PrefabShape {
    Mesh { mesh: String, convex: bool },
    Box { size: Vec3, center: Vec3 },
    Sphere { radius: f32, center: Vec3 },
    Capsule { direction: Axis, radius: f32, height: f32 },
    Terrain { data: String },
    Other { type_name: String },
}

/// Serializable component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PrefabComponent {
    Renderer {
        enabled: bool,
        /// Mesh reference by name, if any is assigned
        mesh: Option<String>,
        material: Material,
    },
    Light(Light),
    Collider {
        enabled: bool,
        shape: PrefabShape,
    },
}

/// Serializable scene node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabNode {
    pub name: String,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default)]
    pub layer: u8,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub components: Vec<PrefabComponent>,
    #[serde(default)]
    pub children: Vec<PrefabNode>,
}

impl PrefabNode {
    /// Build a document node from a runtime node, resolving asset keys to
    /// names through the library
    pub fn from_object(object: &SceneObject, assets: &AssetLibrary) -> Result<Self, PrefabBuildError> {
        let mut components = Vec::with_capacity(object.components.len());
        for component in &object.components {
            components.push(match component {
                Component::Renderer(r) => {
                    let mesh = match r.mesh {
                        Some(key) => Some(
                            assets
                                .mesh(key)
                                .map(|m| m.name.clone())
                                .ok_or_else(|| PrefabBuildError::UnknownMesh {
                                    node: object.name.clone(),
                                })?,
                        ),
                        None => None,
                    };
                    PrefabComponent::Renderer {
                        enabled: r.enabled,
                        mesh,
                        material: r.material.clone(),
                    }
                }
                Component::Light(l) => PrefabComponent::Light(l.clone()),
                Component::Collider(c) => PrefabComponent::Collider {
                    enabled: c.enabled,
                    shape: Self::shape_from_runtime(&c.shape, &object.name, assets)?,
                },
            });
        }

        let mut children = Vec::with_capacity(object.children.len());
        for child in &object.children {
            children.push(Self::from_object(child, assets)?);
        }

        Ok(Self {
            name: object.name.clone(),
            transform: object.transform,
            layer: object.layer,
            is_static: object.is_static,
            components,
            children,
        })
    }

    fn shape_from_runtime(
        shape: &ColliderShape,
        node: &str,
        assets: &AssetLibrary,
    ) -> Result<PrefabShape, PrefabBuildError> {
        Ok(match shape {
            ColliderShape::Mesh { mesh, convex } => PrefabShape::Mesh {
                mesh: assets
                    .mesh(*mesh)
                    .map(|m| m.name.clone())
                    .ok_or_else(|| PrefabBuildError::UnknownMesh { node: node.to_string() })?,
                convex: *convex,
            },
            ColliderShape::Box { size, center } => PrefabShape::Box {
                size: *size,
                center: *center,
            },
            ColliderShape::Sphere { radius, center } => PrefabShape::Sphere {
                radius: *radius,
                center: *center,
            },
            ColliderShape::Capsule { direction, radius, height } => PrefabShape::Capsule {
                direction: *direction,
                radius: *radius,
                height: *height,
            },
            ColliderShape::Terrain { data } => PrefabShape::Terrain {
                data: assets
                    .terrain(*data)
                    .map(|t| t.name.clone())
                    .ok_or_else(|| PrefabBuildError::UnknownTerrain { node: node.to_string() })?,
            },
            ColliderShape::Other { type_name } => PrefabShape::Other {
                type_name: type_name.clone(),
            },
        })
    }

    /// Instantiate a runtime node from this document node
    ///
    /// Asset references are interned into the library by name; a reference
    /// to a mesh the library has never seen becomes an empty named mesh, so
    /// the reference survives a round trip even without the geometry.
    pub fn to_object(&self, assets: &mut AssetLibrary) -> SceneObject {
        let components = self
            .components
            .iter()
            .map(|component| match component {
                PrefabComponent::Renderer { enabled, mesh, material } => {
                    Component::Renderer(MeshRenderer {
                        enabled: *enabled,
                        mesh: mesh
                            .as_ref()
                            .map(|name| assets.intern_mesh(name, || Mesh::new(name.clone()))),
                        material: material.clone(),
                    })
                }
                PrefabComponent::Light(l) => Component::Light(l.clone()),
                PrefabComponent::Collider { enabled, shape } => Component::Collider(Collider {
                    enabled: *enabled,
                    shape: Self::shape_to_runtime(shape, assets),
                }),
            })
            .collect();

        SceneObject {
            name: self.name.clone(),
            transform: self.transform,
            layer: self.layer,
            is_static: self.is_static,
            components,
            children: self.children.iter().map(|c| c.to_object(assets)).collect(),
        }
    }

    fn shape_to_runtime(shape: &PrefabShape, assets: &mut AssetLibrary) -> ColliderShape {
        match shape {
            PrefabShape::Mesh { mesh, convex } => ColliderShape::Mesh {
                mesh: assets.intern_mesh(mesh, || Mesh::new(mesh.clone())),
                convex: *convex,
            },
            PrefabShape::Box { size, center } => ColliderShape::Box {
                size: *size,
                center: *center,
            },
            PrefabShape::Sphere { radius, center } => ColliderShape::Sphere {
                radius: *radius,
                center: *center,
            },
            PrefabShape::Capsule { direction, radius, height } => ColliderShape::Capsule {
                direction: *direction,
                radius: *radius,
                height: *height,
            },
            PrefabShape::Terrain { data } => {
                let key = match assets.find_terrain(data) {
                    Some(key) => key,
                    None => assets.add_terrain(TerrainData::new(data.clone(), 0, Vec3::ZERO)),
                };
                ColliderShape::Terrain { data: key }
            }
            PrefabShape::Other { type_name } => ColliderShape::Other {
                type_name: type_name.clone(),
            },
        }
    }
}

/// A converted kit, ready to persist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitPrefab {
    /// Kit name (the sanitized source name)
    pub name: String,
    /// The kit root with its `model` and `collider` children
    pub root: PrefabNode,
}

impl KitPrefab {
    /// Build a prefab document from a converted kit root
    pub fn from_object(root: &SceneObject, assets: &AssetLibrary) -> Result<Self, PrefabBuildError> {
        Ok(Self {
            name: root.name.clone(),
            root: PrefabNode::from_object(root, assets)?,
        })
    }

    /// Load a prefab from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PrefabLoadError> {
        let contents = fs::read_to_string(path)?;
        let prefab = ron::from_str(&contents)?;
        Ok(prefab)
    }

    /// Save the prefab to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PrefabSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path.as_ref(), contents)?;
        log::debug!("Saved kit prefab '{}' to {}", self.name, path.as_ref().display());
        Ok(())
    }
}

/// A scene file listing authored source objects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Top-level authored objects, in selection order
    pub objects: Vec<PrefabNode>,
}

impl SceneDocument {
    /// Create a new empty scene document
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    /// Load a scene document from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PrefabLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save the scene document to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PrefabSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Instantiate every object in this document into runtime nodes
    pub fn instantiate(&self, assets: &mut AssetLibrary) -> Vec<SceneObject> {
        self.objects.iter().map(|o| o.to_object(assets)).collect()
    }
}

/// Error building a prefab document from a runtime tree
#[derive(Debug)]
pub enum PrefabBuildError {
    /// A node references a mesh key the library no longer holds
    UnknownMesh { node: String },
    /// A node references a terrain key the library no longer holds
    UnknownTerrain { node: String },
}

impl std::fmt::Display for PrefabBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefabBuildError::UnknownMesh { node } => {
                write!(f, "Node '{}' references an unknown mesh", node)
            }
            PrefabBuildError::UnknownTerrain { node } => {
                write!(f, "Node '{}' references unknown terrain data", node)
            }
        }
    }
}

impl std::error::Error for PrefabBuildError {}

/// Error loading a prefab or scene document
#[derive(Debug)]
pub enum PrefabLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for PrefabLoadError {
    fn from(e: io::Error) -> Self {
        PrefabLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for PrefabLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        PrefabLoadError::Parse(e)
    }
}

impl std::fmt::Display for PrefabLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefabLoadError::Io(e) => write!(f, "IO error: {}", e),
            PrefabLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for PrefabLoadError {}

/// Error saving a prefab or scene document
#[derive(Debug)]
pub enum PrefabSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for PrefabSaveError {
    fn from(e: io::Error) -> Self {
        PrefabSaveError::Io(e)
    }
}

impl From<ron::Error> for PrefabSaveError {
    fn from(e: ron::Error) -> Self {
        PrefabSaveError::Serialize(e)
    }
}

impl std::fmt::Display for PrefabSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PrefabSaveError::Io(e) => write!(f, "IO error: {}", e),
            PrefabSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for PrefabSaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ShaderId;

    fn sample_tree(assets: &mut AssetLibrary) -> SceneObject {
        let cube = assets.add_mesh(Mesh::unit_cube());
        SceneObject::new("crate_01")
            .with_component(Component::Renderer(MeshRenderer::new(cube)))
            .with_child(
                SceneObject::new("hull")
                    .with_layer(2)
                    .with_component(Component::Collider(Collider::new(ColliderShape::Sphere {
                        radius: 1.5,
                        center: Vec3::ZERO,
                    }))),
            )
    }

    #[test]
    fn test_document_roundtrip_preserves_structure() {
        let mut assets = AssetLibrary::new();
        let tree = sample_tree(&mut assets);

        let doc = PrefabNode::from_object(&tree, &assets).unwrap();

        let mut fresh = AssetLibrary::new();
        let rebuilt = doc.to_object(&mut fresh);

        assert_eq!(rebuilt.name, "crate_01");
        assert_eq!(rebuilt.children.len(), 1);
        assert_eq!(rebuilt.children[0].layer, 2);
        assert_eq!(rebuilt.collider_count_in_tree(), 1);
        // The mesh reference was interned into the fresh library by name
        assert!(fresh.find_mesh("unit_cube").is_some());
    }

    #[test]
    fn test_kit_prefab_serialization() {
        let mut assets = AssetLibrary::new();
        let tree = sample_tree(&mut assets);
        let prefab = KitPrefab::from_object(&tree, &assets).unwrap();

        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let serialized = ron::ser::to_string_pretty(&prefab, pretty).unwrap();
        assert!(serialized.contains("crate_01"));
        assert!(serialized.contains("unit_cube"));
        assert!(serialized.contains("Sphere"));

        let deserialized: KitPrefab = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized.name, "crate_01");
        assert_eq!(deserialized.root.children.len(), 1);
    }

    #[test]
    fn test_parse_scene_document_format() {
        let scene_ron = r#"
SceneDocument(
    name: "props",
    objects: [
        PrefabNode(
            name: "barrel",
            layer: 1,
            is_static: true,
            components: [
                Renderer(enabled: true, mesh: Some("barrel_mesh"), material: Material(
                    shader: Standard,
                    base_color: (0.8, 0.7, 0.5, 1.0),
                )),
                Collider(enabled: true, shape: PrefabShape(
                    type: "Capsule",
                    direction: Y,
                    radius: 0.4,
                    height: 1.2,
                )),
            ],
        ),
    ],
)
"#;
        let scene: SceneDocument = ron::from_str(scene_ron).unwrap();
        assert_eq!(scene.name, "props");
        assert_eq!(scene.objects.len(), 1);

        let barrel = &scene.objects[0];
        assert!(barrel.is_static);
        assert_eq!(barrel.layer, 1);
        assert_eq!(barrel.components.len(), 2);
        match &barrel.components[1] {
            PrefabComponent::Collider { shape: PrefabShape::Capsule { radius, height, .. }, .. } => {
                assert_eq!(*radius, 0.4);
                assert_eq!(*height, 1.2);
            }
            other => panic!("Expected capsule collider, got {:?}", other),
        }

        let mut assets = AssetLibrary::new();
        let objects = scene.instantiate(&mut assets);
        assert_eq!(objects.len(), 1);
        assert!(assets.find_mesh("barrel_mesh").is_some());
    }

    #[test]
    fn test_stale_mesh_key_is_a_build_error() {
        let mut assets = AssetLibrary::new();
        let tree = sample_tree(&mut assets);

        // A fresh library knows nothing about the keys in the tree
        let empty = AssetLibrary::new();
        let result = PrefabNode::from_object(&tree, &empty);
        assert!(matches!(result, Err(PrefabBuildError::UnknownMesh { .. })));
    }

    #[test]
    fn test_unsupported_collider_survives_roundtrip() {
        let node = PrefabNode {
            name: "cart".to_string(),
            transform: Transform::identity(),
            layer: 0,
            is_static: false,
            components: vec![PrefabComponent::Collider {
                enabled: true,
                shape: PrefabShape::Other { type_name: "wheel".to_string() },
            }],
            children: Vec::new(),
        };

        let mut assets = AssetLibrary::new();
        let object = node.to_object(&mut assets);
        match &object.components[0] {
            Component::Collider(c) => assert_eq!(c.shape.type_name(), "wheel"),
            other => panic!("Expected collider, got {:?}", other),
        }
    }

    #[test]
    fn test_material_shader_roundtrip() {
        let mut material = Material::default();
        material.shader = ShaderId::DiffuseVertex;

        let serialized = ron::to_string(&material).unwrap();
        let deserialized: Material = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized.shader, ShaderId::DiffuseVertex);
    }
}
