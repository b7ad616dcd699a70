//! Shared mesh and terrain assets
//!
//! Mesh and terrain data are shared: many nodes may reference the same
//! geometry. The [`AssetLibrary`] owns the data and hands out generational
//! keys, so a stale key returns `None` instead of pointing at reused
//! storage.

use kitforge_math::Vec3;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key to a shared mesh in the asset library
    pub struct MeshKey;

    /// Key to shared terrain data in the asset library
    pub struct TerrainKey;
}

/// Shared triangle mesh data
#[derive(Clone, Debug)]
pub struct Mesh {
    /// Stable name used when serializing references to this mesh
    pub name: String,
    /// Vertex positions in local space
    pub positions: Vec<Vec3>,
    /// Triangle indices into `positions`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty named mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positions: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// The unit cube primitive, centered at origin with side length 1
    ///
    /// Used as the placeholder geometry for kits with no renderable mesh.
    pub fn unit_cube() -> Self {
        let h = 0.5;

        // All 8 vertices are combinations of ±h for each coordinate
        // Using binary counting: vertex i has coordinates based on bits of i
        let positions = vec![
            Vec3::new(-h, -h, -h), // 0 = 0b000
            Vec3::new( h, -h, -h), // 1 = 0b001
            Vec3::new(-h,  h, -h), // 2 = 0b010
            Vec3::new( h,  h, -h), // 3 = 0b011
            Vec3::new(-h, -h,  h), // 4 = 0b100
            Vec3::new( h, -h,  h), // 5 = 0b101
            Vec3::new(-h,  h,  h), // 6 = 0b110
            Vec3::new( h,  h,  h), // 7 = 0b111
        ];

        // Two triangles per face, counter-clockwise seen from outside
        let indices = vec![
            0, 2, 1, 1, 2, 3, // -z
            4, 5, 6, 5, 7, 6, // +z
            0, 4, 2, 2, 4, 6, // -x
            1, 3, 5, 3, 7, 5, // +x
            0, 1, 4, 1, 5, 4, // -y
            2, 6, 3, 3, 6, 7, // +y
        ];

        Self {
            name: "unit_cube".to_string(),
            positions,
            indices,
        }
    }

    /// Number of triangles in this mesh
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Shared terrain data referenced by terrain colliders
#[derive(Clone, Debug)]
pub struct TerrainData {
    /// Stable name used when serializing references to this terrain
    pub name: String,
    /// Heightmap samples per side
    pub heightmap_resolution: u32,
    /// World-space extents of the terrain patch
    pub size: Vec3,
}

impl TerrainData {
    /// Create a named terrain patch
    pub fn new(name: impl Into<String>, heightmap_resolution: u32, size: Vec3) -> Self {
        Self {
            name: name.into(),
            heightmap_resolution,
            size,
        }
    }
}

/// Owner of all shared mesh and terrain data for one editing session
#[derive(Default)]
pub struct AssetLibrary {
    meshes: SlotMap<MeshKey, Mesh>,
    terrains: SlotMap<TerrainKey, TerrainData>,
}

impl AssetLibrary {
    /// Create a new empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a mesh, returning its key
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshKey {
        self.meshes.insert(mesh)
    }

    /// Get a mesh by key
    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    /// Find a mesh key by name
    pub fn find_mesh(&self, name: &str) -> Option<MeshKey> {
        self.meshes.iter().find(|(_, m)| m.name == name).map(|(k, _)| k)
    }

    /// Find a mesh by name, inserting it via `create` if absent
    ///
    /// Deduplicates shared primitives such as the placeholder cube.
    pub fn intern_mesh(&mut self, name: &str, create: impl FnOnce() -> Mesh) -> MeshKey {
        match self.find_mesh(name) {
            Some(key) => key,
            None => self.add_mesh(create()),
        }
    }

    /// Add terrain data, returning its key
    pub fn add_terrain(&mut self, terrain: TerrainData) -> TerrainKey {
        self.terrains.insert(terrain)
    }

    /// Get terrain data by key
    pub fn terrain(&self, key: TerrainKey) -> Option<&TerrainData> {
        self.terrains.get(key)
    }

    /// Find a terrain key by name
    pub fn find_terrain(&self, name: &str) -> Option<TerrainKey> {
        self.terrains.iter().find(|(_, t)| t.name == name).map(|(k, _)| k)
    }

    /// Number of meshes in the library
    #[inline]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of terrain patches in the library
    #[inline]
    pub fn terrain_count(&self) -> usize {
        self.terrains.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_cube_geometry() {
        let cube = Mesh::unit_cube();
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.triangle_count(), 12);
        // Every vertex sits on the half-unit shell
        for p in &cube.positions {
            assert_eq!(p.abs(), Vec3::splat(0.5));
        }
    }

    #[test]
    fn test_add_and_get_mesh() {
        let mut lib = AssetLibrary::new();
        let key = lib.add_mesh(Mesh::unit_cube());
        assert_eq!(lib.mesh_count(), 1);
        assert_eq!(lib.mesh(key).unwrap().name, "unit_cube");
    }

    #[test]
    fn test_find_mesh_by_name() {
        let mut lib = AssetLibrary::new();
        let key = lib.add_mesh(Mesh::new("rock_01"));
        assert_eq!(lib.find_mesh("rock_01"), Some(key));
        assert_eq!(lib.find_mesh("missing"), None);
    }

    #[test]
    fn test_intern_mesh_deduplicates() {
        let mut lib = AssetLibrary::new();
        let a = lib.intern_mesh("unit_cube", Mesh::unit_cube);
        let b = lib.intern_mesh("unit_cube", Mesh::unit_cube);
        assert_eq!(a, b);
        assert_eq!(lib.mesh_count(), 1);
    }

    #[test]
    fn test_terrain_roundtrip() {
        let mut lib = AssetLibrary::new();
        let key = lib.add_terrain(TerrainData::new("island", 513, Vec3::new(500.0, 60.0, 500.0)));
        let terrain = lib.terrain(key).unwrap();
        assert_eq!(terrain.heightmap_resolution, 513);
        assert_eq!(lib.find_terrain("island"), Some(key));
    }
}
