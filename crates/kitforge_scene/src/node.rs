//! Scene-graph nodes
//!
//! A [`SceneObject`] is a node in a tree: a local transform, a layer, a
//! static flag, an ordered list of components, and ordered parent-owned
//! children. The tree is plain owned data; re-parenting is moving a value.

use kitforge_math::Vec3;
use crate::component::Component;
use crate::Transform;

/// A node in the scene hierarchy
#[derive(Clone, Debug, Default)]
pub struct SceneObject {
    /// Node name, unique only by convention
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Layer index (0-31)
    pub layer: u8,
    /// Whether the node is marked static for batching/lightmapping
    pub is_static: bool,
    /// Attached components, in attachment order
    pub components: Vec<Component>,
    /// Child nodes, ordered; the parent owns them
    pub children: Vec<SceneObject>,
}

impl SceneObject {
    /// Create an empty node with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the local transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the local position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.transform.position = position;
        self
    }

    /// Set the layer
    pub fn with_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    /// Mark the node static
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    /// Attach a component
    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    /// Attach a child node
    pub fn with_child(mut self, child: SceneObject) -> Self {
        self.children.push(child);
        self
    }

    /// Attach a child node in place
    pub fn attach_child(&mut self, child: SceneObject) {
        self.children.push(child);
    }

    /// Find a direct child by name
    pub fn find_child(&self, name: &str) -> Option<&SceneObject> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Visit this node and every descendant, depth-first
    pub fn visit<F: FnMut(&SceneObject)>(&self, f: &mut F) {
        f(self);
        for child in &self.children {
            child.visit(f);
        }
    }

    /// Visit this node and every descendant mutably, depth-first
    ///
    /// The callback must not assume anything about sibling order while
    /// mutating; children are visited after their parent.
    pub fn visit_mut<F: FnMut(&mut SceneObject)>(&mut self, f: &mut F) {
        f(self);
        for child in &mut self.children {
            child.visit_mut(f);
        }
    }

    /// Visit this node and every descendant with composed world transforms
    ///
    /// `parent_world` is the world transform of this node's parent; the
    /// callback receives each node together with that node's own world
    /// transform.
    pub fn visit_with_world<F: FnMut(&SceneObject, &Transform)>(
        &self,
        parent_world: &Transform,
        f: &mut F,
    ) {
        let world = parent_world.compose(&self.transform);
        f(self, &world);
        for child in &self.children {
            child.visit_with_world(&world, f);
        }
    }

    /// Whether any node in this subtree carries a renderer, enabled or not
    pub fn has_renderer_in_tree(&self) -> bool {
        let mut found = false;
        self.visit(&mut |node| {
            found |= node.components.iter().any(|c| c.as_renderer().is_some());
        });
        found
    }

    /// Count colliders in this subtree, disabled ones included
    pub fn collider_count_in_tree(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |node| {
            count += node.components.iter().filter(|c| c.as_collider().is_some()).count();
        });
        count
    }

    /// Total number of nodes in this subtree, self included
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.visit(&mut |_| count += 1);
        count
    }
}
