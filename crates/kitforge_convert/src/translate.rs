//! Collider translation
//!
//! Source colliders are captured as value snapshots first (a pure traversal
//! over the live tree), then translated onto the output collider branch.
//! Capturing before mutating keeps the walk free of aliasing between the
//! enumeration and the later removal of the originals.

use kitforge_math::{Vec3, Quat};
use kitforge_scene::{Collider, ColliderShape, Component, SceneObject, Transform};

use crate::warning::ConvertWarning;

/// Name of the intermediate node created when several colliders would
/// otherwise share one component slot
pub const SUB_COLLIDER_NAME: &str = "subCollider";

/// A source collider captured independently of its owning node
///
/// World position and rotation are recorded so the translated collider can
/// be placed bit-identically regardless of any re-parenting that happened
/// in between; scale is kept local, matching how the host editor copies
/// collider transforms.
#[derive(Clone, Debug)]
pub struct ColliderCapture {
    pub enabled: bool,
    pub shape: ColliderShape,
    pub world_position: Vec3,
    pub world_rotation: Quat,
    pub local_scale: Vec3,
}

/// Capture every collider in the subtree, disabled ones included
///
/// World transforms are composed relative to the space `model` lives in
/// (the kit root, whose transform is identity).
pub fn collect_colliders(model: &SceneObject) -> Vec<ColliderCapture> {
    let mut captures = Vec::new();
    model.visit_with_world(&Transform::identity(), &mut |node, world| {
        for component in &node.components {
            if let Some(collider) = component.as_collider() {
                captures.push(ColliderCapture {
                    enabled: collider.enabled,
                    shape: collider.shape.clone(),
                    world_position: world.position,
                    world_rotation: world.rotation,
                    local_scale: node.transform.scale,
                });
            }
        }
    });
    captures
}

/// Remove every collider component from the subtree
///
/// The originals must not survive on the model branch once they have been
/// translated.
pub fn strip_colliders(model: &mut SceneObject) {
    model.visit_mut(&mut |node| {
        node.components.retain(|c| c.as_collider().is_none());
    });
}

/// Attach the disabled default-box fallback collider
///
/// Every kit needs at least one collider component to avoid load errors on
/// the platform.
pub fn attach_default_box(node: &mut SceneObject) {
    node.components.push(Component::Collider(Collider::disabled_box()));
}

/// Translate one captured collider onto the destination node
///
/// `dest_parent_world` is the world transform of `dest`'s parent. When
/// `on_sub_node` is set the collider is attached to a fresh
/// `"subCollider"` child instead of `dest` itself; an unsupported capture
/// never attaches the child at all, which is the cleanup-on-failure path.
///
/// Returns whether a collider was added. Unsupported representations emit
/// a warning naming the type and return `false`; the caller continues.
pub fn translate(
    capture: &ColliderCapture,
    dest: &mut SceneObject,
    dest_parent_world: &Transform,
    on_sub_node: bool,
    warnings: &mut Vec<ConvertWarning>,
) -> bool {
    let shape = match copy_shape(&capture.shape) {
        Some(shape) => shape,
        None => {
            let warning = ConvertWarning::UnsupportedCollider {
                type_name: capture.shape.type_name().to_string(),
            };
            log::warn!("{}", warning);
            warnings.push(warning);
            return false;
        }
    };

    let collider = Component::Collider(Collider {
        enabled: capture.enabled,
        shape,
    });

    if on_sub_node {
        let sub_parent_world = dest_parent_world.compose(&dest.transform);
        let mut sub = SceneObject::new(SUB_COLLIDER_NAME).with_component(collider);
        place_at_world(&mut sub, &sub_parent_world, capture);
        dest.attach_child(sub);
    } else {
        dest.components.push(collider);
        place_at_world(dest, dest_parent_world, capture);
    }

    true
}

/// Copy the fields meaningful to each supported variant; `None` for
/// representations the kit format cannot carry
fn copy_shape(shape: &ColliderShape) -> Option<ColliderShape> {
    match shape {
        ColliderShape::Mesh { mesh, convex } => Some(ColliderShape::Mesh {
            mesh: *mesh,
            convex: *convex,
        }),
        ColliderShape::Box { size, center } => Some(ColliderShape::Box {
            size: *size,
            center: *center,
        }),
        ColliderShape::Sphere { radius, center } => Some(ColliderShape::Sphere {
            radius: *radius,
            center: *center,
        }),
        ColliderShape::Capsule { direction, radius, height } => Some(ColliderShape::Capsule {
            direction: *direction,
            radius: *radius,
            height: *height,
        }),
        ColliderShape::Terrain { data } => Some(ColliderShape::Terrain { data: *data }),
        ColliderShape::Other { .. } => None,
    }
}

/// Set the node's local transform so its world placement matches the
/// capture exactly; scale is copied locally
fn place_at_world(node: &mut SceneObject, parent_world: &Transform, capture: &ColliderCapture) {
    node.transform.position = parent_world.inverse_transform_point(capture.world_position);
    node.transform.rotation = parent_world
        .rotation
        .conjugate()
        .compose(&capture.world_rotation)
        .normalize();
    node.transform.scale = capture.local_scale;
}
