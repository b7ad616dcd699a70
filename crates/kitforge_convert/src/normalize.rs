//! Hierarchy normalization
//!
//! Resets the source object's local transform channels per policy before
//! it is re-parented into the kit. Each channel is independent; any
//! combination of flags (including none) is valid.

use kitforge_math::{Vec3, Quat};
use kitforge_scene::SceneObject;

use crate::policy::NormalizeFlags;

/// Reset the node's local transform channels selected by `flags`
///
/// In place, infallible, and idempotent: applying it twice with the same
/// flags yields the same transform as applying it once.
pub fn normalize(node: &mut SceneObject, flags: NormalizeFlags) {
    if flags.contains(NormalizeFlags::POSITION) {
        node.transform.position = Vec3::ZERO;
    }

    if flags.contains(NormalizeFlags::ROTATION) {
        node.transform.rotation = Quat::IDENTITY;
    }

    if flags.contains(NormalizeFlags::SCALE) {
        node.transform.scale = Vec3::ONE;
    }
}
