//! Hierarchy rearrangement
//!
//! Takes ownership of an authored source object and rebuilds it into the
//! canonical kit layout: a root named after the sanitized source name with
//! exactly two children, `model` (the original hierarchy) and `collider`
//! (the translated collider geometry). The steps run strictly in order;
//! none of them aborts the item — problems degrade the output and are
//! reported as warnings.

use kitforge_scene::{
    AssetLibrary, Component, Material, Mesh, MeshRenderer, SceneObject, Transform,
};

use crate::adjust::{clear_static_recursive, set_lights_realtime, substitute_shader};
use crate::normalize::normalize;
use crate::policy::{ConvertPolicy, COLLIDER_LAYER};
use crate::translate::{attach_default_box, collect_colliders, strip_colliders, translate};
use crate::warning::ConvertWarning;

/// Fixed name of the first kit child carrying the source hierarchy
pub const MODEL_NODE_NAME: &str = "model";

/// Fixed name of the second kit child carrying the collider geometry
pub const COLLIDER_NODE_NAME: &str = "collider";

/// A rearranged kit with the warnings gathered along the way
#[derive(Debug)]
pub struct RearrangeResult {
    /// The kit root: two children, `model` then `collider`
    pub root: SceneObject,
    pub warnings: Vec<ConvertWarning>,
}

/// Derive a filesystem-safe kit name from a source object name
///
/// Reserved path characters and control characters become underscores; a
/// name that sanitizes to nothing becomes `"unnamed"`.
pub fn sanitize_name(raw: &str) -> String {
    let sanitized: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() {
        "unnamed".to_string()
    } else {
        sanitized
    }
}

/// Rebuild `source` into the canonical kit layout
pub fn rearrange(
    mut source: SceneObject,
    policy: &ConvertPolicy,
    assets: &mut AssetLibrary,
) -> RearrangeResult {
    let mut warnings = Vec::new();
    let root_name = sanitize_name(&source.name);

    // A kit must never be renderless; give empty sources a hidden
    // placeholder cube before anything else touches the tree.
    if !source.has_renderer_in_tree() {
        let cube = assets.intern_mesh("unit_cube", Mesh::unit_cube);
        source.components.push(Component::Renderer(MeshRenderer {
            enabled: false,
            mesh: Some(cube),
            material: Material::default(),
        }));
        log::debug!("'{}' has no renderer; added a disabled placeholder cube", root_name);
    }

    normalize(&mut source, policy.normalize);

    if policy.lights_realtime {
        set_lights_realtime(&mut source);
    }
    substitute_shader(&mut source, policy.shader, policy.default_shader_only);

    let mut root = SceneObject::new(&root_name);

    // Static flags are cleared while the source still heads its own tree;
    // the recursive walk must start from the node being re-parented.
    if policy.unset_static {
        clear_static_recursive(&mut source);
    }

    source.name = MODEL_NODE_NAME.to_string();
    let model_layer = source.layer;
    let model_transform = source.transform;

    // The collider branch either goes to the reserved layer or stays on
    // the model's, and starts out aligned with the model so translated
    // geometry lines up.
    let mut collider_node = SceneObject::new(COLLIDER_NODE_NAME)
        .with_layer(if policy.set_collider_layer { COLLIDER_LAYER } else { model_layer })
        .with_transform(model_transform);

    let captures = collect_colliders(&source);
    if captures.len() > 1 {
        let warning = ConvertWarning::MultipleColliders { count: captures.len() };
        log::warn!("{}", warning);
        warnings.push(warning);
    }

    let on_sub_node = captures.len() > 1;
    let mut added = false;
    for capture in &captures {
        added |= translate(
            capture,
            &mut collider_node,
            &Transform::identity(),
            on_sub_node,
            &mut warnings,
        );
    }

    // The originals must not survive as duplicates on the model branch.
    strip_colliders(&mut source);

    if !added {
        attach_default_box(&mut collider_node);
    }

    root.attach_child(source);
    root.attach_child(collider_node);

    RearrangeResult { root, warnings }
}
