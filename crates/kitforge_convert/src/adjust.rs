//! Static-flag, light, and shader adjustment
//!
//! Three independent, idempotent rewrites over the source subtree. Each is
//! gated by its own policy flag at the call site; the operations themselves
//! are unconditional.

use kitforge_scene::{Component, LightBake, SceneObject, ShaderId};

use crate::policy::ShaderSelect;

/// Unset the static flag on the node and every descendant
///
/// Must run while the node is still the head of its own tree; the walk
/// starts from the node that is about to be re-parented.
pub fn clear_static_recursive(node: &mut SceneObject) {
    node.visit_mut(&mut |n| n.is_static = false);
}

/// Force every light in the subtree to realtime bake mode
///
/// Other light properties are left untouched. The platform cannot consume
/// baked lighting data from kits.
pub fn set_lights_realtime(node: &mut SceneObject) {
    node.visit_mut(&mut |n| {
        for component in &mut n.components {
            if let Component::Light(light) = component {
                light.bake = LightBake::Realtime;
            }
        }
    });
}

/// Replace renderer shaders in the subtree per the policy selection
///
/// A selection of `NoChange` resolves to no shader and the whole operation
/// is a silent no-op; that is valid configuration, not an error. With
/// `default_only`, only renderers currently on the platform default shader
/// are rewritten.
pub fn substitute_shader(node: &mut SceneObject, select: ShaderSelect, default_only: bool) {
    let Some(shader) = select.resolve() else {
        return;
    };

    node.visit_mut(&mut |n| {
        for component in &mut n.components {
            if let Component::Renderer(renderer) = component {
                if renderer.material.shader == ShaderId::Standard || !default_only {
                    renderer.material.shader = shader.clone();
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitforge_scene::{Light, Material, MeshRenderer};

    fn light_node(bake: LightBake) -> SceneObject {
        SceneObject::new("light").with_component(Component::Light(Light {
            bake,
            ..Default::default()
        }))
    }

    fn renderer_with_shader(shader: ShaderId) -> Component {
        Component::Renderer(MeshRenderer {
            enabled: true,
            mesh: None,
            material: Material::with_shader(shader),
        })
    }

    #[test]
    fn test_clear_static_recursive() {
        let mut tree = SceneObject::new("a").with_static(true).with_child(
            SceneObject::new("b")
                .with_static(true)
                .with_child(SceneObject::new("c").with_static(true)),
        );

        clear_static_recursive(&mut tree);

        let mut any_static = false;
        tree.visit(&mut |n| any_static |= n.is_static);
        assert!(!any_static);
    }

    #[test]
    fn test_clear_static_is_idempotent() {
        let mut tree = SceneObject::new("a").with_static(true);
        clear_static_recursive(&mut tree);
        clear_static_recursive(&mut tree);
        assert!(!tree.is_static);
    }

    #[test]
    fn test_lights_forced_realtime() {
        let mut tree = SceneObject::new("rig")
            .with_child(light_node(LightBake::Baked))
            .with_child(SceneObject::new("arm").with_child(light_node(LightBake::Mixed)));

        set_lights_realtime(&mut tree);

        tree.visit(&mut |n| {
            for c in &n.components {
                if let Some(light) = c.as_light() {
                    assert_eq!(light.bake, LightBake::Realtime);
                }
            }
        });
    }

    #[test]
    fn test_lights_other_fields_untouched() {
        let mut node = SceneObject::new("light").with_component(Component::Light(Light {
            enabled: false,
            bake: LightBake::Baked,
            color: [1.0, 0.5, 0.25],
            intensity: 3.0,
        }));

        set_lights_realtime(&mut node);

        let light = node.components[0].as_light().unwrap();
        assert_eq!(light.bake, LightBake::Realtime);
        assert!(!light.enabled);
        assert_eq!(light.color, [1.0, 0.5, 0.25]);
        assert_eq!(light.intensity, 3.0);
    }

    #[test]
    fn test_shader_no_change_is_noop() {
        let mut node =
            SceneObject::new("n").with_component(renderer_with_shader(ShaderId::Standard));
        substitute_shader(&mut node, ShaderSelect::NoChange, false);

        let renderer = node.components[0].as_renderer().unwrap();
        assert_eq!(renderer.material.shader, ShaderId::Standard);
    }

    #[test]
    fn test_shader_default_only_restriction() {
        let mut tree = SceneObject::new("n")
            .with_component(renderer_with_shader(ShaderId::Standard))
            .with_component(renderer_with_shader(ShaderId::Custom("Toon".to_string())));

        substitute_shader(&mut tree, ShaderSelect::DiffuseVertex, true);

        let first = tree.components[0].as_renderer().unwrap();
        let second = tree.components[1].as_renderer().unwrap();
        assert_eq!(first.material.shader, ShaderId::DiffuseVertex);
        // Non-default shader never modified under the restriction
        assert_eq!(second.material.shader, ShaderId::Custom("Toon".to_string()));
    }

    #[test]
    fn test_shader_unrestricted_rewrites_all() {
        let mut tree = SceneObject::new("n")
            .with_component(renderer_with_shader(ShaderId::Standard))
            .with_child(
                SceneObject::new("m")
                    .with_component(renderer_with_shader(ShaderId::Custom("Toon".to_string()))),
            );

        substitute_shader(&mut tree, ShaderSelect::Unlit, false);

        tree.visit(&mut |n| {
            for c in &n.components {
                if let Some(r) = c.as_renderer() {
                    assert_eq!(r.material.shader, ShaderId::UnlitLightmap);
                }
            }
        });
    }
}
