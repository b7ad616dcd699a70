//! Conversion policy
//!
//! A [`ConvertPolicy`] is an immutable snapshot of every decision point in
//! the pipeline. It is taken once per batch run and threaded by reference
//! into each operation; nothing re-reads shared settings mid-run, so every
//! item in a batch is processed under the same policy.

use bitflags::bitflags;
use kitforge_scene::ShaderId;

/// The reserved layer colliders are placed on when
/// [`ConvertPolicy::set_collider_layer`] is enabled
pub const COLLIDER_LAYER: u8 = 14;

bitflags! {
    /// Which local transform channels to reset on the source object
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NormalizeFlags: u8 {
        /// No normalization
        const NONE = 0;
        /// Reset local position to the zero vector
        const POSITION = 1 << 0;
        /// Reset local rotation to identity (zero Euler angles)
        const ROTATION = 1 << 1;
        /// Reset local scale to the unit vector
        const SCALE = 1 << 2;
        /// All channels
        const ALL = Self::POSITION.bits() | Self::ROTATION.bits() | Self::SCALE.bits();
    }
}

/// Which shader to substitute onto renderers during conversion
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShaderSelect {
    /// Leave shaders untouched
    #[default]
    NoChange,
    /// Substitute the vertex-lit diffuse shader
    DiffuseVertex,
    /// Substitute the unlit lightmap-capable shader
    Unlit,
}

impl ShaderSelect {
    /// Resolve the selection to a concrete shader
    ///
    /// `None` means no substitution should happen; callers treat it as a
    /// silent no-op, the same as an unresolvable shader would be.
    pub fn resolve(&self) -> Option<ShaderId> {
        match self {
            ShaderSelect::NoChange => None,
            ShaderSelect::DiffuseVertex => Some(ShaderId::DiffuseVertex),
            ShaderSelect::Unlit => Some(ShaderId::UnlitLightmap),
        }
    }
}

/// Immutable per-batch policy snapshot
#[derive(Clone, Debug)]
pub struct ConvertPolicy {
    /// Place the collider branch on the reserved layer [`COLLIDER_LAYER`]
    /// instead of inheriting the model's layer
    pub set_collider_layer: bool,
    /// Force every light in the converted subtree to realtime bake mode
    pub lights_realtime: bool,
    /// Local transform channels to reset on the source
    pub normalize: NormalizeFlags,
    /// Shader substitution applied to renderers in the subtree
    pub shader: ShaderSelect,
    /// Restrict shader substitution to renderers currently on the
    /// platform default shader
    pub default_shader_only: bool,
    /// Recursively clear static flags before re-parenting
    pub unset_static: bool,
    /// Drop the live working copy once the kit is serialized
    pub destroy_after_generation: bool,
    /// Capture a preview screenshot per converted kit
    pub generate_screenshot: bool,
}

impl Default for ConvertPolicy {
    fn default() -> Self {
        Self {
            set_collider_layer: false,
            lights_realtime: true,
            normalize: NormalizeFlags::NONE,
            shader: ShaderSelect::NoChange,
            default_shader_only: true,
            unset_static: true,
            destroy_after_generation: true,
            generate_screenshot: true,
        }
    }
}
