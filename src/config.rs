//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`KF_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use kitforge_convert::{ConvertPolicy, NormalizeFlags, ShaderSelect};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KitConfig {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Scene input configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Conversion policy configuration
    #[serde(default)]
    pub policy: PolicyConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for KitConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            scene: SceneConfig::default(),
            policy: PolicyConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

impl KitConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`KF_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // KF_OUTPUT__ROOT_DIR=/kits -> output.root_dir = "/kits"
        figment = figment.merge(Env::prefixed("KF_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory converted kits are written to
    pub root_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root_dir: "kits".to_string(),
        }
    }
}

/// Scene input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Path of the scene document listing the objects to convert
    pub path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "assets/scenes/sample.ron".to_string(),
        }
    }
}

/// Conversion policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Place the collider branch on the reserved layer
    pub set_collider_layer: bool,
    /// Force lights in converted kits to realtime bake mode
    pub lights_realtime: bool,
    /// Reset the source's local position
    pub normalize_position: bool,
    /// Reset the source's local rotation
    pub normalize_rotation: bool,
    /// Reset the source's local scale
    pub normalize_scale: bool,
    /// Shader substitution: "none", "vertex" or "unlit"
    pub shader: String,
    /// Only substitute shaders on renderers using the platform default
    pub default_shader_only: bool,
    /// Clear static flags on conversion
    pub unset_static: bool,
    /// Drop the working copy once the kit is serialized
    pub destroy_after_generation: bool,
    /// Capture a preview screenshot per kit
    pub generate_screenshot: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            set_collider_layer: false,
            lights_realtime: true,
            normalize_position: false,
            normalize_rotation: false,
            normalize_scale: false,
            shader: "none".to_string(),
            default_shader_only: true,
            unset_static: true,
            destroy_after_generation: true,
            generate_screenshot: true,
        }
    }
}

impl PolicyConfig {
    /// Build the immutable policy snapshot the pipeline runs under
    pub fn to_policy(&self) -> ConvertPolicy {
        let mut normalize = NormalizeFlags::NONE;
        if self.normalize_position {
            normalize |= NormalizeFlags::POSITION;
        }
        if self.normalize_rotation {
            normalize |= NormalizeFlags::ROTATION;
        }
        if self.normalize_scale {
            normalize |= NormalizeFlags::SCALE;
        }

        let shader = match self.shader.as_str() {
            "vertex" => ShaderSelect::DiffuseVertex,
            "unlit" => ShaderSelect::Unlit,
            "none" => ShaderSelect::NoChange,
            other => {
                log::warn!("Unknown shader selection '{}'; shaders left unchanged", other);
                ShaderSelect::NoChange
            }
        };

        ConvertPolicy {
            set_collider_layer: self.set_collider_layer,
            lights_realtime: self.lights_realtime,
            normalize,
            shader,
            default_shader_only: self.default_shader_only,
            unset_static: self.unset_static,
            destroy_after_generation: self.destroy_after_generation,
            generate_screenshot: self.generate_screenshot,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KitConfig::default();
        assert_eq!(config.output.root_dir, "kits");
        assert_eq!(config.policy.shader, "none");
        assert!(config.policy.unset_static);
    }

    #[test]
    fn test_config_serialization() {
        let config = KitConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("root_dir"));
        assert!(toml.contains("generate_screenshot"));
    }

    #[test]
    fn test_to_policy_maps_flags() {
        let mut config = PolicyConfig::default();
        config.normalize_position = true;
        config.normalize_scale = true;
        config.shader = "vertex".to_string();

        let policy = config.to_policy();
        assert!(policy.normalize.contains(NormalizeFlags::POSITION));
        assert!(!policy.normalize.contains(NormalizeFlags::ROTATION));
        assert!(policy.normalize.contains(NormalizeFlags::SCALE));
        assert_eq!(policy.shader, ShaderSelect::DiffuseVertex);
    }

    #[test]
    fn test_to_policy_unknown_shader_is_no_change() {
        let mut config = PolicyConfig::default();
        config.shader = "holographic".to_string();
        assert_eq!(config.to_policy().shader, ShaderSelect::NoChange);
    }
}
