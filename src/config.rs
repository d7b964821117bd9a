//=========================================================================
// Lab Configuration
//=========================================================================
//
// Optional TOML file; every field falls back to the exercise defaults.
//
// ```toml
// start_scene = "galaxy"
// seed = 42
//
// [engine]
// tps = 60.0
// title = "Prism Lab"
//
// [galaxy]
// count = 50000
// inside_color = "#ff6030"
//
// [physics]
// max_substeps = 3
// enable_reset = true
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};

use glam::Vec3;
use log::info;
use serde::Deserialize;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::physics::WorldSettings;
use crate::procedural::GalaxyParameters;
use crate::scenes::LabScene;

//=== ConfigError =========================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid { field, reason: reason.into() }
}

//=== Sections ============================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tps: f64,
    pub channel_capacity: usize,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
            title: "Prism Lab".to_owned(),
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub root: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self { root: PathBuf::from("static") }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    pub fixed_step: f32,
    pub max_substeps: u32,
    pub friction: f32,
    pub restitution: f32,
    pub impact_threshold: f32,
    /// Exposes the bulk-reset entry of the sandbox panel.
    pub enable_reset: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.82, 0.0],
            fixed_step: 1.0 / 120.0,
            max_substeps: 3,
            friction: 0.1,
            restitution: 0.7,
            impact_threshold: 1.0,
            enable_reset: false,
        }
    }
}

impl PhysicsConfig {
    pub fn world_settings(&self) -> WorldSettings {
        WorldSettings {
            gravity: Vec3::from_array(self.gravity),
            friction: self.friction,
            restitution: self.restitution,
            ..WorldSettings::default()
        }
    }
}

//=== LabConfig ===========================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LabConfig {
    pub start_scene: LabScene,
    /// Seed for every procedural layout.
    pub seed: u64,
    pub engine: EngineConfig,
    pub assets: AssetConfig,
    pub galaxy: GalaxyParameters,
    pub physics: PhysicsConfig,
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            start_scene: LabScene::Start,
            seed: 0x5eed,
            engine: EngineConfig::default(),
            assets: AssetConfig::default(),
            galaxy: GalaxyParameters::default(),
            physics: PhysicsConfig::default(),
        }
    }
}

impl LabConfig {
    /// Reads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the engine would panic on or the scenes cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;
        if !(engine.tps.is_finite() && engine.tps > 0.0) {
            return Err(invalid("engine.tps", format!("must be positive, got {}", engine.tps)));
        }
        if engine.channel_capacity == 0 {
            return Err(invalid("engine.channel_capacity", "must be positive"));
        }
        if engine.title.trim().is_empty() {
            return Err(invalid("engine.title", "must not be empty"));
        }
        if engine.width == 0 || engine.height == 0 {
            return Err(invalid("engine.width/height", "must be non-zero"));
        }

        let galaxy = &self.galaxy;
        if galaxy.count == 0 {
            return Err(invalid("galaxy.count", "must be positive"));
        }
        if galaxy.branches == 0 {
            return Err(invalid("galaxy.branches", "must be positive"));
        }
        if galaxy.size <= 0.0 || galaxy.radius <= 0.0 {
            return Err(invalid("galaxy.size/radius", "must be positive"));
        }
        if galaxy.random_power < 1.0 {
            return Err(invalid("galaxy.random_power", "must be at least 1"));
        }

        let physics = &self.physics;
        if !(physics.fixed_step > 0.0 && physics.fixed_step <= 1.0) {
            return Err(invalid("physics.fixed_step", format!("must be in (0, 1], got {}", physics.fixed_step)));
        }
        if physics.max_substeps == 0 {
            return Err(invalid("physics.max_substeps", "must be positive"));
        }
        if physics.friction < 0.0 || physics.restitution < 0.0 {
            return Err(invalid("physics.friction/restitution", "must not be negative"));
        }
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let config = LabConfig::from_toml_str("").unwrap();
        assert_eq!(config, LabConfig::default());
        assert_eq!(config.physics.max_substeps, 3);
        assert_eq!(config.galaxy.count, 100_000);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = LabConfig::from_toml_str(
            r##"
            start_scene = "galaxy"
            seed = 7

            [galaxy]
            count = 5000
            inside_color = "#ff0000"

            [physics]
            enable_reset = true
            "##,
        )
        .unwrap();

        assert_eq!(config.start_scene, LabScene::Galaxy);
        assert_eq!(config.seed, 7);
        assert_eq!(config.galaxy.count, 5000);
        assert_eq!(config.galaxy.inside_color.to_hex(), 0xff0000);
        assert_eq!(config.galaxy.branches, 10);
        assert!(config.physics.enable_reset);
        assert_eq!(config.engine.width, 1280);
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let err = LabConfig::from_toml_str("[physics]\nmax_substeps = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "physics.max_substeps", .. }));

        let err = LabConfig::from_toml_str("[engine]\ntps = -1.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "engine.tps", .. }));
    }

    #[test]
    fn bad_color_and_unknown_scene_are_parse_errors() {
        assert!(matches!(
            LabConfig::from_toml_str("[galaxy]\ninside_color = \"red\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            LabConfig::from_toml_str("start_scene = \"nowhere\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LabConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn physics_section_maps_to_world_settings() {
        let settings = PhysicsConfig::default().world_settings();
        assert_eq!(settings, WorldSettings::default());
    }
}
