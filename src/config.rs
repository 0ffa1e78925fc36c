use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Internal framebuffer height; width follows the window aspect.
    pub internal_height: usize,
    pub min_internal_width: usize,
    pub window_width: u32,
    pub window_height: u32,
    /// Square size of the generated placeholder textures.
    pub texture_size: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            internal_height: 480,
            min_internal_width: 160,
            window_width: 800,
            window_height: 600,
            texture_size: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed physics step in seconds.
    pub world_time_step: f64,
    /// Longest wall-clock delta simulated in a single frame.
    pub max_time_step: f64,
    /// Map units per second.
    pub move_speed: f64,
    /// Radians per second.
    pub turn_speed: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world_time_step: 1.0 / 120.0,
            max_time_step: 1.0 / 20.0,
            move_speed: 2.0,
            turn_speed: std::f64::consts::PI,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub sim: SimConfig,
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            sim: SimConfig::default(),
            seed: 0x5eed,
        }
    }
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: &str| {
            Err(ConfigError::Invalid {
                field,
                reason: reason.to_string(),
            })
        };
        let sim = &self.sim;
        if !(sim.world_time_step > 0.0 && sim.world_time_step.is_finite()) {
            return invalid("sim.world_time_step", "must be positive and finite");
        }
        if !(sim.max_time_step >= sim.world_time_step && sim.max_time_step.is_finite()) {
            return invalid("sim.max_time_step", "must be finite and at least world_time_step");
        }
        if self.render.internal_height == 0 {
            return invalid("render.internal_height", "must be non-zero");
        }
        if self.render.texture_size == 0 {
            return invalid("render.texture_size", "must be non-zero");
        }
        Ok(())
    }
}
