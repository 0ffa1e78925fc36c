//! Fixed-step physics clock.
//!
//! Collision resolution and the grid traversal give different answers for
//! different step sizes, so the simulation never sees the raw frame delta.
//! Each frame's delta is clamped to `max_step` and split into equal
//! sub-steps no longer than `world_step`.

use crate::config::SimConfig;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    world_step: f64,
    max_step: f64,
}

impl FrameClock {
    pub fn new(world_step: f64, max_step: f64) -> Result<Self, ConfigError> {
        if !(world_step > 0.0 && world_step.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "sim.world_time_step",
                reason: format!("must be positive and finite, got {world_step}"),
            });
        }
        Ok(Self {
            world_step,
            max_step,
        })
    }

    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        Self::new(config.world_time_step, config.max_time_step)
    }

    /// `(count, step)` such that `count * step` equals the clamped delta.
    /// A zero or negative delta yields no steps.
    pub fn substeps(&self, delta: f64) -> (usize, f64) {
        let delta = delta.min(self.max_step);
        if !(delta > 0.0) {
            return (0, 0.0);
        }
        let count = (delta / self.world_step).ceil();
        (count as usize, delta / count)
    }
}
