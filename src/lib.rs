//! Rampage: a grid ray-casting renderer and collision core for a
//! Wolfenstein-style first-person game.
//!
//! The world is a flat grid of unit tiles seen from a fixed eye height.
//! [`renderer::Renderer`] casts one ray per screen column through a
//! read-only [`world::World`]; the simulation moves actors in fixed
//! sub-steps and keeps them out of walls through the [`actor::Actor`] trait.

pub mod actor;
pub mod billboard;
pub mod bitmap;
pub mod camera;
pub mod clock;
pub mod config;
pub mod effect;
pub mod error;
pub mod ray;
pub mod rect;
pub mod renderer;
pub mod rng;
pub mod scaler;
pub mod texture;
pub mod tilemap;
pub mod vector;
pub mod world;

pub use error::{ConfigError, MapError};

/// The level that ships with the binary.
pub const DEFAULT_LEVEL: &str = include_str!("../assets/level.toml");
