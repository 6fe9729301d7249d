use serde::{Deserialize, Serialize};

use super::actor::{DEFAULT_GRAVITY_STRENGTH, DEFAULT_MASS, DEFAULT_PIXOL_HP};
use super::error::ConfigError;

/// Parameters controlling how a world is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Initial world width, until the host reports its viewport.
    pub world_width: f32,
    /// Initial world height, until the host reports its viewport.
    pub world_height: f32,
    /// Number of Pixols scattered around the midpoint.
    pub n_pixol: usize,
    /// Radius of the disk Pixols are scattered in.
    pub spawn_radius: f32,
    /// Scale of an ordinary Pixol.
    pub pixol_scale: f32,
    /// Scale of the central gravity source.
    pub source_scale: f32,
    /// Mass of the central gravity source.
    pub source_mass: f32,
    /// Mass of every other actor.
    pub actor_mass: f32,
    /// Gravity strength applied to every actor.
    pub gravity_strength: f32,
    /// Starting hit points of a Pixol.
    pub pixol_hp: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            world_width: 100.0,
            world_height: 100.0,
            n_pixol: 1000,
            spawn_radius: 500.0,
            pixol_scale: 0.05,
            source_scale: 0.3,
            source_mass: 5_500_000.0,
            actor_mass: DEFAULT_MASS,
            gravity_strength: DEFAULT_GRAVITY_STRENGTH,
            pixol_hp: DEFAULT_PIXOL_HP,
        }
    }
}

impl Params {
    /// Loads parameters from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&json)?;
        Ok(params)
    }

    /// Saves parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
