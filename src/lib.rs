//! # Graviton - Point-Gravity Particle Simulation
//!
//! A population of point-mass particles ("pixols") falling toward one or more
//! gravity sources inside a rectangular world, integrated once per tick.
//!
//! ## Features
//!
//! - Registry with stable per-kind ids (`"Pixol_0"`, `"Pixol_1"`, ...)
//! - Inverse-square point gravity from any number of sources
//! - Semi-implicit Euler integration scaled by frame delta time
//! - Elastic wall collisions that clamp and reflect velocity
//! - Soft deletion: inactive actors stay registered but stop moving
//!
//! ## Core Modules
//!
//! - [`simulation::vector`] - 2D vector math
//! - [`simulation::actor`] - Actor state and kind dispatch
//! - [`simulation::registry`] - Actor ownership, ids and queries
//! - [`simulation::gravity`] - Gravity model and per-tick source snapshot
//! - [`simulation::world`] - Per-tick orchestration
//!
//! Drawing is left to the host; see `src/main.rs` for a `macroquad` one.

/// Core simulation logic and data structures.
pub mod simulation {
    /// Actors, their kinds and per-tick motion.
    pub mod actor;
    /// Error types.
    pub mod error;
    /// Point-gravity model.
    pub mod gravity;
    /// Population parameters.
    pub mod params;
    /// Actor registry and world bounds.
    pub mod registry;
    /// 2D vector value type.
    pub mod vector;
    /// Simulation context driving ticks.
    pub mod world;
}
