//! The simulation context: a registry plus the clock that drives it.
//!
//! The host creates one [`World`], calls [`World::step`] once per frame and
//! reads actor transforms back out of [`World::registry`] to draw them.

use rand::Rng;
use rayon::prelude::*;

use super::actor::{Actor, ActorId, ActorKind, Body, Pixol, TransformInit};
use super::error::DomainError;
use super::gravity::GravityField;
use super::params::Params;
use super::registry::{ActorRegistry, Bounds};
use super::vector::Vector2;

/// A running simulation.
#[derive(Debug, Clone, Default)]
pub struct World {
    registry: ActorRegistry,
    /// Total delta time simulated so far.
    pub time: f32,
    /// Number of completed ticks.
    pub ticks: u64,
}

impl World {
    /// Creates an empty world with the given bounds.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            registry: ActorRegistry::new(bounds),
            time: 0.0,
            ticks: 0,
        }
    }

    /// Creates an empty world sized by `params`.
    pub fn from_params(params: &Params) -> Self {
        Self::new(Bounds::new(params.world_width, params.world_height))
    }

    /// The actor registry.
    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    /// Mutable access to the actor registry.
    pub fn registry_mut(&mut self) -> &mut ActorRegistry {
        &mut self.registry
    }

    /// Spawns an actor of `kind` with default kind data.
    pub fn spawn(&mut self, kind: ActorKind, transform: TransformInit) -> ActorId {
        self.registry
            .spawn(Actor::with_body(Body::default_for(kind), transform))
    }

    /// Scatters `params.n_pixol` Pixols over a disk around the midpoint and
    /// places one Pixol gravity source at the midpoint.
    ///
    /// Returns the id of the gravity source.
    pub fn populate<R: Rng + ?Sized>(&mut self, params: &Params, rng: &mut R) -> ActorId {
        let center = self.registry.midpoint();

        for _ in 0..params.n_pixol {
            let position = Vector2::random_in_radius(rng, center, params.spawn_radius);
            let mut actor = Actor::with_body(
                Body::Pixol(Pixol { hp: params.pixol_hp }),
                TransformInit::default()
                    .with_position(position)
                    .with_scale(params.pixol_scale),
            );
            actor.mass = params.actor_mass;
            actor.gravity_strength = params.gravity_strength;
            self.registry.spawn(actor);
        }

        let mut source = Actor::with_body(
            Body::Pixol(Pixol { hp: params.pixol_hp }),
            TransformInit::default()
                .with_position(center)
                .with_scale(params.source_scale),
        );
        source.is_gravity_source = true;
        source.mass = params.source_mass;
        source.gravity_strength = params.gravity_strength;
        let id = self.registry.spawn(source);

        tracing::info!(
            pixols = params.n_pixol,
            source = %id,
            "populated world"
        );
        id
    }

    /// Replaces the world bounds. The next tick uses them.
    pub fn set_world_bounds(&mut self, width: f32, height: f32) -> Result<(), DomainError> {
        self.registry.set_bounds(width, height)
    }

    /// Moves the actor with `id` to the current midpoint.
    ///
    /// Returns `false` if no such actor exists.
    pub fn recenter(&mut self, id: ActorId) -> bool {
        let center = self.registry.midpoint();
        match self.registry.get_mut(id) {
            Some(actor) => {
                actor.set_position(center);
                true
            }
            None => false,
        }
    }

    /// Advances every active actor by `dt`.
    ///
    /// Gravity is evaluated against source positions from before the tick,
    /// so actors are updated in parallel and in no particular order.
    /// A negative or non-finite `dt` skips the tick.
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(dt, "ignoring tick with invalid delta time");
            return;
        }

        let field = GravityField::capture(&self.registry);
        let bounds = self.registry.bounds();

        self.registry
            .par_active_mut()
            .for_each(|actor| actor.tick(dt, &field, bounds));

        self.time += dt;
        self.ticks += 1;
        tracing::debug!(
            tick = self.ticks,
            dt,
            active = field.active_count(),
            sources = field.sources().len(),
            "tick complete"
        );
    }
}
