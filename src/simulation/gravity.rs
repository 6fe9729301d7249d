//! Point-gravity model.
//!
//! A tick reads source positions from a [`GravityField`] captured before any
//! actor moves, so the whole population advances as of one time slice no
//! matter in which order (or on which thread) actors are updated.

use super::actor::{Actor, ActorId};
use super::error::DomainError;
use super::registry::ActorRegistry;
use super::vector::Vector2;

/// Acceleration a point source at `source` exerts on a subject at `subject`.
///
/// Magnitude is `strength * mass / r²`, directed from the subject toward the
/// source.
///
/// # Errors
///
/// [`DomainError::ZeroLength`] when the two points coincide.
pub fn pull(
    subject: Vector2,
    source: Vector2,
    mass: f32,
    strength: f32,
) -> Result<Vector2, DomainError> {
    let direction = subject.direction_of(source)?;
    let r = subject.distance_to(source);
    Ok(direction * (strength * mass / r.powi(2)))
}

/// A gravity source frozen at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitySource {
    /// Id of the source actor.
    pub id: ActorId,
    /// Pre-tick position.
    pub position: Vector2,
    /// Source mass.
    pub mass: f32,
    /// Source gravity strength.
    pub strength: f32,
}

/// Every active gravity source of a registry, as of one instant.
#[derive(Debug, Clone, Default)]
pub struct GravityField {
    sources: Vec<GravitySource>,
    active: usize,
}

impl GravityField {
    /// Captures the active gravity sources of `registry`, counting every
    /// active actor along the way.
    pub fn capture(registry: &ActorRegistry) -> Self {
        let mut field = Self::default();
        for actor in registry.iter_active() {
            field.active += 1;
            if !actor.is_gravity_source {
                continue;
            }
            if let Some(id) = actor.id() {
                field.sources.push(GravitySource {
                    id,
                    position: actor.position,
                    mass: actor.mass,
                    strength: actor.gravity_strength,
                });
            }
        }
        field
    }

    /// Number of active actors at capture time.
    pub fn active_count(&self) -> usize {
        self.active
    }

    /// The captured sources.
    pub fn sources(&self) -> &[GravitySource] {
        &self.sources
    }

    /// Summed acceleration of every source other than `actor` itself.
    ///
    /// A source sitting exactly on the actor contributes nothing.
    pub fn acceleration_on(&self, actor: &Actor) -> Vector2 {
        let own_id = actor.id();
        self.sources
            .iter()
            .filter(|source| Some(source.id) != own_id)
            .fold(Vector2::ZERO, |total, source| {
                match pull(actor.position, source.position, source.mass, source.strength) {
                    Ok(accel) => total + accel,
                    Err(err) => {
                        tracing::trace!(source = %source.id, %err, "skipping coincident gravity source");
                        total
                    }
                }
            })
    }
}
