//! Owning store of every spawned actor.
//!
//! Actors are grouped per kind in the order kinds were first spawned, and
//! within a kind in insertion order. Nothing is ever removed: deactivation is
//! the only teardown, so an id stays valid for the lifetime of the registry.

use std::ops::Deref;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorKind, ActorType};
use super::error::DomainError;
use super::vector::Vector2;

/// Size of the rectangular world, anchored at the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Extent along x.
    pub width: f32,
    /// Extent along y.
    pub height: f32,
}

impl Bounds {
    /// Creates bounds without validation.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the world.
    pub fn midpoint(self) -> Vector2 {
        Vector2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Bounds as a vector `(width, height)`.
    pub fn as_vector(self) -> Vector2 {
        Vector2::new(self.width, self.height)
    }

    fn validate(self) -> Result<Self, DomainError> {
        let ok = |v: f32| v.is_finite() && v >= 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(DomainError::InvalidBounds {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

/// An actor narrowed to kind data `K`.
#[derive(Debug, Clone, Copy)]
pub struct KindRef<'a, K> {
    /// The actor.
    pub actor: &'a Actor,
    /// Its kind data.
    pub data: &'a K,
}

impl<K> Deref for KindRef<'_, K> {
    type Target = Actor;

    fn deref(&self) -> &Actor {
        self.actor
    }
}

#[derive(Debug, Clone)]
struct KindSlot {
    kind: ActorKind,
    count: u64,
    actors: Vec<Actor>,
}

/// Owns all actors, issues their ids and answers queries over them.
///
/// Also holds the world bounds every tick is checked against.
#[derive(Debug, Clone, Default)]
pub struct ActorRegistry {
    slots: Vec<KindSlot>,
    bounds: Bounds,
}

impl ActorRegistry {
    /// Creates an empty registry.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            slots: Vec::new(),
            bounds,
        }
    }

    /// Registers `actor` and returns its freshly minted id.
    pub fn spawn(&mut self, actor: Actor) -> ActorId {
        self.register(actor).0
    }

    /// Registers `actor` and returns it, already carrying its id.
    pub fn spawn_mut(&mut self, actor: Actor) -> &mut Actor {
        self.register(actor).1
    }

    // An actor cloned from a registered one gets a new id here.
    fn register(&mut self, mut actor: Actor) -> (ActorId, &mut Actor) {
        let kind = actor.kind();
        let index = match self.slots.iter().position(|slot| slot.kind == kind) {
            Some(index) => index,
            None => {
                self.slots.push(KindSlot {
                    kind,
                    count: 0,
                    actors: Vec::new(),
                });
                self.slots.len() - 1
            }
        };
        let slot = &mut self.slots[index];

        let id = ActorId {
            kind,
            seq: slot.count,
        };
        slot.count += 1;
        actor.assign_id(id);
        tracing::debug!(%id, "spawned actor");

        slot.actors.push(actor);
        let last = slot.actors.len() - 1;
        (id, &mut slot.actors[last])
    }

    fn slot(&self, kind: ActorKind) -> Option<&KindSlot> {
        self.slots.iter().find(|slot| slot.kind == kind)
    }

    /// Looks up an actor by id, active or not.
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.slot(id.kind)?
            .actors
            .get(usize::try_from(id.seq).ok()?)
            .filter(|actor| actor.id() == Some(id))
    }

    /// Mutable variant of [`Self::get`].
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        let index = usize::try_from(id.seq).ok()?;
        self.slots
            .iter_mut()
            .find(|slot| slot.kind == id.kind)?
            .actors
            .get_mut(index)
            .filter(|actor| actor.id() == Some(id))
    }

    /// Deactivates the actor with `id`. Returns `false` if no such actor exists.
    pub fn deactivate(&mut self, id: ActorId) -> bool {
        match self.get_mut(id) {
            Some(actor) => {
                actor.deactivate();
                true
            }
            None => false,
        }
    }

    /// Every actor matching `predicate`, active or not, kind by kind in
    /// first-spawn order.
    pub fn find(&self, predicate: impl Fn(&Actor) -> bool) -> Vec<&Actor> {
        self.iter().filter(|actor| predicate(actor)).collect()
    }

    /// Mutable variant of [`Self::find`].
    pub fn find_mut(&mut self, predicate: impl Fn(&Actor) -> bool) -> Vec<&mut Actor> {
        self.slots
            .iter_mut()
            .flat_map(|slot| slot.actors.iter_mut())
            .filter(|actor| predicate(actor))
            .collect()
    }

    /// Every actor registered as kind `K`, narrowed to `K`.
    ///
    /// Actors that fail to narrow are left out.
    pub fn all_of_kind<K: ActorType>(&self) -> Vec<KindRef<'_, K>> {
        self.slot(K::KIND)
            .map(|slot| {
                slot.actors
                    .iter()
                    .filter_map(|actor| actor.downcast::<K>().map(|data| KindRef { actor, data }))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All actors, active or not.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.slots.iter().flat_map(|slot| slot.actors.iter())
    }

    /// Lazy pass over every active actor, kind by kind in insertion order.
    ///
    /// Each call rescans the current state.
    pub fn iter_active(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.iter().filter(|actor| actor.is_active())
    }

    /// Mutable variant of [`Self::iter_active`]. The activity check happens
    /// as each actor is reached, not up front.
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Actor> + '_ {
        self.slots
            .iter_mut()
            .flat_map(|slot| slot.actors.iter_mut())
            .filter(|actor| actor.is_active())
    }

    pub(crate) fn par_active_mut(&mut self) -> impl ParallelIterator<Item = &mut Actor> + '_ {
        self.slots
            .par_iter_mut()
            .flat_map(|slot| slot.actors.par_iter_mut())
            .filter(|actor| actor.is_active())
    }

    /// Total number of registered actors, active or not.
    pub fn len(&self) -> usize {
        self.slots.iter().map(|slot| slot.actors.len()).sum()
    }

    /// Whether nothing was spawned yet.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.actors.is_empty())
    }

    /// Number of actors ever spawned as `kind`.
    pub fn spawn_count(&self, kind: ActorKind) -> u64 {
        self.slot(kind).map_or(0, |slot| slot.count)
    }

    /// Current world bounds.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Center of the current world bounds.
    pub fn midpoint(&self) -> Vector2 {
        self.bounds.midpoint()
    }

    /// Replaces the world bounds. Rejects non-finite or negative dimensions
    /// and keeps the previous bounds in that case.
    pub fn set_bounds(&mut self, width: f32, height: f32) -> Result<(), DomainError> {
        self.bounds = Bounds::new(width, height).validate()?;
        tracing::info!(width, height, "world bounds changed");
        Ok(())
    }
}
