//! Simulated entities: transform, physical properties, identity and motion.
//!
//! Actors come in a closed set of kinds. The kind-specific data lives in the
//! [`Body`] tagged union and behavior dispatches by matching on it; the
//! string form of a kind ([`ActorKind::as_str`]) is kept only as the stable
//! external identifier used in ids.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{DomainError, LogicError};
use super::gravity::{self, GravityField};
use super::registry::{ActorRegistry, Bounds};
use super::vector::Vector2;

/// Default mass of a freshly constructed actor.
pub const DEFAULT_MASS: f32 = 2.0;
/// Default gravity strength of a freshly constructed actor.
pub const DEFAULT_GRAVITY_STRENGTH: f32 = 0.001;
/// Hit points a new Pixol starts with.
pub const DEFAULT_PIXOL_HP: f32 = 100.0;

/// Discriminant of the actor kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    /// Plain actor. Does not move on its own.
    Actor,
    /// Renderable particle that falls toward gravity sources and bounces off walls.
    Pixol,
}

impl ActorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ActorKind; 2] = [ActorKind::Actor, ActorKind::Pixol];

    /// Stable name used as the id prefix.
    pub const fn as_str(self) -> &'static str {
        match self {
            ActorKind::Actor => "Actor",
            ActorKind::Pixol => "Pixol",
        }
    }

    /// Whether a host is expected to mirror this kind on screen.
    pub const fn is_renderable(self) -> bool {
        matches!(self, ActorKind::Pixol)
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActorKind {
    type Err = LogicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LogicError::UnknownKind(s.to_owned()))
    }
}

/// Registry-issued identity, rendered as `"<kind>_<sequence>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId {
    /// Kind the actor was registered under.
    pub kind: ActorKind,
    /// Per-kind spawn sequence, starting at 0.
    pub seq: u64,
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.kind, self.seq)
    }
}

/// Data carried by the plain `Actor` kind (none).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plain;

/// Data carried by the `Pixol` kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pixol {
    /// Hit points.
    pub hp: f32,
}

impl Default for Pixol {
    fn default() -> Self {
        Self {
            hp: DEFAULT_PIXOL_HP,
        }
    }
}

/// Kind-specific data, tagged by kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    /// See [`Plain`].
    Actor(Plain),
    /// See [`Pixol`].
    Pixol(Pixol),
}

impl Body {
    /// Default data for `kind`.
    pub fn default_for(kind: ActorKind) -> Self {
        match kind {
            ActorKind::Actor => Body::Actor(Plain),
            ActorKind::Pixol => Body::Pixol(Pixol::default()),
        }
    }

    /// The discriminant.
    pub fn kind(&self) -> ActorKind {
        match self {
            Body::Actor(_) => ActorKind::Actor,
            Body::Pixol(_) => ActorKind::Pixol,
        }
    }
}

/// Kind data that an [`Actor`] can be narrowed to.
pub trait ActorType: Sized {
    /// Kind this data belongs to.
    const KIND: ActorKind;

    /// Borrows the data if `body` is of this kind.
    fn narrow(body: &Body) -> Option<&Self>;

    /// Mutably borrows the data if `body` is of this kind.
    fn narrow_mut(body: &mut Body) -> Option<&mut Self>;

    /// Constructs an actor of this kind, registers it and returns it.
    ///
    /// This is the only way to obtain an actor the simulation will tick.
    fn spawn(registry: &mut ActorRegistry, transform: TransformInit) -> &mut Actor {
        registry.spawn_mut(Actor::with_body(Body::default_for(Self::KIND), transform))
    }
}

impl ActorType for Plain {
    const KIND: ActorKind = ActorKind::Actor;

    fn narrow(body: &Body) -> Option<&Self> {
        match body {
            Body::Actor(plain) => Some(plain),
            Body::Pixol(_) => None,
        }
    }

    fn narrow_mut(body: &mut Body) -> Option<&mut Self> {
        match body {
            Body::Actor(plain) => Some(plain),
            Body::Pixol(_) => None,
        }
    }
}

impl ActorType for Pixol {
    const KIND: ActorKind = ActorKind::Pixol;

    fn narrow(body: &Body) -> Option<&Self> {
        match body {
            Body::Pixol(pixol) => Some(pixol),
            Body::Actor(_) => None,
        }
    }

    fn narrow_mut(body: &mut Body) -> Option<&mut Self> {
        match body {
            Body::Pixol(pixol) => Some(pixol),
            Body::Actor(_) => None,
        }
    }
}

/// Partial initial transform. Unset fields take the actor defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformInit {
    /// Initial position (default: origin).
    pub position: Option<Vector2>,
    /// Initial velocity (default: zero).
    pub velocity: Option<Vector2>,
    /// Initial rotation in radians (default: 0).
    pub rotation: Option<f32>,
    /// Initial scale (default: 1).
    pub scale: Option<f32>,
}

impl TransformInit {
    /// Sets the initial position.
    pub fn with_position(mut self, position: Vector2) -> Self {
        self.position = Some(position);
        self
    }

    /// Sets the initial velocity.
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// Sets the initial rotation.
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = Some(rotation);
        self
    }

    /// Sets the initial scale.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Snapshot of the externally observable transform of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in world units.
    pub position: Vector2,
    /// Velocity in world units per unit of delta time.
    pub velocity: Vector2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale.
    pub scale: f32,
}

/// A simulated entity.
///
/// An actor built with [`Actor::new`] or [`Actor::with_body`] is detached: it
/// has no id and the simulation never sees it until it is spawned into an
/// [`ActorRegistry`].
#[derive(Debug, Clone)]
pub struct Actor {
    id: Option<ActorId>,
    is_active: bool,
    /// Position in world units.
    pub position: Vector2,
    /// Velocity in world units per unit of delta time.
    pub velocity: Vector2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Uniform scale.
    pub scale: f32,
    /// Mass, used when this actor acts as a gravity source.
    pub mass: f32,
    /// Gravity constant applied to this actor's pull.
    pub gravity_strength: f32,
    /// Whether this actor pulls on others.
    pub is_gravity_source: bool,
    /// Kind-specific data.
    pub body: Body,
}

impl Actor {
    /// Creates a detached plain actor.
    pub fn new(transform: TransformInit) -> Self {
        Self::with_body(Body::Actor(Plain), transform)
    }

    /// Creates a detached actor of the kind `body` is tagged with.
    pub fn with_body(body: Body, transform: TransformInit) -> Self {
        Self {
            id: None,
            is_active: true,
            position: transform.position.unwrap_or(Vector2::ZERO),
            velocity: transform.velocity.unwrap_or(Vector2::ZERO),
            rotation: transform.rotation.unwrap_or(0.0),
            scale: transform.scale.unwrap_or(1.0),
            mass: DEFAULT_MASS,
            gravity_strength: DEFAULT_GRAVITY_STRENGTH,
            is_gravity_source: false,
            body,
        }
    }

    /// Spawns a plain actor into `registry`.
    pub fn spawn(registry: &mut ActorRegistry, transform: TransformInit) -> &mut Actor {
        Plain::spawn(registry, transform)
    }

    /// Registry id, `None` while detached.
    pub fn id(&self) -> Option<ActorId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: ActorId) {
        self.id = Some(id);
    }

    /// Declared kind.
    pub fn kind(&self) -> ActorKind {
        self.body.kind()
    }

    /// Whether the simulation still ticks this actor.
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Removes the actor from simulation. There is no way back.
    pub fn deactivate(&mut self) {
        self.is_active = false;
    }

    /// Moves the actor in place.
    pub fn set_position(&mut self, position: Vector2) {
        self.position.x = position.x;
        self.position.y = position.y;
    }

    /// Snapshot of the observable transform.
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            velocity: self.velocity,
            rotation: self.rotation,
            scale: self.scale,
        }
    }

    /// Half-open containment: `0 <= x < width` and `0 <= y < height`.
    pub fn is_in_bounds(&self, bounds: Bounds) -> bool {
        let Vector2 { x, y } = self.position;
        x >= 0.0 && x < bounds.width && y >= 0.0 && y < bounds.height
    }

    /// Acceleration `source` exerts on `subject`.
    ///
    /// # Errors
    ///
    /// [`DomainError::ZeroLength`] when both positions coincide.
    pub fn gravity_pull(subject: &Actor, source: &Actor) -> Result<Vector2, DomainError> {
        gravity::pull(
            subject.position,
            source.position,
            source.mass,
            source.gravity_strength,
        )
    }

    /// Narrows to kind data `K`, or `None` if the kind differs.
    pub fn downcast<K: ActorType>(&self) -> Option<&K> {
        K::narrow(&self.body)
    }

    /// Mutable variant of [`Self::downcast`].
    pub fn downcast_mut<K: ActorType>(&mut self) -> Option<&mut K> {
        K::narrow_mut(&mut self.body)
    }

    /// Like [`Self::downcast`] but reports the mismatch.
    pub fn try_downcast<K: ActorType>(&self) -> Result<&K, LogicError> {
        self.downcast::<K>().ok_or(LogicError::KindMismatch {
            expected: K::KIND.as_str(),
            found: self.kind().as_str(),
        })
    }

    /// Advances this actor by `dt`.
    ///
    /// `field` holds the gravity sources as of the start of the tick.
    pub fn tick(&mut self, dt: f32, field: &GravityField, bounds: Bounds) {
        match self.body {
            Body::Actor(_) => {}
            Body::Pixol(_) => self.fall(dt, field, bounds),
        }
    }

    // gravity, then walls against the pre-move position, then integrate
    fn fall(&mut self, dt: f32, field: &GravityField, bounds: Bounds) {
        if !self.is_gravity_source {
            self.velocity += field.acceleration_on(self);
        }
        self.resolve_walls(bounds);
        self.position += self.velocity * dt;
        // keeps the published transform inside bounds of at least 1x1
        self.resolve_walls(bounds);
    }

    fn resolve_walls(&mut self, bounds: Bounds) {
        if self.is_in_bounds(bounds) {
            return;
        }
        let x = clamp_axis(self.position.x, bounds.width);
        let y = clamp_axis(self.position.y, bounds.height);
        if x != self.position.x {
            self.velocity.x = -self.velocity.x;
        }
        if y != self.position.y {
            self.velocity.y = -self.velocity.y;
        }
        self.set_position(Vector2::new(x, y));
    }
}

// Past the far wall the value lands on `bound - 1`, which is itself outside
// the world when `bound < 1`.
fn clamp_axis(value: f32, bound: f32) -> f32 {
    if value < 0.0 {
        0.0
    } else if value >= bound {
        bound - 1.0
    } else {
        value
    }
}
