//! Two-dimensional vector value type used for positions and velocities.
//!
//! Every operation returns a new value. The only in-place mutation happens
//! through the public fields, which [`Actor::set_position`] relies on.
//!
//! [`Actor::set_position`]: super::actor::Actor::set_position

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A point or displacement in the simulation plane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    /// Horizontal component.
    pub x: f32,
    /// Vertical component.
    pub y: f32,
}

#[allow(clippy::should_implement_trait)]
impl Vector2 {
    /// The origin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a vector from its components.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean norm. Never negative.
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Square of [`Self::length`].
    pub fn length_squared(self) -> f32 {
        self.length().powi(2)
    }

    /// Component-wise sum.
    pub fn add(self, b: Self) -> Self {
        Self::new(self.x + b.x, self.y + b.y)
    }

    /// Component-wise difference.
    pub fn sub(self, b: Self) -> Self {
        Self::new(self.x - b.x, self.y - b.y)
    }

    /// Component-wise product.
    pub fn multiply(self, b: Self) -> Self {
        Self::new(self.x * b.x, self.y * b.y)
    }

    /// Scales both components by `scalar`.
    pub fn multiply_scalar(self, scalar: f32) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    /// Dot product.
    pub fn dot(self, b: Self) -> f32 {
        self.x * b.x + self.y * b.y
    }

    /// Distance between the two points.
    pub fn distance_to(self, b: Self) -> f32 {
        self.sub(b).length()
    }

    /// Unit vector with the same direction.
    ///
    /// # Errors
    ///
    /// [`DomainError::ZeroLength`] when the vector has no length.
    pub fn normalize(self) -> Result<Self, DomainError> {
        let len = self.length();
        if len == 0.0 {
            return Err(DomainError::ZeroLength);
        }
        Ok(Self::new(self.x / len, self.y / len))
    }

    /// Unit vector pointing from `self` toward `b`.
    ///
    /// # Errors
    ///
    /// [`DomainError::ZeroLength`] when both points coincide.
    pub fn direction_of(self, b: Self) -> Result<Self, DomainError> {
        b.sub(self).normalize()
    }

    /// Samples a point uniformly distributed over the disk of `radius`
    /// centered at `origin`.
    ///
    /// The radial distance is `radius * sqrt(u)` so that density is uniform
    /// per unit area rather than clustered at the center.
    pub fn random_in_radius<R: Rng + ?Sized>(rng: &mut R, origin: Self, radius: f32) -> Self {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let r = radius * rng.random::<f32>().sqrt();
        origin.add(Self::new(r * angle.cos(), r * angle.sin()))
    }
}

impl From<(f32, f32)> for Vector2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vector2::add(self, rhs)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        *self = Vector2::add(*self, rhs);
    }
}

impl Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vector2::sub(self, rhs)
    }
}

impl Mul<f32> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        self.multiply_scalar(rhs)
    }
}

impl Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}
