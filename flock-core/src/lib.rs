#![cfg_attr(not(feature = "std"), no_std)]

//! Boids flocking simulation.
//!
//! A fixed set of agents steers by separation, alignment and cohesion over a
//! toroidal domain. The host drives [`FlockSimulation::step`] once per frame
//! and reads back each agent's position and heading through its opaque
//! render handle.

extern crate alloc;

use core::f32::consts::TAU;
use rand::Rng;

pub mod behavior;
mod config;
mod error;
mod flock;
mod math;

pub use behavior::Steering;
pub use config::{Bounds, FlockConfig};
pub use error::ConfigError;
pub use flock::{AgentView, FlockSimulation};

/// A 2D vector used for position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2D {
    pub x: f32,
    pub y: f32,
}

impl Vector2D {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Unit vector pointing at a uniformly random angle.
    pub fn random_unit<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (sin, cos) = math::sin_cos(rng.gen_range(0.0..TAU));
        Self { x: cos, y: sin }
    }

    /// `a - b`.
    pub fn difference(a: Vector2D, b: Vector2D) -> Self {
        a - b
    }

    pub fn magnitude_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Computed without squaring first, so huge components do not overflow.
    pub fn magnitude(&self) -> f32 {
        math::hypot(self.x, self.y)
    }

    /// Returns the zero vector when `self` has no length.
    pub fn normalize(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            Self {
                x: self.x / mag,
                y: self.y / mag,
            }
        } else {
            Self::zero()
        }
    }

    pub fn set_magnitude(&self, magnitude: f32) -> Self {
        self.normalize() * magnitude
    }

    pub fn limit(&self, max: f32) -> Self {
        if self.magnitude() > max {
            self.set_magnitude(max)
        } else {
            *self
        }
    }

    /// Angle of the vector in radians, measured from the positive x axis.
    pub fn heading(&self) -> f32 {
        math::atan2(self.y, self.x)
    }

    pub fn distance(&self, other: &Vector2D) -> f32 {
        (*self - *other).magnitude()
    }
}

impl core::ops::Add for Vector2D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl core::ops::Sub for Vector2D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl core::ops::Mul<f32> for Vector2D {
    type Output = Self;

    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl core::ops::Div<f32> for Vector2D {
    type Output = Self;

    fn div(self, scalar: f32) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
        }
    }
}

impl core::ops::AddAssign for Vector2D {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl core::ops::SubAssign for Vector2D {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
    }
}

/// A single flocking agent.
///
/// `handle` is whatever the host uses to find its own presentation object
/// for this agent (a DOM node index, a sprite id). The simulation never
/// looks inside it.
#[derive(Debug, Clone)]
pub struct Boid<H> {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub handle: H,
}

impl<H> Boid<H> {
    pub fn new(handle: H, position: Vector2D, velocity: Vector2D) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            handle,
        }
    }

    /// Uniform position inside `bounds`, random heading, speed in `[0, max_speed]`.
    pub fn random<R: Rng + ?Sized>(
        handle: H,
        bounds: &Bounds,
        max_speed: f32,
        rng: &mut R,
    ) -> Self {
        let position = Vector2D::new(
            rng.gen_range(0.0..bounds.width()),
            rng.gen_range(0.0..bounds.height()),
        );
        let velocity = Vector2D::random_unit(rng) * rng.gen_range(0.0..=max_speed);
        Self::new(handle, position, velocity)
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Integrates one step and consumes the accumulated acceleration.
    pub fn update(&mut self, max_speed: f32) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2D::zero();
    }

    /// Toroidal wrap: leaving one edge re-enters at the opposite one.
    pub fn wrap_edges(&mut self, bounds: &Bounds) {
        if self.position.x < 0.0 {
            self.position.x = bounds.width();
        } else if self.position.x > bounds.width() {
            self.position.x = 0.0;
        }

        if self.position.y < 0.0 {
            self.position.y = bounds.height();
        } else if self.position.y > bounds.height() {
            self.position.y = 0.0;
        }
    }

    pub fn heading(&self) -> f32 {
        self.velocity.heading()
    }
}
