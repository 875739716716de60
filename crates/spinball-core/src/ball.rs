use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// A 2D vector in arena units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const ZERO: Self = Self::new(0.0, 0.0);

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// The single simulated ball.
///
/// `radius` and `mass` are fixed once constructed; the kinematic fields are
/// rewritten in place by the resolver and the integrator every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    /// Orientation in radians. Visual only.
    pub(crate) rotation: f32,
    pub(crate) angular_velocity: f32,
    radius: f32,
    mass: f32,
}

impl Ball {
    pub fn new(
        position: Vec2,
        velocity: Vec2,
        angular_velocity: f32,
        radius: f32,
        mass: f32,
    ) -> Result<Self, SimError> {
        let ball = Self {
            position,
            velocity,
            rotation: 0.0,
            angular_velocity,
            radius,
            mass,
        };
        ball.validate()?;
        Ok(ball)
    }

    /// Check radius and mass are positive and every quantity is finite.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SimError::InvalidRadius(self.radius));
        }
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(SimError::InvalidMass(self.mass));
        }
        if !self.is_finite() {
            return Err(SimError::NonFiniteBall);
        }
        Ok(())
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Whether every kinematic quantity is a finite number.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.velocity.is_finite()
            && self.rotation.is_finite()
            && self.angular_velocity.is_finite()
    }
}
