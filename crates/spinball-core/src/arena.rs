use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Rectangular play area. Origin top-left, y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    width: f32,
    height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        check_dimensions(width, height)?;
        Ok(Self { width, height })
    }

    /// Re-check the dimensions, e.g. after decoding.
    pub fn validate(&self) -> Result<(), SimError> {
        check_dimensions(self.width, self.height)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Change the dimensions. The ball is not moved; the next frame clamps it.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SimError> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Fails unless a ball of `radius` fits between all four walls.
    pub fn check_fits(&self, radius: f32) -> Result<(), SimError> {
        if self.width < 2.0 * radius || self.height < 2.0 * radius {
            return Err(SimError::ArenaTooSmall {
                width: self.width,
                height: self.height,
                radius,
            });
        }
        Ok(())
    }

    /// Pull a ball center into `[radius, width-radius] x [radius, height-radius]`.
    pub fn clamp_center(&self, x: f32, y: f32, radius: f32) -> (f32, f32) {
        // max-then-min rather than f32::clamp: the latter panics if the
        // arena was shrunk below the ball's diameter.
        (
            x.max(radius).min(self.width - radius),
            y.max(radius).min(self.height - radius),
        )
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width * 0.5, self.height * 0.5)
    }
}

fn check_dimensions(width: f32, height: f32) -> Result<(), SimError> {
    if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidArena { width, height })
    }
}
