use std::f32::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;

use crate::arena::Arena;
use crate::ball::{Ball, Vec2};
use crate::config::{PhysicsConfig, SpawnConfig};
use crate::error::SimError;

/// Source of uniform samples in `[0, 1)`.
pub trait RandomSource {
    fn next_uniform(&mut self) -> f32;
}

impl RandomSource for StdRng {
    fn next_uniform(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Create a ball at the arena center with a random heading, speed, spin and
/// mass.
///
/// Draws exactly four samples, in order: heading, speed, spin, mass.
pub fn spawn(
    arena: &Arena,
    cfg: &SpawnConfig,
    physics: &PhysicsConfig,
    rng: &mut dyn RandomSource,
) -> Result<Ball, SimError> {
    arena.check_fits(physics.radius)?;

    let angle = rng.next_uniform() * TAU;
    let speed = lerp(cfg.speed_min, cfg.speed_max, rng.next_uniform());
    let spin = (rng.next_uniform() - 0.5) * 2.0 * cfg.spin_max;
    let mass = lerp(cfg.mass_min, cfg.mass_max, rng.next_uniform());

    let (cx, cy) = arena.center();
    let velocity = Vec2::new(speed * angle.sin(), speed * angle.cos());
    let ball = Ball::new(Vec2::new(cx, cy), velocity, spin, physics.radius, mass)?;

    tracing::debug!(speed, angle, spin, mass, "spawned ball");
    Ok(ball)
}

fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + t * (max - min)
}
