use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::ball::Ball;
use crate::config::PhysicsConfig;
use crate::error::{SimError, check_time_step};

/// Which force terms are active for a frame.
///
/// Passed by value so one frame always sees a single consistent snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceToggles {
    pub drag: bool,
    pub magnus: bool,
    pub gravity: bool,
}

impl Default for ForceToggles {
    fn default() -> Self {
        Self {
            drag: true,
            magnus: true,
            gravity: true,
        }
    }
}

impl ForceToggles {
    pub const NONE: Self = Self {
        drag: false,
        magnus: false,
        gravity: false,
    };
}

/// Advance velocity, spin, position and rotation by `dt` seconds, then clamp
/// the ball into the arena.
///
/// Gravity is added to `dy` once per frame without scaling by `dt`, and the
/// drag step is capped at `sqrt(speed)`.
pub fn advance(
    ball: &mut Ball,
    arena: &Arena,
    dt: f32,
    toggles: ForceToggles,
    physics: &PhysicsConfig,
) -> Result<(), SimError> {
    check_time_step(dt)?;

    let speed_sq = ball.velocity.x * ball.velocity.x + ball.velocity.y * ball.velocity.y;
    let speed = speed_sq.sqrt();

    ball.angular_velocity *= 1.0 - physics.spin_friction;

    // Direction is undefined at rest; drag and lift then contribute nothing.
    if speed > 0.0 {
        let nx = ball.velocity.x / speed;
        let ny = ball.velocity.y / speed;
        let r = ball.radius();
        let mass = ball.mass();

        let drag_f = r * r * speed_sq * physics.drag_coeff;
        let drag_a = drag_f / mass;
        let drag_step = (drag_a * dt).min(speed.sqrt());

        let magnus_f =
            physics.spin_coeff * ((r * ball.angular_velocity / speed) * 0.5) * speed_sq * r * r;
        let magnus_a = magnus_f / mass;

        if toggles.magnus {
            ball.velocity.x -= ny * magnus_a * dt;
            ball.velocity.y += nx * magnus_a * dt;
        }
        if toggles.drag {
            ball.velocity.x -= nx * drag_step * dt;
            ball.velocity.y -= ny * drag_step * dt;
        }
    }

    if toggles.gravity {
        ball.velocity.y += physics.gravity;
    }

    ball.position.x += ball.velocity.x * dt;
    ball.position.y += ball.velocity.y * dt;
    ball.rotation += ball.angular_velocity * dt;

    let (x, y) = arena.clamp_center(ball.position.x, ball.position.y, ball.radius());
    ball.position.x = x;
    ball.position.y = y;

    Ok(())
}
