use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::ball::{Ball, Vec2};
use crate::config::PhysicsConfig;

/// Arena wall the ball is pressing against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Bottom,
    Top,
    Right,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Bottom, Edge::Top, Edge::Right, Edge::Left];

    /// Rotate/reflect a world-frame velocity so this wall becomes the floor.
    /// `x` is then tangential and `y` is the normal component (positive = into the wall).
    pub fn to_canonical(self, v: Vec2) -> Vec2 {
        match self {
            Edge::Bottom => Vec2::new(v.x, v.y),
            Edge::Top => Vec2::new(-v.x, -v.y),
            Edge::Left => Vec2::new(v.y, -v.x),
            Edge::Right => Vec2::new(-v.y, v.x),
        }
    }

    /// Inverse of [`Edge::to_canonical`].
    pub fn to_world(self, c: Vec2) -> Vec2 {
        match self {
            Edge::Bottom => Vec2::new(c.x, c.y),
            Edge::Top => Vec2::new(-c.x, -c.y),
            Edge::Left => Vec2::new(-c.y, c.x),
            Edge::Right => Vec2::new(c.y, -c.x),
        }
    }
}

/// Which wall, if any, the ball overlaps.
///
/// Walls are tested bottom, top, right, left and the last hit wins, so a
/// corner contact resolves against the side wall.
pub fn detect_edge(position: Vec2, radius: f32, arena: &Arena) -> Option<Edge> {
    let mut impact = None;
    if position.y + radius >= arena.height() {
        impact = Some(Edge::Bottom);
    }
    if position.y - radius <= 0.0 {
        impact = Some(Edge::Top);
    }
    if position.x + radius >= arena.width() {
        impact = Some(Edge::Right);
    }
    if position.x - radius <= 0.0 {
        impact = Some(Edge::Left);
    }
    impact
}

/// Angle between a canonical velocity and the floor, in degrees within `[0, 90]`.
///
/// 90 is a head-on hit, 0 is grazing. Opposite vectors fold to the same angle.
/// Angles above 90 reflect to `180 - theta`; subtracting 90 would break that
/// symmetry.
pub fn impact_angle(canonical: Vec2) -> f32 {
    let theta = canonical.y.atan2(canonical.x).to_degrees().abs();
    let folded = if theta > 90.0 { 180.0 - theta } else { theta };
    // f32 pi converts to a hair over 180 degrees
    folded.clamp(0.0, 90.0)
}

/// Tangential coefficient: -1 for a grazing hit, 1 for a head-on one.
pub fn tangential_coefficient(theta: f32) -> f32 {
    theta / 45.0 - 1.0
}

/// Details of a resolved wall impact.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    pub edge: Edge,
    /// Angle of incidence in degrees.
    pub theta: f32,
    pub ex: f32,
}

/// Post-impact `(velocity, spin)` in the canonical floor frame.
///
/// Oblique rigid-sphere impact: the normal component is reflected with
/// restitution `ey`; tangential velocity and spin are exchanged through
/// `alpha`, weighted by the angle-dependent `ex`. Both right-hand sides use
/// the incoming tangential velocity.
pub fn canonical_response(
    canonical: Vec2,
    spin: f32,
    ex: f32,
    radius: f32,
    physics: &PhysicsConfig,
) -> (Vec2, f32) {
    let alpha = physics.spin_coupling;
    let scale = physics.unit_scale;
    let lever = radius / scale;
    let cx = canonical.x;
    let cy = canonical.y;

    let new_cy = -physics.restitution * cy;
    let new_cx = ((1.0 - alpha * ex) / (1.0 + alpha)) * cx
        + (alpha * (1.0 + ex) / (1.0 + alpha)) * (lever * spin);
    let new_spin =
        ((alpha - ex) / (1.0 + alpha)) * spin + ((1.0 + ex) / (1.0 + alpha)) * (cx / scale) / lever;

    (Vec2::new(new_cx, new_cy), new_spin)
}

/// Bounce the ball off whichever wall it overlaps. Returns `None` and leaves
/// the ball untouched when it is clear of all walls.
pub fn resolve(ball: &mut Ball, arena: &Arena, physics: &PhysicsConfig) -> Option<Impact> {
    let edge = detect_edge(ball.position, ball.radius(), arena)?;

    let canonical = edge.to_canonical(ball.velocity);
    let theta = impact_angle(canonical);
    let ex = tangential_coefficient(theta);
    let (response, spin) =
        canonical_response(canonical, ball.angular_velocity, ex, ball.radius(), physics);

    ball.velocity = edge.to_world(response);
    ball.angular_velocity = spin;

    tracing::trace!(?edge, theta, ex, "wall impact");
    Some(Impact { edge, theta, ex })
}
