use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::ball::Ball;
use crate::collision::{Impact, resolve};
use crate::config::{PhysicsConfig, SpawnConfig, SpinballConfig};
use crate::error::{SimError, check_time_step};
use crate::integrator::{ForceToggles, advance};
use crate::spawn::{RandomSource, spawn};
use crate::stats::Stats;

/// Outcome of a single frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReport {
    pub impact: Option<Impact>,
}

/// Everything one running simulation owns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    ball: Ball,
    arena: Arena,
    physics: PhysicsConfig,
    spawn: SpawnConfig,
    frames: u64,
    bounces: u64,
}

impl SimulationState {
    /// Validate `config` and spawn the first ball.
    pub fn new(config: &SpinballConfig, rng: &mut dyn RandomSource) -> Result<Self, SimError> {
        config.validate()?;
        let arena = Arena::new(config.arena.width, config.arena.height)?;
        let ball = spawn(&arena, &config.spawn, &config.physics, rng)?;
        Ok(Self {
            ball,
            arena,
            physics: config.physics.clone(),
            spawn: config.spawn.clone(),
            frames: 0,
            bounces: 0,
        })
    }

    /// Assemble a state around an existing ball.
    pub fn from_parts(
        ball: Ball,
        arena: Arena,
        physics: PhysicsConfig,
        spawn: SpawnConfig,
    ) -> Self {
        Self {
            ball,
            arena,
            physics,
            spawn,
            frames: 0,
            bounces: 0,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn physics(&self) -> &PhysicsConfig {
        &self.physics
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn bounces(&self) -> u64 {
        self.bounces
    }

    /// Replace the ball with a freshly spawned one. Counters keep running.
    pub fn respawn(&mut self, rng: &mut dyn RandomSource) -> Result<(), SimError> {
        self.ball = spawn(&self.arena, &self.spawn, &self.physics, rng)?;
        tracing::info!(
            speed = self.ball.speed(),
            mass = self.ball.mass(),
            "respawned"
        );
        Ok(())
    }

    /// Resize the arena without moving the ball.
    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), SimError> {
        self.arena.resize(width, height)
    }

    /// Run one frame: wall response first, then integration and clamping.
    ///
    /// All checks run up front, so an error leaves the state as it was.
    pub fn step(&mut self, dt: f32, toggles: ForceToggles) -> Result<FrameReport, SimError> {
        check_time_step(dt)?;
        self.arena.check_fits(self.ball.radius())?;

        let impact = resolve(&mut self.ball, &self.arena, &self.physics);
        advance(&mut self.ball, &self.arena, dt, toggles, &self.physics)?;

        self.frames += 1;
        if impact.is_some() {
            self.bounces += 1;
        }
        Ok(FrameReport { impact })
    }

    pub fn stats(&self, toggles: ForceToggles) -> Stats {
        Stats {
            speed: self.ball.speed(),
            angular_speed: self.ball.angular_velocity(),
            mass: self.ball.mass(),
            gravity: toggles.gravity,
            frames: self.frames,
            bounces: self.bounces,
        }
    }

    /// Encode the full state as MessagePack.
    pub fn snapshot(&self) -> Result<Vec<u8>, SimError> {
        rmp_serde::to_vec(self).map_err(|e| SimError::SnapshotEncode(e.to_string()))
    }

    /// Decode a state produced by [`SimulationState::snapshot`].
    ///
    /// The decoded ball, arena and config are checked the same way the
    /// constructors check them.
    pub fn restore(bytes: &[u8]) -> Result<Self, SimError> {
        let state: Self =
            rmp_serde::from_slice(bytes).map_err(|e| SimError::SnapshotDecode(e.to_string()))?;
        state.physics.validate()?;
        state.spawn.validate()?;
        state.arena.validate()?;
        state.ball.validate()?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::ball::Vec2;
    use crate::collision::Edge;
    use crate::test_helpers::{run_frames, state_with_ball};

    #[test]
    fn new_spawns_at_center() {
        let state =
            SimulationState::new(&SpinballConfig::default(), &mut StdRng::seed_from_u64(1))
                .unwrap();
        assert_eq!(state.ball().position(), Vec2::new(400.0, 300.0));
        assert_eq!(state.frames(), 0);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut cfg = SpinballConfig::default();
        cfg.arena.height = f32::NAN;
        assert!(SimulationState::new(&cfg, &mut StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn straight_drop_frame() {
        let mut state = state_with_ball(400.0, 590.0, 0.0, 100.0, 0.0);
        let report = state.step(0.0, ForceToggles::NONE).unwrap();
        let impact = report.impact.unwrap();
        assert_eq!(impact.edge, Edge::Bottom);
        assert!((state.ball().velocity().y + 80.0).abs() < 1e-4);
        assert_eq!(state.ball().velocity().x, 0.0);
        assert_eq!(state.ball().angular_velocity(), 0.0);
        assert_eq!(state.bounces(), 1);
    }

    #[test]
    fn resolve_runs_before_advance() {
        // Moving into the floor: the same frame's position update already
        // uses the reflected velocity, so the ball leaves the wall.
        let mut state = state_with_ball(400.0, 590.0, 0.0, 100.0, 0.0);
        state.step(0.1, ForceToggles::NONE).unwrap();
        assert!(state.ball().position().y < 590.0);
    }

    #[test]
    fn rejected_frame_leaves_state_untouched() {
        let mut state = state_with_ball(400.0, 590.0, 30.0, 100.0, 4.0);
        let before = state.clone();
        assert!(state.step(-1.0, ForceToggles::default()).is_err());
        assert!(state.step(f32::NAN, ForceToggles::default()).is_err());
        assert_eq!(state, before);
    }

    #[test]
    fn resize_mid_flight_clamps_next_frame() {
        let mut state = state_with_ball(700.0, 300.0, 50.0, 0.0, 0.0);
        state.resize(600.0, 600.0).unwrap();
        assert_eq!(state.ball().position().x, 700.0, "resize must not move the ball");

        let report = state.step(0.016, ForceToggles::NONE).unwrap();
        assert_eq!(report.impact.map(|i| i.edge), Some(Edge::Right));
        assert!(state.ball().position().x <= 590.0);
    }

    #[test]
    fn shrinking_below_ball_is_an_error() {
        let mut state = state_with_ball(400.0, 300.0, 0.0, 0.0, 0.0);
        state.resize(15.0, 600.0).unwrap();
        let before = state.clone();
        assert!(matches!(
            state.step(0.016, ForceToggles::default()),
            Err(SimError::ArenaTooSmall { .. })
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn respawn_resets_ball() {
        let mut state = state_with_ball(15.0, 15.0, -5.0, -5.0, 2.0);
        state.respawn(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(state.ball().position(), Vec2::new(400.0, 300.0));
        assert!(state.ball().speed() > 0.0);
    }

    #[test]
    fn snapshot_restores_last_good_state() {
        let mut state =
            SimulationState::new(&SpinballConfig::default(), &mut StdRng::seed_from_u64(9))
                .unwrap();
        run_frames(&mut state, 30, 1.0 / 60.0, ForceToggles::default());
        let saved = state.snapshot().unwrap();
        let expected = state.clone();

        run_frames(&mut state, 30, 1.0 / 60.0, ForceToggles::default());
        assert_ne!(state, expected);

        let restored = SimulationState::restore(&saved).unwrap();
        assert_eq!(restored, expected);
    }

    /// Overwrite the first MessagePack f32 equal to `from` with `to`.
    fn patch_f32(bytes: &mut [u8], from: f32, to: f32) {
        let mut needle = [0xca; 5];
        needle[1..].copy_from_slice(&from.to_be_bytes());
        let at = bytes
            .windows(5)
            .position(|w| w == needle)
            .expect("value not found in snapshot");
        bytes[at + 1..at + 5].copy_from_slice(&to.to_be_bytes());
    }

    fn state_with_radius(radius: f32) -> SimulationState {
        let ball = Ball::new(
            Vec2::new(400.0, 300.0),
            Vec2::new(40.0, -25.0),
            3.0,
            radius,
            7.5,
        )
        .unwrap();
        SimulationState::from_parts(
            ball,
            Arena::new(800.0, 600.0).unwrap(),
            PhysicsConfig::default(),
            SpawnConfig::default(),
        )
    }

    #[test]
    fn restore_rejects_negative_radius() {
        let mut bytes = state_with_radius(12.5).snapshot().unwrap();
        patch_f32(&mut bytes, 12.5, -10.0);
        assert_eq!(
            SimulationState::restore(&bytes),
            Err(SimError::InvalidRadius(-10.0))
        );
    }

    #[test]
    fn restore_rejects_non_positive_mass() {
        let mut bytes = state_with_radius(12.5).snapshot().unwrap();
        patch_f32(&mut bytes, 7.5, 0.0);
        assert_eq!(
            SimulationState::restore(&bytes),
            Err(SimError::InvalidMass(0.0))
        );
    }

    #[test]
    fn restore_rejects_non_finite_arena() {
        let mut bytes = state_with_radius(12.5).snapshot().unwrap();
        patch_f32(&mut bytes, 800.0, f32::INFINITY);
        assert!(matches!(
            SimulationState::restore(&bytes),
            Err(SimError::InvalidArena { .. })
        ));
    }

    #[test]
    fn restore_rejects_non_finite_ball() {
        let mut bytes = state_with_radius(12.5).snapshot().unwrap();
        patch_f32(&mut bytes, -25.0, f32::NAN);
        assert_eq!(
            SimulationState::restore(&bytes),
            Err(SimError::NonFiniteBall)
        );
    }

    #[test]
    fn restore_rejects_invalid_physics() {
        let mut state = state_with_radius(12.5);
        state.physics.gravity = f32::NAN;
        let bytes = state.snapshot().unwrap();
        assert!(matches!(
            SimulationState::restore(&bytes),
            Err(SimError::InvalidConfig(_))
        ));
    }

    #[test]
    fn garbage_snapshot_is_decode_error() {
        assert!(matches!(
            SimulationState::restore(&[0xc1, 0x00]),
            Err(SimError::SnapshotDecode(_))
        ));
    }

    #[test]
    fn stats_reflect_state() {
        let mut state = state_with_ball(400.0, 590.0, 0.0, 100.0, 0.0);
        state.step(0.0, ForceToggles::NONE).unwrap();
        let stats = state.stats(ForceToggles::NONE);
        assert_eq!(stats.frames, 1);
        assert_eq!(stats.bounces, 1);
        assert!(!stats.gravity);
        assert!((stats.speed - 80.0).abs() < 1e-3);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamp_invariant_holds_every_frame(
                seed in 0u64..500,
                dts in proptest::collection::vec(0.0f32..0.1, 1..200),
                drag: bool,
                magnus: bool,
                gravity: bool,
            ) {
                let mut state = SimulationState::new(
                    &SpinballConfig::default(),
                    &mut StdRng::seed_from_u64(seed),
                ).unwrap();
                let toggles = ForceToggles { drag, magnus, gravity };

                for dt in dts {
                    state.step(dt, toggles).unwrap();
                    let b = state.ball();
                    let p = b.position();
                    let r = b.radius();
                    prop_assert!(b.is_finite(), "non-finite ball: {:?}", b);
                    prop_assert!(p.x >= r && p.x <= state.arena().width() - r, "x = {}", p.x);
                    prop_assert!(p.y >= r && p.y <= state.arena().height() - r, "y = {}", p.y);
                }
            }
        }
    }
}
