pub mod arena;
pub mod ball;
pub mod clock;
pub mod collision;
pub mod config;
pub mod error;
pub mod integrator;
pub mod spawn;
pub mod state;
pub mod stats;

pub use arena::Arena;
pub use ball::{Ball, Vec2};
pub use clock::FrameClock;
pub use collision::{Edge, Impact, resolve};
pub use config::SpinballConfig;
pub use error::SimError;
pub use integrator::{ForceToggles, advance};
pub use spawn::{RandomSource, spawn};
pub use state::{FrameReport, SimulationState};
pub use stats::Stats;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::arena::Arena;
    use crate::ball::{Ball, Vec2};
    use crate::config::{ArenaConfig, PhysicsConfig, SpawnConfig};
    use crate::integrator::ForceToggles;
    use crate::spawn::RandomSource;
    use crate::state::{FrameReport, SimulationState};

    /// Replays a fixed list of samples, wrapping around at the end.
    pub struct SequenceSource {
        values: Vec<f32>,
        next: usize,
    }

    impl SequenceSource {
        pub fn new(values: Vec<f32>) -> Self {
            assert!(!values.is_empty(), "SequenceSource needs at least one value");
            Self { values, next: 0 }
        }
    }

    impl RandomSource for SequenceSource {
        fn next_uniform(&mut self) -> f32 {
            let v = self.values[self.next % self.values.len()];
            self.next += 1;
            v
        }
    }

    /// Default-config state (800x600 arena, radius 10, mass 10) holding a
    /// ball with the given position, velocity and spin.
    pub fn state_with_ball(x: f32, y: f32, dx: f32, dy: f32, dr: f32) -> SimulationState {
        let physics = PhysicsConfig::default();
        let arena_cfg = ArenaConfig::default();
        let arena = Arena::new(arena_cfg.width, arena_cfg.height)
            .expect("default arena must be valid");
        let ball = Ball::new(Vec2::new(x, y), Vec2::new(dx, dy), dr, physics.radius, 10.0)
            .expect("test ball must be valid");
        SimulationState::from_parts(ball, arena, physics, SpawnConfig::default())
    }

    /// Step `n` frames with a fixed dt, returning every frame report.
    pub fn run_frames(
        state: &mut SimulationState,
        n: usize,
        dt: f32,
        toggles: ForceToggles,
    ) -> Vec<FrameReport> {
        (0..n)
            .map(|_| state.step(dt, toggles).expect("frame must succeed"))
            .collect()
    }
}
