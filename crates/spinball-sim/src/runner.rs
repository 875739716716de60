use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use spinball_core::{FrameClock, SimulationState, SpinballConfig, Stats, Vec2};

use crate::error::RunError;
use crate::options::RunOptions;

/// Result of a completed headless run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub bounces: u64,
    pub respawns: u64,
    pub final_position: Vec2,
    pub final_velocity: Vec2,
    pub stats: Stats,
}

/// Plays the host's part: produces frame timestamps, schedules respawns and
/// resizes, and steps the simulation once per frame.
pub struct HeadlessRunner {
    state: SimulationState,
    clock: FrameClock,
    rng: StdRng,
    options: RunOptions,
    respawns: u64,
}

impl HeadlessRunner {
    pub fn new(config: &SpinballConfig, options: RunOptions) -> Result<Self, RunError> {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = SimulationState::new(config, &mut rng)?;
        Ok(Self {
            state,
            clock: FrameClock::new(config.clock.max_frame_dt),
            rng,
            options,
            respawns: 0,
        })
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Run every requested frame and summarize.
    pub fn run(&mut self) -> Result<RunSummary, RunError> {
        let frame_ms = 1000.0 / self.options.fps;
        let stats_every = (self.options.fps.round() as u64).max(1);

        for frame in 0..self.options.frames {
            self.frame(frame, frame as f64 * frame_ms)?;

            if (frame + 1) % stats_every == 0 {
                tracing::info!("{}", self.state.stats(self.options.toggles));
            }
        }

        Ok(self.summary())
    }

    /// Run a single host frame at timestamp `now_ms`.
    pub fn frame(&mut self, frame: u64, now_ms: f64) -> Result<(), RunError> {
        let dt = self.clock.tick(now_ms)?;

        if let Some(resize) = self.options.resize
            && resize.frame == frame
        {
            self.state.resize(resize.width, resize.height)?;
            tracing::info!(frame, resize.width, resize.height, "arena resized");
        }

        let every = self.options.respawn_every;
        if every > 0 && frame > 0 && frame % every == 0 {
            self.state.respawn(&mut self.rng)?;
            self.respawns += 1;
        }

        let report = self.state.step(dt, self.options.toggles)?;
        if let Some(impact) = report.impact {
            tracing::debug!(
                frame,
                edge = ?impact.edge,
                theta = impact.theta,
                "bounce"
            );
        }
        Ok(())
    }

    pub fn summary(&self) -> RunSummary {
        let ball = self.state.ball();
        RunSummary {
            frames: self.state.frames(),
            bounces: self.state.bounces(),
            respawns: self.respawns,
            final_position: ball.position(),
            final_velocity: ball.velocity(),
            stats: self.state.stats(self.options.toggles),
        }
    }
}
