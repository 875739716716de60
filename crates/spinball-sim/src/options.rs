use spinball_core::ForceToggles;

use crate::error::RunError;

/// Arena resize scheduled at a given frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledResize {
    pub frame: u64,
    pub width: f32,
    pub height: f32,
}

/// Command-line options for a headless run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub frames: u64,
    /// Simulated host frame rate (Hz).
    pub fps: f64,
    /// Seed for spawn randomness; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Respawn the ball every N frames (0 = never).
    pub respawn_every: u64,
    pub toggles: ForceToggles,
    pub resize: Option<ScheduledResize>,
    pub json: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            fps: 60.0,
            seed: None,
            respawn_every: 0,
            toggles: ForceToggles::default(),
            resize: None,
            json: false,
        }
    }
}

pub const USAGE: &str = "usage: spinball-sim [--frames=N] [--fps=HZ] [--seed=N] \
[--respawn-every=N] [--resize-at=FRAME:WxH] [--no-drag] [--no-magnus] [--no-gravity] [--json]";

impl RunOptions {
    /// Parse `--key=value` style arguments (program name already stripped).
    pub fn parse<I>(args: I) -> Result<Self, RunError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut opts = Self::default();
        for arg in args {
            match arg.as_str() {
                "--no-drag" => opts.toggles.drag = false,
                "--no-magnus" => opts.toggles.magnus = false,
                "--no-gravity" => opts.toggles.gravity = false,
                "--json" => opts.json = true,
                _ => {
                    let Some((key, value)) = arg.split_once('=') else {
                        return Err(RunError::Usage(format!("unknown flag: {arg}\n{USAGE}")));
                    };
                    match key {
                        "--frames" => opts.frames = parse_value(key, value)?,
                        "--fps" => {
                            let fps: f64 = parse_value(key, value)?;
                            if !(fps.is_finite() && fps > 0.0) {
                                return Err(invalid(key, value));
                            }
                            opts.fps = fps;
                        },
                        "--seed" => opts.seed = Some(parse_value(key, value)?),
                        "--respawn-every" => opts.respawn_every = parse_value(key, value)?,
                        "--resize-at" => opts.resize = Some(parse_resize(value)?),
                        _ => {
                            return Err(RunError::Usage(format!("unknown flag: {key}\n{USAGE}")));
                        },
                    }
                },
            }
        }
        Ok(opts)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, RunError> {
    value.parse::<T>().map_err(|_| invalid(key, value))
}

fn invalid(key: &str, value: &str) -> RunError {
    RunError::Usage(format!("invalid value for {key}: {value:?}"))
}

/// `FRAME:WxH`, e.g. `120:400x300`.
fn parse_resize(value: &str) -> Result<ScheduledResize, RunError> {
    let key = "--resize-at";
    let (frame, size) = value.split_once(':').ok_or_else(|| invalid(key, value))?;
    let (width, height) = size.split_once('x').ok_or_else(|| invalid(key, value))?;
    Ok(ScheduledResize {
        frame: parse_value(key, frame)?,
        width: parse_value(key, width)?,
        height: parse_value(key, height)?,
    })
}
