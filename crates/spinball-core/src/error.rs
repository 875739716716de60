/// Contract violations rejected by the simulation core.
///
/// Every check runs before state is touched, so a caller that receives one of
/// these can drop the offending frame and keep going from the current state.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Frame time was negative, NaN or infinite.
    InvalidTimeStep(f32),
    /// Host timestamp was NaN or infinite, in milliseconds.
    InvalidTimestamp(f64),
    /// Host timestamps went backwards (previous, current), in milliseconds.
    NonMonotonicTimestamp(f64, f64),
    /// Arena width/height was non-finite or not strictly positive.
    InvalidArena { width: f32, height: f32 },
    /// The ball does not fit inside the arena.
    ArenaTooSmall {
        width: f32,
        height: f32,
        radius: f32,
    },
    InvalidRadius(f32),
    InvalidMass(f32),
    /// Position, velocity, rotation or spin was NaN or infinite.
    NonFiniteBall,
    /// A configuration value failed validation.
    InvalidConfig(String),
    SnapshotEncode(String),
    SnapshotDecode(String),
}

impl std::fmt::Display for SimError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeStep(dt) => {
                write!(f, "invalid frame time: {dt} (must be finite and >= 0)")
            },
            Self::InvalidTimestamp(ms) => write!(f, "invalid host timestamp: {ms} ms"),
            Self::NonMonotonicTimestamp(prev, now) => {
                write!(f, "timestamp went backwards: {now} ms after {prev} ms")
            },
            Self::InvalidArena { width, height } => {
                write!(f, "invalid arena size: {width}x{height}")
            },
            Self::ArenaTooSmall {
                width,
                height,
                radius,
            } => write!(
                f,
                "arena {width}x{height} cannot hold a ball of radius {radius}"
            ),
            Self::InvalidRadius(r) => write!(f, "invalid ball radius: {r} (must be > 0)"),
            Self::InvalidMass(m) => write!(f, "invalid ball mass: {m} (must be > 0)"),
            Self::NonFiniteBall => write!(f, "ball state is not finite"),
            Self::InvalidConfig(m) => write!(f, "invalid config: {m}"),
            Self::SnapshotEncode(e) => write!(f, "snapshot encode error: {e}"),
            Self::SnapshotDecode(e) => write!(f, "snapshot decode error: {e}"),
        }
    }
}

impl std::error::Error for SimError {}

/// Reject negative and non-finite frame times.
pub fn check_time_step(dt: f32) -> Result<(), SimError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidTimeStep(dt))
    }
}
