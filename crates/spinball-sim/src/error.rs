use spinball_core::SimError;

#[derive(Debug)]
pub enum RunError {
    /// Bad command-line input.
    Usage(String),
    Sim(SimError),
    /// Writing the run summary failed.
    Output(String),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usage(m) => write!(f, "{m}"),
            Self::Sim(e) => write!(f, "simulation error: {e}"),
            Self::Output(m) => write!(f, "output error: {m}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Usage(_) | Self::Output(_) => None,
            Self::Sim(e) => Some(e),
        }
    }
}

impl From<SimError> for RunError {
    fn from(e: SimError) -> Self {
        Self::Sim(e)
    }
}
