use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Ball radius in arena units.
pub const BALL_RADIUS: f32 = 10.0;
/// Velocity added to `dy` every frame while gravity is on (not scaled by dt).
pub const GRAVITY: f32 = 10.0;
/// Normal restitution on wall impact.
pub const RESTITUTION: f32 = 0.8;
/// Ratio coupling tangential velocity and spin on impact.
pub const SPIN_COUPLING: f32 = 0.5;
/// Fraction of spin lost every frame.
pub const SPIN_FRICTION: f32 = 1.0 / 100.0;
pub const DRAG_COEFF: f32 = 1.0 / 2000.0;
pub const SPIN_COEFF: f32 = 1.0 / 4000.0;
/// Reconciles the length units of radius and spin in the impact formula.
pub const UNIT_SCALE: f32 = 5.0;

/// Physics constants shared by the integrator and the collision resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub radius: f32,
    pub gravity: f32,
    /// Normal restitution `ey`.
    pub restitution: f32,
    /// Spin/tangential coupling `alpha`.
    pub spin_coupling: f32,
    pub spin_friction: f32,
    pub drag_coeff: f32,
    pub spin_coeff: f32,
    pub unit_scale: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            radius: BALL_RADIUS,
            gravity: GRAVITY,
            restitution: RESTITUTION,
            spin_coupling: SPIN_COUPLING,
            spin_friction: SPIN_FRICTION,
            drag_coeff: DRAG_COEFF,
            spin_coeff: SPIN_COEFF,
            unit_scale: UNIT_SCALE,
        }
    }
}

/// Ranges drawn from when a new ball is spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub speed_min: f32,
    pub speed_max: f32,
    /// Initial spin is drawn from `[-spin_max, spin_max)`.
    pub spin_max: f32,
    pub mass_min: f32,
    pub mass_max: f32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            speed_min: 200.0,
            speed_max: 1200.0,
            spin_max: 30.0,
            mass_min: 10.0,
            mass_max: 10.0,
        }
    }
}

/// Initial arena dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Frame clock settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Upper bound for a single frame's dt, in seconds.
    pub max_frame_dt: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self { max_frame_dt: 0.1 }
    }
}

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinballConfig {
    pub physics: PhysicsConfig,
    pub spawn: SpawnConfig,
    pub arena: ArenaConfig,
    pub clock: ClockConfig,
}

impl SpinballConfig {
    /// Load config from `SPINBALL_CONFIG` or `config/spinball.toml`. Falls back
    /// to defaults if the file is missing or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("SPINBALL_CONFIG")
            .unwrap_or_else(|_| "config/spinball.toml".to_string());
        match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self, SimError> {
        toml::from_str::<Self>(content).map_err(|e| SimError::InvalidConfig(e.to_string()))
    }

    /// Check every value the core divides by or draws from.
    pub fn validate(&self) -> Result<(), SimError> {
        self.physics.validate()?;
        self.spawn.validate()?;

        if !(self.clock.max_frame_dt.is_finite() && self.clock.max_frame_dt > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "max_frame_dt must be > 0, got {}",
                self.clock.max_frame_dt
            )));
        }

        crate::arena::Arena::new(self.arena.width, self.arena.height)?
            .check_fits(self.physics.radius)
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(SimError::InvalidRadius(self.radius));
        }
        for (name, value) in [
            ("gravity", self.gravity),
            ("restitution", self.restitution),
            ("spin_coupling", self.spin_coupling),
            ("spin_friction", self.spin_friction),
            ("drag_coeff", self.drag_coeff),
            ("spin_coeff", self.spin_coeff),
            ("unit_scale", self.unit_scale),
        ] {
            require_finite(name, value)?;
        }
        if self.unit_scale <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "unit_scale must be > 0, got {}",
                self.unit_scale
            )));
        }
        if self.spin_coupling <= -1.0 {
            return Err(SimError::InvalidConfig(format!(
                "spin_coupling must be > -1, got {}",
                self.spin_coupling
            )));
        }
        Ok(())
    }
}

impl SpawnConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        require_finite("speed_max", self.speed_max)?;
        if !(self.speed_min > 0.0 && self.speed_max >= self.speed_min) {
            return Err(SimError::InvalidConfig(format!(
                "speed range must satisfy 0 < min <= max, got {}..{}",
                self.speed_min, self.speed_max
            )));
        }
        if !(self.mass_min > 0.0 && self.mass_max.is_finite()) {
            return Err(SimError::InvalidMass(self.mass_min));
        }
        if self.mass_max < self.mass_min {
            return Err(SimError::InvalidConfig(format!(
                "mass range inverted: {}..{}",
                self.mass_min, self.mass_max
            )));
        }
        if !(self.spin_max.is_finite() && self.spin_max >= 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "spin_max must be >= 0, got {}",
                self.spin_max
            )));
        }
        Ok(())
    }
}

fn require_finite(name: &str, value: f32) -> Result<(), SimError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!(
            "{name} must be finite, got {value}"
        )))
    }
}
