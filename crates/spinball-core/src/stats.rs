use serde::{Deserialize, Serialize};

/// Live readout for a statistics display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub speed: f32,
    pub angular_speed: f32,
    pub mass: f32,
    pub gravity: bool,
    pub frames: u64,
    pub bounces: u64,
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Speed: {:.0}; Angular speed: {:.0}; Mass: {}; Gravity: {}",
            self.speed,
            self.angular_speed,
            self.mass,
            if self.gravity { "on" } else { "off" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_like_the_readout() {
        let stats = Stats {
            speed: 412.6,
            angular_speed: -7.4,
            mass: 10.0,
            gravity: false,
            frames: 3,
            bounces: 1,
        };
        assert_eq!(
            stats.to_string(),
            "Speed: 413; Angular speed: -7; Mass: 10; Gravity: off"
        );
    }
}
