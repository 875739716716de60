use crate::error::SimError;

/// Converts host frame timestamps (milliseconds) into per-frame `dt` seconds.
///
/// The first tick yields zero. Long gaps, such as a backgrounded tab, are
/// capped at `max_frame_dt` so the quadratic drag term stays stable.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_frame_dt: f32,
}

impl FrameClock {
    pub fn new(max_frame_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_frame_dt,
        }
    }

    pub fn tick(&mut self, now_ms: f64) -> Result<f32, SimError> {
        if !now_ms.is_finite() {
            return Err(SimError::InvalidTimestamp(now_ms));
        }
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return Ok(0.0);
        };
        if now_ms < last {
            return Err(SimError::NonMonotonicTimestamp(last, now_ms));
        }
        self.last_ms = Some(now_ms);

        let dt = ((now_ms - last) / 1000.0) as f32;
        if dt > self.max_frame_dt {
            tracing::debug!(dt, max = self.max_frame_dt, "clamping long frame");
            return Ok(self.max_frame_dt);
        }
        Ok(dt)
    }

    /// Forget the previous timestamp; the next tick yields zero again.
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_is_zero() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.tick(12_345.0), Ok(0.0));
    }

    #[test]
    fn converts_milliseconds() {
        let mut clock = FrameClock::new(0.1);
        clock.tick(1000.0).unwrap();
        let dt = clock.tick(1016.0).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn clamps_long_gaps() {
        let mut clock = FrameClock::new(0.1);
        clock.tick(0.0).unwrap();
        assert_eq!(clock.tick(5000.0), Ok(0.1));
        // next frame measured from the real timestamp, not the clamped one
        let dt = clock.tick(5020.0).unwrap();
        assert!((dt - 0.02).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_rejected_and_ignored() {
        let mut clock = FrameClock::new(0.1);
        clock.tick(100.0).unwrap();
        assert_eq!(
            clock.tick(50.0),
            Err(SimError::NonMonotonicTimestamp(100.0, 50.0))
        );
        let dt = clock.tick(116.0).unwrap();
        assert!((dt - 0.016).abs() < 1e-6);
    }

    #[test]
    fn reset_restarts_at_zero() {
        let mut clock = FrameClock::new(0.1);
        clock.tick(0.0).unwrap();
        clock.tick(16.0).unwrap();
        clock.reset();
        assert_eq!(clock.tick(900.0), Ok(0.0));
    }

    #[test]
    fn non_finite_timestamp_rejected() {
        let mut clock = FrameClock::new(0.1);
        assert!(matches!(
            clock.tick(f64::NAN),
            Err(SimError::InvalidTimestamp(ms)) if ms.is_nan()
        ));
        assert_eq!(
            clock.tick(f64::INFINITY),
            Err(SimError::InvalidTimestamp(f64::INFINITY))
        );
        // still waiting for its first real timestamp
        assert_eq!(clock.tick(40.0), Ok(0.0));
    }
}
