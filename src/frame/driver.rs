use std::f32::consts::TAU;

/// Mutable per-frame state. Owned exclusively by [`FrameDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameState {
    /// Timestamp of the previous tick in milliseconds, `None` before the
    /// first tick.
    pub last_time_ms: Option<f64>,
    /// Accumulated camera yaw about world `+Y`, wrapped to `[0, 2π)`.
    pub camera_yaw: f32,
}

/// Advances the camera orbit by a fixed angular speed per elapsed second and
/// triggers one render per tick.
///
/// The first tick contributes no rotation since there is no earlier timestamp
/// to diff against.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    orbit_speed: f32,
    state: FrameState,
}

impl FrameDriver {
    /// Driver rotating at `orbit_speed` radians per second.
    #[must_use]
    pub fn new(orbit_speed: f32) -> Self {
        Self {
            orbit_speed,
            state: FrameState::default(),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> FrameState {
        self.state
    }

    /// Current camera yaw in radians.
    #[must_use]
    pub fn camera_yaw(&self) -> f32 {
        self.state.camera_yaw
    }

    /// Advance to `timestamp_ms`, then invoke `render` with the new camera
    /// yaw and return its result.
    ///
    /// A timestamp earlier than the previous one is treated as zero elapsed
    /// time.
    pub fn tick<R>(
        &mut self,
        timestamp_ms: f64,
        render: impl FnOnce(f32) -> R,
    ) -> R {
        let delta_ms = self
            .state
            .last_time_ms
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
        let delta_secs = (delta_ms / 1000.0) as f32;
        self.state.camera_yaw =
            (self.state.camera_yaw + self.orbit_speed * delta_secs).rem_euclid(TAU);

        let result = render(self.state.camera_yaw);
        self.state.last_time_ms = Some(timestamp_ms);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_contributes_nothing() {
        let mut driver = FrameDriver::new(0.1);
        let yaw = driver.tick(5_000.0, |yaw| yaw);
        assert_eq!(yaw, 0.0);
        assert_eq!(driver.state().last_time_ms, Some(5_000.0));
    }

    #[test]
    fn accumulates_elapsed_seconds() {
        let mut driver = FrameDriver::new(0.1);
        let mut seen = Vec::new();
        for t in [0.0, 16.0, 33.0] {
            driver.tick(t, |yaw| seen.push(yaw));
        }
        let expected = 0.1 * (16.0 / 1000.0) + 0.1 * (17.0 / 1000.0);
        assert!((driver.camera_yaw() - expected).abs() < 1e-7);
        assert_eq!(seen.len(), 3);
        assert!(seen.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn render_sees_updated_yaw_before_timestamp_is_stored() {
        let mut driver = FrameDriver::new(1.0);
        driver.tick(0.0, |_| ());
        let yaw = driver.tick(500.0, |yaw| yaw);
        assert!((yaw - 0.5).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_does_not_rewind() {
        let mut driver = FrameDriver::new(1.0);
        driver.tick(1_000.0, |_| ());
        driver.tick(2_000.0, |_| ());
        let before = driver.camera_yaw();
        driver.tick(1_500.0, |_| ());
        assert_eq!(driver.camera_yaw(), before);
    }

    #[test]
    fn yaw_wraps_to_one_turn() {
        let mut driver = FrameDriver::new(1.0);
        driver.tick(0.0, |_| ());
        driver.tick(7_000.0, |_| ());
        let yaw = driver.camera_yaw();
        assert!((0.0..TAU).contains(&yaw));
        assert!((yaw - (7.0 - TAU)).abs() < 1e-5);
    }
}
