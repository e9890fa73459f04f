/// Fixed timestep accumulator for renderer-local animation.
///
/// Only cosmetic motion (line jitter, wandering distractors, relocation
/// cadences) is stepped this way. Journey phases never are: they are read
/// off the clock directly.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// The fixed delta time per step.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
    /// Upper bound on steps returned for a single frame.
    max_steps: u32,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, Self::DEFAULT_MAX_STEPS)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        // A zero or garbage step would divide by zero below.
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 1.0 / 60.0 };
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    ///
    /// A long gap (tab hidden, app backgrounded) is capped at `max_steps`,
    /// so animation resumes smoothly instead of fast-forwarding.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha between steps (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    /// Drop any partial step, e.g. when a renderer is replaced.
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_exact() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(1.0 / 60.0), 1);
    }

    #[test]
    fn accumulates_partial() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(0.008), 0);
        assert_eq!(ts.accumulate(0.010), 1);
    }

    #[test]
    fn long_gap_is_capped() {
        let mut ts = FixedTimestep::new(1.0 / 60.0);
        assert_eq!(ts.accumulate(30.0), FixedTimestep::DEFAULT_MAX_STEPS);
    }

    #[test]
    fn ignores_negative_and_nan_frames() {
        let mut ts = FixedTimestep::new(0.1);
        assert_eq!(ts.accumulate(-1.0), 0);
        assert_eq!(ts.accumulate(f32::NAN), 0);
        assert_eq!(ts.alpha(), 0.0);
    }

    #[test]
    fn zero_dt_falls_back() {
        let ts = FixedTimestep::new(0.0);
        assert!(ts.dt() > 0.0);
    }
}
