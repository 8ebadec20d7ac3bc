/// Fixed timestep accumulator.
/// The table simulation advances in whole frames; host frame time is banked
/// here and paid out as a step count.
pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    /// Upper bound on steps paid out for one host frame.
    max_steps: u32,
}

impl FixedTimestep {
    pub const DEFAULT_MAX_STEPS: u32 = 10;

    pub fn new(dt: f32) -> Self {
        Self::with_max_steps(dt, Self::DEFAULT_MAX_STEPS)
    }

    pub fn with_max_steps(dt: f32, max_steps: u32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    /// A stalled tab drops the excess instead of fast-forwarding the table.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulator += frame_dt;
        }
        self.accumulator = self.accumulator.min(self.dt * self.max_steps as f32);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0).
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
