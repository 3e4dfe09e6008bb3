//! Fixed timestep accumulator
//!
//! Wall-clock frame time goes in, a whole number of simulation ticks comes
//! out. Physics never sees the display refresh rate.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Converts elapsed frame time into fixed simulation steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Feed elapsed seconds; returns how many ticks to run now
    ///
    /// Long stalls (tab in background) are clamped, and any backlog beyond
    /// `max_substeps` is dropped rather than replayed.
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        substeps
    }

    /// Forget any partial step (new run, resumed tab)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_frames_accumulate() {
        let mut clock = FixedStep::new(1.0 / 32.0, 8);
        assert_eq!(clock.advance(1.0 / 64.0), 0);
        assert_eq!(clock.advance(1.0 / 64.0), 1);
        assert_eq!(clock.advance(1.0 / 128.0), 0);
    }

    #[test]
    fn test_slow_frames_run_several_steps() {
        let mut clock = FixedStep::new(1.0 / 64.0, 8);
        assert_eq!(clock.advance(3.0 / 64.0), 3);
    }

    #[test]
    fn test_long_stall_is_capped() {
        let mut clock = FixedStep::new(1.0 / 128.0, 8);
        assert_eq!(clock.advance(5.0), 8);
        // Backlog was dropped, not replayed
        assert!(clock.advance(0.0) <= 1);
    }

    #[test]
    fn test_bad_dt_ignored() {
        let mut clock = FixedStep::default();
        assert_eq!(clock.advance(f32::NAN), 0);
        assert_eq!(clock.advance(-1.0), 0);
        clock.advance(SIM_DT * 0.9);
        clock.reset();
        assert_eq!(clock.advance(SIM_DT * 0.5), 0);
    }
}
