//! Wall-clock frame delta source.
//!
//! The simulator is frame-driven: an external host loop calls
//! `World::tick()` once per frame to obtain the elapsed wall-clock seconds,
//! then feeds that delta to `World::step(dt)`.  `StepClock` is the piece
//! that measures the delta; it holds a monotonic instant and nothing else.

use std::time::Instant;

/// Measures elapsed wall-clock time between successive `tick()` calls.
#[derive(Debug)]
pub struct StepClock {
    last: Instant,
}

impl StepClock {
    /// Create a clock; the first `tick()` measures from this moment.
    pub fn new() -> Self {
        Self { last: Instant::now() }
    }

    /// Seconds elapsed since the previous `tick()` (or since construction).
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        dt
    }

    /// Forget accumulated time so the next `tick()` starts from now.
    ///
    /// Called when the simulation resumes from pause, so the paused interval
    /// is not replayed as one giant step.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new()
    }
}
