//! Fixed tick accumulator
//!
//! Converts variable frame times into a whole number of fixed simulation
//! ticks, carrying the remainder over to the next frame.

/// Accumulates frame time and hands out fixed ticks
#[derive(Debug, Clone)]
pub struct TickAccumulator {
    tick_dt: f32,
    accumulated: f32,
    /// Maximum ticks per frame to prevent spiral of death (None = unbounded)
    max_substeps: Option<u32>,
}

impl TickAccumulator {
    /// Create an accumulator running at `tick_rate` ticks per second
    pub fn new(tick_rate: u32) -> Self {
        Self {
            tick_dt: 1.0 / tick_rate.max(1) as f32,
            accumulated: 0.0,
            max_substeps: None,
        }
    }

    pub fn with_max_substeps(mut self, max_substeps: Option<u32>) -> Self {
        self.max_substeps = max_substeps.filter(|&n| n > 0);
        self
    }

    /// Fixed tick duration in seconds
    pub fn tick_dt(&self) -> f32 {
        self.tick_dt
    }

    /// Time carried over that has not yet produced a tick
    pub fn accumulated(&self) -> f32 {
        self.accumulated
    }

    /// Add a frame's elapsed time and return how many ticks to run now
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        if frame_dt.is_finite() && frame_dt > 0.0 {
            self.accumulated += frame_dt;
        }

        let mut ticks = 0;
        while self.accumulated >= self.tick_dt {
            if self.max_substeps.is_some_and(|max| ticks >= max) {
                // Drop the backlog but keep the sub-tick remainder
                self.accumulated %= self.tick_dt;
                log::debug!("Tick backlog dropped after {} substeps", ticks);
                break;
            }
            self.accumulated -= self.tick_dt;
            ticks += 1;
        }
        ticks
    }

    /// Accumulate a frame and invoke `on_tick` once per tick
    pub fn run<F: FnMut()>(&mut self, frame_dt: f32, mut on_tick: F) -> u32 {
        let ticks = self.accumulate(frame_dt);
        for _ in 0..ticks {
            on_tick();
        }
        ticks
    }

    /// Fraction of the next tick already elapsed, in [0, 1)
    pub fn alpha(&self) -> f32 {
        (self.accumulated / self.tick_dt).clamp(0.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.accumulated = 0.0;
    }
}
