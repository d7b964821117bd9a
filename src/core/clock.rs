//=========================================================================
// Clock
//=========================================================================
//
// Elapsed time and per-tick delta, in seconds.
//
// The orchestrator ticks the clock from wall time. Tests and headless
// drivers advance it by hand with `advance`.
//
//=========================================================================

use std::time::Instant;

//=== Clock ===============================================================

#[derive(Debug, Clone)]
pub struct Clock {
    start: Option<Instant>,
    last: Option<Instant>,
    elapsed: f32,
    delta: f32,
    ticks: u64,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            start: None,
            last: None,
            elapsed: 0.0,
            delta: 0.0,
            ticks: 0,
        }
    }

    /// Samples wall time. The first tick has a zero delta.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let start = *self.start.get_or_insert(now);
        let last = self.last.replace(now).unwrap_or(now);

        self.delta = now.duration_since(last).as_secs_f32();
        self.elapsed = now.duration_since(start).as_secs_f32();
        self.ticks += 1;
    }

    /// Moves time forward by `delta` seconds without touching wall time.
    pub fn advance(&mut self, delta: f32) {
        let delta = delta.max(0.0);
        self.delta = delta;
        self.elapsed += delta;
        self.ticks += 1;
    }

    /// Seconds since the first tick.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds since the previous tick.
    pub fn delta(&self) -> f32 {
        self.delta
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
