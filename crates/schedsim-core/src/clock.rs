//! Virtual clock for discrete-event simulation.
//!
//! The [`SimClock`] holds simulated time only. It never advances on its own:
//! the engine sets it from the timestamp of each event it pops, so time
//! moves forward exactly as fast as the event list does.

use serde::{Deserialize, Serialize};

/// Simulated time in seconds, one instance per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    now: f64,
}

impl SimClock {
    /// Create a new clock starting at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock starting at a specific time.
    pub fn starting_at(time: f64) -> Self {
        Self { now: time }
    }

    /// Current simulated time.
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Overwrite the current time.
    ///
    /// No ordering check happens here; callers take `time` from the next
    /// event in chronological order.
    pub fn set_time(&mut self, time: f64) {
        self.now = time;
    }
}
