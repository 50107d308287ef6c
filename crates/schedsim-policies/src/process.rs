//! Process model for the scheduling simulation.
//!
//! Each [`Process`] is one simulated job: it arrives at a point in simulated
//! time, needs a fixed amount of CPU service, and accumulates timestamps as
//! the scheduler dispatches, preempts, and eventually completes it.

use serde::{Deserialize, Serialize};

/// A single simulated job flowing through the ready queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: u64,
    /// Arrival time in simulated seconds.
    pub arrival_time: f64,
    /// Total CPU service the process requires.
    pub burst_time: f64,
    /// CPU service still owed. Never increases.
    pub remaining_cpu_time: f64,
    /// Time of first dispatch.
    pub start_time: Option<f64>,
    /// Completion time (normal completion or forced termination at cutoff).
    pub completion_time: Option<f64>,
    /// Time spent ready but not running.
    pub waiting_time: f64,
    /// Completion time minus arrival time.
    pub turnaround_time: f64,
    /// Set once the process has received some service and re-enters the queue.
    pub is_returning: bool,
}

impl Process {
    pub fn new(id: u64, arrival_time: f64, burst_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            remaining_cpu_time: burst_time,
            start_time: None,
            completion_time: None,
            waiting_time: 0.0,
            turnaround_time: 0.0,
            is_returning: false,
        }
    }

    /// Record a dispatch at `now`. Only the first dispatch sets `start_time`.
    pub fn mark_dispatched(&mut self, now: f64) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Give the process up to `amount` of CPU service.
    ///
    /// Returns the service actually applied, which is clamped so that
    /// `remaining_cpu_time` never drops below zero.
    pub fn service(&mut self, amount: f64) -> f64 {
        let applied = amount.clamp(0.0, self.remaining_cpu_time);
        self.remaining_cpu_time -= applied;
        applied
    }

    /// CPU service performed so far.
    pub fn work_performed(&self) -> f64 {
        self.burst_time - self.remaining_cpu_time
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_cpu_time <= 0.0
    }

    /// Stamp completion, turnaround, and waiting times as of `time`.
    ///
    /// Leaves `remaining_cpu_time` untouched, so it also serves forced
    /// termination of a process that still owes service.
    pub fn complete_at(&mut self, time: f64) {
        let start = self.start_time.unwrap_or(self.arrival_time);
        self.completion_time = Some(time);
        self.turnaround_time = time - self.arrival_time;
        self.waiting_time = (start - self.arrival_time) + (time - start - self.burst_time);
    }

    /// Normal completion: all service delivered at `time`.
    pub fn finish(&mut self, time: f64) {
        self.remaining_cpu_time = 0.0;
        self.complete_at(time);
    }
}
