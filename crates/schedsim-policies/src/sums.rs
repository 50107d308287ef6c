//! Running sums accumulated over one simulation run.
//!
//! A [`RunningSums`] is created zeroed for every run and handed by `&mut` to
//! the two places allowed to write it: the engine's completion path and the
//! ready queue's end-of-run reconciliation. Everything else only reads it.

use crate::process::Process;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningSums {
    serviced_burst_time: f64,
    turnaround_time: f64,
    waiting_time: f64,
    processes_handled: u64,
}

impl RunningSums {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total CPU service attributed to processes.
    pub fn serviced_burst_time(&self) -> f64 {
        self.serviced_burst_time
    }

    pub fn turnaround_time(&self) -> f64 {
        self.turnaround_time
    }

    pub fn waiting_time(&self) -> f64 {
        self.waiting_time
    }

    pub fn processes_handled(&self) -> u64 {
        self.processes_handled
    }

    /// Fold in a process that completed normally.
    pub fn record_completion(&mut self, process: &Process) {
        self.serviced_burst_time += process.burst_time;
        self.record_termination(process);
    }

    /// Fold in turnaround and waiting time of a process terminated at
    /// cutoff. Serviced time is accounted separately by the caller.
    pub(crate) fn record_termination(&mut self, process: &Process) {
        self.turnaround_time += process.turnaround_time;
        self.waiting_time += process.waiting_time;
        self.processes_handled += 1;
    }

    pub(crate) fn add_serviced_time(&mut self, time: f64) {
        self.serviced_burst_time += time;
    }

    /// Fraction of `final_time` the CPU spent servicing processes.
    pub fn utilization(&self, final_time: f64) -> f64 {
        if final_time > 0.0 {
            self.serviced_burst_time / final_time
        } else {
            0.0
        }
    }

    pub fn mean_waiting_time(&self, count: u64) -> f64 {
        mean(self.waiting_time, count)
    }

    pub fn mean_turnaround_time(&self, count: u64) -> f64 {
        mean(self.turnaround_time, count)
    }
}

fn mean(sum: f64, count: u64) -> f64 {
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
