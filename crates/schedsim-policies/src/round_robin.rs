//! Round-Robin ordering.
//!
//! A plain FIFO: arrivals and processes whose quantum expired both go to
//! the tail, the next dispatch comes from the head. An early arrival with a
//! long burst therefore drifts to the back of the line after each quantum.

use crate::process::Process;
use crate::sums::RunningSums;
use std::collections::VecDeque;

/// Ready queue in insertion order.
#[derive(Debug, Clone, Default)]
pub struct RoundRobinQueue {
    processes: VecDeque<Process>,
}

impl RoundRobinQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, process: Process) {
        self.processes.push_back(process);
    }

    pub fn remove_head(&mut self) -> Option<Process> {
        self.processes.pop_front()
    }

    pub fn peek(&self) -> Option<&Process> {
        self.processes.front()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Credit the partial service of every resident process, draining the
    /// queue.
    ///
    /// Once the arrival rate outruns service capacity the queue fills with
    /// processes that got a few quanta but never complete. Only completed
    /// bursts reach `sums` through the completion path, so their partial
    /// work is added here to keep utilization honest.
    pub fn reconcile_at_end(&mut self, sums: &mut RunningSums) -> Vec<Process> {
        self.processes
            .drain(..)
            .inspect(|process| {
                if process.is_returning {
                    sums.add_serviced_time(process.work_performed());
                }
            })
            .collect()
    }
}
