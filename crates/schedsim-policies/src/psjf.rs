//! Preemptive Shortest-Job-First ordering.
//!
//! Processes are ordered by remaining CPU time, shortest first. Equal
//! remaining times are served in insertion order: every insert takes a
//! sequence number, and the heap compares on `(remaining, sequence)` so the
//! ordering stays stable even though [`BinaryHeap`] itself is not.

use crate::process::Process;
use crate::sums::RunningSums;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A queued process keyed by its remaining time at insertion.
#[derive(Debug, Clone)]
struct QueuedProcess {
    sequence: u64,
    process: Process,
}

impl QueuedProcess {
    fn remaining(&self) -> f64 {
        self.process.remaining_cpu_time
    }
}

impl PartialEq for QueuedProcess {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedProcess {}

impl PartialOrd for QueuedProcess {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueuedProcess {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; we want the shortest remaining time first
        other
            .remaining()
            .total_cmp(&self.remaining())
            .then(other.sequence.cmp(&self.sequence))
    }
}

/// Ready queue ordered by remaining CPU time.
#[derive(Debug, Clone, Default)]
pub struct PsjfQueue {
    heap: BinaryHeap<QueuedProcess>,
    /// Sequence counter for tie-breaking.
    sequence: u64,
}

impl PsjfQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, process: Process) {
        self.heap.push(QueuedProcess {
            sequence: self.sequence,
            process,
        });
        self.sequence += 1;
    }

    pub fn remove_head(&mut self) -> Option<Process> {
        self.heap.pop().map(|queued| queued.process)
    }

    pub fn peek(&self) -> Option<&Process> {
        self.heap.peek().map(|queued| &queued.process)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Terminate every resident process at `final_time` and fold it into
    /// `sums`, draining the queue.
    ///
    /// A process that already received service has its full burst counted
    /// here, once, however many times it was requeued. Processes that never
    /// ran contribute turnaround and waiting time but no serviced time.
    /// Returns the terminated processes in queue order.
    pub fn reconcile_at_end(&mut self, final_time: f64, sums: &mut RunningSums) -> Vec<Process> {
        let drained = std::mem::take(&mut self.heap).into_sorted_vec();
        drained
            .into_iter()
            .rev()
            .map(|queued| {
                let mut process = queued.process;
                process.complete_at(final_time);
                if process.is_returning {
                    sums.add_serviced_time(process.burst_time);
                }
                sums.record_termination(&process);
                process
            })
            .collect()
    }
}
