//! Policy-selected ready queue.
//!
//! [`ReadyQueue`] picks its ordering once, at construction, from a
//! [`SchedulingPolicy`]. The engine creates one per run and owns it for the
//! run's duration; nothing is shared between runs.

use crate::policy::{PolicyError, SchedulingPolicy};
use crate::process::Process;
use crate::psjf::PsjfQueue;
use crate::round_robin::RoundRobinQueue;
use crate::sums::RunningSums;

#[derive(Debug, Clone)]
pub enum ReadyQueue {
    Psjf(PsjfQueue),
    RoundRobin(RoundRobinQueue),
}

impl ReadyQueue {
    pub fn new(policy: SchedulingPolicy) -> Self {
        match policy {
            SchedulingPolicy::Psjf => ReadyQueue::Psjf(PsjfQueue::new()),
            SchedulingPolicy::RoundRobin => ReadyQueue::RoundRobin(RoundRobinQueue::new()),
        }
    }

    /// Build a queue from a policy name, failing on names we do not know.
    pub fn from_name(name: &str) -> Result<Self, PolicyError> {
        Ok(Self::new(name.parse()?))
    }

    pub fn policy(&self) -> SchedulingPolicy {
        match self {
            ReadyQueue::Psjf(_) => SchedulingPolicy::Psjf,
            ReadyQueue::RoundRobin(_) => SchedulingPolicy::RoundRobin,
        }
    }

    /// Admit a process, fresh or returning.
    pub fn insert(&mut self, process: Process) {
        match self {
            ReadyQueue::Psjf(queue) => queue.insert(process),
            ReadyQueue::RoundRobin(queue) => queue.insert(process),
        }
    }

    /// Next process to dispatch, or `None` when the CPU should idle.
    pub fn remove_head(&mut self) -> Option<Process> {
        match self {
            ReadyQueue::Psjf(queue) => queue.remove_head(),
            ReadyQueue::RoundRobin(queue) => queue.remove_head(),
        }
    }

    pub fn peek(&self) -> Option<&Process> {
        match self {
            ReadyQueue::Psjf(queue) => queue.peek(),
            ReadyQueue::RoundRobin(queue) => queue.peek(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReadyQueue::Psjf(queue) => queue.len(),
            ReadyQueue::RoundRobin(queue) => queue.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ReadyQueue::Psjf(queue) => queue.is_empty(),
            ReadyQueue::RoundRobin(queue) => queue.is_empty(),
        }
    }

    /// End-of-run pass over every process still waiting.
    ///
    /// Drains the queue, so calling it again adds nothing. Round-Robin does
    /// not use `final_time`.
    pub fn reconcile_at_end(&mut self, final_time: f64, sums: &mut RunningSums) -> Vec<Process> {
        let reconciled = match self {
            ReadyQueue::Psjf(queue) => queue.reconcile_at_end(final_time, sums),
            ReadyQueue::RoundRobin(queue) => queue.reconcile_at_end(sums),
        };
        tracing::debug!(
            policy = %self.policy(),
            final_time,
            reconciled = reconciled.len(),
            "reconciled ready queue"
        );
        reconciled
    }
}
