//! Discrete-event simulation engine.
//!
//! The engine maintains a priority queue of [`SimEvent`]s sorted by
//! timestamp. Each iteration pops the next event, sets the virtual clock to
//! its time, and processes it, which may dispatch a process onto the CPU
//! and schedule that dispatch's completion or quantum expiry.
//!
//! At cutoff (enough completions, or no events left) the process on the CPU
//! is charged for the service it got and returned to the ready queue, and
//! the ready queue reconciles everything still waiting.

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::metrics::{self, RunCounters, SimulationReport};
use schedsim_policies::{Process, ReadyQueue, RunningSums, SchedulingPolicy};
use std::collections::BinaryHeap;

/// Events in the discrete-event simulation.
#[derive(Debug, Clone)]
pub enum SimEvent {
    /// A process arrives and asks for the CPU.
    Arrival(Process),
    /// The dispatch with this id finishes its process.
    Completion { dispatch_id: u64 },
    /// The dispatch with this id used up its quantum.
    QuantumExpiry { dispatch_id: u64 },
}

/// A timestamped event for the priority queue.
#[derive(Debug, Clone)]
struct TimedEvent {
    time: f64,
    sequence: u64,
    event: SimEvent,
}

impl PartialEq for TimedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for TimedEvent {}

impl PartialOrd for TimedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimedEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // BinaryHeap is a max-heap; we want min-heap
        other
            .time
            .total_cmp(&self.time)
            .then(other.sequence.cmp(&self.sequence))
    }
}

/// The process currently holding the CPU.
#[derive(Debug, Clone)]
struct Running {
    process: Process,
    dispatch_id: u64,
    dispatched_at: f64,
    /// Service granted by this dispatch.
    slice: f64,
}

/// The main simulation engine. One instance per run.
pub struct SimulationEngine {
    /// Virtual clock.
    pub clock: SimClock,
    /// Event queue (min-heap by time).
    event_queue: BinaryHeap<TimedEvent>,
    /// Sequence counter for tie-breaking.
    sequence: u64,
    ready_queue: ReadyQueue,
    running: Option<Running>,
    next_dispatch_id: u64,
    sums: RunningSums,
    pub counters: RunCounters,
    policy: SchedulingPolicy,
    quantum: f64,
    max_completions: u64,
    arrival_rate: f64,
}

impl SimulationEngine {
    /// Create an engine for `policy` using the run parameters in `config`.
    pub fn new(policy: SchedulingPolicy, config: &SimConfig) -> Self {
        Self {
            clock: SimClock::new(),
            event_queue: BinaryHeap::new(),
            sequence: 0,
            ready_queue: ReadyQueue::new(policy),
            running: None,
            next_dispatch_id: 0,
            sums: RunningSums::new(),
            counters: RunCounters::default(),
            policy,
            quantum: config.scheduler.quantum,
            max_completions: config.simulation.max_completions,
            arrival_rate: config.workload.arrival_rate,
        }
    }

    /// Schedule an event at a given time.
    pub fn schedule_event(&mut self, time: f64, event: SimEvent) {
        self.event_queue.push(TimedEvent {
            time,
            sequence: self.sequence,
            event,
        });
        self.sequence += 1;
    }

    /// Load a workload into the event queue as arrivals.
    pub fn load_workload(&mut self, processes: Vec<Process>) {
        for process in processes {
            let arrival = process.arrival_time;
            self.schedule_event(arrival, SimEvent::Arrival(process));
        }
    }

    /// Run until the completion cutoff or until no events remain.
    pub fn run(&mut self) -> SimulationReport {
        self.run_observed(|_| {})
    }

    /// [`run`](Self::run), calling `observe` with the clock after every
    /// processed event.
    pub fn run_observed(&mut self, mut observe: impl FnMut(&SimClock)) -> SimulationReport {
        tracing::debug!(
            policy = %self.policy,
            arrival_rate = self.arrival_rate,
            pending = self.event_queue.len(),
            "starting run"
        );

        while self.counters.completions < self.max_completions {
            let Some(timed_event) = self.event_queue.pop() else {
                break;
            };
            debug_assert!(
                timed_event.time >= self.clock.now(),
                "Cannot move clock backwards: current={}, target={}",
                self.clock.now(),
                timed_event.time,
            );
            self.clock.set_time(timed_event.time);
            self.process_event(timed_event.event);
            self.counters.events_processed += 1;
            observe(&self.clock);
        }

        self.finish()
    }

    /// Process a single event.
    fn process_event(&mut self, event: SimEvent) {
        match event {
            SimEvent::Arrival(process) => self.handle_arrival(process),
            SimEvent::Completion { dispatch_id } => self.handle_completion(dispatch_id),
            SimEvent::QuantumExpiry { dispatch_id } => self.handle_quantum_expiry(dispatch_id),
        }
    }

    /// Handle an arrival: run it, preempt for it, or queue it.
    fn handle_arrival(&mut self, process: Process) {
        self.counters.arrivals += 1;
        let now = self.clock.now();

        let Some(running) = &self.running else {
            self.dispatch(process);
            return;
        };

        let running_remaining =
            running.process.remaining_cpu_time - (now - running.dispatched_at);
        if self.policy.preempts_on_arrival() && process.remaining_cpu_time < running_remaining {
            self.preempt_running();
            self.dispatch(process);
        } else {
            self.ready_queue.insert(process);
        }
    }

    /// Take the running process off the CPU and requeue it.
    fn preempt_running(&mut self) {
        if let Some(running) = self.running.take() {
            let process = self.charge_partial_service(running);
            tracing::trace!(
                time = self.clock.now(),
                process = process.id,
                remaining = process.remaining_cpu_time,
                "preempted"
            );
            self.ready_queue.insert(process);
            self.counters.preemptions += 1;
        }
    }

    /// Charge `running` for the service it received since dispatch.
    fn charge_partial_service(&self, running: Running) -> Process {
        let mut process = running.process;
        let elapsed = (self.clock.now() - running.dispatched_at).min(running.slice);
        if process.service(elapsed) > 0.0 {
            process.is_returning = true;
        }
        process
    }

    /// Handle a completion: account the process and dispatch the next one.
    fn handle_completion(&mut self, dispatch_id: u64) {
        let Some(running) = self.take_if_current(dispatch_id) else {
            return;
        };
        let now = self.clock.now();
        let mut process = running.process;
        process.finish(now);
        self.sums.record_completion(&process);
        self.counters.completions += 1;
        tracing::trace!(
            time = now,
            process = process.id,
            turnaround = process.turnaround_time,
            "completed"
        );

        self.dispatch_next();
    }

    /// Handle a quantum expiry: requeue at the tail and dispatch the head.
    fn handle_quantum_expiry(&mut self, dispatch_id: u64) {
        let Some(running) = self.take_if_current(dispatch_id) else {
            return;
        };
        let mut process = running.process;
        process.service(running.slice);
        process.is_returning = true;
        self.ready_queue.insert(process);
        self.counters.quantum_expiries += 1;

        self.dispatch_next();
    }

    /// Take the running process if `dispatch_id` is its current dispatch.
    /// Events for earlier dispatches are stale after a preemption.
    fn take_if_current(&mut self, dispatch_id: u64) -> Option<Running> {
        match &self.running {
            Some(running) if running.dispatch_id == dispatch_id => self.running.take(),
            _ => None,
        }
    }

    fn dispatch_next(&mut self) {
        if let Some(process) = self.ready_queue.remove_head() {
            self.dispatch(process);
        }
    }

    /// Put `process` on the CPU and schedule the end of its slice.
    fn dispatch(&mut self, mut process: Process) {
        debug_assert!(self.running.is_none(), "CPU already running a process");
        let now = self.clock.now();
        process.mark_dispatched(now);

        let remaining = process.remaining_cpu_time;
        let slice = if self.policy.uses_quantum() {
            remaining.min(self.quantum)
        } else {
            remaining
        };

        let dispatch_id = self.next_dispatch_id;
        self.next_dispatch_id += 1;
        let event = if slice >= remaining {
            SimEvent::Completion { dispatch_id }
        } else {
            SimEvent::QuantumExpiry { dispatch_id }
        };
        self.schedule_event(now + slice, event);

        self.running = Some(Running {
            process,
            dispatch_id,
            dispatched_at: now,
            slice,
        });
        self.counters.dispatches += 1;
    }

    /// Cut the run off at the current time and build the report.
    fn finish(&mut self) -> SimulationReport {
        let final_time = self.clock.now();

        if let Some(running) = self.running.take() {
            let process = self.charge_partial_service(running);
            self.ready_queue.insert(process);
        }

        let residual = self
            .ready_queue
            .reconcile_at_end(final_time, &mut self.sums)
            .len() as u64;

        let report = metrics::aggregate(
            self.policy,
            self.arrival_rate,
            self.quantum,
            final_time,
            &self.sums,
            &self.counters,
            residual,
        );
        tracing::info!(
            policy = %self.policy,
            arrival_rate = self.arrival_rate,
            final_time,
            completed = report.processes_completed,
            residual,
            utilization = report.cpu_utilization,
            "run finished"
        );
        report
    }

    /// Running sums accumulated so far.
    pub fn sums(&self) -> &RunningSums {
        &self.sums
    }

    /// Processes waiting in the ready queue.
    pub fn ready_len(&self) -> usize {
        self.ready_queue.len()
    }

    /// Get the number of pending events.
    pub fn pending_events(&self) -> usize {
        self.event_queue.len()
    }
}
