//! SchedSim: discrete-event simulator for CPU process scheduling.
//!
//! This crate drives Preemptive Shortest-Job-First and Round-Robin
//! scheduling over a stream of arriving processes and reports CPU
//! utilization, mean waiting time, and mean turnaround time as a function
//! of arrival rate. Ready-queue orderings and run accounting come from
//! `schedsim-policies`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐     ┌───────────┐     ┌──────────────┐
//! │ Workload │────▶│  Engine   │────▶│    Report    │
//! │Generation│     │ (Events)  │     │ Aggregation  │
//! └──────────┘     └─────┬─────┘     └──────────────┘
//!                        │
//!             ┌──────────┼──────────┐
//!             ▼          ▼          ▼
//!       ┌──────────┐ ┌────────┐ ┌─────────┐
//!       │ SimClock │ │ Ready  │ │ Running │
//!       │          │ │ Queue  │ │  Sums   │
//!       └──────────┘ └────────┘ └─────────┘
//! ```
//!
//! Every run owns its clock, ready queue, and sums, so sweeps execute runs
//! in parallel and merge only the finished reports.

pub mod clock;
pub mod config;
pub mod engine;
pub mod metrics;
pub mod trace;
pub mod workload;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

// Re-export key types for convenience.
pub use clock::SimClock;
pub use config::{ConfigError, SimConfig};
pub use engine::{SimEvent, SimulationEngine};
pub use metrics::{RunCounters, SimulationReport};
pub use schedsim_policies::{Process, ReadyQueue, RunningSums, SchedulingPolicy};
pub use trace::{load_workload, write_workload_jsonl, TraceError};
pub use workload::{empirical_arrival_rate, generate_workload, WorkloadParams};

/// Run a complete simulation of `processes` under `policy`.
pub fn run_simulation(
    config: &SimConfig,
    policy: SchedulingPolicy,
    processes: Vec<Process>,
) -> SimulationReport {
    let mut engine = SimulationEngine::new(policy, config);
    engine.load_workload(processes);
    engine.run()
}

/// Run every policy on the same workload.
pub fn compare_policies(
    config: &SimConfig,
    processes: &[Process],
    policies: &[SchedulingPolicy],
) -> Vec<SimulationReport> {
    policies
        .par_iter()
        .map(|&policy| run_simulation(config, policy, processes.to_vec()))
        .collect()
}

/// One run per arrival rate, each on its own freshly generated workload.
///
/// Results come back in the order of `rates`.
pub fn sweep_arrival_rates(
    config: &SimConfig,
    policy: SchedulingPolicy,
    rates: &[f64],
) -> Vec<SimulationReport> {
    tracing::info!(%policy, points = rates.len(), "sweeping arrival rates");
    rates
        .par_iter()
        .map(|&rate| {
            let run_config = config.with_arrival_rate(rate);
            let processes = generate_workload(&WorkloadParams::from_config(&run_config));
            run_simulation(&run_config, policy, processes)
        })
        .collect()
}

/// Processes for a run: the workload file if one is given (argument first,
/// then `workload.path`), otherwise a synthetic workload from the config.
pub fn load_processes(
    config: &SimConfig,
    workload_path: Option<&Path>,
) -> Result<Vec<Process>, TraceError> {
    load_run(config, workload_path).map(|(_, processes)| processes)
}

/// Like [`load_processes`], also returning the config to run them with.
///
/// A workload file fixes its own arrivals, so the returned config carries
/// the file's empirical arrival rate (0.0 if it has no span) in place of the
/// configured one, and reports show the rate that was actually simulated.
pub fn load_run(
    config: &SimConfig,
    workload_path: Option<&Path>,
) -> Result<(SimConfig, Vec<Process>), TraceError> {
    let path = workload_path
        .map(PathBuf::from)
        .or_else(|| config.workload.path.as_ref().map(PathBuf::from));

    match path {
        Some(p) => {
            let processes = load_workload(&p)?;
            let rate = empirical_arrival_rate(&processes).unwrap_or(0.0);
            tracing::debug!(
                path = %p.display(),
                processes = processes.len(),
                rate,
                "loaded workload file"
            );
            Ok((config.with_arrival_rate(rate), processes))
        }
        None => Ok((
            config.clone(),
            generate_workload(&WorkloadParams::from_config(config)),
        )),
    }
}
