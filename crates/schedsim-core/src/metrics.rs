//! Report aggregation for simulation runs.
//!
//! The engine hands over the run's [`RunningSums`] and its event counters
//! once the run is over; [`aggregate`] turns them into a
//! [`SimulationReport`] with CPU utilization, mean waiting time, and mean
//! turnaround time.

use schedsim_policies::{RunningSums, SchedulingPolicy};
use serde::{Deserialize, Serialize};

/// Event counters maintained by the engine during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub events_processed: u64,
    pub arrivals: u64,
    pub completions: u64,
    /// Dispatches onto the CPU (context switches in).
    pub dispatches: u64,
    /// Running processes displaced by a shorter arrival.
    pub preemptions: u64,
    pub quantum_expiries: u64,
}

/// Aggregated metrics for an entire simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Policy name.
    pub policy: String,
    /// Configured arrival rate (λ).
    pub arrival_rate: f64,
    /// Round-Robin quantum, if the policy uses one.
    pub quantum: Option<f64>,
    /// Simulated time at cutoff.
    pub final_time: f64,

    pub processes_arrived: u64,
    pub processes_completed: u64,
    /// Processes counted in the averages (completions plus any terminated at cutoff).
    pub processes_handled: u64,
    /// Processes still in the ready queue at cutoff.
    pub residual_processes: u64,

    pub cpu_utilization: f64,
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    /// Completions per simulated second.
    pub throughput: f64,

    pub dispatches: u64,
    pub preemptions: u64,
    pub quantum_expiries: u64,
    pub events_processed: u64,

    /// Raw sums the averages were derived from.
    pub sums: RunningSums,
}

/// Build the report for a finished run.
pub fn aggregate(
    policy: SchedulingPolicy,
    arrival_rate: f64,
    quantum: f64,
    final_time: f64,
    sums: &RunningSums,
    counters: &RunCounters,
    residual_processes: u64,
) -> SimulationReport {
    let handled = sums.processes_handled();
    SimulationReport {
        policy: policy.name().to_string(),
        arrival_rate,
        quantum: policy.uses_quantum().then_some(quantum),
        final_time,
        processes_arrived: counters.arrivals,
        processes_completed: counters.completions,
        processes_handled: handled,
        residual_processes,
        cpu_utilization: sums.utilization(final_time),
        avg_waiting_time: sums.mean_waiting_time(handled),
        avg_turnaround_time: sums.mean_turnaround_time(handled),
        throughput: if final_time > 0.0 {
            counters.completions as f64 / final_time
        } else {
            0.0
        },
        dispatches: counters.dispatches,
        preemptions: counters.preemptions,
        quantum_expiries: counters.quantum_expiries,
        events_processed: counters.events_processed,
        sums: *sums,
    }
}

/// Format a report as a pretty-printed table string.
pub fn format_table(report: &SimulationReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "\n{:=<70}\n",
        format!("  {} @ λ={:.2}  ", report.policy, report.arrival_rate)
    ));
    let quantum = report
        .quantum
        .map(|q| format!(" | Quantum: {:.4}s", q))
        .unwrap_or_default();
    out.push_str(&format!(
        "  Simulated: {:.3}s | Arrived: {} | Completed: {} | Residual: {}{}\n",
        report.final_time,
        report.processes_arrived,
        report.processes_completed,
        report.residual_processes,
        quantum,
    ));
    out.push_str(&format!("{:-<70}\n", "  Performance  "));
    out.push_str(&format!(
        "  CPU utilization:      {:>8.2}%\n",
        report.cpu_utilization * 100.0
    ));
    out.push_str(&format!(
        "  Avg turnaround (s):   {:>8.4}\n",
        report.avg_turnaround_time
    ));
    out.push_str(&format!(
        "  Avg waiting (s):      {:>8.4}\n",
        report.avg_waiting_time
    ));
    out.push_str(&format!(
        "  Throughput (proc/s):  {:>8.2}\n",
        report.throughput
    ));
    out.push_str(&format!("{:-<70}\n", "  Scheduler  "));
    out.push_str(&format!(
        "  Dispatches: {}  Preemptions: {}  Quantum expiries: {}  Events: {}\n",
        report.dispatches, report.preemptions, report.quantum_expiries, report.events_processed,
    ));
    out.push_str(&format!("{:=<70}\n", ""));
    out
}

/// Format one row per run, typically a sweep over arrival rates.
pub fn format_sweep_table(reports: &[SimulationReport]) -> String {
    if reports.is_empty() {
        return String::from("No results to show.\n");
    }

    let mut out = String::new();
    out.push_str(&format!("\n{:=<78}\n", "  Arrival Rate Sweep  "));
    out.push_str(&format!(
        "{:<14} {:>8} {:>10} {:>12} {:>12} {:>10} {:>8}\n",
        "Policy", "λ", "CPU util%", "Turnaround", "Waiting", "Proc/s", "Queue"
    ));
    out.push_str(&format!("{:-<78}\n", ""));

    for r in reports {
        out.push_str(&format!(
            "{:<14} {:>8.2} {:>9.2}% {:>12.4} {:>12.4} {:>10.2} {:>8}\n",
            r.policy,
            r.arrival_rate,
            r.cpu_utilization * 100.0,
            r.avg_turnaround_time,
            r.avg_waiting_time,
            r.throughput,
            r.residual_processes,
        ));
    }
    out.push_str(&format!("{:=<78}\n", ""));
    out
}
