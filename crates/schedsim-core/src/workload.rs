//! Synthetic workload generation.
//!
//! Arrivals form a Poisson process with rate λ, so inter-arrival gaps are
//! exponential with mean `1/λ`. Burst times are exponential with the
//! configured mean service time. Both are drawn by inverse transform from a
//! seeded ChaCha stream, so a given seed always yields the same workload.

use crate::config::SimConfig;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use schedsim_policies::Process;
use serde::{Deserialize, Serialize};

/// Parameters of a synthetic workload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorkloadParams {
    /// Mean arrivals per second (λ).
    pub arrival_rate: f64,
    /// Mean CPU burst in seconds.
    pub mean_service_time: f64,
    /// Number of processes to generate.
    pub process_count: u64,
    pub seed: u64,
}

impl WorkloadParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            arrival_rate: config.workload.arrival_rate,
            mean_service_time: config.workload.mean_service_time,
            process_count: config.workload.process_count,
            seed: config.simulation.seed,
        }
    }

    /// Offered load ρ = λ · E[S]. Above 1.0 the ready queue grows without bound.
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate * self.mean_service_time
    }
}

/// Generate processes in arrival order with ids `0..process_count`.
pub fn generate_workload(params: &WorkloadParams) -> Vec<Process> {
    let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
    let service_rate = 1.0 / params.mean_service_time;
    let mut arrival = 0.0;

    (0..params.process_count)
        .map(|id| {
            arrival += sample_exponential(&mut rng, params.arrival_rate);
            let burst = sample_exponential(&mut rng, service_rate);
            Process::new(id, arrival, burst)
        })
        .collect()
}

/// Observed arrival rate of a workload: processes per second of arrival
/// span, measured from time zero. `None` when nothing arrives after zero.
pub fn empirical_arrival_rate(processes: &[Process]) -> Option<f64> {
    let span = processes.iter().map(|p| p.arrival_time).fold(0.0, f64::max);
    (span > 0.0).then(|| processes.len() as f64 / span)
}

/// Exponential sample with the given rate via inverse transform.
fn sample_exponential<R: Rng>(rng: &mut R, rate: f64) -> f64 {
    let u: f64 = rng.gen();
    -(1.0 - u).ln() / rate
}
