//! TOML configuration parsing for SchedSim.
//!
//! Defines the configuration schema for simulation runs: run identity and
//! cutoff, scheduler policy and quantum, workload shape, and the arrival
//! rates covered by a sweep. Every section is optional and falls back to
//! the classic setup (mean service time 0.06s, quantum 0.01s, a cutoff of
//! 10,000 completions out of 20,000 generated processes,
//! processes, λ from 1 to 30).

use schedsim_policies::{PolicyError, SchedulingPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub simulation: SimulationSection,
    #[serde(default)]
    pub scheduler: SchedulerSection,
    #[serde(default)]
    pub workload: WorkloadSection,
    #[serde(default)]
    pub sweep: SweepSection,
}

/// General simulation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationSection {
    /// Human-readable name for this simulation.
    #[serde(default = "default_sim_name")]
    pub name: String,
    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Stop the run once this many processes have completed.
    #[serde(default = "default_max_completions")]
    pub max_completions: u64,
}

fn default_sim_name() -> String {
    "simulation".to_string()
}

fn default_seed() -> u64 {
    42
}

fn default_max_completions() -> u64 {
    10_000
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            name: default_sim_name(),
            seed: default_seed(),
            max_completions: default_max_completions(),
        }
    }
}

/// Scheduler selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSection {
    /// Policy name: "psjf" or "round_robin".
    #[serde(default = "default_policy")]
    pub policy: String,
    /// Round-Robin time quantum in seconds.
    #[serde(default = "default_quantum")]
    pub quantum: f64,
}

fn default_policy() -> String {
    "psjf".to_string()
}

fn default_quantum() -> f64 {
    0.01
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            policy: default_policy(),
            quantum: default_quantum(),
        }
    }
}

/// Workload shape for synthetic generation, or a workload file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadSection {
    /// Mean arrivals per second (λ).
    #[serde(default = "default_arrival_rate")]
    pub arrival_rate: f64,
    /// Mean CPU burst in seconds.
    #[serde(default = "default_mean_service_time")]
    pub mean_service_time: f64,
    /// Number of processes to generate. Keep this above
    /// `max_completions` so saturated runs hit the cutoff with a backlog.
    #[serde(default = "default_process_count")]
    pub process_count: u64,
    /// JSONL workload file. Overrides synthetic generation when set.
    pub path: Option<String>,
}

fn default_arrival_rate() -> f64 {
    10.0
}

fn default_mean_service_time() -> f64 {
    0.06
}

fn default_process_count() -> u64 {
    20_000
}

impl Default for WorkloadSection {
    fn default() -> Self {
        Self {
            arrival_rate: default_arrival_rate(),
            mean_service_time: default_mean_service_time(),
            process_count: default_process_count(),
            path: None,
        }
    }
}

/// Arrival rates for a sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepSection {
    #[serde(default = "default_sweep_rates")]
    pub rates: Vec<f64>,
}

fn default_sweep_rates() -> Vec<f64> {
    (1..=30).map(f64::from).collect()
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            rates: default_sweep_rates(),
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.policy()?;
        if !(self.scheduler.quantum > 0.0) {
            return Err(ConfigError::Validation("quantum must be > 0".to_string()));
        }
        if self.simulation.max_completions == 0 {
            return Err(ConfigError::Validation(
                "max_completions must be > 0".to_string(),
            ));
        }
        if !(self.workload.arrival_rate > 0.0) {
            return Err(ConfigError::Validation(
                "arrival_rate must be > 0".to_string(),
            ));
        }
        if !(self.workload.mean_service_time > 0.0) {
            return Err(ConfigError::Validation(
                "mean_service_time must be > 0".to_string(),
            ));
        }
        if self.workload.process_count == 0 {
            return Err(ConfigError::Validation(
                "process_count must be > 0".to_string(),
            ));
        }
        if self.drains_before_cutoff() {
            tracing::warn!(
                process_count = self.workload.process_count,
                max_completions = self.simulation.max_completions,
                "synthetic workload drains before the completion cutoff; \
                 saturated runs will end with an empty ready queue"
            );
        }
        if let Some(rate) = self.sweep.rates.iter().find(|r| !(**r > 0.0)) {
            return Err(ConfigError::Validation(format!(
                "sweep rates must be > 0, got {}",
                rate
            )));
        }
        Ok(())
    }

    /// True when a synthetic workload has no more processes than the
    /// completion cutoff, so every run completes all of them.
    pub fn drains_before_cutoff(&self) -> bool {
        self.workload.path.is_none()
            && self.workload.process_count <= self.simulation.max_completions
    }

    /// Parse the configured policy name.
    pub fn policy(&self) -> Result<SchedulingPolicy, PolicyError> {
        self.scheduler.policy.parse()
    }

    /// Copy of this config with a different arrival rate.
    pub fn with_arrival_rate(&self, rate: f64) -> Self {
        let mut config = self.clone();
        config.workload.arrival_rate = rate;
        config
    }
}
