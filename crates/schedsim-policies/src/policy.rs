//! Scheduling policy selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("Unknown scheduling policy: {0}")]
    Unknown(String),
}

/// Which discipline orders the ready queue. Fixed for the lifetime of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchedulingPolicy {
    /// Preemptive Shortest-Job-First, ordered by remaining CPU time.
    Psjf,
    /// Round-Robin with a fixed quantum, FIFO rotation.
    RoundRobin,
}

impl SchedulingPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            SchedulingPolicy::Psjf => "psjf",
            SchedulingPolicy::RoundRobin => "round_robin",
        }
    }

    /// Whether an arrival may preempt the running process.
    pub fn preempts_on_arrival(&self) -> bool {
        matches!(self, SchedulingPolicy::Psjf)
    }

    /// Whether dispatches are limited to a time quantum.
    pub fn uses_quantum(&self) -> bool {
        matches!(self, SchedulingPolicy::RoundRobin)
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchedulingPolicy {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "psjf" | "srtf" => Ok(SchedulingPolicy::Psjf),
            "round_robin" | "round-robin" | "rr" => Ok(SchedulingPolicy::RoundRobin),
            _ => Err(PolicyError::Unknown(s.to_string())),
        }
    }
}
