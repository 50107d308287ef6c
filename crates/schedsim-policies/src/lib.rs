//! Ready-queue policies for SchedSim.
//!
//! This crate owns the parts of the simulator that decide *who runs next*
//! and how a run's work is accounted:
//!
//! | Type | Role |
//! |------|------|
//! | [`Process`] | One simulated job and its timestamps |
//! | [`SchedulingPolicy`] | Discipline selector, fixed per run |
//! | [`ReadyQueue`] | Policy-specific ordering of waiting processes |
//! | [`PsjfQueue`] | Shortest remaining time first, stable ties |
//! | [`RoundRobinQueue`] | FIFO with tail requeue |
//! | [`RunningSums`] | Serviced time, turnaround, waiting, handled count |

pub mod policy;
pub mod process;
pub mod psjf;
pub mod ready_queue;
pub mod round_robin;
pub mod sums;

pub use policy::{PolicyError, SchedulingPolicy};
pub use process::Process;
pub use psjf::PsjfQueue;
pub use ready_queue::ReadyQueue;
pub use round_robin::RoundRobinQueue;
pub use sums::RunningSums;

/// Look up a scheduling policy by name.
pub fn policy_by_name(name: &str) -> Result<SchedulingPolicy, PolicyError> {
    name.parse()
}

/// List all built-in policy names.
pub fn available_policies() -> Vec<&'static str> {
    vec![
        SchedulingPolicy::Psjf.name(),
        SchedulingPolicy::RoundRobin.name(),
    ]
}
