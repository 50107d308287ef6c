//! SchedSim CLI: compare PSJF and Round-Robin scheduling across arrival rates.

use clap::{Parser, Subcommand};
use schedsim_core::config::SimConfig;
use schedsim_core::metrics;
use schedsim_core::{trace, SchedulingPolicy, SimulationReport, WorkloadParams};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "schedsim",
    about = "Simulate PSJF and Round-Robin CPU scheduling",
    version
)]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation with a single policy.
    Run {
        /// Path to TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Scheduling policy (overrides the config).
        #[arg(short, long)]
        policy: Option<String>,
        /// Arrival rate λ in processes/sec (overrides the config).
        #[arg(short, long)]
        rate: Option<f64>,
        /// Path to a JSONL workload file.
        #[arg(short, long)]
        workload: Option<PathBuf>,
        /// Output results to JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run both policies on the same workload.
    Compare {
        /// Path to TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Arrival rate λ in processes/sec (overrides the config).
        #[arg(short, long)]
        rate: Option<f64>,
        /// Path to a JSONL workload file.
        #[arg(short, long)]
        workload: Option<PathBuf>,
        /// Output results to JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Sweep arrival rates, one run per rate.
    Sweep {
        /// Path to TOML configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Scheduling policy (overrides the config).
        #[arg(short, long)]
        policy: Option<String>,
        /// Comma-separated list of arrival rates (overrides the config).
        #[arg(long, value_delimiter = ',')]
        rates: Vec<f64>,
        /// Output results to JSON file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a synthetic workload file.
    GenWorkload {
        /// Arrival rate λ in processes/sec.
        #[arg(long, default_value = "10")]
        rate: f64,
        /// Number of processes.
        #[arg(long, default_value = "20000")]
        count: u64,
        /// Mean CPU burst in seconds.
        #[arg(long, default_value = "0.06")]
        mean_service_time: f64,
        /// Random seed.
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Output file path.
        #[arg(short, long)]
        output: PathBuf,
    },
    /// List available scheduling policies.
    ListPolicies,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run {
            config,
            policy,
            rate,
            workload,
            output,
        } => {
            let sim_config = load_config(config.as_deref(), rate);
            let policy = resolve_policy(&sim_config, policy.as_deref());
            let (sim_config, processes) = load_run(&sim_config, workload.as_deref());

            let result = schedsim_core::run_simulation(&sim_config, policy, processes);
            println!("{}", metrics::format_table(&result));

            if let Some(output_path) = output {
                write_json(&result, &output_path);
            }
        }
        Commands::Compare {
            config,
            rate,
            workload,
            output,
        } => {
            let sim_config = load_config(config.as_deref(), rate);
            let (sim_config, processes) = load_run(&sim_config, workload.as_deref());

            let results = schedsim_core::compare_policies(
                &sim_config,
                &processes,
                &[SchedulingPolicy::Psjf, SchedulingPolicy::RoundRobin],
            );
            for result in &results {
                println!("{}", metrics::format_table(result));
            }

            if let Some(output_path) = output {
                write_json(&results, &output_path);
            }
        }
        Commands::Sweep {
            config,
            policy,
            rates,
            output,
        } => {
            let mut sim_config = load_config(config.as_deref(), None);
            if !rates.is_empty() {
                sim_config.sweep.rates = rates;
                validate_or_exit(&sim_config);
            }
            let policy = resolve_policy(&sim_config, policy.as_deref());

            let results: Vec<SimulationReport> =
                schedsim_core::sweep_arrival_rates(&sim_config, policy, &sim_config.sweep.rates);
            println!("{}", metrics::format_sweep_table(&results));

            if let Some(output_path) = output {
                write_json(&results, &output_path);
            }
        }
        Commands::GenWorkload {
            rate,
            count,
            mean_service_time,
            seed,
            output,
        } => {
            if !(rate > 0.0) || !(mean_service_time > 0.0) || count == 0 {
                eprintln!("rate, mean-service-time, and count must all be > 0");
                std::process::exit(1);
            }
            let params = WorkloadParams {
                arrival_rate: rate,
                mean_service_time,
                process_count: count,
                seed,
            };
            let processes = schedsim_core::generate_workload(&params);

            trace::write_workload_jsonl(&processes, &output).unwrap_or_else(|e| {
                eprintln!("Error writing workload: {}", e);
                std::process::exit(1);
            });
            println!(
                "Generated {} processes (offered load {:.2}) to {}",
                processes.len(),
                params.offered_load(),
                output.display()
            );
        }
        Commands::ListPolicies => {
            println!("Available scheduling policies:");
            for name in schedsim_policies::available_policies() {
                println!("  - {}", name);
            }
        }
    }
}

fn load_config(path: Option<&Path>, rate: Option<f64>) -> SimConfig {
    let mut config = match path {
        Some(p) => SimConfig::from_file(p).unwrap_or_else(|e| {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }),
        None => SimConfig::default(),
    };
    if let Some(rate) = rate {
        config.workload.arrival_rate = rate;
        validate_or_exit(&config);
    }
    config
}

fn validate_or_exit(config: &SimConfig) {
    if let Err(e) = config.validate() {
        eprintln!("Error in configuration: {}", e);
        std::process::exit(1);
    }
}

fn resolve_policy(config: &SimConfig, name: Option<&str>) -> SchedulingPolicy {
    let result = match name {
        Some(name) => schedsim_policies::policy_by_name(name),
        None => config.policy(),
    };
    result.unwrap_or_else(|e| {
        eprintln!(
            "{}. Available: {:?}",
            e,
            schedsim_policies::available_policies()
        );
        std::process::exit(1);
    })
}

fn load_run(
    config: &SimConfig,
    workload: Option<&Path>,
) -> (SimConfig, Vec<schedsim_core::Process>) {
    schedsim_core::load_run(config, workload).unwrap_or_else(|e| {
        eprintln!("Error loading workload: {}", e);
        std::process::exit(1);
    })
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) {
    let json = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error serializing results: {}", e);
        std::process::exit(1);
    });
    std::fs::write(path, json).unwrap_or_else(|e| {
        eprintln!("Error writing output: {}", e);
        std::process::exit(1);
    });
    println!("Results written to {}", path.display());
}
