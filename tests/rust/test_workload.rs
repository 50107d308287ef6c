/// Integration tests for workload generation and workload files.
use schedsim_core::config::SimConfig;
use schedsim_core::{generate_workload, trace, Process, TraceError, WorkloadParams};

fn params(arrival_rate: f64, process_count: u64, seed: u64) -> WorkloadParams {
    WorkloadParams {
        arrival_rate,
        mean_service_time: 0.06,
        process_count,
        seed,
    }
}

#[test]
fn test_generated_workload_shape() {
    let processes = generate_workload(&params(20.0, 5000, 7));
    assert_eq!(processes.len(), 5000);

    for (i, p) in processes.iter().enumerate() {
        assert_eq!(p.id, i as u64);
        assert!(p.burst_time >= 0.0);
        assert_eq!(p.remaining_cpu_time, p.burst_time);
        assert!(p.start_time.is_none());
    }
    for pair in processes.windows(2) {
        assert!(pair[1].arrival_time >= pair[0].arrival_time);
    }

    // Sample means land near 1/λ and the mean service time.
    let n = processes.len() as f64;
    let mean_gap = processes[processes.len() - 1].arrival_time / n;
    let mean_burst = processes.iter().map(|p| p.burst_time).sum::<f64>() / n;
    assert!((mean_gap - 0.05).abs() < 0.005, "mean gap {}", mean_gap);
    assert!((mean_burst - 0.06).abs() < 0.006, "mean burst {}", mean_burst);
}

#[test]
fn test_seed_controls_workload() {
    let a = generate_workload(&params(10.0, 100, 1));
    let b = generate_workload(&params(10.0, 100, 1));
    let c = generate_workload(&params(10.0, 100, 2));
    assert_eq!(a[99].arrival_time, b[99].arrival_time);
    assert_eq!(a[50].burst_time, b[50].burst_time);
    assert_ne!(a[99].arrival_time, c[99].arrival_time);
}

#[test]
fn test_offered_load() {
    assert!((params(10.0, 1, 0).offered_load() - 0.6).abs() < 1e-12);
    assert!(params(30.0, 1, 0).offered_load() > 1.0);
}

#[test]
fn test_write_and_read_workload() {
    let tmp_path = std::env::temp_dir().join("schedsim_test_workload.jsonl");

    let processes = vec![
        Process::new(0, 0.0, 0.125),
        Process::new(1, 0.5, 0.25),
        Process::new(2, 0.5, 0.0625),
    ];
    trace::write_workload_jsonl(&processes, &tmp_path).unwrap();

    let loaded = trace::load_workload(&tmp_path).unwrap();
    assert_eq!(loaded.len(), 3);
    for (written, read) in processes.iter().zip(&loaded) {
        assert_eq!(read.id, written.id);
        assert_eq!(read.arrival_time, written.arrival_time);
        assert_eq!(read.burst_time, written.burst_time);
    }

    std::fs::remove_file(&tmp_path).ok();
}

#[test]
fn test_workload_file_drives_run() {
    let tmp_path = std::env::temp_dir().join("schedsim_test_run_workload.jsonl");
    std::fs::write(
        &tmp_path,
        "{\"arrival\": 0.0, \"burst\": 3.0}\n{\"arrival\": 1.0, \"burst\": 1.0}\n",
    )
    .unwrap();

    let config = SimConfig::default();
    let processes = schedsim_core::load_processes(&config, Some(tmp_path.as_path())).unwrap();
    let report =
        schedsim_core::run_simulation(&config, schedsim_core::SchedulingPolicy::Psjf, processes);

    // The short arrival preempts: it finishes at 2.0, the long one at 4.0.
    assert_eq!(report.processes_completed, 2);
    assert_eq!(report.final_time, 4.0);
    assert_eq!(report.preemptions, 1);
    assert_eq!(report.avg_turnaround_time, 2.5);
    assert_eq!(report.avg_waiting_time, 0.5);

    std::fs::remove_file(&tmp_path).ok();
}

#[test]
fn test_missing_workload_file() {
    let result = trace::load_workload(std::path::Path::new("/nonexistent/workload.jsonl"));
    assert!(matches!(result, Err(TraceError::Io(_))));
}

#[test]
fn test_workload_file_sets_reported_rate() {
    let tmp_path = std::env::temp_dir().join("schedsim_test_rate_workload.jsonl");
    std::fs::write(
        &tmp_path,
        "{\"arrival\": 0.5, \"burst\": 0.1}\n\
         {\"arrival\": 1.0, \"burst\": 0.1}\n\
         {\"arrival\": 1.5, \"burst\": 0.1}\n\
         {\"arrival\": 2.0, \"burst\": 0.1}\n",
    )
    .unwrap();

    let config = SimConfig::default();
    let (run_config, processes) =
        schedsim_core::load_run(&config, Some(tmp_path.as_path())).unwrap();
    assert_eq!(processes.len(), 4);
    assert_eq!(run_config.workload.arrival_rate, 2.0);

    let report = schedsim_core::run_simulation(
        &run_config,
        schedsim_core::SchedulingPolicy::RoundRobin,
        processes,
    );
    assert_eq!(report.arrival_rate, 2.0);

    // Synthetic workloads keep the configured rate.
    let (synthetic_config, _) = schedsim_core::load_run(&config, None).unwrap();
    assert_eq!(synthetic_config.workload.arrival_rate, config.workload.arrival_rate);

    std::fs::remove_file(&tmp_path).ok();
}
