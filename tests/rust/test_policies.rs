/// Integration tests for the ready-queue policies and run accounting.
use schedsim_policies::*;

fn served(id: u64, arrival: f64, burst: f64, dispatched_at: f64, amount: f64) -> Process {
    let mut p = Process::new(id, arrival, burst);
    p.mark_dispatched(dispatched_at);
    p.service(amount);
    p.is_returning = true;
    p
}

fn drain(queue: &mut ReadyQueue) -> Vec<u64> {
    std::iter::from_fn(|| queue.remove_head()).map(|p| p.id).collect()
}

#[test]
fn test_all_policies_resolve() {
    for name in available_policies() {
        let queue = ReadyQueue::from_name(name).unwrap();
        assert_eq!(queue.policy().name(), name);
        assert!(queue.is_empty());
    }
}

#[test]
fn test_policy_aliases() {
    assert_eq!(policy_by_name("srtf").unwrap(), SchedulingPolicy::Psjf);
    assert_eq!(policy_by_name("rr").unwrap(), SchedulingPolicy::RoundRobin);
    assert_eq!(
        policy_by_name("round-robin").unwrap(),
        SchedulingPolicy::RoundRobin
    );
}

#[test]
fn test_unknown_policy_fails() {
    match ReadyQueue::from_name("lottery") {
        Err(PolicyError::Unknown(name)) => assert_eq!(name, "lottery"),
        other => panic!("Expected Unknown, got {:?}", other),
    }
    assert!(policy_by_name("").is_err());
}

#[test]
fn test_empty_queue_has_no_head() {
    for policy in [SchedulingPolicy::Psjf, SchedulingPolicy::RoundRobin] {
        let mut queue = ReadyQueue::new(policy);
        assert!(queue.peek().is_none());
        assert!(queue.remove_head().is_none());
        assert_eq!(queue.len(), 0);
    }
}

#[test]
fn test_psjf_orders_by_remaining_time() {
    let mut queue = ReadyQueue::new(SchedulingPolicy::Psjf);
    queue.insert(Process::new(0, 0.0, 0.30));
    queue.insert(Process::new(1, 0.1, 0.05));
    // Burst 0.50 but only 0.02 left.
    queue.insert(served(2, 0.2, 0.50, 0.2, 0.48));
    queue.insert(Process::new(3, 0.3, 0.05));

    assert_eq!(queue.len(), 4);
    assert_eq!(queue.peek().map(|p| p.id), Some(2));
    assert_eq!(drain(&mut queue), vec![2, 1, 3, 0]);
}

#[test]
fn test_round_robin_ignores_remaining_time() {
    let mut queue = ReadyQueue::new(SchedulingPolicy::RoundRobin);
    queue.insert(Process::new(0, 0.0, 0.30));
    queue.insert(Process::new(1, 0.1, 0.05));
    queue.insert(Process::new(2, 0.2, 0.01));

    let head = queue.remove_head().unwrap();
    assert_eq!(head.id, 0);
    queue.insert(head);
    assert_eq!(drain(&mut queue), vec![1, 2, 0]);
}

#[test]
fn test_psjf_reconcile_terminates_residents() {
    let mut queue = ReadyQueue::new(SchedulingPolicy::Psjf);
    // Ran 1.5 of 4.0 after waiting 1.0.
    queue.insert(served(0, 1.0, 4.0, 2.0, 1.5));
    // Never ran.
    queue.insert(Process::new(1, 3.0, 2.0));

    let mut sums = RunningSums::new();
    let residents = queue.reconcile_at_end(10.0, &mut sums);

    assert_eq!(residents.len(), 2);
    assert!(queue.is_empty());
    assert_eq!(sums.processes_handled(), 2);
    // Full burst of the returning process only.
    assert_eq!(sums.serviced_burst_time(), 4.0);
    // Turnarounds 9 + 7.
    assert_eq!(sums.turnaround_time(), 16.0);
    // Waiting (1 + 4) + (0 + 5).
    assert_eq!(sums.waiting_time(), 10.0);
    assert!(residents.iter().all(|p| p.completion_time == Some(10.0)));
}

#[test]
fn test_round_robin_reconcile_credits_partial_work() {
    let mut queue = ReadyQueue::new(SchedulingPolicy::RoundRobin);
    queue.insert(served(0, 0.0, 0.08, 0.0, 0.03));
    queue.insert(served(1, 0.0, 0.50, 0.01, 0.02));
    queue.insert(Process::new(2, 0.5, 0.10));

    let mut sums = RunningSums::new();
    let residents = queue.reconcile_at_end(1.0, &mut sums);

    assert_eq!(residents.len(), 3);
    assert!(queue.is_empty());
    assert!((sums.serviced_burst_time() - 0.05).abs() < 1e-12);
    // Residents are not counted as handled.
    assert_eq!(sums.processes_handled(), 0);
    assert_eq!(sums.turnaround_time(), 0.0);
}

#[test]
fn test_reconcile_is_one_shot() {
    for policy in [SchedulingPolicy::Psjf, SchedulingPolicy::RoundRobin] {
        let mut queue = ReadyQueue::new(policy);
        queue.insert(served(0, 0.0, 1.0, 0.0, 0.5));

        let mut sums = RunningSums::new();
        queue.reconcile_at_end(2.0, &mut sums);
        let after_first = sums;
        assert!(queue.reconcile_at_end(2.0, &mut sums).is_empty());
        assert_eq!(sums, after_first, "{}", policy);
    }
}

#[test]
fn test_completion_and_utilization() {
    let mut sums = RunningSums::new();
    for (id, arrival, burst, start, end) in [(0, 0.0, 1.0, 0.0, 1.0), (1, 0.5, 2.0, 1.0, 3.0)] {
        let mut p = Process::new(id, arrival, burst);
        p.mark_dispatched(start);
        p.finish(end);
        sums.record_completion(&p);
    }
    assert_eq!(sums.processes_handled(), 2);
    assert_eq!(sums.serviced_burst_time(), 3.0);
    assert_eq!(sums.utilization(4.0), 0.75);
    assert_eq!(sums.mean_turnaround_time(2), 1.75);
    assert_eq!(sums.mean_waiting_time(2), 0.25);
    assert_eq!(sums.utilization(0.0), 0.0);
}
