/*!
 * Driver Tests
 * Workload runs on the tokio clock
 */

use partition_sim::memory::{Heap, Strategy};
use partition_sim::simulation::{
    run, RetryPolicy, SharedSimulation, Simulation, Submission, Workload,
};
use std::time::Duration;

fn submission(at_step: u64, size: usize, lifetime: u32) -> Submission {
    Submission {
        at_step,
        size,
        lifetime,
    }
}

#[tokio::test]
async fn test_demo_workload_runs_to_completion() {
    let sim = SharedSimulation::new(Simulation::default());
    let workload = Workload::demo();

    let summary = run(&sim, &workload, None, 1_000).await;

    assert_eq!(summary.admitted, workload.submissions.len());
    assert_eq!(summary.rejected, 0);
    assert_eq!(summary.completed, workload.submissions.len());
    assert_eq!(summary.unfinished, 0);
    assert_eq!(summary.final_stats.used_size, 0);
    assert_eq!(summary.final_stats.total_size, 1052);
    sim.with(|s| assert!(s.validate().is_ok()));
}

#[tokio::test]
async fn test_submissions_wait_for_their_step() {
    let sim = SharedSimulation::new(Simulation::new(
        Heap::with_partitions(&[100], 16).unwrap(),
        Strategy::FirstFit,
        RetryPolicy::EveryStep,
    ));
    let workload = Workload::new(vec![submission(0, 100, 2), submission(5, 100, 1)]);

    let summary = run(&sim, &workload, None, 100).await;

    // The second process arrives at step 5 and needs one more step to expire
    assert_eq!(summary.steps, 6);
    assert_eq!(summary.completed, 2);
}

#[tokio::test]
async fn test_invalid_and_rejected_submissions_are_counted() {
    let sim = SharedSimulation::new(Simulation::new(
        Heap::with_partitions(&[100], 16).unwrap(),
        Strategy::BestFit,
        RetryPolicy::Reject,
    ));
    let workload = Workload::new(vec![
        submission(0, 80, 1),
        submission(0, 80, 1),
        submission(0, 0, 1),
    ]);

    let summary = run(&sim, &workload, None, 100).await;

    assert_eq!(summary.admitted, 1);
    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.invalid, 1);
    assert_eq!(summary.completed, 1);
}

#[tokio::test]
async fn test_stalled_run_stops_early() {
    let sim = SharedSimulation::new(Simulation::new(
        Heap::with_partitions(&[100], 16).unwrap(),
        Strategy::FirstFit,
        RetryPolicy::Never,
    ));
    let workload = Workload::new(vec![submission(0, 100, 1), submission(0, 50, 1)]);

    let summary = run(&sim, &workload, None, 1_000).await;

    assert_eq!(summary.steps, 1);
    assert_eq!(summary.unfinished, 1);
}

#[tokio::test(start_paused = true)]
async fn test_paced_run_follows_tick_interval() {
    let sim = SharedSimulation::new(Simulation::default());
    let workload = Workload::new(vec![submission(0, 200, 3)]);

    let started = tokio::time::Instant::now();
    let summary = run(&sim, &workload, Some(Duration::from_secs(1)), 100).await;

    assert_eq!(summary.steps, 3);
    // First interval tick fires immediately
    assert!(started.elapsed() >= Duration::from_secs(2));
}
