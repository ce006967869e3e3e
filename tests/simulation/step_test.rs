/*!
 * Step Tests
 * Lifetime countdown, expiry and retry policies
 */

use partition_sim::core::types::Pid;
use partition_sim::memory::{Heap, Strategy};
use partition_sim::process::ProcessState;
use partition_sim::simulation::{RetryPolicy, Simulation, SubmitOutcome};
use pretty_assertions::assert_eq;

fn small_sim(retry: RetryPolicy) -> Simulation {
    Simulation::new(
        Heap::with_partitions(&[100], 16).unwrap(),
        Strategy::FirstFit,
        retry,
    )
}

#[test]
fn test_process_expires_after_lifetime_steps() {
    let mut sim = Simulation::default();
    let outcome = sim.submit(200, 3).unwrap();
    assert!(outcome.is_allocated());

    assert!(sim.step().expired.is_empty());
    assert_eq!(sim.process(Pid(0)).unwrap().time_left(), 2);
    assert!(sim.step().expired.is_empty());

    let report = sim.step();
    assert_eq!(report.clock, 3);
    assert_eq!(report.expired, vec![Pid(0)]);
    assert!(sim.is_idle());

    // Released block stays split and free
    let sizes: Vec<_> = sim.heap().blocks().iter().map(|b| (b.size, b.available)).collect();
    assert_eq!(
        sizes,
        vec![(200, true), (56, true), (330, true), (250, true), (216, true)]
    );
    assert!(sim.validate().is_ok());
}

#[test]
fn test_every_step_retries_pending_without_ticking() {
    let mut sim = small_sim(RetryPolicy::EveryStep);

    assert!(sim.submit(100, 1).unwrap().is_allocated());
    assert_eq!(
        sim.submit(60, 2).unwrap(),
        SubmitOutcome::Pending { pid: Pid(1) }
    );

    // pid 0 is visited first, so the retry of pid 1 sees the freed block
    let report = sim.step();
    assert_eq!(report.expired, vec![Pid(0)]);
    assert_eq!(report.allocated, vec![Pid(1)]);
    assert!(report.pending.is_empty());

    // Placed by a retry: no aging on the same step
    let p1 = sim.process(Pid(1)).unwrap();
    assert_eq!(p1.time_left(), 2);
    assert_eq!(p1.state(), ProcessState::Allocated);

    sim.step();
    let report = sim.step();
    assert_eq!(report.expired, vec![Pid(1)]);
    assert!(sim.is_idle());
}

#[test]
fn test_pending_process_does_not_age() {
    let mut sim = small_sim(RetryPolicy::EveryStep);
    sim.submit(100, 5).unwrap();
    sim.submit(50, 1).unwrap();

    for _ in 0..4 {
        let report = sim.step();
        assert_eq!(report.pending, vec![Pid(1)]);
    }
    assert_eq!(sim.process(Pid(1)).unwrap().time_left(), 1);
    assert_eq!(sim.process(Pid(1)).unwrap().state(), ProcessState::Pending);
}

#[test]
fn test_reject_policy_discards_unplaceable_process() {
    let mut sim = small_sim(RetryPolicy::Reject);
    sim.submit(100, 2).unwrap();

    let outcome = sim.submit(10, 2).unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected { pid: Pid(1) });
    assert_eq!(sim.processes().len(), 1);
    assert!(sim.process(Pid(1)).is_none());
}

#[test]
fn test_never_policy_leaves_pending_process_inert() {
    let mut sim = small_sim(RetryPolicy::Never);
    sim.submit(100, 1).unwrap();
    sim.submit(10, 1).unwrap();

    let report = sim.step();
    assert_eq!(report.expired, vec![Pid(0)]);
    assert_eq!(report.pending, vec![Pid(1)]);

    // Memory is free now, yet the pending process is never placed
    for _ in 0..3 {
        let report = sim.step();
        assert!(report.allocated.is_empty());
    }
    assert!(sim.is_stalled());
    assert_eq!(sim.heap().stats().used_size, 0);
}

#[test]
fn test_all_processes_visited_when_neighbours_expire() {
    let mut sim = Simulation::new(
        Heap::with_partitions(&[50, 50, 50], 0).unwrap(),
        Strategy::FirstFit,
        RetryPolicy::EveryStep,
    );
    sim.submit(50, 1).unwrap();
    sim.submit(50, 1).unwrap();
    sim.submit(50, 2).unwrap();

    let report = sim.step();
    assert_eq!(report.expired, vec![Pid(0), Pid(1)]);
    assert_eq!(sim.process(Pid(2)).unwrap().time_left(), 1);

    let report = sim.step();
    assert_eq!(report.expired, vec![Pid(2)]);
}

#[test]
fn test_best_fit_simulation_uses_tightest_partition() {
    let mut sim = Simulation::new(Heap::default(), Strategy::BestFit, RetryPolicy::EveryStep);
    let outcome = sim.submit(200, 1).unwrap();

    let SubmitOutcome::Allocated { block, .. } = outcome else {
        panic!("expected allocation, got {outcome:?}");
    };
    assert_eq!(sim.heap().block(block).unwrap().size(), 216);
    assert_eq!(sim.process_table()[0].block, Some(block));
}
